use super::decode::{decode_created_did, decode_did_list, did_of};
use super::errors::BootstrapError;
use crate::application::tooling::receiver::{CREATE_DID, LIST_DID};
use crate::application::tooling::{McpGateway, prefixed_name};
use crate::constants::BOOTSTRAP_NETWORK;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

/// Where the identity used by this process came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityOrigin {
    Existing,
    Created,
}

/// DID resolved at startup. Held only for the lifetime of the assistant handle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identity {
    pub did: Option<String>,
    pub record: Value,
    pub origin: IdentityOrigin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapPhase {
    NotChecked,
    Checking,
    Found,
    Creating,
    Created,
    CreationFailed,
    Done,
}

/// Single-use runner that makes sure a DID exists.
///
/// Lists DIDs through `<server>_list-did` and only calls `<server>_create-did` (on
/// testnet) when the list comes back empty.
pub struct IdentityBootstrap<'a> {
    gateway: &'a McpGateway,
    phase: BootstrapPhase,
    trail: Vec<BootstrapPhase>,
}

impl<'a> IdentityBootstrap<'a> {
    pub fn new(gateway: &'a McpGateway) -> Self {
        Self {
            gateway,
            phase: BootstrapPhase::NotChecked,
            trail: vec![BootstrapPhase::NotChecked],
        }
    }

    pub fn phase(&self) -> BootstrapPhase {
        self.phase
    }

    /// Every phase visited so far, in order
    pub fn trail(&self) -> &[BootstrapPhase] {
        &self.trail
    }

    /// Always leaves the runner in [`BootstrapPhase::Done`], whatever the outcome
    pub async fn run(&mut self) -> Result<Identity, BootstrapError> {
        self.advance(BootstrapPhase::Checking);
        let outcome = self.resolve().await;
        if outcome.is_err() && self.phase == BootstrapPhase::Creating {
            self.advance(BootstrapPhase::CreationFailed);
        }
        self.advance(BootstrapPhase::Done);
        outcome
    }

    async fn resolve(&mut self) -> Result<Identity, BootstrapError> {
        let gateway = self.gateway;
        let catalog = gateway.get_tools().await?;
        let server = gateway.server_name();
        let list_name = prefixed_name(server, LIST_DID);
        let create_name = prefixed_name(server, CREATE_DID);

        let Some(list_tool) = catalog.get(&list_name) else {
            return Err(BootstrapError::MissingTool { name: list_name });
        };
        let Some(create_tool) = catalog.get(&create_name) else {
            return Err(BootstrapError::MissingTool { name: create_name });
        };

        // The server rejects a missing arguments object, so send `{}` explicitly.
        let listed = decode_did_list(list_tool.invoke(json!({})).await?);
        debug!(count = listed.len(), "Listed existing DIDs");

        if let Some(first) = listed.into_iter().next() {
            self.advance(BootstrapPhase::Found);
            let did = did_of(&first);
            info!(did = did.as_deref().unwrap_or("unknown"), "Using existing DID");
            return Ok(Identity {
                did,
                record: first,
                origin: IdentityOrigin::Existing,
            });
        }

        self.advance(BootstrapPhase::Creating);
        info!(network = BOOTSTRAP_NETWORK, "No DID found, creating one");
        let raw = create_tool
            .invoke(json!({ "network": BOOTSTRAP_NETWORK }))
            .await?;
        let (record, did) = decode_created_did(raw);
        self.advance(BootstrapPhase::Created);

        match did.as_deref() {
            Some(did) => info!(did, "Created DID"),
            None => warn!("DID created but its identifier is unknown"),
        }
        Ok(Identity {
            did,
            record,
            origin: IdentityOrigin::Created,
        })
    }

    fn advance(&mut self, next: BootstrapPhase) {
        debug!(from = ?self.phase, to = ?next, "Identity bootstrap phase");
        self.phase = next;
        self.trail.push(next);
    }
}

/// Run the bootstrap once against `gateway`
pub async fn bootstrap_identity(gateway: &McpGateway) -> Result<Identity, BootstrapError> {
    IdentityBootstrap::new(gateway).run().await
}
