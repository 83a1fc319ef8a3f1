//! Allow-list of identity, connection, credential and proof operations the assistant
//! may use as a credential receiver.

use super::catalog::{ToolCatalog, prefixed_name};
use std::collections::HashSet;

pub const RECEIVER_TOOL_NAMES: [&str; 13] = [
    "create-did",
    "list-did",
    "resolve-did",
    "accept-connection-invitation-didcomm",
    "list-connections-didcomm",
    "get-connection-record-didcomm",
    "accept-credential-offer",
    "list-credentials",
    "get-credential-record",
    "list-credential-exchange-records",
    "accept-proof-request",
    "list-proofs",
    "get-proof-record",
];

pub const LIST_DID: &str = "list-did";
pub const CREATE_DID: &str = "create-did";

/// Unprefixed operation names a catalog is narrowed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    operations: Vec<String>,
}

impl Default for AllowList {
    fn default() -> Self {
        Self::receiver()
    }
}

impl AllowList {
    pub fn new<I, S>(operations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            operations: operations.into_iter().map(Into::into).collect(),
        }
    }

    pub fn receiver() -> Self {
        Self::new(RECEIVER_TOOL_NAMES)
    }

    pub fn operations(&self) -> &[String] {
        &self.operations
    }

    pub fn prefixed(&self, server: &str) -> HashSet<String> {
        self.operations
            .iter()
            .map(|operation| prefixed_name(server, operation))
            .collect()
    }

    /// Entries of `catalog` whose prefixed names are allowed, in catalog order.
    ///
    /// Allowed operations missing from the catalog are skipped.
    pub fn filter(&self, catalog: &ToolCatalog, server: &str) -> ToolCatalog {
        let allowed = self.prefixed(server);
        catalog.retain_by_name(|name| allowed.contains(name))
    }
}
