//! Instruction text handed to the assistant at construction.

use crate::application::tooling::receiver::RECEIVER_TOOL_NAMES;
use crate::application::tooling::{ToolCatalog, prefixed_name};
use crate::constants::WEATHER_TOOL_KEY;

const WEATHER_GUIDANCE: &str = "\
You are a helpful weather assistant that provides accurate weather information. \
You can also run decentralized identity operations with the identity tools listed below.

Your primary function is to help users get weather details for specific locations. When responding:
- Always ask for a location if none is provided
- If the location name isn't in English, please translate it
- If giving a location with multiple parts (e.g. \"New York, NY\"), use the most relevant part (e.g. \"New York\")
- Include relevant details like humidity, wind conditions, and precipitation
- Keep responses concise but informative";

struct OperationGuide {
    operation: &'static str,
    summary: &'static str,
    params: &'static str,
}

const OPERATION_GUIDES: [OperationGuide; 13] = [
    OperationGuide {
        operation: "create-did",
        summary: "create a new DID",
        params: "network (\"testnet\" or \"mainnet\")",
    },
    OperationGuide {
        operation: "list-did",
        summary: "list the DIDs held by this agent",
        params: "",
    },
    OperationGuide {
        operation: "resolve-did",
        summary: "resolve a DID to its document",
        params: "did",
    },
    OperationGuide {
        operation: "accept-connection-invitation-didcomm",
        summary: "accept a DIDComm connection invitation",
        params: "invitationUrl",
    },
    OperationGuide {
        operation: "list-connections-didcomm",
        summary: "list DIDComm connections",
        params: "",
    },
    OperationGuide {
        operation: "get-connection-record-didcomm",
        summary: "fetch a DIDComm connection record",
        params: "connectionId",
    },
    OperationGuide {
        operation: "accept-credential-offer",
        summary: "accept a credential offer",
        params: "credentialRecordId",
    },
    OperationGuide {
        operation: "list-credentials",
        summary: "list stored credentials",
        params: "",
    },
    OperationGuide {
        operation: "get-credential-record",
        summary: "fetch a stored credential",
        params: "credentialId",
    },
    OperationGuide {
        operation: "list-credential-exchange-records",
        summary: "list credential exchange records",
        params: "",
    },
    OperationGuide {
        operation: "accept-proof-request",
        summary: "accept a proof request",
        params: "proofRecordId",
    },
    OperationGuide {
        operation: "list-proofs",
        summary: "list proof exchanges",
        params: "",
    },
    OperationGuide {
        operation: "get-proof-record",
        summary: "fetch a proof exchange record",
        params: "proofRecordId",
    },
];

/// Static guidance plus one line per identity tool present in `receiver_tools`.
///
/// Lines follow the receiver allow-list order.
pub fn compose_instructions(server: &str, receiver_tools: &ToolCatalog) -> String {
    let mut text = String::from(WEATHER_GUIDANCE);
    text.push_str(&format!(
        "\n\nUse the {WEATHER_TOOL_KEY} to fetch current weather data."
    ));

    let lines: Vec<String> = RECEIVER_TOOL_NAMES
        .iter()
        .map(|operation| prefixed_name(server, operation))
        .filter(|name| receiver_tools.contains(name))
        .filter_map(|name| {
            let operation = name.strip_prefix(server)?.strip_prefix('_')?;
            let guide = OPERATION_GUIDES
                .iter()
                .find(|guide| guide.operation == operation)?;
            Some(match guide.params {
                "" => format!("- {name}: {} (no parameters)", guide.summary),
                params => format!("- {name}: {} (requires {params})", guide.summary),
            })
        })
        .collect();

    if lines.is_empty() {
        text.push_str(
            "\n\nIdentity tools are currently unavailable. Tell the user DID operations cannot be performed right now.",
        );
    } else {
        text.push_str("\n\nFor DID related queries, use these identity tools:\n");
        text.push_str(&lines.join("\n"));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_receiver_operation_has_a_guide() {
        for operation in RECEIVER_TOOL_NAMES {
            assert!(
                OPERATION_GUIDES.iter().any(|guide| guide.operation == operation),
                "missing guide for {operation}"
            );
        }
    }

    #[test]
    fn empty_catalog_reports_unavailable_tools() {
        let text = compose_instructions("cheqd", &ToolCatalog::new());
        assert!(text.contains("weatherTool"));
        assert!(text.contains("currently unavailable"));
        assert!(!text.contains("cheqd_"));
    }
}
