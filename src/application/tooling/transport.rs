//! MCP Streamable HTTP transport.
//!
//! Every JSON-RPC message is POSTed to a single endpoint. The server answers with either
//! a JSON body or an SSE stream carrying the response. A session id handed out during
//! `initialize` is echoed on every later request until [`HttpTransport::close`].

use super::envelope::envelope_text;
use super::error::ToolInvokeError;
use super::interface::{ServerToolInfo, ToolServerInterface};
use crate::constants::PROTOCOL_VERSION;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode, Url};
use serde_json::{Value, json};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, warn};

pub const SESSION_HEADER: &str = "mcp-session-id";
pub const PROTOCOL_HEADER: &str = "mcp-protocol-version";

pub struct HttpTransport {
    server: String,
    client_id: String,
    endpoint: Url,
    http: Client,
    state: AsyncMutex<SessionState>,
    id_counter: AtomicU64,
}

#[derive(Debug, Default)]
struct SessionState {
    initialized: bool,
    session_id: Option<String>,
    instructions: Option<String>,
}

struct Reply {
    session_id: Option<String>,
    messages: Vec<Value>,
}

impl HttpTransport {
    pub fn new(server: impl Into<String>, client_id: impl Into<String>, endpoint: Url) -> Self {
        Self::with_client(server, client_id, endpoint, Client::new())
    }

    pub fn with_client(
        server: impl Into<String>,
        client_id: impl Into<String>,
        endpoint: Url,
        http: Client,
    ) -> Self {
        Self {
            server: server.into(),
            client_id: client_id.into(),
            endpoint,
            http,
            state: AsyncMutex::new(SessionState::default()),
            id_counter: AtomicU64::new(1),
        }
    }

    pub async fn session_id(&self) -> Option<String> {
        self.state.lock().await.session_id.clone()
    }

    async fn ensure_session(&self) -> Result<Option<String>, ToolInvokeError> {
        let mut state = self.state.lock().await;
        if !state.initialized {
            self.initialize_sequence(&mut state).await?;
        }
        Ok(state.session_id.clone())
    }

    async fn initialize_sequence(&self, state: &mut SessionState) -> Result<(), ToolInvokeError> {
        let id = self.next_id();
        let params = json!({
            "protocolVersion": PROTOCOL_VERSION,
            "clientInfo": {
                "name": self.client_id,
                "version": env!("CARGO_PKG_VERSION"),
            },
            "capabilities": {}
        });
        let reply = self
            .post(&rpc_request(&id, "initialize", params), None, false)
            .await?;
        let result = self.take_result(&id, "initialize", reply.messages)?;

        state.session_id = reply.session_id;
        state.instructions = result
            .get("instructions")
            .and_then(Value::as_str)
            .map(str::to_string);
        if let Some(version) = result.get("protocolVersion").and_then(Value::as_str) {
            if version != PROTOCOL_VERSION {
                debug!(
                    server = %self.server,
                    requested = PROTOCOL_VERSION,
                    negotiated = version,
                    "Server negotiated a different protocol revision"
                );
            }
        }

        let notification = json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized",
        });
        if let Err(err) = self
            .post(&notification, state.session_id.as_deref(), true)
            .await
        {
            // initialize already opened a session on the server.
            if let Some(session) = state.session_id.take() {
                if let Err(close_err) = self.delete_session(&session).await {
                    debug!(server = %self.server, %close_err, "Failed to release half-open session");
                }
            }
            *state = SessionState::default();
            return Err(err);
        }
        state.initialized = true;

        info!(
            server = %self.server,
            endpoint = %self.endpoint,
            session = state.session_id.as_deref().unwrap_or("-"),
            "MCP session established"
        );
        Ok(())
    }

    async fn send_request(&self, method: &str, params: Value) -> Result<Value, ToolInvokeError> {
        let session = self.ensure_session().await?;
        let id = self.next_id();
        debug!(server = %self.server, method, id = %id, "Sending MCP request");

        let reply = match self
            .post(&rpc_request(&id, method, params), session.as_deref(), true)
            .await
        {
            Ok(reply) => reply,
            Err(err) => {
                if session.is_some() && matches!(err, ToolInvokeError::Http { status: 404, .. }) {
                    // Session expired server-side; the next call handshakes again.
                    warn!(server = %self.server, "MCP session no longer recognised");
                    *self.state.lock().await = SessionState::default();
                }
                return Err(err);
            }
        };
        self.take_result(&id, method, reply.messages)
    }

    async fn post(
        &self,
        payload: &Value,
        session: Option<&str>,
        negotiated: bool,
    ) -> Result<Reply, ToolInvokeError> {
        let mut request = self
            .http
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json, text/event-stream")
            .json(payload);
        if let Some(session) = session {
            request = request.header(SESSION_HEADER, session);
        }
        if negotiated {
            request = request.header(PROTOCOL_HEADER, PROTOCOL_VERSION);
        }

        let response = request
            .send()
            .await
            .map_err(|err| self.transport_error(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ToolInvokeError::Http {
                server: self.server.clone(),
                status: status.as_u16(),
            });
        }

        let session_id = response
            .headers()
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let is_event_stream = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("text/event-stream"));

        let body = response
            .text()
            .await
            .map_err(|err| self.transport_error(err.to_string()))?;

        let messages = if body.trim().is_empty() {
            Vec::new()
        } else if is_event_stream {
            parse_event_stream(&body).map_err(|source| self.invalid_json(source))?
        } else {
            match serde_json::from_str::<Value>(&body).map_err(|source| self.invalid_json(source))? {
                Value::Array(batch) => batch,
                single => vec![single],
            }
        };

        Ok(Reply {
            session_id,
            messages,
        })
    }

    fn take_result(
        &self,
        id: &str,
        method: &str,
        messages: Vec<Value>,
    ) -> Result<Value, ToolInvokeError> {
        let response = messages
            .into_iter()
            .find(|message| message.get("id").and_then(Value::as_str) == Some(id))
            .ok_or_else(|| ToolInvokeError::MissingResponse {
                server: self.server.clone(),
                method: method.to_string(),
            })?;

        if let Some(error) = response.get("error") {
            return Err(ToolInvokeError::Rpc {
                server: self.server.clone(),
                code: error.get("code").and_then(Value::as_i64).unwrap_or(-32000),
                message: error
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown error")
                    .to_string(),
            });
        }

        Ok(response.get("result").cloned().unwrap_or(Value::Null))
    }

    /// DELETE the session. Servers that do not support explicit teardown answer 405.
    async fn delete_session(&self, session: &str) -> Result<(), ToolInvokeError> {
        let response = self
            .http
            .delete(self.endpoint.clone())
            .header(SESSION_HEADER, session)
            .header(PROTOCOL_HEADER, PROTOCOL_VERSION)
            .send()
            .await
            .map_err(|err| self.transport_error(err.to_string()))?;

        let status = response.status();
        if status.is_success() || status == StatusCode::METHOD_NOT_ALLOWED {
            debug!(server = %self.server, session, "MCP session closed");
            Ok(())
        } else {
            Err(ToolInvokeError::Http {
                server: self.server.clone(),
                status: status.as_u16(),
            })
        }
    }

    fn next_id(&self) -> String {
        let id = self.id_counter.fetch_add(1, Ordering::SeqCst);
        format!("req-{id}")
    }

    fn transport_error(&self, message: impl Into<String>) -> ToolInvokeError {
        ToolInvokeError::Transport {
            server: self.server.clone(),
            message: message.into(),
        }
    }

    fn invalid_json(&self, source: serde_json::Error) -> ToolInvokeError {
        ToolInvokeError::InvalidJson {
            server: self.server.clone(),
            source,
        }
    }
}

#[async_trait]
impl ToolServerInterface for HttpTransport {
    fn server_name(&self) -> &str {
        &self.server
    }

    async fn list_tools(&self) -> Result<Vec<ServerToolInfo>, ToolInvokeError> {
        let mut tools = Vec::new();
        let mut cursor: Option<String> = None;
        let mut seen_cursors = HashSet::new();

        loop {
            let params = match &cursor {
                Some(cursor) => json!({ "cursor": cursor }),
                None => json!({}),
            };
            let result = self.send_request("tools/list", params).await?;
            let page = result.get("tools").and_then(Value::as_array).ok_or_else(|| {
                ToolInvokeError::MalformedCatalog {
                    server: self.server.clone(),
                    message: "missing 'tools' array".to_string(),
                }
            })?;

            for tool in page {
                let Some(name) = tool.get("name").and_then(Value::as_str) else {
                    warn!(server = %self.server, "Skipping tool without a name");
                    continue;
                };
                tools.push(ServerToolInfo {
                    name: name.to_string(),
                    description: tool
                        .get("description")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    input_schema: tool.get("inputSchema").cloned(),
                });
            }

            cursor = result
                .get("nextCursor")
                .and_then(Value::as_str)
                .map(str::to_string);
            match &cursor {
                None => break,
                Some(next) if !seen_cursors.insert(next.clone()) => {
                    return Err(ToolInvokeError::MalformedCatalog {
                        server: self.server.clone(),
                        message: format!("repeated nextCursor '{next}'"),
                    });
                }
                Some(_) => {}
            }
        }

        debug!(server = %self.server, count = tools.len(), "Fetched MCP tool listing");
        Ok(tools)
    }

    async fn call_tool(&self, tool: &str, arguments: Value) -> Result<Value, ToolInvokeError> {
        let params = json!({
            "name": tool,
            "arguments": match arguments {
                Value::Null => Value::Object(Default::default()),
                other => other,
            }
        });
        let result = self.send_request("tools/call", params).await?;

        if result.get("isError").and_then(Value::as_bool) == Some(true) {
            return Err(ToolInvokeError::ToolFailed {
                server: self.server.clone(),
                tool: tool.to_string(),
                message: envelope_text(&result)
                    .unwrap_or("tool reported an error")
                    .to_string(),
            });
        }
        Ok(result)
    }

    async fn server_instructions(&self) -> Option<String> {
        match self.ensure_session().await {
            Ok(_) => self.state.lock().await.instructions.clone(),
            Err(err) => {
                warn!(server = %self.server, %err, "Failed to fetch server instructions");
                None
            }
        }
    }

    async fn close(&self) -> Result<(), ToolInvokeError> {
        let mut state = self.state.lock().await;
        let session = state.session_id.take();
        *state = SessionState::default();
        drop(state);

        let Some(session) = session else {
            return Ok(());
        };

        self.delete_session(&session).await
    }
}

fn rpc_request(id: &str, method: &str, params: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": params
    })
}

/// Collect the JSON payloads of every `data:` event in an SSE body.
pub fn parse_event_stream(body: &str) -> Result<Vec<Value>, serde_json::Error> {
    let mut messages = Vec::new();
    let mut data = String::new();

    for line in body.lines().chain(std::iter::once("")) {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            if !data.trim().is_empty() {
                messages.push(serde_json::from_str(&data)?);
            }
            data.clear();
        } else if let Some(rest) = line.strip_prefix("data:") {
            if !data.is_empty() {
                data.push('\n');
            }
            data.push_str(rest.strip_prefix(' ').unwrap_or(rest));
        }
    }

    Ok(messages)
}
