#![allow(dead_code)]

use async_trait::async_trait;
use identity_assistant::application::tooling::{
    McpGateway, ServerToolInfo, Tool, ToolError, ToolInvokeError, ToolServerInterface,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory tool server that records every call
pub struct MockServer {
    name: String,
    tools: Mutex<Vec<ServerToolInfo>>,
    responses: Mutex<HashMap<String, Result<Value, String>>>,
    calls: Mutex<Vec<(String, Value)>>,
    list_calls: AtomicUsize,
    close_calls: AtomicUsize,
    fail_listing: AtomicBool,
}

impl MockServer {
    pub fn new(tools: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            name: "cheqd".to_string(),
            tools: Mutex::new(infos(tools)),
            responses: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            list_calls: AtomicUsize::new(0),
            close_calls: AtomicUsize::new(0),
            fail_listing: AtomicBool::new(false),
        })
    }

    pub fn set_tools(&self, tools: &[&str]) {
        *self.tools.lock().unwrap() = infos(tools);
    }

    pub fn respond(&self, tool: &str, value: Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(tool.to_string(), Ok(value));
    }

    pub fn fail(&self, tool: &str, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(tool.to_string(), Err(message.to_string()));
    }

    pub fn fail_listing(&self) {
        self.fail_listing.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, tool: &str) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter(|(name, _)| name == tool)
            .map(|(_, arguments)| arguments)
            .collect()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ToolServerInterface for MockServer {
    fn server_name(&self) -> &str {
        &self.name
    }

    async fn list_tools(&self) -> Result<Vec<ServerToolInfo>, ToolInvokeError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(ToolInvokeError::Transport {
                server: self.name.clone(),
                message: "connection refused".to_string(),
            });
        }
        Ok(self.tools.lock().unwrap().clone())
    }

    async fn call_tool(&self, tool: &str, arguments: Value) -> Result<Value, ToolInvokeError> {
        self.calls
            .lock()
            .unwrap()
            .push((tool.to_string(), arguments));
        let response = self.responses.lock().unwrap().get(tool).cloned();
        match response {
            Some(Ok(value)) => Ok(value),
            Some(Err(message)) => Err(ToolInvokeError::ToolFailed {
                server: self.name.clone(),
                tool: tool.to_string(),
                message,
            }),
            None => Ok(envelope("{}")),
        }
    }

    async fn close(&self) -> Result<(), ToolInvokeError> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Stand-in for the weather tool that echoes its context
pub struct EchoTool;

#[async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str {
        "get-weather"
    }

    fn description(&self) -> Option<&str> {
        Some("Echo weather stub")
    }

    fn input_schema(&self) -> Option<&Value> {
        None
    }

    async fn execute(&self, context: Value) -> Result<Value, ToolError> {
        Ok(json!({ "echo": context }))
    }
}

pub fn gateway(server: &Arc<MockServer>) -> McpGateway {
    McpGateway::with_server(server.clone())
}

pub fn envelope(text: &str) -> Value {
    json!({ "content": [ { "type": "text", "text": text } ] })
}

fn infos(tools: &[&str]) -> Vec<ServerToolInfo> {
    tools
        .iter()
        .map(|name| ServerToolInfo::new(*name).with_description(format!("{name} operation")))
        .collect()
}
