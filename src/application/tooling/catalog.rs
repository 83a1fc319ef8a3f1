//! Server-prefixed view of a remote tool listing.

use super::error::{ToolError, ToolInvokeError};
use super::interface::{ServerToolInfo, Tool, ToolServerInterface};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Build the catalog key for an operation: `<server>_<operation>`
pub fn prefixed_name(server: &str, operation: &str) -> String {
    format!("{server}_{operation}")
}

/// A remote tool that can be invoked through its server connection
#[derive(Clone)]
pub struct ToolDescriptor {
    name: String,
    info: ServerToolInfo,
    server: Arc<dyn ToolServerInterface>,
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("server", &self.server.server_name())
            .field("description", &self.info.description)
            .finish()
    }
}

impl ToolDescriptor {
    pub fn new(info: ServerToolInfo, server: Arc<dyn ToolServerInterface>) -> Self {
        Self {
            name: prefixed_name(server.server_name(), &info.name),
            info,
            server,
        }
    }

    /// Prefixed catalog key
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Operation name as the server knows it
    pub fn operation(&self) -> &str {
        &self.info.name
    }

    pub fn server_name(&self) -> &str {
        self.server.server_name()
    }

    pub fn info(&self) -> &ServerToolInfo {
        &self.info
    }

    /// Invoke the remote operation.
    ///
    /// The context becomes the MCP `arguments` object. A null context is sent as `{}`.
    pub async fn invoke(&self, context: Value) -> Result<Value, ToolInvokeError> {
        let arguments = match context {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };
        self.server.call_tool(&self.info.name, arguments).await
    }
}

#[async_trait]
impl Tool for ToolDescriptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.info.description.as_deref()
    }

    fn input_schema(&self) -> Option<&Value> {
        self.info.input_schema.as_ref()
    }

    async fn execute(&self, context: Value) -> Result<Value, ToolError> {
        if !(context.is_object() || context.is_null()) {
            return Err(ToolError::InvalidInput {
                tool: self.name.clone(),
                message: "context must be a JSON object".to_string(),
            });
        }
        Ok(self.invoke(context).await?)
    }
}

/// Prefixed tool name → descriptor, in server listing order
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    entries: Vec<ToolDescriptor>,
    index: HashMap<String, usize>,
}

impl ToolCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a descriptor, replacing any entry with the same name in place
    pub fn insert(&mut self, descriptor: ToolDescriptor) {
        match self.index.get(descriptor.name()) {
            Some(&position) => self.entries[position] = descriptor,
            None => {
                self.index
                    .insert(descriptor.name().to_string(), self.entries.len());
                self.entries.push(descriptor);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|&position| &self.entries[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(ToolDescriptor::name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.entries.iter()
    }

    /// Keep only entries accepted by `keep`, preserving order
    pub fn retain_by_name<F>(&self, mut keep: F) -> ToolCatalog
    where
        F: FnMut(&str) -> bool,
    {
        self.entries
            .iter()
            .filter(|descriptor| keep(descriptor.name()))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ToolDescriptor> for ToolCatalog {
    fn from_iter<I: IntoIterator<Item = ToolDescriptor>>(iter: I) -> Self {
        let mut catalog = ToolCatalog::new();
        for descriptor in iter {
            catalog.insert(descriptor);
        }
        catalog
    }
}

impl IntoIterator for ToolCatalog {
    type Item = ToolDescriptor;
    type IntoIter = std::vec::IntoIter<ToolDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
