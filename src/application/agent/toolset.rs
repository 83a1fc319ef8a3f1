use crate::application::tooling::Tool;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Tool mapping handed to the assistant, keyed by the name the model calls it by
#[derive(Clone, Default)]
pub struct ToolSet {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl fmt::Debug for ToolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.tools.keys()).finish()
    }
}

impl ToolSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `tool` under `key`. Returns the tool previously stored there.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        tool: Arc<dyn Tool>,
    ) -> Option<Arc<dyn Tool>> {
        self.tools.insert(key.into(), tool)
    }

    pub fn get(&self, key: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.tools.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Tool>)> {
        self.tools.iter().map(|(key, tool)| (key.as_str(), tool))
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
