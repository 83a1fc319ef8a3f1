use crate::config::MemoryConfig;
use crate::domain::ChatMessage;
use std::collections::VecDeque;

/// Rolling window over the most recent conversation messages
#[derive(Debug, Clone)]
pub struct ConversationMemory {
    window: usize,
    messages: VecDeque<ChatMessage>,
}

impl ConversationMemory {
    pub fn new(config: MemoryConfig) -> Self {
        let window = config.last_messages.max(1);
        Self {
            window,
            messages: VecDeque::with_capacity(window),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Append a message, evicting the oldest once the window is full
    pub fn push(&mut self, message: ChatMessage) {
        if self.messages.len() == self.window {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    pub fn messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    pub fn to_vec(&self) -> Vec<ChatMessage> {
        self.messages.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl Extend<ChatMessage> for ConversationMemory {
    fn extend<I: IntoIterator<Item = ChatMessage>>(&mut self, iter: I) {
        for message in iter {
            self.push(message);
        }
    }
}
