use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::workflows::content::ContentStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// One conversation: the searchable content plus the running transcript.
#[derive(Debug, Default)]
pub struct AssistantSession {
    content: ContentStore,
    messages: Mutex<Vec<ChatMessage>>,
}

impl AssistantSession {
    pub fn new(content: ContentStore) -> Self {
        Self {
            content,
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    pub fn push(&self, role: ChatRole, content: impl Into<String>) {
        let message = ChatMessage {
            role,
            content: content.into(),
        };
        match self.messages.lock() {
            Ok(mut guard) => guard.push(message),
            Err(poisoned) => poisoned.into_inner().push(message),
        }
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        match self.messages.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn clear_messages(&self) {
        match self.messages.lock() {
            Ok(mut guard) => guard.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}
