//! Chat message store
//!
//! One thread per customer, keyed by the customer's id. Admin replies are
//! appended into the same thread with the sender flag flipped.

use std::sync::Arc;

use shared::models::{ChatMessage, ChatSender};

use crate::engine::error::EngineResult;
use crate::storage::{self, DurableStore, keys};

/// Chat message store
pub struct ChatStore {
    store: Arc<dyn DurableStore>,
    messages: Vec<ChatMessage>,
}

impl ChatStore {
    /// Load the message log from the durable store
    pub fn load(store: Arc<dyn DurableStore>) -> EngineResult<Self> {
        let messages =
            storage::load_collection(store.as_ref(), keys::CHATS)?.unwrap_or_default();
        Ok(Self { store, messages })
    }

    /// Append a message to a customer's thread
    ///
    /// `thread_owner` is the customer's id no matter which side sends.
    pub fn append(
        &mut self,
        thread_owner: &str,
        sender: ChatSender,
        text: impl Into<String>,
    ) -> EngineResult<ChatMessage> {
        let message = ChatMessage {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: thread_owner.to_string(),
            sender,
            text: text.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        };
        self.messages.push(message.clone());
        if let Err(e) = self.persist() {
            self.messages.pop();
            return Err(e);
        }
        Ok(message)
    }

    /// One customer's thread, oldest first
    pub fn thread(&self, user_id: &str) -> Vec<&ChatMessage> {
        self.messages.iter().filter(|m| m.user_id == user_id).collect()
    }

    /// Customer ids with at least one message, in first-contact order
    pub fn thread_owners(&self) -> Vec<&str> {
        let mut owners: Vec<&str> = Vec::new();
        for message in &self.messages {
            if !owners.contains(&message.user_id.as_str()) {
                owners.push(&message.user_id);
            }
        }
        owners
    }

    fn persist(&self) -> EngineResult<()> {
        storage::persist_collection(self.store.as_ref(), keys::CHATS, &self.messages)?;
        Ok(())
    }
}
