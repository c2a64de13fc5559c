//! Chat message record
//!
//! One thread per customer; the admin side answers into the same thread.

use serde::{Deserialize, Serialize};

/// Which side of the counter sent a message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChatSender {
    User,
    Admin,
}

/// Chat message record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    /// Thread owner - always the customer's id, regardless of sender
    pub user_id: String,
    pub sender: ChatSender,
    pub text: String,
    pub timestamp: i64,
}
