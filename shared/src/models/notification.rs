//! Directed notification record
//!
//! Append-only: created as a side effect of an order transition or a chat
//! send, mutated only by the owning recipient flipping `read`, never
//! deleted.

use serde::{Deserialize, Serialize};

/// Sentinel recipient id meaning "the administrator"
pub const ADMIN_SENTINEL: &str = "admin";

/// Notification addressee - a concrete customer or the admin sentinel
///
/// Stored on the wire as a plain string (`"admin"` or the customer id),
/// matching the storefront's records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum Recipient {
    Admin,
    Customer(String),
}

impl From<String> for Recipient {
    fn from(value: String) -> Self {
        if value == ADMIN_SENTINEL {
            Recipient::Admin
        } else {
            Recipient::Customer(value)
        }
    }
}

impl From<Recipient> for String {
    fn from(value: Recipient) -> Self {
        match value {
            Recipient::Admin => ADMIN_SENTINEL.to_string(),
            Recipient::Customer(id) => id,
        }
    }
}

impl Recipient {
    pub fn customer(id: impl Into<String>) -> Self {
        Recipient::Customer(id.into())
    }
}

/// Severity - informs styling only, no behavioral effect
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
}

/// Notification record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: String,
    #[serde(rename = "user_id")]
    pub recipient: Recipient,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub severity: Severity,
    pub read: bool,
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipient_round_trip() {
        let admin: Recipient = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(admin, Recipient::Admin);
        assert_eq!(serde_json::to_string(&admin).unwrap(), "\"admin\"");

        let customer: Recipient = serde_json::from_str("\"u-42\"").unwrap();
        assert_eq!(customer, Recipient::customer("u-42"));
        assert_eq!(serde_json::to_string(&customer).unwrap(), "\"u-42\"");
    }

    #[test]
    fn test_severity_wire_casing() {
        assert_eq!(
            serde_json::to_string(&Severity::Warning).unwrap(),
            "\"WARNING\""
        );
    }
}
