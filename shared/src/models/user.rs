//! User account record

use serde::{Deserialize, Serialize};

/// Account role - gates admin-only operations in the engine
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// User record
///
/// Credentials are a plain stored match by design - there is no session
/// protocol or hashing in this system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: Role,
    pub created_at: i64,
}
