//! Leaf record stores around the order engine
//!
//! Simple collection stores, each persisting its whole collection under a
//! fixed key after every write. No algorithmic content lives here - the
//! engine only ever reads a product price snapshot and a settings
//! snapshot out of these.

pub mod catalog;
pub mod chat;
pub mod identity;
pub mod settings;

// Re-exports
pub use catalog::CatalogStore;
pub use chat::ChatStore;
pub use identity::{ADMIN_EMAIL, IdentityStore, NewUser};
pub use settings::SettingsStore;
