//! Record types surrounding the order engine
//!
//! One record per file, following the catalog/back-office split of the
//! storefront: products, users, chat threads, notifications and the
//! payment settings singleton.

pub mod chat;
pub mod notification;
pub mod product;
pub mod settings;
pub mod user;

// Re-exports
pub use chat::{ChatMessage, ChatSender};
pub use notification::{ADMIN_SENTINEL, Notification, Recipient, Severity};
pub use product::{Category, Product};
pub use settings::PaymentSettings;
pub use user::{Role, User};
