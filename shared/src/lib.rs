//! Shared types for the Aurax store core
//!
//! Pure data model crate: order entities and lifecycle events, plus the
//! surrounding records (products, users, chat, notifications, payment
//! settings). No I/O lives here; everything is serde-serializable so the
//! engine crate can persist whole collections as JSON blobs.

pub mod models;
pub mod order;

// Re-exports
pub use models::{
    Category, ChatMessage, ChatSender, Notification, PaymentSettings, Product, Recipient, Role,
    Severity, User,
};
pub use order::{
    DeliveryMethod, EventPayload, Order, OrderEvent, OrderEventType, OrderItem, OrderStatus,
    PaymentMethod,
};
