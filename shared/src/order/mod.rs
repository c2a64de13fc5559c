//! Order Lifecycle Module
//!
//! This module provides the types for the order lifecycle:
//! - Types: status, line items, delivery and payment methods
//! - Record: the `Order` entity owned by the engine
//! - Events: immutable facts returned by each lifecycle transition

pub mod event;
pub mod record;
pub mod types;

// Re-exports
pub use event::{EventPayload, OrderEvent, OrderEventType};
pub use record::Order;
pub use types::{DeliveryMethod, OrderItem, OrderStatus, PaymentMethod};
