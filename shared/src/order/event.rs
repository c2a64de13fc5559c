//! Order events - immutable facts returned by lifecycle transitions
//!
//! The state machine never talks to the notification sink directly: every
//! transition returns the events it produced and a separate dispatcher
//! turns them into notifications. This keeps the state machine unit-testable
//! without any sink wired up.

use super::record::Order;
use super::types::PaymentMethod;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order event record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderEvent {
    /// Event unique ID
    pub event_id: String,
    /// Order this event belongs to
    pub order_id: String,
    /// Owning customer of the order (notification routing needs it)
    pub user_id: String,
    /// Timestamp (Unix milliseconds), stamped at creation
    pub timestamp: i64,
    /// Event type
    pub event_type: OrderEventType,
    /// Event payload
    pub payload: EventPayload,
}

/// Event type enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEventType {
    OrderPlaced,
    QuoteIssued,
    QuoteApproved,
    QuoteDeclined,
    PaymentReported,
    PaymentVerified,
    OrderShipped,
}

impl std::fmt::Display for OrderEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderEventType::OrderPlaced => write!(f, "ORDER_PLACED"),
            OrderEventType::QuoteIssued => write!(f, "QUOTE_ISSUED"),
            OrderEventType::QuoteApproved => write!(f, "QUOTE_APPROVED"),
            OrderEventType::QuoteDeclined => write!(f, "QUOTE_DECLINED"),
            OrderEventType::PaymentReported => write!(f, "PAYMENT_REPORTED"),
            OrderEventType::PaymentVerified => write!(f, "PAYMENT_VERIFIED"),
            OrderEventType::OrderShipped => write!(f, "ORDER_SHIPPED"),
        }
    }
}

/// Event payload variants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventPayload {
    /// Purchase request created with a frozen price snapshot
    OrderPlaced {
        subtotal: Decimal,
        item_count: u32,
    },

    /// Admin attached VAT, delivery fee and delivery estimate
    QuoteIssued {
        vat: Decimal,
        delivery_charge: Decimal,
        delivery_days: u32,
        total: Decimal,
    },

    /// Customer accepted the quote
    QuoteApproved {
        payment_method: PaymentMethod,
    },

    /// Customer declined the quote; the order is cancelled for good
    QuoteDeclined {},

    /// Customer self-reported a digital payment; admin must verify manually
    PaymentReported {
        payment_method: PaymentMethod,
    },

    /// Payment verified - either cash on delivery at approval, or the admin
    /// confirming a reported digital payment
    PaymentVerified {
        total: Decimal,
    },

    OrderShipped {
        #[serde(skip_serializing_if = "Option::is_none")]
        delivery_days: Option<u32>,
    },
}

impl EventPayload {
    /// The event type this payload belongs to
    pub fn event_type(&self) -> OrderEventType {
        match self {
            EventPayload::OrderPlaced { .. } => OrderEventType::OrderPlaced,
            EventPayload::QuoteIssued { .. } => OrderEventType::QuoteIssued,
            EventPayload::QuoteApproved { .. } => OrderEventType::QuoteApproved,
            EventPayload::QuoteDeclined {} => OrderEventType::QuoteDeclined,
            EventPayload::PaymentReported { .. } => OrderEventType::PaymentReported,
            EventPayload::PaymentVerified { .. } => OrderEventType::PaymentVerified,
            EventPayload::OrderShipped { .. } => OrderEventType::OrderShipped,
        }
    }
}

impl OrderEvent {
    /// Record an event against an order, stamping id and timestamp
    pub fn record(order: &Order, payload: EventPayload) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            order_id: order.id.clone(),
            user_id: order.user_id.clone(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            event_type: payload.event_type(),
            payload,
        }
    }
}
