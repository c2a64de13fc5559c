//! Shared types for the order lifecycle

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Order Status
// ============================================================================

/// Order lifecycle status
///
/// `WaitingApproval` is deliberately reused for both waiting conditions:
/// waiting on the customer's quote disposition and waiting on the admin's
/// payment-receipt verification after `ReportPayment`. The event stream
/// (`QUOTE_ISSUED` vs `PAYMENT_REPORTED`) distinguishes the two.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Purchase request placed, no quote attached yet
    #[default]
    Pending,
    /// Quoted; waiting on a customer or admin disposition
    WaitingApproval,
    /// Quote approved with a digital method; customer still has to pay
    AwaitingPayment,
    /// Payment verified
    Paid,
    /// Shipped (terminal)
    Shipped,
    /// Declined by the customer (terminal)
    Cancelled,
}

impl OrderStatus {
    /// Terminal states accept no further transitions
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Shipped | OrderStatus::Cancelled)
    }
}

// ============================================================================
// Delivery / Payment Methods
// ============================================================================

/// Delivery tier chosen by the customer at order creation, immutable after
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum DeliveryMethod {
    #[default]
    Standard,
    Premium,
}

/// Settlement channel
///
/// Wire spellings match the storefront's stored records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[serde(rename = "bKash")]
    Bkash,
    #[serde(rename = "Nagad")]
    Nagad,
    #[default]
    #[serde(rename = "Cash on Delivery")]
    CashOnDelivery,
}

impl PaymentMethod {
    /// Digital methods settle against a merchant number and need manual
    /// verification; cash settles on delivery
    pub fn is_digital(self) -> bool {
        matches!(self, PaymentMethod::Bkash | PaymentMethod::Nagad)
    }
}

// ============================================================================
// Line Items
// ============================================================================

/// Order line item - a frozen snapshot of catalog data at creation time
///
/// Later catalog price changes never retroactively alter existing orders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Product ID
    pub product_id: String,
    /// Product name snapshot
    pub name: String,
    /// Quantity (always >= 1)
    pub quantity: u32,
    /// Unit price snapshot taken from the catalog at creation
    pub unit_price: Decimal,
    /// Selected color variant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
}

impl OrderItem {
    /// Line total (`quantity x unit_price`)
    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}
