//! The `Order` entity - owned and mutated exclusively by the order engine

use super::types::{DeliveryMethod, OrderItem, OrderStatus, PaymentMethod};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order record
///
/// Financial invariant: once `status` leaves `Pending`,
/// `total == subtotal + vat + delivery_charge` holds exactly. While
/// `Pending` the total is zero and means "not yet known" - consumers must
/// render a placeholder, never `$0`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Order ID (opaque, assigned at creation, immutable)
    pub id: String,
    /// Owning customer (immutable)
    pub user_id: String,
    /// Monotonic version counter; transitions supply the version they read
    /// and fail on mismatch
    pub version: u64,
    /// Line items - non-empty snapshot of catalog data at creation time
    pub items: Vec<OrderItem>,
    /// Sum of line totals, computed once at creation and frozen
    pub subtotal: Decimal,
    /// VAT amount, zero until a quote is issued
    pub vat: Decimal,
    /// Delivery fee, zero until a quote is issued
    pub delivery_charge: Decimal,
    /// Exact sum of subtotal, vat and delivery charge once quoted
    pub total: Decimal,
    /// Lifecycle status
    pub status: OrderStatus,
    /// Delivery tier chosen at creation (immutable)
    pub delivery_method: DeliveryMethod,
    /// Customer-visible delivery estimate, set by the quoting transition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_days: Option<u32>,
    /// Settlement channel; may be switched while a quote is open
    pub payment_method: PaymentMethod,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,
    /// Last mutation timestamp, non-decreasing
    pub updated_at: i64,
}

impl Order {
    /// Whether the order accepts no further transitions
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Bump `updated_at`, keeping it monotonically non-decreasing
    pub fn touch(&mut self, now: i64) {
        self.updated_at = self.updated_at.max(now);
    }

    /// Check the financial invariant for quoted orders
    ///
    /// Vacuously true while `Pending` - the total carries no meaning yet.
    pub fn totals_consistent(&self) -> bool {
        self.status == OrderStatus::Pending
            || self.total == self.subtotal + self.vat + self.delivery_charge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order() -> Order {
        Order {
            id: "o-1".to_string(),
            user_id: "u-1".to_string(),
            version: 1,
            items: vec![OrderItem {
                product_id: "p-1".to_string(),
                name: "Classic Gold Chrono".to_string(),
                quantity: 2,
                unit_price: Decimal::from(100),
                selected_color: None,
            }],
            subtotal: Decimal::from(200),
            vat: Decimal::ZERO,
            delivery_charge: Decimal::ZERO,
            total: Decimal::ZERO,
            status: OrderStatus::Pending,
            delivery_method: DeliveryMethod::Standard,
            delivery_days: None,
            payment_method: PaymentMethod::CashOnDelivery,
            created_at: 1_700_000_000_000,
            updated_at: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_touch_is_monotonic() {
        let mut order = sample_order();
        order.touch(1_700_000_001_000);
        assert_eq!(order.updated_at, 1_700_000_001_000);
        // a clock going backwards never rewinds the record
        order.touch(1_600_000_000_000);
        assert_eq!(order.updated_at, 1_700_000_001_000);
    }

    #[test]
    fn test_totals_consistent() {
        let mut order = sample_order();
        // vacuous while pending
        assert!(order.totals_consistent());

        order.status = OrderStatus::WaitingApproval;
        order.vat = Decimal::from(10);
        order.delivery_charge = Decimal::from(20);
        order.total = Decimal::from(230);
        assert!(order.totals_consistent());

        order.total = Decimal::from(231);
        assert!(!order.totals_consistent());
    }
}
