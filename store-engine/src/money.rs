//! Money calculation using rust_decimal for precision
//!
//! All monetary amounts are `Decimal`, rounded to 2 decimal places with
//! midpoint-away-from-zero. The quote pre-fill hints computed here are
//! exactly that - hints for the admin dialog; the admin-supplied amounts
//! are authoritative and only re-validated, never recomputed.

use crate::engine::error::{EngineError, EngineResult};
use rust_decimal::prelude::*;
use shared::models::PaymentSettings;
use shared::order::{DeliveryMethod, Order, OrderItem};

/// Rounding: 2 decimal places, half away from zero
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed unit price per item
const MAX_PRICE: i64 = 1_000_000;
/// Maximum allowed quantity per line
const MAX_QUANTITY: u32 = 9999;

/// Round a monetary value to currency-minor-unit precision
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Subtotal: sum of `quantity x unit_price` over the line items
pub fn subtotal(items: &[OrderItem]) -> Decimal {
    round_money(items.iter().map(OrderItem::line_total).sum())
}

/// Exact order total - never independently entered
pub fn order_total(subtotal: Decimal, vat: Decimal, delivery_charge: Decimal) -> Decimal {
    subtotal + vat + delivery_charge
}

/// Suggested VAT pre-fill: `round(subtotal x vat% / 100)`
pub fn suggested_vat(subtotal: Decimal, settings: &PaymentSettings) -> Decimal {
    round_money(subtotal * settings.vat_percentage / Decimal::ONE_HUNDRED)
}

/// Suggested delivery-fee pre-fill, by the order's delivery method
pub fn suggested_delivery_fee(method: DeliveryMethod, settings: &PaymentSettings) -> Decimal {
    match method {
        DeliveryMethod::Standard => settings.standard_delivery_fee,
        DeliveryMethod::Premium => settings.premium_delivery_fee,
    }
}

/// Pre-fill hints for the admin quote dialog
#[derive(Debug, Clone, PartialEq)]
pub struct QuotePrefill {
    pub vat: Decimal,
    pub delivery_charge: Decimal,
}

/// Compute both pre-fill hints from a point-in-time settings snapshot
pub fn quote_prefill(order: &Order, settings: &PaymentSettings) -> QuotePrefill {
    QuotePrefill {
        vat: suggested_vat(order.subtotal, settings),
        delivery_charge: suggested_delivery_fee(order.delivery_method, settings),
    }
}

/// Validate line items of a creation request
pub fn validate_items(items: &[OrderItem]) -> EngineResult<()> {
    if items.is_empty() {
        return Err(EngineError::InvalidOrder(
            "an order needs at least one item".to_string(),
        ));
    }
    for item in items {
        if item.quantity < 1 {
            return Err(EngineError::InvalidOrder(format!(
                "quantity must be at least 1 for product {}",
                item.product_id
            )));
        }
        if item.quantity > MAX_QUANTITY {
            return Err(EngineError::InvalidOrder(format!(
                "quantity exceeds maximum allowed ({}), got {}",
                MAX_QUANTITY, item.quantity
            )));
        }
        if item.unit_price < Decimal::ZERO {
            return Err(EngineError::InvalidOrder(format!(
                "unit price must be non-negative, got {}",
                item.unit_price
            )));
        }
        if item.unit_price > Decimal::from(MAX_PRICE) {
            return Err(EngineError::InvalidOrder(format!(
                "unit price exceeds maximum allowed ({}), got {}",
                MAX_PRICE, item.unit_price
            )));
        }
    }
    Ok(())
}

/// Validate admin-supplied quote amounts
pub fn validate_quote(vat: Decimal, delivery_charge: Decimal, delivery_days: u32) -> EngineResult<()> {
    if vat < Decimal::ZERO {
        return Err(EngineError::InvalidAmount(format!(
            "vat must be non-negative, got {}",
            vat
        )));
    }
    if delivery_charge < Decimal::ZERO {
        return Err(EngineError::InvalidAmount(format!(
            "delivery charge must be non-negative, got {}",
            delivery_charge
        )));
    }
    if delivery_days < 1 {
        return Err(EngineError::InvalidAmount(
            "delivery days must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Validate the payment settings singleton before saving
pub fn validate_settings(settings: &PaymentSettings) -> EngineResult<()> {
    if settings.vat_percentage < Decimal::ZERO || settings.vat_percentage > Decimal::ONE_HUNDRED {
        return Err(EngineError::InvalidAmount(format!(
            "vat percentage must be between 0 and 100, got {}",
            settings.vat_percentage
        )));
    }
    if settings.standard_delivery_fee < Decimal::ZERO
        || settings.premium_delivery_fee < Decimal::ZERO
    {
        return Err(EngineError::InvalidAmount(
            "delivery fees must be non-negative".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: i64, quantity: u32) -> OrderItem {
        OrderItem {
            product_id: "p-1".to_string(),
            name: "Test".to_string(),
            quantity,
            unit_price: Decimal::from(price),
            selected_color: None,
        }
    }

    #[test]
    fn test_subtotal_sums_line_totals() {
        let items = vec![item(100, 2), item(450, 1)];
        assert_eq!(subtotal(&items), Decimal::from(650));
    }

    #[test]
    fn test_round_money_half_away_from_zero() {
        assert_eq!(round_money(Decimal::new(12345, 3)), Decimal::new(1235, 2)); // 12.345 -> 12.35
        assert_eq!(round_money(Decimal::new(-12345, 3)), Decimal::new(-1235, 2));
    }

    #[test]
    fn test_suggested_vat_uses_percentage() {
        let settings = PaymentSettings::default(); // 5%
        assert_eq!(
            suggested_vat(Decimal::from(200), &settings),
            Decimal::from(10)
        );
    }

    #[test]
    fn test_suggested_delivery_fee_by_method() {
        let settings = PaymentSettings::default();
        assert_eq!(
            suggested_delivery_fee(DeliveryMethod::Standard, &settings),
            Decimal::from(60)
        );
        assert_eq!(
            suggested_delivery_fee(DeliveryMethod::Premium, &settings),
            Decimal::from(120)
        );
    }

    #[test]
    fn test_validate_items_rejects_empty_and_zero_quantity() {
        assert!(matches!(
            validate_items(&[]),
            Err(EngineError::InvalidOrder(_))
        ));
        assert!(matches!(
            validate_items(&[item(100, 0)]),
            Err(EngineError::InvalidOrder(_))
        ));
        assert!(validate_items(&[item(100, 1)]).is_ok());
    }

    #[test]
    fn test_validate_quote_domains() {
        assert!(validate_quote(Decimal::from(10), Decimal::from(20), 3).is_ok());
        assert!(validate_quote(Decimal::ZERO, Decimal::ZERO, 1).is_ok());
        assert!(matches!(
            validate_quote(Decimal::from(-1), Decimal::ZERO, 1),
            Err(EngineError::InvalidAmount(_))
        ));
        assert!(matches!(
            validate_quote(Decimal::ZERO, Decimal::from(-1), 1),
            Err(EngineError::InvalidAmount(_))
        ));
        assert!(matches!(
            validate_quote(Decimal::ZERO, Decimal::ZERO, 0),
            Err(EngineError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_validate_settings_bounds() {
        let mut settings = PaymentSettings::default();
        assert!(validate_settings(&settings).is_ok());

        settings.vat_percentage = Decimal::from(101);
        assert!(matches!(
            validate_settings(&settings),
            Err(EngineError::InvalidAmount(_))
        ));

        settings.vat_percentage = Decimal::from(5);
        settings.standard_delivery_fee = Decimal::from(-1);
        assert!(matches!(
            validate_settings(&settings),
            Err(EngineError::InvalidAmount(_))
        ));
    }
}
