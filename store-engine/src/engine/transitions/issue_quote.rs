//! IssueQuote - admin attaches VAT, delivery fee and delivery estimate
//!
//! Converts an unpriced request into a priced one. The amounts arrive
//! admin-supplied (typically pre-seeded from the settings hints, both
//! overridable); the total is recomputed here as the exact sum and never
//! independently entered.

use rust_decimal::Decimal;
use shared::order::{EventPayload, Order, OrderEvent, OrderStatus};

use super::{ActorRequirement, Transition, invalid_state};
use crate::engine::error::EngineResult;
use crate::money;

/// IssueQuote transition: `Pending -> WaitingApproval`
#[derive(Debug, Clone)]
pub struct IssueQuote {
    pub vat: Decimal,
    pub delivery_charge: Decimal,
    pub delivery_days: u32,
}

impl Transition for IssueQuote {
    fn required_actor(&self) -> ActorRequirement {
        ActorRequirement::Admin
    }

    fn apply(&self, order: &Order) -> EngineResult<(Order, Vec<OrderEvent>)> {
        if order.status != OrderStatus::Pending {
            return Err(invalid_state(order, "quote"));
        }
        money::validate_quote(self.vat, self.delivery_charge, self.delivery_days)?;

        let mut updated = order.clone();
        updated.vat = money::round_money(self.vat);
        updated.delivery_charge = money::round_money(self.delivery_charge);
        updated.delivery_days = Some(self.delivery_days);
        updated.total = money::order_total(updated.subtotal, updated.vat, updated.delivery_charge);
        updated.status = OrderStatus::WaitingApproval;

        let event = OrderEvent::record(
            &updated,
            EventPayload::QuoteIssued {
                vat: updated.vat,
                delivery_charge: updated.delivery_charge,
                delivery_days: self.delivery_days,
                total: updated.total,
            },
        );
        Ok((updated, vec![event]))
    }
}
