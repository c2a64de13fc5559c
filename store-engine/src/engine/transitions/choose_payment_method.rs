//! ChoosePaymentMethod - customer switches settlement channel
//!
//! Only meaningful while the quote is open; approval then routes on the
//! method chosen last. Produces no event - nothing downstream cares until
//! the approval itself.

use shared::order::{Order, OrderEvent, OrderStatus, PaymentMethod};

use super::{ActorRequirement, Transition, invalid_state};
use crate::engine::error::EngineResult;

/// ChoosePaymentMethod: `WaitingApproval -> WaitingApproval`
#[derive(Debug, Clone)]
pub struct ChoosePaymentMethod {
    pub method: PaymentMethod,
}

impl Transition for ChoosePaymentMethod {
    fn required_actor(&self) -> ActorRequirement {
        ActorRequirement::Owner
    }

    fn apply(&self, order: &Order) -> EngineResult<(Order, Vec<OrderEvent>)> {
        if order.status != OrderStatus::WaitingApproval {
            return Err(invalid_state(order, "change payment method for"));
        }

        let mut updated = order.clone();
        updated.payment_method = self.method;
        Ok((updated, vec![]))
    }
}
