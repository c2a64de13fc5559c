//! ConfirmPayment - admin verifies a reported payment

use shared::order::{EventPayload, Order, OrderEvent, OrderStatus};

use super::{ActorRequirement, Transition, invalid_state};
use crate::engine::error::EngineResult;

/// ConfirmPayment transition: `WaitingApproval -> Paid`
#[derive(Debug, Clone)]
pub struct ConfirmPayment;

impl Transition for ConfirmPayment {
    fn required_actor(&self) -> ActorRequirement {
        ActorRequirement::Admin
    }

    fn apply(&self, order: &Order) -> EngineResult<(Order, Vec<OrderEvent>)> {
        if order.status != OrderStatus::WaitingApproval {
            return Err(invalid_state(order, "confirm payment for"));
        }

        let mut updated = order.clone();
        updated.status = OrderStatus::Paid;

        let event = OrderEvent::record(
            &updated,
            EventPayload::PaymentVerified {
                total: updated.total,
            },
        );
        Ok((updated, vec![event]))
    }
}
