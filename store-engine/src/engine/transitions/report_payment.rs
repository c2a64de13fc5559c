//! ReportPayment - customer self-reports a digital transfer
//!
//! Explicit loop-back into `WaitingApproval`: the order re-enters the
//! admin queue for manual verification of the reported payment. Same
//! state value as the quote-disposition wait by design; the event stream
//! tells the two apart.

use shared::order::{EventPayload, Order, OrderEvent, OrderStatus};

use super::{ActorRequirement, Transition, invalid_state};
use crate::engine::error::EngineResult;

/// ReportPayment transition: `AwaitingPayment -> WaitingApproval`
#[derive(Debug, Clone)]
pub struct ReportPayment;

impl Transition for ReportPayment {
    fn required_actor(&self) -> ActorRequirement {
        ActorRequirement::Owner
    }

    fn apply(&self, order: &Order) -> EngineResult<(Order, Vec<OrderEvent>)> {
        if order.status != OrderStatus::AwaitingPayment {
            return Err(invalid_state(order, "report payment for"));
        }

        let mut updated = order.clone();
        updated.status = OrderStatus::WaitingApproval;

        let event = OrderEvent::record(
            &updated,
            EventPayload::PaymentReported {
                payment_method: updated.payment_method,
            },
        );
        Ok((updated, vec![event]))
    }
}
