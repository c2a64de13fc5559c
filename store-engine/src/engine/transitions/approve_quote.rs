//! ApproveQuote - customer accepts the quoted price
//!
//! Cash on delivery settles immediately: the order goes straight to
//! `Paid`. A digital method parks the order in `AwaitingPayment` until the
//! customer reports the transfer to the merchant number.

use shared::order::{EventPayload, Order, OrderEvent, OrderStatus};

use super::{ActorRequirement, Transition, invalid_state};
use crate::engine::error::EngineResult;

/// ApproveQuote transition:
/// `WaitingApproval -> Paid` (cash) or `WaitingApproval -> AwaitingPayment`
#[derive(Debug, Clone)]
pub struct ApproveQuote;

impl Transition for ApproveQuote {
    fn required_actor(&self) -> ActorRequirement {
        ActorRequirement::Owner
    }

    fn apply(&self, order: &Order) -> EngineResult<(Order, Vec<OrderEvent>)> {
        if order.status != OrderStatus::WaitingApproval {
            return Err(invalid_state(order, "approve"));
        }

        let mut updated = order.clone();
        let mut events = vec![OrderEvent::record(
            &updated,
            EventPayload::QuoteApproved {
                payment_method: updated.payment_method,
            },
        )];

        if updated.payment_method.is_digital() {
            updated.status = OrderStatus::AwaitingPayment;
        } else {
            updated.status = OrderStatus::Paid;
            events.push(OrderEvent::record(
                &updated,
                EventPayload::PaymentVerified {
                    total: updated.total,
                },
            ));
        }
        Ok((updated, events))
    }
}
