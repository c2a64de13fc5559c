//! DeclineQuote - customer rejects the quote
//!
//! Cancellation is final; nothing resurrects a cancelled order.

use shared::order::{EventPayload, Order, OrderEvent, OrderStatus};

use super::{ActorRequirement, Transition, invalid_state};
use crate::engine::error::EngineResult;

/// DeclineQuote transition: `WaitingApproval -> Cancelled`
#[derive(Debug, Clone)]
pub struct DeclineQuote;

impl Transition for DeclineQuote {
    fn required_actor(&self) -> ActorRequirement {
        ActorRequirement::Owner
    }

    fn apply(&self, order: &Order) -> EngineResult<(Order, Vec<OrderEvent>)> {
        if order.status != OrderStatus::WaitingApproval {
            return Err(invalid_state(order, "decline"));
        }

        let mut updated = order.clone();
        updated.status = OrderStatus::Cancelled;

        let event = OrderEvent::record(&updated, EventPayload::QuoteDeclined {});
        Ok((updated, vec![event]))
    }
}
