//! MarkShipped - admin hands the paid order to the carrier

use shared::order::{EventPayload, Order, OrderEvent, OrderStatus};

use super::{ActorRequirement, Transition, invalid_state};
use crate::engine::error::EngineResult;

/// MarkShipped transition: `Paid -> Shipped` (terminal)
#[derive(Debug, Clone)]
pub struct MarkShipped;

impl Transition for MarkShipped {
    fn required_actor(&self) -> ActorRequirement {
        ActorRequirement::Admin
    }

    fn apply(&self, order: &Order) -> EngineResult<(Order, Vec<OrderEvent>)> {
        if order.status != OrderStatus::Paid {
            return Err(invalid_state(order, "ship"));
        }

        let mut updated = order.clone();
        updated.status = OrderStatus::Shipped;

        let event = OrderEvent::record(
            &updated,
            EventPayload::OrderShipped {
                delivery_days: updated.delivery_days,
            },
        );
        Ok((updated, vec![event]))
    }
}
