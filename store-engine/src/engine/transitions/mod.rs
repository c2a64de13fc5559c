//! Per-transition handlers for the order lifecycle
//!
//! Each transition implements the `Transition` trait and handles one
//! lifecycle edge. Handlers are PURE: they take the order as read, return
//! a replacement plus the events the edge produced, and never touch
//! storage or the notification sink. The engine does the actor, version
//! and persistence work around them.

use enum_dispatch::enum_dispatch;

use crate::engine::error::{EngineError, EngineResult};
use shared::order::{Order, OrderEvent};

mod approve_quote;
mod choose_payment_method;
mod confirm_payment;
mod decline_quote;
mod issue_quote;
mod mark_shipped;
mod report_payment;

pub use approve_quote::ApproveQuote;
pub use choose_payment_method::ChoosePaymentMethod;
pub use confirm_payment::ConfirmPayment;
pub use decline_quote::DeclineQuote;
pub use issue_quote::IssueQuote;
pub use mark_shipped::MarkShipped;
pub use report_payment::ReportPayment;

/// Which side of the counter may run a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorRequirement {
    /// Admin role required
    Admin,
    /// The order's owning customer only
    Owner,
}

/// A lifecycle transition
#[enum_dispatch]
pub trait Transition {
    /// Who may run this transition
    fn required_actor(&self) -> ActorRequirement;

    /// Apply to the order as read; returns the replacement order and the
    /// events produced. Must leave `order` untouched on failure.
    fn apply(&self, order: &Order) -> EngineResult<(Order, Vec<OrderEvent>)>;
}

/// OrderAction enum - dispatches to concrete transition implementations
#[enum_dispatch(Transition)]
pub enum OrderAction {
    IssueQuote(IssueQuote),
    ApproveQuote(ApproveQuote),
    DeclineQuote(DeclineQuote),
    ReportPayment(ReportPayment),
    ConfirmPayment(ConfirmPayment),
    MarkShipped(MarkShipped),
    ChoosePaymentMethod(ChoosePaymentMethod),
}

/// Uniform rejection for a transition attempted from the wrong state
pub(crate) fn invalid_state(order: &Order, action: &str) -> EngineError {
    EngineError::InvalidState(format!(
        "cannot {} order {} in {:?} status",
        action, order.id, order.status
    ))
}
