//! OrderEngine - owns the order collection and enforces the state machine
//!
//! # Operation Flow
//!
//! ```text
//! operation(actor, order_id, version, inputs)
//!     ├─ 1. Look up the order (NotFound)
//!     ├─ 2. Version check (Conflict)
//!     ├─ 3. Actor check: role or ownership (Forbidden)
//!     ├─ 4. Transition handler: state + amount validation, pure apply
//!     ├─ 5. Bump version / updated_at, replace in collection
//!     ├─ 6. Persist the collection
//!     └─ 7. Return (order, events) - caller dispatches notifications
//! ```
//!
//! A failure at any step leaves the collection bit-for-bit unchanged and
//! produces no events. The engine never emits notifications itself.

pub mod error;
pub mod transitions;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use rust_decimal::Decimal;
use shared::models::Role;
use shared::order::{
    DeliveryMethod, EventPayload, Order, OrderEvent, OrderItem, OrderStatus, PaymentMethod,
};

use crate::money;
use crate::storage::{self, DurableStore, keys};
use error::{EngineError, EngineResult};
use transitions::{
    ActorRequirement, ApproveQuote, ChoosePaymentMethod, ConfirmPayment, DeclineQuote, IssueQuote,
    MarkShipped, OrderAction, ReportPayment, Transition,
};

// ============================================================================
// Actor / Request Types
// ============================================================================

/// The acting identity, passed into every operation
///
/// Role authorization is an explicit precondition inside the engine, not a
/// convention of the surrounding application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: String,
    pub role: Role,
}

impl Actor {
    pub fn customer(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role: Role::User,
        }
    }

    pub fn admin(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role: Role::Admin,
        }
    }

    /// The acting identity of a signed-in account
    pub fn for_user(user: &shared::models::User) -> Self {
        Self {
            user_id: user.id.clone(),
            role: user.role,
        }
    }
}

/// One requested line of a purchase request
#[derive(Debug, Clone)]
pub struct LineRequest {
    pub product_id: String,
    pub quantity: u32,
    pub selected_color: Option<String>,
}

/// Purchase request - priced against the catalog at creation time
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub items: Vec<LineRequest>,
    pub delivery_method: DeliveryMethod,
    pub payment_method: PaymentMethod,
}

/// Name and unit price of a catalog product, as priced right now
#[derive(Debug, Clone)]
pub struct PricedProduct {
    pub name: String,
    pub unit_price: Decimal,
}

/// Catalog seam the engine prices line items through
///
/// Consulted exactly once per line, at `place_order` time; the result is
/// frozen into the order and later catalog changes never reach it.
pub trait PriceSource {
    fn price_of(&self, product_id: &str) -> Option<PricedProduct>;
}

// ============================================================================
// OrderEngine
// ============================================================================

/// The order lifecycle engine
pub struct OrderEngine {
    store: Arc<dyn DurableStore>,
    orders: Vec<Order>,
}

impl std::fmt::Debug for OrderEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderEngine")
            .field("orders", &self.orders.len())
            .finish()
    }
}

impl OrderEngine {
    /// Load the engine from the durable store
    pub fn load(store: Arc<dyn DurableStore>) -> EngineResult<Self> {
        let orders: Vec<Order> =
            storage::load_collection(store.as_ref(), keys::ORDERS)?.unwrap_or_default();
        tracing::debug!(orders = orders.len(), "order engine loaded");
        Ok(Self { store, orders })
    }

    // ========== Queries ==========

    /// Look up a single order
    pub fn order(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    /// All orders, oldest first
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Orders owned by one customer, oldest first
    pub fn orders_for(&self, user_id: &str) -> Vec<&Order> {
        self.orders.iter().filter(|o| o.user_id == user_id).collect()
    }

    // ========== Creation ==========

    /// Create a purchase request in `Pending` with a frozen price snapshot
    ///
    /// Fails `InvalidOrder` on an empty cart, a zero quantity or an unknown
    /// product - and creates no record in that case.
    pub fn place_order(
        &mut self,
        actor: &Actor,
        request: OrderRequest,
        catalog: &dyn PriceSource,
    ) -> EngineResult<(Order, Vec<OrderEvent>)> {
        if request.items.is_empty() {
            return Err(EngineError::InvalidOrder(
                "an order needs at least one item".to_string(),
            ));
        }

        let mut items = Vec::with_capacity(request.items.len());
        for line in &request.items {
            let priced = catalog.price_of(&line.product_id).ok_or_else(|| {
                EngineError::InvalidOrder(format!("unknown product: {}", line.product_id))
            })?;
            items.push(OrderItem {
                product_id: line.product_id.clone(),
                name: priced.name,
                quantity: line.quantity,
                unit_price: priced.unit_price,
                selected_color: line.selected_color.clone(),
            });
        }
        money::validate_items(&items)?;

        let now = chrono::Utc::now().timestamp_millis();
        let subtotal = money::subtotal(&items);
        let item_count = items.iter().map(|i| i.quantity).sum();
        let order = Order {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: actor.user_id.clone(),
            version: 1,
            items,
            subtotal,
            vat: Decimal::ZERO,
            delivery_charge: Decimal::ZERO,
            total: Decimal::ZERO,
            status: OrderStatus::Pending,
            delivery_method: request.delivery_method,
            delivery_days: None,
            payment_method: request.payment_method,
            created_at: now,
            updated_at: now,
        };

        let events = vec![OrderEvent::record(
            &order,
            EventPayload::OrderPlaced {
                subtotal,
                item_count,
            },
        )];

        self.orders.push(order.clone());
        if let Err(e) = self.persist() {
            self.orders.pop();
            return Err(e);
        }

        tracing::info!(order_id = %order.id, user_id = %order.user_id, %subtotal, "order placed");
        Ok((order, events))
    }

    // ========== Transitions ==========

    /// Admin attaches a quote: `Pending -> WaitingApproval`
    pub fn issue_quote(
        &mut self,
        actor: &Actor,
        order_id: &str,
        version: u64,
        vat: Decimal,
        delivery_charge: Decimal,
        delivery_days: u32,
    ) -> EngineResult<(Order, Vec<OrderEvent>)> {
        self.execute(
            actor,
            order_id,
            version,
            OrderAction::IssueQuote(IssueQuote {
                vat,
                delivery_charge,
                delivery_days,
            }),
        )
    }

    /// Customer accepts the quote: `WaitingApproval -> Paid | AwaitingPayment`
    pub fn approve_quote(
        &mut self,
        actor: &Actor,
        order_id: &str,
        version: u64,
    ) -> EngineResult<(Order, Vec<OrderEvent>)> {
        self.execute(actor, order_id, version, OrderAction::ApproveQuote(ApproveQuote))
    }

    /// Customer rejects the quote: `WaitingApproval -> Cancelled`
    pub fn decline_quote(
        &mut self,
        actor: &Actor,
        order_id: &str,
        version: u64,
    ) -> EngineResult<(Order, Vec<OrderEvent>)> {
        self.execute(actor, order_id, version, OrderAction::DeclineQuote(DeclineQuote))
    }

    /// Customer self-reports a digital transfer:
    /// `AwaitingPayment -> WaitingApproval`
    pub fn report_payment(
        &mut self,
        actor: &Actor,
        order_id: &str,
        version: u64,
    ) -> EngineResult<(Order, Vec<OrderEvent>)> {
        self.execute(actor, order_id, version, OrderAction::ReportPayment(ReportPayment))
    }

    /// Admin verifies a reported payment: `WaitingApproval -> Paid`
    pub fn confirm_payment(
        &mut self,
        actor: &Actor,
        order_id: &str,
        version: u64,
    ) -> EngineResult<(Order, Vec<OrderEvent>)> {
        self.execute(actor, order_id, version, OrderAction::ConfirmPayment(ConfirmPayment))
    }

    /// Admin ships the paid order: `Paid -> Shipped`
    pub fn mark_shipped(
        &mut self,
        actor: &Actor,
        order_id: &str,
        version: u64,
    ) -> EngineResult<(Order, Vec<OrderEvent>)> {
        self.execute(actor, order_id, version, OrderAction::MarkShipped(MarkShipped))
    }

    /// Customer switches settlement channel while the quote is open
    pub fn choose_payment_method(
        &mut self,
        actor: &Actor,
        order_id: &str,
        version: u64,
        method: PaymentMethod,
    ) -> EngineResult<(Order, Vec<OrderEvent>)> {
        self.execute(
            actor,
            order_id,
            version,
            OrderAction::ChoosePaymentMethod(ChoosePaymentMethod { method }),
        )
    }

    // ========== Pipeline ==========

    /// Common transition pipeline: lookup, version check, actor check,
    /// apply, replace, persist
    fn execute(
        &mut self,
        actor: &Actor,
        order_id: &str,
        version: u64,
        action: OrderAction,
    ) -> EngineResult<(Order, Vec<OrderEvent>)> {
        let idx = self
            .orders
            .iter()
            .position(|o| o.id == order_id)
            .ok_or_else(|| EngineError::NotFound(order_id.to_string()))?;

        let order = &self.orders[idx];
        if order.version != version {
            return Err(EngineError::Conflict(format!(
                "order {} changed since it was read: expected version {}, found {}",
                order_id, version, order.version
            )));
        }

        match action.required_actor() {
            ActorRequirement::Admin => {
                if actor.role != Role::Admin {
                    return Err(EngineError::Forbidden(format!(
                        "operation on order {} requires the admin role",
                        order_id
                    )));
                }
            }
            ActorRequirement::Owner => {
                if actor.user_id != order.user_id {
                    return Err(EngineError::Forbidden(format!(
                        "order {} belongs to another customer",
                        order_id
                    )));
                }
            }
        }

        let (mut updated, events) = action.apply(order)?;
        updated.touch(chrono::Utc::now().timestamp_millis());
        updated.version += 1;

        let previous = std::mem::replace(&mut self.orders[idx], updated.clone());
        if let Err(e) = self.persist() {
            self.orders[idx] = previous;
            return Err(e);
        }

        tracing::info!(
            order_id = %updated.id,
            status = ?updated.status,
            version = updated.version,
            events = events.len(),
            "order transition applied"
        );
        Ok((updated, events))
    }

    fn persist(&self) -> EngineResult<()> {
        storage::persist_collection(self.store.as_ref(), keys::ORDERS, &self.orders)?;
        Ok(())
    }
}
