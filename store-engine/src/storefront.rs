//! Storefront facade
//!
//! Owns every store and wires the engine to the notification policy: each
//! lifecycle operation runs the engine, then feeds the returned events
//! through the dispatcher. Nothing below this layer emits notifications,
//! so callers that bypass the facade get state changes without alerts.

use std::sync::Arc;

use rust_decimal::Decimal;
use shared::models::{
    ChatMessage, ChatSender, Notification, PaymentSettings, Product, Recipient, Role, User,
};
use shared::order::{Order, OrderEvent, PaymentMethod};

use crate::engine::error::{EngineError, EngineResult};
use crate::engine::{Actor, OrderEngine, OrderRequest};
use crate::money::{self, QuotePrefill};
use crate::notifier::{self, NotificationCenter};
use crate::storage::DurableStore;
use crate::stores::{CatalogStore, ChatStore, IdentityStore, NewUser, SettingsStore};

/// The storefront: every operation of the system, behind one facade
pub struct Storefront {
    engine: OrderEngine,
    catalog: CatalogStore,
    settings: SettingsStore,
    identity: IdentityStore,
    chat: ChatStore,
    notifications: NotificationCenter,
}

impl Storefront {
    /// Open the storefront over a durable store, loading every collection
    pub fn open(store: Arc<dyn DurableStore>) -> EngineResult<Self> {
        Ok(Self {
            engine: OrderEngine::load(store.clone())?,
            catalog: CatalogStore::load(store.clone())?,
            settings: SettingsStore::load(store.clone())?,
            identity: IdentityStore::load(store.clone())?,
            chat: ChatStore::load(store.clone())?,
            notifications: NotificationCenter::load(store)?,
        })
    }

    // ========== Order Lifecycle ==========

    /// Place an order and notify the admin
    pub fn place_order(
        &mut self,
        actor: &Actor,
        request: OrderRequest,
    ) -> EngineResult<Order> {
        let (order, events) = self.engine.place_order(actor, request, &self.catalog)?;
        self.notifications.dispatch(&events)?;
        Ok(order)
    }

    /// Issue a quote and notify the customer
    #[allow(clippy::too_many_arguments)]
    pub fn issue_quote(
        &mut self,
        actor: &Actor,
        order_id: &str,
        version: u64,
        vat: Decimal,
        delivery_charge: Decimal,
        delivery_days: u32,
    ) -> EngineResult<Order> {
        let (order, events) =
            self.engine
                .issue_quote(actor, order_id, version, vat, delivery_charge, delivery_days)?;
        self.notifications.dispatch(&events)?;
        Ok(order)
    }

    /// Accept the quote; a cash order settles immediately
    pub fn approve_quote(
        &mut self,
        actor: &Actor,
        order_id: &str,
        version: u64,
    ) -> EngineResult<Order> {
        self.run(|engine| engine.approve_quote(actor, order_id, version))
    }

    /// Reject the quote, cancelling the order
    pub fn decline_quote(
        &mut self,
        actor: &Actor,
        order_id: &str,
        version: u64,
    ) -> EngineResult<Order> {
        self.run(|engine| engine.decline_quote(actor, order_id, version))
    }

    /// Customer reports a digital transfer; the admin gets a verification
    /// warning
    pub fn report_payment(
        &mut self,
        actor: &Actor,
        order_id: &str,
        version: u64,
    ) -> EngineResult<Order> {
        self.run(|engine| engine.report_payment(actor, order_id, version))
    }

    /// Admin verifies a reported payment; both parties are notified
    pub fn confirm_payment(
        &mut self,
        actor: &Actor,
        order_id: &str,
        version: u64,
    ) -> EngineResult<Order> {
        self.run(|engine| engine.confirm_payment(actor, order_id, version))
    }

    /// Ship a paid order and notify the customer
    pub fn mark_shipped(
        &mut self,
        actor: &Actor,
        order_id: &str,
        version: u64,
    ) -> EngineResult<Order> {
        self.run(|engine| engine.mark_shipped(actor, order_id, version))
    }

    /// Switch the settlement channel while the quote is open
    pub fn choose_payment_method(
        &mut self,
        actor: &Actor,
        order_id: &str,
        version: u64,
        method: PaymentMethod,
    ) -> EngineResult<Order> {
        self.run(|engine| engine.choose_payment_method(actor, order_id, version, method))
    }

    fn run(
        &mut self,
        op: impl FnOnce(&mut OrderEngine) -> EngineResult<(Order, Vec<OrderEvent>)>,
    ) -> EngineResult<Order> {
        let (order, events) = op(&mut self.engine)?;
        self.notifications.dispatch(&events)?;
        Ok(order)
    }

    // ========== Order Queries ==========

    /// One order
    pub fn order(&self, order_id: &str) -> Option<&Order> {
        self.engine.order(order_id)
    }

    /// The orders visible to an actor: admins see everything, customers
    /// see their own
    pub fn orders(&self, actor: &Actor) -> Vec<&Order> {
        match actor.role {
            Role::Admin => self.engine.orders().iter().collect(),
            Role::User => self.engine.orders_for(&actor.user_id),
        }
    }

    /// Pre-fill hints for the admin quote dialog, from the current settings
    pub fn quote_prefill(&self, order_id: &str) -> EngineResult<QuotePrefill> {
        let order = self
            .engine
            .order(order_id)
            .ok_or_else(|| EngineError::NotFound(order_id.to_string()))?;
        Ok(money::quote_prefill(order, &self.settings.current()))
    }

    // ========== Catalog ==========

    /// All products
    pub fn products(&self) -> &[Product] {
        self.catalog.products()
    }

    /// One product
    pub fn product(&self, product_id: &str) -> Option<&Product> {
        self.catalog.get(product_id)
    }

    /// Admin adds a product
    pub fn add_product(&mut self, actor: &Actor, product: Product) -> EngineResult<()> {
        require_admin(actor, "manage the catalog")?;
        self.catalog.add(product)
    }

    /// Admin replaces a product record
    pub fn update_product(&mut self, actor: &Actor, product: Product) -> EngineResult<()> {
        require_admin(actor, "manage the catalog")?;
        self.catalog.update(product)
    }

    /// Admin deletes a product
    pub fn delete_product(&mut self, actor: &Actor, product_id: &str) -> EngineResult<()> {
        require_admin(actor, "manage the catalog")?;
        self.catalog.delete(product_id)
    }

    // ========== Settings ==========

    /// Point-in-time copy of the payment settings
    pub fn payment_settings(&self) -> PaymentSettings {
        self.settings.current()
    }

    /// Admin saves new payment settings
    pub fn save_settings(&mut self, actor: &Actor, settings: PaymentSettings) -> EngineResult<()> {
        require_admin(actor, "change payment settings")?;
        self.settings.save(settings)
    }

    // ========== Accounts ==========

    /// Register a customer account
    pub fn register(&mut self, new_user: NewUser) -> EngineResult<User> {
        self.identity.register(new_user)
    }

    /// Sign in
    pub fn login(&mut self, email: &str, password: &str) -> EngineResult<User> {
        self.identity.login(email, password)
    }

    /// Sign out
    pub fn logout(&mut self) -> EngineResult<()> {
        self.identity.logout()
    }

    /// The signed-in user, if any
    pub fn current_user(&self) -> Option<&User> {
        self.identity.current()
    }

    // ========== Chat ==========

    /// Customer writes into their own thread; the admin is alerted
    pub fn send_customer_message(
        &mut self,
        actor: &Actor,
        text: impl Into<String>,
    ) -> EngineResult<ChatMessage> {
        let message = self.chat.append(&actor.user_id, ChatSender::User, text)?;
        self.notifications.append(notifier::chat_notification(&message))?;
        Ok(message)
    }

    /// Admin replies into a customer's thread; the customer is alerted
    pub fn send_admin_reply(
        &mut self,
        actor: &Actor,
        customer_id: &str,
        text: impl Into<String>,
    ) -> EngineResult<ChatMessage> {
        require_admin(actor, "reply in customer threads")?;
        let message = self.chat.append(customer_id, ChatSender::Admin, text)?;
        self.notifications.append(notifier::chat_notification(&message))?;
        Ok(message)
    }

    /// One customer's thread, oldest first
    pub fn chat_thread(&self, user_id: &str) -> Vec<&ChatMessage> {
        self.chat.thread(user_id)
    }

    /// Customer ids with open threads, in first-contact order
    pub fn chat_threads(&self, actor: &Actor) -> EngineResult<Vec<&str>> {
        require_admin(actor, "list customer threads")?;
        Ok(self.chat.thread_owners())
    }

    // ========== Notifications ==========

    /// Notifications addressed to the actor, oldest first
    pub fn notifications_for(&self, actor: &Actor) -> Vec<&Notification> {
        self.notifications.for_recipient(&recipient_of(actor))
    }

    /// Unread count for the actor
    pub fn unread_count(&self, actor: &Actor) -> usize {
        self.notifications.unread_count(&recipient_of(actor))
    }

    /// Mark one of the actor's notifications read
    pub fn mark_notification_read(
        &mut self,
        actor: &Actor,
        notification_id: &str,
    ) -> EngineResult<()> {
        self.notifications.mark_read(&recipient_of(actor), notification_id)
    }
}

/// Admins read the shared admin inbox; customers read their own
fn recipient_of(actor: &Actor) -> Recipient {
    match actor.role {
        Role::Admin => Recipient::Admin,
        Role::User => Recipient::customer(actor.user_id.clone()),
    }
}

fn require_admin(actor: &Actor, what: &str) -> EngineResult<()> {
    if actor.role != Role::Admin {
        return Err(EngineError::Forbidden(format!(
            "only an admin may {}",
            what
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::LineRequest;
    use crate::storage::MemoryStore;
    use shared::order::{DeliveryMethod, OrderStatus};

    fn storefront() -> Storefront {
        Storefront::open(Arc::new(MemoryStore::new())).unwrap()
    }

    fn cart(product_id: &str, quantity: u32, method: PaymentMethod) -> OrderRequest {
        OrderRequest {
            items: vec![LineRequest {
                product_id: product_id.to_string(),
                quantity,
                selected_color: None,
            }],
            delivery_method: DeliveryMethod::Standard,
            payment_method: method,
        }
    }

    #[test]
    fn test_cash_path_notification_counts() {
        let mut front = storefront();
        let customer = Actor::customer("u-1");
        let admin = Actor::admin("admin-1");

        // seed product "3" costs 150
        let order = front
            .place_order(&customer, cart("3", 2, PaymentMethod::CashOnDelivery))
            .unwrap();
        assert_eq!(front.unread_count(&admin), 1);
        assert_eq!(front.unread_count(&customer), 0);

        let order = front
            .issue_quote(&admin, &order.id, order.version, Decimal::from(15), Decimal::from(60), 3)
            .unwrap();
        assert_eq!(front.unread_count(&customer), 1);
        assert_eq!(order.total, Decimal::from(375));

        // cash approval settles immediately: admin + customer success
        let order = front.approve_quote(&customer, &order.id, order.version).unwrap();
        assert_eq!(order.status, OrderStatus::Paid);
        assert_eq!(front.unread_count(&admin), 2);
        assert_eq!(front.unread_count(&customer), 2);

        let order = front.mark_shipped(&admin, &order.id, order.version).unwrap();
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(front.unread_count(&customer), 3);
    }

    #[test]
    fn test_digital_path_notification_counts() {
        let mut front = storefront();
        let customer = Actor::customer("u-1");
        let admin = Actor::admin("admin-1");

        let order = front
            .place_order(&customer, cart("2", 1, PaymentMethod::Bkash))
            .unwrap();
        let order = front
            .issue_quote(&admin, &order.id, order.version, Decimal::from(23), Decimal::from(60), 5)
            .unwrap();

        // digital approval is silent and parks the order
        let order = front.approve_quote(&customer, &order.id, order.version).unwrap();
        assert_eq!(order.status, OrderStatus::AwaitingPayment);
        assert_eq!(front.unread_count(&admin), 1);
        assert_eq!(front.unread_count(&customer), 1);

        // self-report warns the admin
        let order = front.report_payment(&customer, &order.id, order.version).unwrap();
        assert_eq!(order.status, OrderStatus::WaitingApproval);
        assert_eq!(front.unread_count(&admin), 2);

        // verification notifies both parties
        let order = front.confirm_payment(&admin, &order.id, order.version).unwrap();
        assert_eq!(order.status, OrderStatus::Paid);
        assert_eq!(front.unread_count(&admin), 3);
        assert_eq!(front.unread_count(&customer), 2);
    }

    #[test]
    fn test_decline_is_silent_and_final() {
        let mut front = storefront();
        let customer = Actor::customer("u-1");
        let admin = Actor::admin("admin-1");

        let order = front
            .place_order(&customer, cart("3", 1, PaymentMethod::CashOnDelivery))
            .unwrap();
        let order = front
            .issue_quote(&admin, &order.id, order.version, Decimal::ZERO, Decimal::from(60), 2)
            .unwrap();
        let before = front.unread_count(&customer);

        let order = front.decline_quote(&customer, &order.id, order.version).unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);
        assert_eq!(front.unread_count(&customer), before);

        let admin_before = front.unread_count(&admin);
        assert!(matches!(
            front.issue_quote(&admin, &order.id, order.version, Decimal::ZERO, Decimal::ZERO, 1),
            Err(EngineError::InvalidState(_))
        ));
        // a failed transition appends nothing
        assert_eq!(front.unread_count(&admin), admin_before);
    }

    #[test]
    fn test_admin_session_drives_admin_operations() {
        let mut front = storefront();
        let customer = Actor::customer("u-1");

        let order = front
            .place_order(&customer, cart("3", 2, PaymentMethod::CashOnDelivery))
            .unwrap();

        // the built-in account is the only path to an admin actor
        let user = front.login(crate::stores::ADMIN_EMAIL, "beautiful54321").unwrap();
        let admin = Actor::for_user(&user);
        assert_eq!(admin.role, Role::Admin);

        let order = front
            .issue_quote(&admin, &order.id, order.version, Decimal::from(15), Decimal::from(60), 3)
            .unwrap();
        assert_eq!(order.status, OrderStatus::WaitingApproval);
        // the new-order alert landed in the admin inbox the session reads
        assert_eq!(front.unread_count(&admin), 1);
    }

    #[test]
    fn test_quote_prefill_uses_current_settings() {
        let mut front = storefront();
        let customer = Actor::customer("u-1");

        // product "1" costs 35000; default vat 5%, standard fee 60
        let order = front
            .place_order(&customer, cart("1", 1, PaymentMethod::CashOnDelivery))
            .unwrap();
        let prefill = front.quote_prefill(&order.id).unwrap();
        assert_eq!(prefill.vat, Decimal::from(1750));
        assert_eq!(prefill.delivery_charge, Decimal::from(60));
    }

    #[test]
    fn test_catalog_and_settings_are_admin_gated() {
        let mut front = storefront();
        let customer = Actor::customer("u-1");

        assert!(matches!(
            front.delete_product(&customer, "1"),
            Err(EngineError::Forbidden(_))
        ));
        assert!(matches!(
            front.save_settings(&customer, PaymentSettings::default()),
            Err(EngineError::Forbidden(_))
        ));
    }

    #[test]
    fn test_chat_alerts_cross_the_counter() {
        let mut front = storefront();
        let customer = Actor::customer("u-1");
        let admin = Actor::admin("admin-1");

        front.send_customer_message(&customer, "is the Daytona in stock?").unwrap();
        assert_eq!(front.unread_count(&admin), 1);
        assert_eq!(front.unread_count(&customer), 0);

        front.send_admin_reply(&admin, "u-1", "yes, five left").unwrap();
        assert_eq!(front.unread_count(&customer), 1);

        assert_eq!(front.chat_thread("u-1").len(), 2);
        assert_eq!(front.chat_threads(&admin).unwrap(), vec!["u-1"]);
        assert!(matches!(
            front.send_admin_reply(&customer, "u-1", "nope"),
            Err(EngineError::Forbidden(_))
        ));
    }

    #[test]
    fn test_mark_read_is_owner_scoped() {
        let mut front = storefront();
        let customer = Actor::customer("u-1");
        let admin = Actor::admin("admin-1");

        front
            .place_order(&customer, cart("3", 1, PaymentMethod::CashOnDelivery))
            .unwrap();
        let id = front.notifications_for(&admin)[0].id.clone();

        assert!(matches!(
            front.mark_notification_read(&customer, &id),
            Err(EngineError::Forbidden(_)) | Err(EngineError::NotFound(_))
        ));
        front.mark_notification_read(&admin, &id).unwrap();
        assert_eq!(front.unread_count(&admin), 0);
    }
}
