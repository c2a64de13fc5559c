//! Notification emission policy and the notification center
//!
//! A single rule set maps order events and chat sends to directed
//! notification drafts, each addressed to exactly one recipient - never
//! broadcast, never deduplicated. The state machine itself knows nothing
//! about any of this: it returns events, and this module turns them into
//! records.

use std::sync::Arc;

use shared::models::{ChatMessage, ChatSender, Notification, Recipient, Severity};
use shared::order::{EventPayload, OrderEvent};

use crate::engine::error::{EngineError, EngineResult};
use crate::storage::{self, DurableStore, keys};

/// A notification not yet stamped with id/time
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationDraft {
    pub recipient: Recipient,
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl NotificationDraft {
    fn new(
        recipient: Recipient,
        severity: Severity,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            recipient,
            title: title.into(),
            message: message.into(),
            severity,
        }
    }
}

/// Short order reference for display text
fn short_id(order_id: &str) -> &str {
    order_id.get(..8).unwrap_or(order_id)
}

/// Map one order event to its notifications
///
/// This is the single authoritative trigger point - no other code path
/// emits order notifications.
pub fn order_notifications(event: &OrderEvent) -> Vec<NotificationDraft> {
    let id = short_id(&event.order_id);
    match &event.payload {
        EventPayload::OrderPlaced { .. } => vec![NotificationDraft::new(
            Recipient::Admin,
            Severity::Info,
            "New order received",
            format!("Order {} is pending a quote.", id),
        )],

        EventPayload::QuoteIssued {
            total,
            delivery_days,
            ..
        } => vec![NotificationDraft::new(
            Recipient::customer(event.user_id.clone()),
            Severity::Info,
            "Quote received",
            format!(
                "Order {} has been quoted at {}. Estimated delivery: {} days.",
                id, total, delivery_days
            ),
        )],

        // The approval itself is silent; cash settlement shows up as the
        // accompanying PaymentVerified event
        EventPayload::QuoteApproved { .. } | EventPayload::QuoteDeclined {} => vec![],

        EventPayload::PaymentReported { payment_method } => vec![NotificationDraft::new(
            Recipient::Admin,
            Severity::Warning,
            "Payment reported",
            format!(
                "Customer reports a {:?} payment for order {}. Verify manually before confirming.",
                payment_method, id
            ),
        )],

        EventPayload::PaymentVerified { total } => vec![
            NotificationDraft::new(
                Recipient::Admin,
                Severity::Success,
                "Payment received",
                format!("Payment of {} for order {} has been verified.", total, id),
            ),
            NotificationDraft::new(
                Recipient::customer(event.user_id.clone()),
                Severity::Success,
                "Payment verified",
                format!(
                    "Your payment for order {} was verified. We are preparing your shipment.",
                    id
                ),
            ),
        ],

        EventPayload::OrderShipped { delivery_days } => {
            let message = match delivery_days {
                Some(days) => format!(
                    "Order {} is on the way. It should arrive in about {} days.",
                    id, days
                ),
                None => format!("Order {} is on the way.", id),
            };
            vec![NotificationDraft::new(
                Recipient::customer(event.user_id.clone()),
                Severity::Success,
                "Order shipped",
                message,
            )]
        }
    }
}

/// Map a chat send to its notification: customer messages alert the admin,
/// admin replies alert the thread owner
pub fn chat_notification(message: &ChatMessage) -> NotificationDraft {
    match message.sender {
        ChatSender::User => NotificationDraft::new(
            Recipient::Admin,
            Severity::Info,
            "New customer message",
            format!("Message from {}: {}", message.user_id, message.text),
        ),
        ChatSender::Admin => NotificationDraft::new(
            Recipient::customer(message.user_id.clone()),
            Severity::Info,
            "New message from Aurax",
            message.text.clone(),
        ),
    }
}

// ============================================================================
// Notification Center
// ============================================================================

/// Append-only notification log with per-recipient read tracking
pub struct NotificationCenter {
    store: Arc<dyn DurableStore>,
    items: Vec<Notification>,
}

impl NotificationCenter {
    /// Load the center from the durable store
    pub fn load(store: Arc<dyn DurableStore>) -> EngineResult<Self> {
        let items =
            storage::load_collection(store.as_ref(), keys::NOTIFICATIONS)?.unwrap_or_default();
        Ok(Self { store, items })
    }

    /// Append one notification
    pub fn append(&mut self, draft: NotificationDraft) -> EngineResult<Notification> {
        let notification = Notification {
            id: uuid::Uuid::new_v4().to_string(),
            recipient: draft.recipient,
            title: draft.title,
            message: draft.message,
            severity: draft.severity,
            read: false,
            timestamp: chrono::Utc::now().timestamp_millis(),
        };
        self.items.push(notification.clone());
        if let Err(e) = self.persist() {
            self.items.pop();
            return Err(e);
        }
        Ok(notification)
    }

    /// Run a batch of order events through the policy and append the results
    pub fn dispatch(&mut self, events: &[OrderEvent]) -> EngineResult<usize> {
        let mut appended = 0;
        for event in events {
            for draft in order_notifications(event) {
                self.append(draft)?;
                appended += 1;
            }
        }
        Ok(appended)
    }

    /// Notifications addressed to one recipient, oldest first
    pub fn for_recipient(&self, recipient: &Recipient) -> Vec<&Notification> {
        self.items.iter().filter(|n| &n.recipient == recipient).collect()
    }

    /// Unread count for one recipient
    pub fn unread_count(&self, recipient: &Recipient) -> usize {
        self.items
            .iter()
            .filter(|n| &n.recipient == recipient && !n.read)
            .count()
    }

    /// Mark one notification read; only the owning recipient may
    pub fn mark_read(&mut self, recipient: &Recipient, notification_id: &str) -> EngineResult<()> {
        let item = self
            .items
            .iter_mut()
            .find(|n| n.id == notification_id && &n.recipient == recipient)
            .ok_or_else(|| EngineError::NotFound(notification_id.to_string()))?;
        item.read = true;
        self.persist()
    }

    /// Every notification, oldest first
    pub fn all(&self) -> &[Notification] {
        &self.items
    }

    fn persist(&self) -> EngineResult<()> {
        storage::persist_collection(self.store.as_ref(), keys::NOTIFICATIONS, &self.items)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use rust_decimal::Decimal;
    use shared::order::{OrderEventType, PaymentMethod};

    fn event(payload: EventPayload) -> OrderEvent {
        OrderEvent {
            event_id: "e-1".to_string(),
            order_id: "11112222-0000-0000-0000-000000000000".to_string(),
            user_id: "u-1".to_string(),
            timestamp: 0,
            event_type: payload.event_type(),
            payload,
        }
    }

    #[test]
    fn test_order_placed_notifies_admin_only() {
        let drafts = order_notifications(&event(EventPayload::OrderPlaced {
            subtotal: Decimal::from(200),
            item_count: 2,
        }));
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].recipient, Recipient::Admin);
        assert_eq!(drafts[0].severity, Severity::Info);
    }

    #[test]
    fn test_quote_issued_notifies_customer_only() {
        let drafts = order_notifications(&event(EventPayload::QuoteIssued {
            vat: Decimal::from(10),
            delivery_charge: Decimal::from(20),
            delivery_days: 3,
            total: Decimal::from(230),
        }));
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].recipient, Recipient::customer("u-1"));
        assert_eq!(drafts[0].severity, Severity::Info);
    }

    #[test]
    fn test_approval_and_decline_are_silent() {
        assert!(order_notifications(&event(EventPayload::QuoteApproved {
            payment_method: PaymentMethod::Bkash,
        }))
        .is_empty());
        assert!(order_notifications(&event(EventPayload::QuoteDeclined {})).is_empty());
    }

    #[test]
    fn test_payment_reported_warns_admin() {
        let drafts = order_notifications(&event(EventPayload::PaymentReported {
            payment_method: PaymentMethod::Nagad,
        }));
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].recipient, Recipient::Admin);
        assert_eq!(drafts[0].severity, Severity::Warning);
    }

    #[test]
    fn test_payment_verified_fans_out_to_both_parties() {
        let drafts = order_notifications(&event(EventPayload::PaymentVerified {
            total: Decimal::from(230),
        }));
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].recipient, Recipient::Admin);
        assert_eq!(drafts[1].recipient, Recipient::customer("u-1"));
        assert!(drafts.iter().all(|d| d.severity == Severity::Success));
    }

    #[test]
    fn test_shipped_notifies_customer_only() {
        let drafts = order_notifications(&event(EventPayload::OrderShipped {
            delivery_days: Some(3),
        }));
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].recipient, Recipient::customer("u-1"));
    }

    #[test]
    fn test_chat_routing() {
        let from_customer = ChatMessage {
            id: "m-1".to_string(),
            user_id: "u-1".to_string(),
            sender: ChatSender::User,
            text: "hello".to_string(),
            timestamp: 0,
        };
        assert_eq!(chat_notification(&from_customer).recipient, Recipient::Admin);

        let from_admin = ChatMessage {
            sender: ChatSender::Admin,
            ..from_customer
        };
        assert_eq!(
            chat_notification(&from_admin).recipient,
            Recipient::customer("u-1")
        );
    }

    #[test]
    fn test_center_append_read_tracking() {
        let store = Arc::new(MemoryStore::new());
        let mut center = NotificationCenter::load(store.clone()).unwrap();

        let id = center
            .append(NotificationDraft::new(
                Recipient::customer("u-1"),
                Severity::Info,
                "t",
                "m",
            ))
            .unwrap()
            .id;
        assert_eq!(center.unread_count(&Recipient::customer("u-1")), 1);

        // another recipient cannot flip the flag
        assert!(matches!(
            center.mark_read(&Recipient::Admin, &id),
            Err(EngineError::NotFound(_))
        ));

        center.mark_read(&Recipient::customer("u-1"), &id).unwrap();
        assert_eq!(center.unread_count(&Recipient::customer("u-1")), 0);

        // the log survives a reload
        let reloaded = NotificationCenter::load(store).unwrap();
        assert_eq!(reloaded.all().len(), 1);
        assert!(reloaded.all()[0].read);
    }

    #[test]
    fn test_dispatch_never_deduplicates() {
        let store = Arc::new(MemoryStore::new());
        let mut center = NotificationCenter::load(store).unwrap();
        let ev = event(EventPayload::OrderPlaced {
            subtotal: Decimal::from(200),
            item_count: 2,
        });
        assert_eq!(ev.event_type, OrderEventType::OrderPlaced);
        center.dispatch(&[ev.clone()]).unwrap();
        center.dispatch(&[ev]).unwrap();
        assert_eq!(center.for_recipient(&Recipient::Admin).len(), 2);
    }
}
