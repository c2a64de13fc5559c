//! # Aurax Store Engine
//!
//! Order lifecycle state machine and the back-office stores around it.
//!
//! # Architecture
//!
//! ```text
//! Operation → OrderEngine → (Order', Vec<OrderEvent>)
//!                  ↓                    ↓
//!             DurableStore      NotificationCenter
//!            (JSON blob per     (event → notification
//!             collection key)    policy in `notifier`)
//! ```
//!
//! The engine owns the order collection and enforces the state machine;
//! every transition returns the events it produced and the `Storefront`
//! facade feeds them through the notification policy. Persistence is a
//! key-value blob collaborator invoked after each successful mutation,
//! never interleaved with validation.

pub mod engine;
pub mod money;
pub mod notifier;
pub mod storage;
pub mod storefront;
pub mod stores;

// Re-exports for public API
pub use engine::error::{EngineError, EngineResult};
pub use engine::{Actor, LineRequest, OrderEngine, OrderRequest, PriceSource, PricedProduct};
pub use notifier::{NotificationCenter, NotificationDraft};
pub use storage::{DurableStore, MemoryStore, RedbStore, StorageError};
pub use storefront::Storefront;
pub use stores::{ADMIN_EMAIL, CatalogStore, ChatStore, IdentityStore, NewUser, SettingsStore};
