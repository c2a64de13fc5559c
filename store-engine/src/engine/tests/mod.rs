//! Engine test helpers: a fixed-price catalog and request builders


use std::sync::Arc;

use rust_decimal::Decimal;
use shared::order::{DeliveryMethod, PaymentMethod};

use super::{Actor, LineRequest, OrderEngine, OrderRequest, PriceSource, PricedProduct};
use crate::storage::MemoryStore;

/// Catalog stub with two fixed prices
pub(super) struct FixedCatalog;

impl PriceSource for FixedCatalog {
    fn price_of(&self, product_id: &str) -> Option<PricedProduct> {
        match product_id {
            "p-100" => Some(PricedProduct {
                name: "Hundred".to_string(),
                unit_price: Decimal::from(100),
            }),
            "p-450" => Some(PricedProduct {
                name: "Four Fifty".to_string(),
                unit_price: Decimal::from(450),
            }),
            _ => None,
        }
    }
}

pub(super) fn test_engine() -> OrderEngine {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    OrderEngine::load(Arc::new(MemoryStore::new())).unwrap()
}

pub(super) fn customer() -> Actor {
    Actor::customer("u-1")
}

pub(super) fn admin() -> Actor {
    Actor::admin("admin-1")
}

pub(super) fn request(lines: &[(&str, u32)], payment_method: PaymentMethod) -> OrderRequest {
    OrderRequest {
        items: lines
            .iter()
            .map(|(product_id, quantity)| LineRequest {
                product_id: product_id.to_string(),
                quantity: *quantity,
                selected_color: None,
            })
            .collect(),
        delivery_method: DeliveryMethod::Standard,
        payment_method,
    }
}
