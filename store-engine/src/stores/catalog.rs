//! Product catalog store
//!
//! Plain CRUD over `Product` records. Implements the `PriceSource` seam
//! the engine prices line items through - consulted only at order
//! creation, so catalog edits never touch existing orders.

use std::sync::Arc;

use rust_decimal::Decimal;
use shared::models::{Category, Product};

use crate::engine::error::{EngineError, EngineResult};
use crate::engine::{PriceSource, PricedProduct};
use crate::storage::{self, DurableStore, keys};

/// Product catalog
pub struct CatalogStore {
    store: Arc<dyn DurableStore>,
    products: Vec<Product>,
}

impl CatalogStore {
    /// Load the catalog; a first run gets the seed products
    pub fn load(store: Arc<dyn DurableStore>) -> EngineResult<Self> {
        let products = match storage::load_collection(store.as_ref(), keys::PRODUCTS)? {
            Some(products) => products,
            None => {
                let seeded = seed_products();
                storage::persist_collection(store.as_ref(), keys::PRODUCTS, &seeded)?;
                tracing::info!(count = seeded.len(), "seeded initial catalog");
                seeded
            }
        };
        Ok(Self { store, products })
    }

    /// All products
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up one product
    pub fn get(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Add a product
    pub fn add(&mut self, product: Product) -> EngineResult<()> {
        self.products.push(product);
        if let Err(e) = self.persist() {
            self.products.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Replace a product record
    pub fn update(&mut self, product: Product) -> EngineResult<()> {
        let slot = self
            .products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or_else(|| EngineError::NotFound(product.id.clone()))?;
        let previous = std::mem::replace(slot, product);
        if let Err(e) = self.persist() {
            if let Some(slot) = self.products.iter_mut().find(|p| p.id == previous.id) {
                *slot = previous;
            }
            return Err(e);
        }
        Ok(())
    }

    /// Delete a product
    pub fn delete(&mut self, product_id: &str) -> EngineResult<()> {
        let idx = self
            .products
            .iter()
            .position(|p| p.id == product_id)
            .ok_or_else(|| EngineError::NotFound(product_id.to_string()))?;
        let removed = self.products.remove(idx);
        if let Err(e) = self.persist() {
            self.products.insert(idx, removed);
            return Err(e);
        }
        Ok(())
    }

    fn persist(&self) -> EngineResult<()> {
        storage::persist_collection(self.store.as_ref(), keys::PRODUCTS, &self.products)?;
        Ok(())
    }
}

impl PriceSource for CatalogStore {
    fn price_of(&self, product_id: &str) -> Option<PricedProduct> {
        self.get(product_id).map(|p| PricedProduct {
            name: p.name.clone(),
            unit_price: p.price,
        })
    }
}

/// Seed catalog for a first run
fn seed_products() -> Vec<Product> {
    let watch = |id: &str,
                 name: &str,
                 brand: &str,
                 model: &str,
                 color: &str,
                 category: Category,
                 description: &str,
                 price: i64,
                 image_seed: &str,
                 stock: u32| Product {
        id: id.to_string(),
        name: name.to_string(),
        brand: brand.to_string(),
        model: model.to_string(),
        color: color.to_string(),
        available_colors: None,
        age: "Adult".to_string(),
        category,
        description: description.to_string(),
        price: Decimal::from(price),
        original_price: None,
        image: format!("https://picsum.photos/seed/{}/600/600", image_seed),
        stock,
        rating: None,
        reviews_count: None,
        specs: None,
    };

    vec![
        watch(
            "1",
            "Classic Gold Chrono",
            "Rolex",
            "Daytona",
            "Gold",
            Category::Luxury,
            "The ultimate luxury timepiece in 18ct gold.",
            35000,
            "watch1",
            5,
        ),
        watch(
            "2",
            "TechPro Smart X",
            "Apple",
            "Series 9",
            "Midnight",
            Category::Smart,
            "Stay connected with the smartest watch on your wrist.",
            450,
            "watch2",
            20,
        ),
        watch(
            "3",
            "Rugged Sport Z",
            "Casio",
            "G-Shock",
            "Red",
            Category::Sports,
            "Shock resistant and ready for any adventure.",
            150,
            "watch3",
            50,
        ),
    ]
}
