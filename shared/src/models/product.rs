//! Catalog product record

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Watch category
///
/// Older records spell the luxury tier `Luxurious`; both spellings
/// deserialize, `Luxury` is written.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Category {
    Formal,
    Casual,
    #[serde(alias = "Luxurious")]
    Luxury,
    Smart,
    Sports,
    Kids,
    Stylish,
}

/// Product record
///
/// The engine only ever reads `price` (and `name`) from here, at order
/// creation time; everything else is display metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_colors: Option<Vec<String>>,
    pub age: String,
    pub category: Category,
    pub description: String,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    pub image: String,
    pub stock: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specs: Option<HashMap<String, String>>,
}
