//! Payment settings singleton
//!
//! Mutated only through the admin save operation. The engine never holds a
//! live reference: quoting reads a point-in-time copy, so later changes
//! never retroactively alter existing orders.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Configurable financial parameters and contact identifiers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentSettings {
    /// bKash merchant number customers pay to
    pub bkash_number: String,
    /// Nagad merchant number customers pay to
    pub nagad_number: String,
    /// Admin contact phone
    pub admin_phone: String,
    /// Standard delivery fee (non-negative)
    pub standard_delivery_fee: Decimal,
    /// Premium delivery fee (non-negative)
    pub premium_delivery_fee: Decimal,
    /// VAT percentage in [0, 100]
    pub vat_percentage: Decimal,
}

impl Default for PaymentSettings {
    fn default() -> Self {
        Self {
            bkash_number: "01700000000".to_string(),
            nagad_number: "01800000000".to_string(),
            admin_phone: "01900000000".to_string(),
            standard_delivery_fee: Decimal::from(60),
            premium_delivery_fee: Decimal::from(120),
            vat_percentage: Decimal::from(5),
        }
    }
}
