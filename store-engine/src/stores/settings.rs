//! Payment settings store
//!
//! Holds the settings singleton. Readers get a point-in-time copy, so a
//! later save never reaches back into an order that was quoted under the
//! old numbers.

use std::sync::Arc;

use shared::models::PaymentSettings;

use crate::engine::error::EngineResult;
use crate::money;
use crate::storage::{self, DurableStore, keys};

/// Payment settings singleton store
pub struct SettingsStore {
    store: Arc<dyn DurableStore>,
    settings: PaymentSettings,
}

impl SettingsStore {
    /// Load the settings; a first run gets the defaults
    pub fn load(store: Arc<dyn DurableStore>) -> EngineResult<Self> {
        let settings = match storage::load_collection(store.as_ref(), keys::SETTINGS)? {
            Some(settings) => settings,
            None => {
                let defaults = PaymentSettings::default();
                storage::persist_collection(store.as_ref(), keys::SETTINGS, &defaults)?;
                defaults
            }
        };
        Ok(Self { store, settings })
    }

    /// Point-in-time copy of the current settings
    pub fn current(&self) -> PaymentSettings {
        self.settings.clone()
    }

    /// Validate and save new settings
    pub fn save(&mut self, settings: PaymentSettings) -> EngineResult<()> {
        money::validate_settings(&settings)?;
        storage::persist_collection(self.store.as_ref(), keys::SETTINGS, &settings)?;
        self.settings = settings;
        tracing::info!("payment settings updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::error::EngineError;
    use crate::storage::MemoryStore;
    use rust_decimal::Decimal;

    #[test]
    fn test_first_run_gets_defaults() {
        let store = Arc::new(MemoryStore::new());
        let settings = SettingsStore::load(store).unwrap();
        assert_eq!(settings.current(), PaymentSettings::default());
    }

    #[test]
    fn test_save_persists_across_reload() {
        let store = Arc::new(MemoryStore::new());
        let mut settings = SettingsStore::load(store.clone()).unwrap();

        let mut updated = settings.current();
        updated.vat_percentage = Decimal::from(10);
        settings.save(updated.clone()).unwrap();

        let reloaded = SettingsStore::load(store).unwrap();
        assert_eq!(reloaded.current(), updated);
    }

    #[test]
    fn test_save_rejects_out_of_range_vat() {
        let store = Arc::new(MemoryStore::new());
        let mut settings = SettingsStore::load(store).unwrap();

        let mut bad = settings.current();
        bad.vat_percentage = Decimal::from(150);
        assert!(matches!(
            settings.save(bad),
            Err(EngineError::InvalidAmount(_))
        ));
        // the held copy is unchanged
        assert_eq!(settings.current(), PaymentSettings::default());
    }
}
