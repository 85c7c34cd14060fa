//! Remember-me: which form fields go to which store.

use super::{KeyValueStore, Stores};
use crate::config::PersistenceConfig;
use crate::host::FormHost;
use crate::telemetry::SensitiveFieldRedactor;
use tracing::trace;

/// Field persistence bound to one set of stores.
#[derive(Debug, Clone)]
pub struct Preferences {
    config: PersistenceConfig,
    stores: Stores,
}

impl Preferences {
    pub fn new(config: PersistenceConfig, mut stores: Stores) -> Self {
        stores.cookies.set_ttl_days(config.cookie_ttl_days);
        Self { config, stores }
    }

    pub fn config(&self) -> &PersistenceConfig {
        &self.config
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    pub fn into_stores(self) -> Stores {
        self.stores
    }

    /// A profile is saved when the profile cookie holds a non-empty value.
    pub fn has_saved_profile(&self) -> bool {
        self.saved_name().is_some()
    }

    pub fn saved_name(&self) -> Option<String> {
        self.stores
            .cookies
            .get(&self.config.profile_key)
            .filter(|name| !name.is_empty())
    }

    pub fn is_persisted(&self, field: &str) -> bool {
        self.config.cookie_key(field).is_some() || self.config.is_local(field)
    }

    /// Persisted fields present on the page, cookie fields first.
    pub fn fields(&self) -> Vec<&str> {
        self.config
            .cookie_fields
            .iter()
            .map(|c| c.field.as_str())
            .chain(self.config.local_fields.iter().map(|f| f.as_str()))
            .collect()
    }

    /// Copy stored values into the page. Returns the ids that were filled.
    pub fn restore<H: FormHost + ?Sized>(&self, host: &mut H) -> Vec<String> {
        let mut restored = Vec::new();
        for field in self.fields() {
            if !host.contains(field) {
                continue;
            }
            if let Some(value) = self.stored_value(field).filter(|v| !v.is_empty()) {
                host.set_value(field, &value);
                restored.push(field.to_string());
            }
        }
        restored
    }

    /// Write one field's live value to its store. `false` if not persisted.
    pub fn save_field<H: FormHost + ?Sized>(&mut self, host: &H, field: &str) -> bool {
        let Some(value) = host.value(field) else {
            return false;
        };
        self.write(field, &value)
    }

    /// Write every persisted field whose value is not blank.
    pub fn save_all<H: FormHost + ?Sized>(&mut self, host: &H) -> usize {
        let fields: Vec<String> = self.fields().into_iter().map(str::to_string).collect();
        let mut saved = 0;
        for field in fields {
            let Some(value) = host.value(&field) else {
                continue;
            };
            if value.trim().is_empty() {
                continue;
            }
            if self.write(&field, &value) {
                saved += 1;
            }
        }
        saved
    }

    /// Opt-out: drop every cookie and the locally stored fields.
    pub fn forget(&mut self) {
        self.stores.cookies.clear();
        for field in &self.config.local_fields {
            self.stores.local.remove(field);
        }
        trace!("Forgot remembered fields");
    }

    /// "Not me": drop every cookie and the whole local store.
    pub fn forget_everything(&mut self) {
        self.stores.cookies.clear();
        self.stores.local.clear();
        trace!("Cleared all stores");
    }

    fn stored_value(&self, field: &str) -> Option<String> {
        match self.config.cookie_key(field) {
            Some(key) => self.stores.cookies.get(key),
            None if self.config.is_local(field) => self.stores.local.get(field),
            None => None,
        }
    }

    fn write(&mut self, field: &str, value: &str) -> bool {
        if let Some(key) = self.config.cookie_key(field) {
            let key = key.to_string();
            self.stores.cookies.set(&key, value);
        } else if self.config.is_local(field) {
            self.stores.local.set(field, value);
        } else {
            return false;
        }
        trace!(
            field = %field,
            value = %SensitiveFieldRedactor::global().redact(field, value),
            "Saved field"
        );
        true
    }
}
