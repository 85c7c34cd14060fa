//! Remembered form values.
//!
//! Two key-value stores back the remember-me feature:
//! - **CookieJar**: entries expire after a configured number of days
//! - **LocalStorage**: entries live until removed
//!
//! [`StoreFile`] keeps both in one JSON file between command-line runs, and
//! [`Preferences`] maps form fields onto the stores.

pub mod cookies;
pub mod file;
pub mod local;
pub mod preferences;

pub use cookies::{CookieEntry, CookieJar};
pub use file::{StoreFile, Stores};
pub use local::LocalStorage;
pub use preferences::Preferences;

// ═══════════════════════════════════════════════════════════════════════════════
// Key-Value Store Trait
// ═══════════════════════════════════════════════════════════════════════════════

/// A string-to-string store.
pub trait KeyValueStore {
    /// Get a live value.
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str);

    fn remove(&mut self, key: &str) -> bool;

    /// Remove every entry.
    fn clear(&mut self);

    /// Keys of live entries, sorted.
    fn keys(&self) -> Vec<String>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn len(&self) -> usize {
        self.keys().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
