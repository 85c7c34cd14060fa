//! Cookie jar with per-entry expiry.

use super::KeyValueStore;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::trace;

/// A stored cookie value and when it stops being readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieEntry {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl CookieEntry {
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Cookies written by the form.
///
/// Expired entries read as absent and are purged on the next write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookieJar {
    #[serde(default)]
    entries: BTreeMap<String, CookieEntry>,

    #[serde(skip, default = "default_ttl")]
    ttl: Duration,
}

fn default_ttl() -> Duration {
    Duration::days(30)
}

impl Default for CookieJar {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            ttl: default_ttl(),
        }
    }
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jar whose new entries live for `ttl_days`.
    pub fn with_ttl_days(ttl_days: i64) -> Self {
        let mut jar = Self::default();
        jar.set_ttl_days(ttl_days);
        jar
    }

    /// Out-of-range lifetimes saturate instead of overflowing.
    pub fn set_ttl_days(&mut self, ttl_days: i64) {
        self.ttl = Duration::try_days(ttl_days).unwrap_or(if ttl_days < 0 {
            Duration::MIN
        } else {
            Duration::MAX
        });
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store a value with an explicit expiry.
    pub fn set_expiring_at(&mut self, key: &str, value: &str, expires_at: DateTime<Utc>) {
        self.purge_expired();
        self.entries.insert(
            key.to_string(),
            CookieEntry {
                value: value.to_string(),
                expires_at,
            },
        );
    }

    pub fn entry(&self, key: &str) -> Option<&CookieEntry> {
        self.entries.get(key).filter(|e| !e.is_expired())
    }

    /// Drop entries past their expiry. Returns how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = Utc::now();
        let before = self.entries.len();
        self.entries.retain(|_, e| !e.is_expired_at(now));
        let purged = before - self.entries.len();
        if purged > 0 {
            trace!(purged = purged, "Purged expired cookies");
        }
        purged
    }
}

impl KeyValueStore for CookieJar {
    fn get(&self, key: &str) -> Option<String> {
        self.entry(key).map(|e| e.value.clone())
    }

    fn set(&mut self, key: &str, value: &str) {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(self.ttl).unwrap_or(if self.ttl < Duration::zero() {
            now
        } else {
            DateTime::<Utc>::MAX_UTC
        });
        self.set_expiring_at(key, value, expires_at);
    }

    fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn keys(&self) -> Vec<String> {
        let now = Utc::now();
        self.entries
            .iter()
            .filter(|(_, e)| !e.is_expired_at(now))
            .map(|(k, _)| k.clone())
            .collect()
    }
}
