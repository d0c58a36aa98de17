//! The options manager: defaults, migration, and typed accessors
//!
//! Owns the fixed schema of recognized options and drives the one-time
//! migration from TB68 preferences into the storage area. Both collaborators
//! come in through ports ([`StorageArea`], [`LegacyPrefSource`]) so the logic
//! here is testable against in-memory fakes.
//!
//! The store itself is the single source of truth: nothing is cached across
//! calls, every read and write round-trips to the storage port.
//!
//! # Example
//!
//! ```rust
//! use icopt::{MemoryStorage, NoLegacyPrefs, OptionName, OptionsManager};
//!
//! let manager = OptionsManager::new(MemoryStorage::new(), NoLegacyPrefs);
//! manager.setup_default_options()?;
//!
//! assert!(manager.is_enabled_reply_message()?);
//! manager.set_option(OptionName::ReplyMessage, false)?;
//! assert!(!manager.is_enabled_reply_message()?);
//! # Ok::<(), icopt::Error>(())
//! ```

use crate::error::Result;
use crate::legacy::LegacyPrefSource;
use crate::store::StorageArea;
use crate::types::{OptionName, Settings};

/// Settings manager for the three Identity Chooser feature flags
#[derive(Debug)]
pub struct OptionsManager<S, L> {
    storage: S,
    legacy: L,
}

impl<S: StorageArea, L: LegacyPrefSource> OptionsManager<S, L> {
    /// Create a manager over the given storage area and legacy source
    pub fn new(storage: S, legacy: L) -> Self {
        OptionsManager { storage, legacy }
    }

    /// Ensure every recognized option has an explicit stored value
    ///
    /// An empty store means first run: legacy TB68 preferences are migrated
    /// first (writing through to the store), and the migration result becomes
    /// the snapshot the default-filling pass checks against, so a migrated
    /// value is never overwritten by its default. Any option still missing
    /// afterwards gets its compile-time default.
    ///
    /// Idempotent once the store is populated: a non-empty store skips
    /// migration and the per-option writes.
    pub fn setup_default_options(&self) -> Result<()> {
        log::debug!("setup_default_options: begin");

        let mut snapshot = self.storage.get_all()?;

        if snapshot.is_empty() {
            log::debug!("setup_default_options: empty store, migrating TB68 prefs");
            snapshot = self.migrate_from_tb68_prefs()?;
        }

        for option in OptionName::ALL {
            if !snapshot.contains_key(option.key()) {
                log::debug!(
                    "setup_default_options: {} missing, writing default {}",
                    option,
                    option.default_value()
                );
                self.storage.set(option.key(), option.default_value())?;
            }
        }

        log::debug!("setup_default_options: end");
        Ok(())
    }

    /// Migrate TB68 preferences into the store
    ///
    /// Each legacy preference that exists is recorded under its new storage
    /// key, both in the returned mapping and in the store itself. Absent
    /// legacy preferences are skipped entirely and left for the defaulting
    /// pass in [`setup_default_options`](Self::setup_default_options).
    pub fn migrate_from_tb68_prefs(&self) -> Result<Settings> {
        log::debug!("migrate_from_tb68_prefs: begin");

        let mut migrated = Settings::new();
        for option in OptionName::ALL {
            let legacy_value = self
                .legacy
                .get(option.legacy_pref(), option.default_value())?;

            if let Some(value) = legacy_value {
                log::debug!("migrate_from_tb68_prefs: {} -> {} = {}", option.legacy_pref(), option, value);
                migrated.insert(option.key().to_string(), value);
                self.storage.set(option.key(), value)?;
            }
        }

        log::debug!("migrate_from_tb68_prefs: end ({} migrated)", migrated.len());
        Ok(migrated)
    }

    /// Is the identity picker enabled on the compose button?
    pub fn is_enabled_compose_message(&self) -> Result<bool> {
        self.is_enabled_option(OptionName::ComposeMessage, true)
    }

    /// Is the identity picker enabled on the reply button?
    pub fn is_enabled_reply_message(&self) -> Result<bool> {
        self.is_enabled_option(OptionName::ReplyMessage, true)
    }

    /// Is the identity picker enabled on the forward button?
    pub fn is_enabled_forward_message(&self) -> Result<bool> {
        self.is_enabled_option(OptionName::ForwardMessage, true)
    }

    /// Read one option, falling back to the supplied default when unset
    ///
    /// Never writes.
    pub fn is_enabled_option(&self, option: OptionName, default_value: bool) -> Result<bool> {
        let settings = self.storage.get_all()?;
        Ok(settings.get(option.key()).copied().unwrap_or(default_value))
    }

    /// Write one option value
    pub fn set_option(&self, option: OptionName, value: bool) -> Result<()> {
        self.storage.set(option.key(), value)
    }

    /// Snapshot of all three options with read-through defaults applied
    pub fn effective_settings(&self) -> Result<Settings> {
        let stored = self.storage.get_all()?;
        let mut settings = Settings::new();
        for option in OptionName::ALL {
            let value = stored
                .get(option.key())
                .copied()
                .unwrap_or(option.default_value());
            settings.insert(option.key().to_string(), value);
        }
        Ok(settings)
    }

    /// The underlying storage area
    pub fn storage(&self) -> &S {
        &self.storage
    }
}
