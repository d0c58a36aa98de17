//! # icopt - Identity Chooser options manager
//!
//! This library manages the options store of the Identity Chooser Thunderbird
//! extension: three boolean feature flags controlling whether the identity
//! picker is attached to the compose, reply, and forward buttons. It applies
//! compile-time defaults, performs the one-time migration of Thunderbird 68
//! legacy preferences into the new key-value store, and provides the thin
//! localization and checkbox-binding glue the options page needs.
//!
//! ## Features
//!
//! - Fixed, compile-time option schema ([`OptionName`]) with per-option
//!   defaults and TB68 legacy preference names
//! - Storage behind a port ([`StorageArea`]): JSON-file-backed
//!   [`LocalStorage`] or in-memory [`MemoryStorage`] for tests
//! - One-time TB68 migration from a profile's prefs.js, with defaults filled
//!   in for whatever the old profile never set
//! - Minimal prefs.js reader (booleans, integers, strings, comments)
//! - Thunderbird profile discovery via profiles.ini
//! - WebExtension messages.json catalog with id fallback
//!
//! ## Quick Start
//!
//! ### Initializing the store
//!
//! ```rust
//! use icopt::{MemoryStorage, NoLegacyPrefs, OptionsManager, StorageArea};
//!
//! let manager = OptionsManager::new(MemoryStorage::new(), NoLegacyPrefs);
//! manager.setup_default_options()?;
//!
//! // every recognized option now has an explicit stored value
//! let settings = manager.storage().get_all()?;
//! assert_eq!(settings.len(), 3);
//! assert_eq!(settings.get("icEnableComposeMessage"), Some(&true));
//! # Ok::<(), icopt::Error>(())
//! ```
//!
//! ### Migrating TB68 preferences
//!
//! Legacy values win over defaults; prefs the old profile never set fall back
//! to their compile-time defaults:
//!
//! ```rust
//! use icopt::{parse_prefs, MemoryStorage, OptionsManager, PrefsJsSource};
//!
//! let prefs = parse_prefs(
//!     r#"user_pref("extensions.org.janek.IdentityChooser.extendButtonForward", false);"#,
//! )?;
//! let manager = OptionsManager::new(MemoryStorage::new(), PrefsJsSource::from_prefs(prefs));
//! manager.setup_default_options()?;
//!
//! assert!(!manager.is_enabled_forward_message()?);
//! assert!(manager.is_enabled_reply_message()?);
//! # Ok::<(), icopt::Error>(())
//! ```
//!
//! ### Reading a single option
//!
//! ```rust
//! use icopt::{MemoryStorage, NoLegacyPrefs, OptionName, OptionsManager};
//!
//! let manager = OptionsManager::new(MemoryStorage::new(), NoLegacyPrefs);
//!
//! // unset options answer with the supplied default, without writing
//! assert!(manager.is_enabled_option(OptionName::ReplyMessage, true)?);
//! assert!(!manager.is_enabled_option(OptionName::ReplyMessage, false)?);
//! # Ok::<(), icopt::Error>(())
//! ```
//!
//! ### Binding the options page
//!
//! ```rust
//! use icopt::{ChangeEvent, MessageCatalog, MemoryStorage, OptionsPage, PageElement, StorageArea};
//!
//! let storage = MemoryStorage::with_entries([("icEnableReplyMessage", false)]);
//!
//! let mut page = OptionsPage::standard();
//! page.localize(&MessageCatalog::empty());
//! page.update_ui(&storage)?;
//!
//! // a change event on a checkbox writes straight back to the store
//! let mut target = PageElement::checkbox("icEnableReplyMessage");
//! target.checked = true;
//! OptionsPage::option_changed(&ChangeEvent { target: &target }, &storage)?;
//! assert_eq!(storage.get_all()?.get("icEnableReplyMessage"), Some(&true));
//! # Ok::<(), icopt::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! All fallible functions return [`Result<T, Error>`]. Port failures (storage
//! I/O, prefs.js syntax errors) propagate to the caller; there is no retry or
//! recovery layer, matching the low-stakes nature of a settings page.
//!
//! ## Platform Support
//!
//! Thunderbird profiles are auto-detected on:
//! - **Linux**: `~/.thunderbird/`
//! - **macOS**: `~/Library/Thunderbird/Profiles/`
//! - **Windows**: `%APPDATA%\Thunderbird\Profiles\`

// Re-export all public types at crate root
pub use error::{Error, Result};
pub use legacy::{LegacyPrefSource, NoLegacyPrefs, PrefsJsSource};
pub use locale::MessageCatalog;
pub use options::OptionsManager;
pub use page::{ChangeEvent, OptionsPage, PageElement};
pub use prefs::{parse_prefs, parse_prefs_file, PrefValue};
pub use profile::{
    find_profile_path, get_prefs_path, get_profiles_directory, list_profiles, ProfileInfo,
};
pub use query::query_keys;
pub use store::{LocalStorage, MemoryStorage, StorageArea, EXTENSION_ID};
pub use types::{OptionName, SettingEntry, Settings};

// All modules are private - use re-exports above for public API
mod error;
mod legacy;
mod locale;
mod options;
mod page;
mod prefs;
mod profile;
mod query;
mod store;
mod types;
