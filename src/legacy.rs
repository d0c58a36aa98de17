//! Legacy preference source for TB68 migration
//!
//! Before the WebExtension rewrite, Identity Chooser stored its settings as
//! Thunderbird preferences under `extensions.org.janek.IdentityChooser.*` in
//! the profile's prefs.js. Migration reads those once through the
//! [`LegacyPrefSource`] port; [`PrefsJsSource`] is the real implementation,
//! [`NoLegacyPrefs`] the null one for fresh installs without an old profile.

use crate::error::Result;
use crate::prefs::{parse_prefs_file, PrefValue};
use std::collections::HashMap;
use std::path::Path;

/// Read access to the prior extension version's preference store
pub trait LegacyPrefSource {
    /// Look up a legacy preference
    ///
    /// Returns `Ok(None)` when the preference is not available at all, which
    /// the migration treats as "nothing to migrate". `default_value` mirrors
    /// the host API shape; a source may answer it for prefs it knows about
    /// but has no stored value for.
    fn get(&self, pref: &str, default_value: bool) -> Result<Option<bool>>;
}

/// Legacy preferences backed by a parsed prefs.js file
#[derive(Debug)]
pub struct PrefsJsSource {
    prefs: HashMap<String, PrefValue>,
}

impl PrefsJsSource {
    /// Parse the given prefs.js file into a lookup source
    pub fn load(path: &Path) -> Result<Self> {
        let prefs = parse_prefs_file(path)?;
        log::debug!("loaded {} prefs from {}", prefs.len(), path.display());
        Ok(PrefsJsSource { prefs })
    }

    /// Build a source from already-parsed preferences
    pub fn from_prefs(prefs: HashMap<String, PrefValue>) -> Self {
        PrefsJsSource { prefs }
    }

    /// All legacy Identity Chooser prefs present in the file
    pub fn identity_chooser_prefs(&self) -> HashMap<String, PrefValue> {
        self.prefs
            .iter()
            .filter(|(key, _)| key.starts_with("extensions.org.janek.IdentityChooser."))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl LegacyPrefSource for PrefsJsSource {
    fn get(&self, pref: &str, _default_value: bool) -> Result<Option<bool>> {
        // Only user_pref entries the old extension actually wrote exist in
        // prefs.js; an absent key means there is nothing to migrate.
        Ok(self.prefs.get(pref).and_then(PrefValue::as_bool))
    }
}

impl<L: LegacyPrefSource + ?Sized> LegacyPrefSource for Box<L> {
    fn get(&self, pref: &str, default_value: bool) -> Result<Option<bool>> {
        (**self).get(pref, default_value)
    }
}

/// Null source: no legacy profile, nothing to migrate
#[derive(Debug, Default)]
pub struct NoLegacyPrefs;

impl LegacyPrefSource for NoLegacyPrefs {
    fn get(&self, _pref: &str, _default_value: bool) -> Result<Option<bool>> {
        Ok(None)
    }
}
