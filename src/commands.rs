//! CLI command implementations

use crate::cli::{Cli, OutputType};
use icopt::{
    find_profile_path, get_prefs_path, list_profiles as list_profiles_impl, query_keys,
    LegacyPrefSource, LocalStorage, NoLegacyPrefs, OptionName, OptionsManager, PrefValue,
    PrefsJsSource, SettingEntry, Settings, StorageArea,
};
use std::collections::HashMap;
use std::path::PathBuf;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// List all available Thunderbird profiles
pub fn list_profiles(cli: &Cli) -> CommandResult {
    let profiles = list_profiles_impl(cli.profiles_dir.as_deref()).map_err(|e| {
        anyhow::anyhow!(
            "Failed to list profiles: {}. Make sure Thunderbird is installed.",
            e
        )
    })?;

    let json = serde_json::to_string_pretty(&profiles)?;
    println!("{}", json);
    Ok(())
}

/// Migrate TB68 prefs and fill in defaults, then print the result
pub fn init(cli: &Cli) -> CommandResult {
    let storage = resolve_storage(cli)?;
    let legacy = resolve_legacy_source(cli)?;

    let manager = OptionsManager::new(storage, legacy);
    manager.setup_default_options().map_err(|e| {
        anyhow::anyhow!("Failed to initialize option store: {}", e)
    })?;

    let settings = manager.storage().get_all()?;
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}

/// Print current option values (read-through defaults applied)
pub fn show(cli: &Cli, query_patterns: &[&str], output_type: OutputType) -> CommandResult {
    let storage = resolve_storage(cli)?;
    let manager = OptionsManager::new(storage, NoLegacyPrefs);

    let settings = manager.effective_settings()?;
    let settings = if query_patterns.is_empty() {
        settings
    } else {
        query_keys(&settings, query_patterns)
            .map_err(|e| anyhow::anyhow!("Failed to apply query: {}", e))?
    };

    print_settings(&settings, output_type)?;
    Ok(())
}

/// Print one option value in raw form
pub fn get(cli: &Cli, option: OptionName) -> CommandResult {
    let storage = resolve_storage(cli)?;
    let manager = OptionsManager::new(storage, NoLegacyPrefs);

    let value = manager.is_enabled_option(option, option.default_value())?;
    println!("{}", value);
    Ok(())
}

/// Write one option value
pub fn set(cli: &Cli, option: OptionName, value: bool) -> CommandResult {
    let storage = resolve_storage(cli)?;
    let manager = OptionsManager::new(storage, NoLegacyPrefs);

    manager.set_option(option, value)?;
    log::info!("{} = {}", option, value);
    Ok(())
}

/// List legacy Identity Chooser prefs from the profile's prefs.js
pub fn legacy(cli: &Cli, query_patterns: &[&str]) -> CommandResult {
    let prefs_path = resolve_prefs_path(cli)?;
    let source = PrefsJsSource::load(&prefs_path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read prefs.js at {}: {}",
            prefs_path.display(),
            e
        )
    })?;

    let prefs: HashMap<String, PrefValue> = source.identity_chooser_prefs();
    let prefs = if query_patterns.is_empty() {
        prefs
    } else {
        query_keys(&prefs, query_patterns)
            .map_err(|e| anyhow::anyhow!("Failed to apply query: {}", e))?
    };

    println!("{}", serde_json::to_string_pretty(&prefs)?);
    Ok(())
}

/// Storage file: explicit --store path wins, else the profile's extension storage
fn resolve_storage(cli: &Cli) -> Result<LocalStorage, Box<dyn std::error::Error>> {
    if let Some(path) = &cli.store {
        return Ok(LocalStorage::new(path));
    }

    let profile_path = resolve_profile_path(cli)?;
    Ok(LocalStorage::new(LocalStorage::default_path(&profile_path)))
}

/// Legacy prefs for migration: the profile's prefs.js when one can be found
fn resolve_legacy_source(
    cli: &Cli,
) -> Result<Box<dyn LegacyPrefSource>, Box<dyn std::error::Error>> {
    let profile_path = match resolve_profile_path(cli) {
        Ok(path) => path,
        Err(e) if cli.store.is_some() => {
            // An explicit store needs no profile; init simply has no legacy
            // prefs to pull from.
            log::warn!("no Thunderbird profile found ({}), skipping TB68 migration", e);
            return Ok(Box::new(NoLegacyPrefs));
        }
        Err(e) => return Err(e),
    };

    let prefs_path = get_prefs_path(&profile_path);
    if !prefs_path.exists() {
        log::debug!("no prefs.js at {}", prefs_path.display());
        return Ok(Box::new(NoLegacyPrefs));
    }

    let source = PrefsJsSource::load(&prefs_path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to parse prefs.js at {}: {}",
            prefs_path.display(),
            e
        )
    })?;
    Ok(Box::new(source))
}

fn resolve_prefs_path(cli: &Cli) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let profile_path = resolve_profile_path(cli)?;
    Ok(get_prefs_path(&profile_path))
}

fn resolve_profile_path(cli: &Cli) -> Result<PathBuf, Box<dyn std::error::Error>> {
    find_profile_path(&cli.profile, cli.profiles_dir.as_deref())
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to find profile '{}': {}. Use 'icopt profiles' to see available profiles.",
                cli.profile,
                e
            )
            .into()
        })
}

fn print_settings(settings: &Settings, output_type: OutputType) -> CommandResult {
    let json = match output_type {
        OutputType::JsonObject => serde_json::to_string_pretty(settings)?,
        OutputType::JsonArray => {
            let entries: Vec<SettingEntry> = settings
                .iter()
                .map(|(key, value)| SettingEntry {
                    key: key.clone(),
                    value: *value,
                })
                .collect();
            serde_json::to_string_pretty(&entries)?
        }
    };
    println!("{}", json);
    Ok(())
}
