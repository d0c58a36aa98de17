//! Thunderbird profile discovery
//!
//! Migration needs the old profile's prefs.js, so this module locates
//! Thunderbird profiles the same way the mail client does: parse
//! `profiles.ini` in the profiles directory, fall back to scanning for
//! `<hash>.<name>` directories when the ini is missing or stale.
//!
//! The profiles directory is resolved in priority order: an explicit path,
//! the `TB_PROFILES_DIR` environment variable, then the platform default
//! (`~/.thunderbird` on Linux, `~/Library/Thunderbird/Profiles` on macOS,
//! `%APPDATA%\Thunderbird\Profiles` on Windows).

use crate::error::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Profile entry parsed from profiles.ini
#[derive(Debug, Clone)]
struct TbProfile {
    name: String,
    path: PathBuf,
    is_relative: bool,
    is_default: bool,
}

/// Public profile information for listing
#[derive(Debug, Serialize)]
pub struct ProfileInfo {
    pub name: String,
    pub path: PathBuf,
    pub is_default: bool,
    pub is_relative: bool,
}

/// Find the Thunderbird profile directory for the given profile name
///
/// `default` matches the profile flagged `Default=1` in profiles.ini when no
/// profile is literally named that.
pub fn find_profile_path(profile_name: &str, profiles_dir_opt: Option<&Path>) -> Result<PathBuf> {
    let profiles_dir = get_profiles_directory(profiles_dir_opt)?;
    let profiles_ini = profiles_dir.join("profiles.ini");

    if profiles_ini.exists() {
        let profiles = parse_profiles_ini(&profiles_ini)?;

        if let Some(profile) = profiles.iter().find(|p| p.name == profile_name) {
            let full_path = resolve_profile_path(profile, &profiles_dir);
            if full_path.exists() {
                return Ok(full_path);
            }
        }

        if profile_name == "default" {
            if let Some(profile) = profiles.iter().find(|p| p.is_default) {
                let full_path = resolve_profile_path(profile, &profiles_dir);
                if full_path.exists() {
                    return Ok(full_path);
                }
            }
        }
    }

    scan_profiles_directory(&profiles_dir, profile_name)
}

/// List all Thunderbird profiles found in profiles.ini
pub fn list_profiles(profiles_dir_opt: Option<&Path>) -> Result<Vec<ProfileInfo>> {
    let profiles_dir = get_profiles_directory(profiles_dir_opt)?;
    let profiles_ini = profiles_dir.join("profiles.ini");

    if !profiles_ini.exists() {
        return Err(Error::ProfilesIniParse(format!(
            "profiles.ini not found at {}. Thunderbird may not be installed.",
            profiles_ini.display()
        )));
    }

    let profiles = parse_profiles_ini(&profiles_ini)?;
    Ok(profiles
        .into_iter()
        .map(|p| ProfileInfo {
            name: p.name,
            path: p.path,
            is_default: p.is_default,
            is_relative: p.is_relative,
        })
        .collect())
}

/// Path to prefs.js inside a profile directory
pub fn get_prefs_path(profile_path: &Path) -> PathBuf {
    profile_path.join("prefs.js")
}

fn resolve_profile_path(profile: &TbProfile, profiles_dir: &Path) -> PathBuf {
    if profile.is_relative {
        profiles_dir.join(&profile.path)
    } else {
        profile.path.clone()
    }
}

fn parse_profiles_ini(ini_path: &Path) -> Result<Vec<TbProfile>> {
    use configparser::ini::Ini;

    let content = std::fs::read_to_string(ini_path)?;

    let mut ini = Ini::new();
    if let Err(e) = ini.read(content) {
        return Err(Error::ProfilesIniParse(e));
    }

    let mut profiles = Vec::new();
    for sec_name in ini.sections() {
        // Only [ProfileN] sections; configparser lowercases section names.
        if !sec_name.to_lowercase().starts_with("profile") {
            continue;
        }

        let name = ini.get(&sec_name, "Name").unwrap_or_default();
        let path_str = ini.get(&sec_name, "Path").unwrap_or_default();
        let is_relative = ini
            .getuint(&sec_name, "IsRelative")
            .ok()
            .flatten()
            .unwrap_or(1)
            == 1;
        let is_default = ini
            .getuint(&sec_name, "Default")
            .ok()
            .flatten()
            .unwrap_or(0)
            == 1;

        if !name.is_empty() && !path_str.is_empty() {
            profiles.push(TbProfile {
                name,
                path: PathBuf::from(path_str),
                is_relative,
                is_default,
            });
        }
    }

    Ok(profiles)
}

/// Fallback when profiles.ini is missing or does not list the profile:
/// match directories named exactly or with the standard `<hash>.<name>` form
fn scan_profiles_directory(profiles_dir: &Path, profile_name: &str) -> Result<PathBuf> {
    let entries = std::fs::read_dir(profiles_dir)?;

    let mut matches: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let dir_name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");

        if dir_name == profile_name {
            return Ok(path);
        }
        if dir_name.ends_with(&format!(".{}", profile_name)) {
            matches.push(path);
        }
    }

    if matches.len() == 1 {
        return Ok(matches.remove(0));
    }

    Err(Error::ProfileNotFound {
        name: profile_name.to_string(),
        directory: profiles_dir.to_path_buf(),
    })
}

/// Resolve the profiles directory: explicit path, env var, then OS default
pub fn get_profiles_directory(manual_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = manual_path {
        return validate_profiles_dir(path);
    }

    if let Ok(env_path) = std::env::var("TB_PROFILES_DIR") {
        return validate_profiles_dir(Path::new(&env_path));
    }

    auto_detect_profiles_directory()
}

fn validate_profiles_dir(path: &Path) -> Result<PathBuf> {
    if !path.is_dir() {
        return Err(Error::ProfileNotFound {
            name: "<profiles directory>".to_string(),
            directory: path.to_path_buf(),
        });
    }
    Ok(path.to_path_buf())
}

fn auto_detect_profiles_directory() -> Result<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        let home = std::env::var("HOME").map_err(|_| {
            Error::ProfilesIniParse("HOME environment variable not set".to_string())
        })?;
        Ok(PathBuf::from(home).join(".thunderbird"))
    }

    #[cfg(target_os = "macos")]
    {
        let home = std::env::var("HOME").map_err(|_| {
            Error::ProfilesIniParse("HOME environment variable not set".to_string())
        })?;
        Ok(PathBuf::from(home).join("Library/Thunderbird/Profiles"))
    }

    #[cfg(target_os = "windows")]
    {
        let appdata = std::env::var("APPDATA").map_err(|_| {
            Error::ProfilesIniParse("APPDATA environment variable not set".to_string())
        })?;
        Ok(PathBuf::from(appdata).join("Thunderbird").join("Profiles"))
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        Err(Error::ProfilesIniParse(
            "Unsupported operating system".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_profiles_ini(dir: &Path, content: &str) {
        std::fs::write(dir.join("profiles.ini"), content).unwrap();
    }

    #[test]
    fn test_get_prefs_path() {
        let profile_path = PathBuf::from("/home/user/.thunderbird/abcd1234.default");
        assert_eq!(
            get_prefs_path(&profile_path),
            PathBuf::from("/home/user/.thunderbird/abcd1234.default/prefs.js")
        );
    }

    #[test]
    fn test_find_profile_by_name() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("abcd1234.work")).unwrap();
        write_profiles_ini(
            dir.path(),
            "[Profile0]\nName=work\nIsRelative=1\nPath=abcd1234.work\nDefault=0\n",
        );

        let path = find_profile_path("work", Some(dir.path())).unwrap();
        assert_eq!(path, dir.path().join("abcd1234.work"));
    }

    #[test]
    fn test_find_default_profile() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("abcd1234.main")).unwrap();
        write_profiles_ini(
            dir.path(),
            "[Profile0]\nName=main\nIsRelative=1\nPath=abcd1234.main\nDefault=1\n",
        );

        let path = find_profile_path("default", Some(dir.path())).unwrap();
        assert_eq!(path, dir.path().join("abcd1234.main"));
    }

    #[test]
    fn test_scan_fallback_without_ini() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("xy12ab34.older")).unwrap();

        let path = find_profile_path("older", Some(dir.path())).unwrap();
        assert_eq!(path, dir.path().join("xy12ab34.older"));
    }

    #[test]
    fn test_profile_not_found() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = find_profile_path("missing", Some(dir.path())).unwrap_err();
        assert!(matches!(err, Error::ProfileNotFound { .. }));
    }

    #[test]
    fn test_list_profiles() {
        let dir = tempfile::TempDir::new().unwrap();
        write_profiles_ini(
            dir.path(),
            "[General]\nStartWithLastProfile=1\n\n\
             [Profile0]\nName=main\nIsRelative=1\nPath=abcd1234.main\nDefault=1\n\n\
             [Profile1]\nName=work\nIsRelative=0\nPath=/srv/mail/work\n",
        );

        let profiles = list_profiles(Some(dir.path())).unwrap();
        assert_eq!(profiles.len(), 2);

        let main = profiles.iter().find(|p| p.name == "main").unwrap();
        assert!(main.is_default);
        assert!(main.is_relative);

        let work = profiles.iter().find(|p| p.name == "work").unwrap();
        assert!(!work.is_default);
        assert!(!work.is_relative);
    }

    #[test]
    fn test_list_profiles_without_ini_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(list_profiles(Some(dir.path())).is_err());
    }

    #[test]
    fn test_profiles_dir_validation_nonexistent() {
        let result = get_profiles_directory(Some(Path::new("/nonexistent/path")));
        assert!(result.is_err());
    }

    #[test]
    fn test_profiles_dir_validation_valid_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = get_profiles_directory(Some(dir.path())).unwrap();
        assert_eq!(result, dir.path());
    }
}
