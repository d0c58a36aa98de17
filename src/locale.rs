//! Localized message catalog (WebExtension messages.json)
//!
//! The options page text comes from the extension's `_locales/<lang>/messages.json`
//! file. Lookup follows the host i18n contract: a missing or empty translation
//! falls back to the message id itself, so the page never renders blank labels.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    #[serde(default)]
    message: String,
    #[serde(default)]
    #[allow(dead_code)]
    description: Option<String>,
}

/// Parsed message catalog for one locale
#[derive(Debug, Default)]
pub struct MessageCatalog {
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    /// Empty catalog: every lookup falls back to the id
    pub fn empty() -> Self {
        MessageCatalog::default()
    }

    /// Parse a messages.json document
    pub fn from_json(content: &str) -> Result<Self> {
        let entries: HashMap<String, CatalogEntry> =
            serde_json::from_str(content).map_err(Error::InvalidCatalog)?;

        let messages = entries
            .into_iter()
            .map(|(id, entry)| (id, entry.message))
            .collect();
        Ok(MessageCatalog { messages })
    }

    /// Load a messages.json file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Translation for the given message id, or the id itself when missing
    pub fn message<'a>(&'a self, id: &'a str) -> &'a str {
        match self.messages.get(id) {
            Some(message) if !message.is_empty() => message,
            _ => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_present_message() {
        let catalog = MessageCatalog::from_json(
            r#"{
                "optionsEnableReply": {
                    "message": "Show identity picker when replying",
                    "description": "Options page checkbox label"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(
            catalog.message("optionsEnableReply"),
            "Show identity picker when replying"
        );
    }

    #[test]
    fn test_missing_message_falls_back_to_id() {
        let catalog = MessageCatalog::from_json("{}").unwrap();
        assert_eq!(catalog.message("optionsEnableReply"), "optionsEnableReply");
    }

    #[test]
    fn test_empty_message_falls_back_to_id() {
        let catalog =
            MessageCatalog::from_json(r#"{"optionsEnableReply": {"message": ""}}"#).unwrap();
        assert_eq!(catalog.message("optionsEnableReply"), "optionsEnableReply");
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(MessageCatalog::from_json("not json").is_err());
    }

    #[test]
    fn test_empty_catalog() {
        assert_eq!(MessageCatalog::empty().message("anything"), "anything");
    }
}
