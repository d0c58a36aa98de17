//! Options page surface: localization and checkbox binding
//!
//! Thin adapter between the options manager and a rendered options page. The
//! page is modeled as a flat list of elements (labels carrying a
//! `data-l10n-id`, checkbox inputs whose element id equals a storage key);
//! there is no real DOM here. The three operations mirror the page lifecycle:
//! localize the text, push stored values into the checkboxes, and write a
//! checkbox back to the store when it changes. Everything else about the page
//! is the host's concern.

use crate::error::Result;
use crate::locale::MessageCatalog;
use crate::store::StorageArea;

/// One element on the options page
#[derive(Debug, Clone)]
pub struct PageElement {
    /// Element id; for checkboxes this is the storage key they bind to
    pub id: String,
    /// Tag name, uppercase as the DOM reports it ("INPUT", "LABEL", ...)
    pub tag: String,
    /// `type` attribute for inputs ("checkbox", "text", ...)
    pub input_type: Option<String>,
    /// `data-l10n-id` attribute for localizable text
    pub l10n_id: Option<String>,
    /// Rendered text content
    pub text: String,
    /// Checked state for checkbox inputs
    pub checked: bool,
}

impl PageElement {
    /// A checkbox input bound to the given storage key
    pub fn checkbox(id: &str) -> Self {
        PageElement {
            id: id.to_string(),
            tag: "INPUT".to_string(),
            input_type: Some("checkbox".to_string()),
            l10n_id: None,
            text: String::new(),
            checked: false,
        }
    }

    /// A label carrying a localization id
    pub fn label(l10n_id: &str) -> Self {
        PageElement {
            id: String::new(),
            tag: "LABEL".to_string(),
            input_type: None,
            l10n_id: Some(l10n_id.to_string()),
            text: String::new(),
            checked: false,
        }
    }

    fn is_checkbox(&self) -> bool {
        self.tag == "INPUT" && self.input_type.as_deref() == Some("checkbox")
    }
}

/// A change event dispatched by the page, carrying its target element
#[derive(Debug)]
pub struct ChangeEvent<'a> {
    pub target: &'a PageElement,
}

/// The options page element list
#[derive(Debug, Default)]
pub struct OptionsPage {
    pub elements: Vec<PageElement>,
}

impl OptionsPage {
    /// The standard Identity Chooser options page layout
    pub fn standard() -> Self {
        OptionsPage {
            elements: vec![
                PageElement::label("optionsEnableComposeMessage"),
                PageElement::checkbox("icEnableComposeMessage"),
                PageElement::label("optionsEnableReplyMessage"),
                PageElement::checkbox("icEnableReplyMessage"),
                PageElement::label("optionsEnableForwardMessage"),
                PageElement::checkbox("icEnableForwardMessage"),
            ],
        }
    }

    /// Page load sequence: localize, then bind stored values
    ///
    /// Change events are delivered afterwards by the host through
    /// [`option_changed`](Self::option_changed).
    pub fn run(&mut self, catalog: &MessageCatalog, storage: &impl StorageArea) -> Result<()> {
        log::debug!("options page: run");
        self.localize(catalog);
        self.update_ui(storage)
    }

    /// Replace the text of every element carrying a localization id
    pub fn localize(&mut self, catalog: &MessageCatalog) {
        for element in &mut self.elements {
            if let Some(l10n_id) = &element.l10n_id {
                element.text = catalog.message(l10n_id).to_string();
            }
        }
    }

    /// Push stored values into the checkboxes they bind to
    pub fn update_ui(&mut self, storage: &impl StorageArea) -> Result<()> {
        let settings = storage.get_all()?;
        for element in &mut self.elements {
            if !element.is_checkbox() {
                continue;
            }
            if let Some(&value) = settings.get(&element.id) {
                element.checked = value;
            }
        }
        Ok(())
    }

    /// Handle a change event: checkbox targets write `{id: checked}`
    ///
    /// Events from any other element are ignored without touching the store.
    pub fn option_changed(event: &ChangeEvent<'_>, storage: &impl StorageArea) -> Result<()> {
        if !event.target.is_checkbox() {
            return Ok(());
        }
        log::debug!(
            "option_changed: {} = {}",
            event.target.id,
            event.target.checked
        );
        storage.set(&event.target.id, event.target.checked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;

    #[test]
    fn test_localize_replaces_tagged_text() {
        let catalog = MessageCatalog::from_json(
            r#"{"optionsEnableReplyMessage": {"message": "Reply picker"}}"#,
        )
        .unwrap();
        let mut page = OptionsPage::standard();
        page.localize(&catalog);

        let reply_label = page
            .elements
            .iter()
            .find(|e| e.l10n_id.as_deref() == Some("optionsEnableReplyMessage"))
            .unwrap();
        assert_eq!(reply_label.text, "Reply picker");

        // untranslated labels fall back to their id
        let compose_label = page
            .elements
            .iter()
            .find(|e| e.l10n_id.as_deref() == Some("optionsEnableComposeMessage"))
            .unwrap();
        assert_eq!(compose_label.text, "optionsEnableComposeMessage");
    }

    #[test]
    fn test_update_ui_sets_checkboxes_from_store() {
        let storage = MemoryStorage::with_entries([
            ("icEnableComposeMessage", true),
            ("icEnableReplyMessage", false),
        ]);
        let mut page = OptionsPage::standard();
        page.update_ui(&storage).unwrap();

        let checked = |id: &str| {
            page.elements
                .iter()
                .find(|e| e.id == id)
                .map(|e| e.checked)
                .unwrap()
        };
        assert!(checked("icEnableComposeMessage"));
        assert!(!checked("icEnableReplyMessage"));
        // unset key leaves the checkbox untouched
        assert!(!checked("icEnableForwardMessage"));
    }

    #[test]
    fn test_checkbox_change_writes_one_entry() {
        let storage = MemoryStorage::new();
        let mut target = PageElement::checkbox("icEnableForwardMessage");
        target.checked = false;

        OptionsPage::option_changed(&ChangeEvent { target: &target }, &storage).unwrap();

        let settings = storage.get_all().unwrap();
        assert_eq!(settings.len(), 1);
        assert_eq!(settings.get("icEnableForwardMessage"), Some(&false));
    }

    #[test]
    fn test_non_checkbox_change_writes_nothing() {
        let storage = MemoryStorage::new();
        let target = PageElement::label("optionsEnableReplyMessage");

        OptionsPage::option_changed(&ChangeEvent { target: &target }, &storage).unwrap();

        assert!(storage.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_text_input_change_writes_nothing() {
        let storage = MemoryStorage::new();
        let target = PageElement {
            id: "icEnableReplyMessage".to_string(),
            tag: "INPUT".to_string(),
            input_type: Some("text".to_string()),
            l10n_id: None,
            text: String::new(),
            checked: true,
        };

        OptionsPage::option_changed(&ChangeEvent { target: &target }, &storage).unwrap();

        assert!(storage.get_all().unwrap().is_empty());
    }
}
