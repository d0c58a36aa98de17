//! Option schema for the Identity Chooser settings store
//!
//! The extension exposes exactly three boolean feature flags, one per message
//! composition path (compose, reply, forward). The set is fixed at compile
//! time; storage keys and the TB68 legacy preference names they migrate from
//! are part of the on-disk format and must not change.

use crate::error::Error;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// The persisted settings snapshot: flat mapping of storage key to flag value
pub type Settings = HashMap<String, bool>;

/// One of the three recognized boolean options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum OptionName {
    /// Identity picker on the compose-new-message button
    ComposeMessage,
    /// Identity picker on the reply button
    ReplyMessage,
    /// Identity picker on the forward button
    ForwardMessage,
}

impl OptionName {
    /// All recognized options, in defaulting order
    pub const ALL: [OptionName; 3] = [
        OptionName::ComposeMessage,
        OptionName::ReplyMessage,
        OptionName::ForwardMessage,
    ];

    /// Stable storage key for this option
    pub fn key(self) -> &'static str {
        match self {
            OptionName::ComposeMessage => "icEnableComposeMessage",
            OptionName::ReplyMessage => "icEnableReplyMessage",
            OptionName::ForwardMessage => "icEnableForwardMessage",
        }
    }

    /// Compile-time default value
    pub fn default_value(self) -> bool {
        match self {
            OptionName::ComposeMessage => true,
            OptionName::ReplyMessage => true,
            OptionName::ForwardMessage => true,
        }
    }

    /// Thunderbird 68 preference this option migrates from
    pub fn legacy_pref(self) -> &'static str {
        match self {
            OptionName::ComposeMessage => {
                "extensions.org.janek.IdentityChooser.extendButtonNewmsg"
            }
            OptionName::ReplyMessage => "extensions.org.janek.IdentityChooser.extendButtonReply",
            OptionName::ForwardMessage => {
                "extensions.org.janek.IdentityChooser.extendButtonForward"
            }
        }
    }
}

impl From<OptionName> for &'static str {
    fn from(name: OptionName) -> Self {
        name.key()
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for OptionName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OptionName::ALL
            .into_iter()
            .find(|o| o.key() == s)
            .ok_or_else(|| Error::UnknownOption(s.to_string()))
    }
}

/// Representation for array output format on the CLI
#[derive(Debug, Clone, Serialize)]
pub struct SettingEntry {
    pub key: String,
    pub value: bool,
}
