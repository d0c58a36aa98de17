//! Command-line interface definition

use clap::{Parser, Subcommand, ValueEnum};
use icopt::OptionName;
use std::path::PathBuf;

/// CLI arguments for icopt
#[derive(Parser, Debug)]
#[command(name = "icopt")]
#[command(about = "Manage Identity Chooser options from the command line")]
pub struct Cli {
    /// Storage file (default: the profile's extension storage)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Thunderbird profile name
    #[arg(short, long, global = true, default_value = "default")]
    pub profile: String,

    /// Thunderbird profiles directory (default: auto-detect)
    #[arg(long, global = true)]
    pub profiles_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available Thunderbird profiles
    Profiles,

    /// Initialize the store: migrate TB68 prefs, then fill in defaults
    Init,

    /// Print current option values
    Show {
        /// Glob patterns to filter option names (OR logic)
        #[arg(short, long)]
        query: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputType::JsonObject)]
        output: OutputType,
    },

    /// Print one option value as raw true/false
    Get {
        /// Option name (e.g. icEnableReplyMessage)
        option: OptionName,
    },

    /// Set one option value
    Set {
        /// Option name (e.g. icEnableReplyMessage)
        option: OptionName,
        /// New value
        value: bool,
    },

    /// List legacy Identity Chooser prefs found in the profile's prefs.js
    Legacy {
        /// Glob patterns to filter pref names (OR logic)
        #[arg(short, long)]
        query: Vec<String>,
    },
}

/// JSON output shape for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputType {
    /// Flat JSON object of key-value pairs
    JsonObject,
    /// JSON array of {key, value} entries
    JsonArray,
}
