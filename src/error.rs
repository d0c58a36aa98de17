//! Error types for option storage and legacy preference migration
//!
//! This module defines the error types used throughout the icopt library.
//! All public functions return [`Result<T, Error>`] for consistent error handling.

use std::path::PathBuf;

/// Errors that can occur during option storage, migration, and prefs.js parsing
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Lexer error while tokenizing a prefs.js file
    #[error("Lexer error at line {line}, column {column}: {message}")]
    Lexer {
        line: usize,
        column: usize,
        message: String,
    },

    /// Parser error while parsing a prefs.js file
    #[error("Parser error at line {line}, column {column}: {message}")]
    Parser {
        line: usize,
        column: usize,
        message: String,
    },

    /// Unknown option name passed on the CLI or found in a storage file
    #[error("Unknown option '{0}'. Expected icEnableComposeMessage, icEnableReplyMessage, or icEnableForwardMessage")]
    UnknownOption(String),

    /// Storage file did not contain a flat object of boolean values
    #[error("Invalid storage file {path}: {message}")]
    InvalidStorage { path: PathBuf, message: String },

    /// Locale messages.json could not be decoded
    #[error("Invalid messages.json: {0}")]
    InvalidCatalog(#[source] serde_json::Error),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Profile not found
    #[error("Profile '{name}' not found in {directory}")]
    ProfileNotFound { name: String, directory: PathBuf },

    /// profiles.ini parsing error
    #[error("Failed to parse profiles.ini: {0}")]
    ProfilesIniParse(String),

    /// Invalid glob pattern in query
    #[error("Invalid glob pattern: {0}")]
    InvalidGlobPattern(String),

    /// JSON encoding of the storage file failed
    #[error("Failed to encode storage file: {0}")]
    StorageEncode(#[source] serde_json::Error),
}

/// Result type alias for convenience
///
/// All public functions in the icopt library return this type alias for
/// consistent error handling.
pub type Result<T> = std::result::Result<T, Error>;
