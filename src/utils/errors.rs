use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the Pokedex
#[derive(Error, Debug)]
pub enum PokedexError {
    #[error("Error - File must be of type .txt: '{0}'")]
    InvalidFile(String),

    #[error(
        "File '{}' does not exist. Please provide an existing file to process, \
         else provide a name or id as the input.",
        .0.display()
    )]
    FileNotFound(PathBuf),

    #[error("Error - File is empty: '{}'", .0.display())]
    EmptyFile(PathBuf),

    #[error("No entry found for '{0}'")]
    NotFound(String),

    #[error("Malformed response for '{identifier}': {reason}")]
    MalformedResponse { identifier: String, reason: String },

    #[error("Unexpected data for '{identifier}': {reason}")]
    Format { identifier: String, reason: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
