//! Error types for commitpack modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from rendering a prompt.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to serialize prompt document: {0}")]
    SerializationFailed(#[source] serde_json::Error),
}

/// Errors from loading change set or analysis input files.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from collecting a change set out of a git working tree.
#[derive(Error, Debug)]
pub enum CollectError {
    #[error("No changes to commit (working tree is clean)")]
    NoChanges,

    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Failed to collect diff: {0}")]
    DiffFailed(#[source] git2::Error),
}
