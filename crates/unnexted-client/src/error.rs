use thiserror::Error;

/// An embedded data block could not be read
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("no element with id '{0}' in the document")]
    Missing(String),

    #[error("malformed embedded JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A page module could not be loaded on the client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to load page module '{source_ref}': {message}")]
pub struct ModuleLoadError {
    pub source_ref: String,
    pub message: String,
}

impl ModuleLoadError {
    pub fn new(source_ref: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source_ref: source_ref.into(),
            message: message.into(),
        }
    }
}
