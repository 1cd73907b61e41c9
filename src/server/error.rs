//! Structured error types for the LSP server.

use thiserror::Error;
use tower_lsp::lsp_types::{Position, Url};

#[derive(Debug, Error)]
pub enum LspError {
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    #[error("Feature disabled: {feature}")]
    FeatureDisabled { feature: String },

    #[error("Document not found: {uri}")]
    DocumentNotFound { uri: String },

    #[error("Invalid position: line {line}, char {character} in {uri}")]
    InvalidPosition {
        uri: String,
        line: u32,
        character: u32,
    },
}

impl LspError {
    /// Log the error at debug level.
    pub fn log_debug(&self) {
        tracing::debug!("LSP Error: {}", self);
    }

    pub fn config(reason: impl Into<String>) -> Self {
        Self::ConfigError {
            reason: reason.into(),
        }
    }

    pub fn document_not_found(uri: &Url) -> Self {
        Self::DocumentNotFound {
            uri: uri.to_string(),
        }
    }

    pub fn invalid_position(uri: &Url, position: Position) -> Self {
        Self::InvalidPosition {
            uri: uri.to_string(),
            line: position.line,
            character: position.character,
        }
    }

    pub fn feature_disabled(feature: &str) -> Self {
        Self::FeatureDisabled {
            feature: feature.to_string(),
        }
    }
}
