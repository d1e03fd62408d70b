//! Error types for the rewriting pipeline.
//!
//! Only two variants ever reach a caller of `Pipeline::process_document`:
//! [`RewriteError::Validation`] (bad input) and [`RewriteError::Processing`]
//! (anything unexpected). The rest are either fatal at startup
//! ([`RewriteError::ResourceUnavailable`]) or recovered locally by the
//! transform that raised them.

use std::io;

use axum::{http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RewriteError {
    /// Missing or empty input text.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A restructuring template references a slot with no value.
    #[error("Template error: slot '{slot}' has no value")]
    TemplateFormat { slot: String },

    /// The word segmenter/tagger failed on a piece of text.
    #[error("Segmentation error: {0}")]
    Segmentation(String),

    /// A linguistic resource (dictionary, pattern bank) could not be loaded.
    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// Unexpected internal failure while running the pipeline.
    #[error("Processing error: {0}")]
    Processing(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for operations that may fail with RewriteError.
pub type Result<T> = std::result::Result<T, RewriteError>;

impl RewriteError {
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        RewriteError::Validation(msg.into())
    }

    pub fn template_slot<S: Into<String>>(slot: S) -> Self {
        RewriteError::TemplateFormat { slot: slot.into() }
    }

    pub fn segmentation<S: Into<String>>(msg: S) -> Self {
        RewriteError::Segmentation(msg.into())
    }

    pub fn resource<S: Into<String>>(msg: S) -> Self {
        RewriteError::ResourceUnavailable(msg.into())
    }

    pub fn processing<S: Into<String>>(msg: S) -> Self {
        RewriteError::Processing(msg.into())
    }

    /// HTTP status the web layer reports for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            RewriteError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RewriteError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match &self {
            RewriteError::Validation(msg) => msg.clone(),
            other => format!("Failed to process text: {}", other),
        };
        (status, Json(crate::protocol::ErrorOut { error: message })).into_response()
    }
}
