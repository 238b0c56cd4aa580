//! Error types for quote-convert-rs.

use quote_convert_canvas2d::CanvasError;
use thiserror::Error;

/// Result type alias using RenderError.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering or exporting a quote image.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Drawing surface could not be created or used.
    #[error("Canvas error: {0}")]
    Canvas(#[from] CanvasError),

    /// Settings failed validation (malformed color, bad geometry, ...).
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// Settings JSON could not be parsed.
    #[error("Failed to parse settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Background image could not be loaded or decoded.
    #[error("Failed to load image: {0}")]
    ImageLoad(String),

    /// Export file could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
