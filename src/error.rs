// src/error.rs
use sunquote_graphics::GraphicsError;
use sunquote_render_pdf::{ComposeError, ContentError};
use sunquote_types::ValidationErrors;
use thiserror::Error;

/// A comprehensive error type for the whole proposal generation pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid proposal input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Rendering failed: {0}")]
    Render(#[from] GraphicsError),

    #[error("Composition failed: {0}")]
    Compose(#[from] ComposeError),

    #[error("Content templates could not be loaded: {0}")]
    Content(#[from] ContentError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration is invalid: {0}")]
    Config(String),
}
