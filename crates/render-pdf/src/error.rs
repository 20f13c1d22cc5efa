use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("PDF object error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("I/O error while writing the document: {0}")]
    Io(#[from] std::io::Error),
}
