use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphicsError {
    #[error("Production series is empty; there is nothing to plot")]
    EmptyProduction,
    #[error("Generated SVG could not be parsed: {0}")]
    Svg(#[from] usvg::Error),
    #[error("Could not allocate a {0}x{1} pixmap")]
    Pixmap(u32, u32),
    #[error("PNG encoding failed: {0}")]
    Encode(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
