use image::ImageReader;
use std::path::Path;

/// A decoded raster image, flattened to 8-bit RGB for embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl RasterImage {
    /// Reads and decodes an image file, sniffing the format from its bytes.
    pub fn open(path: &Path) -> Result<Self, image::ImageError> {
        let decoded = ImageReader::open(path)?.with_guessed_format()?.decode()?;
        let rgb = decoded.to_rgb8();
        Ok(Self { width: rgb.width(), height: rgb.height(), rgb: rgb.into_raw() })
    }
}
