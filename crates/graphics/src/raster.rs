use crate::error::GraphicsError;
use once_cell::sync::Lazy;
use resvg::tiny_skia::{Color as SkiaColor, Pixmap, Transform};
use std::sync::Arc;
use sunquote_types::Palette;
use usvg::fontdb;

/// System fonts are scanned once per process and shared by every render.
static SYSTEM_FONTS: Lazy<Arc<fontdb::Database>> = Lazy::new(|| {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    if db.is_empty() {
        log::warn!("No system fonts found; chart and table text will not be drawn");
    } else {
        log::debug!("Loaded {} system font faces for rasterization", db.len());
    }
    Arc::new(db)
});

/// Settings shared by the chart and table renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterOptions {
    /// Output resolution; physical sizes are fixed, pixel sizes follow.
    pub dpi: f32,
    pub palette: Palette,
    /// CSS font-family list used for every label.
    pub font_family: String,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            dpi: 150.0,
            palette: Palette::default(),
            font_family: "Helvetica, Arial, 'Liberation Sans', 'DejaVu Sans', sans-serif"
                .to_string(),
        }
    }
}

/// Rasterizes an SVG document to a PNG of exactly `width_px` x `height_px`.
pub fn rasterize_svg(svg: &str, width_px: u32, height_px: u32) -> Result<Vec<u8>, GraphicsError> {
    let mut pixmap =
        Pixmap::new(width_px, height_px).ok_or(GraphicsError::Pixmap(width_px, height_px))?;
    pixmap.fill(SkiaColor::WHITE);

    let mut opt = usvg::Options::default();
    opt.fontdb = Arc::clone(&SYSTEM_FONTS);
    let tree = usvg::Tree::from_str(svg, &opt)?;

    let size = tree.size();
    let transform = Transform::from_scale(
        width_px as f32 / size.width(),
        height_px as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap.encode_png().map_err(|e| GraphicsError::Encode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_png_of_requested_size() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100" viewBox="0 0 200 100">
            <rect x="10" y="10" width="50" height="50" fill="#16a085"/>
        </svg>"##;
        let png = rasterize_svg(svg, 400, 200).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (400, 200));
    }

    #[test]
    fn rejects_malformed_svg() {
        assert!(matches!(rasterize_svg("<svg", 10, 10), Err(GraphicsError::Svg(_))));
    }

    #[test]
    fn rejects_zero_sized_pixmaps() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"/>"#;
        assert!(matches!(rasterize_svg(svg, 0, 10), Err(GraphicsError::Pixmap(0, 10))));
    }
}
