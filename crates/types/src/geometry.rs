/// PostScript points per centimetre.
pub const PT_PER_CM: f32 = 72.0 / 2.54;

/// Converts centimetres to PostScript points.
pub fn cm(value: f32) -> f32 {
    value * PT_PER_CM
}

/// Pixel count for a physical length at the given resolution.
pub fn cm_to_px(value: f32, dpi: f32) -> u32 {
    (value / 2.54 * dpi).round().max(1.0) as u32
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A size given in centimetres, stored in points.
    pub fn from_cm(width: f32, height: f32) -> Self {
        Self { width: cm(width), height: cm(height) }
    }

    /// ISO A4 in points.
    pub fn a4() -> Self {
        Self::new(595.2756, 841.8898)
    }
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn uniform(value: f32) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }

    /// The drawable area of a page of the given size.
    pub fn content_box(&self, page: Size) -> Rect {
        Rect::new(
            self.left,
            self.top,
            page.width - self.left - self.right,
            page.height - self.top - self.bottom,
        )
    }
}
