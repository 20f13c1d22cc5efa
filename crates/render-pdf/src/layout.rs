//! Flow layout: turns a story of blocks into pages of positioned elements.
//!
//! Coordinates are in points with the origin at the top-left corner of the
//! page; the writer flips them into PDF space.

use crate::fonts::{Face, text_width};
use crate::images::RasterImage;
use crate::text::{Fragment, Span, wrap};
use std::sync::Arc;
use sunquote_types::{Color, Margins, Rect, Size};

/// Fraction of the font size between the top of a line box and its baseline.
pub const ASCENT: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParagraphStyle {
    pub size: f32,
    pub leading: f32,
    pub color: Color,
    pub align: Align,
    pub space_before: f32,
    pub space_after: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub spans: Vec<Span>,
    pub style: ParagraphStyle,
}

/// A section title set on a shaded band.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub text: String,
    pub size: f32,
    pub color: Color,
    pub background: Color,
    pub padding: f32,
    pub space_before: f32,
    pub space_after: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub label: String,
    pub value: String,
    /// Bold text with a heavy rule beneath.
    pub emphasized: bool,
}

/// A two-column label/value table, centred in the measure.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValueTable {
    pub rows: Vec<TableRow>,
    pub column_widths: (f32, f32),
    pub size: f32,
    pub padding: f32,
    pub text_color: Color,
    pub grid_color: Color,
    pub rule_color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlock {
    pub image: Arc<RasterImage>,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading(Heading),
    Paragraph(Paragraph),
    Spacer(f32),
    Table(KeyValueTable),
    Image(ImageBlock),
    PageBreak,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub fragments: Vec<Fragment>,
    pub size: f32,
    pub color: Color,
    /// Extra space added to every space character (PDF `Tw`).
    pub word_spacing: f32,
}

impl TextElement {
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutElement {
    Text(TextElement),
    Rectangle { fill: Color },
    /// A horizontal or vertical stroke from `(x, y)` to `(x + width, y + height)`.
    Rule { stroke: Color, line_width: f32 },
    Image(Arc<RasterImage>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionedElement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub element: LayoutElement,
}

/// Pages of positioned elements, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaidOutDocument {
    pub pages: Vec<Vec<PositionedElement>>,
}

impl LaidOutDocument {
    /// The text of every line on `page`, in drawing order.
    pub fn page_text(&self, page: usize) -> Vec<String> {
        self.pages
            .get(page)
            .into_iter()
            .flatten()
            .filter_map(|el| match &el.element {
                LayoutElement::Text(t) => Some(t.text()),
                _ => None,
            })
            .collect()
    }
}

/// Room a heading wants below it so it is not stranded at the page foot.
const HEADING_KEEP_WITH_NEXT: f32 = 42.0;

pub struct LayoutEngine {
    page: Size,
    content: Rect,
}

impl LayoutEngine {
    pub fn new(page: Size, margins: Margins) -> Self {
        Self { page, content: margins.content_box(page) }
    }

    pub fn page_size(&self) -> Size {
        self.page
    }

    pub fn content_box(&self) -> Rect {
        self.content
    }

    pub fn layout(&self, story: &[Block]) -> LaidOutDocument {
        let mut cursor = Cursor::new(self.content);
        for block in story {
            match block {
                Block::Heading(h) => self.layout_heading(&mut cursor, h),
                Block::Paragraph(p) => self.layout_paragraph(&mut cursor, p),
                Block::Spacer(height) => {
                    if cursor.fits(*height) {
                        cursor.y += height;
                    } else if !cursor.fresh {
                        cursor.new_page();
                    }
                }
                Block::Table(t) => self.layout_table(&mut cursor, t),
                Block::Image(img) => self.layout_image(&mut cursor, img),
                Block::PageBreak => {
                    if !cursor.fresh {
                        cursor.new_page();
                    }
                }
            }
        }
        let pages = cursor.finish();
        log::debug!("Laid out {} block(s) on {} page(s)", story.len(), pages.len());
        LaidOutDocument { pages }
    }

    fn layout_heading(&self, cursor: &mut Cursor, heading: &Heading) {
        let band = heading.size * 1.2 + 2.0 * heading.padding;
        if !cursor.fresh {
            cursor.y += heading.space_before;
        }
        if !cursor.fits(band + HEADING_KEEP_WITH_NEXT) && !cursor.fresh {
            cursor.new_page();
        }
        let width = self.content.width;
        cursor.place(self.content.x, cursor.y, width, band, LayoutElement::Rectangle {
            fill: heading.background,
        });
        cursor.place(
            self.content.x + heading.padding,
            cursor.y + heading.padding + heading.size * 0.1,
            text_width(&heading.text, Face::Bold, heading.size),
            heading.size,
            LayoutElement::Text(TextElement {
                fragments: vec![Fragment { text: heading.text.clone(), face: Face::Bold }],
                size: heading.size,
                color: heading.color,
                word_spacing: 0.0,
            }),
        );
        cursor.y += band + heading.space_after;
    }

    fn layout_paragraph(&self, cursor: &mut Cursor, paragraph: &Paragraph) {
        let style = &paragraph.style;
        let measure = self.content.width;
        let lines = wrap(&paragraph.spans, style.size, measure);
        if lines.is_empty() {
            return;
        }
        if !cursor.fresh {
            cursor.y += style.space_before;
        }
        let half_leading = (style.leading - style.size) / 2.0;
        let last = lines.len() - 1;
        for (i, line) in lines.into_iter().enumerate() {
            if !cursor.fits(style.leading) && !cursor.fresh {
                cursor.new_page();
            }
            let (x, word_spacing) = match style.align {
                Align::Left => (self.content.x, 0.0),
                Align::Center => (self.content.x + (measure - line.width).max(0.0) / 2.0, 0.0),
                Align::Justify if i < last => (self.content.x, line.justify_spacing(measure)),
                Align::Justify => (self.content.x, 0.0),
            };
            let width = line.width + word_spacing * line.spaces as f32;
            cursor.place(
                x,
                cursor.y + half_leading,
                width,
                style.size,
                LayoutElement::Text(TextElement {
                    fragments: line.fragments,
                    size: style.size,
                    color: style.color,
                    word_spacing,
                }),
            );
            cursor.y += style.leading;
        }
        cursor.y += style.space_after;
    }

    fn layout_table(&self, cursor: &mut Cursor, table: &KeyValueTable) {
        let (label_width, value_width) = table.column_widths;
        let total = label_width + value_width;
        let left = self.content.x + (self.content.width - total).max(0.0) / 2.0;
        let row_height = table.size + 2.0 * table.padding;
        let mut first_on_page = true;

        for row in &table.rows {
            if !cursor.fits(row_height) && !cursor.fresh {
                cursor.new_page();
                first_on_page = true;
            }
            let top = cursor.y;
            let bottom = top + row_height;
            let face = Face::from_bold(row.emphasized);

            let grid = LayoutElement::Rule { stroke: table.grid_color, line_width: 0.5 };
            if first_on_page {
                cursor.place(left, top, total, 0.0, grid.clone());
            }
            cursor.place(left, bottom, total, 0.0, grid.clone());
            for x in [left, left + label_width, left + total] {
                cursor.place(x, top, 0.0, row_height, grid.clone());
            }

            let text_top = top + table.padding;
            let label = text_element(&row.label, face, table);
            let label_width = text_width(&row.label, face, table.size);
            cursor.place(left + 6.0, text_top, label_width, table.size, label);
            let value_w = text_width(&row.value, face, table.size);
            let value = text_element(&row.value, face, table);
            cursor.place(left + total - 6.0 - value_w, text_top, value_w, table.size, value);

            if row.emphasized {
                cursor.place(left, bottom, total, 0.0, LayoutElement::Rule {
                    stroke: table.rule_color,
                    line_width: 2.0,
                });
            }
            cursor.y = bottom;
            first_on_page = false;
        }
    }

    fn layout_image(&self, cursor: &mut Cursor, block: &ImageBlock) {
        if !cursor.fits(block.height) && !cursor.fresh {
            cursor.new_page();
        }
        // Never draw past the content box, even for oversized images.
        let scale = (self.content.width / block.width)
            .min(self.content.height / block.height)
            .min(1.0);
        let (width, height) = (block.width * scale, block.height * scale);
        let x = self.content.x + (self.content.width - width) / 2.0;
        cursor.place(x, cursor.y, width, height, LayoutElement::Image(Arc::clone(&block.image)));
        cursor.y += height;
    }
}

fn text_element(text: &str, face: Face, table: &KeyValueTable) -> LayoutElement {
    LayoutElement::Text(TextElement {
        fragments: vec![Fragment { text: text.to_string(), face }],
        size: table.size,
        color: table.text_color,
        word_spacing: 0.0,
    })
}

struct Cursor {
    content: Rect,
    pages: Vec<Vec<PositionedElement>>,
    y: f32,
    /// Nothing has been placed on the current page yet.
    fresh: bool,
}

impl Cursor {
    fn new(content: Rect) -> Self {
        Self { content, pages: vec![Vec::new()], y: content.y, fresh: true }
    }

    fn fits(&self, height: f32) -> bool {
        self.y + height <= self.content.bottom() + 0.01
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.y = self.content.y;
        self.fresh = true;
    }

    /// The laid-out pages without trailing blank ones; an empty story still
    /// yields one page.
    fn finish(mut self) -> Vec<Vec<PositionedElement>> {
        while self.pages.len() > 1 && self.pages.last().is_some_and(Vec::is_empty) {
            self.pages.pop();
        }
        self.pages
    }

    fn place(&mut self, x: f32, y: f32, width: f32, height: f32, element: LayoutElement) {
        if let Some(page) = self.pages.last_mut() {
            page.push(PositionedElement { x, y, width, height, element });
        }
        self.fresh = false;
    }
}
