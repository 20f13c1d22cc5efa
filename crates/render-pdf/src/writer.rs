//! Serializes laid-out pages into a PDF with `lopdf`.
//!
//! Every page shares one resources dictionary holding the two standard
//! fonts and all image XObjects.

use crate::error::ComposeError;
use crate::fonts::{Face, to_win_ansi};
use crate::images::RasterImage;
use crate::layout::{ASCENT, LaidOutDocument, LayoutElement, PositionedElement, TextElement};
use chrono::{DateTime, Datelike, Timelike, Utc};
use flate2::Compression;
use flate2::write::ZlibEncoder;
use itertools::Itertools;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::io::{self, Write};
use std::sync::Arc;
use sunquote_types::{Color, Size};

const PRODUCER: &str = concat!("sunquote ", env!("CARGO_PKG_VERSION"));

/// Metadata written to the document information dictionary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
    /// Omitted when absent, so identical input gives identical bytes.
    pub creation_date: Option<DateTime<Utc>>,
}

/// Writes `document` as a complete PDF file and returns its bytes.
pub fn write_pdf(
    document: &LaidOutDocument,
    page_size: Size,
    info: &DocumentInfo,
) -> Result<Vec<u8>, ComposeError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for face in Face::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(face.resource_name(), font_id);
    }

    let images = ImageRegistry::collect(&mut doc, document)?;
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
        "XObject" => images.resource_dictionary(),
    });

    let mut page_ids: Vec<Object> = Vec::with_capacity(document.pages.len());
    for elements in &document.pages {
        let mut ctx = PageContext::new(page_size.height, &images);
        for el in elements {
            ctx.draw_element(el);
        }
        let content = deflate(&ctx.finish().encode()?)?;
        let content_id =
            doc.add_object(Stream::new(dictionary! { "Filter" => "FlateDecode" }, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), page_size.width.into(), page_size.height.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        page_ids.push(page_id.into());
    }

    let page_count = page_ids.len() as i64;
    doc.objects.insert(
        pages_id,
        dictionary! { "Type" => "Pages", "Kids" => page_ids, "Count" => page_count }.into(),
    );
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(info_dictionary(info));
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    log::debug!("Serialized {} page(s) into {} bytes", page_count, bytes.len());
    Ok(bytes)
}

/// Zlib-compresses a stream body for a `FlateDecode` filter.
fn deflate(bytes: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    encoder.finish()
}

fn info_dictionary(info: &DocumentInfo) -> Dictionary {
    let text = |s: &str| Object::String(to_win_ansi(s), StringFormat::Literal);
    let mut dict = dictionary! {
        "Title" => text(&info.title),
        "Author" => text(&info.author),
        "Producer" => text(PRODUCER),
    };
    if let Some(date) = info.creation_date {
        dict.set("CreationDate", text(&pdf_date(&date)));
    }
    dict
}

/// Formats a timestamp as a PDF date string (`D:YYYYMMDDHHmmSSZ`).
fn pdf_date(date: &DateTime<Utc>) -> String {
    format!(
        "D:{:04}{:02}{:02}{:02}{:02}{:02}Z",
        date.year(),
        date.month(),
        date.day(),
        date.hour(),
        date.minute(),
        date.second()
    )
}

/// Image XObjects, one per distinct image, named `Im1`, `Im2`, ...
struct ImageRegistry {
    entries: Vec<(Arc<RasterImage>, String, ObjectId)>,
}

impl ImageRegistry {
    fn collect(doc: &mut Document, document: &LaidOutDocument) -> io::Result<Self> {
        let mut entries: Vec<(Arc<RasterImage>, String, ObjectId)> = Vec::new();
        let images = document
            .pages
            .iter()
            .flatten()
            .filter_map(|el| match &el.element {
                LayoutElement::Image(image) => Some(image),
                _ => None,
            })
            .unique_by(|image| Arc::as_ptr(image));
        for image in images {
            let stream = Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => image.width as i64,
                    "Height" => image.height as i64,
                    "ColorSpace" => "DeviceRGB",
                    "BitsPerComponent" => 8,
                    "Filter" => "FlateDecode",
                },
                deflate(&image.rgb)?,
            );
            let id = doc.add_object(stream);
            entries.push((Arc::clone(image), format!("Im{}", entries.len() + 1), id));
        }
        Ok(Self { entries })
    }

    fn name_of(&self, image: &Arc<RasterImage>) -> Option<&str> {
        self.entries
            .iter()
            .find(|(known, _, _)| Arc::ptr_eq(known, image))
            .map(|(_, name, _)| name.as_str())
    }

    fn resource_dictionary(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        for (_, name, id) in &self.entries {
            dict.set(name.as_str(), *id);
        }
        dict
    }
}

#[derive(Default, Clone, PartialEq)]
struct PageRenderState {
    font: Option<(Face, f32)>,
    fill_color: Option<Color>,
    word_spacing: f32,
}

struct PageContext<'a> {
    page_height: f32,
    content: Content,
    state: PageRenderState,
    images: &'a ImageRegistry,
}

impl<'a> PageContext<'a> {
    fn new(page_height: f32, images: &'a ImageRegistry) -> Self {
        Self {
            page_height,
            content: Content { operations: vec![] },
            state: PageRenderState::default(),
            images,
        }
    }

    fn finish(self) -> Content {
        self.content
    }

    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn draw_element(&mut self, el: &PositionedElement) {
        match &el.element {
            LayoutElement::Text(text) => self.draw_text(text, el),
            LayoutElement::Rectangle { fill } => {
                self.set_fill_color(*fill);
                let y = self.page_height - (el.y + el.height);
                self.op("re", vec![el.x.into(), y.into(), el.width.into(), el.height.into()]);
                self.op("f", vec![]);
            }
            LayoutElement::Rule { stroke, line_width } => {
                let [r, g, b] = stroke.to_unit_rgb();
                self.op("w", vec![(*line_width).into()]);
                self.op("RG", vec![r.into(), g.into(), b.into()]);
                self.op("m", vec![el.x.into(), (self.page_height - el.y).into()]);
                self.op(
                    "l",
                    vec![(el.x + el.width).into(), (self.page_height - el.y - el.height).into()],
                );
                self.op("S", vec![]);
            }
            LayoutElement::Image(image) => self.draw_image(image, el),
        }
    }

    fn set_font(&mut self, face: Face, size: f32) {
        if self.state.font != Some((face, size)) {
            let font = Object::Name(face.resource_name().as_bytes().to_vec());
            self.op("Tf", vec![font, size.into()]);
            self.state.font = Some((face, size));
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.op("rg", vec![r.into(), g.into(), b.into()]);
            self.state.fill_color = Some(color);
        }
    }

    fn set_word_spacing(&mut self, spacing: f32) {
        if self.state.word_spacing != spacing {
            self.op("Tw", vec![spacing.into()]);
            self.state.word_spacing = spacing;
        }
    }

    fn draw_text(&mut self, text: &TextElement, el: &PositionedElement) {
        if text.fragments.iter().all(|f| f.text.trim().is_empty()) {
            return;
        }
        self.op("BT", vec![]);
        self.set_fill_color(text.color);
        self.set_word_spacing(text.word_spacing);
        let baseline_y = el.y + text.size * ASCENT;
        self.op("Td", vec![el.x.into(), (self.page_height - baseline_y).into()]);
        for fragment in &text.fragments {
            self.set_font(fragment.face, text.size);
            self.op("Tj", vec![Object::String(to_win_ansi(&fragment.text), StringFormat::Literal)]);
        }
        self.op("ET", vec![]);
    }

    fn draw_image(&mut self, image: &Arc<RasterImage>, el: &PositionedElement) {
        let Some(name) = self.images.name_of(image).map(str::to_string) else {
            log::warn!("Image on page was not registered; skipping it");
            return;
        };
        let y = self.page_height - (el.y + el.height);
        self.op("q", vec![]);
        self.op(
            "cm",
            vec![el.width.into(), 0.into(), 0.into(), el.height.into(), el.x.into(), y.into()],
        );
        self.op("Do", vec![Object::Name(name.into_bytes())]);
        self.op("Q", vec![]);
    }
}
