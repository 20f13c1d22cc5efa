//! Assembles the proposal document: a fixed sequence of sections built from
//! the input, the derived summary, the content templates and the two
//! rendered images.

use crate::content::{ContentTemplates, EquipmentText, ListItem, ListSection, TextSection};
use crate::error::ComposeError;
use crate::images::RasterImage;
use crate::layout::{
    Align, Block, Heading, ImageBlock, KeyValueTable, LaidOutDocument, LayoutEngine, Paragraph,
    ParagraphStyle, TableRow,
};
use crate::text::Span;
use crate::writer::{DocumentInfo, write_pdf};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use sunquote_finance::{DerivedSummary, Payback, format_currency};
use sunquote_types::geometry::cm;
use sunquote_types::{Color, InverterSpec, Margins, ModuleSpec, Palette, ProposalInput, Size};

/// Physical size the production chart is placed at.
pub const CHART_PLACEMENT_CM: (f32, f32) = (16.0, 8.0);
/// Physical size the return table is placed at.
pub const TABLE_PLACEMENT_CM: (f32, f32) = (16.0, 18.0);

/// Page and metadata settings for generated documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentSettings {
    pub title: String,
    pub author: String,
    /// Written to the document info when set. Leave unset for
    /// reproducible output.
    pub creation_date: Option<DateTime<Utc>>,
    pub margins_cm: f32,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            title: "Proposta Comercial".to_string(),
            author: "Level5 Engenharia Elétrica".to_string(),
            creation_date: None,
            margins_cm: 2.0,
        }
    }
}

/// Image files to embed. Either may be absent or missing on disk; the
/// matching block is then left out.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProposalImages<'a> {
    pub production_chart: Option<&'a Path>,
    pub return_table: Option<&'a Path>,
}

/// Decoded images, ready for layout.
#[derive(Debug, Clone, Default)]
pub struct LoadedImages {
    pub production_chart: Option<Arc<RasterImage>>,
    pub return_table: Option<Arc<RasterImage>>,
}

impl LoadedImages {
    /// Loads each image independently; a failure only drops that image.
    pub fn load(images: &ProposalImages<'_>) -> Self {
        Self {
            production_chart: load_optional(images.production_chart, "production chart"),
            return_table: load_optional(images.return_table, "return table"),
        }
    }
}

fn load_optional(path: Option<&Path>, what: &str) -> Option<Arc<RasterImage>> {
    let Some(path) = path else {
        log::debug!("No {} supplied; omitting it", what);
        return None;
    };
    if !path.exists() {
        log::warn!("The {} image {} does not exist; omitting it", what, path.display());
        return None;
    }
    match RasterImage::open(path) {
        Ok(image) => Some(Arc::new(image)),
        Err(e) => {
            log::warn!(
                "Could not decode the {} image {}: {}; omitting it",
                what,
                path.display(),
                e
            );
            None
        }
    }
}

/// The `• <qty> Módulos Fotovoltaicos <power>W <kind> <brand>` equipment line.
pub fn module_line(module: &ModuleSpec, text: &EquipmentText) -> String {
    format!(
        "• {} {} {}W {} {}{}",
        module.quantity,
        text.module_description,
        module.power_w,
        module.kind,
        module.brand,
        text.module_suffix
    )
}

/// The inverter equipment line. The quantity is zero-padded to two digits
/// and the features clause only appears when there are features.
pub fn inverter_line(inverter: &InverterSpec, text: &EquipmentText) -> String {
    let noun = if inverter.quantity > 1 { &text.inverter_plural } else { &text.inverter_singular };
    let features = inverter
        .features()
        .map(|f| format!(" {} {}", text.features_joiner, f))
        .unwrap_or_default();
    format!(
        "• {:02} {} {} {:.2} kW, {} {}{}",
        inverter.quantity,
        noun,
        text.inverter_description,
        inverter.power_kw,
        text.manufacturer,
        inverter.brand,
        features
    )
}

pub struct ProposalComposer<'a> {
    content: &'a ContentTemplates,
    settings: &'a DocumentSettings,
    palette: Palette,
}

impl<'a> ProposalComposer<'a> {
    pub fn new(content: &'a ContentTemplates, settings: &'a DocumentSettings) -> Self {
        Self { content, settings, palette: Palette::default() }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Composes the full document and returns the PDF bytes.
    ///
    /// Missing or unreadable images are logged and left out; they never fail
    /// the document. The image files are not deleted.
    pub fn compose(
        &self,
        input: &ProposalInput,
        summary: &DerivedSummary,
        images: &ProposalImages<'_>,
    ) -> Result<Vec<u8>, ComposeError> {
        let loaded = LoadedImages::load(images);
        let document = self.layout(input, summary, &loaded);
        let info = DocumentInfo {
            title: format!("{} - {}", self.settings.title, input.client.name),
            author: self.settings.author.clone(),
            creation_date: self.settings.creation_date,
        };
        write_pdf(&document, Size::a4(), &info)
    }

    pub fn layout(
        &self,
        input: &ProposalInput,
        summary: &DerivedSummary,
        images: &LoadedImages,
    ) -> LaidOutDocument {
        let engine = LayoutEngine::new(Size::a4(), Margins::uniform(cm(self.settings.margins_cm)));
        engine.layout(&self.story(input, summary, images))
    }

    /// The ordered blocks of the document.
    pub fn story(
        &self,
        input: &ProposalInput,
        summary: &DerivedSummary,
        images: &LoadedImages,
    ) -> Vec<Block> {
        let mut story = Vec::new();
        self.cover(&mut story, input);
        self.company_and_equipment(&mut story, input);
        self.commercial_terms(&mut story, input, summary);
        self.cost_benefit(&mut story, summary, images);
        story
    }

    fn cover(&self, story: &mut Vec<Block>, input: &ProposalInput) {
        let p = &self.palette;
        let title = self.title_style(28.0, p.primary, Align::Center, 20.0);
        story.push(Block::Spacer(cm(3.0)));
        story.push(paragraph(vec![Span::bold(&self.content.company.name)], title));
        story.push(paragraph(
            vec![Span::regular(&self.content.company.tagline)],
            self.title_style(12.0, p.warning, Align::Center, 50.0),
        ));
        story.push(Block::Spacer(cm(2.0)));
        for line in &self.content.cover.heading {
            story.push(paragraph(vec![Span::bold(line)], title));
        }
        story.push(Block::Spacer(cm(3.0)));
        story.push(paragraph(
            vec![Span::bold(&self.content.cover.client_label)],
            self.title_style(12.0, p.primary, Align::Left, 0.0),
        ));
        let mut client = self.title_style(14.0, p.accent, Align::Left, 0.0);
        client.space_before = 5.0;
        story.push(paragraph(vec![Span::bold(input.client.name.to_uppercase())], client));
        story.push(Block::PageBreak);
    }

    fn company_and_equipment(&self, story: &mut Vec<Block>, input: &ProposalInput) {
        let content = self.content;
        self.text_section(story, &content.about);
        story.push(Block::Spacer(cm(0.5)));
        self.text_section(story, &content.operation);
        story.push(Block::Spacer(cm(0.5)));

        story.push(self.heading(&content.equipment.title));
        let system = &input.system;
        story.push(
            self.body(vec![Span::regular(module_line(&system.modules, &content.equipment))]),
        );
        story.push(
            self.body(vec![Span::regular(inverter_line(&system.inverters, &content.equipment))]),
        );
        story.push(Block::Spacer(cm(0.5)));

        self.list_section(story, &content.warranty);
        story.push(Block::PageBreak);
    }

    fn commercial_terms(
        &self,
        story: &mut Vec<Block>,
        input: &ProposalInput,
        summary: &DerivedSummary,
    ) {
        let content = self.content;
        let investment = &content.investment;
        story.push(self.heading(&investment.title));
        story.push(Block::Table(KeyValueTable {
            rows: vec![
                TableRow {
                    label: investment.kit_label.clone(),
                    value: format_currency(input.investment.kit_cost),
                    emphasized: false,
                },
                TableRow {
                    label: investment.labor_label.clone(),
                    value: format_currency(input.investment.labor_cost),
                    emphasized: false,
                },
                TableRow {
                    label: investment.total_label.clone(),
                    value: format_currency(summary.investment_total),
                    emphasized: true,
                },
            ],
            column_widths: (cm(10.0), cm(5.0)),
            size: 11.0,
            padding: 12.0,
            text_color: self.palette.primary,
            grid_color: self.palette.muted,
            rule_color: self.palette.accent,
        }));
        story.push(Block::Spacer(cm(1.0)));

        self.list_section(story, &content.payment);
        story.push(Block::Spacer(cm(1.0)));
        self.list_section(story, &content.insurance);
        story.push(Block::PageBreak);
    }

    fn cost_benefit(
        &self,
        story: &mut Vec<Block>,
        summary: &DerivedSummary,
        images: &LoadedImages,
    ) {
        let benefit = &self.content.benefit;
        story.push(self.heading(&benefit.title));
        story.push(self.body(vec![Span::regular(&benefit.intro)]));
        if let Some(chart) = &images.production_chart {
            story.push(image_block(chart, CHART_PLACEMENT_CM));
        }
        story.push(Block::Spacer(cm(0.5)));

        let returns = &self.content.returns;
        story.push(self.heading(&returns.title));
        story.push(self.body(vec![Span::regular(&returns.intro)]));
        if let Some(payback) = summary.payback {
            story.push(self.highlight(self.payback_sentence(payback)));
        }
        story.push(self.highlight(self.economy_sentence(summary.economy_25_years)));
        story.push(self.body(vec![Span::regular(&returns.closing)]));
        story.push(Block::Spacer(cm(0.3)));
        if let Some(table) = &images.return_table {
            story.push(image_block(table, TABLE_PLACEMENT_CM));
        }
    }

    /// `• Lucro a partir do <year>º ano: ... <value>`, with the label and the
    /// amount in bold.
    pub fn payback_sentence(&self, payback: Payback) -> Vec<Span> {
        let returns = &self.content.returns;
        let label = returns.payback_label.replace("{year}", &payback.year.to_string());
        highlighted_sentence(&label, &returns.payback_text, payback.value)
    }

    /// `• Retorno significativo em 25 anos: Economia acumulada de <value>`
    pub fn economy_sentence(&self, economy: f64) -> Vec<Span> {
        let returns = &self.content.returns;
        highlighted_sentence(&returns.economy_label, &returns.economy_text, economy)
    }

    fn text_section(&self, story: &mut Vec<Block>, section: &TextSection) {
        story.push(self.heading(&section.title));
        for text in &section.paragraphs {
            story.push(self.body(vec![Span::regular(text)]));
        }
    }

    fn list_section(&self, story: &mut Vec<Block>, section: &ListSection) {
        story.push(self.heading(&section.title));
        if !section.intro.is_empty() {
            story.push(self.body(vec![Span::regular(&section.intro)]));
        }
        for item in &section.items {
            story.push(self.body(bullet(item)));
        }
        if !section.closing.is_empty() {
            story.push(self.body(vec![Span::regular(&section.closing)]));
        }
    }

    fn heading(&self, text: &str) -> Block {
        Block::Heading(Heading {
            text: text.to_string(),
            size: 14.0,
            color: self.palette.accent,
            background: self.palette.surface,
            padding: 8.0,
            space_before: 15.0,
            space_after: 10.0,
        })
    }

    fn body(&self, spans: Vec<Span>) -> Block {
        paragraph(spans, ParagraphStyle {
            size: 10.0,
            leading: 14.0,
            color: Color::BLACK,
            align: Align::Justify,
            space_before: 5.0,
            space_after: 5.0,
        })
    }

    fn highlight(&self, spans: Vec<Span>) -> Block {
        paragraph(spans, ParagraphStyle {
            size: 11.0,
            leading: 13.2,
            color: self.palette.accent,
            align: Align::Left,
            space_before: 10.0,
            space_after: 5.0,
        })
    }

    fn title_style(
        &self,
        size: f32,
        color: Color,
        align: Align,
        space_after: f32,
    ) -> ParagraphStyle {
        ParagraphStyle { size, leading: size * 1.2, color, align, space_before: 0.0, space_after }
    }
}

fn highlighted_sentence(label: &str, text: &str, amount: f64) -> Vec<Span> {
    vec![
        Span::bold(format!("• {}", label)),
        Span::regular(format!(" {} ", text)),
        Span::bold(format_currency(amount)),
    ]
}

fn paragraph(spans: Vec<Span>, style: ParagraphStyle) -> Block {
    Block::Paragraph(Paragraph { spans, style })
}

fn bullet(item: &ListItem) -> Vec<Span> {
    if item.label.is_empty() {
        vec![Span::regular(format!("• {}", item.text))]
    } else {
        vec![
            Span::regular("• "),
            Span::bold(&item.label),
            Span::regular(format!(" {}", item.text)),
        ]
    }
}

fn image_block(image: &Arc<RasterImage>, size_cm: (f32, f32)) -> Block {
    Block::Image(ImageBlock {
        image: Arc::clone(image),
        width: cm(size_cm.0),
        height: cm(size_cm.1),
    })
}
