//! Yearly return schedule drawn as a table image.

use crate::artifact::{ImageArtifact, artifact_path};
use crate::error::GraphicsError;
use crate::raster::{RasterOptions, rasterize_svg};
use crate::svg::{Anchor, SvgCanvas, TextStyle};
use itertools::Itertools;
use std::fs;
use std::path::Path;
use sunquote_finance::format_currency;
use sunquote_types::geometry::cm_to_px;
use sunquote_types::{Color, YearlyReturn};

/// Physical table size in centimetres.
pub const TABLE_SIZE_CM: (f32, f32) = (16.0, 18.0);

const WIDTH: f32 = 1600.0;
const HEIGHT: f32 = 1800.0;
const HEADER_HEIGHT: f32 = 110.0;
/// Row slots reserved for a full 25-year schedule; longer schedules shrink rows.
const ROW_SLOTS: usize = 25;
const CELL_PADDING: f32 = 24.0;

/// Column boundaries, left to right.
const COLUMN_EDGES: [f32; 5] = [0.0, 200.0, 660.0, 1130.0, 1600.0];

/// Column headings.
#[derive(Debug, Clone, PartialEq)]
pub struct TableLabels {
    pub year: String,
    pub balance: String,
    pub monthly_saving: String,
    pub annual_saving: String,
}

impl Default for TableLabels {
    fn default() -> Self {
        Self {
            year: "Ano".to_string(),
            balance: "Saldo".to_string(),
            monthly_saving: "Economia média mensal".to_string(),
            annual_saving: "Economia anual".to_string(),
        }
    }
}

impl TableLabels {
    fn headings(&self) -> [&str; 4] {
        [&self.year, &self.balance, &self.monthly_saving, &self.annual_saving]
    }
}

/// Builds the table SVG. An empty schedule yields the header row alone.
pub fn return_table_svg(
    returns: &[YearlyReturn],
    labels: &TableLabels,
    options: &RasterOptions,
) -> String {
    let palette = &options.palette;
    let row_height = (HEIGHT - HEADER_HEIGHT) / returns.len().max(ROW_SLOTS) as f32;
    let text_size = (row_height * 0.42).min(30.0);

    let mut canvas = SvgCanvas::new(WIDTH, HEIGHT, &options.font_family);
    canvas.rect(0.0, 0.0, WIDTH, HEIGHT, Color::WHITE);

    canvas.rect(0.0, 0.0, WIDTH, HEADER_HEIGHT, palette.primary);
    for ((left, right), heading) in COLUMN_EDGES.iter().tuple_windows().zip(labels.headings()) {
        canvas.text(
            (left + right) / 2.0,
            HEADER_HEIGHT / 2.0 + 11.0,
            heading,
            TextStyle::new(32.0, Color::WHITE).bold().anchored(Anchor::Middle),
        );
    }

    for (i, entry) in returns.iter().enumerate() {
        let top = HEADER_HEIGHT + row_height * i as f32;
        let baseline = top + row_height / 2.0 + text_size * 0.35;
        let shade = if i % 2 == 0 { palette.surface } else { Color::WHITE };
        let balance_color = if entry.balance < 0.0 { palette.warning } else { palette.accent };

        canvas.begin_group("data-row");
        canvas.rect(0.0, top, WIDTH, row_height, shade);
        let cells = [
            (entry.year.to_string(), palette.primary, false),
            (format_currency(entry.balance), balance_color, true),
            (format_currency(entry.monthly_saving), palette.primary, false),
            (format_currency(entry.annual_saving), palette.primary, false),
        ];
        for (column, (content, color, bold)) in cells.into_iter().enumerate() {
            let style = TextStyle::new(text_size, color);
            let style = if bold { style.bold() } else { style };
            if column == 0 {
                let center = (COLUMN_EDGES[0] + COLUMN_EDGES[1]) / 2.0;
                canvas.text(center, baseline, &content, style.anchored(Anchor::Middle));
            } else {
                let right = COLUMN_EDGES[column + 1] - CELL_PADDING;
                canvas.text(right, baseline, &content, style.anchored(Anchor::End));
            }
        }
        canvas.end_group();
    }

    let body_bottom = HEADER_HEIGHT + row_height * returns.len() as f32;
    for edge in &COLUMN_EDGES[1..COLUMN_EDGES.len() - 1] {
        canvas.line((*edge, HEADER_HEIGHT), (*edge, body_bottom), palette.muted, 1.5);
    }
    canvas.outline(1.0, 1.0, WIDTH - 2.0, body_bottom - 1.0, palette.primary, 2.0);

    canvas.finish()
}

/// Renders the table to a new PNG inside `dir`.
pub fn render_return_table(
    returns: &[YearlyReturn],
    dir: &Path,
    labels: &TableLabels,
    options: &RasterOptions,
) -> Result<ImageArtifact, GraphicsError> {
    let svg = return_table_svg(returns, labels, options);
    let (width_px, height_px) =
        (cm_to_px(TABLE_SIZE_CM.0, options.dpi), cm_to_px(TABLE_SIZE_CM.1, options.dpi));
    let png = rasterize_svg(&svg, width_px, height_px)?;

    let path = artifact_path(dir, "return_table");
    fs::write(&path, png)?;
    log::debug!("Wrote return table ({} rows) to {}", returns.len(), path.display());

    Ok(ImageArtifact { path, width_px, height_px })
}
