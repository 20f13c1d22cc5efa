//! Monthly production bar chart.

use crate::artifact::{ImageArtifact, artifact_path};
use crate::error::GraphicsError;
use crate::raster::{RasterOptions, rasterize_svg};
use crate::svg::{Anchor, SvgCanvas, TextStyle};
use std::fs;
use std::path::Path;
use sunquote_finance::{format_kwh, format_number};
use sunquote_types::geometry::cm_to_px;
use sunquote_types::{Color, MonthKey, MonthlyProduction};

/// Physical chart size in centimetres.
pub const CHART_SIZE_CM: (f32, f32) = (16.0, 8.0);

// Logical canvas: 100 units per centimetre.
const WIDTH: f32 = 1600.0;
const HEIGHT: f32 = 800.0;
const PLOT_LEFT: f32 = 130.0;
const PLOT_RIGHT: f32 = 1560.0;
const PLOT_TOP: f32 = 170.0;
const PLOT_BOTTOM: f32 = 700.0;

/// Labels drawn on the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLabels {
    pub title: String,
    /// `{modules}` is replaced with the module quantity.
    pub subtitle: String,
    pub axis: String,
    pub average: String,
}

impl Default for ChartLabels {
    fn default() -> Self {
        Self {
            title: "Produção mensal estimada".to_string(),
            subtitle: "Sistema com {modules} módulos fotovoltaicos".to_string(),
            axis: "Mês".to_string(),
            average: "Média".to_string(),
        }
    }
}

/// Builds the chart SVG. Fails on an empty series.
pub fn production_chart_svg(
    months: &[MonthlyProduction],
    module_quantity: u32,
    labels: &ChartLabels,
    options: &RasterOptions,
) -> Result<String, GraphicsError> {
    if months.is_empty() {
        return Err(GraphicsError::EmptyProduction);
    }
    let palette = &options.palette;

    let bars: Vec<&MonthlyProduction> = months.iter().filter(|m| !m.month.is_average()).collect();
    let average = months.iter().find(|m| m.month.is_average());

    let peak = months.iter().map(|m| m.generation_kwh).fold(0.0_f64, f64::max);
    let (axis_max, step) = value_axis(peak);
    let y_of = |value: f64| -> f32 {
        PLOT_BOTTOM - (value / axis_max) as f32 * (PLOT_BOTTOM - PLOT_TOP)
    };

    let mut canvas = SvgCanvas::new(WIDTH, HEIGHT, &options.font_family);
    canvas.rect(0.0, 0.0, WIDTH, HEIGHT, Color::WHITE);

    canvas.text(
        WIDTH / 2.0,
        60.0,
        &labels.title,
        TextStyle::new(44.0, palette.primary).bold().anchored(Anchor::Middle),
    );
    canvas.text(
        WIDTH / 2.0,
        110.0,
        &labels.subtitle.replace("{modules}", &module_quantity.to_string()),
        TextStyle::new(30.0, palette.muted).anchored(Anchor::Middle),
    );

    // Value grid.
    let mut tick = 0.0;
    while tick <= axis_max + step / 2.0 {
        let y = y_of(tick);
        canvas.line((PLOT_LEFT, y), (PLOT_RIGHT, y), palette.surface, 2.0);
        canvas.text(
            PLOT_LEFT - 14.0,
            y + 9.0,
            &format_number(tick, 0),
            TextStyle::new(24.0, palette.muted).anchored(Anchor::End),
        );
        tick += step;
    }
    canvas.line((PLOT_LEFT, PLOT_BOTTOM), (PLOT_RIGHT, PLOT_BOTTOM), palette.muted, 3.0);

    if !bars.is_empty() {
        let slot = (PLOT_RIGHT - PLOT_LEFT) / bars.len() as f32;
        let bar_width = slot * 0.6;
        for (i, entry) in bars.iter().enumerate() {
            let center = PLOT_LEFT + slot * (i as f32 + 0.5);
            let top = y_of(entry.generation_kwh);
            canvas.begin_group("bar");
            let height = PLOT_BOTTOM - top;
            canvas.rect(center - bar_width / 2.0, top, bar_width, height, palette.accent);
            canvas.text(
                center,
                top - 10.0,
                &format_number(entry.generation_kwh, 0),
                TextStyle::new(22.0, palette.primary).anchored(Anchor::Middle),
            );
            canvas.text(
                center,
                PLOT_BOTTOM + 36.0,
                &month_label(entry.month),
                TextStyle::new(26.0, palette.primary).anchored(Anchor::Middle),
            );
            canvas.end_group();
        }
    }

    canvas.text(
        (PLOT_LEFT + PLOT_RIGHT) / 2.0,
        PLOT_BOTTOM + 82.0,
        &labels.axis,
        TextStyle::new(26.0, palette.muted).anchored(Anchor::Middle),
    );

    if let Some(average) = average {
        let y = y_of(average.generation_kwh);
        canvas.begin_group("average");
        canvas.dashed_line((PLOT_LEFT, y), (PLOT_RIGHT, y), palette.warning, 5.0, (18.0, 10.0));
        canvas.text(
            PLOT_RIGHT,
            y - 12.0,
            &format!("{}: {}", labels.average, format_kwh(average.generation_kwh)),
            TextStyle::new(26.0, palette.warning).bold().anchored(Anchor::End),
        );
        canvas.end_group();
    }

    Ok(canvas.finish())
}

/// Renders the chart to a new PNG inside `dir`.
///
/// An empty series is rejected before anything is written.
pub fn render_production_chart(
    months: &[MonthlyProduction],
    module_quantity: u32,
    dir: &Path,
    labels: &ChartLabels,
    options: &RasterOptions,
) -> Result<ImageArtifact, GraphicsError> {
    let svg = production_chart_svg(months, module_quantity, labels, options)?;
    let (width_px, height_px) =
        (cm_to_px(CHART_SIZE_CM.0, options.dpi), cm_to_px(CHART_SIZE_CM.1, options.dpi));
    let png = rasterize_svg(&svg, width_px, height_px)?;

    let path = artifact_path(dir, "production_chart");
    fs::write(&path, png)?;
    log::debug!("Wrote production chart ({} months) to {}", months.len(), path.display());

    Ok(ImageArtifact { path, width_px, height_px })
}

fn month_label(month: MonthKey) -> String {
    match month {
        MonthKey::Month(m) => m.to_string(),
        MonthKey::Average => String::new(),
    }
}

/// Upper bound and tick step for the value axis, with some headroom above
/// the tallest bar for its label.
fn value_axis(peak: f64) -> (f64, f64) {
    if peak <= 0.0 {
        return (1.0, 0.25);
    }
    let step = nice_step(peak * 1.15 / 5.0);
    ((peak * 1.15 / step).ceil() * step, step)
}

fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}
