//! A minimal SVG writer for the fixed-layout graphics.
//!
//! Coordinates are logical units with the origin at the top-left corner;
//! the rasterizer scales them to the requested pixel size.

use std::fmt::Write;
use sunquote_types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// Text appearance for [`SvgCanvas::text`].
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub size: f32,
    pub color: Color,
    pub bold: bool,
    pub anchor: Anchor,
}

impl TextStyle {
    pub fn new(size: f32, color: Color) -> Self {
        Self { size, color, bold: false, anchor: Anchor::Start }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }
}

pub struct SvgCanvas {
    width: f32,
    height: f32,
    font_family: String,
    body: String,
}

impl SvgCanvas {
    pub fn new(width: f32, height: f32, font_family: &str) -> Self {
        Self { width, height, font_family: font_family.to_string(), body: String::new() }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, fill: Color) {
        let _ = writeln!(
            self.body,
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
            x,
            y,
            w,
            h,
            fill.to_hex()
        );
    }

    pub fn outline(&mut self, x: f32, y: f32, w: f32, h: f32, stroke: Color, stroke_width: f32) {
        let _ = writeln!(
            self.body,
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="{}" stroke-width="{:.1}"/>"#,
            x,
            y,
            w,
            h,
            stroke.to_hex(),
            stroke_width
        );
    }

    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), stroke: Color, stroke_width: f32) {
        self.stroked_line(from, to, stroke, stroke_width, None);
    }

    pub fn dashed_line(
        &mut self,
        from: (f32, f32),
        to: (f32, f32),
        stroke: Color,
        stroke_width: f32,
        dash: (f32, f32),
    ) {
        self.stroked_line(from, to, stroke, stroke_width, Some(dash));
    }

    fn stroked_line(
        &mut self,
        from: (f32, f32),
        to: (f32, f32),
        stroke: Color,
        stroke_width: f32,
        dash: Option<(f32, f32)>,
    ) {
        let dash_attr = dash
            .map(|(on, off)| format!(r#" stroke-dasharray="{:.1} {:.1}""#, on, off))
            .unwrap_or_default();
        let _ = writeln!(
            self.body,
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{:.1}"{}/>"#,
            from.0,
            from.1,
            to.0,
            to.1,
            stroke.to_hex(),
            stroke_width,
            dash_attr
        );
    }

    /// Draws `content` with its baseline at `y`.
    pub fn text(&mut self, x: f32, y: f32, content: &str, style: TextStyle) {
        let _ = writeln!(
            self.body,
            r#"<text x="{:.1}" y="{:.1}" font-size="{:.1}" font-weight="{}" fill="{}" text-anchor="{}">{}</text>"#,
            x,
            y,
            style.size,
            if style.bold { "bold" } else { "normal" },
            style.color.to_hex(),
            style.anchor.as_str(),
            escape_xml(content)
        );
    }

    /// Opens a group tagged with `class`, so tests and tools can find it.
    pub fn begin_group(&mut self, class: &str) {
        let _ = writeln!(self.body, r#"<g class="{}">"#, escape_xml(class));
    }

    pub fn end_group(&mut self) {
        self.body.push_str("</g>\n");
    }

    pub fn finish(self) -> String {
        format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" "#,
                r#"viewBox="0 0 {w:.0} {h:.0}" font-family="{font}">"#,
                "\n{body}</svg>\n"
            ),
            w = self.width,
            h = self.height,
            font = escape_xml(&self.font_family),
            body = self.body
        )
    }
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
