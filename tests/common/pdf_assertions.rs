use lopdf::Document as LopdfDocument;
use lopdf::content::Content;
use std::collections::BTreeSet;
use sunquote_render_pdf::fonts::from_win_ansi;

/// Text shown on one page, one line per text object.
pub fn page_lines(doc: &LopdfDocument, page_num: u32) -> Vec<String> {
    let Some(page_id) = doc.get_pages().get(&page_num).copied() else {
        return Vec::new();
    };
    let Ok(raw) = doc.get_page_content(page_id) else {
        return Vec::new();
    };
    let Ok(content) = Content::decode(&raw) else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    let mut current = String::new();
    for op in &content.operations {
        match op.operator.as_str() {
            "Tj" => {
                if let Some(Ok(bytes)) = op.operands.first().map(|o| o.as_str()) {
                    current.push_str(&from_win_ansi(bytes));
                }
            }
            "ET" => lines.push(std::mem::take(&mut current)),
            _ => {}
        }
    }
    lines
}

/// Extract all text content from a PDF document, lines joined by spaces so
/// wrapped sentences read as written.
pub fn extract_text(doc: &LopdfDocument) -> String {
    let pages = doc.get_pages().len() as u32;
    (1..=pages)
        .flat_map(|page| page_lines(doc, page))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Base font names referenced by any Font dictionary.
pub fn extract_font_names(doc: &LopdfDocument) -> Vec<String> {
    let mut fonts = BTreeSet::new();
    for object in doc.objects.values() {
        if let Ok(dict) = object.as_dict() {
            let is_font =
                dict.get(b"Type").and_then(|t| t.as_name()).ok() == Some(b"Font".as_slice());
            let base_font = dict.get(b"BaseFont").and_then(|b| b.as_name());
            if let (true, Ok(base_font)) = (is_font, base_font) {
                fonts.insert(String::from_utf8_lossy(base_font).to_string());
            }
        }
    }
    fonts.into_iter().collect()
}

/// Number of image XObjects in the document.
pub fn count_images(doc: &LopdfDocument) -> usize {
    doc.objects
        .values()
        .filter_map(|object| object.as_stream().ok())
        .filter(|stream| {
            stream.dict.get(b"Subtype").and_then(|s| s.as_name()).ok() == Some(b"Image".as_slice())
        })
        .count()
}

/// Page size in points from the MediaBox.
pub fn get_page_dimensions(doc: &LopdfDocument, page_num: u32) -> Option<(f32, f32)> {
    let page_id = doc.get_pages().get(&page_num).copied()?;
    let page = doc.get_object(page_id).ok()?.as_dict().ok()?;
    let media_box = page.get(b"MediaBox").ok()?.as_array().ok()?;
    let value = |i: usize| media_box.get(i).and_then(|o| o.as_float().ok());
    Some((value(2)? - value(0)?, value(3)? - value(1)?))
}

/// Assert that PDF contains specific text
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            extracted.contains($text),
            "PDF should contain '{}', but extracted text was:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert that PDF does NOT contain specific text
#[macro_export]
macro_rules! assert_pdf_not_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            !extracted.contains($text),
            "PDF should NOT contain '{}', but it was found in:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert the number of pages in a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}

/// Assert minimum number of pages
#[macro_export]
macro_rules! assert_pdf_min_pages {
    ($pdf:expr, $min:expr) => {
        assert!(
            $pdf.page_count() >= $min,
            "Expected at least {} pages, got {}",
            $min,
            $pdf.page_count()
        );
    };
}

/// Assert that PDF contains a font matching a pattern
#[macro_export]
macro_rules! assert_pdf_has_font {
    ($pdf:expr, $pattern:expr) => {
        let fonts = $crate::common::pdf_assertions::extract_font_names(&$pdf.doc);
        assert!(
            fonts.iter().any(|f| f.contains($pattern)),
            "PDF should contain font matching '{}', fonts found: {:?}",
            $pattern,
            fonts
        );
    };
}

/// Assert the size of a page in points
#[macro_export]
macro_rules! assert_pdf_page_size {
    ($pdf:expr, $page:expr, $width:expr, $height:expr) => {
        let (w, h) = $crate::common::pdf_assertions::get_page_dimensions(&$pdf.doc, $page)
            .expect("page should have a MediaBox");
        assert!(
            (w - $width).abs() < 1.0 && (h - $height).abs() < 1.0,
            "Expected page {} to be {}x{}, got {}x{}",
            $page,
            $width,
            $height,
            w,
            h
        );
    };
}
