//! Styled text runs and greedy line breaking.

use crate::fonts::{Face, text_width};

/// A run of text in a single face.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub face: Face,
}

impl Span {
    pub fn regular(text: impl Into<String>) -> Self {
        Self { text: text.into(), face: Face::Regular }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self { text: text.into(), face: Face::Bold }
    }
}

/// A piece of a laid-out line. Inter-word spaces are kept inside the text so
/// PDF word spacing can stretch them.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub text: String,
    pub face: Face,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub fragments: Vec<Fragment>,
    /// Width at the natural word spacing.
    pub width: f32,
    pub spaces: usize,
}

impl Line {
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }

    /// Extra spacing per space that stretches the line to `target` width.
    pub fn justify_spacing(&self, target: f32) -> f32 {
        if self.spaces == 0 || self.width >= target {
            0.0
        } else {
            (target - self.width) / self.spaces as f32
        }
    }

    fn push(&mut self, text: &str, face: Face, size: f32) {
        self.width += text_width(text, face, size);
        self.spaces += text.matches(' ').count();
        match self.fragments.last_mut() {
            Some(last) if last.face == face => last.text.push_str(text),
            _ => self.fragments.push(Fragment { text: text.to_string(), face }),
        }
    }
}

// A word may straddle spans, e.g. a bold label glued to punctuation.
type Word = Vec<(String, Face)>;

fn split_words(spans: &[Span]) -> Vec<Word> {
    let mut words = Vec::new();
    let mut current: Word = Vec::new();
    for span in spans {
        let mut piece = String::new();
        for c in span.text.chars() {
            if c.is_whitespace() {
                if !piece.is_empty() {
                    current.push((std::mem::take(&mut piece), span.face));
                }
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            } else {
                piece.push(c);
            }
        }
        if !piece.is_empty() {
            current.push((piece, span.face));
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn word_width(word: &Word, size: f32) -> f32 {
    word.iter().map(|(text, face)| text_width(text, *face, size)).sum()
}

/// Breaks `spans` into lines no wider than `max_width`, collapsing runs of
/// whitespace. A single word wider than the measure gets a line of its own.
pub fn wrap(spans: &[Span], size: f32, max_width: f32) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut line = Line { fragments: Vec::new(), width: 0.0, spaces: 0 };

    for word in split_words(spans) {
        let width = word_width(&word, size);
        if !line.fragments.is_empty() {
            // The joining space takes the face of the text before it.
            let space_face = line.fragments.last().map_or(Face::Regular, |f| f.face);
            let space = text_width(" ", space_face, size);
            if line.width + space + width <= max_width {
                line.push(" ", space_face, size);
            } else {
                lines.push(std::mem::replace(
                    &mut line,
                    Line { fragments: Vec::new(), width: 0.0, spaces: 0 },
                ));
            }
        }
        for (text, face) in &word {
            line.push(text, *face, size);
        }
    }
    if !line.fragments.is_empty() {
        lines.push(line);
    }
    lines
}
