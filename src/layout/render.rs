use super::{justify, measure, pack, tokenize, Alignment, Line, StyledSegment};
use crate::surface::{FontGuard, StyleFonts, Surface};
use crate::{Error, Pt};
use std::ops::Range;

/// A drawing position in flow coordinates (`y` grows down the page)
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Cursor {
    pub x: Pt,
    pub y: Pt,
}

impl Cursor {
    pub fn new(x: Pt, y: Pt) -> Cursor {
        Cursor { x, y }
    }
}

/// How a paragraph's lines are spaced and aligned
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ParagraphStyle {
    /// Vertical distance between the tops of consecutive lines
    pub line_height: Pt,
    pub alignment: Alignment,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        ParagraphStyle {
            line_height: Pt(14.0),
            alignment: Alignment::Justify,
        }
    }
}

impl ParagraphStyle {
    pub fn with_line_height<D: Into<Pt>>(mut self, line_height: D) -> ParagraphStyle {
        self.line_height = line_height.into();
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> ParagraphStyle {
        self.alignment = alignment;
        self
    }
}

/// A paragraph that has been broken into lines but not drawn yet
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub lines: Vec<Line>,
    pub target_width: Pt,
}

impl Paragraph {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Vertical space the whole paragraph takes up
    pub fn height(&self, style: &ParagraphStyle) -> Pt {
        style.line_height * self.lines.len() as f32
    }

    /// Draw a run of this paragraph's lines starting at `start`, one line height
    /// apart. Every line starts at `start.x`. Only the paragraph's final line is
    /// left unjustified, so a paragraph drawn in several runs (across a page
    /// break, say) looks the same as one drawn in a single go.
    ///
    /// Returns the cursor below the last line drawn.
    pub fn render_lines<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        fonts: &StyleFonts<S::Font>,
        lines: Range<usize>,
        style: &ParagraphStyle,
        start: Cursor,
    ) -> Result<Cursor, Error> {
        let mut cursor = start;
        let end = lines.end.min(self.lines.len());
        let last = self.lines.len().saturating_sub(1);

        for index in lines.start..end {
            cursor.x = start.x;
            let is_last_line = index == last || style.alignment == Alignment::Left;
            for item in justify(&self.lines[index], self.target_width, is_last_line) {
                if item.is_whitespace {
                    continue;
                }
                let mut guard = FontGuard::switch(surface, fonts.resolve(item.emphasis))?;
                guard.draw_text(&item.text, cursor.x + item.x, cursor.y)?;
            }
            cursor.y += style.line_height;
        }

        cursor.x = start.x;
        Ok(cursor)
    }
}

/// Tokenize, measure and pack a paragraph into lines no wider than
/// `target_width`, without drawing anything
pub fn layout_paragraph<S: Surface + ?Sized>(
    surface: &mut S,
    fonts: &StyleFonts<S::Font>,
    segments: &[StyledSegment],
    target_width: Pt,
) -> Result<Paragraph, Error> {
    let tokens = tokenize(segments);
    let lines = pack(tokens, target_width, |text, emphasis| {
        measure(surface, fonts, text, emphasis)
    })?;
    Ok(Paragraph {
        lines,
        target_width,
    })
}

/// Lay out and draw a paragraph with its first line at `start`.
///
/// Lines are justified to `target_width` except for the last one. Page breaks
/// are not considered here: the returned cursor sits one line height below the
/// last line, and it is up to the caller to decide whether the next paragraph
/// still fits on the page. An empty paragraph draws nothing and returns `start`.
pub fn render_paragraph<S: Surface + ?Sized>(
    surface: &mut S,
    fonts: &StyleFonts<S::Font>,
    segments: &[StyledSegment],
    target_width: Pt,
    style: &ParagraphStyle,
    start: Cursor,
) -> Result<Cursor, Error> {
    let paragraph = layout_paragraph(surface, fonts, segments, target_width)?;
    paragraph.render_lines(surface, fonts, 0..paragraph.len(), style, start)
}
