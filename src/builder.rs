//! Flowing paragraphs down pages.
//!
//! The layout engine draws a paragraph wherever it is told to and reports where
//! it stopped. [DocumentBuilder] is the caller that decides where that is: it
//! keeps a cursor on the current page, moves to a new page when the next line
//! would cross the bottom of the content area, and stamps footers on every
//! page it leaves behind.

use crate::layout::{layout_paragraph, Alignment, Cursor, ParagraphStyle, StyledSegment};
use crate::surface::{ContentArea, PagedSurface, StyleFonts};
use crate::{Error, Pt};

/// Placeholder in [BuilderConfig::footer] replaced by the 1-based page number
pub const PAGE_NUMBER_PLACEHOLDER: &str = "{page}";

/// Distances smaller than this are treated as zero when checking whether a line
/// still fits above the bottom of the page
const FIT_TOLERANCE: f32 = 1e-3;

/// How a [DocumentBuilder] spaces and paginates content
#[derive(Debug, Clone, PartialEq)]
pub struct BuilderConfig {
    pub paragraph: ParagraphStyle,
    pub heading: ParagraphStyle,
    /// Extra space left below every paragraph and heading
    pub paragraph_spacing: Pt,
    /// Move a paragraph that would straddle a page break to the next page as a
    /// whole, as long as it fits on one page
    pub keep_paragraphs_together: bool,
    /// Footer text stamped on every page, see [PAGE_NUMBER_PLACEHOLDER]
    pub footer: Option<String>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        BuilderConfig {
            paragraph: ParagraphStyle::default(),
            heading: ParagraphStyle::default().with_alignment(Alignment::Left),
            paragraph_spacing: Pt(6.0),
            keep_paragraphs_together: true,
            footer: None,
        }
    }
}

impl BuilderConfig {
    pub fn with_paragraph_style(mut self, style: ParagraphStyle) -> Self {
        self.paragraph = style;
        self
    }

    pub fn with_heading_style(mut self, style: ParagraphStyle) -> Self {
        self.heading = style;
        self
    }

    pub fn with_paragraph_spacing<D: Into<Pt>>(mut self, spacing: D) -> Self {
        self.paragraph_spacing = spacing.into();
        self
    }

    pub fn with_keep_paragraphs_together(mut self, keep: bool) -> Self {
        self.keep_paragraphs_together = keep;
        self
    }

    pub fn with_footer<S: Into<String>>(mut self, footer: S) -> Self {
        self.footer = Some(footer.into());
        self
    }

    fn footer_for(&self, page_index: usize) -> Option<String> {
        self.footer.as_ref().map(|template| {
            template.replace(PAGE_NUMBER_PLACEHOLDER, &(page_index + 1).to_string())
        })
    }
}

/// Flows styled paragraphs onto a [PagedSurface], one after another
pub struct DocumentBuilder<S: PagedSurface> {
    surface: S,
    fonts: StyleFonts<S::Font>,
    config: BuilderConfig,
    cursor: Cursor,
}

impl<S: PagedSurface> DocumentBuilder<S> {
    /// Start at the top left of the surface's current page
    pub fn new(surface: S, fonts: StyleFonts<S::Font>, config: BuilderConfig) -> Self {
        let area = surface.content_area();
        DocumentBuilder {
            surface,
            fonts,
            config,
            cursor: Cursor::new(area.left, area.top),
        }
    }

    /// Where the next paragraph will start
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn paragraph(&mut self, segments: &[StyledSegment]) -> Result<&mut Self, Error> {
        let style = self.config.paragraph;
        self.flow(segments, &style)?;
        Ok(self)
    }

    /// A left-aligned paragraph set entirely in the emphasized face
    pub fn heading<T: Into<String>>(&mut self, text: T) -> Result<&mut Self, Error> {
        let style = self.config.heading;
        self.flow(&[StyledSegment::emphasized(text)], &style)?;
        Ok(self)
    }

    /// Leave vertical space. Space that runs past the bottom of the page is not
    /// carried over to the next one.
    pub fn spacer<D: Into<Pt>>(&mut self, height: D) -> &mut Self {
        self.cursor.y += height.into();
        self
    }

    /// Stamp the footer on the final page and hand back the surface
    pub fn finish(mut self) -> Result<S, Error> {
        self.stamp_footer()?;
        Ok(self.surface)
    }

    /// Force the following content onto a new page
    pub fn page_break(&mut self) -> Result<&mut Self, Error> {
        self.stamp_footer()?;
        self.surface.start_page()?;
        let area = self.surface.content_area();
        self.cursor = Cursor::new(area.left, area.top);
        Ok(self)
    }

    fn stamp_footer(&mut self) -> Result<(), Error> {
        if let Some(footer) = self.config.footer_for(self.surface.page_index()) {
            self.surface.stamp_footer(&footer)?;
        }
        Ok(())
    }

    fn at_page_top(&self, area: &ContentArea) -> bool {
        *(self.cursor.y - area.top) <= FIT_TOLERANCE
    }

    /// Number of whole lines that fit between the cursor and the bottom of the page
    fn lines_left(&self, area: &ContentArea, line_height: Pt) -> usize {
        let room = (area.bottom - self.cursor.y) / line_height + FIT_TOLERANCE;
        if room.is_finite() && room >= 1.0 {
            room.floor() as usize
        } else {
            0
        }
    }

    fn flow(&mut self, segments: &[StyledSegment], style: &ParagraphStyle) -> Result<(), Error> {
        let area = self.surface.content_area();
        let paragraph = layout_paragraph(&mut self.surface, &self.fonts, segments, area.width)?;
        if paragraph.is_empty() {
            return Ok(());
        }

        let height = paragraph.height(style);
        if self.config.keep_paragraphs_together
            && self.cursor.y + height > area.bottom + Pt(FIT_TOLERANCE)
            && height <= area.height()
            && !self.at_page_top(&area)
        {
            log::debug!("moving a {}-line paragraph to the next page", paragraph.len());
            self.page_break()?;
        }

        let mut line = 0;
        while line < paragraph.len() {
            let area = self.surface.content_area();
            let mut fits = if style.line_height > Pt::ZERO {
                self.lines_left(&area, style.line_height)
            } else {
                paragraph.len() - line
            };
            if fits == 0 {
                if !self.at_page_top(&area) {
                    self.page_break()?;
                    continue;
                }
                // a line taller than the whole content area still has to go somewhere
                fits = 1;
            }

            let end = (line + fits).min(paragraph.len());
            self.cursor = paragraph.render_lines(
                &mut self.surface,
                &self.fonts,
                line..end,
                style,
                self.cursor,
            )?;
            line = end;
        }

        self.cursor.y += self.config.paragraph_spacing;
        Ok(())
    }
}
