use crate::colour::{colours, Colour};
use crate::document::Document;
use crate::font::Font;
use crate::page::{Page, SpanFont, SpanLayout};
use crate::pagesize::PageSetup;
use crate::surface::{ContentArea, PagedSurface, Surface};
use crate::{Error, Pt};

/// A [Surface] that records drawn text as spans on the pages of a [Document].
///
/// Flow coordinates (top-left origin, `y` naming the top of the line box) are
/// converted to PDF baseline coordinates when text is drawn, using the ascent
/// of the active font.
pub struct PdfSurface {
    document: Document,
    setup: PageSetup,
    page: Page,
    page_index: usize,
    font: Option<SpanFont>,
    colour: Colour,
    footer_font: SpanFont,
}

impl PdfSurface {
    /// Start drawing onto the first page of `document`. Fonts, including the
    /// one footers are stamped in, must already have been added to the document.
    pub fn new(document: Document, setup: PageSetup, footer_font: SpanFont) -> PdfSurface {
        PdfSurface {
            page: Page::from_setup(&setup),
            document,
            setup,
            page_index: 0,
            font: None,
            colour: colours::BLACK,
            footer_font,
        }
    }

    /// Colour used for all text drawn from now on, footers excluded
    pub fn set_colour(&mut self, colour: Colour) {
        self.colour = colour;
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn resolve(&self, font: SpanFont) -> Result<&Font, Error> {
        self.document
            .fonts
            .get(font.id)
            .ok_or(Error::FontMissing(font.id.index()))
    }

    fn active(&self) -> Result<(SpanFont, &Font), Error> {
        let span_font = self.font.ok_or(Error::NoActiveFont)?;
        Ok((span_font, self.resolve(span_font)?))
    }

    /// Finish the current page and hand back the document, ready to be written
    pub fn into_document(self) -> Document {
        let PdfSurface {
            mut document, page, ..
        } = self;
        document.add_page(page);
        document
    }
}

impl Surface for PdfSurface {
    type Font = SpanFont;

    fn set_font(&mut self, font: SpanFont) -> Result<(), Error> {
        self.resolve(font)?;
        self.font = Some(font);
        Ok(())
    }

    fn font(&self) -> Option<SpanFont> {
        self.font
    }

    fn clear_font(&mut self) {
        self.font = None;
    }

    fn width_of_string(&self, text: &str) -> Result<Pt, Error> {
        let (span_font, font) = self.active()?;
        Ok(font.width_of(text, span_font.size))
    }

    fn draw_text(&mut self, text: &str, x: Pt, y: Pt) -> Result<(), Error> {
        let (span_font, font) = self.active()?;
        let baseline = self.setup.size.1 - y - font.ascent(span_font.size);
        let span = SpanLayout {
            text: text.to_string(),
            font: span_font,
            colour: self.colour,
            coords: (x, baseline),
        };
        self.page.add_span(span);
        Ok(())
    }
}

impl PagedSurface for PdfSurface {
    fn content_area(&self) -> ContentArea {
        self.setup.content_area()
    }

    fn start_page(&mut self) -> Result<(), Error> {
        let finished = std::mem::replace(&mut self.page, Page::from_setup(&self.setup));
        self.document.add_page(finished);
        self.page_index += 1;
        log::debug!("starting page {}", self.page_index + 1);
        Ok(())
    }

    /// Centres `text` horizontally on the page and vertically in the bottom margin
    fn stamp_footer(&mut self, text: &str) -> Result<(), Error> {
        let span_font = self.footer_font;
        let font = self.resolve(span_font)?;
        let width = font.width_of(text, span_font.size);
        let glyph_height = font.ascent(span_font.size) + font.descent(span_font.size);

        let x = (self.setup.size.0 - width) / 2.0;
        let baseline = (self.setup.margins.bottom - glyph_height) / 2.0;
        self.page.add_span(SpanLayout {
            text: text.to_string(),
            font: span_font,
            colour: colours::MID_GREY,
            coords: (x, baseline),
        });
        Ok(())
    }

    fn page_index(&self) -> usize {
        self.page_index
    }
}
