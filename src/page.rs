use crate::colour::Colour;
use crate::font::Font;
use crate::layout::Margins;
use crate::pagesize::{PageSetup, PageSize};
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::{Error, Pt};
use id_arena::{Arena, Id};
use pdf_writer::{Name, Pdf};
use std::io::Write;

/// A font and the size it is set at
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A run of text drawn in one font and colour, with its baseline starting at
/// `coords` in PDF space (origin at the bottom left of the page)
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    /// The laid out text
    pub contents: Vec<SpanLayout>,
}

impl Page {
    /// Create a new page of the given size, optionally with margins that determine
    /// the page's content box
    pub fn new(size: PageSize, margins: Option<Margins>) -> Page {
        let margins = margins.unwrap_or_default();
        Page {
            media_box: Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: size.0,
                y2: size.1,
            },
            content_box: Rect {
                x1: margins.left,
                y1: margins.bottom,
                x2: size.0 - margins.right,
                y2: size.1 - margins.top,
            },
            contents: Vec::default(),
        }
    }

    pub fn from_setup(setup: &PageSetup) -> Page {
        Page::new(setup.size, Some(setup.margins))
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(span);
    }

    /// Render the page's spans into a PDF content stream, drawing each character
    /// as its 2-byte glyph id (Identity-H encoding)
    #[allow(clippy::write_with_newline)]
    pub(crate) fn render(&self, fonts: &Arena<Font>) -> Result<Vec<u8>, Error> {
        let mut content: Vec<u8> = Vec::default();
        if self.contents.is_empty() {
            return Ok(content);
        }

        write!(content, "q\n")?;
        let mut current_font: Option<SpanFont> = None;
        let mut current_colour: Option<Colour> = None;

        for span in self.contents.iter() {
            if span.text.is_empty() {
                continue;
            }
            let font = fonts
                .get(span.font.id)
                .ok_or(Error::FontMissing(span.font.id.index()))?;

            if current_font != Some(span.font) {
                write!(content, "/F{} {} Tf\n", span.font.id.index(), span.font.size)?;
                current_font = Some(span.font);
            }
            if current_colour != Some(span.colour) {
                write_colour(&mut content, span.colour)?;
                current_colour = Some(span.colour);
            }

            write!(content, "BT\n")?;
            write!(content, "{} {} Td\n", span.coords.0, span.coords.1)?;
            write!(content, "<")?;
            for ch in span.text.chars() {
                write!(content, "{:04x}", font.glyph_for(ch))?;
            }
            write!(content, "> Tj\n")?;
            write!(content, "ET\n")?;
        }

        write!(content, "Q\n")?;
        Ok(content)
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        writer: &mut Pdf,
    ) -> Result<(), Error> {
        let id = refs.get(RefType::Page(page_index))?;
        let parent = refs.get(RefType::PageTree)?;
        let font_refs = fonts
            .iter()
            .map(|(font_id, _)| {
                refs.get(RefType::Font(font_id.index()))
                    .map(|r| (font_id.index(), r))
            })
            .collect::<Result<Vec<_>, Error>>()?;
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(parent);
        page.contents(content_id);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (index, font_ref) in font_refs {
            resource_fonts.pair(Name(format!("F{index}").as_bytes()), font_ref);
        }
        drop(resource_fonts);
        drop(resources);
        drop(page);

        let rendered = self.render(fonts)?;
        writer.stream(content_id, rendered.as_slice());
        Ok(())
    }
}

#[allow(clippy::write_with_newline)]
fn write_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} rg\n"),
        Colour::CMYK { c, m, y, k } => write!(content, "{c} {m} {y} {k} k\n"),
        Colour::Grey { g } => write!(content, "{g} g\n"),
    }
}
