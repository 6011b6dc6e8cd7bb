use crate::{
    font::{Font, UsedGlyphs},
    info::Info,
    page::Page,
    refs::{ObjectReferences, RefType},
    Error,
};
use id_arena::{Arena, Id};
use pdf_writer::{Pdf, Ref};
use std::{collections::BTreeMap, io::Write, time::Instant};

#[derive(Default)]
/// A document is the main object that stores all the contents of the PDF
/// then renders it out with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub fonts: Arena<Font>,
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    pub fn page_count(&self) -> usize {
        self.page_order.len()
    }

    /// Add a font to the document structure. Fonts are stored "globally" within the
    /// document, such that any page can use it by referring to the returned id.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    /// Every glyph drawn on any page, grouped by font index
    fn used_glyphs(&self) -> Result<BTreeMap<usize, UsedGlyphs>, Error> {
        let mut used: BTreeMap<usize, UsedGlyphs> = BTreeMap::new();
        for (_, page) in self.pages.iter() {
            for span in page.contents.iter() {
                let font = self
                    .fonts
                    .get(span.font.id)
                    .ok_or(Error::FontMissing(span.font.id.index()))?;
                let glyphs = used.entry(span.font.id.index()).or_default();
                for ch in span.text.chars() {
                    glyphs.entry(font.glyph_for(ch)).or_insert(ch);
                }
            }
        }
        Ok(used)
    }

    /// Write the entire document to the writer. The whole document is rendered in
    /// memory first, so very large documents allocate accordingly.
    ///
    /// References between objects are only resolved here, so pages and fonts can be
    /// added in any order up until this point.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), Error> {
        let started = Instant::now();
        let used_glyphs = self.used_glyphs()?;

        let Document {
            info,
            pages,
            page_order,
            fonts,
        } = self;

        let mut refs = ObjectReferences::new();
        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = &info {
            info.write(&mut refs, &mut writer);
        }

        // page refs are keyed by position in the document, not by arena index
        let page_refs: Vec<Ref> = (0..page_order.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();
        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        let unused = UsedGlyphs::new();
        for (id, font) in fonts.iter() {
            let used = used_glyphs.get(&id.index()).unwrap_or(&unused);
            font.write(&mut refs, id.index(), used, &mut writer)?;
        }

        for (page_index, id) in page_order.iter().enumerate() {
            let page = pages.get(*id).ok_or(Error::PageMissing)?;
            page.write(&mut refs, page_index, &fonts, &mut writer)?;
        }

        writer.catalog(catalog_id).pages(page_tree_id);

        let bytes = writer.finish();
        w.write_all(bytes.as_slice())?;

        log::info!(
            "wrote {} pages with {} fonts ({} bytes) in {:.1}ms",
            page_order.len(),
            fonts.len(),
            bytes.len(),
            started.elapsed().as_secs_f64() * 1000.0
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Margins;
    use crate::pagesize::A4;
    use crate::Pt;

    #[test]
    fn writes_a_pdf_without_fonts() {
        let mut doc = Document::default();
        doc.set_info(Info::new().title("Consent").author("Club office").clone());
        doc.add_page(Page::new(A4, Some(Margins::all(Pt(36.0)))));
        doc.add_page(Page::new(A4, None));
        assert_eq!(doc.page_count(), 2);

        let mut out: Vec<u8> = Vec::new();
        doc.write(&mut out).expect("can write document");
        assert!(out.starts_with(b"%PDF-"));
        assert!(String::from_utf8_lossy(&out).contains("/Count 2"));
    }
}
