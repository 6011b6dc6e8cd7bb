use crate::{
    refs::{ObjectReferences, RefType},
    Error, Pt,
};
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Name, Pdf, Ref, Str,
};
use std::collections::BTreeMap;

/// Glyphs actually drawn with a font, keyed by glyph id
pub(crate) type UsedGlyphs = BTreeMap<u16, char>;

/// A parsed TrueType / OpenType font. The font file is embedded whole in the
/// generated PDF, but only the glyphs that end up on a page are given widths and
/// a unicode mapping.
///
/// Fonts are added to a [`Document`](crate::Document) and referred to by the
/// [id_arena::Id] it hands back.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, Error> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font { face })
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face().units_per_em() as f32
    }

    fn name_entry(&self, name_id: u16) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == name_id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// The full name of the font, if the font has one
    pub fn name(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::FULL_NAME)
    }

    /// The family name of the font, if the font has one
    pub fn family(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::FAMILY)
    }

    /// Distance from the baseline to the top of the font at the given size
    pub fn ascent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().ascender() as f32
    }

    /// Distance from the baseline to the bottom of the font at the given size.
    /// Note: this is usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().descender() as f32
    }

    /// Extra space the font asks for between lines at the given size
    pub fn leading(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().line_gap() as f32
    }

    /// The default distance between the baselines of consecutive lines
    pub fn line_height(&self, size: Pt) -> Pt {
        self.leading(size) + self.ascent(size) - self.descent(size)
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face().glyph_index(ch).map(|i| i.0)
    }

    /// The glyph that will be drawn for `ch`. Whitespace without a glyph of its
    /// own is drawn as a space; anything else missing falls back to U+FFFD, then
    /// `?`, then `.notdef`.
    pub fn glyph_for(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| ch.is_whitespace().then(|| self.glyph_id(' ')).flatten())
            .or_else(|| self.glyph_id('\u{FFFD}'))
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    fn advance(&self, gid: u16) -> u16 {
        self.face().glyph_hor_advance(GlyphId(gid)).unwrap_or_default()
    }

    /// Width of `text` set at `size`, using the same glyphs that drawing would
    pub fn width_of(&self, text: &str, size: Pt) -> Pt {
        let units: u32 = text
            .chars()
            .map(|ch| self.advance(self.glyph_for(ch)) as u32)
            .sum();
        self.scaling(size) * units as f32
    }

    /// Converts font units to the 1000-unit glyph space PDF uses
    fn to_glyph_space(&self, units: f32) -> f32 {
        units * 1000.0 / self.face().units_per_em() as f32
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        used: &UsedGlyphs,
        writer: &mut Pdf,
    ) -> Result<(), Error> {
        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = self.write_cid(refs, font_index, used, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, used, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{font_index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);

        log::debug!(
            "embedded font {font_index} ({}) with {} used glyphs",
            self.name().unwrap_or_default(),
            used.len()
        );
        Ok(())
    }

    fn write_cid(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        used: &UsedGlyphs,
        writer: &mut Pdf,
    ) -> Ref {
        let descriptor_id = self.write_descriptor(refs, font_index, writer);
        let id = refs.gen(RefType::CidFont(font_index));

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);
        cid_font.default_width(self.to_glyph_space(self.advance(0) as f32));

        // one entry per run of consecutive glyph ids
        let mut runs: Vec<(u16, Vec<f32>)> = Vec::new();
        for &gid in used.keys() {
            let width = self.to_glyph_space(self.advance(gid) as f32);
            let extends_run = runs
                .last()
                .is_some_and(|(start, widths)| *start as usize + widths.len() == gid as usize);
            if extends_run {
                if let Some((_, widths)) = runs.last_mut() {
                    widths.push(width);
                }
            } else {
                runs.push((gid, vec![width]));
            }
        }
        if !runs.is_empty() {
            let mut widths = cid_font.widths();
            for (start, run) in runs {
                widths.consecutive(start, run);
            }
        }

        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let data_id = refs.gen(RefType::FontData(font_index));
        let data = self.face.as_slice();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            data,
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        let mut stream = writer.stream(data_id, compressed.as_slice());
        stream.filter(Filter::FlateDecode);
        stream.pair(Name(b"Length1"), data.len() as i32);
        drop(stream);

        let face = self.face();
        let bbox = face.global_bounding_box();
        let max_width = (0..face.number_of_glyphs())
            .map(|gid| self.advance(gid))
            .max()
            .unwrap_or_default();

        let id = refs.gen(RefType::FontDescriptor(font_index));
        let mut descriptor = writer.font_descriptor(id);
        let name = self.name().unwrap_or_else(|| format!("F{font_index}"));
        descriptor.name(Name(name.replace(' ', "").as_bytes()));
        if let Some(family) = self.family() {
            descriptor.family(Str(family.as_bytes()));
        }
        descriptor.weight(face.weight().to_number());

        let mut flags = FontFlags::empty();
        flags.set(FontFlags::FIXED_PITCH, face.is_monospaced());
        flags.set(FontFlags::ITALIC, face.is_italic());
        descriptor.flags(flags);

        descriptor.bbox(pdf_writer::Rect {
            x1: self.to_glyph_space(bbox.x_min as f32),
            y1: self.to_glyph_space(bbox.y_min as f32),
            x2: self.to_glyph_space(bbox.x_max as f32),
            y2: self.to_glyph_space(bbox.y_max as f32),
        });
        descriptor.italic_angle(if face.is_italic() { -12.0 } else { 0.0 });
        descriptor.ascent(self.to_glyph_space(face.ascender() as f32));
        descriptor.descent(self.to_glyph_space(face.descender() as f32));
        descriptor.leading(self.to_glyph_space(face.line_gap() as f32));
        let cap_height = face.capital_height().unwrap_or(face.ascender());
        descriptor.cap_height(self.to_glyph_space(cap_height as f32));
        descriptor.x_height(self.to_glyph_space(face.x_height().unwrap_or(cap_height) as f32));
        descriptor.stem_v(80.0);
        descriptor.max_width(self.to_glyph_space(max_width as f32));
        descriptor.font_file2(data_id);

        id
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        used: &UsedGlyphs,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut cmap = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        // bfchar sections may hold at most 100 mappings each
        let entries: Vec<(&u16, &char)> = used.iter().collect();
        for block in entries.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", block.len()));
            for (gid, ch) in block {
                let mut utf16 = [0u16; 2];
                let code: String = ch
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04x}"))
                    .collect();
                cmap.push_str(&format!("<{gid:04x}> <{code}>\n"));
            }
            cmap.push_str("endbfchar\n");
        }
        cmap.push_str("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            cmap.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        let mut stream = writer.stream(id, compressed.as_slice());
        stream.filter(Filter::FlateDecode);

        id
    }
}
