#![allow(dead_code)]

use pdf_typeset::{ContentArea, Error, PagedSurface, Pt, StyleFonts, Surface};
use std::cell::Cell;

/// Regular glyphs are 1pt wide, bold ones 1.5pt, whatever the character
pub const REGULAR_ADVANCE: f32 = 1.0;
pub const BOLD_ADVANCE: f32 = 1.5;

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum MockFont {
    Regular,
    Bold,
    /// Selected by tests to check the surface's font is put back
    Caption,
}

pub const FONTS: StyleFonts<MockFont> = StyleFonts {
    regular: MockFont::Regular,
    emphasized: MockFont::Bold,
};

#[derive(Clone, PartialEq, Debug)]
pub struct Draw {
    pub page: usize,
    pub text: String,
    pub font: MockFont,
    pub x: f32,
    pub y: f32,
}

/// An in-memory surface with fixed advances that records everything drawn on it
pub struct MockSurface {
    pub font: Option<MockFont>,
    pub area: ContentArea,
    pub page: usize,
    pub draws: Vec<Draw>,
    pub footers: Vec<(usize, String)>,
    pub measurements: Cell<usize>,
}

impl MockSurface {
    pub fn new(area: ContentArea) -> MockSurface {
        MockSurface {
            font: None,
            area,
            page: 0,
            draws: Vec::new(),
            footers: Vec::new(),
            measurements: Cell::new(0),
        }
    }

    /// A content area `width` wide that holds exactly `lines` lines of `line_height`
    pub fn with_lines(width: f32, lines: usize, line_height: f32) -> MockSurface {
        MockSurface::new(ContentArea {
            left: Pt(10.0),
            top: Pt(20.0),
            width: Pt(width),
            bottom: Pt(20.0 + lines as f32 * line_height),
        })
    }

    pub fn texts(&self) -> Vec<&str> {
        self.draws.iter().map(|d| d.text.as_str()).collect()
    }

    /// Drawn text grouped into lines by page and y position
    pub fn lines(&self) -> Vec<(usize, f32, String)> {
        let mut lines: Vec<(usize, f32, String)> = Vec::new();
        for draw in &self.draws {
            match lines.last_mut() {
                Some((page, y, text)) if *page == draw.page && *y == draw.y => {
                    text.push(' ');
                    text.push_str(&draw.text);
                }
                _ => lines.push((draw.page, draw.y, draw.text.clone())),
            }
        }
        lines
    }
}

impl Surface for MockSurface {
    type Font = MockFont;

    fn set_font(&mut self, font: MockFont) -> Result<(), Error> {
        self.font = Some(font);
        Ok(())
    }

    fn font(&self) -> Option<MockFont> {
        self.font
    }

    fn clear_font(&mut self) {
        self.font = None;
    }

    fn width_of_string(&self, text: &str) -> Result<Pt, Error> {
        self.measurements.set(self.measurements.get() + 1);
        let advance = match self.font.ok_or(Error::NoActiveFont)? {
            MockFont::Bold => BOLD_ADVANCE,
            _ => REGULAR_ADVANCE,
        };
        Ok(Pt(text.chars().count() as f32 * advance))
    }

    fn draw_text(&mut self, text: &str, x: Pt, y: Pt) -> Result<(), Error> {
        let font = self.font.ok_or(Error::NoActiveFont)?;
        self.draws.push(Draw {
            page: self.page,
            text: text.to_string(),
            font,
            x: *x,
            y: *y,
        });
        Ok(())
    }
}

impl PagedSurface for MockSurface {
    fn content_area(&self) -> ContentArea {
        self.area
    }

    fn start_page(&mut self) -> Result<(), Error> {
        self.page += 1;
        Ok(())
    }

    fn stamp_footer(&mut self, text: &str) -> Result<(), Error> {
        self.footers.push((self.page, text.to_string()));
        Ok(())
    }

    fn page_index(&self) -> usize {
        self.page
    }
}

/// Collapse all whitespace runs to single spaces and trim the ends
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
