//! Page sizes for the paper formats documents are typically printed on, and the
//! [PageSetup] that pairs a size with margins.
//!
//! All sizes are provided in portrait orientation (width, height) where width ≤ height.
//!
//! # Example
//!
//! ```
//! use pdf_typeset::pagesize::{PageOrientation, PageSetup, A4};
//! use pdf_typeset::layout::Margins;
//! use pdf_typeset::Mm;
//!
//! let setup = PageSetup::new(A4.landscape(), Margins::all(Mm(20.0)));
//! assert!(setup.content_area().width > setup.content_area().height());
//! ```

use crate::layout::Margins;
use crate::surface::ContentArea;
use crate::units::*;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const LEGAL: PageSize = (Pt(8.5 * 72.0), Pt(14.0 * 72.0));

// iso a-series (converted from mm to points)
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
pub const A5: PageSize = (Pt(148.0 * 72.0 / 25.4), Pt(210.0 * 72.0 / 25.4));

/// Convert page sizes between portrait and landscape orientations.
pub trait PageOrientation {
    /// Returns the size in portrait orientation (width ≤ height).
    fn portrait(self) -> Self;
    /// Returns the size in landscape orientation (width ≥ height).
    fn landscape(self) -> Self;
}

impl PageOrientation for PageSize {
    fn portrait(self) -> Self {
        if self.0 <= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }

    fn landscape(self) -> PageSize {
        if self.0 >= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }
}

/// The geometry shared by every page of a document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    pub size: PageSize,
    pub margins: Margins,
}

impl Default for PageSetup {
    fn default() -> Self {
        PageSetup {
            size: A4,
            margins: Margins::all(Mm(25.0)),
        }
    }
}

impl PageSetup {
    pub fn new(size: PageSize, margins: Margins) -> PageSetup {
        PageSetup { size, margins }
    }

    /// The area inside the margins, in flow coordinates (origin at the top left
    /// of the page, `y` growing downwards)
    pub fn content_area(&self) -> ContentArea {
        ContentArea {
            left: self.margins.left,
            top: self.margins.top,
            width: self.size.0 - self.margins.horizontal(),
            bottom: self.size.1 - self.margins.bottom,
        }
    }
}
