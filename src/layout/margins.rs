use crate::units::Pt;

/// Blank space between the edges of a page and its content. Margins determine
/// the content area paragraphs are flowed into, the `ArtBox` written for each
/// page, and the band at the bottom of the page that footers are stamped into.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl<D: Into<Pt>>(top: D, right: D, bottom: D, left: D) -> Margins {
        Margins {
            top: top.into(),
            right: right.into(),
            bottom: bottom.into(),
            left: left.into(),
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins::trbl(value, value, value, value)
    }

    /// Create margins by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) margins
    pub fn symmetric<D: Into<Pt>>(vertical: D, horizontal: D) -> Margins {
        let (vertical, horizontal): (Pt, Pt) = (vertical.into(), horizontal.into());
        Margins::trbl(vertical, horizontal, vertical, horizontal)
    }

    /// Horizontal space taken up by the margins
    pub fn horizontal(&self) -> Pt {
        self.left + self.right
    }

    /// Vertical space taken up by the margins
    pub fn vertical(&self) -> Pt {
        self.top + self.bottom
    }
}
