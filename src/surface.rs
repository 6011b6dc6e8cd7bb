//! The drawing-surface abstraction that the layout engine renders onto.
//!
//! The layout engine only ever needs to select a font, measure a string in that
//! font, and draw a string at a position. Anything page-related lives on
//! [PagedSurface] and is driven by the document builder, never by the engine.
//!
//! Surfaces carry a single piece of shared mutable state: the active font. Every
//! operation that changes it goes through a [FontGuard], which puts the previous
//! font back when it goes out of scope, even when the guarded operation fails.

use crate::layout::Emphasis;
use crate::{Error, Pt};
use std::fmt::Debug;
use std::ops::{Deref, DerefMut};

/// Something text can be measured against and drawn onto.
///
/// Coordinates are in flow space: `x` grows to the right from the left edge of
/// the page and `y` grows *down* from the top edge, naming the top of the line
/// box. Surfaces that use a different coordinate system (PDF puts the origin at
/// the bottom left) convert when drawing.
///
/// A surface is a single-owner resource and is not expected to be shared across
/// threads while a paragraph is being laid out.
pub trait Surface {
    /// Opaque handle naming a font (face and size) the surface can switch to
    type Font: Copy + PartialEq + Debug;

    /// Make `font` the active font for subsequent measuring and drawing
    fn set_font(&mut self, font: Self::Font) -> Result<(), Error>;

    /// The currently active font, if one has been selected
    fn font(&self) -> Option<Self::Font>;

    /// Return to having no active font
    fn clear_font(&mut self);

    /// Width of `text` in the active font. Newlines and line breaking are not
    /// considered.
    fn width_of_string(&self, text: &str) -> Result<Pt, Error>;

    /// Draw `text` in the active font with the top-left of its line box at
    /// `(x, y)`. The surface must not break the text into lines itself.
    fn draw_text(&mut self, text: &str, x: Pt, y: Pt) -> Result<(), Error>;
}

/// Where content may be placed on the current page, in flow coordinates
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ContentArea {
    pub left: Pt,
    pub top: Pt,
    pub width: Pt,
    /// The lowest `y` a line box may extend to
    pub bottom: Pt,
}

impl ContentArea {
    pub fn height(&self) -> Pt {
        self.bottom - self.top
    }
}

/// Page-level primitives used by the document builder to paginate
pub trait PagedSurface: Surface {
    /// The content area of the current page
    fn content_area(&self) -> ContentArea;

    /// Finish the current page and start drawing onto a fresh one
    fn start_page(&mut self) -> Result<(), Error>;

    /// Place footer text in the bottom margin of the current page
    fn stamp_footer(&mut self, text: &str) -> Result<(), Error>;

    /// 0-based index of the current page
    fn page_index(&self) -> usize;
}

/// The pair of fonts a paragraph is set in
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StyleFonts<F> {
    pub regular: F,
    pub emphasized: F,
}

impl<F: Copy> StyleFonts<F> {
    pub fn new(regular: F, emphasized: F) -> StyleFonts<F> {
        StyleFonts {
            regular,
            emphasized,
        }
    }

    /// The concrete font handle for an emphasis
    pub fn resolve(&self, emphasis: Emphasis) -> F {
        match emphasis {
            Emphasis::Regular => self.regular,
            Emphasis::Emphasized => self.emphasized,
        }
    }
}

/// Temporarily switches a surface to another font, restoring whatever was active
/// before when dropped.
///
/// Restoring is best effort: if the surface refuses to switch back, the failure
/// is logged and swallowed so that one bad restore cannot abort the rest of a
/// paragraph. Every subsequent measure or draw selects its own font explicitly.
pub struct FontGuard<'s, S: Surface + ?Sized> {
    surface: &'s mut S,
    saved: Option<S::Font>,
}

impl<'s, S: Surface + ?Sized> FontGuard<'s, S> {
    /// Save the active font and switch to `font`. If the switch itself fails the
    /// saved font is restored before the error is returned.
    pub fn switch(surface: &'s mut S, font: S::Font) -> Result<FontGuard<'s, S>, Error> {
        let saved = surface.font();
        let guard = FontGuard { surface, saved };
        guard.surface.set_font(font)?;
        Ok(guard)
    }
}

impl<S: Surface + ?Sized> Deref for FontGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for FontGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for FontGuard<'_, S> {
    fn drop(&mut self) {
        match self.saved {
            Some(font) => {
                if let Err(e) = self.surface.set_font(font) {
                    log::warn!("failed to restore font {font:?}: {e}");
                }
            }
            None => self.surface.clear_font(),
        }
    }
}
