//! Paragraph layout: justification, hyphenation and line placement.
//!
//! A paragraph flows through four stages, each usable on its own:
//!
//! 1. [`tokenize`](crate::layout::tokenize) splits [`StyledSegment`](crate::layout::StyledSegment)s
//!    into word and whitespace tokens
//! 2. [`measure`](crate::layout::measure) asks a [`Surface`](crate::Surface) how wide a token is
//!    in its face
//! 3. [`pack`](crate::layout::pack) greedily fills lines up to the target width,
//!    hyphenating words that don't fit on a line of their own
//! 4. [`justify`](crate::layout::justify) spreads the leftover width of every line but the
//!    last across its spaces
//!
//! [`render_paragraph`](crate::layout::render_paragraph) runs all four and draws the result.
//! Pagination is deliberately left to the caller, see [`DocumentBuilder`](crate::DocumentBuilder).
//!
//! # Example
//!
//! ```
//! use pdf_typeset::layout::{justify, pack, tokenize, Emphasis, StyledSegment};
//! use pdf_typeset::{Error, Pt};
//!
//! // every character is 1pt wide, bold ones 1.5pt
//! let measure = |text: &str, emphasis: Emphasis| -> Result<Pt, Error> {
//!     let per_char = match emphasis {
//!         Emphasis::Regular => 1.0,
//!         Emphasis::Emphasized => 1.5,
//!     };
//!     Ok(Pt(text.chars().count() as f32 * per_char))
//! };
//!
//! let tokens = tokenize(&[
//!     StyledSegment::regular("I hereby give my "),
//!     StyledSegment::emphasized("consent"),
//! ]);
//! let lines = pack(tokens, Pt(12.0), measure).expect("widths are known");
//! assert_eq!(lines.len(), 3);
//! assert_eq!(lines[0].text(), "I hereby");
//!
//! let placed = justify(&lines[0], Pt(12.0), false);
//! assert_eq!(placed[2].x, Pt(6.0));
//! ```

mod justify;
mod margins;
mod measure;
mod packer;
mod render;
mod segment;

pub use justify::*;
pub use margins::*;
pub use measure::*;
pub use packer::*;
pub use render::*;
pub use segment::*;
