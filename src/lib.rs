//! Typesetting of justified, hyphenated paragraphs onto fixed-size PDF pages.
//!
//! The [layout] module holds the paragraph engine, which works against any
//! [Surface]. [PdfSurface] is the surface that records text onto the pages of a
//! [Document], and [DocumentBuilder] flows paragraphs across those pages,
//! breaking pages and stamping footers as it goes.

mod builder;
pub use builder::*;

mod colour;
pub use colour::*;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod info;
pub use info::*;

/// Paragraph layout: tokenizing, measuring, line packing, justification and rendering
pub mod layout;

mod page;
pub use page::*;

/// Standard page sizes and page geometry
pub mod pagesize;

mod pdf_surface;
pub use pdf_surface::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod surface;
pub use surface::*;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
