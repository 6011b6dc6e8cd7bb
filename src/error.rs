use crate::refs::RefType;
use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error("page listed in the document order is missing from the page arena")]
    /// A page id in the document order no longer resolves to a page
    PageMissing,

    #[error("no PDF object reference was generated for {0:?}")]
    /// An object was written before the object it refers to
    MissingReference(RefType),

    #[error("font {0} is not registered with the document")]
    /// A span or surface refers to a font that was never added
    FontMissing(usize),

    #[error("the drawing surface has no active font")]
    /// Text was measured or drawn before any font was selected
    NoActiveFont,

    #[error("the drawing surface reported an invalid width {width} for {text:?}")]
    /// The surface produced a negative or non-finite width. This is a misconfigured
    /// surface rather than bad input, and aborts layout.
    InvalidWidth { text: String, width: f32 },

    #[error("drawing surface failure: {0}")]
    /// Any other failure raised by a drawing surface implementation
    Surface(String),
}
