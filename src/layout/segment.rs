/// Whether a run of text is set in the regular or the emphasized (bold) face.
///
/// The layout engine never looks at concrete fonts; an [Emphasis] is only resolved
/// to a surface font handle when text is measured or drawn, see
/// [`StyleFonts`](crate::StyleFonts).
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Emphasis {
    #[default]
    Regular,
    Emphasized,
}

/// A run of input text sharing a single emphasis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSegment {
    pub text: String,
    pub emphasis: Emphasis,
}

impl StyledSegment {
    pub fn new<S: Into<String>>(text: S, emphasis: Emphasis) -> StyledSegment {
        StyledSegment {
            text: text.into(),
            emphasis,
        }
    }

    /// A segment set in the regular face
    pub fn regular<S: Into<String>>(text: S) -> StyledSegment {
        StyledSegment::new(text, Emphasis::Regular)
    }

    /// A segment set in the emphasized (bold) face
    pub fn emphasized<S: Into<String>>(text: S) -> StyledSegment {
        StyledSegment::new(text, Emphasis::Emphasized)
    }

    pub fn is_emphasized(&self) -> bool {
        self.emphasis == Emphasis::Emphasized
    }
}

/// The smallest unit the line packer works with: either a maximal run of
/// non-whitespace characters or a maximal run of whitespace, within one segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub emphasis: Emphasis,
    pub is_whitespace: bool,
}

/// Whitespace as far as line breaking is concerned. No-break spaces glue
/// their neighbours together and so count as part of a word.
fn is_breaking_whitespace(ch: char) -> bool {
    ch.is_whitespace() && !matches!(ch, '\u{00A0}' | '\u{2007}' | '\u{202F}')
}

/// Split segments into alternating word and whitespace tokens, keeping the
/// delimiters. Tokens never span two segments, so a space between a bold and a
/// regular run keeps the style of the segment it was typed in. Empty tokens are
/// never produced.
pub fn tokenize(segments: &[StyledSegment]) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();

    for segment in segments {
        let mut current = String::new();
        let mut current_ws = false;

        for ch in segment.text.chars() {
            let ws = is_breaking_whitespace(ch);
            if ws != current_ws && !current.is_empty() {
                tokens.push(Token {
                    text: std::mem::take(&mut current),
                    emphasis: segment.emphasis,
                    is_whitespace: current_ws,
                });
            }
            current_ws = ws;
            current.push(ch);
        }

        if !current.is_empty() {
            tokens.push(Token {
                text: current,
                emphasis: segment.emphasis,
                is_whitespace: current_ws,
            });
        }
    }

    tokens
}
