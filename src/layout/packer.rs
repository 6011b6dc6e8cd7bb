use super::{Emphasis, Token};
use crate::{Error, Pt};
use std::collections::VecDeque;

/// Widths summed from individual tokens can differ from the width of the same
/// text measured in one go by float rounding. Anything within this of the target
/// width still fits.
pub const FIT_TOLERANCE: Pt = Pt(1e-3);

/// A token that has been accepted onto a line, along with its measured width.
/// The width is measured exactly once and never re-measured afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedItem {
    pub text: String,
    pub emphasis: Emphasis,
    pub width: Pt,
    pub is_whitespace: bool,
}

/// One line of a paragraph, as decided by [pack]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    pub items: Vec<PackedItem>,
    /// Sum of the widths of all items on the line. Never more than the target
    /// width plus [FIT_TOLERANCE], except on a forced line whose single character
    /// is too wide for the target, with or without its hyphen.
    pub natural_width: Pt,
    /// Set when the line was closed by the oversized-token fallback. Such a line
    /// ends in a hyphenated fragment, or holds a single character that is wider
    /// than the target on its own.
    pub forced: bool,
}

impl Line {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of whitespace items that justification can stretch
    pub fn stretch_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_whitespace).count()
    }

    /// The text of the line, without any justification
    pub fn text(&self) -> String {
        self.items.iter().map(|item| item.text.as_str()).collect()
    }
}

/// Accumulates items for the line currently being packed
#[derive(Debug, Default)]
pub struct LineBuilder {
    items: Vec<PackedItem>,
    width: Pt,
}

impl LineBuilder {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn width(&self) -> Pt {
        self.width
    }

    pub fn ends_with_whitespace(&self) -> bool {
        self.items.last().is_some_and(|item| item.is_whitespace)
    }

    pub fn push(&mut self, item: PackedItem) {
        self.width += item.width;
        self.items.push(item);
    }

    /// Drop whitespace items from the end of the line
    pub fn trim_trailing_whitespace(&mut self) {
        while self.ends_with_whitespace() {
            if let Some(item) = self.items.pop() {
                self.width -= item.width;
            }
        }
    }

    /// Trim the line and hand it over, leaving the builder empty. Returns [None]
    /// if nothing but whitespace had been accumulated.
    pub fn finish(&mut self, forced: bool) -> Option<Line> {
        self.trim_trailing_whitespace();
        let items = std::mem::take(&mut self.items);
        self.width = Pt::ZERO;
        if items.is_empty() {
            return None;
        }
        let natural_width = items.iter().map(|item| item.width).sum();
        Some(Line {
            items,
            natural_width,
            forced,
        })
    }
}

/// Greedily pack tokens into lines no wider than `target_width`.
///
/// * whitespace at the start of a line, or directly following other whitespace,
///   is dropped
/// * a token that doesn't fit closes the current line and is tried again on a
///   fresh one, without being measured a second time
/// * a word that doesn't fit even on an empty line is hyphenated: the longest
///   prefix that fits together with a trailing `-` stays on the line and the
///   remainder is packed as a new word
///
/// Lines never end in whitespace. `measure` returns the width of a string in the
/// face for the given emphasis; any error it returns aborts packing.
pub fn pack<I, F>(tokens: I, target_width: Pt, mut measure: F) -> Result<Vec<Line>, Error>
where
    I: IntoIterator<Item = Token>,
    F: FnMut(&str, Emphasis) -> Result<Pt, Error>,
{
    let mut queue: VecDeque<(Token, Option<Pt>)> =
        tokens.into_iter().map(|token| (token, None)).collect();
    let token_count = queue.len();

    let mut lines: Vec<Line> = Vec::new();
    let mut line = LineBuilder::default();

    while let Some((token, measured)) = queue.pop_front() {
        if token.is_whitespace && (line.is_empty() || line.ends_with_whitespace()) {
            continue;
        }

        let width = match measured {
            Some(width) => width,
            None => measure(&token.text, token.emphasis)?,
        };

        if line.width() + width <= target_width + FIT_TOLERANCE {
            line.push(PackedItem {
                text: token.text,
                emphasis: token.emphasis,
                width,
                is_whitespace: token.is_whitespace,
            });
            continue;
        }

        if !line.is_empty() {
            lines.extend(line.finish(false));
            queue.push_front((token, Some(width)));
            continue;
        }

        let (head, tail) = hyphenate(token, width, target_width, &mut measure)?;
        line.push(head);
        lines.extend(line.finish(true));
        if let Some(tail) = tail {
            queue.push_front((tail, None));
        }
    }
    lines.extend(line.finish(false));

    log::debug!(
        "packed {token_count} tokens into {} lines at width {target_width}",
        lines.len()
    );
    Ok(lines)
}

/// Split a word that is too wide for an empty line. Returns the hyphenated head
/// that goes on the current line and the remaining tail, if any.
///
/// At least one character always ends up in the head and the tail is never
/// empty, so every call makes progress through the word.
fn hyphenate<F>(
    token: Token,
    width: Pt,
    target_width: Pt,
    measure: &mut F,
) -> Result<(PackedItem, Option<Token>), Error>
where
    F: FnMut(&str, Emphasis) -> Result<Pt, Error>,
{
    // byte offsets at which a prefix of 1, 2, .., n-1 characters ends
    let splits: Vec<usize> = token.text.char_indices().skip(1).map(|(i, _)| i).collect();

    if splits.is_empty() {
        log::warn!(
            "{:?} is wider than the line ({width} > {target_width}) and cannot be split",
            token.text
        );
        let head = PackedItem {
            text: token.text,
            emphasis: token.emphasis,
            width,
            is_whitespace: token.is_whitespace,
        };
        return Ok((head, None));
    }

    // longest prefix, in characters, that fits with its hyphen
    let mut best: Option<(usize, Pt)> = None;
    let mut shortest: Option<Pt> = None;
    let (mut lo, mut hi) = (1usize, splits.len());
    while lo <= hi {
        let mid = (lo + hi) / 2;
        let candidate = format!("{}-", &token.text[..splits[mid - 1]]);
        let candidate_width = measure(&candidate, token.emphasis)?;
        if mid == 1 {
            shortest = Some(candidate_width);
        }
        if candidate_width <= target_width + FIT_TOLERANCE {
            best = Some((mid, candidate_width));
            lo = mid + 1;
        } else {
            hi = mid - 1;
        }
    }

    let (chars, head_width) = match (best, shortest) {
        (Some(best), _) => best,
        (None, Some(w)) => (1, w),
        (None, None) => (1, measure(&format!("{}-", &token.text[..splits[0]]), token.emphasis)?),
    };
    let split = splits[chars - 1];
    debug_assert!(split > 0 && split < token.text.len());

    log::debug!(
        "hyphenating {:?} after {chars} characters to fit {target_width}",
        token.text
    );

    let head = PackedItem {
        text: format!("{}-", &token.text[..split]),
        emphasis: token.emphasis,
        width: head_width,
        is_whitespace: false,
    };
    let tail = Token {
        text: token.text[split..].to_string(),
        emphasis: token.emphasis,
        is_whitespace: false,
    };
    Ok((head, Some(tail)))
}
