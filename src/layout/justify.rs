use super::{Emphasis, Line};
use crate::Pt;

/// How the lines of a paragraph are aligned
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Alignment {
    /// Flush to both margins, except for the last line
    #[default]
    Justify,
    /// Natural word spacing with a ragged right edge
    Left,
}

/// An item placed on a line, `x` being relative to the start of the line
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedItem {
    pub text: String,
    pub emphasis: Emphasis,
    pub x: Pt,
    /// Natural width of the item. Whitespace is advanced over by more than this
    /// when the line is stretched.
    pub width: Pt,
    pub is_whitespace: bool,
}

/// Place the items of a line, distributing any leftover width evenly across its
/// whitespace so the line spans exactly `target_width`.
///
/// The last line of a paragraph, and any line without whitespace to stretch,
/// keeps its natural spacing.
pub fn justify(line: &Line, target_width: Pt, is_last_line: bool) -> Vec<PositionedItem> {
    let stretch_count = line.stretch_count();
    let extra_per_space = if is_last_line || stretch_count == 0 {
        Pt::ZERO
    } else {
        (target_width - line.natural_width).max(Pt::ZERO) / stretch_count as f32
    };

    let mut x = Pt::ZERO;
    line.items
        .iter()
        .map(|item| {
            let placed = PositionedItem {
                text: item.text.clone(),
                emphasis: item.emphasis,
                x,
                width: item.width,
                is_whitespace: item.is_whitespace,
            };
            x += item.width;
            if item.is_whitespace {
                x += extra_per_space;
            }
            placed
        })
        .collect()
}
