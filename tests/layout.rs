mod common;

use common::*;
use pdf_typeset::layout::{
    justify, layout_paragraph, pack, render_paragraph, tokenize, Alignment, Cursor, Emphasis,
    Line, ParagraphStyle, StyledSegment, FIT_TOLERANCE,
};
use pdf_typeset::{Error, Pt};

fn style() -> ParagraphStyle {
    ParagraphStyle::default().with_line_height(Pt(10.0))
}

fn start() -> Cursor {
    Cursor::new(Pt(10.0), Pt(20.0))
}

fn fixed_width(text: &str, emphasis: Emphasis) -> Result<Pt, Error> {
    let advance = match emphasis {
        Emphasis::Regular => REGULAR_ADVANCE,
        Emphasis::Emphasized => BOLD_ADVANCE,
    };
    Ok(Pt(text.chars().count() as f32 * advance))
}

/// Every lipsum word followed by a space, every fifth word in bold
fn lipsum_segments(words: usize) -> (String, Vec<StyledSegment>) {
    let text = lipsum::lipsum(words);
    let segments = text
        .split_whitespace()
        .enumerate()
        .map(|(i, word)| {
            let emphasis = if i % 5 == 4 {
                Emphasis::Emphasized
            } else {
                Emphasis::Regular
            };
            StyledSegment::new(format!("{word} "), emphasis)
        })
        .collect();
    (text, segments)
}

/// Put the text of packed lines back together, re-joining hyphenated words
fn reassemble(lines: &[Line]) -> String {
    let mut out = String::new();
    for line in lines {
        let text = line.text();
        match text.strip_suffix('-') {
            Some(head) if line.forced => out.push_str(head),
            _ => {
                out.push_str(&text);
                out.push(' ');
            }
        }
    }
    out
}

#[test]
fn short_paragraph_is_a_single_unjustified_line() {
    let mut surface = MockSurface::with_lines(11.0, 10, 10.0);
    let end = render_paragraph(
        &mut surface,
        &FONTS,
        &[StyledSegment::regular("Hello world")],
        Pt(11.0),
        &style(),
        start(),
    )
    .expect("can render");

    assert_eq!(surface.texts(), vec!["Hello", "world"]);
    assert_eq!(surface.draws[0].x, 10.0);
    assert_eq!(surface.draws[1].x, 16.0);
    assert!(surface.draws.iter().all(|d| d.y == 20.0));
    assert_eq!(end, Cursor::new(Pt(10.0), Pt(30.0)));
}

#[test]
fn full_lines_are_stretched_and_the_last_is_not() {
    let mut surface = MockSurface::with_lines(6.0, 10, 10.0);
    let end = render_paragraph(
        &mut surface,
        &FONTS,
        &[StyledSegment::regular("a a a a a a a")],
        Pt(6.0),
        &style(),
        start(),
    )
    .expect("can render");

    let lines = surface.lines();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].2, "a a a");
    assert_eq!(lines[1].2, "a a a");
    assert_eq!(lines[2].2, "a");

    // one point left over on a line of two spaces
    let xs: Vec<f32> = surface.draws[..3].iter().map(|d| d.x).collect();
    assert_eq!(xs, vec![10.0, 12.5, 15.0]);
    assert_eq!(surface.draws[6].x, 10.0);

    let ys: Vec<f32> = lines.iter().map(|l| l.1).collect();
    assert_eq!(ys, vec![20.0, 30.0, 40.0]);
    assert_eq!(end, Cursor::new(Pt(10.0), Pt(50.0)));
}

#[test]
fn left_alignment_keeps_natural_spacing() {
    let mut surface = MockSurface::with_lines(6.0, 10, 10.0);
    render_paragraph(
        &mut surface,
        &FONTS,
        &[StyledSegment::regular("a a a a")],
        Pt(6.0),
        &style().with_alignment(Alignment::Left),
        start(),
    )
    .expect("can render");

    let xs: Vec<f32> = surface.draws[..3].iter().map(|d| d.x).collect();
    assert_eq!(xs, vec![10.0, 12.0, 14.0]);
}

#[test]
fn overlong_words_are_hyphenated_across_lines() {
    let mut surface = MockSurface::with_lines(10.0, 10, 10.0);
    render_paragraph(
        &mut surface,
        &FONTS,
        &[StyledSegment::regular("Supercalifragilisticexpialidocious")],
        Pt(10.0),
        &style(),
        start(),
    )
    .expect("can render");

    assert_eq!(
        surface.texts(),
        vec!["Supercali-", "fragilist-", "icexpiali-", "docious"]
    );
    assert!(surface.draws.iter().all(|d| d.x == 10.0));
}

#[test]
fn empty_paragraphs_draw_nothing() {
    let mut surface = MockSurface::with_lines(10.0, 10, 10.0);
    for segments in [
        vec![],
        vec![StyledSegment::regular("")],
        vec![StyledSegment::regular("   \n\t ")],
    ] {
        let end = render_paragraph(&mut surface, &FONTS, &segments, Pt(10.0), &style(), start())
            .expect("can render");
        assert_eq!(end, start());
    }
    assert!(surface.draws.is_empty());
}

#[test]
fn emphasized_runs_are_measured_and_drawn_in_bold() {
    let mut surface = MockSurface::with_lines(12.0, 10, 10.0);
    render_paragraph(
        &mut surface,
        &FONTS,
        &[
            StyledSegment::regular("I hereby give my "),
            StyledSegment::emphasized("consent"),
        ],
        Pt(12.0),
        &style(),
        start(),
    )
    .expect("can render");

    let lines = surface.lines();
    assert_eq!(
        lines.iter().map(|l| l.2.as_str()).collect::<Vec<_>>(),
        vec!["I hereby", "give my", "consent"]
    );

    let consent = surface.draws.last().expect("something was drawn");
    assert_eq!(consent.text, "consent");
    assert_eq!(consent.font, MockFont::Bold);
    assert_eq!(consent.x, 10.0);
    assert!(surface.draws[..4].iter().all(|d| d.font == MockFont::Regular));

    // "give my" is 7pt wide, leaving 5pt for its one space
    assert_eq!(surface.draws[3].text, "my");
    assert_eq!(surface.draws[3].x, 20.0);
}

#[test]
fn the_active_font_is_restored_after_rendering() {
    let mut surface = MockSurface::with_lines(20.0, 10, 10.0);
    let segments = [
        StyledSegment::regular("plain and "),
        StyledSegment::emphasized("bold"),
    ];

    render_paragraph(&mut surface, &FONTS, &segments, Pt(20.0), &style(), start())
        .expect("can render");
    assert_eq!(surface.font, None);

    surface.font = Some(MockFont::Caption);
    render_paragraph(&mut surface, &FONTS, &segments, Pt(20.0), &style(), start())
        .expect("can render");
    assert_eq!(surface.font, Some(MockFont::Caption));
}

#[test]
fn every_token_is_measured_once() {
    let mut surface = MockSurface::with_lines(6.0, 10, 10.0);
    let paragraph = layout_paragraph(
        &mut surface,
        &FONTS,
        &[StyledSegment::regular("a a a a a a a")],
        Pt(6.0),
    )
    .expect("can lay out");

    assert_eq!(paragraph.len(), 3);
    assert_eq!(surface.measurements.get(), 13);
}

#[test]
fn lines_never_overflow_or_end_in_whitespace() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (_, segments) = lipsum_segments(400);

    for target in [15.0, 23.5, 40.0, 81.0] {
        let target = Pt(target);
        let lines = pack(tokenize(&segments), target, fixed_width).expect("can pack");
        assert!(!lines.is_empty());

        for line in &lines {
            assert!(
                line.natural_width <= target + FIT_TOLERANCE,
                "{:?} is wider than {target}",
                line.text()
            );
            let first = line.items.first().expect("lines are never empty");
            let last = line.items.last().expect("lines are never empty");
            assert!(!first.is_whitespace);
            assert!(!last.is_whitespace);
            assert!(line
                .items
                .windows(2)
                .all(|pair| !(pair[0].is_whitespace && pair[1].is_whitespace)));
        }
    }
}

#[test]
fn justified_lines_span_the_target_width() {
    let (_, segments) = lipsum_segments(400);

    for target in [23.5, 40.0, 81.0] {
        let target = Pt(target);
        let lines = pack(tokenize(&segments), target, fixed_width).expect("can pack");
        let last_index = lines.len() - 1;

        for (index, line) in lines.iter().enumerate() {
            let placed = justify(line, target, index == last_index);
            let last = placed.last().expect("lines are never empty");
            let right_edge = last.x + last.width;

            if index == last_index || line.stretch_count() == 0 {
                assert!((right_edge - line.natural_width).abs() <= FIT_TOLERANCE.0);
            } else {
                assert!(
                    (right_edge - target).abs() <= FIT_TOLERANCE.0,
                    "{:?} ends at {right_edge}, not {target}",
                    line.text()
                );
            }
        }
    }
}

#[test]
fn packing_keeps_every_word() {
    let (text, segments) = lipsum_segments(400);

    for target in [15.0, 40.0, 81.0] {
        let lines = pack(tokenize(&segments), Pt(target), fixed_width).expect("can pack");
        assert_eq!(normalize(&reassemble(&lines)), normalize(&text));
    }
}

#[test]
fn packing_terminates_on_narrow_lines() {
    let word: String = lipsum::lipsum(60).split_whitespace().collect();
    let char_count = word.chars().count();

    let lines = pack(
        tokenize(&[StyledSegment::regular(word.clone())]),
        Pt(4.0),
        fixed_width,
    )
    .expect("can pack");

    // three characters and a hyphen per line, until at most four are left
    assert_eq!(lines.len(), (char_count - 2) / 3 + 1);
    assert!(lines[..lines.len() - 1].iter().all(|l| l.forced));
    assert_eq!(normalize(&reassemble(&lines)), word);

    let lines = pack(
        tokenize(&[StyledSegment::regular(word)]),
        Pt::ZERO,
        fixed_width,
    )
    .expect("can pack");
    assert_eq!(lines.len(), char_count);
}

#[test]
fn measuring_errors_abort_rendering() {
    // a surface without any usable fonts
    struct Broken;
    impl pdf_typeset::Surface for Broken {
        type Font = u8;
        fn set_font(&mut self, _: u8) -> Result<(), Error> {
            Err(Error::Surface("no fonts installed".into()))
        }
        fn font(&self) -> Option<u8> {
            None
        }
        fn clear_font(&mut self) {}
        fn width_of_string(&self, _: &str) -> Result<Pt, Error> {
            Err(Error::NoActiveFont)
        }
        fn draw_text(&mut self, _: &str, _: Pt, _: Pt) -> Result<(), Error> {
            Ok(())
        }
    }

    let fonts = pdf_typeset::StyleFonts::new(0u8, 1u8);
    let result = render_paragraph(
        &mut Broken,
        &fonts,
        &[StyledSegment::regular("hello")],
        Pt(10.0),
        &style(),
        start(),
    );
    assert!(matches!(result, Err(Error::Surface(_))));
}
