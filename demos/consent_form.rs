//! Typesets a two-page consent form with justified, partly bold paragraphs.
//!
//! ```text
//! cargo run --example consent-form -- Regular.ttf Bold.ttf consent.pdf
//! ```

use pdf_typeset::layout::{Margins, ParagraphStyle, StyledSegment};
use pdf_typeset::pagesize::{PageSetup, A4};
use pdf_typeset::{
    BuilderConfig, Colour, Document, DocumentBuilder, Font, Info, Mm, PdfSurface, Pt, SpanFont,
    StyleFonts,
};

const BODY_SIZE: Pt = Pt(11.0);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [regular, bold, output] = args.as_slice() else {
        eprintln!("usage: consent-form <regular.ttf> <bold.ttf> <output.pdf>");
        std::process::exit(2);
    };

    let mut doc = Document::default();
    doc.set_info(
        Info::new()
            .title("Parental consent form")
            .author("Riverside Youth Football Club")
            .created(chrono::Local::now().fixed_offset())
            .clone(),
    );

    let regular = doc.add_font(Font::load(std::fs::read(regular)?)?);
    let bold = doc.add_font(Font::load(std::fs::read(bold)?)?);
    let line_height = doc.fonts[regular].line_height(BODY_SIZE);

    let fonts = StyleFonts::new(
        SpanFont {
            id: regular,
            size: BODY_SIZE,
        },
        SpanFont {
            id: bold,
            size: BODY_SIZE,
        },
    );

    let footer_font = SpanFont {
        id: regular,
        size: Pt(9.0),
    };
    let mut surface = PdfSurface::new(doc, PageSetup::new(A4, Margins::all(Mm(25.0))), footer_font);
    surface.set_colour(Colour::new_rgb_bytes(0x1f, 0x23, 0x28));

    let style = ParagraphStyle::default().with_line_height(line_height);
    let config = BuilderConfig::default()
        .with_paragraph_style(style)
        .with_heading_style(style.with_alignment(pdf_typeset::layout::Alignment::Left))
        .with_footer("Page {page}");

    let mut builder = DocumentBuilder::new(surface, fonts, config);
    builder.heading("Parental consent form")?;
    builder.spacer(line_height);

    builder.paragraph(&[
        StyledSegment::regular("I, the undersigned parent or legal guardian, hereby give my "),
        StyledSegment::emphasized("consent"),
        StyledSegment::regular(
            " for my child to take part in all training sessions, friendly matches and \
             league fixtures organised by the club during the current season, including \
             travel to and from away grounds in vehicles arranged by the club.",
        ),
    ])?;

    for paragraph in lipsum::lipsum(900).split(". ").collect::<Vec<_>>().chunks(6) {
        builder.paragraph(&[StyledSegment::regular(paragraph.join(". "))])?;
    }

    builder.heading("Medical treatment")?;
    builder.paragraph(&[
        StyledSegment::regular("In an emergency, I "),
        StyledSegment::emphasized("authorise"),
        StyledSegment::regular(
            " the coaching staff to seek medical treatment for my child, and accept that \
             the club will inform me as soon as reasonably possible. Words that do not fit \
             on a line, such as Pneumonoultramicroscopicsilicovolcanoconiosis, are \
             hyphenated.",
        ),
    ])?;

    let surface = builder.finish()?;
    let doc = surface.into_document();
    log::info!("laid out {} pages", doc.page_count());

    let out = std::fs::File::create(output)?;
    doc.write(out)?;
    Ok(())
}
