use super::Emphasis;
use crate::surface::{FontGuard, StyleFonts, Surface};
use crate::{Error, Pt};

/// Measure the width of `text` as it would be drawn with the given emphasis.
///
/// The surface is switched to the matching font for the duration of the
/// measurement and then put back to whatever font was active before, regardless
/// of whether measuring succeeded. A failure to measure is treated as a
/// misconfigured surface and returned to the caller; a failure to restore the
/// previous font is logged and ignored.
pub fn measure<S: Surface + ?Sized>(
    surface: &mut S,
    fonts: &StyleFonts<S::Font>,
    text: &str,
    emphasis: Emphasis,
) -> Result<Pt, Error> {
    let width = {
        let guard = FontGuard::switch(surface, fonts.resolve(emphasis))?;
        guard.width_of_string(text)?
    };

    if !width.is_finite() || width < Pt::ZERO {
        return Err(Error::InvalidWidth {
            text: text.to_string(),
            width: *width,
        });
    }

    Ok(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Regular glyphs are 1pt wide, bold glyphs 2pt. Can be told to refuse
    /// switching back to a particular font.
    #[derive(Default)]
    struct Probe {
        font: Option<u8>,
        refuse: Option<u8>,
        broken_widths: bool,
    }

    impl Surface for Probe {
        type Font = u8;

        fn set_font(&mut self, font: u8) -> Result<(), Error> {
            if self.refuse == Some(font) {
                return Err(Error::Surface(format!("cannot select font {font}")));
            }
            self.font = Some(font);
            Ok(())
        }

        fn font(&self) -> Option<u8> {
            self.font
        }

        fn clear_font(&mut self) {
            self.font = None;
        }

        fn width_of_string(&self, text: &str) -> Result<Pt, Error> {
            if self.broken_widths {
                return Ok(Pt(f32::NAN));
            }
            let per_char = match self.font.ok_or(Error::NoActiveFont)? {
                1 => 2.0,
                _ => 1.0,
            };
            Ok(Pt(text.chars().count() as f32 * per_char))
        }

        fn draw_text(&mut self, _text: &str, _x: Pt, _y: Pt) -> Result<(), Error> {
            Ok(())
        }
    }

    const FONTS: StyleFonts<u8> = StyleFonts {
        regular: 0,
        emphasized: 1,
    };

    #[test]
    fn measures_in_the_requested_face_and_restores_the_previous_one() {
        let mut surface = Probe {
            font: Some(7),
            ..Default::default()
        };
        let w = measure(&mut surface, &FONTS, "abc", Emphasis::Emphasized).unwrap();
        assert_eq!(w, Pt(6.0));
        assert_eq!(surface.font, Some(7));

        let w = measure(&mut surface, &FONTS, "abc", Emphasis::Regular).unwrap();
        assert_eq!(w, Pt(3.0));
        assert_eq!(surface.font, Some(7));
    }

    #[test]
    fn clears_the_font_when_none_was_active() {
        let mut surface = Probe::default();
        measure(&mut surface, &FONTS, "abc", Emphasis::Regular).unwrap();
        assert_eq!(surface.font, None);
    }

    #[test]
    fn restore_failures_are_swallowed() {
        let mut surface = Probe {
            font: Some(7),
            refuse: Some(7),
            ..Default::default()
        };
        let first = measure(&mut surface, &FONTS, "ab", Emphasis::Emphasized).unwrap();
        let second = measure(&mut surface, &FONTS, "ab", Emphasis::Regular).unwrap();
        assert_eq!(first, Pt(4.0));
        assert_eq!(second, Pt(2.0));
    }

    #[test]
    fn invalid_widths_are_fatal() {
        let mut surface = Probe {
            broken_widths: true,
            ..Default::default()
        };
        let err = measure(&mut surface, &FONTS, "ab", Emphasis::Regular).unwrap_err();
        assert!(matches!(err, Error::InvalidWidth { .. }));
        assert_eq!(surface.font, None);
    }
}
