//! Accent derivation: one vivid color from a mood's two stops.
//!
//! Closed-form, no search. Hue is the circular mean of the two OKLCH hues,
//! chroma is averaged and pushed up a little, lightness averaged and pulled
//! down a little. The result is clamped in HSL so it is never neon and
//! never washes out toward white or black.

use mb_color::color::{Hsl, Oklch, circular_mean_hue};
use mb_color::token::{hsl_token, parse_hsl_token};

const CHROMA_GAIN: f64 = 1.1;
const CHROMA_LIFT: f64 = 0.015;
const CHROMA_CAP: f64 = 0.32;
const LIGHTNESS_GAIN: f64 = 0.98;
const LIGHTNESS_LIFT: f64 = 0.01;

const SATURATION_RANGE: (f64, f64) = (36.0, 80.0);
const LIGHTNESS_RANGE: (f64, f64) = (40.0, 68.0);

/// Derive an accent from two mood colors.
///
/// ```
/// use mb_color::color::Hsl;
/// use mb_engine::accent::derive_accent;
///
/// let accent = derive_accent(Hsl::new(350.0, 80.0, 50.0), Hsl::new(10.0, 80.0, 50.0));
/// assert!(accent.h > 340.0 || accent.h < 20.0);
/// ```
#[must_use]
pub fn derive_accent(m1: Hsl, m2: Hsl) -> Hsl {
    let a = m1.to_oklch();
    let b = m2.to_oklch();

    let h = circular_mean_hue(&[a.h, b.h]);
    let c = ((a.c + b.c) / 2.0).mul_add(CHROMA_GAIN, CHROMA_LIFT).min(CHROMA_CAP);
    let l = ((a.l + b.l) / 2.0)
        .mul_add(LIGHTNESS_GAIN, LIGHTNESS_LIFT)
        .clamp(0.0, 1.0);

    let mut out = Oklch::new(l, c, h).to_rgb().to_hsl();
    out.s = out.s.clamp(SATURATION_RANGE.0, SATURATION_RANGE.1);
    out.l = out.l.clamp(LIGHTNESS_RANGE.0, LIGHTNESS_RANGE.1);
    out
}

/// [`derive_accent`] over tokens; malformed tokens read as black.
#[must_use]
pub fn derive_accent_token(primary: &str, secondary: &str) -> String {
    hsl_token(derive_accent(parse_hsl_token(primary), parse_hsl_token(secondary)))
}
