// SPDX-License-Identifier: MIT
//
// APCA — Accessible Perceptual Contrast Algorithm (W3 0.0.98G-4g).
//
// Returns a signed lightness contrast, Lc, roughly in [-108, 106]:
//
//   positive  dark text on a light background
//   negative  light text on a dark background
//   0         contrast too low to matter
//
// |Lc| 60 is about where body text becomes comfortable, 45 for large
// text, 90 for fine print. Unlike the WCAG 2.x ratio the score is not
// symmetric: swapping text and background changes the magnitude.
//
// Constants match the apca-w3 0.1.9 `SA98G` set. Luminance uses a plain
// 2.4 power curve, not the piecewise sRGB transfer function.

use crate::color::Rgb;

const MAIN_TRC: f64 = 2.4;
const S_RCO: f64 = 0.212_672_9;
const S_GCO: f64 = 0.715_152_2;
const S_BCO: f64 = 0.072_175_0;

const NORM_BG: f64 = 0.56;
const NORM_TXT: f64 = 0.57;
const REV_BG: f64 = 0.65;
const REV_TXT: f64 = 0.62;

const BLK_THRS: f64 = 0.022;
const BLK_CLMP: f64 = 1.414;

const SCALE_BOW: f64 = 1.14;
const SCALE_WOB: f64 = 1.14;
const LO_BOW_OFFSET: f64 = 0.027;
const LO_WOB_OFFSET: f64 = 0.027;
const DELTA_Y_MIN: f64 = 0.0005;
const LO_CLIP: f64 = 0.1;

// ─── Metric Seam ─────────────────────────────────────────────────────────────

/// Something that scores text legibility against a background.
///
/// The searches in `mb-engine` only ever look at the magnitude of the
/// score, so any signed or unsigned metric works. [`Apca`] is the standard
/// implementation; plain closures work too:
///
/// ```
/// use mb_color::apca::ContrastMetric;
/// use mb_color::color::{Rgb, contrast_ratio};
///
/// let wcag = |fg: Rgb, bg: Rgb| contrast_ratio(fg, bg);
/// assert!(wcag.score(Rgb::BLACK, Rgb::WHITE) > 20.0);
/// ```
pub trait ContrastMetric {
    /// Score `fg` text drawn on `bg`.
    fn score(&self, fg: Rgb, bg: Rgb) -> f64;
}

impl<F> ContrastMetric for F
where
    F: Fn(Rgb, Rgb) -> f64,
{
    #[inline]
    fn score(&self, fg: Rgb, bg: Rgb) -> f64 {
        self(fg, bg)
    }
}

/// The APCA-W3 metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Apca;

impl ContrastMetric for Apca {
    #[inline]
    fn score(&self, fg: Rgb, bg: Rgb) -> f64 {
        apca_lc(fg, bg)
    }
}

// ─── APCA ────────────────────────────────────────────────────────────────────

/// Signed Lc of `fg` text on `bg`.
///
/// ```
/// use mb_color::apca::apca_lc;
/// use mb_color::color::Rgb;
///
/// assert!(apca_lc(Rgb::BLACK, Rgb::WHITE) > 105.0);
/// assert!(apca_lc(Rgb::WHITE, Rgb::BLACK) < -107.0);
/// ```
#[must_use]
pub fn apca_lc(fg: Rgb, bg: Rgb) -> f64 {
    apca_contrast(srgb_to_y(fg), srgb_to_y(bg))
}

/// Screen luminance Y of an sRGB color, as APCA estimates it.
#[must_use]
pub fn srgb_to_y(color: Rgb) -> f64 {
    let lin = |v: u8| (f64::from(v) / 255.0).powf(MAIN_TRC);
    S_RCO.mul_add(lin(color.r), S_GCO.mul_add(lin(color.g), S_BCO * lin(color.b)))
}

/// Lc from two luminances.
///
/// Luminances outside [0, 1.1], or NaN, score 0.
#[must_use]
pub fn apca_contrast(text_y: f64, bg_y: f64) -> f64 {
    let in_range = |y: f64| (0.0..=1.1).contains(&y);
    if !in_range(text_y) || !in_range(bg_y) {
        return 0.0;
    }

    let txt_y = soft_clamp_black(text_y);
    let bg_y = soft_clamp_black(bg_y);

    if (bg_y - txt_y).abs() < DELTA_Y_MIN {
        return 0.0;
    }

    let output = if bg_y > txt_y {
        // Normal polarity: dark text on a light background.
        let sapc = (bg_y.powf(NORM_BG) - txt_y.powf(NORM_TXT)) * SCALE_BOW;
        if sapc < LO_CLIP { 0.0 } else { sapc - LO_BOW_OFFSET }
    } else {
        // Reverse polarity: light text on a dark background.
        let sapc = (bg_y.powf(REV_BG) - txt_y.powf(REV_TXT)) * SCALE_WOB;
        if sapc > -LO_CLIP { 0.0 } else { sapc + LO_WOB_OFFSET }
    };

    output * 100.0
}

/// Lift near-black luminance so very dark pairs do not overstate contrast.
#[inline]
fn soft_clamp_black(y: f64) -> f64 {
    if y > BLK_THRS {
        y
    } else {
        y + (BLK_THRS - y).powf(BLK_CLMP)
    }
}
