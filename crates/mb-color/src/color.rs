// SPDX-License-Identifier: MIT
//
// mb-color color spaces — HSL, 8-bit sRGB, linear light, Oklab and OKLCH.
//
// Single-character variable names (r, g, b, l, c, h, a, s, m) are the
// standard mathematical convention in color science. Renaming them would
// make the code harder to compare against reference implementations.
#![allow(clippy::many_single_char_names)]
//
// Mood themes are authored in HSL because that is what CSS custom properties
// hold, but every manipulation the engine performs (chroma boosts, hue
// averaging, interpolation) happens in OKLCH, where lightness, chroma and hue
// move independently and hue wraps cleanly.
//
// Conversion pipeline:
//
//   "H S% L%" token ↔ Hsl ↔ Rgb (u8) ↔ linear sRGB ↔ Oklab ↔ Oklch
//
// Every function here is total. Out-of-gamut OKLCH values are clamped per
// channel on the way back to 8-bit sRGB; NaN collapses to 0 instead of
// propagating into output colors.

use std::fmt;

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// An 8-bit device sRGB color.
///
/// This is the unit every renderer consumes: CSS gradient stops, canvas
/// fills, 24-bit terminal escapes.
///
/// ```
/// use mb_color::color::Rgb;
///
/// let sky = Rgb::new(37, 164, 228);
/// assert_eq!(sky.to_string(), "rgb(37, 164, 228)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as floats in [0, 1].
    #[inline]
    #[must_use]
    pub fn to_unit(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    /// Convert to HSL using the min/max-channel formula.
    ///
    /// Grays (r = g = b) have hue 0 and saturation 0.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn to_hsl(self) -> Hsl {
        let (r, g, b) = self.to_unit();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) * 0.5;
        let d = max - min;

        if d == 0.0 {
            return Hsl::new(0.0, 0.0, l * 100.0);
        }

        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        // `max` is one of the three channels exactly, so equality is safe.
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl::new(normalize_hue(h * 60.0), s * 100.0, l * 100.0)
    }

    /// Convert to Oklab.
    #[must_use]
    pub fn to_oklab(self) -> Oklab {
        let (r, g, b) = self.to_unit();
        let (l, a, b) = linear_srgb_to_oklab(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b));
        Oklab { l, a, b }
    }

    /// Convert to OKLCH.
    #[must_use]
    pub fn to_oklch(self) -> Oklch {
        self.to_oklab().to_oklch()
    }

    /// Channel-wise mean of a set of colors, rounded.
    ///
    /// An empty slice averages to black.
    #[must_use]
    pub fn average(colors: &[Self]) -> Self {
        let n = colors.len().max(1) as f64;
        let (r, g, b) = colors.iter().fold((0.0, 0.0, 0.0), |(r, g, b), c| {
            (r + f64::from(c.r), g + f64::from(c.g), b + f64::from(c.b))
        });
        Self::new(to_u8(r / n), to_u8(g / n), to_u8(b / n))
    }

    /// Alpha-blend `self` over `bg` in device sRGB.
    ///
    /// `alpha` is clamped to [0, 1]; 1 returns `self`, 0 returns `bg`.
    #[must_use]
    pub fn blend_over(self, bg: Self, alpha: f64) -> Self {
        let a = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
        let mix = |fg: u8, bg: u8| to_u8(f64::from(fg).mul_add(a, f64::from(bg) * (1.0 - a)));
        Self::new(mix(self.r, bg.r), mix(self.g, bg.g), mix(self.b, bg.b))
    }
}

impl fmt::Display for Rgb {
    /// CSS functional notation: `rgb(R, G, B)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

// ─── Hsl ─────────────────────────────────────────────────────────────────────

/// A color in HSL: hue in degrees, saturation and lightness in percent.
///
/// The canonical human-authored format. Serialized as a token, see
/// [`crate::token`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hsl {
    /// Hue in degrees, [0, 360).
    pub h: f64,
    /// Saturation in percent, [0, 100].
    pub s: f64,
    /// Lightness in percent, [0, 100].
    pub l: f64,
}

impl Hsl {
    pub const WHITE: Self = Self::new(0.0, 0.0, 100.0);
    pub const NEAR_WHITE: Self = Self::new(0.0, 0.0, 98.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const NEAR_BLACK: Self = Self::new(0.0, 0.0, 10.0);

    #[inline]
    #[must_use]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Convert to 8-bit sRGB with the hue-sector formula.
    ///
    /// Hue is wrapped into [0, 360) first, so any angle is accepted.
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        let s = self.s / 100.0;
        let l = self.l / 100.0;
        let c = (1.0 - 2.0f64.mul_add(l, -1.0).abs()) * s;
        let hp = normalize_hue(self.h) / 60.0;
        let x = c * (1.0 - (hp % 2.0 - 1.0).abs());

        let (r1, g1, b1) = if hp < 1.0 {
            (c, x, 0.0)
        } else if hp < 2.0 {
            (x, c, 0.0)
        } else if hp < 3.0 {
            (0.0, c, x)
        } else if hp < 4.0 {
            (0.0, x, c)
        } else if hp < 5.0 {
            (x, 0.0, c)
        } else {
            (c, 0.0, x)
        };

        let m = c.mul_add(-0.5, l);
        Rgb::new(to_channel(r1 + m), to_channel(g1 + m), to_channel(b1 + m))
    }

    /// Convert to OKLCH through 8-bit sRGB.
    #[must_use]
    pub fn to_oklch(self) -> Oklch {
        self.to_rgb().to_oklch()
    }
}

// ─── Oklab ───────────────────────────────────────────────────────────────────

/// A color in Oklab: perceptual lightness plus two opponent axes.
///
/// Used as the intermediate between linear sRGB and OKLCH, and for
/// perceptual distance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Oklab {
    /// Lightness, roughly [0, 1].
    pub l: f64,
    /// Green–red axis.
    pub a: f64,
    /// Blue–yellow axis.
    pub b: f64,
}

impl Oklab {
    #[inline]
    #[must_use]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Polar form.
    #[must_use]
    pub fn to_oklch(self) -> Oklch {
        let c = self.a.hypot(self.b);
        // Grays come out of the matrices with chroma around 1e-8.
        let h = if c < 1e-6 {
            0.0 // Achromatic — hue is undefined, default to 0
        } else {
            normalize_hue(self.b.atan2(self.a).to_degrees())
        };
        Oklch { l: self.l, c, h }
    }

    /// Convert to 8-bit sRGB, clamping each channel after the inverse gamma.
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        let (r, g, b) = oklab_to_linear_srgb(self.l, self.a, self.b);
        Rgb::new(
            to_channel(linear_to_srgb(r)),
            to_channel(linear_to_srgb(g)),
            to_channel(linear_to_srgb(b)),
        )
    }

    /// Euclidean distance (ΔE OK). Values below ~0.02 are imperceptible.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        db.mul_add(db, dl.mul_add(dl, da * da)).sqrt()
    }
}

// ─── Oklch ───────────────────────────────────────────────────────────────────

/// Largest chroma the engine ever converts back to sRGB.
///
/// Vivid sRGB primaries top out around 0.32; anything above 0.4 only
/// produces clamping artifacts.
pub const MAX_CHROMA: f64 = 0.4;

/// A color in OKLCH: lightness, chroma and hue angle.
///
/// All search, derivation and interpolation happens here.
///
/// ```
/// use mb_color::color::{Oklch, Rgb};
///
/// let red = Rgb::new(255, 0, 0).to_oklch();
/// assert!(red.h > 20.0 && red.h < 35.0);
/// assert_eq!(red.to_rgb(), Rgb::new(255, 0, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Oklch {
    /// Lightness: 0.0 (black) to 1.0 (white).
    pub l: f64,
    /// Chroma: 0.0 (gray) upward; sRGB tops out near 0.32.
    pub c: f64,
    /// Hue angle in degrees, [0, 360).
    pub h: f64,
}

impl Oklch {
    #[inline]
    #[must_use]
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }

    /// A zero-chroma color at the given lightness.
    #[inline]
    #[must_use]
    pub const fn gray(l: f64) -> Self {
        Self::new(l, 0.0, 0.0)
    }

    /// Whether this color has no visible chroma.
    #[inline]
    #[must_use]
    pub fn is_achromatic(self) -> bool {
        self.c.abs() < 1e-5
    }

    /// Rectangular form.
    #[must_use]
    pub fn to_oklab(self) -> Oklab {
        let h_rad = self.h.to_radians();
        Oklab {
            l: self.l,
            a: self.c * h_rad.cos(),
            b: self.c * h_rad.sin(),
        }
    }

    /// Convert to 8-bit sRGB.
    ///
    /// Synthetic values (boosted chroma, interpolation results) routinely
    /// land slightly outside sRGB; each channel is clamped to [0, 255].
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        self.to_oklab().to_rgb()
    }

    /// Multiply chroma by `factor`, capped at `ceiling`.
    #[inline]
    #[must_use]
    pub fn boost_chroma(self, factor: f64, ceiling: f64) -> Self {
        Self {
            c: (self.c * factor).min(ceiling),
            ..self
        }
    }

    /// Interpolate toward `other`.
    ///
    /// `t` = 0.0 returns `self`, `t` = 1.0 returns `other`; `t` is clamped.
    /// Lightness and chroma move linearly, hue takes the shortest path
    /// around the wheel.
    #[must_use]
    pub fn mix(self, other: &Self, t: f64) -> Self {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        Self {
            l: (other.l - self.l).mul_add(t, self.l),
            c: (other.c - self.c).mul_add(t, self.c),
            h: interpolate_hue(self.h, other.h, t),
        }
    }

    /// Perceptual distance (ΔE OK) to another color.
    #[must_use]
    pub fn distance(self, other: &Self) -> f64 {
        self.to_oklab().distance(other.to_oklab())
    }
}

// ─── Legacy WCAG 2.x ─────────────────────────────────────────────────────────
//
// Kept for callers that still report WCAG ratios. The text searches use
// APCA (see `crate::apca`), never these.

/// Relative luminance per WCAG 2.x, in [0, 1].
///
/// Uses the WCAG linearization (breakpoint 0.03928), which differs very
/// slightly from the IEC sRGB curve used for Oklab.
#[must_use]
pub fn relative_luminance(color: Rgb) -> f64 {
    let lin = |v: u8| {
        let s = f64::from(v) / 255.0;
        if s <= 0.039_28 {
            s / 12.92
        } else {
            ((s + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126f64.mul_add(lin(color.r), 0.7152f64.mul_add(lin(color.g), 0.0722 * lin(color.b)))
}

/// WCAG 2.x contrast ratio, in [1, 21], independent of argument order.
#[must_use]
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

// ─── Hue Arithmetic ──────────────────────────────────────────────────────────

/// Normalize a hue angle to the range [0, 360).
#[inline]
#[must_use]
pub fn normalize_hue(h: f64) -> f64 {
    let h = h.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if h >= 360.0 { 0.0 } else { h }
}

/// Absolute hue difference along the shortest arc, in [0, 180].
#[inline]
#[must_use]
pub fn hue_diff(a: f64, b: f64) -> f64 {
    let d = (a - b).abs() % 360.0;
    if d > 180.0 { 360.0 - d } else { d }
}

/// Interpolate between two hue angles taking the shortest path.
#[inline]
#[must_use]
pub fn interpolate_hue(h1: f64, h2: f64, t: f64) -> f64 {
    let diff = h2 - h1;
    let diff = if diff > 180.0 {
        diff - 360.0
    } else if diff < -180.0 {
        diff + 360.0
    } else {
        diff
    };
    normalize_hue(diff.mul_add(t, h1))
}

/// Circular mean of a set of hue angles.
///
/// Sums the unit vectors and takes the angle of the resultant, so 350° and
/// 10° average to 0° rather than 180°. An empty set, or hues that cancel
/// out exactly, yield 0°.
#[must_use]
pub fn circular_mean_hue(hues: &[f64]) -> f64 {
    let (x, y) = hues.iter().fold((0.0f64, 0.0f64), |(x, y), h| {
        let rad = h.to_radians();
        (x + rad.cos(), y + rad.sin())
    });
    normalize_hue(y.atan2(x).to_degrees())
}

// ─── Oklab ↔ Linear sRGB ─────────────────────────────────────────────────────
//
// Björn Ottosson's matrices, through the intermediate LMS (cone response)
// space. Reference: https://bottosson.github.io/posts/oklab/

/// Convert Oklab (L, a, b) to linear sRGB. May leave [0, 1].
#[inline]
fn oklab_to_linear_srgb(l_ok: f64, a: f64, b: f64) -> (f64, f64, f64) {
    // Oklab → LMS (cube roots)
    let l_ = 0.215_803_757_3f64.mul_add(b, 0.396_337_777_4f64.mul_add(a, l_ok));
    let m_ = 0.063_854_172_8f64.mul_add(-b, 0.105_561_345_8f64.mul_add(-a, l_ok));
    let s_ = 1.291_485_548_0f64.mul_add(-b, 0.089_484_177_5f64.mul_add(-a, l_ok));

    // Undo cube root
    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    // LMS → Linear sRGB
    let r = 0.230_969_929_2f64.mul_add(s, 4.076_741_662_1f64.mul_add(l, -(3.307_711_591_3 * m)));
    let g = 0.341_319_396_5f64.mul_add(-s, (-1.268_438_004_6f64).mul_add(l, 2.609_757_401_1 * m));
    let bl = 1.707_614_701_0f64.mul_add(s, (-0.004_196_086_3f64).mul_add(l, -(0.703_418_614_7 * m)));

    (r, g, bl)
}

/// Convert linear sRGB to Oklab (L, a, b).
#[inline]
fn linear_srgb_to_oklab(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    // Linear sRGB → LMS
    let l = 0.051_445_992_9f64.mul_add(b, 0.412_221_470_8f64.mul_add(r, 0.536_332_536_3 * g));
    let m = 0.107_396_956_6f64.mul_add(b, 0.211_903_498_2f64.mul_add(r, 0.680_699_545_1 * g));
    let s = 0.629_978_700_5f64.mul_add(b, 0.088_302_461_9f64.mul_add(r, 0.281_718_837_6 * g));

    // Cube root (LMS → Oklab intermediate)
    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    // Oklab intermediate → Oklab
    let l_ok = 0.004_072_046_8f64.mul_add(-s_, 0.210_454_255_3f64.mul_add(l_, 0.793_617_785_0 * m_));
    let a = 0.450_593_709_9f64.mul_add(s_, 1.977_998_495_1f64.mul_add(l_, -(2.428_592_205_0 * m_)));
    let b_ok = 0.808_675_766_0f64.mul_add(-s_, 0.025_904_037_1f64.mul_add(l_, 0.782_771_766_2 * m_));

    (l_ok, a, b_ok)
}

// ─── Linear sRGB ↔ sRGB (Gamma) ──────────────────────────────────────────────

/// Convert a single linear sRGB component to sRGB (apply gamma).
///
/// Negative input stays on the linear segment, so out-of-gamut values
/// never reach `powf` with a negative base.
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f64.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

/// Convert a single sRGB component in [0, 1] to linear sRGB (remove gamma).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert a unit float (0.0–1.0) to an 8-bit channel, rounding and clamping.
#[inline]
fn to_channel(v: f64) -> u8 {
    to_u8(v * 255.0)
}

/// Round and clamp a float to [0, 255]. NaN maps to 0.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation,
    // and `as` saturates NaN to 0.
    v.round().clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    // Helper: assert RGB values are close (within ±1 out of 255).
    fn assert_rgb_close(actual: Rgb, expected: Rgb) {
        let close = |a: u8, e: u8| (i16::from(a) - i16::from(e)).unsigned_abs() <= 1;
        assert!(
            close(actual.r, expected.r) && close(actual.g, expected.g) && close(actual.b, expected.b),
            "RGB mismatch: got {actual}, expected {expected}"
        );
    }

    // ── HSL → RGB ────────────────────────────────────────────────────────

    #[test]
    fn hsl_primaries() {
        assert_eq!(Hsl::new(0.0, 100.0, 50.0).to_rgb(), Rgb::new(255, 0, 0));
        assert_eq!(Hsl::new(120.0, 100.0, 50.0).to_rgb(), Rgb::new(0, 255, 0));
        assert_eq!(Hsl::new(240.0, 100.0, 50.0).to_rgb(), Rgb::new(0, 0, 255));
    }

    #[test]
    fn hsl_every_sector() {
        assert_eq!(Hsl::new(60.0, 100.0, 50.0).to_rgb(), Rgb::new(255, 255, 0));
        assert_eq!(Hsl::new(180.0, 100.0, 50.0).to_rgb(), Rgb::new(0, 255, 255));
        assert_eq!(Hsl::new(300.0, 100.0, 50.0).to_rgb(), Rgb::new(255, 0, 255));
        assert_eq!(Hsl::new(30.0, 100.0, 50.0).to_rgb(), Rgb::new(255, 128, 0));
    }

    #[test]
    fn hsl_mood_tokens() {
        // happy primary / calm primary from the mood table
        assert_eq!(Hsl::new(50.0, 98.0, 62.0).to_rgb(), Rgb::new(253, 221, 63));
        assert_eq!(Hsl::new(200.0, 78.0, 52.0).to_rgb(), Rgb::new(37, 164, 228));
    }

    #[test]
    fn hsl_hue_wraps() {
        assert_eq!(
            Hsl::new(370.0, 80.0, 40.0).to_rgb(),
            Hsl::new(10.0, 80.0, 40.0).to_rgb()
        );
        assert_eq!(
            Hsl::new(-30.0, 80.0, 40.0).to_rgb(),
            Hsl::new(330.0, 80.0, 40.0).to_rgb()
        );
    }

    #[test]
    fn hsl_grays_ignore_hue() {
        assert_eq!(Hsl::new(123.0, 0.0, 50.0).to_rgb(), Rgb::new(128, 128, 128));
        assert_eq!(Hsl::WHITE.to_rgb(), Rgb::WHITE);
        assert_eq!(Hsl::BLACK.to_rgb(), Rgb::BLACK);
    }

    #[test]
    fn hsl_nan_does_not_escape() {
        let rgb = Hsl::new(f64::NAN, f64::NAN, f64::NAN).to_rgb();
        assert_eq!(rgb, Rgb::BLACK);
    }

    // ── RGB → HSL ────────────────────────────────────────────────────────

    #[test]
    fn rgb_to_hsl_gray_is_degenerate() {
        let hsl = Rgb::new(128, 128, 128).to_hsl();
        assert!(approx_eq(hsl.h, 0.0, 1e-9));
        assert!(approx_eq(hsl.s, 0.0, 1e-9));
        assert!(approx_eq(hsl.l, 50.2, 0.05));
    }

    #[test]
    fn rgb_to_hsl_known_values() {
        let hsl = Rgb::new(255, 0, 0).to_hsl();
        assert!(approx_eq(hsl.h, 0.0, 1e-9) && approx_eq(hsl.s, 100.0, 1e-9) && approx_eq(hsl.l, 50.0, 1e-9));

        let hsl = Rgb::new(0, 0, 255).to_hsl();
        assert!(approx_eq(hsl.h, 240.0, 1e-9));

        // Magenta-side red: g < b puts the hue in the last sector.
        let hsl = Rgb::new(255, 0, 128).to_hsl();
        assert!(hsl.h > 329.0 && hsl.h < 331.0, "hue was {}", hsl.h);
    }

    #[test]
    fn hsl_rgb_roundtrip_mood_colors() {
        for hsl in [
            Hsl::new(50.0, 98.0, 62.0),
            Hsl::new(160.0, 82.0, 52.0),
            Hsl::new(285.0, 92.0, 62.0),
            Hsl::new(5.0, 80.0, 48.0),
        ] {
            let back = hsl.to_rgb().to_hsl();
            assert!(hue_diff(back.h, hsl.h) <= 1.0, "{hsl:?} -> {back:?}");
            assert!(approx_eq(back.s, hsl.s, 1.0), "{hsl:?} -> {back:?}");
            assert!(approx_eq(back.l, hsl.l, 1.0), "{hsl:?} -> {back:?}");
        }
    }

    // ── Oklab / OKLCH Known Values ───────────────────────────────────────

    #[test]
    fn black_is_zero_lightness() {
        let black = Rgb::BLACK.to_oklch();
        assert!(approx_eq(black.l, 0.0, 0.001));
        assert!(approx_eq(black.c, 0.0, 0.001));
    }

    #[test]
    fn white_is_full_lightness() {
        let white = Rgb::WHITE.to_oklch();
        assert!(approx_eq(white.l, 1.0, 0.001));
        assert!(approx_eq(white.c, 0.0, 0.001));
    }

    #[test]
    fn gray_has_no_chroma() {
        let gray = Rgb::new(128, 128, 128).to_oklch();
        assert!(gray.is_achromatic());
        assert!(approx_eq(gray.h, 0.0, 1e-9));
    }

    #[test]
    fn red_has_hue_near_30() {
        // Pure sRGB red maps to roughly hue 29° in OKLCH
        let red = Rgb::new(255, 0, 0).to_oklch();
        assert!(red.h > 20.0 && red.h < 35.0, "Red hue was {}", red.h);
        assert!(red.c > 0.2, "Red chroma was {}", red.c);
    }

    #[test]
    fn oklch_gray_ramp_is_neutral() {
        for step in 0..=20 {
            let rgb = Oklch::gray(f64::from(step) / 20.0).to_rgb();
            assert!(rgb.r == rgb.g && rgb.g == rgb.b, "L={step}/20 gave {rgb}");
        }
        assert_eq!(Oklch::gray(0.6).to_rgb(), Rgb::new(128, 128, 128));
    }

    // ── Roundtrip Tests ──────────────────────────────────────────────────

    #[test]
    fn srgb_to_oklch_roundtrip() {
        let test_colors = [
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(0, 0, 255),
            Rgb::new(255, 255, 0),
            Rgb::new(0, 255, 255),
            Rgb::new(255, 0, 255),
            Rgb::WHITE,
            Rgb::BLACK,
            Rgb::new(37, 164, 228),
        ];

        for rgb in test_colors {
            assert_rgb_close(rgb.to_oklch().to_rgb(), rgb);
        }
    }

    #[test]
    fn oklch_identity_roundtrip() {
        // Moderate chroma stays well within gamut; precision is limited by
        // 8-bit quantization on the way through sRGB.
        let original = Oklch::new(0.7, 0.10, 90.0);
        let recovered = original.to_rgb().to_oklch();
        assert!(approx_eq(original.l, recovered.l, 0.01), "L: {recovered:?}");
        assert!(approx_eq(original.c, recovered.c, 0.01), "C: {recovered:?}");
        assert!(hue_diff(original.h, recovered.h) < 2.0, "H: {recovered:?}");
    }

    // ── Clamping ─────────────────────────────────────────────────────────

    #[test]
    fn extreme_chroma_is_clamped() {
        // 8-bit channels cannot be out of range by type; this checks that
        // the pipeline saturates rather than collapsing to garbage.
        for h in (0..360).step_by(15) {
            let rgb = Oklch::new(0.6, 1.0, f64::from(h)).to_rgb();
            let channels = [rgb.r, rgb.g, rgb.b];
            assert!(
                channels.contains(&255) || channels.contains(&0),
                "h={h}: {rgb} should hit a gamut edge"
            );
        }
    }

    #[test]
    fn out_of_range_lightness_saturates() {
        assert_eq!(Oklch::new(1.5, 0.0, 0.0).to_rgb(), Rgb::WHITE);
        assert_eq!(Oklch::new(-0.5, 0.0, 0.0).to_rgb(), Rgb::BLACK);
        assert_eq!(Oklch::new(f64::NAN, 0.1, 40.0).to_rgb(), Rgb::BLACK);
    }

    #[test]
    fn boost_chroma_caps_at_ceiling() {
        let c = Oklch::new(0.6, 0.3, 120.0).boost_chroma(1.8, MAX_CHROMA);
        assert!(approx_eq(c.c, 0.4, 1e-12));
        let c = Oklch::new(0.6, 0.1, 120.0).boost_chroma(1.5, MAX_CHROMA);
        assert!(approx_eq(c.c, 0.15, 1e-12));
        assert!(approx_eq(c.h, 120.0, 1e-12) && approx_eq(c.l, 0.6, 1e-12));
    }

    // ── Hue Arithmetic ───────────────────────────────────────────────────

    #[test]
    fn normalize_hue_wraps() {
        assert!(approx_eq(normalize_hue(370.0), 10.0, 1e-9));
        assert!(approx_eq(normalize_hue(-10.0), 350.0, 1e-9));
        assert!(approx_eq(normalize_hue(720.0), 0.0, 1e-9));
        assert!(normalize_hue(-1e-15) < 360.0);
    }

    #[test]
    fn hue_diff_is_shortest_arc() {
        assert!(approx_eq(hue_diff(350.0, 10.0), 20.0, 1e-9));
        assert!(approx_eq(hue_diff(10.0, 350.0), 20.0, 1e-9));
        assert!(approx_eq(hue_diff(0.0, 180.0), 180.0, 1e-9));
    }

    #[test]
    fn circular_mean_straddles_zero() {
        let mean = circular_mean_hue(&[350.0, 10.0]);
        assert!(hue_diff(mean, 0.0) < 1e-6, "mean was {mean}");
    }

    #[test]
    fn circular_mean_plain_case() {
        assert!(approx_eq(circular_mean_hue(&[80.0, 100.0]), 90.0, 1e-9));
        assert!(approx_eq(circular_mean_hue(&[]), 0.0, 1e-9));
    }

    // ── Mix / Interpolation ──────────────────────────────────────────────

    #[test]
    fn mix_endpoints() {
        let a = Oklch::new(0.3, 0.1, 30.0);
        let b = Oklch::new(0.7, 0.2, 270.0);
        let start = a.mix(&b, 0.0);
        let end = a.mix(&b, 1.0);
        assert!(approx_eq(start.l, a.l, 1e-9) && approx_eq(start.c, a.c, 1e-9));
        assert!(approx_eq(end.l, b.l, 1e-9) && approx_eq(end.c, b.c, 1e-9));
        assert!(hue_diff(end.h, b.h) < 1e-9);
    }

    #[test]
    fn mix_clamps_t() {
        let a = Oklch::new(0.3, 0.1, 30.0);
        let b = Oklch::new(0.7, 0.2, 60.0);
        assert!(approx_eq(a.mix(&b, 2.0).l, 0.7, 1e-9));
        assert!(approx_eq(a.mix(&b, -1.0).l, 0.3, 1e-9));
    }

    #[test]
    fn mix_hue_takes_shortest_path() {
        // From 10° to 350° should go through 0°, not through 180°
        let a = Oklch::new(0.5, 0.1, 10.0);
        let b = Oklch::new(0.5, 0.1, 350.0);
        let mixed = a.mix(&b, 0.5);
        assert!(
            mixed.h < 5.0 || mixed.h > 355.0,
            "Expected hue near 0/360, got {}",
            mixed.h
        );
    }

    // ── Distance ─────────────────────────────────────────────────────────

    #[test]
    fn distance_behaves() {
        let a = Oklch::new(0.5, 0.1, 90.0);
        assert!(a.distance(&a) < 1e-12);
        assert!(Oklch::gray(0.0).distance(&Oklch::gray(1.0)) > 0.99);
        let b = Oklch::new(0.51, 0.1, 91.0);
        assert!(a.distance(&b) < 0.02);
    }

    // ── Legacy WCAG ──────────────────────────────────────────────────────

    #[test]
    fn luminance_extremes() {
        assert!(approx_eq(relative_luminance(Rgb::BLACK), 0.0, 1e-9));
        assert!(approx_eq(relative_luminance(Rgb::WHITE), 1.0, 1e-9));
        assert!(approx_eq(relative_luminance(Rgb::new(255, 0, 0)), 0.2126, 1e-9));
        assert!(approx_eq(relative_luminance(Rgb::new(0, 255, 0)), 0.7152, 1e-9));
    }

    #[test]
    fn contrast_black_white_is_21() {
        let ratio = contrast_ratio(Rgb::BLACK, Rgb::WHITE);
        assert!(approx_eq(ratio, 21.0, 1e-9), "B/W contrast: {ratio}");
    }

    #[test]
    fn contrast_is_symmetric_and_at_least_one() {
        let a = Rgb::new(200, 50, 80);
        let b = Rgb::new(20, 20, 100);
        assert!(approx_eq(contrast_ratio(a, b), contrast_ratio(b, a), 1e-12));
        assert!(approx_eq(contrast_ratio(a, a), 1.0, 1e-12));
    }

    // ── Legacy Helpers ───────────────────────────────────────────────────

    #[test]
    fn average_rounds_and_handles_empty() {
        let avg = Rgb::average(&[Rgb::new(0, 0, 0), Rgb::new(255, 100, 1)]);
        assert_eq!(avg, Rgb::new(128, 50, 1));
        assert_eq!(Rgb::average(&[]), Rgb::BLACK);
    }

    #[test]
    fn blend_over_clamps_alpha() {
        let fg = Rgb::new(255, 0, 0);
        let bg = Rgb::new(0, 0, 255);
        assert_eq!(fg.blend_over(bg, 1.0), fg);
        assert_eq!(fg.blend_over(bg, 0.0), bg);
        assert_eq!(fg.blend_over(bg, 3.0), fg);
        assert_eq!(fg.blend_over(bg, 0.5), Rgb::new(128, 0, 128));
    }

    #[test]
    fn display_is_css() {
        assert_eq!(Rgb::new(1, 22, 255).to_string(), "rgb(1, 22, 255)");
    }
}
