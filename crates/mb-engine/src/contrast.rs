//! Text color search against one or more backgrounds.
//!
//! A mood gradient is not one color, so text drawn over it has to stay
//! legible against the *worst* of several background samples. Both
//! searches score a candidate by its minimum |Lc| over every background
//! and look for one that clears a floor (Lc 60 is comfortable body text):
//!
//! - [`pick_neutral_text`] grid-searches zero-chroma OKLCH lightness.
//! - [`pick_accent_text`] bisects HSL lightness at a fixed hue, looking for
//!   the least extreme tint that still clears the floor.
//!
//! Neither search fails. When the floor is out of reach they return the
//! best candidate seen; callers compare `lc` against their own floor if
//! they want to warn. An empty background list means "no constraint" and
//! returns the first candidate either search would evaluate, with
//! `lc = +∞`.

use mb_color::apca::{Apca, ContrastMetric};
use mb_color::color::{Hsl, Oklch, Rgb, normalize_hue};
use serde::{Deserialize, Serialize};

/// Which side of the backgrounds the text sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Light text (dark backgrounds).
    Light,
    /// Dark text (light backgrounds).
    Dark,
}

/// Tie-break when both polarities clear the floor in the accent search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prefer {
    /// Take the lower Lc: closest to the floor, least harsh.
    #[default]
    Subtle,
    /// Take the higher Lc: maximum legibility.
    Aggressive,
}

/// A chosen text color with its worst-case contrast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContrastResult {
    pub rgb: Rgb,
    /// Minimum |Lc| over all backgrounds. `+∞` when there were none.
    pub lc: f64,
    pub polarity: Polarity,
}

impl ContrastResult {
    const fn new(rgb: Rgb, lc: f64, polarity: Polarity) -> Self {
        Self { rgb, lc, polarity }
    }

    /// Whether the result clears `target_lc`.
    #[must_use]
    pub fn meets(&self, target_lc: f64) -> bool {
        self.lc >= target_lc
    }
}

/// Knobs for [`pick_accent_text`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccentOptions {
    /// HSL saturation of the tint, percent. Clamped to [0, 100].
    pub saturation: f64,
    pub prefer: Prefer,
}

impl Default for AccentOptions {
    fn default() -> Self {
        Self {
            saturation: 12.0,
            prefer: Prefer::Subtle,
        }
    }
}

// ─── Scoring ─────────────────────────────────────────────────────────────────

/// Minimum |score| of `candidate` over `backgrounds`; `+∞` for none.
#[must_use]
pub fn worst_case_lc<M>(metric: &M, candidate: Rgb, backgrounds: &[Rgb]) -> f64
where
    M: ContrastMetric + ?Sized,
{
    backgrounds
        .iter()
        .map(|&bg| metric.score(candidate, bg).abs())
        .fold(f64::INFINITY, f64::min)
}

// ─── Neutral Search ──────────────────────────────────────────────────────────

/// Candidate ranges in OKLCH lightness percent. Dark text is tried first,
/// so a light background resolves to dark text even though a mid gray from
/// the light range would also clear the floor.
const NEUTRAL_RANGES: [(Polarity, u8, u8); 2] = [(Polarity::Dark, 0, 40), (Polarity::Light, 60, 100)];

/// Pick a gray that reads against every background, scored with APCA.
///
/// ```
/// use mb_color::color::Rgb;
/// use mb_engine::contrast::{Polarity, pick_neutral_text};
///
/// let result = pick_neutral_text(&[Rgb::WHITE], 60.0);
/// assert_eq!(result.polarity, Polarity::Dark);
/// assert!(result.lc >= 60.0);
/// ```
#[must_use]
pub fn pick_neutral_text(backgrounds: &[Rgb], target_lc: f64) -> ContrastResult {
    pick_neutral_text_with(&Apca, backgrounds, target_lc)
}

/// [`pick_neutral_text`] with any contrast metric.
///
/// Each range is scanned in whole-percent steps and its best candidate kept
/// (the first one wins ties). The first range whose best clears
/// `target_lc` is returned without looking at the other; otherwise the
/// better of the two bests is.
#[must_use]
pub fn pick_neutral_text_with<M>(metric: &M, backgrounds: &[Rgb], target_lc: f64) -> ContrastResult
where
    M: ContrastMetric + ?Sized,
{
    let gray = |step: u8| Oklch::gray(f64::from(step) / 100.0).to_rgb();

    if backgrounds.is_empty() {
        let (polarity, from, _) = NEUTRAL_RANGES[0];
        return ContrastResult::new(gray(from), f64::INFINITY, polarity);
    }

    let mut best = ContrastResult::new(Rgb::WHITE, f64::NEG_INFINITY, Polarity::Light);
    for (polarity, from, to) in NEUTRAL_RANGES {
        let mut range_best = ContrastResult::new(Rgb::WHITE, f64::NEG_INFINITY, polarity);
        for step in from..=to {
            let rgb = gray(step);
            let lc = worst_case_lc(metric, rgb, backgrounds);
            if lc > range_best.lc {
                range_best = ContrastResult::new(rgb, lc, polarity);
            }
        }

        if range_best.meets(target_lc) {
            return range_best;
        }
        if range_best.lc > best.lc {
            best = range_best;
        }
    }
    best
}

// ─── Accent Search ───────────────────────────────────────────────────────────

const ACCENT_ITERATIONS: usize = 9;
const ACCENT_LIGHT: (f64, f64) = (62.0, 98.0);
const ACCENT_DARK: (f64, f64) = (2.0, 38.0);

/// Pick a hued text color at `hue` that reads against every background.
///
/// ```
/// use mb_color::color::Rgb;
/// use mb_engine::contrast::{AccentOptions, Polarity, pick_accent_text};
///
/// let result = pick_accent_text(&[Rgb::BLACK], 60.0, 220.0, AccentOptions::default());
/// assert_eq!(result.polarity, Polarity::Light);
/// assert!(result.lc >= 60.0);
/// ```
#[must_use]
pub fn pick_accent_text(
    backgrounds: &[Rgb],
    target_lc: f64,
    hue: f64,
    options: AccentOptions,
) -> ContrastResult {
    pick_accent_text_with(&Apca, backgrounds, target_lc, hue, options)
}

/// [`pick_accent_text`] with any contrast metric.
///
/// Both polarity ranges are bisected over HSL lightness. A midpoint that
/// clears the floor moves the search toward the middle of the lightness
/// scale; one that misses moves it toward the extreme. If both ranges
/// produce a passing color `options.prefer` decides, with light winning
/// exact ties. If neither does, the range whose best midpoint scored
/// higher wins.
#[must_use]
pub fn pick_accent_text_with<M>(
    metric: &M,
    backgrounds: &[Rgb],
    target_lc: f64,
    hue: f64,
    options: AccentOptions,
) -> ContrastResult
where
    M: ContrastMetric + ?Sized,
{
    let tint = Tint {
        hue: if hue.is_nan() { 0.0 } else { normalize_hue(hue) },
        saturation: if options.saturation.is_nan() {
            0.0
        } else {
            options.saturation.clamp(0.0, 100.0)
        },
    };

    if backgrounds.is_empty() {
        let (lo, hi) = ACCENT_LIGHT;
        return ContrastResult::new(tint.at((lo + hi) / 2.0), f64::INFINITY, Polarity::Light);
    }

    let light = tint.bisect(metric, backgrounds, target_lc, Polarity::Light, ACCENT_LIGHT);
    let dark = tint.bisect(metric, backgrounds, target_lc, Polarity::Dark, ACCENT_DARK);

    match (light.meeting, dark.meeting) {
        (Some(light), Some(dark)) => match options.prefer {
            Prefer::Subtle if dark.lc < light.lc => dark,
            Prefer::Aggressive if dark.lc > light.lc => dark,
            _ => light,
        },
        (Some(light), None) => light,
        (None, Some(dark)) => dark,
        (None, None) => {
            if dark.best.lc > light.best.lc {
                dark.best
            } else {
                light.best
            }
        }
    }
}

/// Fixed hue and saturation; only lightness varies.
struct Tint {
    hue: f64,
    saturation: f64,
}

struct Bisection {
    /// Last midpoint that cleared the floor (the least extreme one).
    meeting: Option<ContrastResult>,
    /// Highest-scoring midpoint seen.
    best: ContrastResult,
}

impl Tint {
    fn at(&self, lightness: f64) -> Rgb {
        Hsl::new(self.hue, self.saturation, lightness).to_rgb()
    }

    fn bisect<M>(
        &self,
        metric: &M,
        backgrounds: &[Rgb],
        target_lc: f64,
        polarity: Polarity,
        (mut lo, mut hi): (f64, f64),
    ) -> Bisection
    where
        M: ContrastMetric + ?Sized,
    {
        let mut meeting = None;
        let mut best = ContrastResult::new(Rgb::WHITE, f64::NEG_INFINITY, polarity);

        for _ in 0..ACCENT_ITERATIONS {
            let mid = (lo + hi) / 2.0;
            let rgb = self.at(mid);
            let candidate = ContrastResult::new(rgb, worst_case_lc(metric, rgb, backgrounds), polarity);
            if candidate.lc > best.lc {
                best = candidate;
            }

            // "Toward center" is down for light text and up for dark text.
            let passes = candidate.meets(target_lc);
            if passes {
                meeting = Some(candidate);
            }
            match (polarity, passes) {
                (Polarity::Light, true) | (Polarity::Dark, false) => hi = mid,
                (Polarity::Light, false) | (Polarity::Dark, true) => lo = mid,
            }
        }

        Bisection { meeting, best }
    }
}
