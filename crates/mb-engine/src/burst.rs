//! Radial burst transition between two moods.
//!
//! A mood change is drawn as an ink drop: the new mood bursts out of the
//! point the user touched and a wavefront rolls across the viewport until
//! the old mood is gone. Each frame is a list of radial gradient stops, and
//! every call is independent. The caller owns the clock and passes a
//! monotonically increasing `progress`.
//!
//! # Phases
//!
//! ```text
//! progress  0 ──── 0.05 ──────── 0.15 ─────────────────────────── 1
//!           │ Impact │   Splash    │             Wave                │
//! radius    0 → 10     10 → 35       35 → 2 × max corner distance
//! boost     1.8        1.8 → 1.3     1.3 → 1.0
//! edge      2          2 → 4         4 → 6
//! ```
//!
//! From 0.95 on the frame is the target mood's settled gradient. At 1 with
//! identical moods it is the idle gradient.
//!
//! # Stops (inner → outer)
//!
//! ```text
//! 0            boosted to.primary          (center)
//! 0.3 r        boosted to.tertiary         (r > 5)
//! 0.6 r        boosted to.secondary        (r > 15)
//! r − edge     to.secondary
//! r            from.primary → to.primary   (wavefront, while r < 1.5 × max)
//! r + edge     from.primary                ┐
//! r + edge+20  from.tertiary               │ old mood, while r < max
//! 100          from.secondary              ┘ (to.secondary once covered)
//! ```
//!
//! Positions are percentages of the viewport treated as a 100 × 100
//! square, clamped into [0, 100]. The first stop is always at 0 and the
//! last at 100.

use mb_color::color::{MAX_CHROMA, Oklch, Rgb};
use serde::{Serialize, Serializer};

use crate::mood::{MoodPalette, ResolvedPalette};

/// Progress at which the settled target gradient replaces the burst.
pub const SETTLE_PROGRESS: f64 = 0.95;

const IMPACT_END: f64 = 0.05;
const SPLASH_END: f64 = 0.15;

// ─── Gradient Stops ──────────────────────────────────────────────────────────

/// One stop of a radial gradient.
///
/// Serializes as `{ "position": 35.0, "color": "rgb(39, 206, 164)" }`, the
/// shape a CSS or canvas gradient consumes directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradientStop {
    /// Percent of the radius, [0, 100].
    pub position: f64,
    #[serde(serialize_with = "css_color")]
    pub color: Rgb,
}

impl GradientStop {
    #[must_use]
    pub const fn new(position: f64, color: Rgb) -> Self {
        Self { position, color }
    }
}

fn css_color<S: Serializer>(color: &Rgb, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(color)
}

// ─── Wave State ──────────────────────────────────────────────────────────────

/// The three phases of a burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BurstPhase {
    /// A small, intense drop at the origin.
    Impact,
    /// Fast ease-out expansion, saturation fading.
    Splash,
    /// The wavefront rolls across the whole viewport.
    Wave,
}

/// Geometry of the wave at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaveState {
    pub phase: BurstPhase,
    /// Radius of the new-mood zone, percent.
    pub radius: f64,
    /// Chroma multiplier applied inside the burst.
    pub saturation_boost: f64,
    /// Width of the soft edge at the wavefront, percent.
    pub edge_width: f64,
}

impl WaveState {
    /// Wave geometry at `progress` for a viewport whose farthest corner is
    /// `max_distance` from the origin.
    ///
    /// Negative or NaN progress reads as 0.
    #[must_use]
    pub fn at(progress: f64, max_distance: f64) -> Self {
        let p = sanitize_progress(progress);

        if p < IMPACT_END {
            Self {
                phase: BurstPhase::Impact,
                radius: p / IMPACT_END * 10.0,
                saturation_boost: 1.8,
                edge_width: 2.0,
            }
        } else if p < SPLASH_END {
            let t = (p - IMPACT_END) / (SPLASH_END - IMPACT_END);
            let eased = 1.0 - (1.0 - t).powi(2);
            Self {
                phase: BurstPhase::Splash,
                radius: eased.mul_add(25.0, 10.0),
                saturation_boost: t.mul_add(-0.5, 1.8),
                edge_width: t.mul_add(2.0, 2.0),
            }
        } else {
            let t = (p - SPLASH_END) / (1.0 - SPLASH_END);
            let eased = 1.0 - (1.0 - t).max(0.0).powf(2.5);
            Self {
                phase: BurstPhase::Wave,
                radius: eased.mul_add(max_distance.mul_add(2.0, -35.0), 35.0),
                saturation_boost: t.mul_add(-0.3, 1.3),
                edge_width: t.mul_add(2.0, 4.0),
            }
        }
    }
}

/// Distance from the origin to the farthest viewport corner, in percent.
///
/// ```
/// use mb_engine::burst::max_distance;
///
/// assert!((max_distance(0.0, 0.0) - 100.0 * 2f64.sqrt()).abs() < 1e-9);
/// assert!((max_distance(50.0, 50.0) - 50.0 * 2f64.sqrt()).abs() < 1e-9);
/// ```
#[must_use]
pub fn max_distance(origin_x: f64, origin_y: f64) -> f64 {
    let dx = origin_x.max(100.0 - origin_x);
    let dy = origin_y.max(100.0 - origin_y);
    dx.hypot(dy)
}

/// Multiply chroma by `boost`, capped at 0.4.
#[inline]
#[must_use]
pub fn boost_saturation(color: Oklch, boost: f64) -> Oklch {
    color.boost_chroma(boost, MAX_CHROMA)
}

// ─── Frames ──────────────────────────────────────────────────────────────────

/// Gradient stops for one frame of the transition `from` → `to`.
///
/// Tokens are parsed on every call. Renderers driving many frames can
/// resolve the palettes once and call [`burst_stops`].
#[must_use]
pub fn generate_radial_burst_stops(
    from: &MoodPalette,
    to: &MoodPalette,
    progress: f64,
    origin_x: f64,
    origin_y: f64,
) -> Vec<GradientStop> {
    burst_stops(&from.resolve(), &to.resolve(), progress, origin_x, origin_y)
}

/// [`generate_radial_burst_stops`] over resolved palettes.
///
/// The origin is clamped to the viewport; a NaN coordinate reads as the
/// center.
#[must_use]
pub fn burst_stops(
    from: &ResolvedPalette,
    to: &ResolvedPalette,
    progress: f64,
    origin_x: f64,
    origin_y: f64,
) -> Vec<GradientStop> {
    let p = sanitize_progress(progress);

    if p >= 1.0 && from.primary == to.primary && from.secondary == to.secondary {
        return idle_stops(to);
    }
    if p >= SETTLE_PROGRESS {
        return settled_stops(to);
    }

    let max = max_distance(sanitize_origin(origin_x), sanitize_origin(origin_y));
    let wave = WaveState::at(p, max);
    let r = wave.radius;
    let edge = wave.edge_width;
    let boost = wave.saturation_boost;

    let mut stops = Vec::with_capacity(9);
    let mut push = |position: f64, color: Oklch| stops.push(GradientStop::new(position, color.to_rgb()));

    if r > 0.0 {
        push(0.0, boost_saturation(to.primary, boost));
        if r > 5.0 {
            push((r * 0.3).min(r - edge - 1.0), boost_saturation(to.tertiary, boost * 0.95));
        }
        if r > 15.0 {
            push((r * 0.6).min(r - edge - 1.0), boost_saturation(to.secondary, boost * 0.8));
        }
        push((r - edge).max(0.0), to.secondary);
    }

    if r > 0.0 && r < max * 1.5 {
        let amount = 0.3f64.mul_add((p * 1.2).min(1.0), 0.7);
        push(r.min(100.0), from.primary.mix(&to.primary, amount));
    }

    if r < max {
        push((r + edge).min(100.0), from.primary);
        if r + edge + 20.0 < 100.0 {
            push((r + edge + 20.0).min(90.0), from.tertiary);
        }
        push(100.0, from.secondary);
    } else {
        push(100.0, to.secondary);
    }

    normalize_positions(stops)
}

/// The settled target gradient shown from [`SETTLE_PROGRESS`] on.
#[must_use]
pub fn settled_stops(to: &ResolvedPalette) -> Vec<GradientStop> {
    four_stops(to, 35.0)
}

/// The idle gradient of a mood at rest.
#[must_use]
pub fn idle_stops(palette: &ResolvedPalette) -> Vec<GradientStop> {
    four_stops(palette, 30.0)
}

fn four_stops(palette: &ResolvedPalette, tertiary_at: f64) -> Vec<GradientStop> {
    let primary = palette.primary.to_rgb();
    vec![
        GradientStop::new(0.0, primary),
        GradientStop::new(tertiary_at, palette.tertiary.to_rgb()),
        GradientStop::new(70.0, palette.secondary.to_rgb()),
        GradientStop::new(100.0, primary),
    ]
}

fn normalize_positions(mut stops: Vec<GradientStop>) -> Vec<GradientStop> {
    for stop in &mut stops {
        stop.position = stop.position.clamp(0.0, 100.0);
    }
    if let Some(&first) = stops.first() {
        if first.position > 0.0 {
            stops.insert(0, GradientStop::new(0.0, first.color));
        }
    }
    stops
}

fn sanitize_progress(progress: f64) -> f64 {
    if progress.is_nan() { 0.0 } else { progress.max(0.0) }
}

fn sanitize_origin(v: f64) -> f64 {
    if v.is_nan() { 50.0 } else { v.clamp(0.0, 100.0) }
}

// ─── Sampling ────────────────────────────────────────────────────────────────

/// Color of a stop list at `position`, interpolated linearly in sRGB.
///
/// Positions before the first stop take its color, after the last take the
/// last one's. Two stops at the same position form a hard edge. An empty
/// list samples as black.
#[must_use]
pub fn sample_gradient(stops: &[GradientStop], position: f64) -> Rgb {
    let Some(first) = stops.first() else {
        return Rgb::BLACK;
    };
    if position.is_nan() || position <= first.position {
        return first.color;
    }

    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if position <= b.position {
            let span = b.position - a.position;
            if span <= 0.0 {
                return b.color;
            }
            return b.color.blend_over(a.color, (position - a.position) / span);
        }
    }

    stops.last().map_or(first.color, |last| last.color)
}
