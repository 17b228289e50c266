//! Token blend: the linear counterpart of the radial burst.
//!
//! Instead of painting a wavefront, the theme's own mood colors are
//! cross-faded in OKLCH while the linear gradient they feed sways a little
//! (angle and stop positions swing out and back). The third color leads
//! the other two by 120 ms so the blend reads as motion, not a fade.

use mb_color::color::{Oklch, Rgb};
use serde::{Serialize, Serializer};

use crate::mood::MoodPalette;

const BASE_ANGLE: f64 = 135.0;
const ANGLE_SWING: f64 = 28.0;
const MID_BASE: f64 = 42.0;
const END_BASE: f64 = 92.0;
const MID_SWING: f64 = 4.0;
const END_SWING: f64 = 4.0;
const BACKGROUND_SPEED_SECS: f64 = 28.0;
const SPEED_BOOST: f64 = 0.85;
const TERTIARY_LEAD_MS: f64 = 120.0;

/// Everything a renderer needs to draw one blend frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlendFrame {
    /// Linear-gradient angle, degrees.
    pub angle_deg: f64,
    /// Middle stop position, percent.
    pub stop_mid: f64,
    /// End stop position, percent.
    pub stop_end: f64,
    /// Period of the background drift animation, seconds.
    pub background_speed_secs: f64,
    #[serde(serialize_with = "css_color")]
    pub m1: Rgb,
    #[serde(serialize_with = "css_color")]
    pub m2: Rgb,
    #[serde(serialize_with = "css_color")]
    pub m3: Rgb,
    /// The blend is complete; the caller can drop its overrides.
    pub finished: bool,
}

fn css_color<S: Serializer>(color: &Rgb, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(color)
}

/// Cubic ease-in-out on [0, 1].
#[must_use]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0f64).mul_add(t, 2.0).powi(3) / 2.0
    }
}

/// The blend frame `elapsed_ms` into a blend lasting `duration_ms`.
///
/// A non-positive or NaN duration yields the finished frame.
#[must_use]
pub fn blend_frame(from: &MoodPalette, to: &MoodPalette, elapsed_ms: f64, duration_ms: f64) -> BlendFrame {
    let elapsed = if elapsed_ms.is_nan() { 0.0 } else { elapsed_ms };
    let progress = |ms: f64| {
        if duration_ms.is_nan() || duration_ms <= 0.0 {
            1.0
        } else {
            (ms / duration_ms).clamp(0.0, 1.0)
        }
    };

    let t = progress(elapsed);
    let eased = ease_in_out_cubic(t);
    let swing = if eased < 0.5 { eased * 2.0 } else { 2.0 - eased * 2.0 };

    let a = from.resolve();
    let b = to.resolve();
    let m1 = mix(a.primary, b.primary, eased);
    let m2 = mix(a.secondary, b.secondary, eased);
    let m3 = if from.tertiary.is_some() && to.tertiary.is_some() {
        mix(a.tertiary, b.tertiary, ease_in_out_cubic(progress(elapsed + TERTIARY_LEAD_MS)))
    } else {
        m2
    };

    BlendFrame {
        angle_deg: (eased * std::f64::consts::PI).sin().mul_add(ANGLE_SWING, BASE_ANGLE),
        stop_mid: swing.mul_add(MID_SWING, MID_BASE),
        stop_end: swing.mul_add(END_SWING, END_BASE),
        background_speed_secs: (BACKGROUND_SPEED_SECS * SPEED_BOOST).max(20.0),
        m1,
        m2,
        m3,
        finished: t >= 1.0,
    }
}

fn mix(a: Oklch, b: Oklch, t: f64) -> Rgb {
    let mut mixed = a.mix(&b, t);
    mixed.c = mixed.c.max(0.0);
    mixed.to_rgb()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::Mood;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn easing_endpoints_and_midpoint() {
        assert!(approx_eq(ease_in_out_cubic(0.0), 0.0, 1e-12));
        assert!(approx_eq(ease_in_out_cubic(0.5), 0.5, 1e-12));
        assert!(approx_eq(ease_in_out_cubic(1.0), 1.0, 1e-12));
        assert!(ease_in_out_cubic(0.25) < 0.25);
        assert!(ease_in_out_cubic(0.75) > 0.75);
    }

    #[test]
    fn first_frame_shows_source() {
        let from = Mood::Happy.palette();
        let to = Mood::Calm.palette();
        let frame = blend_frame(&from, &to, 0.0, 1100.0);
        assert_eq!(frame.m1, Rgb::new(253, 221, 63));
        assert_eq!(frame.m2, Rgb::new(32, 233, 166));
        assert_eq!(frame.m3, frame.m2);
        assert!(approx_eq(frame.angle_deg, 135.0, 1e-9));
        assert!(approx_eq(frame.stop_mid, 42.0, 1e-9));
        assert!(approx_eq(frame.stop_end, 92.0, 1e-9));
        assert!(!frame.finished);
    }

    #[test]
    fn halfway_swings_furthest() {
        let frame = blend_frame(&Mood::Happy.palette(), &Mood::Calm.palette(), 550.0, 1100.0);
        assert!(approx_eq(frame.angle_deg, 163.0, 1e-9));
        assert!(approx_eq(frame.stop_mid, 46.0, 1e-9));
        assert!(approx_eq(frame.stop_end, 96.0, 1e-9));
        assert!(approx_eq(frame.background_speed_secs, 23.8, 1e-9));
    }

    #[test]
    fn last_frame_shows_target() {
        let frame = blend_frame(&Mood::Happy.palette(), &Mood::Calm.palette(), 5000.0, 1100.0);
        assert!(frame.finished);
        assert_eq!(frame.m1, Rgb::new(37, 164, 228));
        assert_eq!(frame.m2, Rgb::new(39, 206, 164));
        assert!(approx_eq(frame.angle_deg, 135.0, 1e-9));
    }

    #[test]
    fn tertiary_leads() {
        let from = Mood::Happy.palette().with_tertiary("0 0% 0%");
        let to = Mood::Calm.palette().with_tertiary("0 0% 100%");
        let frame = blend_frame(&from, &to, 400.0, 1100.0);
        let unled = Oklch::gray(ease_in_out_cubic(400.0 / 1100.0)).to_rgb();
        assert!(frame.m3.r > unled.r, "{} should be ahead of {unled}", frame.m3);
        let done = blend_frame(&from, &to, 980.0, 1100.0);
        assert_eq!(done.m3, Rgb::WHITE);
        assert!(!done.finished);
    }

    #[test]
    fn zero_duration_is_finished() {
        let frame = blend_frame(&Mood::Angry.palette(), &Mood::Calm.palette(), 0.0, 0.0);
        assert!(frame.finished);
        assert_eq!(frame.m1, Rgb::new(37, 164, 228));
    }

    #[test]
    fn frame_serializes_css_colors() {
        let frame = blend_frame(&Mood::Calm.palette(), &Mood::Calm.palette(), 0.0, 1100.0);
        let json = serde_json::to_value(frame).unwrap();
        assert_eq!(json["m1"], "rgb(37, 164, 228)");
    }
}
