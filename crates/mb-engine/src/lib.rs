//! # mb-engine — Adaptive Mood Color Engine
//!
//! Turns a handful of mood colors into everything a themed UI needs to draw
//! them: legible text on top, a vivid accent, and an animated transition
//! when the mood changes.
//!
//! # Architecture
//!
//! ```text
//! mood.rs / source.rs:  mood table, overrides, host-supplied tokens
//!     │
//!     ▼
//! cache.rs:    resolved tokens + OKLCH, copy-on-write (optional)
//!     │
//!     ├──────────────────┬──────────────────┬─────────────────┐
//!     ▼                  ▼                  ▼                 ▼
//! contrast.rs:       accent.rs:         burst.rs:         blend.rs:
//! APCA text search   accent derivation  radial burst      token cross-fade
//!     │                  │                  │                 │
//!     └──────────────────┴────────┬─────────┴─────────────────┘
//!                                 ▼
//!                     renderer (CSS, canvas, terminal)
//! ```
//!
//! # Color Space
//!
//! Inputs are `"H S% L%"` tokens. All manipulation happens in OKLCH (see
//! `mb-color`); results leave as 8-bit sRGB, clamped, never gamut-mapped.
//!
//! # Failure
//!
//! Everything between the token source and the renderer is total: bad
//! tokens read as black, unreachable contrast floors return the best
//! effort, out-of-range progress is clamped. Only configuration loading
//! returns [`Result`].

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Hue/lightness/chroma variable names are inherently similar.
#![allow(clippy::similar_names)]

pub mod accent;
pub mod blend;
pub mod burst;
pub mod cache;
pub mod config;
pub mod contrast;
pub mod error;
pub mod mood;
pub mod source;

pub use accent::{derive_accent, derive_accent_token};
pub use blend::{BlendFrame, blend_frame};
pub use burst::{GradientStop, WaveState, burst_stops, generate_radial_burst_stops};
pub use cache::{CacheState, ResolvedMoodColors, TokenCache};
pub use config::EngineConfig;
pub use contrast::{AccentOptions, ContrastResult, Polarity, Prefer, pick_accent_text, pick_neutral_text};
pub use error::{Error, Result};
pub use mood::{Mood, MoodKind, MoodPalette, ResolvedPalette};
pub use source::{StaticTokenSource, TokenSource};
