//! Engine configuration, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) is a valid
//! configuration:
//!
//! ```toml
//! [text]
//! target_lc = 60.0
//! accent_saturation = 12.0
//! prefer = "subtle"
//!
//! [burst]
//! origin_x = 50.0
//! origin_y = 50.0
//! duration_ms = 1200.0
//! fps = 30
//!
//! [blend]
//! duration_ms = 1100.0
//!
//! [moods.calm]
//! primary = "200 78% 52%"
//! secondary = "165 68% 48%"
//! tertiary = "180 70% 50%"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use mb_color::token::try_parse_hsl_token;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::contrast::{AccentOptions, Prefer};
use crate::error::{Error, Result};
use crate::mood::{Mood, MoodPalette};
use crate::source::StaticTokenSource;

/// Text color search settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// APCA floor, Lc.
    pub target_lc: f64,
    /// HSL saturation of accent text, percent.
    pub accent_saturation: f64,
    pub prefer: Prefer,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            target_lc: 60.0,
            accent_saturation: 12.0,
            prefer: Prefer::Subtle,
        }
    }
}

impl TextConfig {
    #[must_use]
    pub const fn accent_options(&self) -> AccentOptions {
        AccentOptions {
            saturation: self.accent_saturation,
            prefer: self.prefer,
        }
    }
}

/// Radial burst settings. Timing is the renderer's business; the engine
/// only sees progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    pub origin_x: f64,
    pub origin_y: f64,
    pub duration_ms: f64,
    pub fps: u32,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            origin_x: 50.0,
            origin_y: 50.0,
            duration_ms: 1200.0,
            fps: 30,
        }
    }
}

/// Token blend settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendConfig {
    pub duration_ms: f64,
}

impl Default for BlendConfig {
    fn default() -> Self {
        Self { duration_ms: 1100.0 }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub text: TextConfig,
    pub burst: BurstConfig,
    pub blend: BlendConfig,
    /// Per-mood palette overrides, keyed by mood name.
    pub moods: BTreeMap<String, MoodPalette>,
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&text).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "rejected config");
        })
    }

    /// Check every documented range and strict-parse every override token.
    pub fn validate(&self) -> Result<()> {
        check_range("text.target_lc", self.text.target_lc, 0.0, 110.0)?;
        check_range("text.accent_saturation", self.text.accent_saturation, 0.0, 100.0)?;
        check_range("burst.origin_x", self.burst.origin_x, 0.0, 100.0)?;
        check_range("burst.origin_y", self.burst.origin_y, 0.0, 100.0)?;
        check_positive("burst.duration_ms", self.burst.duration_ms)?;
        check_range("burst.fps", f64::from(self.burst.fps), 1.0, 240.0)?;
        check_positive("blend.duration_ms", self.blend.duration_ms)?;

        for (name, palette) in &self.moods {
            let mood: Mood = name.parse()?;
            let tokens = [Some(&palette.primary), Some(&palette.secondary), palette.tertiary.as_ref()];
            for token in tokens.into_iter().flatten() {
                if try_parse_hsl_token(token).is_none() {
                    return Err(Error::InvalidToken {
                        mood: mood.to_string(),
                        token: token.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// The built-in table with this config's overrides applied.
    ///
    /// Unknown mood names are skipped; [`EngineConfig::validate`] reports
    /// them.
    #[must_use]
    pub fn token_source(&self) -> StaticTokenSource {
        let mut source = StaticTokenSource::new();
        for (name, palette) in &self.moods {
            if let Ok(mood) = name.parse::<Mood>() {
                source.set_override(mood, palette.clone());
            }
        }
        source
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(Error::OutOfRange {
            field,
            value,
            min: f64::MIN_POSITIVE,
            max: f64::MAX,
        })
    }
}
