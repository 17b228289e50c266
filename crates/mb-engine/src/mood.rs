//! The mood color table — ten named moods, each with a primary and a
//! secondary HSL token.
//!
//! Moods are grouped into five kinds by energy and valence. The table is
//! plain data; [`crate::source::StaticTokenSource`] serves it (with any
//! configured overrides) to the rest of the engine.

use std::fmt;
use std::str::FromStr;

use mb_color::color::Oklch;
use mb_color::token::hsl_token_to_oklch;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ─── Mood ────────────────────────────────────────────────────────────────────

/// A named point in the mood taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Excited,
    Manic,
    Calm,
    Content,
    Neutral,
    Irritable,
    Angry,
    Anxious,
    Depressed,
}

/// Energy/valence grouping of a [`Mood`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodKind {
    /// High energy, positive.
    Vibrant,
    /// Low energy, positive.
    Gentle,
    Neutral,
    /// High energy, negative.
    Agitated,
    /// Low energy, negative.
    Bleak,
}

impl Mood {
    /// Every mood, in display order.
    pub const ALL: [Self; 10] = [
        Self::Happy,
        Self::Excited,
        Self::Manic,
        Self::Calm,
        Self::Content,
        Self::Neutral,
        Self::Irritable,
        Self::Angry,
        Self::Anxious,
        Self::Depressed,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Excited => "excited",
            Self::Manic => "manic",
            Self::Calm => "calm",
            Self::Content => "content",
            Self::Neutral => "neutral",
            Self::Irritable => "irritable",
            Self::Angry => "angry",
            Self::Anxious => "anxious",
            Self::Depressed => "depressed",
        }
    }

    #[must_use]
    pub const fn kind(self) -> MoodKind {
        match self {
            Self::Happy | Self::Excited | Self::Manic => MoodKind::Vibrant,
            Self::Calm | Self::Content => MoodKind::Gentle,
            Self::Neutral => MoodKind::Neutral,
            Self::Irritable | Self::Angry => MoodKind::Agitated,
            Self::Anxious | Self::Depressed => MoodKind::Bleak,
        }
    }

    /// The built-in `(primary, secondary)` tokens.
    #[must_use]
    pub const fn tokens(self) -> (&'static str, &'static str) {
        match self {
            Self::Happy => ("50 98% 62%", "160 82% 52%"),
            Self::Excited => ("30 100% 58%", "340 92% 58%"),
            Self::Manic => ("285 92% 62%", "335 95% 58%"),
            Self::Calm => ("200 78% 52%", "165 68% 48%"),
            Self::Content => ("145 65% 52%", "85 60% 56%"),
            Self::Neutral => ("220 22% 58%", "40 28% 62%"),
            Self::Irritable => ("25 88% 52%", "5 80% 48%"),
            Self::Angry => ("0 92% 52%", "15 82% 48%"),
            Self::Anxious => ("270 55% 48%", "240 65% 42%"),
            Self::Depressed => ("220 35% 33%", "210 40% 28%"),
        }
    }

    /// The built-in palette for this mood (no tertiary color).
    #[must_use]
    pub fn palette(self) -> MoodPalette {
        let (primary, secondary) = self.tokens();
        MoodPalette::new(primary, secondary)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mood {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownMood(s.to_owned()))
    }
}

impl fmt::Display for MoodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vibrant => "vibrant",
            Self::Gentle => "gentle",
            Self::Neutral => "neutral",
            Self::Agitated => "agitated",
            Self::Bleak => "bleak",
        })
    }
}

// ─── Palettes ────────────────────────────────────────────────────────────────

/// A mood's colors as HSL tokens, the way a theme supplies them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodPalette {
    pub primary: String,
    pub secondary: String,
    /// Optional third color; consumers reuse `secondary` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tertiary: Option<String>,
}

impl MoodPalette {
    #[must_use]
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
            tertiary: None,
        }
    }

    #[must_use]
    pub fn with_tertiary(mut self, tertiary: impl Into<String>) -> Self {
        self.tertiary = Some(tertiary.into());
        self
    }

    /// The tertiary token, or the secondary when there is none.
    #[must_use]
    pub fn tertiary_or_secondary(&self) -> &str {
        self.tertiary.as_deref().unwrap_or(&self.secondary)
    }

    /// Parse all three tokens into OKLCH.
    #[must_use]
    pub fn resolve(&self) -> ResolvedPalette {
        ResolvedPalette {
            primary: hsl_token_to_oklch(&self.primary),
            secondary: hsl_token_to_oklch(&self.secondary),
            tertiary: hsl_token_to_oklch(self.tertiary_or_secondary()),
        }
    }

    /// The 135° two-stop CSS gradient used for mood swatches.
    #[must_use]
    pub fn css_gradient(&self) -> String {
        format!(
            "linear-gradient(135deg, hsl({}), hsl({}))",
            self.primary, self.secondary
        )
    }
}

/// A palette already converted to OKLCH, with the tertiary fallback applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPalette {
    pub primary: Oklch,
    pub secondary: Oklch,
    pub tertiary: Oklch,
}
