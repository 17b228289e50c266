//! Where mood tokens come from.
//!
//! The engine never reads a stylesheet itself. A host hands it a
//! [`TokenSource`]: the built-in table, a table with theme overrides, or a
//! closure that asks the live UI for the currently rendered values.

use std::collections::BTreeMap;

use crate::mood::{Mood, MoodPalette};

/// Resolves a mood to its current tokens.
///
/// `None` means the source cannot answer right now (e.g. nothing is
/// mounted yet in a headless host). Callers treat it as "try again later",
/// not as an error.
pub trait TokenSource: Send + Sync {
    fn resolve(&self, mood: Mood) -> Option<MoodPalette>;
}

impl<F> TokenSource for F
where
    F: Fn(Mood) -> Option<MoodPalette> + Send + Sync,
{
    fn resolve(&self, mood: Mood) -> Option<MoodPalette> {
        self(mood)
    }
}

/// The built-in mood table, with optional per-mood overrides.
///
/// Always resolves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticTokenSource {
    overrides: BTreeMap<Mood, MoodPalette>,
}

impl StaticTokenSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace one mood's palette.
    #[must_use]
    pub fn with_override(mut self, mood: Mood, palette: MoodPalette) -> Self {
        self.set_override(mood, palette);
        self
    }

    pub fn set_override(&mut self, mood: Mood, palette: MoodPalette) {
        self.overrides.insert(mood, palette);
    }

    #[must_use]
    pub const fn overrides(&self) -> &BTreeMap<Mood, MoodPalette> {
        &self.overrides
    }
}

impl TokenSource for StaticTokenSource {
    fn resolve(&self, mood: Mood) -> Option<MoodPalette> {
        Some(
            self.overrides
                .get(&mood)
                .cloned()
                .unwrap_or_else(|| mood.palette()),
        )
    }
}
