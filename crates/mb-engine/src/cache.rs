//! Live token cache: resolved mood colors, memoized.
//!
//! Resolving a mood against a live theme is not free (a host may have to
//! ask its UI layer for computed values), so the resolved tokens and their
//! OKLCH forms are kept in one map per process, or per theme, whichever the
//! host prefers. The cache is an ordinary object; nothing here is global.
//!
//! # Lifecycle
//!
//! ```text
//!                 populate / spawn_populate
//! Uninitialized ─────────────────────────────▶ Populated ◀─┐
//!       ▲                                         │         │ refresh /
//!       │ clear                        invalidate │         │ on_tokens_changed
//!       │                                         ▼         │
//!       └──────────────────────────────────────  Stale ─────┘
//! ```
//!
//! # Consistency
//!
//! The map and its state live together behind one [`ArcSwap`]. Every write
//! builds a complete new map and swaps it in, so a reader sees either the
//! old map or the new one, never a map that is half filled. Before the
//! first population every read answers `None`.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use arc_swap::ArcSwap;
use mb_color::color::Oklch;
use mb_color::token::hsl_token_to_oklch;
use tracing::{debug, warn};

use crate::mood::{Mood, MoodPalette, ResolvedPalette};
use crate::source::TokenSource;

/// Stand-in for a mood whose primary token is empty.
pub const FALLBACK_PRIMARY: &str = "0 0% 50%";

// ─── Resolved Colors ─────────────────────────────────────────────────────────

/// One mood's tokens with the fallbacks applied, plus their OKLCH forms.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMoodColors {
    pub mood: Mood,
    /// Primary, secondary, tertiary tokens, never empty.
    pub tokens: [String; 3],
    pub oklch: [Oklch; 3],
}

impl ResolvedMoodColors {
    /// Resolve a palette. An empty primary becomes mid gray, an empty
    /// secondary reuses the primary, a missing tertiary reuses the
    /// secondary.
    #[must_use]
    pub fn from_palette(mood: Mood, palette: &MoodPalette) -> Self {
        let non_empty = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_owned())
        };

        let primary = non_empty(palette.primary.as_str()).unwrap_or_else(|| {
            debug!(%mood, "empty primary token, using {FALLBACK_PRIMARY}");
            FALLBACK_PRIMARY.to_owned()
        });
        let secondary = non_empty(palette.secondary.as_str()).unwrap_or_else(|| primary.clone());
        let tertiary = palette
            .tertiary
            .as_deref()
            .and_then(non_empty)
            .unwrap_or_else(|| secondary.clone());

        let oklch = [
            hsl_token_to_oklch(&primary),
            hsl_token_to_oklch(&secondary),
            hsl_token_to_oklch(&tertiary),
        ];
        Self {
            mood,
            tokens: [primary, secondary, tertiary],
            oklch,
        }
    }

    /// The OKLCH triple in the shape the burst animator takes.
    #[must_use]
    pub const fn palette(&self) -> ResolvedPalette {
        let [primary, secondary, tertiary] = self.oklch;
        ResolvedPalette {
            primary,
            secondary,
            tertiary,
        }
    }
}

/// Resolve a mood straight from `source`, bypassing any cache.
#[must_use]
pub fn read_live<S>(source: &S, mood: Mood) -> Option<ResolvedMoodColors>
where
    S: TokenSource + ?Sized,
{
    source
        .resolve(mood)
        .map(|palette| ResolvedMoodColors::from_palette(mood, &palette))
}

fn read_all<S>(source: &S) -> BTreeMap<Mood, ResolvedMoodColors>
where
    S: TokenSource + ?Sized,
{
    Mood::ALL
        .into_iter()
        .filter_map(|mood| read_live(source, mood).map(|colors| (mood, colors)))
        .collect()
}

// ─── Cache ───────────────────────────────────────────────────────────────────

/// Where a [`TokenCache`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheState {
    /// Never populated, or cleared. Every read is `None`.
    Uninitialized,
    /// Filled from a source.
    Populated,
    /// Some or all moods were invalidated and have not been re-read.
    Stale,
}

/// An immutable view of the whole cache at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheSnapshot {
    pub state: CacheState,
    pub moods: BTreeMap<Mood, ResolvedMoodColors>,
}

impl CacheSnapshot {
    const fn empty() -> Self {
        Self {
            state: CacheState::Uninitialized,
            moods: BTreeMap::new(),
        }
    }
}

/// Copy-on-write cache of resolved mood colors.
#[derive(Debug)]
pub struct TokenCache {
    current: ArcSwap<CacheSnapshot>,
    populating: AtomicBool,
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(CacheSnapshot::empty()),
            populating: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn state(&self) -> CacheState {
        self.current.load().state
    }

    /// Whether the cache has been populated (it may be stale).
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state() != CacheState::Uninitialized
    }

    /// Resolved colors for `mood`, if cached.
    #[must_use]
    pub fn get(&self, mood: Mood) -> Option<ResolvedMoodColors> {
        self.current.load().moods.get(&mood).cloned()
    }

    /// The whole cache, without copying the map.
    #[must_use]
    pub fn snapshot(&self) -> Arc<CacheSnapshot> {
        self.current.load_full()
    }

    /// Fill the cache from `source` unless it is already populated.
    ///
    /// Returns `true` if this call did the population. Moods the source
    /// cannot resolve are left out.
    pub fn populate<S>(&self, source: &S) -> bool
    where
        S: TokenSource + ?Sized,
    {
        if self.is_ready() {
            return false;
        }

        let moods = Arc::new(read_all(source));
        let mut installed = false;
        self.current.rcu(|current| {
            if current.state == CacheState::Uninitialized {
                installed = true;
                Arc::new(CacheSnapshot {
                    state: CacheState::Populated,
                    moods: (*moods).clone(),
                })
            } else {
                // Someone else won the race; keep theirs.
                installed = false;
                Arc::clone(current)
            }
        });

        if installed {
            debug!(moods = moods.len(), "token cache populated");
        }
        installed
    }

    /// Populate on a background thread so the caller's first frame is not
    /// held up.
    ///
    /// Returns `None` when there is nothing to do (already populated, or a
    /// population is in flight). If the thread cannot be spawned the cache
    /// is populated on the calling thread instead.
    pub fn spawn_populate(
        self: &Arc<Self>,
        source: Arc<dyn TokenSource>,
    ) -> Option<thread::JoinHandle<()>> {
        if self.is_ready() || self.populating.swap(true, Ordering::AcqRel) {
            return None;
        }

        let cache = Arc::clone(self);
        let worker_source = Arc::clone(&source);
        let spawned = thread::Builder::new()
            .name("moodbloom-token-cache".into())
            .spawn(move || {
                // Cleared on unwind too, so a panicking source does not
                // block every later spawn.
                let _in_flight = InFlight(&cache.populating);
                cache.populate(&*worker_source);
            });

        match spawned {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!(error = %e, "could not spawn token cache thread, populating inline");
                self.populate(&*source);
                self.populating.store(false, Ordering::Release);
                None
            }
        }
    }

    /// Drop one mood (or every mood with `None`) from the cache.
    ///
    /// The cache becomes [`CacheState::Stale`]; an uninitialized cache is
    /// left alone.
    pub fn invalidate(&self, mood: Option<Mood>) {
        self.current.rcu(|current| {
            if current.state == CacheState::Uninitialized {
                return Arc::clone(current);
            }
            let mut moods = current.moods.clone();
            match mood {
                Some(mood) => {
                    moods.remove(&mood);
                }
                None => moods.clear(),
            }
            Arc::new(CacheSnapshot {
                state: CacheState::Stale,
                moods,
            })
        });
        debug!(mood = ?mood, "token cache invalidated");
    }

    /// Re-read one mood (or all of them with `None`) from `source`.
    ///
    /// A full refresh replaces the map and marks it populated. A single-mood
    /// refresh that the source cannot answer keeps whatever was cached for
    /// that mood. On an uninitialized cache a single-mood refresh does
    /// nothing, so a later [`TokenCache::populate`] still fills every mood.
    /// A stale cache only becomes populated again once every mood is back.
    pub fn refresh<S>(&self, source: &S, mood: Option<Mood>)
    where
        S: TokenSource + ?Sized,
    {
        match mood {
            Some(mood) => {
                let fresh = read_live(source, mood);
                self.current.rcu(|current| {
                    if current.state == CacheState::Uninitialized {
                        return Arc::clone(current);
                    }
                    let mut moods = current.moods.clone();
                    if let Some(colors) = &fresh {
                        moods.insert(mood, colors.clone());
                    }
                    let complete = Mood::ALL.iter().all(|m| moods.contains_key(m));
                    let state = if current.state == CacheState::Populated || complete {
                        CacheState::Populated
                    } else {
                        CacheState::Stale
                    };
                    Arc::new(CacheSnapshot { state, moods })
                });
            }
            None => {
                self.current.store(Arc::new(CacheSnapshot {
                    state: CacheState::Populated,
                    moods: read_all(source),
                }));
            }
        }
        debug!(mood = ?mood, "token cache refreshed");
    }

    /// Handle the host's "tokens changed" signal: re-read every mood.
    pub fn on_tokens_changed<S>(&self, source: &S)
    where
        S: TokenSource + ?Sized,
    {
        self.refresh(source, None);
    }

    /// Forget everything and return to [`CacheState::Uninitialized`].
    pub fn clear(&self) {
        self.current.store(Arc::new(CacheSnapshot::empty()));
        debug!("token cache cleared");
    }
}

/// Clears a flag when dropped.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
