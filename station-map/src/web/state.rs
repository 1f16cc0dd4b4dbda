//! Application state for the web layer.

use std::sync::Arc;

use chrono_tz::Tz;

use crate::cache::CachedFeed;
use crate::render::{MapSettings, Palette};

/// Shared application state.
///
/// Everything except the feed cache is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    /// Cached station feeds
    pub feed: Arc<CachedFeed>,

    /// Category colours and icons
    pub palette: Arc<Palette>,

    /// Base map settings
    pub map: Arc<MapSettings>,

    /// Time zone for summary timestamps
    pub timezone: Tz,
}

impl AppState {
    /// Create a new app state.
    pub fn new(feed: CachedFeed, palette: Palette, map: MapSettings, timezone: Tz) -> Self {
        Self {
            feed: Arc::new(feed),
            palette: Arc::new(palette),
            map: Arc::new(map),
            timezone,
        }
    }
}
