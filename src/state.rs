//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the database pool plus the few config values handlers need at
//! request time. All fields are cheap to clone.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use sqlx::PgPool;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// Directory holding uploaded snapshot images.
    pub images_dir: Arc<PathBuf>,
    /// Zone used for "today" and for rendering history timestamps.
    pub display_offset: FixedOffset,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, config: &Config) -> Self {
        Self { pool, images_dir: Arc::new(config.images_dir.clone()), display_offset: config.display_offset }
    }

    /// Current wall-clock time in the display zone.
    #[must_use]
    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.display_offset)
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
