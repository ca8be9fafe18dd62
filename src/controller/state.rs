//! Active-state bookkeeping and the preview override.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which state is active and since when.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActiveRecord {
    pub name: Option<String>,
    pub entered_at: DateTime<Utc>,
    pub blend_secs: f64,
}

/// Holds the active state and an independent manual preview selection.
///
/// `set_active` is the only way `entered_at` changes. It always overwrites,
/// so re-entering the same state restarts the exit-time clock. The preview
/// takes display priority but never touches the active record.
#[derive(Clone, Debug, PartialEq)]
pub struct StateController {
    active: ActiveRecord,
    preview: Option<String>,
}

impl StateController {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            active: ActiveRecord {
                name: None,
                entered_at: now,
                blend_secs: 0.0,
            },
            preview: None,
        }
    }

    pub fn set_active(&mut self, name: Option<String>, blend_secs: f64, now: DateTime<Utc>) {
        self.active = ActiveRecord {
            name,
            entered_at: now,
            blend_secs,
        };
    }

    pub fn active(&self) -> &ActiveRecord {
        &self.active
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.name.as_deref()
    }

    pub fn entered_at(&self) -> DateTime<Utc> {
        self.active.entered_at
    }

    pub fn set_preview(&mut self, clip: Option<String>) {
        self.preview = clip;
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    /// What should be rendered: the preview if one is set, else the active state.
    pub fn effective(&self) -> Option<&str> {
        self.preview().or(self.active_name())
    }

    /// Seconds since the active state was entered, never negative.
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> f64 {
        let elapsed = now.signed_duration_since(self.active.entered_at);
        (elapsed.num_microseconds().unwrap_or(i64::MAX) as f64 / 1_000_000.0).max(0.0)
    }
}
