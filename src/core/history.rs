//! History of fired transitions.
//!
//! Provides immutable tracking of the transitions the selector fired, in
//! order, following the same value semantics as the rest of the core.

use super::graph::{Endpoint, TransitionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single fired transition.
///
/// # Example
///
/// ```rust
/// use animator::core::{Endpoint, FiredTransition, TransitionId};
/// use chrono::Utc;
///
/// let fired = FiredTransition {
///     transition: TransitionId::new(),
///     source: Endpoint::AnyState,
///     from: Some("Idle".to_string()),
///     to: "Jump".to_string(),
///     blend_secs: 0.1,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(fired.to, "Jump");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FiredTransition {
    /// The transition that fired
    pub transition: TransitionId,
    /// Which source class it was found under (`AnyState` or the active state)
    pub source: Endpoint,
    /// Name of the state that was active when it fired
    pub from: Option<String>,
    /// Name of the state it activated
    pub to: String,
    /// Blend duration requested from the renderer
    pub blend_secs: f64,
    /// When it fired
    pub timestamp: DateTime<Utc>,
}

/// Ordered, bounded history of fired transitions.
///
/// History is immutable - `record` returns a new history with the entry
/// added. When `limit` entries are held, the oldest one is dropped.
///
/// # Example
///
/// ```rust
/// use animator::core::{Endpoint, FiredTransition, TransitionHistory, TransitionId};
/// use chrono::Utc;
///
/// let fire = |from: &str, to: &str| FiredTransition {
///     transition: TransitionId::new(),
///     source: Endpoint::AnyState,
///     from: Some(from.to_string()),
///     to: to.to_string(),
///     blend_secs: 0.5,
///     timestamp: Utc::now(),
/// };
///
/// let history = TransitionHistory::new(16)
///     .record(fire("Idle", "Run"))
///     .record(fire("Run", "Jump"));
///
/// assert_eq!(history.path(), vec!["Idle", "Run", "Jump"]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionHistory {
    entries: VecDeque<FiredTransition>,
    limit: usize,
}

impl Default for TransitionHistory {
    fn default() -> Self {
        Self::new(256)
    }
}

impl TransitionHistory {
    /// Create an empty history holding at most `limit` entries.
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    /// Record a fired transition, returning a new history.
    ///
    /// This is a pure function - the existing history is left as it was.
    pub fn record(&self, fired: FiredTransition) -> Self {
        let mut entries = self.entries.clone();
        if entries.len() == self.limit {
            entries.pop_front();
        }
        entries.push_back(fired);
        Self {
            entries,
            limit: self.limit,
        }
    }

    /// The same history bounded by `limit`, keeping the newest entries.
    pub fn with_limit(&self, limit: usize) -> Self {
        let limit = limit.max(1);
        let skip = self.entries.len().saturating_sub(limit);
        Self {
            entries: self.entries.iter().skip(skip).cloned().collect(),
            limit,
        }
    }

    /// Names of the states traversed: the state active before the first
    /// recorded transition (when there was one), then each target.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        if let Some(from) = self.entries.front().and_then(|f| f.from.as_deref()) {
            path.push(from);
        }
        for fired in &self.entries {
            path.push(fired.to.as_str());
        }
        path
    }

    /// Time between the first and last recorded transitions.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.entries.front()?, self.entries.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn entries(&self) -> impl Iterator<Item = &FiredTransition> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&FiredTransition> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
