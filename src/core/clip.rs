//! Animation clips reported by the rendering side.

use serde::{Deserialize, Serialize};

/// A playable clip: its name and its length in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    pub name: String,
    pub duration_secs: f64,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, duration_secs: f64) -> Self {
        Self {
            name: name.into(),
            duration_secs,
        }
    }
}

/// Clips available to the state machine, in the order they were reported.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClipLibrary {
    clips: Vec<AnimationClip>,
}

impl ClipLibrary {
    pub fn new(clips: Vec<AnimationClip>) -> Self {
        Self { clips }
    }

    pub fn get(&self, name: &str) -> Option<&AnimationClip> {
        self.clips.iter().find(|c| c.name == name)
    }

    pub fn duration_of(&self, name: &str) -> Option<f64> {
        self.get(name).map(|c| c.duration_secs)
    }

    /// The clip named `preferred`, or the first clip if there is none.
    pub fn preferred(&self, preferred: &str) -> Option<&AnimationClip> {
        self.get(preferred).or_else(|| self.clips.first())
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnimationClip> {
        self.clips.iter()
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

impl From<Vec<AnimationClip>> for ClipLibrary {
    fn from(clips: Vec<AnimationClip>) -> Self {
        Self::new(clips)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferred_picks_named_clip() {
        let library = ClipLibrary::new(vec![
            AnimationClip::new("Run", 0.8),
            AnimationClip::new("Idle", 2.0),
        ]);
        assert_eq!(library.preferred("Idle").unwrap().name, "Idle");
    }

    #[test]
    fn preferred_falls_back_to_first() {
        let library = ClipLibrary::new(vec![
            AnimationClip::new("Walk", 1.1),
            AnimationClip::new("Run", 0.8),
        ]);
        assert_eq!(library.preferred("Idle").unwrap().name, "Walk");
        assert!(ClipLibrary::default().preferred("Idle").is_none());
    }

    #[test]
    fn duration_lookup_by_name() {
        let library = ClipLibrary::from(vec![AnimationClip::new("Idle", 2.0)]);
        assert_eq!(library.duration_of("Idle"), Some(2.0));
        assert_eq!(library.duration_of("Run"), None);
    }
}
