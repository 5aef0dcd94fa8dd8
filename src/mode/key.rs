//! Selection keys and the pure derivations built on them
//!
//! Everything the display shows or plays is a function of the current
//! [`SelectionKey`]. Nothing here holds state.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::media::{ImageResource, ResourceStore};

/// The quality selector value chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SelectionKey {
    /// 144p still image
    #[serde(rename = "144p")]
    Q1,
    /// 240p still image
    #[serde(rename = "240p")]
    Q2,
    /// 480p still image
    #[serde(rename = "480p")]
    Q3,
    /// 720p still image
    #[serde(rename = "720p")]
    Q4,
    /// 1080p, the live camera mode
    #[serde(rename = "1080p")]
    Live,
}

impl SelectionKey {
    /// Every key, in selector order
    #[cfg(test)]
    pub const ALL: [SelectionKey; 5] = [
        SelectionKey::Q1,
        SelectionKey::Q2,
        SelectionKey::Q3,
        SelectionKey::Q4,
        SelectionKey::Live,
    ];

    /// The keys that show a still image
    pub const STILLS: [SelectionKey; 4] = [
        SelectionKey::Q1,
        SelectionKey::Q2,
        SelectionKey::Q3,
        SelectionKey::Q4,
    ];

    /// Label shown in the selector
    pub fn label(self) -> &'static str {
        match self {
            SelectionKey::Q1 => "144p",
            SelectionKey::Q2 => "240p",
            SelectionKey::Q3 => "480p",
            SelectionKey::Q4 => "720p",
            SelectionKey::Live => "1080p",
        }
    }

    /// Whether this key selects the camera feed
    pub fn is_live(self) -> bool {
        self == SelectionKey::Live
    }

    /// Position within [`SelectionKey::STILLS`], `None` for the live key
    pub fn still_index(self) -> Option<usize> {
        match self {
            SelectionKey::Q1 => Some(0),
            SelectionKey::Q2 => Some(1),
            SelectionKey::Q3 => Some(2),
            SelectionKey::Q4 => Some(3),
            SelectionKey::Live => None,
        }
    }
}

impl Default for SelectionKey {
    fn default() -> Self {
        Self::Q1
    }
}

impl std::fmt::Display for SelectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A selection value outside the selector's fixed set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid selection: {0:?}")]
pub struct InvalidSelection(pub String);

impl FromStr for SelectionKey {
    type Err = InvalidSelection;

    /// Accepts `"144"` as well as `"144p"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_suffix('p')
            .or_else(|| trimmed.strip_suffix('P'))
            .unwrap_or(trimmed);

        match digits {
            "144" => Ok(SelectionKey::Q1),
            "240" => Ok(SelectionKey::Q2),
            "480" => Ok(SelectionKey::Q3),
            "720" => Ok(SelectionKey::Q4),
            "1080" => Ok(SelectionKey::Live),
            _ => Err(InvalidSelection(s.to_string())),
        }
    }
}

/// Audio loop that accompanies a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioTrack {
    /// Plays under every still image
    Primary,
    /// Plays under the live feed
    Alternate,
}

impl AudioTrack {
    pub(crate) fn index(self) -> usize {
        match self {
            AudioTrack::Primary => 0,
            AudioTrack::Alternate => 1,
        }
    }
}

impl std::fmt::Display for AudioTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioTrack::Primary => write!(f, "primary"),
            AudioTrack::Alternate => write!(f, "alternate"),
        }
    }
}

/// What the visual surface should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualSource<'a> {
    /// A still image from the resource store
    StaticImage(&'a ImageResource),
    /// The granted camera stream
    LiveCameraFeed,
}

/// Track for a key: the alternate loop iff the key is live
pub fn audio_track(key: SelectionKey) -> AudioTrack {
    if key.is_live() {
        AudioTrack::Alternate
    } else {
        AudioTrack::Primary
    }
}

/// Visual source for a key
pub fn visual_source(key: SelectionKey, store: &ResourceStore) -> VisualSource<'_> {
    match key.still_index() {
        Some(index) => VisualSource::StaticImage(store.image_at(index)),
        None => VisualSource::LiveCameraFeed,
    }
}
