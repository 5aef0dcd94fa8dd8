//! Events module for media state changes
//!
//! Everything the gate and the mode controller change is published as a
//! structured event on a broadcast channel.

use serde::{Deserialize, Serialize};

use crate::mode::{AudioTrack, SelectionKey};

/// Events emitted by the permission gate and the mode controller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MediaEvent {
    /// Video capability acquired
    PermissionGranted {
        /// Id of the acquired stream
        stream_id: u64,
    },

    /// Video capability refused; the display stays blocked
    PermissionDenied {
        /// Why the request failed
        reason: String,
    },

    /// Selection changed (`from` is empty on mount)
    SelectionChanged {
        from: Option<SelectionKey>,
        to: SelectionKey,
    },

    /// Camera stream attached to the video surface
    StreamAttached { stream_id: u64 },

    /// Still image bound to the image surface
    ImageBound { resource: String },

    /// Audio track loaded and restarted from the beginning
    AudioTrackLoaded { track: AudioTrack },

    /// First gesture unlocked audio playback
    AudioUnlocked { track: AudioTrack },
}

impl std::fmt::Display for MediaEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaEvent::PermissionGranted { stream_id } => {
                write!(f, "PERMISSION_GRANTED (stream {})", stream_id)
            }
            MediaEvent::PermissionDenied { reason } => {
                write!(f, "PERMISSION_DENIED ({})", reason)
            }
            MediaEvent::SelectionChanged { from: Some(from), to } => {
                write!(f, "SELECTION_CHANGED ({} -> {})", from, to)
            }
            MediaEvent::SelectionChanged { from: None, to } => {
                write!(f, "SELECTION_CHANGED (mount -> {})", to)
            }
            MediaEvent::StreamAttached { stream_id } => {
                write!(f, "STREAM_ATTACHED (stream {})", stream_id)
            }
            MediaEvent::ImageBound { resource } => write!(f, "IMAGE_BOUND ({})", resource),
            MediaEvent::AudioTrackLoaded { track } => write!(f, "AUDIO_TRACK_LOADED ({})", track),
            MediaEvent::AudioUnlocked { track } => write!(f, "AUDIO_UNLOCKED ({})", track),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = MediaEvent::SelectionChanged {
            from: Some(SelectionKey::Q2),
            to: SelectionKey::Live,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("selection_changed"));
        assert!(json.contains("\"240p\""));
        assert!(json.contains("\"1080p\""));
    }

    #[test]
    fn test_event_deserialization() {
        let json = r#"{"type":"audio_track_loaded","track":"alternate"}"#;
        let event: MediaEvent = serde_json::from_str(json).unwrap();
        assert!(matches!(
            event,
            MediaEvent::AudioTrackLoaded {
                track: AudioTrack::Alternate
            }
        ));
    }

    #[test]
    fn test_display() {
        let event = MediaEvent::SelectionChanged {
            from: None,
            to: SelectionKey::Q1,
        };
        assert_eq!(event.to_string(), "SELECTION_CHANGED (mount -> 144p)");
    }
}
