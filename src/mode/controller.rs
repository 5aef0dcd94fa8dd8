//! Mode controller
//!
//! Owns the current [`SelectionKey`] and keeps the media sink in line with
//! what the key derives to. There is no transition table: after every
//! change the visual source and audio track are recomputed from the key and
//! applied, with the audio step skipped when the track is already loaded.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::events::MediaEvent;
use crate::input::{Document, Subscription};
use crate::media::{MediaSink, ResourceStore};
use crate::permission::PermissionState;

use super::key::{audio_track, visual_source, AudioTrack, InvalidSelection, SelectionKey, VisualSource};

/// Drives the media sink from the current selection
pub struct ModeController<S> {
    /// Current selection
    key: SelectionKey,
    /// Track last loaded into the audio surface
    loaded_track: Option<AudioTrack>,
    sink: S,
    resources: Arc<ResourceStore>,
    /// First-gesture audio unlock, disposed once it fires
    unlock: Subscription,
    /// Channel for emitting media events
    event_tx: broadcast::Sender<MediaEvent>,
}

impl<S: MediaSink> ModeController<S> {
    /// Mount the controller and apply the initial selection
    pub fn mount(
        mut sink: S,
        resources: Arc<ResourceStore>,
        initial: SelectionKey,
        document: &Document,
        permission: &PermissionState,
        event_tx: broadcast::Sender<MediaEvent>,
    ) -> Self {
        sink.set_looping(true);

        let mut controller = Self {
            key: initial,
            loaded_track: None,
            sink,
            resources,
            unlock: document.subscribe_once(),
            event_tx,
        };

        info!(key = %initial, %permission, "mode controller mounted");
        controller.emit(MediaEvent::SelectionChanged {
            from: None,
            to: initial,
        });
        controller.on_selection_changed(permission);
        controller
    }

    /// Get the current selection
    #[cfg(test)]
    pub fn key(&self) -> SelectionKey {
        self.key
    }

    /// Track currently loaded into the audio surface
    #[cfg(test)]
    pub fn loaded_track(&self) -> Option<AudioTrack> {
        self.loaded_track
    }

    #[cfg(test)]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Whether the first-gesture unlock is still waiting
    #[cfg(test)]
    pub fn unlock_pending(&self) -> bool {
        self.unlock.is_active()
    }

    /// Select a key. Returns `false` if it was already selected.
    pub fn select(&mut self, key: SelectionKey, permission: &PermissionState) -> bool {
        if key == self.key {
            debug!(%key, "selection unchanged");
            return false;
        }

        let old_key = self.key;
        self.key = key;

        info!(from = %old_key, to = %key, "selection changed");
        self.emit(MediaEvent::SelectionChanged {
            from: Some(old_key),
            to: key,
        });
        self.on_selection_changed(permission);
        true
    }

    /// Select by selector label, rejecting anything outside the fixed set
    pub fn select_label(
        &mut self,
        label: &str,
        permission: &PermissionState,
    ) -> Result<bool, InvalidSelection> {
        let key = label.parse()?;
        Ok(self.select(key, permission))
    }

    /// Unlock audio on the first document gesture
    ///
    /// Loads the track for the current key and starts it. Returns `true`
    /// only for the gesture that fired the one-shot listener.
    pub fn handle_gesture(&mut self) -> bool {
        if !self.unlock.try_fire() {
            return false;
        }

        let track = audio_track(self.key);
        info!(key = %self.key, %track, "first gesture, unlocking audio");
        self.load_and_play(track);
        self.emit(MediaEvent::AudioUnlocked { track });
        true
    }

    fn on_selection_changed(&mut self, permission: &PermissionState) {
        self.apply_visual(permission);
        self.apply_audio();
    }

    fn apply_visual(&mut self, permission: &PermissionState) {
        let event = match visual_source(self.key, &self.resources) {
            VisualSource::LiveCameraFeed => match permission.stream() {
                Some(stream) => {
                    self.sink.attach_stream(stream);
                    MediaEvent::StreamAttached {
                        stream_id: stream.id(),
                    }
                }
                None => {
                    debug!(%permission, "no granted stream, video surface stays blank");
                    return;
                }
            },
            VisualSource::StaticImage(image) => {
                self.sink.set_image_resource(image);
                MediaEvent::ImageBound {
                    resource: image.to_string(),
                }
            }
        };

        self.emit(event);
    }

    fn apply_audio(&mut self) {
        let track = audio_track(self.key);
        if self.loaded_track == Some(track) {
            debug!(%track, "audio track unchanged");
            return;
        }

        info!(from = ?self.loaded_track, to = %track, "switching audio track");
        self.load_and_play(track);
        self.emit(MediaEvent::AudioTrackLoaded { track });
    }

    fn load_and_play(&mut self, track: AudioTrack) {
        self.sink.set_audio_resource(self.resources.audio(track));
        // A blocked start is superseded by the first-gesture unlock.
        let _ = self.sink.play();
        self.loaded_track = Some(track);
    }

    fn emit(&self, event: MediaEvent) {
        debug!(?event, "emitting media event");
        let _ = self.event_tx.send(event);
    }
}
