//! Media output surfaces
//!
//! The sink receives commands only; the controller never reads state back
//! from it apart from a rejected playback start, which it ignores.

use std::path::PathBuf;

use tracing::info;

use crate::permission::StreamHandle;

use super::resources::{AudioResource, ImageResource};

/// Playback start rejected by platform autoplay policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("playback start blocked by platform policy")]
pub struct PlaybackBlocked;

/// The video, image and audio surfaces
pub trait MediaSink {
    /// Show the camera stream on the video surface
    fn attach_stream(&mut self, stream: &StreamHandle);

    /// Show a still image on the image surface
    fn set_image_resource(&mut self, image: &ImageResource);

    /// Load an audio file, rewinding to the start
    fn set_audio_resource(&mut self, audio: &AudioResource);

    fn set_looping(&mut self, looping: bool);

    /// Start playback of the loaded audio
    fn play(&mut self) -> Result<(), PlaybackBlocked>;
}

/// What the visual surface currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Surface {
    Blank,
    Image(PathBuf),
    Stream(u64),
}

/// Sink that keeps the surface state in memory and logs every command
#[derive(Debug)]
pub struct TracingSink {
    surface: Surface,
    audio: Option<PathBuf>,
    looping: bool,
    playing: bool,
}

impl Default for TracingSink {
    fn default() -> Self {
        Self {
            surface: Surface::Blank,
            audio: None,
            looping: false,
            playing: false,
        }
    }
}

impl TracingSink {
    #[cfg(test)]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    #[cfg(test)]
    pub fn audio(&self) -> Option<&PathBuf> {
        self.audio.as_ref()
    }

    #[cfg(test)]
    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

impl MediaSink for TracingSink {
    fn attach_stream(&mut self, stream: &StreamHandle) {
        info!(stream_id = stream.id(), device = %stream.device().display(), replaced = ?self.surface, "video surface: stream attached");
        self.surface = Surface::Stream(stream.id());
    }

    fn set_image_resource(&mut self, image: &ImageResource) {
        info!(%image, replaced = ?self.surface, "image surface: resource bound");
        self.surface = Surface::Image(image.path().to_owned());
    }

    fn set_audio_resource(&mut self, audio: &AudioResource) {
        info!(%audio, looping = self.looping, "audio surface: resource loaded");
        self.audio = Some(audio.path().to_owned());
        self.playing = false;
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn play(&mut self) -> Result<(), PlaybackBlocked> {
        if let Some(audio) = &self.audio {
            info!(audio = %audio.display(), restarted = self.playing, "audio surface: playing from start");
            self.playing = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permission::testing::stream_handle;

    #[test]
    fn test_tracks_surface() {
        let mut sink = TracingSink::default();
        assert_eq!(sink.surface(), &Surface::Blank);

        sink.set_image_resource(&ImageResource::new("moon.144.jpg"));
        assert_eq!(sink.surface(), &Surface::Image("moon.144.jpg".into()));

        let stream = stream_handle();
        sink.attach_stream(&stream);
        assert_eq!(sink.surface(), &Surface::Stream(stream.id()));
    }

    #[test]
    fn test_play_requires_loaded_audio() {
        let mut sink = TracingSink::default();
        assert!(sink.play().is_ok());
        assert!(!sink.is_playing());

        sink.set_audio_resource(&AudioResource::new("one.mp3"));
        sink.play().unwrap();
        assert!(sink.is_playing());
        assert_eq!(sink.audio(), Some(&PathBuf::from("one.mp3")));
    }
}
