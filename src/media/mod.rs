//! Media module: output surfaces and the asset table they draw from

mod resources;
mod sink;

pub use resources::{AudioResource, ImageResource, ResourceError, ResourceStore};
pub use sink::{MediaSink, TracingSink};

#[cfg(test)]
pub(crate) mod testing {
    use std::path::PathBuf;
    use std::sync::Arc;

    use super::sink::PlaybackBlocked;
    use super::*;
    use crate::mode::{AudioTrack, SelectionKey};
    use crate::permission::testing::TeardownLog;
    use crate::permission::StreamHandle;

    /// Store with `moon.<label>.jpg` images and `one.mp3`/`two.mp3` audio
    pub fn resource_store() -> ResourceStore {
        ResourceStore::new(
            SelectionKey::STILLS
                .iter()
                .map(|key| (*key, ImageResource::new(format!("moon.{}.jpg", key.label())))),
            [
                (AudioTrack::Primary, AudioResource::new("one.mp3")),
                (AudioTrack::Alternate, AudioResource::new("two.mp3")),
            ],
        )
        .unwrap()
    }

    /// One recorded sink command
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum SinkCall {
        AttachStream(u64),
        SetImage(PathBuf),
        SetAudio(PathBuf),
        SetLooping(bool),
        Play,
    }

    /// Sink that records every call in order
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        pub calls: Vec<SinkCall>,
        pub block_playback: bool,
        teardown_log: Option<TeardownLog>,
    }

    impl RecordingSink {
        pub fn blocking() -> Self {
            let mut sink = Self::default();
            sink.block_playback = true;
            sink
        }

        /// A sink that appends `"sink dropped"` to `log` when dropped
        pub fn logging(log: &TeardownLog) -> Self {
            let mut sink = Self::default();
            sink.teardown_log = Some(Arc::clone(log));
            sink
        }

        /// Audio files loaded, in order
        pub fn audio_loads(&self) -> Vec<PathBuf> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    SinkCall::SetAudio(path) => Some(path.clone()),
                    _ => None,
                })
                .collect()
        }

        pub fn play_count(&self) -> usize {
            self.calls.iter().filter(|call| **call == SinkCall::Play).count()
        }

        pub fn clear(&mut self) {
            self.calls.clear();
        }
    }

    impl Drop for RecordingSink {
        fn drop(&mut self) {
            if let Some(log) = &self.teardown_log {
                log.lock().unwrap().push("sink dropped");
            }
        }
    }

    impl MediaSink for RecordingSink {
        fn attach_stream(&mut self, stream: &StreamHandle) {
            self.calls.push(SinkCall::AttachStream(stream.id()));
        }

        fn set_image_resource(&mut self, image: &ImageResource) {
            self.calls.push(SinkCall::SetImage(image.path().to_owned()));
        }

        fn set_audio_resource(&mut self, audio: &AudioResource) {
            self.calls.push(SinkCall::SetAudio(audio.path().to_owned()));
        }

        fn set_looping(&mut self, looping: bool) {
            self.calls.push(SinkCall::SetLooping(looping));
        }

        fn play(&mut self) -> Result<(), PlaybackBlocked> {
            self.calls.push(SinkCall::Play);
            if self.block_playback {
                Err(PlaybackBlocked)
            } else {
                Ok(())
            }
        }
    }
}
