//! Read-only asset table
//!
//! Maps every still key to an image and every audio track to a sound file.
//! The table is injective: no two keys share an image, and the two tracks
//! never share a file.

use std::path::{Path, PathBuf};

use crate::mode::{AudioTrack, SelectionKey};

/// Opaque handle to a still image
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageResource(PathBuf);

impl ImageResource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl std::fmt::Display for ImageResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Opaque handle to an audio file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioResource(PathBuf);

impl AudioResource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl std::fmt::Display for AudioResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Errors raised while building a [`ResourceStore`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResourceError {
    #[error("the live key shows the camera feed and cannot have an image")]
    LiveImage,

    #[error("no image configured for {0}")]
    MissingImage(SelectionKey),

    #[error("image for {0} configured twice")]
    DuplicateKey(SelectionKey),

    #[error("{first} and {second} share the same image")]
    SharedImage {
        first: SelectionKey,
        second: SelectionKey,
    },

    #[error("no audio configured for the {0} track")]
    MissingAudio(AudioTrack),

    #[error("audio for the {0} track configured twice")]
    DuplicateTrack(AudioTrack),

    #[error("both audio tracks point at the same file")]
    SharedAudio,
}

/// Fixed lookup table from keys and tracks to resources
#[derive(Debug, Clone)]
pub struct ResourceStore {
    images: [ImageResource; 4],
    audio: [AudioResource; 2],
}

impl ResourceStore {
    /// Build a store, rejecting incomplete or non-injective tables
    pub fn new(
        images: impl IntoIterator<Item = (SelectionKey, ImageResource)>,
        audio: impl IntoIterator<Item = (AudioTrack, AudioResource)>,
    ) -> Result<Self, ResourceError> {
        let mut image_slots: [Option<ImageResource>; 4] = Default::default();

        for (key, image) in images {
            let index = key.still_index().ok_or(ResourceError::LiveImage)?;
            if image_slots[index].is_some() {
                return Err(ResourceError::DuplicateKey(key));
            }
            if let Some(first) = SelectionKey::STILLS
                .iter()
                .zip(&image_slots)
                .find(|(_, slot)| matches!(slot, Some(existing) if *existing == image))
                .map(|(key, _)| *key)
            {
                return Err(ResourceError::SharedImage { first, second: key });
            }
            image_slots[index] = Some(image);
        }

        let [q1, q2, q3, q4] = image_slots;
        let images = [
            q1.ok_or(ResourceError::MissingImage(SelectionKey::Q1))?,
            q2.ok_or(ResourceError::MissingImage(SelectionKey::Q2))?,
            q3.ok_or(ResourceError::MissingImage(SelectionKey::Q3))?,
            q4.ok_or(ResourceError::MissingImage(SelectionKey::Q4))?,
        ];

        let mut audio_slots: [Option<AudioResource>; 2] = Default::default();
        for (track, resource) in audio {
            let slot = &mut audio_slots[track.index()];
            if slot.is_some() {
                return Err(ResourceError::DuplicateTrack(track));
            }
            *slot = Some(resource);
        }

        let [primary, alternate] = audio_slots;
        let primary = primary.ok_or(ResourceError::MissingAudio(AudioTrack::Primary))?;
        let alternate = alternate.ok_or(ResourceError::MissingAudio(AudioTrack::Alternate))?;
        if primary == alternate {
            return Err(ResourceError::SharedAudio);
        }

        Ok(Self {
            images,
            audio: [primary, alternate],
        })
    }

    /// Image for a still key, `None` for the live key
    #[cfg(test)]
    pub fn image(&self, key: SelectionKey) -> Option<&ImageResource> {
        key.still_index().map(|index| &self.images[index])
    }

    pub(crate) fn image_at(&self, index: usize) -> &ImageResource {
        &self.images[index]
    }

    /// Audio file for a track
    pub fn audio(&self, track: AudioTrack) -> &AudioResource {
        &self.audio[track.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stills() -> Vec<(SelectionKey, ImageResource)> {
        SelectionKey::STILLS
            .iter()
            .map(|key| (*key, ImageResource::new(format!("moon.{}.jpg", key.label()))))
            .collect()
    }

    fn tracks() -> Vec<(AudioTrack, AudioResource)> {
        vec![
            (AudioTrack::Primary, AudioResource::new("one.mp3")),
            (AudioTrack::Alternate, AudioResource::new("two.mp3")),
        ]
    }

    #[test]
    fn test_complete_table() {
        let store = ResourceStore::new(stills(), tracks()).unwrap();
        assert_eq!(
            store.image(SelectionKey::Q3),
            Some(&ImageResource::new("moon.480p.jpg"))
        );
        assert_eq!(store.image(SelectionKey::Live), None);
        assert_eq!(store.audio(AudioTrack::Alternate), &AudioResource::new("two.mp3"));
    }

    #[test]
    fn test_rejects_missing_image() {
        let mut images = stills();
        images.retain(|(key, _)| *key != SelectionKey::Q2);
        assert_eq!(
            ResourceStore::new(images, tracks()).unwrap_err(),
            ResourceError::MissingImage(SelectionKey::Q2)
        );
    }

    #[test]
    fn test_rejects_live_image() {
        let mut images = stills();
        images.push((SelectionKey::Live, ImageResource::new("moon.1080.jpg")));
        assert_eq!(
            ResourceStore::new(images, tracks()).unwrap_err(),
            ResourceError::LiveImage
        );
    }

    #[test]
    fn test_rejects_shared_image() {
        let mut images = stills();
        images[3].1 = ImageResource::new("moon.144p.jpg");
        assert_eq!(
            ResourceStore::new(images, tracks()).unwrap_err(),
            ResourceError::SharedImage {
                first: SelectionKey::Q1,
                second: SelectionKey::Q4,
            }
        );
    }

    #[test]
    fn test_rejects_duplicate_key() {
        let mut images = stills();
        images.push((SelectionKey::Q1, ImageResource::new("other.jpg")));
        assert_eq!(
            ResourceStore::new(images, tracks()).unwrap_err(),
            ResourceError::DuplicateKey(SelectionKey::Q1)
        );
    }

    #[test]
    fn test_rejects_shared_audio() {
        let audio = vec![
            (AudioTrack::Primary, AudioResource::new("one.mp3")),
            (AudioTrack::Alternate, AudioResource::new("one.mp3")),
        ];
        assert_eq!(
            ResourceStore::new(stills(), audio).unwrap_err(),
            ResourceError::SharedAudio
        );
    }

    #[test]
    fn test_rejects_missing_track() {
        let audio = vec![(AudioTrack::Primary, AudioResource::new("one.mp3"))];
        assert_eq!(
            ResourceStore::new(stills(), audio).unwrap_err(),
            ResourceError::MissingAudio(AudioTrack::Alternate)
        );
    }
}
