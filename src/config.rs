//! Configuration loading and management

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::media::{AudioResource, ImageResource, ResourceError, ResourceStore};
use crate::mode::{AudioTrack, SelectionKey};

const ASSETS_DIR_VAR: &str = "MOONVIEW_ASSETS_DIR";
const CAMERA_DEVICE_VAR: &str = "MOONVIEW_CAMERA_DEVICE";
const INITIAL_QUALITY_VAR: &str = "MOONVIEW_INITIAL_QUALITY";

const DEFAULT_CAMERA_DEVICE: &str = "/dev/video0";

/// Display configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the moon images and audio loops
    pub assets_dir: PathBuf,

    /// Video device node opened for the live feed
    pub camera_device: PathBuf,

    /// Selection applied when the display mounts
    pub initial_quality: SelectionKey,
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let assets_dir = match lookup(ASSETS_DIR_VAR) {
            Some(dir) => PathBuf::from(dir),
            None => {
                let home = lookup("HOME")
                    .ok_or_else(|| anyhow!("HOME is not set and {ASSETS_DIR_VAR} is missing"))?;
                PathBuf::from(home)
                    .join(".local")
                    .join("share")
                    .join("moonview")
                    .join("assets")
            }
        };

        let camera_device = lookup(CAMERA_DEVICE_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CAMERA_DEVICE));

        let initial_quality = match lookup(INITIAL_QUALITY_VAR) {
            Some(label) => label
                .parse::<SelectionKey>()
                .with_context(|| format!("invalid {INITIAL_QUALITY_VAR}"))?,
            None => SelectionKey::default(),
        };

        Ok(Self {
            assets_dir,
            camera_device,
            initial_quality,
        })
    }

    /// Build the asset table from the assets directory
    pub fn resource_store(&self) -> Result<ResourceStore, ResourceError> {
        let images = [
            (SelectionKey::Q1, "moon.144.jpg"),
            (SelectionKey::Q2, "moon.240.jpg"),
            (SelectionKey::Q3, "moon.480.jpg"),
            (SelectionKey::Q4, "moon.720.jpg"),
        ]
        .map(|(key, file)| (key, ImageResource::new(self.assets_dir.join(file))));

        let audio = [
            (AudioTrack::Primary, "one.mp3"),
            (AudioTrack::Alternate, "two.mp3"),
        ]
        .map(|(track, file)| (track, AudioResource::new(self.assets_dir.join(file))));

        ResourceStore::new(images, audio)
    }
}
