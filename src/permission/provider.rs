//! Capability providers that hand out live video streams

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use super::stream::StreamHandle;

/// Reasons a video capability request fails
#[derive(Debug, thiserror::Error)]
pub enum CapabilityError {
    #[error("video capability denied: {0}")]
    Denied(String),

    #[error("no video device at {0}")]
    DeviceUnavailable(PathBuf),

    #[error("platform error while acquiring video: {0}")]
    Platform(String),
}

/// Source of the live video capability
#[async_trait]
pub trait CapabilityProvider: Send + Sync {
    /// Request exclusive access to a video stream
    async fn request_video_capability(&self) -> Result<StreamHandle, CapabilityError>;
}

/// Opens a V4L-style device node
#[derive(Debug, Clone)]
pub struct DeviceCapabilityProvider {
    device: PathBuf,
}

impl DeviceCapabilityProvider {
    pub fn new(device: impl AsRef<Path>) -> Self {
        Self {
            device: device.as_ref().to_owned(),
        }
    }
}

#[async_trait]
impl CapabilityProvider for DeviceCapabilityProvider {
    async fn request_video_capability(&self) -> Result<StreamHandle, CapabilityError> {
        info!(device = %self.device.display(), "requesting video capability");

        let file = tokio::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.device)
            .await
            .map_err(|e| {
                debug!(?e, "opening video device failed");
                match e.kind() {
                    ErrorKind::NotFound => CapabilityError::DeviceUnavailable(self.device.clone()),
                    ErrorKind::PermissionDenied => CapabilityError::Denied(e.to_string()),
                    _ => CapabilityError::Platform(e.to_string()),
                }
            })?;

        let file = file.into_std().await;
        Ok(StreamHandle::new(self.device.clone(), file))
    }
}
