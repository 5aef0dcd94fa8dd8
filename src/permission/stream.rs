//! Exclusive live video handle

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
#[cfg(test)]
use std::sync::{Arc, Mutex};

use tracing::info;

static NEXT_STREAM_ID: AtomicU64 = AtomicU64::new(1);

/// An open camera device. The device is released when the handle drops.
#[derive(Debug)]
pub struct StreamHandle {
    id: u64,
    device: PathBuf,
    _device_file: File,
    #[cfg(test)]
    release_log: Option<Arc<Mutex<Vec<&'static str>>>>,
}

impl StreamHandle {
    pub(crate) fn new(device: PathBuf, device_file: File) -> Self {
        let id = NEXT_STREAM_ID.fetch_add(1, Ordering::Relaxed);
        info!(id, device = %device.display(), "video stream acquired");
        Self {
            id,
            device,
            _device_file: device_file,
            #[cfg(test)]
            release_log: None,
        }
    }

    /// Record the release in `log` when the handle drops
    #[cfg(test)]
    pub(crate) fn with_release_log(mut self, log: Arc<Mutex<Vec<&'static str>>>) -> Self {
        self.release_log = Some(log);
        self
    }

    /// Process-unique stream id
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Device node backing the stream
    pub fn device(&self) -> &Path {
        &self.device
    }
}

impl Drop for StreamHandle {
    fn drop(&mut self) {
        #[cfg(test)]
        if let Some(log) = &self.release_log {
            log.lock().unwrap().push("stream released");
        }
        info!(id = self.id, device = %self.device.display(), "video stream released");
    }
}
