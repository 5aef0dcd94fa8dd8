//! Mode module for media selection
//!
//! The selector has five keys:
//! - 144p, 240p, 480p, 720p: still image, primary audio loop
//! - 1080p: live camera feed, alternate audio loop

mod controller;
mod key;

pub use controller::ModeController;
pub use key::{AudioTrack, SelectionKey};
