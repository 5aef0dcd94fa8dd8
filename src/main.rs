//! moonview: moon imagery and live camera display with synced audio
//!
//! The display runs a single-threaded event loop and provides:
//! - A one-shot permission gate for the live video capability
//! - A mode controller deriving the visual source and audio loop from the
//!   selected quality
//! - A line-oriented input surface (quality labels, `click`, `quit`)
//!
//! Media surfaces are logged rather than rendered.

mod config;
mod events;
mod input;
mod lifecycle;
mod media;
mod mode;
mod permission;
mod screen;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::{broadcast, mpsc};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::events::MediaEvent;
use crate::input::InputListener;
use crate::lifecycle::ShutdownSignal;
use crate::media::TracingSink;
use crate::permission::{CapabilityProvider, DeviceCapabilityProvider};
use crate::screen::Screen;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "moonview starting");

    // Load configuration
    let config = Config::load()?;
    info!(
        assets_dir = %config.assets_dir.display(),
        camera_device = %config.camera_device.display(),
        initial_quality = %config.initial_quality,
        "configuration loaded"
    );
    if !config.assets_dir.is_dir() {
        warn!(assets_dir = %config.assets_dir.display(), "assets directory not found");
    }

    let resources = config
        .resource_store()
        .context("failed to build the asset table")?;

    let mut shutdown = ShutdownSignal::new().context("failed to register signal handlers")?;

    // Input listener -> display
    let (input_tx, mut input_rx) = mpsc::channel(32);
    // Gate and controller -> log
    let (event_tx, mut event_rx) = broadcast::channel::<MediaEvent>(64);

    let mut screen = Screen::new(
        TracingSink::default(),
        Arc::new(resources),
        config.initial_quality,
        event_tx,
    );
    info!(view = %screen.view(), "display created");

    // Start the input listener (runs on dedicated thread)
    let input_listener = InputListener::new(input_tx);
    if let Err(e) = input_listener.start() {
        error!(?e, "failed to start input listener");
        warn!("continuing without input - only signals will stop the display");
    }

    // The capability request is the only suspension point; input keeps
    // flowing while it is in flight.
    let provider = DeviceCapabilityProvider::new(&config.camera_device);
    let capability = provider.request_video_capability();
    tokio::pin!(capability);
    let mut capability_resolved = false;

    info!("display initialized, entering main loop");

    loop {
        tokio::select! {
            result = &mut capability, if !capability_resolved => {
                capability_resolved = true;
                screen.resolve_permission(result);
                info!(view = %screen.view(), permission = %screen.permission(), "capability resolved");
            }

            input = input_rx.recv() => {
                match input {
                    Some(event) => {
                        if !screen.handle_input(event) {
                            info!("quit requested");
                            break;
                        }
                    }
                    None => {
                        info!("input closed");
                        break;
                    }
                }
            }

            event = event_rx.recv() => {
                match event {
                    Ok(event) => info!(%event, "media event"),
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!(skipped = n, "media event receiver lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }

            _ = shutdown.wait() => {
                info!("shutdown signal received");
                break;
            }
        }
    }

    // Cleanup
    info!("shutting down...");

    input_listener.stop();
    drop(screen);

    info!("moonview stopped");

    Ok(())
}
