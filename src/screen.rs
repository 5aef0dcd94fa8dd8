//! Top-level screen
//!
//! Shows a blocking placeholder until the permission gate grants the video
//! capability, then mounts the mode controller and routes input to it.
//! A denied capability keeps the placeholder up for the whole session.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::events::MediaEvent;
use crate::input::{Document, Gesture, InputEvent};
use crate::media::{MediaSink, ResourceStore};
use crate::mode::{ModeController, SelectionKey};
use crate::permission::{CapabilityError, PermissionGate, PermissionState, StreamHandle};

/// What is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Blocking "grant permission" screen
    Placeholder,
    /// Media surfaces and the quality selector
    Main,
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            View::Placeholder => write!(f, "Grant Permission"),
            View::Main => write!(f, "Main"),
        }
    }
}

/// Screen composed of the permission gate and the mode controller
pub struct Screen<S> {
    // Declared before `gate` so the controller and its unlock listener are
    // torn down before the stream is released.
    controller: Option<ModeController<S>>,
    /// Sink waiting for the controller to mount
    sink: Option<S>,
    gate: PermissionGate,
    document: Document,
    resources: Arc<ResourceStore>,
    initial_key: SelectionKey,
    event_tx: broadcast::Sender<MediaEvent>,
}

impl<S: MediaSink> Screen<S> {
    /// Create a screen waiting on the capability request
    pub fn new(
        sink: S,
        resources: Arc<ResourceStore>,
        initial_key: SelectionKey,
        event_tx: broadcast::Sender<MediaEvent>,
    ) -> Self {
        Self {
            controller: None,
            sink: Some(sink),
            gate: PermissionGate::new(event_tx.clone()),
            document: Document::new(),
            resources,
            initial_key,
            event_tx,
        }
    }

    /// What is currently rendered
    pub fn view(&self) -> View {
        if self.controller.is_some() {
            View::Main
        } else {
            View::Placeholder
        }
    }

    pub fn permission(&self) -> &PermissionState {
        self.gate.state()
    }

    #[cfg(test)]
    pub fn controller(&self) -> Option<&ModeController<S>> {
        self.controller.as_ref()
    }

    /// Apply the capability outcome, mounting the controller on a grant
    pub fn resolve_permission(&mut self, result: Result<StreamHandle, CapabilityError>) {
        if !self.gate.resolve(result) || !self.gate.state().is_granted() {
            return;
        }

        let Some(sink) = self.sink.take() else {
            return;
        };

        self.controller = Some(ModeController::mount(
            sink,
            Arc::clone(&self.resources),
            self.initial_key,
            &self.document,
            self.gate.state(),
            self.event_tx.clone(),
        ));
        info!(view = %self.view(), "screen unlocked");
    }

    /// Handle one input event. Returns `false` when the session should end.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Select(label) => self.select(&label),
            InputEvent::Click => self.click(),
            InputEvent::Quit => return false,
        }
        true
    }

    fn select(&mut self, label: &str) {
        let Some(controller) = self.controller.as_mut() else {
            debug!(label, permission = %self.gate.state(), "selection ignored behind placeholder");
            return;
        };

        if let Err(e) = controller.select_label(label, self.gate.state()) {
            debug!(%e, "selection rejected");
        }
    }

    fn click(&mut self) {
        self.document.dispatch(Gesture::Click);
        if let Some(controller) = self.controller.as_mut() {
            controller.handle_gesture();
        }
    }
}
