//! Document-wide gesture detection
//!
//! Listeners hold a [`Subscription`]. Dropping or disposing it deregisters
//! the listener; there is no global listener list.

use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::debug;

/// A user gesture anywhere on the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Click,
}

/// The document surface that gestures are dispatched on
pub struct Document {
    gesture_tx: broadcast::Sender<Gesture>,
}

impl Document {
    pub fn new() -> Self {
        let (gesture_tx, _) = broadcast::channel(16);
        Self { gesture_tx }
    }

    /// Register a listener that fires on the first gesture only
    pub fn subscribe_once(&self) -> Subscription {
        debug!("gesture listener registered");
        Subscription {
            gesture_rx: Some(self.gesture_tx.subscribe()),
        }
    }

    /// Deliver a gesture to every registered listener
    pub fn dispatch(&self, gesture: Gesture) {
        // No listeners is fine: the gesture is simply unobserved.
        let delivered = self.gesture_tx.send(gesture).unwrap_or(0);
        debug!(?gesture, delivered, "gesture dispatched");
    }

    /// Number of live listeners
    #[cfg(test)]
    pub fn listener_count(&self) -> usize {
        self.gesture_tx.receiver_count()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// A one-shot gesture listener
pub struct Subscription {
    gesture_rx: Option<broadcast::Receiver<Gesture>>,
}

impl Subscription {
    /// Whether the listener is still registered
    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.gesture_rx.is_some()
    }

    /// Consume a pending gesture
    ///
    /// Returns `true` exactly once, the first time a gesture is pending;
    /// the subscription disposes itself at that point.
    pub fn try_fire(&mut self) -> bool {
        let Some(gesture_rx) = self.gesture_rx.as_mut() else {
            return false;
        };

        match gesture_rx.try_recv() {
            Ok(_) | Err(TryRecvError::Lagged(_)) => {
                self.dispose();
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Closed) => {
                self.dispose();
                false
            }
        }
    }

    /// Deregister the listener
    pub fn dispose(&mut self) {
        if self.gesture_rx.take().is_some() {
            debug!("gesture listener disposed");
        }
    }
}
