//! One-shot permission gate
//!
//! Holds the outcome of the single video capability request made at
//! startup. The state leaves `Pending` at most once and is never reset.

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::events::MediaEvent;

use super::provider::CapabilityError;
use super::stream::StreamHandle;

/// Outcome of the capability request
#[derive(Debug, Default)]
pub enum PermissionState {
    /// Request still in flight
    #[default]
    Pending,
    /// Stream acquired and owned for the rest of the session
    Granted(StreamHandle),
    /// Request failed; terminal for the session
    Denied,
}

impl PermissionState {
    /// The granted stream, if any
    pub fn stream(&self) -> Option<&StreamHandle> {
        match self {
            PermissionState::Granted(stream) => Some(stream),
            PermissionState::Pending | PermissionState::Denied => None,
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionState::Granted(_))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, PermissionState::Pending)
    }
}

impl std::fmt::Display for PermissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PermissionState::Pending => write!(f, "Pending"),
            PermissionState::Granted(stream) => write!(f, "Granted(stream {})", stream.id()),
            PermissionState::Denied => write!(f, "Denied"),
        }
    }
}

/// Gate that unlocks rendering once the capability resolves
pub struct PermissionGate {
    state: PermissionState,
    event_tx: broadcast::Sender<MediaEvent>,
}

impl PermissionGate {
    /// Create a gate in the `Pending` state
    pub fn new(event_tx: broadcast::Sender<MediaEvent>) -> Self {
        Self {
            state: PermissionState::Pending,
            event_tx,
        }
    }

    /// Current permission state
    pub fn state(&self) -> &PermissionState {
        &self.state
    }

    /// Record the capability outcome
    ///
    /// Returns `false` if the gate had already resolved. A stream delivered
    /// after resolution is dropped, which releases it.
    pub fn resolve(&mut self, result: Result<StreamHandle, CapabilityError>) -> bool {
        if !self.state.is_pending() {
            warn!(state = %self.state, "permission already resolved, ignoring outcome");
            return false;
        }

        let event = match result {
            Ok(stream) => {
                info!(stream_id = stream.id(), "video capability granted");
                let event = MediaEvent::PermissionGranted {
                    stream_id: stream.id(),
                };
                self.state = PermissionState::Granted(stream);
                event
            }
            Err(e) => {
                warn!(error = %e, "video capability denied, display stays blocked");
                self.state = PermissionState::Denied;
                MediaEvent::PermissionDenied {
                    reason: e.to_string(),
                }
            }
        };

        debug!(?event, "emitting permission event");
        let _ = self.event_tx.send(event);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permission::testing::stream_handle;

    fn create_gate() -> (PermissionGate, broadcast::Receiver<MediaEvent>) {
        let (tx, rx) = broadcast::channel(16);
        (PermissionGate::new(tx), rx)
    }

    #[test]
    fn test_starts_pending() {
        let (gate, _) = create_gate();
        assert!(gate.state().is_pending());
        assert!(gate.state().stream().is_none());
    }

    #[test]
    fn test_grant() {
        let (mut gate, mut rx) = create_gate();
        let stream = stream_handle();
        let id = stream.id();

        assert!(gate.resolve(Ok(stream)));
        assert_eq!(gate.state().stream().map(StreamHandle::id), Some(id));
        assert!(matches!(
            rx.try_recv().unwrap(),
            MediaEvent::PermissionGranted { stream_id } if stream_id == id
        ));
    }

    #[test]
    fn test_deny_is_terminal() {
        let (mut gate, mut rx) = create_gate();

        assert!(gate.resolve(Err(CapabilityError::Denied("user said no".into()))));
        assert!(matches!(gate.state(), PermissionState::Denied));
        assert!(matches!(
            rx.try_recv().unwrap(),
            MediaEvent::PermissionDenied { .. }
        ));

        // A late grant must not flip the state back.
        assert!(!gate.resolve(Ok(stream_handle())));
        assert!(matches!(gate.state(), PermissionState::Denied));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_grant_resolves_once() {
        let (mut gate, _) = create_gate();
        let first = stream_handle();
        let id = first.id();

        assert!(gate.resolve(Ok(first)));
        assert!(!gate.resolve(Err(CapabilityError::Platform("late failure".into()))));
        assert_eq!(gate.state().stream().map(StreamHandle::id), Some(id));
    }
}
