//! Permission module for the live video capability
//!
//! The gate is resolved once at startup:
//! - Pending: request in flight, placeholder shown
//! - Granted: stream owned for the session, main view unlocked
//! - Denied: placeholder shown for the rest of the session

mod gate;
mod provider;
mod stream;

pub use gate::{PermissionGate, PermissionState};
pub use provider::{CapabilityError, CapabilityProvider, DeviceCapabilityProvider};
pub use stream::StreamHandle;
