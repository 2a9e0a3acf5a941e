// CLASSIFICATION: COMMUNITY
// Filename: power.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Orderly power-off through the property service.

use log::{error, info};

use crate::props::{PropertyError, PropertyStore};

pub const POWERCTL_PROP: &str = "sys.powerctl";
pub const POWERCTL_SHUTDOWN: &str = "shutdown";

/// Ask init to power the device off.
///
/// The request is asynchronous: init acts on the property change, so
/// a successful return does not mean the device is already down.
pub fn request_shutdown(store: &mut dyn PropertyStore) -> Result<(), PropertyError> {
    info!("Shutting down everything...");
    store
        .set(POWERCTL_PROP, POWERCTL_SHUTDOWN)
        .inspect_err(|e| error!("shutdown request failed: {e}"))
}
