//! Concrete `Hook` targets. The core only knows `fn() -> Result<(),
//! HookError>`; the binary supplies the actual side effects.

use std::process::Command;

use layerz_core::HookError;

/// Shells out to the external device-reset utility. Its own
/// implementation is an out-of-scope collaborator; this is just the thin
/// wrapper that lets a `Hook` cell invoke it.
pub fn reset_downstream_device() -> Result<(), HookError> {
    let status = Command::new("layerz-reset-device")
        .status()
        .map_err(|err| HookError(format!("failed to spawn layerz-reset-device: {err}")))?;

    if status.success() {
        Ok(())
    } else {
        Err(HookError(format!(
            "layerz-reset-device exited with {status}"
        )))
    }
}
