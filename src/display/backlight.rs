// CLASSIFICATION: COMMUNITY
// Filename: backlight.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! LCD backlight control through the LED class `brightness` node.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use log::{debug, warn};

#[derive(Debug, Clone)]
pub struct Backlight {
    path: PathBuf,
    on_level: u32,
}

impl Backlight {
    pub fn new(path: impl Into<PathBuf>, on_level: u32) -> Self {
        Self {
            path: path.into(),
            on_level,
        }
    }

    /// Switch the backlight on (`on_level`) or off (`0`).
    ///
    /// Best effort: a missing or read-only node is logged and skipped,
    /// and the node is closed whatever happens to the write.
    pub fn set(&self, enable: bool) {
        let mut node = match OpenOptions::new().read(true).write(true).open(&self.path) {
            Ok(f) => f,
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::PermissionDenied) => {
                warn!("Backlight control not supported");
                return;
            }
            Err(e) => {
                warn!("Could not open backlight node : {e}");
                return;
            }
        };
        if enable {
            debug!("Enabling backlight");
        } else {
            debug!("Disabling backlight");
        }
        let level = if enable { self.on_level } else { 0 };
        if let Err(e) = write_level(&mut node, level) {
            warn!("Could not write to backlight node : {e}");
        }
    }
}

/// Write `"<level>\n"` in a single call; sysfs stores each write separately.
fn write_level<W: Write>(node: &mut W, level: u32) -> std::io::Result<()> {
    node.write_all(format!("{level}\n").as_bytes())
}
