// CLASSIFICATION: COMMUNITY
// Filename: mount.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::Path;

/// True when `dir` lives on a different device than `root`.
///
/// Any stat failure reads as "not mounted".
pub fn is_separate_mount(dir: &Path, root: &Path) -> bool {
    match (fs::metadata(dir), fs::metadata(root)) {
        (Ok(d), Ok(r)) => d.dev() != r.dev(),
        _ => false,
    }
}
