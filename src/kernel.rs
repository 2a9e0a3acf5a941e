// CLASSIFICATION: COMMUNITY
// Filename: kernel.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Kernel banner parsing (`/proc/version`).
//!
//! Only `major.minor` takes part in the check; the micro level is
//! parsed for logging and then dropped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, error};

use crate::error::CheckError;

const BANNER_PREFIX: &str = "Linux version ";

/// Kernel release numbers taken from the banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelVersion {
    pub major: u32,
    pub minor: u32,
    pub micro: u32,
}

impl KernelVersion {
    /// `"<major>.<minor>"`, the form stored in a version record.
    pub fn short(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }
}

/// Parse `Linux version <major>.<minor>.<micro>-...`.
pub fn parse_banner(line: &str) -> Result<KernelVersion, CheckError> {
    let bad = || CheckError::Parse(line.trim_end().to_owned());
    let rest = line.strip_prefix(BANNER_PREFIX).ok_or_else(bad)?;
    let (major, rest) = number(rest).ok_or_else(bad)?;
    let rest = rest.strip_prefix('.').ok_or_else(bad)?;
    let (minor, rest) = number(rest).ok_or_else(bad)?;
    let rest = rest.strip_prefix('.').ok_or_else(bad)?;
    let (micro, rest) = number(rest).ok_or_else(bad)?;
    if !rest.starts_with('-') {
        return Err(bad());
    }
    let version = KernelVersion { major, minor, micro };
    debug!("Parsed version = {major}.{minor}.{micro}");
    Ok(version)
}

fn number(s: &str) -> Option<(u32, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    let value = s[..end].parse().ok()?;
    Some((value, &s[end..]))
}

/// Read the first line of the banner at `path` and parse it.
pub fn read_banner(path: &Path) -> Result<KernelVersion, CheckError> {
    let file = File::open(path).map_err(|source| {
        error!("Failed to open {}", path.display());
        CheckError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let mut line = String::new();
    BufReader::new(file)
        .read_line(&mut line)
        .map_err(|source| CheckError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    parse_banner(&line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vendor_kernel_banner() {
        let v = parse_banner("Linux version 4.9.117-foo (build@host) #1 SMP PREEMPT\n").unwrap();
        assert_eq!(v, KernelVersion { major: 4, minor: 9, micro: 117 });
        assert_eq!(v.short(), "4.9");
    }

    #[test]
    fn multi_digit_components() {
        let v = parse_banner("Linux version 5.15.104-android14-11").unwrap();
        assert_eq!(v.short(), "5.15");
    }

    #[test]
    fn rejects_other_banners() {
        for line in [
            "",
            "FreeBSD 13.2-RELEASE",
            "Linux version 4.9",
            "Linux version 4.9.117 (gcc)",
            "Linux version x.9.117-foo",
            "Linux version 4..117-foo",
            "Linux version 99999999999.1.1-foo",
        ] {
            assert!(matches!(parse_banner(line), Err(CheckError::Parse(_))), "{line}");
        }
    }
}
