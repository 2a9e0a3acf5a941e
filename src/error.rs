// CLASSIFICATION: COMMUNITY
// Filename: error.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Error kinds surfaced by a check run.

use std::path::PathBuf;

use thiserror::Error;

use crate::compare::Difference;
use crate::version::VersionKey;

/// Exit code for I/O, banner and property failures.
pub const EXIT_IO: i32 = -1;
/// Exit code when the descriptor lacks one of the four fields.
pub const EXIT_MISSING: i32 = -2;

/// Failure of one stage of the check.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("kernel banner not recognised: {0:?}")]
    Parse(String),
    #[error("failed to get all properties (missing: {})", join_keys(.missing))]
    PropertyRead { missing: Vec<VersionKey> },
    #[error("missing properties: {}", join_keys(.0))]
    MissingField(Vec<VersionKey>),
    #[error("mismatch between versions, difference={0}")]
    Mismatch(Difference),
}

impl CheckError {
    /// Process exit code reported for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            CheckError::Io { .. } | CheckError::Parse(_) | CheckError::PropertyRead { .. } => {
                EXIT_IO
            }
            CheckError::MissingField(_) => EXIT_MISSING,
            CheckError::Mismatch(diff) => diff.get(),
        }
    }
}

fn join_keys(keys: &[VersionKey]) -> String {
    keys.iter()
        .map(|k| k.name())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroI32;

    #[test]
    fn exit_codes_follow_error_kind() {
        let io = CheckError::Io {
            path: "/odm/odm_version.prop".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(io.exit_code(), -1);
        assert_eq!(CheckError::Parse("junk".into()).exit_code(), -1);
        assert_eq!(
            CheckError::MissingField(vec![VersionKey::Kernel]).exit_code(),
            -2
        );
        let diff = Difference::new(NonZeroI32::new(-3).unwrap());
        assert_eq!(CheckError::Mismatch(diff).exit_code(), -3);
    }

    #[test]
    fn property_error_lists_keys() {
        let e = CheckError::PropertyRead {
            missing: vec![VersionKey::Kernel, VersionKey::Platform],
        };
        assert_eq!(
            e.to_string(),
            "failed to get all properties (missing: kernel_version, platform_version)"
        );
    }
}
