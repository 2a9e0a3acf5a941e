// CLASSIFICATION: COMMUNITY
// Filename: version.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18
//
// ─────────────────────────────────────────────────────────────
// odmcheck · Version record
//
// Four bounded identifiers describing one side of the check:
// the `declared` record parsed from the ODM descriptor and the
// `actual` record assembled from build properties and the
// running kernel.
//
// # Public API
// * [`VersionField`] – bounded owned string
// * [`VersionKey`]   – field selector with tag/property names
// * [`VersionRecord`] – the four-field tuple
// ─────────────────────────────────────────────────────────────

use std::fmt;

use log::warn;
use serde::Deserialize;
use thiserror::Error;

/// Platform limit for a property value, terminator included.
pub const PROPERTY_VALUE_MAX: usize = 92;

/// How over-long values are treated when building a [`VersionField`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TruncationPolicy {
    /// Cut to [`VersionField::MAX_LEN`] and log a warning.
    #[default]
    Truncate,
    /// Refuse the value; the field stays empty.
    Reject,
}

/// Value longer than [`VersionField::MAX_LEN`] under [`TruncationPolicy::Reject`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("value is {len} bytes, limit is {max}")]
pub struct FieldTooLong {
    pub len: usize,
    pub max: usize,
}

/// Bounded version identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct VersionField(String);

impl VersionField {
    /// Longest value a field can hold, in bytes.
    pub const MAX_LEN: usize = PROPERTY_VALUE_MAX - 1;

    /// Build a field from `value`, applying `policy` if it is too long.
    pub fn bounded(value: &str, policy: TruncationPolicy) -> Result<Self, FieldTooLong> {
        if value.len() <= Self::MAX_LEN {
            return Ok(Self(value.to_owned()));
        }
        match policy {
            TruncationPolicy::Reject => Err(FieldTooLong {
                len: value.len(),
                max: Self::MAX_LEN,
            }),
            TruncationPolicy::Truncate => {
                let mut end = Self::MAX_LEN;
                while !value.is_char_boundary(end) {
                    end -= 1;
                }
                warn!(
                    "value truncated from {} to {} bytes: {:?}",
                    value.len(),
                    end,
                    &value[..end]
                );
                Ok(Self(value[..end].to_owned()))
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Zero-padded fixed block, the layout the comparator works on.
    pub(crate) fn padded(&self) -> [u8; PROPERTY_VALUE_MAX] {
        let mut block = [0u8; PROPERTY_VALUE_MAX];
        block[..self.0.len()].copy_from_slice(self.0.as_bytes());
        block
    }
}

impl fmt::Display for VersionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One of the four identifiers, in comparison order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionKey {
    Android,
    Kernel,
    OdmRevision,
    Platform,
}

impl VersionKey {
    pub const ALL: [VersionKey; 4] = [
        VersionKey::Android,
        VersionKey::Kernel,
        VersionKey::OdmRevision,
        VersionKey::Platform,
    ];

    /// Record field name, used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            VersionKey::Android => "android_version",
            VersionKey::Kernel => "kernel_version",
            VersionKey::OdmRevision => "odm_revision",
            VersionKey::Platform => "platform_version",
        }
    }

    /// Tag naming this field in `odm_version.prop`.
    pub fn descriptor_tag(self) -> &'static str {
        match self {
            VersionKey::Android => "ro.build.version",
            VersionKey::Kernel => "ro.kernel.version",
            VersionKey::OdmRevision => "ro.vendor.version",
            VersionKey::Platform => "ro.platform.version",
        }
    }

    /// Build property holding the system image's value.
    ///
    /// The kernel has none; it comes from the running kernel's banner.
    pub fn build_property(self) -> Option<&'static str> {
        match self {
            VersionKey::Android => Some("ro.build.version.release"),
            VersionKey::Kernel => None,
            VersionKey::OdmRevision => Some("ro.vendor.version"),
            VersionKey::Platform => Some("ro.board.platform"),
        }
    }

    pub fn from_descriptor_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.descriptor_tag() == tag)
    }
}

/// The four identifiers of one side of the check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionRecord {
    pub android_version: VersionField,
    pub kernel_version: VersionField,
    pub odm_revision: VersionField,
    pub platform_version: VersionField,
}

impl VersionRecord {
    pub fn get(&self, key: VersionKey) -> &VersionField {
        match key {
            VersionKey::Android => &self.android_version,
            VersionKey::Kernel => &self.kernel_version,
            VersionKey::OdmRevision => &self.odm_revision,
            VersionKey::Platform => &self.platform_version,
        }
    }

    pub fn set(&mut self, key: VersionKey, field: VersionField) {
        let slot = match key {
            VersionKey::Android => &mut self.android_version,
            VersionKey::Kernel => &mut self.kernel_version,
            VersionKey::OdmRevision => &mut self.odm_revision,
            VersionKey::Platform => &mut self.platform_version,
        };
        *slot = field;
    }

    /// Keys whose field is still empty.
    pub fn missing(&self) -> Vec<VersionKey> {
        VersionKey::ALL
            .into_iter()
            .filter(|k| self.get(*k).is_empty())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// One-line summary shown on the diagnostic screen.
    pub fn summary(&self) -> String {
        format!(
            "Android: {} Kernel: {} Platform: {} ODM rev: {}",
            self.android_version, self.kernel_version, self.platform_version, self.odm_revision
        )
    }

    /// Render the record as an `odm_version.prop` body.
    pub fn to_descriptor(&self) -> String {
        VersionKey::ALL
            .into_iter()
            .map(|k| format!("{} = {}\n", k.descriptor_tag(), self.get(k)))
            .collect()
    }
}
