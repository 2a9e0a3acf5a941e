// CLASSIFICATION: COMMUNITY
// Filename: props.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Build-time property access and the `actual` record reader.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, error, warn};
use thiserror::Error;

use crate::descriptor;
use crate::error::CheckError;
use crate::kernel;
use crate::version::{TruncationPolicy, VersionField, VersionKey, VersionRecord};

/// Errors raised while writing a property.
#[derive(Debug, Error)]
pub enum PropertyError {
    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("setting {key} failed ({status})")]
    SetFailed { key: String, status: String },
    #[error("property store is read-only")]
    ReadOnly,
}

/// Key/value property service.
///
/// An empty value is reported as absent.
pub trait PropertyStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PropertyError>;
}

/// The device property service, reached through `getprop` / `setprop`.
#[derive(Debug, Clone)]
pub struct SystemProperties {
    getprop: PathBuf,
    setprop: PathBuf,
}

impl SystemProperties {
    pub fn new(getprop: impl Into<PathBuf>, setprop: impl Into<PathBuf>) -> Self {
        Self {
            getprop: getprop.into(),
            setprop: setprop.into(),
        }
    }
}

impl Default for SystemProperties {
    fn default() -> Self {
        Self::new("/system/bin/getprop", "/system/bin/setprop")
    }
}

impl PropertyStore for SystemProperties {
    fn get(&self, key: &str) -> Option<String> {
        let out = match Command::new(&self.getprop).arg(key).output() {
            Ok(out) => out,
            Err(e) => {
                warn!("{} {key}: {e}", self.getprop.display());
                return None;
            }
        };
        if !out.status.success() {
            warn!("{} {key} exited with {}", self.getprop.display(), out.status);
            return None;
        }
        getprop_value(&out.stdout)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PropertyError> {
        let status = Command::new(&self.setprop)
            .args([key, value])
            .status()
            .map_err(|source| PropertyError::Spawn {
                tool: self.setprop.clone(),
                source,
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(PropertyError::SetFailed {
                key: key.to_owned(),
                status: status.to_string(),
            })
        }
    }
}

/// Value printed by `getprop`, minus the one newline it appends.
fn getprop_value(stdout: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(stdout);
    let value = text.strip_suffix('\n').unwrap_or(text.as_ref());
    (!value.is_empty()).then(|| value.to_owned())
}

/// Store reading from a `build.prop` style file.
///
/// Read-only unless a writer is attached with [`PropFile::writing_to`].
#[derive(Debug, Clone, Default)]
pub struct PropFile {
    values: HashMap<String, String>,
    writer: Option<SystemProperties>,
}

impl PropFile {
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let data = fs::read(path)?;
        Ok(Self {
            values: descriptor::entries(&data).into_iter().collect(),
            writer: None,
        })
    }

    /// Send `set` to the device property service.
    pub fn writing_to(mut self, writer: SystemProperties) -> Self {
        self.writer = Some(writer);
        self
    }
}

impl PropertyStore for PropFile {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PropertyError> {
        match self.writer.as_mut() {
            Some(w) => w.set(key, value),
            None => {
                warn!("cannot set {key}: prop file is read-only");
                Err(PropertyError::ReadOnly)
            }
        }
    }
}

/// In-memory store for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryProperties {
    values: HashMap<String, String>,
}

impl MemoryProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl PropertyStore for MemoryProperties {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).filter(|v| !v.is_empty()).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PropertyError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Assemble the `actual` record from build properties and the kernel banner.
///
/// Every lookup is attempted. Fields that were read stay in the record
/// even when the overall result is an error naming the failed keys.
pub fn read_build_record(
    store: &dyn PropertyStore,
    banner: &Path,
    policy: TruncationPolicy,
) -> (VersionRecord, Result<(), CheckError>) {
    let mut record = VersionRecord::default();
    let mut missing = Vec::new();
    for key in VersionKey::ALL {
        let value = match key.build_property() {
            Some(prop) => store.get(prop),
            None => match kernel::read_banner(banner) {
                Ok(v) => Some(v.short()),
                Err(e) => {
                    error!("{e}");
                    None
                }
            },
        };
        match value.map(|v| VersionField::bounded(&v, policy)) {
            Some(Ok(field)) if !field.is_empty() => {
                debug!("build {}: {}", key.name(), field);
                record.set(key, field);
            }
            Some(Err(e)) => {
                warn!("build {}: {e}", key.name());
                missing.push(key);
            }
            _ => missing.push(key),
        }
    }
    if missing.is_empty() {
        (record, Ok(()))
    } else {
        error!("Failed to get all properties");
        (record, Err(CheckError::PropertyRead { missing }))
    }
}
