// CLASSIFICATION: COMMUNITY
// Filename: config.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Runtime configuration.
//!
//! Sources, later ones winning: built-in defaults, the TOML file
//! (`/odm/etc/odmcheck.toml` unless told otherwise), `ODMCHECK_*`
//! environment variables, then command-line flags.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::display::{Backlight, Layout, ScreenPresenter};
use crate::version::TruncationPolicy;

pub const DEFAULT_CONFIG_PATH: &str = "/odm/etc/odmcheck.toml";

/// What to do once the diagnostic has been shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Report only; boot continues.
    Warn,
    /// Report, then power the device off.
    Enforce,
}

impl Default for Mode {
    /// `warn`, unless the crate was built with `ODMCHECK_DEFAULT_MODE=enforce`.
    fn default() -> Self {
        match option_env!("ODMCHECK_DEFAULT_MODE") {
            Some("enforce") => Mode::Enforce,
            _ => Mode::Warn,
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "warn" | "warn-only" => Ok(Mode::Warn),
            "enforce" => Ok(Mode::Enforce),
            other => Err(format!("unknown mode {other:?}")),
        }
    }
}

/// Where log records go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    #[default]
    Stderr,
    /// The kernel log, for boots without a console.
    Kmsg,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub mode: Mode,
    pub version_file: PathBuf,
    pub proc_version: PathBuf,
    pub odm_dir: PathBuf,
    pub root_dir: PathBuf,
    pub backlight_path: PathBuf,
    pub backlight_level: u32,
    pub dwell_secs: u64,
    pub framebuffer: PathBuf,
    pub fb_sysfs: PathBuf,
    pub font_scale: u32,
    pub truncation: TruncationPolicy,
    pub getprop: PathBuf,
    pub setprop: PathBuf,
    pub log_target: LogTarget,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            version_file: "/odm/odm_version.prop".into(),
            proc_version: "/proc/version".into(),
            odm_dir: "/odm".into(),
            root_dir: "/".into(),
            backlight_path: "/sys/class/leds/lcd-backlight/brightness".into(),
            backlight_level: 100,
            dwell_secs: 10,
            framebuffer: "/dev/graphics/fb0".into(),
            fb_sysfs: "/sys/class/graphics/fb0".into(),
            font_scale: 3,
            truncation: TruncationPolicy::default(),
            getprop: "/system/bin/getprop".into(),
            setprop: "/system/bin/setprop".into(),
            log_target: LogTarget::default(),
        }
    }
}

/// Errors produced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid {var}: {reason}")]
    Env { var: &'static str, reason: String },
}

impl Config {
    /// Load the file at `path`, or the default location when `None`.
    ///
    /// A missing default file yields the defaults; a missing explicit
    /// file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };
        let data = match std::fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default())
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        toml::from_str(&data).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Apply `ODMCHECK_MODE` and `ODMCHECK_VERSION_FILE`.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(v) = std::env::var("ODMCHECK_MODE") {
            self.mode = v.parse().map_err(|reason| ConfigError::Env {
                var: "ODMCHECK_MODE",
                reason,
            })?;
        }
        if let Ok(v) = std::env::var("ODMCHECK_VERSION_FILE") {
            self.version_file = PathBuf::from(v);
        }
        Ok(())
    }

    pub fn dwell(&self) -> Duration {
        Duration::from_secs(self.dwell_secs)
    }

    /// Panel presenter wired to the configured devices.
    pub fn screen_presenter(&self) -> ScreenPresenter {
        ScreenPresenter {
            framebuffer: self.framebuffer.clone(),
            fb_sysfs: self.fb_sysfs.clone(),
            backlight: Backlight::new(&self.backlight_path, self.backlight_level),
            layout: Layout::new(self.font_scale),
            dwell: self.dwell(),
        }
    }
}
