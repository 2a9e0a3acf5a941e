// CLASSIFICATION: COMMUNITY
// Filename: lib.rs v0.1
// Date Modified: 2026-10-18
// Author: Lukas Bower

//! Boot-time check that the ODM partition matches the system image.
//!
//! The ODM partition declares the versions it was built for in
//! `odm_version.prop`; the system image knows its own through build
//! properties and the running kernel. A mismatch is shown on the panel
//! and, in enforce mode, the device is powered off.

/// Whole-record comparison
pub mod compare;

/// `odmcheck` command line
pub mod cli;

/// Runtime configuration (TOML + environment)
pub mod config;

/// One check pass and its report
pub mod check;

/// `odm_version.prop` parser
pub mod descriptor;

/// Panel output: framebuffer, font, backlight
pub mod display;

pub mod error;

/// `/proc/version` parser
pub mod kernel;

pub mod logging;

pub mod mount;

pub mod power;

/// Property stores and the build-time record reader
pub mod props;

/// Version record types
pub mod version;

pub use check::{Checker, Report};
pub use config::{Config, Mode};
pub use error::CheckError;
pub use version::{VersionKey, VersionRecord};
