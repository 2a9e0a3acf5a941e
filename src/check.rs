// CLASSIFICATION: COMMUNITY
// Filename: check.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! One pass of the ODM consistency check.
//!
//! mount check → declared record → actual record → completeness →
//! comparison. The first failing stage ends the pass; whatever was
//! gathered so far is handed to the presenter, and in enforce mode the
//! device is then asked to power off.

use log::{error, info, warn};

use crate::compare::{compare, Comparison};
use crate::config::{Config, Mode};
use crate::descriptor;
use crate::display::Presenter;
use crate::error::CheckError;
use crate::mount::is_separate_mount;
use crate::power;
use crate::props::{self, PropertyStore};
use crate::version::VersionRecord;

/// Result of a pass.
#[derive(Debug)]
pub struct Report {
    /// From the ODM descriptor.
    pub declared: VersionRecord,
    /// From build properties and the running kernel.
    pub actual: VersionRecord,
    pub outcome: Result<(), CheckError>,
    pub shutdown_requested: bool,
}

impl Report {
    pub fn is_match(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn exit_code(&self) -> i32 {
        match &self.outcome {
            Ok(()) => 0,
            Err(e) => e.exit_code(),
        }
    }
}

pub struct Checker<'a> {
    config: &'a Config,
    store: &'a mut dyn PropertyStore,
    presenter: &'a mut dyn Presenter,
}

impl<'a> Checker<'a> {
    pub fn new(
        config: &'a Config,
        store: &'a mut dyn PropertyStore,
        presenter: &'a mut dyn Presenter,
    ) -> Self {
        Self {
            config,
            store,
            presenter,
        }
    }

    pub fn run(&mut self) -> Report {
        info!(
            "ODM partition mounted = {}",
            is_separate_mount(&self.config.odm_dir, &self.config.root_dir)
        );
        let mut declared = VersionRecord::default();
        let mut actual = VersionRecord::default();
        let outcome = self.evaluate(&mut declared, &mut actual);

        let mut shutdown_requested = false;
        if let Err(e) = &outcome {
            error!("{e}");
            self.presenter.present(&declared, &actual);
            match self.config.mode {
                Mode::Enforce => {
                    shutdown_requested = power::request_shutdown(&mut *self.store).is_ok();
                }
                Mode::Warn => warn!("warn-only mode, boot continues"),
            }
        }
        Report {
            declared,
            actual,
            outcome,
            shutdown_requested,
        }
    }

    fn evaluate(
        &mut self,
        declared: &mut VersionRecord,
        actual: &mut VersionRecord,
    ) -> Result<(), CheckError> {
        let policy = self.config.truncation;
        *declared = descriptor::read_file(&self.config.version_file, policy)?;

        let (build, read) = props::read_build_record(&*self.store, &self.config.proc_version, policy);
        *actual = build;
        read?;

        let missing = declared.missing();
        if !missing.is_empty() {
            return Err(CheckError::MissingField(missing));
        }

        match compare(declared, actual) {
            Comparison::Equal => Ok(()),
            Comparison::NotEqual(diff) => Err(CheckError::Mismatch(diff)),
        }
    }
}

/// Build-time record rendered as an `odm_version.prop` body.
pub fn dump_actual(config: &Config, store: &dyn PropertyStore) -> Result<String, CheckError> {
    let (record, read) = props::read_build_record(store, &config.proc_version, config.truncation);
    read.map(|()| record.to_descriptor())
}
