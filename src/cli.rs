// CLASSIFICATION: COMMUNITY
// Filename: cli.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Command-line front end of the `odmcheck` binary.
//!
//! Run without flags it behaves as the boot service: default config,
//! device property service, panel output.

use std::path::{Path, PathBuf};

use clap::Parser;
use log::{error, info};

use crate::check::{dump_actual, Checker};
use crate::config::{Config, Mode};
use crate::display::{LogPresenter, Presenter};
use crate::logging;
use crate::props::{PropFile, PropertyStore, SystemProperties};

#[derive(Debug, Parser)]
#[command(name = "odmcheck", about = "Verify ODM partition versions against the system image")]
pub struct Cli {
    /// Configuration file (default /odm/etc/odmcheck.toml, optional)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Power off on mismatch
    #[arg(long, conflicts_with = "warn_only")]
    pub enforce: bool,

    /// Only report a mismatch
    #[arg(long)]
    pub warn_only: bool,

    /// Descriptor file to check
    #[arg(long)]
    pub version_file: Option<PathBuf>,

    /// Read build properties from a build.prop file instead of the property service
    #[arg(long)]
    pub prop_file: Option<PathBuf>,

    /// Log the diagnostic instead of drawing it
    #[arg(long)]
    pub no_display: bool,

    /// Print the build-time record as odm_version.prop and exit
    #[arg(long)]
    pub dump_actual: bool,
}

impl Cli {
    /// Fold the flags into `cfg`.
    pub fn apply(&self, cfg: &mut Config) {
        if self.enforce {
            cfg.mode = Mode::Enforce;
        }
        if self.warn_only {
            cfg.mode = Mode::Warn;
        }
        if let Some(p) = &self.version_file {
            cfg.version_file = p.clone();
        }
    }
}

/// Property store for the run.
///
/// An unreadable prop file becomes an empty store, so the check still
/// fails through the diagnostic path. Writes always reach the device
/// property service.
pub fn open_store(prop_file: Option<&Path>, cfg: &Config) -> Box<dyn PropertyStore> {
    let system = SystemProperties::new(&cfg.getprop, &cfg.setprop);
    match prop_file {
        Some(path) => {
            let file = PropFile::load(path).unwrap_or_else(|e| {
                error!("failed to read {}: {e}", path.display());
                PropFile::default()
            });
            Box::new(file.writing_to(system))
        }
        None => Box::new(system),
    }
}

/// Resolve configuration, run, and return the process exit code.
pub fn run(cli: Cli) -> i32 {
    let loaded = Config::load(cli.config.as_deref());
    let (mut cfg, load_err) = match loaded {
        Ok(cfg) => (cfg, None),
        Err(e) => (Config::default(), Some(e)),
    };
    logging::init(cfg.log_target);
    if let Some(e) = load_err {
        error!("{e}; using defaults");
    }
    if let Err(e) = cfg.apply_env() {
        error!("{e}");
    }
    cli.apply(&mut cfg);

    let mut store = open_store(cli.prop_file.as_deref(), &cfg);

    if cli.dump_actual {
        return match dump_actual(&cfg, store.as_ref()) {
            Ok(text) => {
                print!("{text}");
                0
            }
            Err(e) => {
                error!("{e}");
                e.exit_code()
            }
        };
    }

    let mut presenter: Box<dyn Presenter> = if cli.no_display {
        Box::new(LogPresenter)
    } else {
        Box::new(cfg.screen_presenter())
    };
    let report = Checker::new(&cfg, store.as_mut(), presenter.as_mut()).run();
    info!("exit {}", report.exit_code());
    report.exit_code()
}
