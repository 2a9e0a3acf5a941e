// CLASSIFICATION: COMMUNITY
// Filename: logging.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! `env_logger` setup, optionally routed into the kernel log.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use env_logger::{Builder, Env, Target};
use log::Level;

use crate::config::LogTarget;

const KMSG: &str = "/dev/kmsg";

/// Syslog priority prefix understood by `/dev/kmsg`.
pub fn kmsg_priority(level: Level) -> u8 {
    match level {
        Level::Error => 3,
        Level::Warn => 4,
        Level::Info => 6,
        Level::Debug | Level::Trace => 7,
    }
}

/// Install the global logger. `RUST_LOG` overrides the `info` default.
///
/// Falls back to stderr when the kernel log cannot be opened.
pub fn init(target: LogTarget) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    if target == LogTarget::Kmsg {
        match OpenOptions::new().write(true).open(Path::new(KMSG)) {
            Ok(kmsg) => {
                builder
                    .target(Target::Pipe(Box::new(kmsg)))
                    .format(|buf, record| {
                        writeln!(
                            buf,
                            "<{}>odmcheck: {}",
                            kmsg_priority(record.level()),
                            record.args()
                        )
                    });
            }
            Err(e) => eprintln!("odmcheck: {KMSG} unavailable ({e}), logging to stderr"),
        }
    }
    let _ = builder.try_init();
}
