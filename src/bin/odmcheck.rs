// CLASSIFICATION: COMMUNITY
// Filename: odmcheck.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Entry point for the boot-time ODM version check.

use clap::Parser;
use odmcheck::cli::{self, Cli};

fn main() {
    let code = cli::run(Cli::parse());
    std::process::exit(code);
}
