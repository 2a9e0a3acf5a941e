// CLASSIFICATION: COMMUNITY
// Filename: cli_dump.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

use odmcheck::check::dump_actual;
use odmcheck::descriptor::parse_str;
use odmcheck::props::{MemoryProperties, PropFile};
use odmcheck::version::TruncationPolicy;
use odmcheck::Config;
use std::fs;
use tempfile::tempdir;

#[test]
fn dumped_record_reparses_to_build_values() {
    let dir = tempdir().unwrap();
    let banner = dir.path().join("version");
    fs::write(&banner, "Linux version 5.4.210-qgki #1\n").unwrap();
    let build_prop = dir.path().join("build.prop");
    fs::write(
        &build_prop,
        "ro.build.version.release=11\nro.vendor.version=R7\nro.board.platform=lito\n",
    )
    .unwrap();
    let config = Config {
        proc_version: banner,
        ..Config::default()
    };
    let store = PropFile::load(&build_prop).unwrap();
    let text = dump_actual(&config, &store).unwrap();
    let rec = parse_str(&text, TruncationPolicy::Truncate);
    assert_eq!(rec.summary(), "Android: 11 Kernel: 5.4 Platform: lito ODM rev: R7");
}

#[test]
fn dump_fails_when_a_property_is_absent() {
    let dir = tempdir().unwrap();
    let banner = dir.path().join("version");
    fs::write(&banner, "Linux version 5.4.210-qgki\n").unwrap();
    let config = Config {
        proc_version: banner,
        ..Config::default()
    };
    let store = MemoryProperties::new().with("ro.build.version.release", "11");
    let err = dump_actual(&config, &store).unwrap_err();
    assert_eq!(err.exit_code(), -1);
}
