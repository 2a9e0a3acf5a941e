// CLASSIFICATION: COMMUNITY
// Filename: check_scenarios.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

use odmcheck::display::Presenter;
use odmcheck::props::{MemoryProperties, PropertyStore};
use odmcheck::{CheckError, Checker, Config, Mode, VersionKey, VersionRecord};
use std::fs;
use std::time::Duration;
use tempfile::{tempdir, TempDir};

const MATCHING: &str = "\
ro.build.version = 9
ro.vendor.version = R1
ro.kernel.version = 4.9
ro.platform.version = sdm660
";

#[derive(Default)]
struct Recorder {
    shown: Vec<(VersionRecord, VersionRecord)>,
}

impl Presenter for Recorder {
    fn present(&mut self, declared: &VersionRecord, actual: &VersionRecord) {
        self.shown.push((declared.clone(), actual.clone()));
    }
}

struct Device {
    _dir: TempDir,
    config: Config,
}

fn device(descriptor: Option<&str>, banner: &str) -> Device {
    let dir = tempdir().unwrap();
    let odm = dir.path().join("odm");
    fs::create_dir_all(&odm).unwrap();
    if let Some(text) = descriptor {
        fs::write(odm.join("odm_version.prop"), text).unwrap();
    }
    fs::write(dir.path().join("version"), banner).unwrap();
    let config = Config {
        version_file: odm.join("odm_version.prop"),
        proc_version: dir.path().join("version"),
        odm_dir: odm,
        root_dir: dir.path().to_path_buf(),
        dwell_secs: 0,
        mode: Mode::Warn,
        ..Config::default()
    };
    Device { _dir: dir, config }
}

fn build_props() -> MemoryProperties {
    MemoryProperties::new()
        .with("ro.build.version.release", "9")
        .with("ro.vendor.version", "R1")
        .with("ro.board.platform", "sdm660")
}

const BANNER: &str = "Linux version 4.9.117-foo (builder@host) #1 SMP PREEMPT\n";

#[test]
fn matching_partition_exits_zero() {
    let dev = device(Some(MATCHING), BANNER);
    let mut store = build_props();
    let mut shown = Recorder::default();
    let report = Checker::new(&dev.config, &mut store, &mut shown).run();
    assert!(report.is_match());
    assert_eq!(report.exit_code(), 0);
    assert_eq!(report.declared, report.actual);
    assert!(shown.shown.is_empty());
    assert!(!report.shutdown_requested);
}

#[test]
fn revision_mismatch_shows_diagnostic() {
    let dev = device(Some(&MATCHING.replace("R1", "R2")), BANNER);
    let mut store = build_props();
    let mut shown = Recorder::default();
    let report = Checker::new(&dev.config, &mut store, &mut shown).run();
    assert!(matches!(report.outcome, Err(CheckError::Mismatch(_))));
    assert_ne!(report.exit_code(), 0);
    assert_eq!(shown.shown.len(), 1);
    assert_eq!(shown.shown[0].0.odm_revision.as_str(), "R2");
    assert_eq!(shown.shown[0].1.odm_revision.as_str(), "R1");
}

#[test]
fn missing_kernel_tag_exits_minus_two() {
    let text: String = MATCHING
        .lines()
        .filter(|l| !l.starts_with("ro.kernel.version"))
        .map(|l| format!("{l}\n"))
        .collect();
    let dev = device(Some(&text), BANNER);
    let mut store = build_props();
    let mut shown = Recorder::default();
    let report = Checker::new(&dev.config, &mut store, &mut shown).run();
    match &report.outcome {
        Err(CheckError::MissingField(keys)) => assert_eq!(keys, &vec![VersionKey::Kernel]),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(report.exit_code(), -2);
    assert_eq!(shown.shown.len(), 1);
    assert!(shown.shown[0].0.kernel_version.is_empty());
    assert!(shown.shown[0].0.summary().contains("Kernel:  Platform: sdm660"));
}

#[test]
fn banner_short_version_is_major_minor() {
    let dev = device(Some(MATCHING), "Linux version 4.9.117-foo");
    let mut store = build_props();
    let mut shown = Recorder::default();
    let report = Checker::new(&dev.config, &mut store, &mut shown).run();
    assert_eq!(report.actual.kernel_version.as_str(), "4.9");
}

#[test]
fn empty_platform_property_keeps_partial_record() {
    let dev = device(Some(MATCHING), BANNER);
    let mut store = build_props().with("ro.board.platform", "");
    let mut shown = Recorder::default();
    let report = Checker::new(&dev.config, &mut store, &mut shown).run();
    assert!(matches!(report.outcome, Err(CheckError::PropertyRead { .. })));
    assert_eq!(report.exit_code(), -1);
    assert_eq!(report.actual.android_version.as_str(), "9");
    assert!(report.actual.platform_version.is_empty());
    assert_eq!(shown.shown.len(), 1);
}

#[test]
fn unreadable_descriptor_skips_build_properties() {
    let dev = device(None, BANNER);
    let mut store = build_props();
    let mut shown = Recorder::default();
    let report = Checker::new(&dev.config, &mut store, &mut shown).run();
    assert!(matches!(report.outcome, Err(CheckError::Io { .. })));
    assert_eq!(report.exit_code(), -1);
    assert_eq!(report.actual, VersionRecord::default());
    assert_eq!(shown.shown.len(), 1);
}

#[test]
fn enforce_mode_requests_power_off() {
    let mut dev = device(Some(&MATCHING.replace("sdm660", "msm8998")), BANNER);
    dev.config.mode = Mode::Enforce;
    let mut store = build_props();
    let mut shown = Recorder::default();
    let report = Checker::new(&dev.config, &mut store, &mut shown).run();
    assert!(report.shutdown_requested);
    assert_eq!(store.get("sys.powerctl").as_deref(), Some("shutdown"));
}

#[test]
fn warn_mode_never_powers_off() {
    let dev = device(Some(&MATCHING.replace("sdm660", "msm8998")), BANNER);
    let mut store = build_props();
    let mut shown = Recorder::default();
    let report = Checker::new(&dev.config, &mut store, &mut shown).run();
    assert!(!report.shutdown_requested);
    assert_eq!(store.get("sys.powerctl"), None);
}

#[test]
fn enforce_mode_does_nothing_on_match() {
    let mut dev = device(Some(MATCHING), BANNER);
    dev.config.mode = Mode::Enforce;
    let mut store = build_props();
    let mut shown = Recorder::default();
    let report = Checker::new(&dev.config, &mut store, &mut shown).run();
    assert_eq!(report.exit_code(), 0);
    assert_eq!(store.get("sys.powerctl"), None);
}

#[test]
fn screen_presenter_runs_without_panel() {
    let dev = device(Some(&MATCHING.replace("9", "10")), BANNER);
    let mut store = build_props();
    let mut presenter = dev.config.screen_presenter();
    presenter.framebuffer = dev.config.odm_dir.join("no-fb");
    presenter.fb_sysfs = dev.config.odm_dir.join("no-sysfs");
    presenter.backlight = odmcheck::display::Backlight::new(dev.config.odm_dir.join("no-bl"), 100);
    assert_eq!(presenter.dwell, Duration::ZERO);
    let report = Checker::new(&dev.config, &mut store, &mut presenter).run();
    assert!(matches!(report.outcome, Err(CheckError::Mismatch(_))));
}
