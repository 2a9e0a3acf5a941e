// CLASSIFICATION: COMMUNITY
// Filename: descriptor.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18
//
// ─────────────────────────────────────────────────────────────
// odmcheck · Version descriptor parser
//
// Reads the `key = value` file the ODM partition ships with
// (`/odm/odm_version.prop`) into a [`VersionRecord`].
//
// Grammar, per line:
//   * split at the first `=`; lines without one are skipped
//   * name and value are trimmed of C-locale whitespace (incl. \v);
//     inner whitespace is kept, so `9 beta` stays `9 beta` where
//     older tools kept only the first token
//   * an empty name or value drops the line
//   * unknown names are ignored, later duplicates win
//
// Lines are capped at 255 bytes; the tail of a longer line is
// discarded. A file with none of the known tags parses fine,
// completeness is the caller's concern.
// ─────────────────────────────────────────────────────────────

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use log::{debug, warn};

use crate::error::CheckError;
use crate::version::{TruncationPolicy, VersionField, VersionKey, VersionRecord};

/// Longest line content honoured by the reader.
pub const MAX_LINE: usize = 255;

/// Split `data` into trimmed `(name, value)` pairs.
///
/// Shared with [`crate::props::PropFile`], which reads `build.prop`
/// files with the same grammar.
pub fn entries(data: &[u8]) -> Vec<(String, String)> {
    data.split(|&b| b == b'\n')
        .filter_map(|raw| {
            let line = &raw[..raw.len().min(MAX_LINE)];
            let line: Cow<'_, str> = String::from_utf8_lossy(line);
            let (name, value) = line.split_once('=')?;
            let name = trim(name);
            let value = trim(value);
            if name.is_empty() || value.is_empty() {
                return None;
            }
            Some((name.to_owned(), value.to_owned()))
        })
        .collect()
}

fn trim(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_ascii_whitespace() || c == '\x0B')
}

/// Parse descriptor contents already in memory.
pub fn parse_bytes(data: &[u8], policy: TruncationPolicy) -> VersionRecord {
    let mut record = VersionRecord::default();
    for (name, value) in entries(data) {
        let Some(key) = VersionKey::from_descriptor_tag(&name) else {
            continue;
        };
        match VersionField::bounded(&value, policy) {
            Ok(field) => {
                debug!("{}: {}", key.name(), field);
                record.set(key, field);
            }
            Err(e) => warn!("ignoring {name}: {e}"),
        }
    }
    record
}

pub fn parse_str(text: &str, policy: TruncationPolicy) -> VersionRecord {
    parse_bytes(text.as_bytes(), policy)
}

/// Read and parse the descriptor at `path`.
pub fn read_file(path: &Path, policy: TruncationPolicy) -> Result<VersionRecord, CheckError> {
    let data = fs::read(path).map_err(|source| {
        warn!("Failed to open version prop file: {}", path.display());
        CheckError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;
    Ok(parse_bytes(&data, policy))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
ro.build.version = 9
ro.vendor.version = R1
ro.kernel.version = 4.9
ro.platform.version = sdm660
";

    fn parse(text: &str) -> VersionRecord {
        parse_str(text, TruncationPolicy::Truncate)
    }

    #[test]
    fn parses_all_four_tags() {
        let rec = parse(SAMPLE);
        assert_eq!(rec.android_version.as_str(), "9");
        assert_eq!(rec.odm_revision.as_str(), "R1");
        assert_eq!(rec.kernel_version.as_str(), "4.9");
        assert_eq!(rec.platform_version.as_str(), "sdm660");
    }

    #[test]
    fn tolerates_whitespace_and_crlf() {
        let rec = parse("  ro.build.version\t=\t 10 \r\n");
        assert_eq!(rec.android_version.as_str(), "10");
    }

    #[test]
    fn trims_vertical_tab_and_keeps_inner_spaces() {
        let rec = parse("\x0Bro.build.version\x0B= 9 beta\x0B\n");
        assert_eq!(rec.android_version.as_str(), "9 beta");
    }

    #[test]
    fn skips_noise_lines() {
        let rec = parse("# comment\n\nro.build.version 9\nro.unknown = x\n=9\nro.vendor.version =   \n");
        assert_eq!(rec, VersionRecord::default());
    }

    #[test]
    fn splits_at_first_equals() {
        let rec = parse("ro.platform.version = a=b\n");
        assert_eq!(rec.platform_version.as_str(), "a=b");
    }

    #[test]
    fn later_duplicate_wins() {
        let rec = parse("ro.vendor.version = R1\nro.vendor.version = R2\n");
        assert_eq!(rec.odm_revision.as_str(), "R2");
    }

    #[test]
    fn overlong_line_is_capped() {
        let text = format!("ro.vendor.version = {}\n", "r".repeat(400));
        let rec = parse(&text);
        assert_eq!(rec.odm_revision.as_str().len(), VersionField::MAX_LEN);
    }

    #[test]
    fn reject_policy_leaves_field_empty() {
        let text = format!("ro.vendor.version = {}\nro.build.version = 9\n", "r".repeat(120));
        let rec = parse_str(&text, TruncationPolicy::Reject);
        assert!(rec.odm_revision.is_empty());
        assert_eq!(rec.android_version.as_str(), "9");
    }

    #[test]
    fn parsing_is_idempotent() {
        assert_eq!(parse(SAMPLE), parse(SAMPLE));
    }

    #[test]
    fn descriptor_rendering_reparses() {
        let rec = parse(SAMPLE);
        assert_eq!(parse(&rec.to_descriptor()), rec);
    }
}
