//! Run settings record parser
//!
//! A run directory holds `<wiki>-<date>-runsettings.txt` with one data line
//! of seven or more whitespace-separated fields, usually written as a JSON
//! list:
//!
//! ```text
//! [1, "1000,1000,1000,1000", "", "3", "100000", 1, 1]
//! ```
//!
//! Field positions: parts flag, history pages-per-part list, (unused),
//! abstract part count, (unused), recombine flag, checkpoint flag.

use dumpstatus_common::types::RunSettings;
use dumpstatus_common::{DumpStatusError, Result};

const MIN_FIELDS: usize = 7;

/// Parse the text of a run settings file.
///
/// Blank lines and `#` comments are ignored; exactly one data line must
/// remain.
pub fn parse_run_settings(text: &str) -> Result<RunSettings> {
    let lines: Vec<&str> = text
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
        .collect();

    let [line] = lines.as_slice() else {
        return Err(DumpStatusError::malformed_settings(format!(
            "expected exactly one settings line, found {}",
            lines.len()
        )));
    };

    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < MIN_FIELDS {
        return Err(DumpStatusError::malformed_settings(format!(
            "expected at least {} fields, found {}",
            MIN_FIELDS,
            fields.len()
        )));
    }

    let mut settings = RunSettings {
        has_parts: is_set(fields[0]),
        recombine: is_set(fields[5]),
        checkpoints_enabled: is_set(fields[6]),
        ..RunSettings::default()
    };

    let history = field_value(fields[1]);
    if !history.is_empty() {
        settings.history_parts_count =
            history.split(',').filter(|token| !token.trim().is_empty()).count() as u32;
    }

    let abstracts = field_value(fields[3]);
    if !abstracts.is_empty() {
        settings.abstract_parts_count = abstracts.parse().map_err(|_| {
            DumpStatusError::malformed_settings(format!(
                "abstract part count is not a number: '{}'",
                fields[3]
            ))
        })?;
    }

    Ok(settings)
}

/// Strip the list punctuation, trailing comma and quotes around a field
fn field_value(field: &str) -> &str {
    field
        .trim_start_matches('[')
        .trim_end_matches(']')
        .trim_end_matches(',')
        .trim_matches('"')
}

/// A flag field counts as set when it carries a value other than an explicit false.
///
/// The record is a JSON-encoded list, so an unset flag is written as `0`,
/// `false`, `null` or `""` rather than as an empty field.
fn is_set(field: &str) -> bool {
    !matches!(field_value(field), "" | "0" | "false" | "null")
}
