//! Version header parsing and version stem construction
//!
//! The firmware declares its version as preprocessor constants:
//!
//! ```c
//! #define VERSION_MAJOR       0
//! #define VERSION_MINOR       8
//! #define VERSION_PATCH       36
//! ```
//!
//! Values are read at a fixed column after each marker, so the header layout
//! matters: a marker that is absent contributes nothing to the stem.

use crate::defaults::{
    COMPONENT_MARKERS, DATE_STAMP_FORMAT, MARKER_VALUE_OFFSET, VERSION_LINE_MARKER,
    VERSION_SEPARATOR,
};
use crate::exceptions::{FwstampError, Result};
use chrono::NaiveDate;
use log::{debug, warn};
use std::fs;
use std::path::Path;

/// One version value pulled out of the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionFragment {
    /// Marker that matched (`_MAJOR`, `_MINOR`, `_PATCH`)
    pub marker: &'static str,
    /// Text after the marker column, trailing whitespace removed
    pub value: String,
    /// 1-based line number in the header
    pub line: usize,
}

impl VersionFragment {
    /// Numeric value, if the fragment is a plain unsigned integer
    pub fn number(&self) -> Option<u32> {
        self.value.parse().ok()
    }
}

/// Extract version fragments from header text, in file order
pub fn parse_version_fragments(contents: &str) -> Vec<VersionFragment> {
    let mut fragments = Vec::new();

    for (index, line) in contents.lines().enumerate() {
        if !line.contains(VERSION_LINE_MARKER) {
            continue;
        }
        for marker in COMPONENT_MARKERS {
            if let Some(position) = line.find(marker) {
                let value = value_after_marker(&line[position..]).to_string();
                fragments.push(VersionFragment {
                    marker,
                    value,
                    line: index + 1,
                });
            }
        }
    }

    fragments
}

/// Text `MARKER_VALUE_OFFSET` characters into `from_marker`, trailing whitespace removed
fn value_after_marker(from_marker: &str) -> &str {
    from_marker
        .char_indices()
        .nth(MARKER_VALUE_OFFSET)
        .map(|(offset, _)| from_marker[offset..].trim_end())
        .unwrap_or("")
}

/// Read a version header and extract its fragments
pub fn read_version_fragments(path: &Path) -> Result<Vec<VersionFragment>> {
    let contents = fs::read_to_string(path).map_err(|source| FwstampError::HeaderRead {
        path: path.to_path_buf(),
        source,
    })?;

    let fragments = parse_version_fragments(&contents);
    debug!(
        "📄 {} version fragment(s) in {}",
        fragments.len(),
        path.display()
    );

    for marker in COMPONENT_MARKERS {
        if !fragments.iter().any(|f| f.marker == marker) {
            warn!("⚠️ No {} marker in {}", marker, path.display());
        }
    }

    Ok(fragments)
}

/// Build `<yymmdd>_<label>_<a.b.c>` from a date, label and fragments
///
/// Without any fragment the stem is just `<yymmdd>_<label>`.
pub fn version_stem(date: NaiveDate, label: &str, fragments: &[VersionFragment]) -> String {
    for fragment in fragments.iter().filter(|f| f.number().is_none()) {
        warn!(
            "⚠️ Non-numeric {} value {:?} on line {}",
            fragment.marker, fragment.value, fragment.line
        );
    }

    let version = fragments
        .iter()
        .map(|f| f.value.as_str())
        .collect::<Vec<_>>()
        .join(VERSION_SEPARATOR);

    let prefix = format!("{}_{}", date.format(DATE_STAMP_FORMAT), label);
    if fragments.is_empty() {
        prefix
    } else {
        format!("{}_{}", prefix, version)
    }
}
