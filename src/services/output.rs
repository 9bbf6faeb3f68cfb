//! Output writer for the stats document

use crate::types::{Result, Stats};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::Path;

/// Default output file, relative to the working directory
pub const DEFAULT_OUTPUT_PATH: &str = "stats.json";

/// Render the document as 4-space indented JSON
pub fn to_pretty_json(stats: &Stats) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    stats.serialize(&mut ser)?;
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write the document, replacing any existing file
pub fn write_stats(path: &Path, stats: &Stats) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let content = to_pretty_json(stats)?;
    fs::write(path, content)?;
    Ok(())
}
