//! Snapshot decoding from files, stdin and JSON Lines streams.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::types::AuthState;

/// Read a whole input: a file path, or stdin for `None` / `"-"`.
pub fn read_input(input: Option<&str>) -> Result<String> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| Error::IoRead {
                    path: PathBuf::from("<stdin>"),
                    source: e,
                })?;
            Ok(buf)
        }
        Some(path) => fs::read_to_string(path).map_err(|e| Error::IoRead {
            path: PathBuf::from(path),
            source: e,
        }),
    }
}

/// Decode a single JSON snapshot document.
pub fn parse_snapshot(text: &str) -> Result<AuthState> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::snapshot_malformed(None, "empty input"));
    }

    serde_json::from_str(text).map_err(|e| Error::snapshot_malformed(None, e.to_string()))
}

/// Decode one JSON Lines entry. Blank lines and `#` comments yield `None`.
pub fn parse_snapshot_line(line_no: usize, line: &str) -> Result<Option<AuthState>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    serde_json::from_str(line)
        .map(Some)
        .map_err(|e| Error::snapshot_malformed(Some(line_no), e.to_string()))
}

/// Decode a JSON Lines stream, failing on the first malformed line.
pub fn parse_snapshot_stream(text: &str) -> Result<Vec<AuthState>> {
    let mut snapshots = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if let Some(snapshot) = parse_snapshot_line(idx + 1, line)? {
            snapshots.push(snapshot);
        }
    }
    Ok(snapshots)
}
