// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Unified diff application.
//!
//! Applies a unified diff to text, forward or in reverse. Hunks are placed by
//! their line numbers only; context lines are not compared against the
//! input. This is enough for replaying diffs against the exact files they
//! were produced from, such as pre-generated vendor sources.

use std::path::Path;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::core::{CodegenError, Result};

/// Which side of the diff to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Produce the new file from the old one
    #[default]
    Forward,
    /// Produce the old file from the new one
    Reverse,
}

impl Direction {
    /// Marker of lines that exist only in the produced side.
    fn kept_marker(self) -> char {
        match self {
            Direction::Forward => '+',
            Direction::Reverse => '-',
        }
    }
}

/// Errors raised while applying a diff.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    /// A line outside a hunk body is not a hunk header
    #[error("cannot process diff at line {line}: expected a hunk header")]
    MalformedHunk {
        /// 1-based line in the diff
        line: usize,
    },

    /// A hunk starts before the previous one ended or past the end of input
    #[error("hunk at diff line {line} does not fit the input")]
    HunkOutOfRange {
        /// 1-based line in the diff
        line: usize,
    },
}

impl From<DiffError> for CodegenError {
    fn from(err: DiffError) -> Self {
        CodegenError::parse("unified diff", err.to_string())
    }
}

/// Apply `diff` to `input`.
///
/// # Example
///
/// ```
/// use connext_typesupport::diff::{apply_patch, Direction};
///
/// let diff = "--- a\n+++ b\n@@ -1,2 +1,2 @@\n a\n-b\n+c\n";
/// assert_eq!(apply_patch("a\nb\n", diff, Direction::Forward).unwrap(), "a\nc\n");
/// assert_eq!(apply_patch("a\nc\n", diff, Direction::Reverse).unwrap(), "a\nb\n");
/// ```
pub fn apply_patch(
    input: &str,
    diff: &str,
    direction: Direction,
) -> std::result::Result<String, DiffError> {
    let header = hunk_header()?;
    let source: Vec<&str> = input.split_inclusive('\n').collect();
    let lines: Vec<&str> = diff.split_inclusive('\n').collect();
    let kept = direction.kept_marker();

    let mut out = String::with_capacity(input.len());
    let mut consumed = 0;
    let mut i = 0;

    while i < lines.len() && (lines[i].starts_with("---") || lines[i].starts_with("+++")) {
        i += 1;
    }

    while i < lines.len() {
        let hunk_line = i + 1;
        let caps = header
            .captures(lines[i].trim_end_matches(['\r', '\n']))
            .ok_or(DiffError::MalformedHunk { line: hunk_line })?;
        i += 1;

        let (start_group, count_group) = match direction {
            Direction::Forward => (1, 2),
            Direction::Reverse => (3, 4),
        };
        let start: usize = caps
            .get(start_group)
            .and_then(|m| m.as_str().parse().ok())
            .ok_or(DiffError::MalformedHunk { line: hunk_line })?;
        let empty_side = caps.get(count_group).is_some_and(|m| m.as_str() == "0");
        // An empty side names the line after which the hunk goes.
        let hunk_start = if empty_side { start } else { start.saturating_sub(1) };

        if hunk_start < consumed || hunk_start > source.len() {
            return Err(DiffError::HunkOutOfRange { line: hunk_line });
        }
        out.extend(source[consumed..hunk_start].iter().copied());
        consumed = hunk_start;

        while i < lines.len() && !lines[i].starts_with('@') {
            let mut line = lines[i];
            if lines.get(i + 1).is_some_and(|next| next.starts_with('\\')) {
                line = line.strip_suffix('\n').unwrap_or(line);
                i += 2;
            } else {
                i += 1;
            }

            let Some(marker) = line.chars().next() else {
                continue;
            };
            // Some tools strip the space of empty context lines.
            let (marker, body) = if marker == '\n' || marker == '\r' {
                (' ', line)
            } else {
                (marker, &line[marker.len_utf8()..])
            };
            if marker == kept || marker == ' ' {
                out.push_str(body);
            }
            if marker != kept {
                consumed += 1;
            }
        }
    }

    if consumed > source.len() {
        return Err(DiffError::HunkOutOfRange { line: lines.len() });
    }
    out.extend(source[consumed..].iter().copied());
    Ok(out)
}

/// Apply the diff in `patch` to `input` and write the result to `output`.
///
/// `output` may be the same path as `input`.
pub fn apply_patch_file(
    input: &Path,
    patch: &Path,
    output: &Path,
    direction: Direction,
) -> Result<()> {
    let text = std::fs::read_to_string(input).map_err(|e| CodegenError::io(input, &e))?;
    let diff = std::fs::read_to_string(patch).map_err(|e| CodegenError::io(patch, &e))?;
    let patched = apply_patch(&text, &diff, direction)?;
    std::fs::write(output, patched).map_err(|e| CodegenError::io(output, &e))?;
    debug!(
        input = %input.display(),
        patch = %patch.display(),
        output = %output.display(),
        ?direction,
        "applied diff"
    );
    Ok(())
}

fn hunk_header() -> std::result::Result<Regex, DiffError> {
    Regex::new(r"^@@ -(\d+),?(\d+)? \+(\d+),?(\d+)? @@.*$")
        .map_err(|_| DiffError::MalformedHunk { line: 0 })
}
