// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Generated source patching.
//!
//! Vendor-generated C++ is rewritten by anchor-based rules operating on
//! lines of text. There is no C++ parser: each rule looks for a literal
//! fragment (see [`anchors`]) and edits or inserts lines next to it. Every
//! line a rule writes is tagged with [`anchors::PATCH_TAG`].
//!
//! Rules are grouped in a [`PatchSet`], which applies them in order to an
//! in-memory copy of the file and writes it back only when every rule
//! succeeded and at least one changed something.
//!
//! # Example
//!
//! ```
//! use connext_typesupport::classify::classify;
//! use connext_typesupport::patch::{GeneratedSource, PatchSet};
//! use connext_typesupport::schema::msg_parser;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let spec = msg_parser::parse("test_msgs", "Values", "int32[] values")?;
//! let fields = classify(&spec.package, &spec.fields)?;
//!
//! let mut source = GeneratedSource::parse(
//!     "    DDS_LongSeq_set_maximum(&sample->values_ , (100))",
//! );
//! let outcome = PatchSet::message_source().apply(&fields, &mut source)?;
//! assert!(outcome.modified());
//! assert!(source.to_text().contains("(0))"));
//! # Ok(())
//! # }
//! ```

pub mod anchors;
pub mod deserialize_growth;
pub mod fast_path;
pub mod finalize_reset;
pub mod sequence_bound;
pub mod serialize_bound;
pub mod stream;

use std::fmt;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::classify::{ClassifyError, FieldDescriptor};
use crate::core::{CodegenError, Result};

pub use deserialize_growth::GrowOnDeserializeRule;
pub use fast_path::FastPathRule;
pub use finalize_reset::FinalizeResetRule;
pub use sequence_bound::{InitStringArrayRule, SetMaximumRule};
pub use serialize_bound::SerializeBoundRule;

/// Errors raised by patch rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    /// A mandatory anchor was not found
    #[error("anchor '{anchor}' not found")]
    AnchorNotFound {
        /// Anchor text that was searched for
        anchor: String,
    },

    /// A matched storage name has no descriptor
    #[error(transparent)]
    Lookup(#[from] ClassifyError),

    /// An anchor pattern failed to compile
    #[error("invalid anchor pattern: {0}")]
    Pattern(String),
}

impl PatchError {
    /// Create an "anchor not found" error.
    pub fn anchor_not_found(anchor: impl Into<String>) -> Self {
        PatchError::AnchorNotFound {
            anchor: anchor.into(),
        }
    }

    /// Convert into the crate error, naming the file being patched.
    pub fn in_file(self, file: impl AsRef<Path>) -> CodegenError {
        match self {
            PatchError::AnchorNotFound { anchor } => {
                CodegenError::anchor_not_found(file.as_ref().display().to_string(), anchor)
            }
            other => other.into(),
        }
    }
}

impl From<PatchError> for CodegenError {
    fn from(err: PatchError) -> Self {
        match err {
            PatchError::AnchorNotFound { anchor } => {
                CodegenError::anchor_not_found("<memory>", anchor)
            }
            PatchError::Lookup(err) => err.into(),
            PatchError::Pattern(msg) => CodegenError::Other(msg),
        }
    }
}

/// Lines of one vendor-generated file.
///
/// The text is split on `\n`. When every line ends in `\r\n` the `\r` is
/// dropped from each line and put back on output, so rules only ever see
/// bare lines. A file that no rule touches is reproduced byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSource {
    lines: Vec<String>,
    crlf: bool,
}

impl GeneratedSource {
    /// Split text into lines.
    pub fn parse(text: &str) -> Self {
        let crlf = uses_crlf(text);
        let lines = text
            .split('\n')
            .map(|line| {
                let line = if crlf {
                    line.strip_suffix('\r').unwrap_or(line)
                } else {
                    line
                };
                line.to_string()
            })
            .collect();
        Self { lines, crlf }
    }

    /// Check if the file uses `\r\n` line endings.
    pub fn is_crlf(&self) -> bool {
        self.crlf
    }

    /// Read a file fully.
    pub fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| CodegenError::io(path, &e))?;
        Ok(Self::parse(&text))
    }

    /// Write the lines back to a file.
    pub fn write(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_text()).map_err(|e| CodegenError::io(path, &e))
    }

    /// Current lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Join the lines back into text with the original line ending.
    pub fn to_text(&self) -> String {
        self.lines.join(if self.crlf { "\r\n" } else { "\n" })
    }
}

/// Every `\n` in `text` is preceded by `\r`, and there is at least one.
fn uses_crlf(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut newlines = text.match_indices('\n').map(|(i, _)| i).peekable();
    newlines.peek().is_some() && newlines.all(|i| i > 0 && bytes[i - 1] == b'\r')
}

/// A text-transformation rule over generated source lines.
///
/// `fields` holds the unbounded sequence fields of the message the file was
/// generated for. A rule returns `Ok(true)` if it changed `lines` and
/// `Ok(false)` if its anchor was absent or the edit is already present.
pub trait PatchRule: Send + Sync {
    /// Short rule name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Apply the rule in place.
    fn apply(
        &self,
        fields: &[FieldDescriptor],
        lines: &mut Vec<String>,
    ) -> std::result::Result<bool, PatchError>;
}

/// Rules that changed a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatchOutcome {
    /// Names of the rules that modified the source, in application order
    pub rules_applied: Vec<&'static str>,
}

impl PatchOutcome {
    /// Check if any rule changed the source.
    pub fn modified(&self) -> bool {
        !self.rules_applied.is_empty()
    }
}

/// Result of patching one file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilePatch {
    /// Patched file
    pub path: PathBuf,
    /// Names of the rules that modified it
    pub rules_applied: Vec<&'static str>,
}

impl FilePatch {
    /// Check if the file was rewritten.
    pub fn modified(&self) -> bool {
        !self.rules_applied.is_empty()
    }
}

/// Ordered group of patch rules for one kind of generated file.
pub struct PatchSet {
    rules: Vec<Box<dyn PatchRule>>,
}

impl fmt::Debug for PatchSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatchSet")
            .field("rules", &self.rule_names())
            .finish()
    }
}

impl Default for PatchSet {
    fn default() -> Self {
        Self::new()
    }
}

impl PatchSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Rules for the message source (`<Msg>.cxx`).
    pub fn message_source() -> Self {
        let mut set = Self::new();
        set.add_rule(Box::new(SetMaximumRule));
        set.add_rule(Box::new(InitStringArrayRule));
        set
    }

    /// Rules for the plugin source (`<Msg>Plugin.cxx`).
    ///
    /// The fast path is injected last, into `<message_name>Plugin_serialize`.
    pub fn plugin_source(message_name: &str, fast_path: bool) -> Self {
        let mut set = Self::new();
        set.add_rule(Box::new(SerializeBoundRule));
        set.add_rule(Box::new(GrowOnDeserializeRule));
        set.add_rule(Box::new(FinalizeResetRule));
        if fast_path {
            set.add_rule(Box::new(FastPathRule::new(message_name)));
        }
        set
    }

    /// Append a rule. Rules run in insertion order.
    pub fn add_rule(&mut self, rule: Box<dyn PatchRule>) {
        self.rules.push(rule);
    }

    /// Names of the rules in order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule to `source`.
    ///
    /// Rules run on a working copy; `source` is replaced only when all of
    /// them succeed. On error `source` is left as it was.
    pub fn apply(
        &self,
        fields: &[FieldDescriptor],
        source: &mut GeneratedSource,
    ) -> std::result::Result<PatchOutcome, PatchError> {
        let mut working = source.lines.clone();
        let mut outcome = PatchOutcome::default();

        for rule in &self.rules {
            if rule.apply(fields, &mut working)? {
                debug!(rule = rule.name(), "rule applied");
                outcome.rules_applied.push(rule.name());
            }
        }

        if outcome.modified() {
            source.lines = working;
        }
        Ok(outcome)
    }

    /// Patch a file on disk, rewriting it only if some rule fired.
    pub fn patch_file(&self, path: &Path, fields: &[FieldDescriptor]) -> Result<FilePatch> {
        let mut source = GeneratedSource::read(path)?;
        let outcome = self
            .apply(fields, &mut source)
            .map_err(|e| e.in_file(path))?;

        if outcome.modified() {
            source.write(path)?;
            info!(
                file = %path.display(),
                rules = ?outcome.rules_applied,
                "patched generated source"
            );
        } else {
            debug!(file = %path.display(), "no anchors matched");
        }

        Ok(FilePatch {
            path: path.to_path_buf(),
            rules_applied: outcome.rules_applied,
        })
    }
}

/// Append the patch tag to a line.
pub(crate) fn tagged(line: impl fmt::Display) -> String {
    format!("{line}  {}", anchors::PATCH_TAG)
}

/// Leading whitespace of a line.
pub(crate) fn indentation(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// Capacity an unbounded sequence starts from.
///
/// String sequences keep one slot so the vendor allocates a string buffer.
pub(crate) fn reset_capacity(field: &FieldDescriptor) -> u32 {
    if field.is_string_sequence() {
        1
    } else {
        0
    }
}

/// Compile `<prefix>(<storage names>)<suffix>` with literal prefix and suffix.
pub(crate) fn storage_pattern(
    prefix: &str,
    fields: &[FieldDescriptor],
    suffix: &str,
) -> std::result::Result<Regex, PatchError> {
    let names: Vec<String> = fields
        .iter()
        .map(|f| regex::escape(&f.storage_name()))
        .collect();
    let pattern = format!(
        "{}({}){}",
        regex::escape(prefix),
        names.join("|"),
        regex::escape(suffix)
    );
    Regex::new(&pattern).map_err(|e| PatchError::Pattern(e.to_string()))
}
