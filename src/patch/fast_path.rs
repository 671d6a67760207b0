// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Raw buffer fast path in the plugin serializer.
//!
//! The serialize entry point is changed to receive a
//! `ConnextStaticMessageHandle` instead of the typed sample. When the handle
//! carries an already serialized buffer, it is copied straight into the CDR
//! stream and the field-by-field serialization is skipped. Otherwise the
//! typed sample is taken from the handle and the vendor code runs as before.

use regex::Regex;
use tracing::debug;

use super::anchors::{
    MESSAGE_HANDLE_HEADER, MESSAGE_HANDLE_TYPE, PATCH_TAG, RENAMED_SAMPLE_PARAM, SAMPLE_PARAM,
    SERIALIZE_ENTRY_SUFFIX, STREAM_PARAM,
};
use super::{indentation, tagged, PatchError, PatchRule};
use crate::classify::FieldDescriptor;

/// Local variable holding the cast handle.
const HANDLE_VAR: &str = "message_handle";

/// Injects the fast path into `<Msg>Plugin_serialize`.
///
/// The serialize signature is mandatory: if it is missing the rule fails
/// with [`PatchError::AnchorNotFound`].
#[derive(Debug, Clone)]
pub struct FastPathRule {
    message_name: String,
}

impl FastPathRule {
    /// Create a rule for `<message_name>Plugin_serialize`.
    pub fn new(message_name: impl Into<String>) -> Self {
        Self {
            message_name: message_name.into(),
        }
    }

    /// Signature prefix this rule looks for.
    pub fn signature(&self) -> String {
        format!("{}{}", self.message_name, SERIALIZE_ENTRY_SUFFIX)
    }

    fn sample_param_pattern() -> Result<Regex, PatchError> {
        let pattern = format!(
            r"\bconst\s+([A-Za-z_][A-Za-z0-9_:]*)\s*\*\s*({})\b",
            regex::escape(SAMPLE_PARAM)
        );
        Regex::new(&pattern).map_err(|e| PatchError::Pattern(e.to_string()))
    }

    /// Statements inserted after the opening brace, without indentation.
    fn fast_path_block(sample_type: &str) -> Vec<String> {
        let len = format!("*{HANDLE_VAR}->raw_message_length");
        vec![
            format!("const {MESSAGE_HANDLE_TYPE} * {HANDLE_VAR} ="),
            format!("    reinterpret_cast<const {MESSAGE_HANDLE_TYPE} *>({RENAMED_SAMPLE_PARAM});"),
            format!("if ({HANDLE_VAR}->raw_message) {{"),
            format!("    memcpy({STREAM_PARAM}->_buffer, {HANDLE_VAR}->raw_message, {len});"),
            format!("    {STREAM_PARAM}->_relativeBuffer = {STREAM_PARAM}->_buffer;"),
            format!("    {STREAM_PARAM}->_tmpRelativeBuffer = {STREAM_PARAM}->_buffer;"),
            format!("    {STREAM_PARAM}->_currentPosition = {STREAM_PARAM}->_buffer + {len};"),
            "    return RTI_TRUE;".to_string(),
            "}".to_string(),
            format!(
                "const {sample_type} * {SAMPLE_PARAM} = reinterpret_cast<const {sample_type} *>({HANDLE_VAR}->untyped_dds_message);"
            ),
        ]
    }
}

impl PatchRule for FastPathRule {
    fn name(&self) -> &'static str {
        "fast-path"
    }

    fn apply(
        &self,
        _fields: &[FieldDescriptor],
        lines: &mut Vec<String>,
    ) -> Result<bool, PatchError> {
        let signature = self.signature();
        let sig_at = lines
            .iter()
            .position(|l| l.starts_with(&signature))
            .ok_or_else(|| PatchError::anchor_not_found(&signature))?;
        let (brace_at, brace_col) = (sig_at..lines.len())
            .find_map(|i| lines[i].find('{').map(|col| (i, col)))
            .ok_or_else(|| PatchError::anchor_not_found(format!("{{ after {signature}")))?;

        let already_injected = lines
            .get(brace_at + 1)
            .is_some_and(|l| l.contains(MESSAGE_HANDLE_TYPE));
        if already_injected {
            return Ok(false);
        }

        let pattern = Self::sample_param_pattern()?;
        let (param_at, sample_type, renamed) = (sig_at..=brace_at)
            .rev()
            .find_map(|i| {
                // Only the parameter list counts on the brace line.
                let searched = if i == brace_at {
                    &lines[i][..brace_col]
                } else {
                    lines[i].as_str()
                };
                let caps = pattern.captures(searched)?;
                let sample_type = caps.get(1)?.as_str().to_string();
                let param = caps.get(2)?;
                let renamed = format!(
                    "{}{}{}",
                    &lines[i][..param.start()],
                    RENAMED_SAMPLE_PARAM,
                    &lines[i][param.end()..]
                );
                Some((i, sample_type, renamed))
            })
            .ok_or_else(|| {
                PatchError::anchor_not_found(format!("const <T> *{SAMPLE_PARAM} in {signature}"))
            })?;
        lines[param_at] = tagged(renamed);

        let body_indent = format!("{}    ", indentation(&lines[sig_at]));
        let brace_col = if param_at == brace_at {
            brace_col + RENAMED_SAMPLE_PARAM.len() - SAMPLE_PARAM.len()
        } else {
            brace_col
        };
        let mut block: Vec<String> = Self::fast_path_block(&sample_type)
            .into_iter()
            .map(|stmt| tagged(format!("{body_indent}{stmt}")))
            .collect();

        // Code after the brace on the same line moves below the block.
        let brace_line = lines[brace_at].clone();
        let (head, tail) = brace_line.split_at(brace_col + 1);
        let tail = tail.trim().trim_end_matches(PATCH_TAG).trim_end();
        if !tail.is_empty() {
            lines[brace_at] = tagged(head.trim_end());
            block.push(format!("{body_indent}{tail}"));
        }
        lines.splice(brace_at + 1..brace_at + 1, block);

        if !lines.iter().any(|l| l.starts_with(MESSAGE_HANDLE_HEADER)) {
            let include_at = lines[..sig_at]
                .iter()
                .rposition(|l| l.trim_start().starts_with("#include"))
                .map_or(0, |i| i + 1);
            lines.insert(include_at, tagged(MESSAGE_HANDLE_HEADER));
        }

        debug!(message = %self.message_name, sample_type = %sample_type, "fast path injected");
        Ok(true)
    }
}
