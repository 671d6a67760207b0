// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Serialize-side sequence bound.
//!
//! The plugin serializer passes the sequence length together with the
//! default bound of 100 and fails on longer sequences. For unbounded fields
//! the bound is raised to the largest 32-bit length.

use tracing::debug;

use super::anchors::{DEFAULT_BOUND_ARG, GET_LENGTH_CALL, UNLIMITED_BOUND};
use super::{indentation, storage_pattern, tagged, PatchError, PatchRule};
use crate::classify::FieldDescriptor;

/// `(100),` following `<Wire>Seq_get_length(&sample-><storage>),` becomes
/// `(4294967295),`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerializeBoundRule;

impl PatchRule for SerializeBoundRule {
    fn name(&self) -> &'static str {
        "serialize-bound"
    }

    fn apply(
        &self,
        fields: &[FieldDescriptor],
        lines: &mut Vec<String>,
    ) -> Result<bool, PatchError> {
        if fields.is_empty() {
            return Ok(false);
        }
        let pattern = storage_pattern(GET_LENGTH_CALL, fields, "),")?;

        let mut modified = false;
        for i in 1..lines.len() {
            if lines[i].trim() != DEFAULT_BOUND_ARG {
                continue;
            }
            let Some(storage) = pattern
                .captures(&lines[i - 1])
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
            else {
                continue;
            };
            debug!(storage = %storage, "serialize bound lifted");
            lines[i] = tagged(format!("{}({UNLIMITED_BOUND}),", indentation(&lines[i])));
            modified = true;
        }
        Ok(modified)
    }
}
