// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Capacity growth before sequence deserialization.
//!
//! The vendor deserializer refuses sequences longer than their current
//! maximum. Before each unbounded sequence is read, the patched code peeks
//! at the incoming length and raises the maximum to match.

use tracing::debug;

use super::anchors::{
    DEFAULT_STRING_BOUND, GET_CONTIGUOUS_BUFFER_CALL, SEQUENCE_LENGTH_DECL, SEQUENCE_LENGTH_VAR,
};
use super::stream::{init_string_buffers, peek_length_prefix, set_maximum};
use super::{indentation, storage_pattern, tagged, PatchError, PatchRule};
use crate::classify::{lookup, FieldDescriptor};

/// Inserts a peek-and-grow block between `RTICdrUnsignedLong sequence_length;`
/// and the `<Wire>Seq_get_contiguous_bufferI(&sample-><storage>)` line that
/// follows it.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrowOnDeserializeRule;

impl GrowOnDeserializeRule {
    /// Statements inserted for one field, without indentation.
    pub fn growth_block(field: &FieldDescriptor) -> Vec<String> {
        let storage = field.storage_name();
        let mut block: Vec<String> = peek_length_prefix(SEQUENCE_LENGTH_VAR).into();
        block.push(set_maximum(
            field.wire_type().as_str(),
            &storage,
            SEQUENCE_LENGTH_VAR,
        ));
        if field.is_string_sequence() {
            block.extend(init_string_buffers(
                &storage,
                SEQUENCE_LENGTH_VAR,
                DEFAULT_STRING_BOUND,
            ));
        }
        block
    }
}

impl PatchRule for GrowOnDeserializeRule {
    fn name(&self) -> &'static str {
        "grow-on-deserialize"
    }

    fn apply(
        &self,
        fields: &[FieldDescriptor],
        lines: &mut Vec<String>,
    ) -> Result<bool, PatchError> {
        if fields.is_empty() {
            return Ok(false);
        }
        let pattern = storage_pattern(GET_CONTIGUOUS_BUFFER_CALL, fields, ")")?;

        let mut modified = false;
        let mut i = 1;
        while i < lines.len() {
            if !lines[i - 1].contains(SEQUENCE_LENGTH_DECL) {
                i += 1;
                continue;
            }
            let Some(storage) = pattern
                .captures(&lines[i])
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
            else {
                i += 1;
                continue;
            };

            let field = lookup(fields, &storage)?;
            let indent = indentation(&lines[i]).to_string();
            let block: Vec<String> = Self::growth_block(field)
                .into_iter()
                .map(|stmt| tagged(format!("{indent}{stmt}")))
                .collect();
            let inserted = block.len();
            lines.splice(i..i, block);
            debug!(field = %field.name, "growth block inserted");

            // Skip the block and the anchor line it precedes.
            i += inserted + 1;
            modified = true;
        }
        Ok(modified)
    }
}
