// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Capacity reset before sample finalization.

use tracing::debug;

use super::anchors::FINALIZE_OPTIONAL_MEMBERS_CALL;
use super::stream::set_maximum;
use super::{indentation, reset_capacity, tagged, PatchError, PatchRule};
use crate::classify::FieldDescriptor;

/// Resets every unbounded sequence to its initial capacity right before the
/// first `__finalize_optional_members(sample, RTI_TRUE);` call.
///
/// One statement per field, in declaration order. A file without the call
/// is left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct FinalizeResetRule;

impl PatchRule for FinalizeResetRule {
    fn name(&self) -> &'static str {
        "finalize-reset"
    }

    fn apply(
        &self,
        fields: &[FieldDescriptor],
        lines: &mut Vec<String>,
    ) -> Result<bool, PatchError> {
        if fields.is_empty() {
            return Ok(false);
        }
        let Some(at) = lines
            .iter()
            .position(|l| l.contains(FINALIZE_OPTIONAL_MEMBERS_CALL))
        else {
            return Ok(false);
        };

        let indent = indentation(&lines[at]).to_string();
        let block: Vec<String> = fields
            .iter()
            .map(|field| {
                let capacity = reset_capacity(field).to_string();
                let stmt = set_maximum(field.wire_type().as_str(), &field.storage_name(), &capacity);
                tagged(format!("{indent}{stmt}"))
            })
            .collect();

        if at >= block.len() && lines[at - block.len()..at] == block[..] {
            return Ok(false);
        }

        debug!(resets = block.len(), "finalize resets inserted");
        lines.splice(at..at, block);
        Ok(true)
    }
}
