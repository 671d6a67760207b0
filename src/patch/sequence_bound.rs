// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Initial capacity rewrites in the message source.
//!
//! The vendor initializes every sequence with a default capacity of 100
//! elements. Unbounded sequences instead start empty and grow on demand.

use tracing::debug;

use super::anchors::{
    DEFAULT_BOUND_ARG, INIT_STRING_ARRAY_OPEN, SET_MAXIMUM_CALL, SET_MAXIMUM_DEFAULT_TAIL,
};
use super::{indentation, reset_capacity, storage_pattern, tagged, PatchError, PatchRule};
use crate::classify::{lookup, FieldDescriptor};

/// `<Wire>Seq_set_maximum(&sample-><storage> , (100))` becomes `(0)`, or
/// `(1)` for string sequences.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetMaximumRule;

impl PatchRule for SetMaximumRule {
    fn name(&self) -> &'static str {
        "set-maximum"
    }

    fn apply(
        &self,
        fields: &[FieldDescriptor],
        lines: &mut Vec<String>,
    ) -> Result<bool, PatchError> {
        if fields.is_empty() {
            return Ok(false);
        }
        let pattern = storage_pattern(SET_MAXIMUM_CALL, fields, SET_MAXIMUM_DEFAULT_TAIL)?;

        let mut modified = false;
        for line in lines.iter_mut() {
            let Some(caps) = pattern.captures(line.as_str()) else {
                continue;
            };
            let (Some(whole), Some(storage)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let field = lookup(fields, storage.as_str())?;
            let capacity = reset_capacity(field);
            let rewritten = format!(
                "{}{}{} , ({capacity})){}",
                &line[..whole.start()],
                SET_MAXIMUM_CALL,
                storage.as_str(),
                &line[whole.end()..]
            );
            debug!(field = %field.name, capacity, "initial capacity rewritten");
            *line = tagged(rewritten);
            modified = true;
        }
        Ok(modified)
    }
}

/// The default `(100),` argument of a string buffer array initialization
/// becomes `(1),`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InitStringArrayRule;

impl PatchRule for InitStringArrayRule {
    fn name(&self) -> &'static str {
        "init-string-array"
    }

    fn apply(
        &self,
        fields: &[FieldDescriptor],
        lines: &mut Vec<String>,
    ) -> Result<bool, PatchError> {
        if fields.is_empty() {
            return Ok(false);
        }

        let mut modified = false;
        for i in 1..lines.len() {
            if lines[i - 1].trim() != INIT_STRING_ARRAY_OPEN || lines[i].trim() != DEFAULT_BOUND_ARG
            {
                continue;
            }
            lines[i] = tagged(format!("{}(1),", indentation(&lines[i])));
            modified = true;
        }
        Ok(modified)
    }
}
