// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! apply-diff command - apply unified diffs to files.

use std::path::PathBuf;

use anyhow::{bail, Context as _};
use clap::Args;

use crate::common::Result;
use connext_typesupport::diff::{apply_patch_file, Direction};

/// Apply unified diffs. The i-th diff is applied to the i-th input and
/// written to the i-th output.
#[derive(Args, Clone, Debug)]
pub struct ApplyDiffCmd {
    /// Input files
    #[arg(long, num_args = 1.., required = true, value_name = "FILE")]
    input: Vec<PathBuf>,

    /// Diff files
    #[arg(long, num_args = 1.., required = true, value_name = "DIFF")]
    patch: Vec<PathBuf>,

    /// Output files (may equal the inputs)
    #[arg(long, num_args = 1.., required = true, value_name = "FILE")]
    out: Vec<PathBuf>,

    /// Undo the diffs instead of applying them
    #[arg(long)]
    revert: bool,
}

impl ApplyDiffCmd {
    pub fn run(self) -> Result<()> {
        if self.input.len() != self.patch.len() || self.input.len() != self.out.len() {
            bail!(
                "--input, --patch and --out need the same number of files ({}, {}, {})",
                self.input.len(),
                self.patch.len(),
                self.out.len()
            );
        }
        let direction = if self.revert {
            Direction::Reverse
        } else {
            Direction::Forward
        };

        for ((input, patch), out) in self.input.iter().zip(&self.patch).zip(&self.out) {
            apply_patch_file(input, patch, out, direction).with_context(|| {
                format!(
                    "applying {} to {} -> {}",
                    patch.display(),
                    input.display(),
                    out.display()
                )
            })?;
        }
        Ok(())
    }
}
