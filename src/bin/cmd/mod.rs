// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod apply_diff;
mod call_idl_pp;
mod classify;
mod generate;
mod patch;

pub use apply_diff::ApplyDiffCmd;
pub use call_idl_pp::CallIdlPpCmd;
pub use classify::ClassifyCmd;
pub use generate::GenerateCmd;
pub use patch::PatchCmd;
