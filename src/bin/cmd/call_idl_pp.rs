// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! call-idl-pp command - compile one IDL file until its plugin header is
//! complete.

use std::path::PathBuf;

use clap::Args;

use crate::common::{GlobalOptions, Result};
use connext_typesupport::vendor::{
    CompilerCommand, LinkageMarker, RetryPolicy, VendorError, VendorInvoker,
};

/// Message printed when every attempt produced an incomplete header.
const EXHAUSTED_MESSAGE: &str = "Could not successfully generate Connext serialized data";

/// Compile one IDL file with `-unboundedSupport`, retrying until
/// `<stem>Plugin.h` contains its `extern "C" {` block.
#[derive(Args, Clone, Debug)]
pub struct CallIdlPpCmd {
    /// IDL compiler executable
    #[arg(long = "idl-pp", value_name = "PATH")]
    idl_pp: PathBuf,

    /// IDL file to compile
    #[arg(long = "idl-file", value_name = "FILE")]
    idl_file: PathBuf,

    /// Output directory, recreated on every attempt
    #[arg(short = 'd', value_name = "DIR")]
    output_dir: PathBuf,

    /// Maximum attempts (defaults to retry.marker_attempts)
    #[arg(long = "max-tries", value_name = "N")]
    max_tries: Option<u32>,
}

impl CallIdlPpCmd {
    /// Returns the process exit code.
    pub fn run(self, options: &GlobalOptions) -> Result<i32> {
        let config = options.load_config()?;
        let max_tries = self.max_tries.unwrap_or(config.retry.marker_attempts);

        let command =
            CompilerCommand::new(self.idl_pp, self.idl_file, self.output_dir).unbounded_support(true);
        let invoker = VendorInvoker::process(RetryPolicy::new(max_tries));

        match invoker.invoke(&command, &LinkageMarker) {
            Ok(invocation) => {
                tracing::debug!(attempts = invocation.attempts, "serialized data support generated");
                Ok(0)
            }
            Err(VendorError::RetriesExhausted { .. }) => {
                eprintln!("{EXHAUSTED_MESSAGE}");
                Ok(1)
            }
            Err(e) => Err(e.into()),
        }
    }
}
