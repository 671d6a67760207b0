// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # connext-typesupport CLI
//!
//! Generates and patches RTI Connext type support for ROS interfaces.
//!
//! ## Usage
//!
//! ```sh
//! # Generate a whole package
//! connext-typesupport generate --package test_msgs --idl-base build/idl \
//!     --output out --interface msg/Foo.msg build/idl/test_msgs/msg/Foo_.idl
//!
//! # Generate serialized data support, retrying until the header is complete
//! connext-typesupport call-idl-pp --idl-pp rtiddsgen --idl-file Raw.idl -d out
//!
//! # Patch already generated sources
//! connext-typesupport patch plugin out/msg/Foo_Plugin.cxx --interface msg/Foo.msg
//!
//! # Show unbounded fields
//! connext-typesupport classify msg/Foo.msg --json
//!
//! # Apply a unified diff
//! connext-typesupport apply-diff --input a.cxx --patch a.diff --out a.cxx
//! ```

mod cmd;
mod common;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use cmd::{ApplyDiffCmd, CallIdlPpCmd, ClassifyCmd, GenerateCmd, PatchCmd};
use common::{GlobalOptions, Result};

/// connext-typesupport - RTI Connext type support generator
///
/// Runs the vendor IDL compiler and patches its output for unbounded
/// sequences and pre-serialized publishing.
#[derive(Parser, Clone)]
#[command(name = "connext-typesupport")]
#[command(about = "RTI Connext type support generator for ROS interfaces", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Generator configuration file (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Compile and patch every IDL file of a package
    Generate(GenerateCmd),

    /// Compile one IDL file until the plugin header is complete
    CallIdlPp(CallIdlPpCmd),

    /// Patch generated sources in place (message, plugin)
    #[command(subcommand)]
    Patch(PatchCmd),

    /// List the unbounded sequence fields of an interface
    Classify(ClassifyCmd),

    /// Apply a unified diff to files
    ApplyDiff(ApplyDiffCmd),
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    common::init_logging(cli.verbose, cli.quiet);

    let options = GlobalOptions { config: cli.config };
    match cli.command {
        Commands::Generate(cmd) => cmd.run(&options).map(|()| 0),
        Commands::CallIdlPp(cmd) => cmd.run(&options),
        Commands::Patch(cmd) => cmd.run(&options).map(|()| 0),
        Commands::Classify(cmd) => cmd.run().map(|()| 0),
        Commands::ApplyDiff(cmd) => cmd.run().map(|()| 0),
    }
}

fn main() {
    match run() {
        Ok(0) => {}
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}
