// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Generate command - compile and patch a whole package.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;

use crate::common::{load_interface, output_json_or, GlobalOptions, Result};
use connext_typesupport::generate::{Dependency, PackageGenerator, PackageRequest};

/// Compile and patch every IDL file of a package.
#[derive(Args, Clone, Debug)]
pub struct GenerateCmd {
    /// Package name
    #[arg(long)]
    package: String,

    /// Base directory of the package's IDL tree
    #[arg(long, value_name = "DIR")]
    idl_base: PathBuf,

    /// Root of the generated tree
    #[arg(short, long, value_name = "DIR")]
    output: PathBuf,

    /// Dependency IDL file as <package>:<path> (repeatable)
    #[arg(long = "dep", value_name = "PKG:PATH")]
    deps: Vec<String>,

    /// ROS interface file (.msg or .srv) matching an IDL file (repeatable)
    #[arg(long = "interface", value_name = "FILE")]
    interfaces: Vec<PathBuf>,

    /// IDL compiler executable (overrides the config file)
    #[arg(long, value_name = "PATH")]
    idl_pp: Option<PathBuf>,

    /// Pass -unboundedSupport to the compiler
    #[arg(long)]
    unbounded_support: bool,

    /// Do not inject the raw buffer serialize fast path
    #[arg(long)]
    no_fast_path: bool,

    /// Output the generation report as JSON
    #[arg(short, long)]
    json: bool,

    /// IDL files to compile
    #[arg(value_name = "IDL", required = true)]
    idl_files: Vec<PathBuf>,
}

impl GenerateCmd {
    pub fn run(self, options: &GlobalOptions) -> Result<()> {
        let mut config = options.load_config()?;
        if let Some(path) = self.idl_pp {
            config.compiler.path = Some(path);
        }
        if self.unbounded_support {
            config.compiler.unbounded_support = true;
        }
        if self.no_fast_path {
            config.patch.fast_path = false;
        }

        let dependencies = self
            .deps
            .iter()
            .map(|dep| Dependency::parse(dep))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let interfaces = self
            .interfaces
            .iter()
            .map(|path| load_interface(&self.package, path))
            .collect::<Result<Vec<_>>>()?;

        let request = PackageRequest {
            package: self.package,
            idl_files: self.idl_files,
            idl_base_dir: self.idl_base,
            dependencies,
            output_base: self.output,
            interfaces,
        };
        let report = PackageGenerator::new(config)
            .generate(&request)
            .with_context(|| format!("generating package {}", request.package))?;

        output_json_or(self.json, &report, || {
            for file in &report.files {
                println!(
                    "{} -> {} ({} attempt(s))",
                    file.idl_file.display(),
                    file.output_dir.display(),
                    file.attempts
                );
                for patch in file.patches.iter().filter(|p| p.modified()) {
                    println!(
                        "  patched {}: {}",
                        patch.path.display(),
                        patch.rules_applied.join(", ")
                    );
                }
            }
        })
    }
}
