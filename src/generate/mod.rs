// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Package-level type support generation.
//!
//! For every IDL file of a package the [`PackageGenerator`]:
//!
//! 1. derives the output directory from the IDL file location,
//! 2. runs the vendor compiler into a private staging directory until all
//!    expected files exist,
//! 3. moves the generated files into the output directory,
//! 4. classifies the fields of the matching interface, and
//! 5. patches the message and plugin sources.
//!
//! The staging directory keeps the retry loop's teardown away from files
//! already generated for other IDL files in the same output directory.

pub mod paths;

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{error, info, warn};

use crate::classify::{classify, FieldDescriptor};
use crate::core::{CodegenError, GeneratorConfig, Result};
use crate::patch::{FilePatch, PatchSet};
use crate::schema::{InterfaceDefinition, MessageSpec};
use crate::vendor::{
    CompilerCommand, CompilerRunner, ExpectedFiles, ProcessRunner, RetryPolicy, VendorInvoker,
};

pub use paths::{
    include_dirs, interface_name_for, output_dir_for, staging_dir_for, Dependency,
};

/// Inputs describing one package.
#[derive(Debug, Clone, Default)]
pub struct PackageRequest {
    /// Package name
    pub package: String,
    /// IDL files to compile
    pub idl_files: Vec<PathBuf>,
    /// Base directory of the package's own IDL files, always included first
    pub idl_base_dir: PathBuf,
    /// Dependencies as `<package>:<idl path>`
    pub dependencies: Vec<Dependency>,
    /// Root of the generated tree
    pub output_base: PathBuf,
    /// Parsed interfaces of the package
    pub interfaces: Vec<InterfaceDefinition>,
}

impl PackageRequest {
    /// Find the interface message generated into `<stem>.idl`.
    pub fn message_for_stem(&self, stem: &str) -> Option<&MessageSpec> {
        let name = interface_name_for(stem);
        self.interfaces
            .iter()
            .flat_map(|def| def.messages())
            .find(|spec| spec.name == name)
    }
}

/// Result of generating one IDL file.
#[derive(Debug, Clone, Serialize)]
pub struct IdlReport {
    /// IDL file compiled
    pub idl_file: PathBuf,
    /// Directory holding the generated files
    pub output_dir: PathBuf,
    /// Compiler attempts needed
    pub attempts: u32,
    /// Unbounded sequence fields found
    pub unbounded_fields: Vec<FieldDescriptor>,
    /// Patched files and the rules that fired on each
    pub patches: Vec<FilePatch>,
}

/// Result of generating a package.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationReport {
    /// Package name
    pub package: String,
    /// One entry per IDL file, in input order
    pub files: Vec<IdlReport>,
}

impl GenerationReport {
    /// Total compiler attempts across all files.
    pub fn total_attempts(&self) -> u32 {
        self.files.iter().map(|f| f.attempts).sum()
    }

    /// Number of files rewritten by patch rules.
    pub fn patched_file_count(&self) -> usize {
        self.files
            .iter()
            .flat_map(|f| &f.patches)
            .filter(|p| p.modified())
            .count()
    }
}

/// Generates Connext type support for a package.
pub struct PackageGenerator<R = ProcessRunner> {
    config: GeneratorConfig,
    invoker: VendorInvoker<R>,
}

impl PackageGenerator<ProcessRunner> {
    /// Generator running the vendor compiler as a child process.
    pub fn new(config: GeneratorConfig) -> Self {
        let policy = RetryPolicy::new(config.retry.file_attempts);
        Self {
            invoker: VendorInvoker::process(policy),
            config,
        }
    }
}

impl<R: CompilerRunner> PackageGenerator<R> {
    /// Generator with a custom compiler runner.
    pub fn with_runner(config: GeneratorConfig, runner: R) -> Self {
        let policy = RetryPolicy::new(config.retry.file_attempts);
        Self {
            invoker: VendorInvoker::new(runner, policy),
            config,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate every IDL file of the package, stopping at the first error.
    pub fn generate(&self, request: &PackageRequest) -> Result<GenerationReport> {
        let include = include_dirs(&request.idl_base_dir, &request.dependencies);
        let mut report = GenerationReport {
            package: request.package.clone(),
            files: Vec::with_capacity(request.idl_files.len()),
        };

        for idl_file in &request.idl_files {
            let file_report = self
                .generate_file(request, &include, idl_file)
                .inspect_err(|e| {
                    error!(idl = %idl_file.display(), fields = ?e.log_fields(), "{e}");
                })?;
            report.files.push(file_report);
        }

        info!(
            package = %report.package,
            files = report.files.len(),
            patched = report.patched_file_count(),
            "generated type support"
        );
        Ok(report)
    }

    fn generate_file(
        &self,
        request: &PackageRequest,
        include: &[PathBuf],
        idl_file: &Path,
    ) -> Result<IdlReport> {
        if !idl_file.is_file() {
            return Err(CodegenError::Io {
                path: idl_file.display().to_string(),
                message: "IDL file not found".to_string(),
            });
        }
        let stem = idl_file
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| CodegenError::parse(idl_file.display().to_string(), "invalid file name"))?;

        let output_dir = output_dir_for(&request.output_base, idl_file);
        std::fs::create_dir_all(&output_dir).map_err(|e| CodegenError::io(&output_dir, &e))?;
        let staging = staging_dir_for(&output_dir, stem);

        let command = CompilerCommand::from_config(
            &self.config.compiler,
            &request.package,
            idl_file,
            &staging,
        )
        .include_dirs(include.iter().cloned());
        let invocation = self.invoker.invoke(&command, &ExpectedFiles)?;
        publish_staged(&staging, &output_dir)?;

        let unbounded_fields = match request.message_for_stem(stem) {
            Some(spec) => classify(&spec.package, &spec.fields)?,
            None => {
                warn!(idl = %idl_file.display(), "no interface definition for IDL file");
                Vec::new()
            }
        };

        let message_source = output_dir.join(format!("{stem}.cxx"));
        let plugin_source = output_dir.join(format!("{stem}Plugin.cxx"));
        let patches = vec![
            PatchSet::message_source().patch_file(&message_source, &unbounded_fields)?,
            PatchSet::plugin_source(stem, self.config.patch.fast_path)
                .patch_file(&plugin_source, &unbounded_fields)?,
        ];

        Ok(IdlReport {
            idl_file: idl_file.to_path_buf(),
            output_dir,
            attempts: invocation.attempts,
            unbounded_fields,
            patches,
        })
    }
}

/// Move every file from `staging` into `output_dir` and remove `staging`.
///
/// Existing files of the same name are replaced.
fn publish_staged(staging: &Path, output_dir: &Path) -> Result<()> {
    let entries = std::fs::read_dir(staging).map_err(|e| CodegenError::io(staging, &e))?;
    for entry in entries {
        let entry = entry.map_err(|e| CodegenError::io(staging, &e))?;
        let target = output_dir.join(entry.file_name());
        if target.is_file() {
            std::fs::remove_file(&target).map_err(|e| CodegenError::io(&target, &e))?;
        }
        std::fs::rename(entry.path(), &target).map_err(|e| CodegenError::io(&target, &e))?;
    }
    std::fs::remove_dir_all(staging).map_err(|e| CodegenError::io(staging, &e))
}
