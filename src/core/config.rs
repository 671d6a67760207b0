// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Generator configuration.
//!
//! Configuration is read from a TOML file with three tables:
//!
//! ```toml
//! [compiler]
//! path = "/opt/rti/bin/rtiddsgen"
//! namespace = true
//! overwrite = "update-typefiles"
//! unbounded_support = false
//!
//! [retry]
//! marker_attempts = 10
//! file_attempts = 5
//!
//! [patch]
//! fast_path = true
//! ```
//!
//! Every key is optional; missing keys take the defaults shown above.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{CodegenError, Result};

/// How the vendor compiler treats existing output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverwriteMode {
    /// Overwrite every generated file (`-replace`)
    #[default]
    Replace,
    /// Only regenerate type files (`-update typefiles`)
    UpdateTypefiles,
}

impl OverwriteMode {
    /// Command-line flags for this mode.
    pub fn as_args(self) -> &'static [&'static str] {
        match self {
            OverwriteMode::Replace => &["-replace"],
            OverwriteMode::UpdateTypefiles => &["-update", "typefiles"],
        }
    }
}

/// Vendor compiler settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Path to the IDL compiler executable
    pub path: Option<PathBuf>,
    /// Pass `-namespace`
    pub namespace: bool,
    /// Overwrite behavior
    pub overwrite: OverwriteMode,
    /// Pass `-unboundedSupport`
    pub unbounded_support: bool,
    /// Pass `-dllExportMacroSuffix <package>`
    pub dll_export_suffix: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            path: None,
            namespace: true,
            overwrite: OverwriteMode::Replace,
            unbounded_support: false,
            dll_export_suffix: cfg!(windows),
        }
    }
}

/// Retry bounds for the vendor invoker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetryConfig {
    /// Attempts when verifying the linkage marker
    pub marker_attempts: u32,
    /// Attempts when verifying expected output files
    pub file_attempts: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            marker_attempts: 10,
            file_attempts: 5,
        }
    }
}

/// Patcher settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatchConfig {
    /// Inject the raw-buffer serialize fast path
    pub fast_path: bool,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self { fast_path: true }
    }
}

/// Complete generator configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Vendor compiler settings
    pub compiler: CompilerConfig,
    /// Retry bounds
    pub retry: RetryConfig,
    /// Patcher settings
    pub patch: PatchConfig,
}

impl GeneratorConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: GeneratorConfig = toml::from_str(text)
            .map_err(|e| CodegenError::parse("generator config", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| CodegenError::io(path, &e))?;
        tracing::debug!(path = %path.display(), "loaded generator config");
        Self::from_toml_str(&text)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.retry.marker_attempts == 0 {
            return Err(CodegenError::invalid_config(
                "retry.marker_attempts must be at least 1",
            ));
        }
        if self.retry.file_attempts == 0 {
            return Err(CodegenError::invalid_config(
                "retry.file_attempts must be at least 1",
            ));
        }
        Ok(())
    }
}
