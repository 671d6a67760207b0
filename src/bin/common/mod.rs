// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Serialize;

use connext_typesupport::schema::{parse_interface_file, InterfaceDefinition};
use connext_typesupport::GeneratorConfig;

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Configuration file given with `--config`
    pub config: Option<PathBuf>,
}

impl GlobalOptions {
    /// Load the configuration file, or defaults when none was given.
    pub fn load_config(&self) -> Result<GeneratorConfig> {
        match &self.config {
            Some(path) => GeneratorConfig::load(path)
                .with_context(|| format!("loading config {}", path.display())),
            None => Ok(GeneratorConfig::default()),
        }
    }
}

/// Install the stderr log subscriber.
pub fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else if quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Parse an interface file of `package`.
pub fn load_interface(package: &str, path: &Path) -> Result<InterfaceDefinition> {
    parse_interface_file(package, path).with_context(|| format!("parsing {}", path.display()))
}

/// Print `value` as JSON, or run the human-readable printer.
pub fn output_json_or<T>(json: bool, value: &T, human_fn: impl FnOnce()) -> Result<()>
where
    T: Serialize,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human_fn();
    }
    Ok(())
}

/// Package name from `<package>/msg/<File>` style paths: the grandparent
/// directory of an interface file.
pub fn package_from_path(path: &Path) -> Option<String> {
    path.parent()?
        .parent()?
        .file_name()?
        .to_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_from_path() {
        assert_eq!(
            package_from_path(Path::new("/ws/src/test_msgs/msg/Foo.msg")),
            Some("test_msgs".to_string())
        );
        assert_eq!(package_from_path(Path::new("Foo.msg")), None);
    }

    #[test]
    fn test_default_config_without_file() {
        let config = GlobalOptions::default().load_config().unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }
}
