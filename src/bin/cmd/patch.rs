// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Patch command - rewrite already generated vendor sources in place.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context as _};
use clap::Subcommand;

use crate::common::{load_interface, output_json_or, package_from_path, GlobalOptions, Result};
use connext_typesupport::classify::{classify, FieldDescriptor};
use connext_typesupport::generate::interface_name_for;
use connext_typesupport::patch::{FilePatch, PatchSet};

/// Suffix of generated plugin sources after the IDL stem.
const PLUGIN_SUFFIX: &str = "Plugin";

/// Patch operations.
#[derive(Subcommand, Clone, Debug)]
pub enum PatchCmd {
    /// Patch a message source (<Msg>_.cxx)
    Message {
        /// Generated message source
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// ROS interface file the source was generated from
        #[arg(long, value_name = "FILE")]
        interface: PathBuf,

        /// Package name (defaults to the interface file's grandparent directory)
        #[arg(long)]
        package: Option<String>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Patch a plugin source (<Msg>_Plugin.cxx)
    Plugin {
        /// Generated plugin source
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// ROS interface file the source was generated from
        #[arg(long, value_name = "FILE")]
        interface: PathBuf,

        /// Package name (defaults to the interface file's grandparent directory)
        #[arg(long)]
        package: Option<String>,

        /// Do not inject the raw buffer serialize fast path
        #[arg(long)]
        no_fast_path: bool,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

impl PatchCmd {
    pub fn run(self, options: &GlobalOptions) -> Result<()> {
        match self {
            PatchCmd::Message {
                file,
                interface,
                package,
                json,
            } => {
                let stem = file_stem(&file)?;
                let fields = unbounded_fields(&interface, package, interface_name_for(&stem))?;
                let patch = PatchSet::message_source().patch_file(&file, &fields)?;
                print_patch(&patch, json)
            }
            PatchCmd::Plugin {
                file,
                interface,
                package,
                no_fast_path,
                json,
            } => {
                let config = options.load_config()?;
                let stem = file_stem(&file)?;
                let idl_stem = stem.strip_suffix(PLUGIN_SUFFIX).ok_or_else(|| {
                    anyhow!("{} is not a plugin source (<Msg>_Plugin.cxx)", file.display())
                })?;
                let fields = unbounded_fields(&interface, package, interface_name_for(idl_stem))?;
                let fast_path = config.patch.fast_path && !no_fast_path;
                let patch = PatchSet::plugin_source(idl_stem, fast_path).patch_file(&file, &fields)?;
                print_patch(&patch, json)
            }
        }
    }
}

fn file_stem(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow!("invalid file name: {}", path.display()))
}

/// Classify the fields of message `name` defined by `interface`.
fn unbounded_fields(
    interface: &Path,
    package: Option<String>,
    name: &str,
) -> Result<Vec<FieldDescriptor>> {
    let package = package
        .or_else(|| package_from_path(interface))
        .context("cannot infer the package name, pass --package")?;
    let definition = load_interface(&package, interface)?;
    let spec = definition
        .messages()
        .into_iter()
        .find(|spec| spec.name == name)
        .ok_or_else(|| anyhow!("{} does not define message {name}", interface.display()))?;
    Ok(classify(&spec.package, &spec.fields)?)
}

fn print_patch(patch: &FilePatch, json: bool) -> Result<()> {
    output_json_or(json, patch, || {
        if patch.modified() {
            println!(
                "patched {}: {}",
                patch.path.display(),
                patch.rules_applied.join(", ")
            );
        } else {
            println!("{} unchanged", patch.path.display());
        }
    })
}
