// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Path derivation for package generation.

use std::path::{Component, Path, PathBuf};

use crate::core::{CodegenError, Result};

/// A dependency spec `<package>:<path to an IDL file>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Package name
    pub package: String,
    /// IDL file of that package
    pub idl_path: PathBuf,
}

impl Dependency {
    /// Parse `<package>:<path>`, splitting on the first `:` only.
    ///
    /// The path may itself contain `:`, as Windows drive letters do.
    pub fn parse(spec: &str) -> Result<Self> {
        let (package, path) = spec.split_once(':').ok_or_else(|| {
            CodegenError::parse(
                "dependency",
                format!("'{spec}' must have the form <package>:<path>"),
            )
        })?;
        Ok(Self {
            package: package.to_string(),
            idl_path: PathBuf::from(path),
        })
    }

    /// Include directory contributed by this dependency.
    ///
    /// Three levels above the normalized IDL path, so that includes of the
    /// form `<package>/msg/<File>.idl` resolve.
    pub fn include_dir(&self) -> PathBuf {
        let normalized = normalize(&self.idl_path);
        normalized
            .ancestors()
            .nth(3)
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }
}

/// Include directories: `base` first, then one per dependency, without
/// duplicates and in order of first appearance.
pub fn include_dirs(base: &Path, dependencies: &[Dependency]) -> Vec<PathBuf> {
    let mut dirs = vec![base.to_path_buf()];
    for dep in dependencies {
        let dir = dep.include_dir();
        if !dirs.contains(&dir) {
            dirs.push(dir);
        }
    }
    dirs
}

/// Output directory for an IDL file: `<base>/<grandparent name>/<parent name>`.
///
/// For `.../test_msgs/msg/Foo_.idl` this is `<base>/test_msgs/msg`.
pub fn output_dir_for(output_base: &Path, idl_file: &Path) -> PathBuf {
    let folder = idl_file.parent().unwrap_or(Path::new(""));
    let parent_folder = folder.parent().unwrap_or(Path::new(""));
    let mut dir = output_base.to_path_buf();
    if let Some(name) = parent_folder.file_name() {
        dir.push(name);
    }
    if let Some(name) = folder.file_name() {
        dir.push(name);
    }
    dir
}

/// Private staging directory for one IDL file inside its output directory.
pub fn staging_dir_for(output_dir: &Path, stem: &str) -> PathBuf {
    output_dir.join(format!(".{stem}.staging"))
}

/// Interface name generated from an IDL stem (`Foo_` gives `Foo`).
pub fn interface_name_for(stem: &str) -> &str {
    stem.strip_suffix('_').unwrap_or(stem)
}

/// Lexically normalize a path: drop `.` and fold `..` into its parent.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let ends_in_normal = matches!(out.components().next_back(), Some(Component::Normal(_)));
                if ends_in_normal {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
