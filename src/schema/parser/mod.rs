// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Interface parser implementations.

pub mod msg_parser;
pub mod srv_parser;

use std::path::Path;

use crate::core::{CodegenError, InterfaceKind, Result};
use crate::schema::{MessageSpec, ServiceSpec};

/// A parsed interface file.
#[derive(Debug, Clone, PartialEq)]
pub enum InterfaceDefinition {
    /// A .msg file
    Message(MessageSpec),
    /// A .srv file
    Service(ServiceSpec),
}

impl InterfaceDefinition {
    /// All messages carried by this interface.
    ///
    /// A service yields its request and response messages.
    pub fn messages(&self) -> Vec<&MessageSpec> {
        match self {
            InterfaceDefinition::Message(spec) => vec![spec],
            InterfaceDefinition::Service(spec) => spec.messages().to_vec(),
        }
    }
}

/// Parse an interface definition from a string.
///
/// # Arguments
///
/// * `package` - Owning package
/// * `name` - Interface name
/// * `definition` - File contents
/// * `kind` - Message or service
pub fn parse_interface(
    package: &str,
    name: &str,
    definition: &str,
    kind: InterfaceKind,
) -> Result<InterfaceDefinition> {
    match kind {
        InterfaceKind::Msg => {
            msg_parser::parse(package, name, definition).map(InterfaceDefinition::Message)
        }
        InterfaceKind::Srv => {
            srv_parser::parse(package, name, definition).map(InterfaceDefinition::Service)
        }
    }
}

/// Parse an interface file, detecting its kind from the extension.
pub fn parse_interface_file(package: &str, path: &Path) -> Result<InterfaceDefinition> {
    let kind = InterfaceKind::from_path(path).ok_or_else(|| {
        CodegenError::parse(
            path.display().to_string(),
            "expected a .msg or .srv file",
        )
    })?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| CodegenError::parse(path.display().to_string(), "invalid file name"))?;
    let definition = std::fs::read_to_string(path).map_err(|e| CodegenError::io(path, &e))?;

    parse_interface(package, name, &definition, kind)
}
