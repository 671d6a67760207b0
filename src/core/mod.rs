// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout connext-typesupport.
//!
//! This module provides the foundational types for the library:
//! - [`CodegenError`] - Crate-wide error handling
//! - [`GeneratorConfig`] - TOML-backed generator configuration
//! - [`InterfaceKind`] - Interface file kind identifier

pub mod config;
pub mod error;

pub use config::{CompilerConfig, GeneratorConfig, OverwriteMode, PatchConfig, RetryConfig};
pub use error::{CodegenError, Result};

/// Kind of ROS interface file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterfaceKind {
    /// Message definition (`.msg`)
    Msg,
    /// Service definition (`.srv`)
    Srv,
}

/// Error returned when parsing an `InterfaceKind` from string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseInterfaceKindError {
    _private: (),
}

impl std::fmt::Display for ParseInterfaceKindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid interface kind, expected 'msg' or 'srv'")
    }
}

impl std::error::Error for ParseInterfaceKindError {}

impl std::str::FromStr for InterfaceKind {
    type Err = ParseInterfaceKindError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "msg" => Ok(InterfaceKind::Msg),
            "srv" => Ok(InterfaceKind::Srv),
            _ => Err(ParseInterfaceKindError { _private: () }),
        }
    }
}

impl InterfaceKind {
    /// Detect the kind from a file extension.
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            InterfaceKind::Msg => "msg",
            InterfaceKind::Srv => "srv",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_interface_kind_from_str() {
        assert_eq!("msg".parse::<InterfaceKind>(), Ok(InterfaceKind::Msg));
        assert_eq!("SRV".parse::<InterfaceKind>(), Ok(InterfaceKind::Srv));
        assert!("idl".parse::<InterfaceKind>().is_err());
    }

    #[test]
    fn test_interface_kind_from_path() {
        assert_eq!(
            InterfaceKind::from_path(Path::new("pkg/msg/Foo.msg")),
            Some(InterfaceKind::Msg)
        );
        assert_eq!(
            InterfaceKind::from_path(Path::new("pkg/srv/AddTwoInts.srv")),
            Some(InterfaceKind::Srv)
        );
        assert_eq!(InterfaceKind::from_path(Path::new("pkg/msg/Foo_.idl")), None);
    }
}
