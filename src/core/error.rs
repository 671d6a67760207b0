// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for connext-typesupport.
//!
//! Provides the crate-wide error for code generation:
//! - Interface definition parsing
//! - Field classification
//! - Vendor compiler invocation
//! - Generated source patching
//! - File I/O

use thiserror::Error;

/// Errors that can occur while generating type support.
#[derive(Debug, Clone, Error)]
pub enum CodegenError {
    /// Parse error in an interface definition
    #[error("Parse error in {context}: {message}")]
    ParseError {
        /// What was being parsed
        context: String,
        /// Error message
        message: String,
    },

    /// A field name has no matching descriptor
    #[error("Unknown field: '{field}'")]
    UnknownField {
        /// Storage name that was looked up
        field: String,
    },

    /// Element type with no wire-level mapping
    #[error("Unsupported type '{type_name}' for field '{field}'")]
    UnsupportedType {
        /// Field name
        field: String,
        /// Offending type
        type_name: String,
    },

    /// A required anchor was not present in generated source
    #[error("Anchor '{anchor}' not found in {file}")]
    AnchorNotFound {
        /// File being patched
        file: String,
        /// Anchor text that was searched for
        anchor: String,
    },

    /// Vendor compiler exited with a failure status
    #[error("IDL compiler failed on '{idl_file}' with status {status}")]
    CompilerFailed {
        /// IDL file passed to the compiler
        idl_file: String,
        /// Exit status, or "signal" when terminated by a signal
        status: String,
    },

    /// The retry bound was exhausted without valid vendor output
    #[error("failed to generate '{artifact}' for '{idl_file}' after {attempts} attempts")]
    RetriesExhausted {
        /// IDL file passed to the compiler
        idl_file: String,
        /// Artifact that never appeared
        artifact: String,
        /// Number of attempts made
        attempts: u32,
    },

    /// Invalid configuration value
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem
        reason: String,
    },

    /// File system error
    #[error("I/O error on {path}: {message}")]
    Io {
        /// Path being accessed
        path: String,
        /// Underlying error
        message: String,
    },

    /// Other error
    #[error("Other error: {0}")]
    Other(String),
}

impl CodegenError {
    /// Create a parse error.
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        CodegenError::ParseError {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an "unknown field" error.
    pub fn unknown_field(field: impl Into<String>) -> Self {
        CodegenError::UnknownField {
            field: field.into(),
        }
    }

    /// Create an "anchor not found" error.
    pub fn anchor_not_found(file: impl Into<String>, anchor: impl Into<String>) -> Self {
        CodegenError::AnchorNotFound {
            file: file.into(),
            anchor: anchor.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        CodegenError::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create an I/O error bound to a path.
    pub fn io(path: impl AsRef<std::path::Path>, err: &std::io::Error) -> Self {
        CodegenError::Io {
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodegenError::ParseError { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            CodegenError::UnknownField { field } => vec![("field", field.clone())],
            CodegenError::UnsupportedType { field, type_name } => {
                vec![("field", field.clone()), ("type", type_name.clone())]
            }
            CodegenError::AnchorNotFound { file, anchor } => {
                vec![("file", file.clone()), ("anchor", anchor.clone())]
            }
            CodegenError::CompilerFailed { idl_file, status } => {
                vec![("idl", idl_file.clone()), ("status", status.clone())]
            }
            CodegenError::RetriesExhausted {
                idl_file,
                artifact,
                attempts,
            } => vec![
                ("idl", idl_file.clone()),
                ("artifact", artifact.clone()),
                ("attempts", attempts.to_string()),
            ],
            CodegenError::InvalidConfig { reason } => vec![("reason", reason.clone())],
            CodegenError::Io { path, message } => {
                vec![("path", path.clone()), ("message", message.clone())]
            }
            CodegenError::Other(msg) => vec![("message", msg.clone())],
        }
    }
}

impl From<std::io::Error> for CodegenError {
    fn from(err: std::io::Error) -> Self {
        CodegenError::Io {
            path: "<unknown>".to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type for connext-typesupport operations.
pub type Result<T> = std::result::Result<T, CodegenError>;
