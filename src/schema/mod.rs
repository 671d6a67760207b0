// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Interface definition parsing for ROS 2 formats.
//!
//! This module provides parsing for:
//! - ROS 2 `.msg` files
//! - ROS 2 `.srv` files (request/response pairs)

pub mod ast;
pub mod parser;

pub use ast::{Field, FieldType, MessageSpec, PrimitiveType, ServiceSpec};
pub use parser::{parse_interface, parse_interface_file, InterfaceDefinition};

// Re-export parser-specific modules
pub use parser::{msg_parser, srv_parser};
