// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # connext-typesupport
//!
//! Build-time generator of RTI Connext DDS type support for ROS interfaces.
//!
//! The vendor IDL compiler (`rtiddsgen`) produces C++ that only knows
//! bounded sequences. This library runs the compiler and then rewrites its
//! output so that:
//! - sequences declared without a bound grow to whatever arrives on the wire
//! - the serialize entry point can copy a pre-serialized buffer directly
//!
//! ## Architecture
//!
//! - `schema/` - ROS `.msg` and `.srv` parsing
//! - `classify/` - Unbounded sequence detection and vendor type names
//! - `vendor/` - IDL compiler command lines, retries and output checks
//! - `patch/` - Anchor-based rewrite rules for generated C++
//! - `generate/` - Package-level orchestration
//! - `diff` - Unified diff application
//!
//! ## Example: Patching a generated plugin
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//!
//! use connext_typesupport::classify::classify;
//! use connext_typesupport::patch::PatchSet;
//! use connext_typesupport::schema::parse_interface_file;
//!
//! let def = parse_interface_file("sensor_msgs", Path::new("msg/JointState.msg"))?;
//! for spec in def.messages() {
//!     let fields = classify(&spec.package, &spec.fields)?;
//!     let plugin = format!("out/msg/{}_Plugin.cxx", spec.name);
//!     let stem = format!("{}_", spec.name);
//!     PatchSet::plugin_source(&stem, true).patch_file(Path::new(&plugin), &fields)?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Generating a package
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use connext_typesupport::{GeneratorConfig, PackageGenerator, PackageRequest};
//!
//! let request = PackageRequest {
//!     package: "test_msgs".to_string(),
//!     idl_files: vec!["build/test_msgs/msg/Foo_.idl".into()],
//!     idl_base_dir: "build".into(),
//!     output_base: "out".into(),
//!     ..PackageRequest::default()
//! };
//! let report = PackageGenerator::new(GeneratorConfig::default()).generate(&request)?;
//! println!("{} files patched", report.patched_file_count());
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use core::{CodegenError, GeneratorConfig, InterfaceKind, Result};

// Interface parsing
pub mod schema;

// Field classification
pub mod classify;

// Vendor compiler invocation
pub mod vendor;

// Generated source patching
pub mod patch;

// Package orchestration
pub mod generate;

// Unified diff application
pub mod diff;

pub use classify::{classify, FieldDescriptor, WireTypeName};
pub use generate::{GenerationReport, PackageGenerator, PackageRequest};
pub use patch::{GeneratedSource, PatchRule, PatchSet};
pub use vendor::{CompilerCommand, VendorInvoker};
