// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Classify command - list unbounded sequence fields of an interface.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use serde::Serialize;

use crate::common::{load_interface, output_json_or, package_from_path, Result};
use connext_typesupport::classify::{classify, WireTypeName};

/// List the unbounded sequence fields of a .msg or .srv file.
#[derive(Args, Clone, Debug)]
pub struct ClassifyCmd {
    /// Interface file
    #[arg(value_name = "FILE")]
    interface: PathBuf,

    /// Package name (defaults to the file's grandparent directory)
    #[arg(long)]
    package: Option<String>,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,
}

#[derive(Serialize)]
struct MessageFields {
    message: String,
    unbounded_fields: Vec<FieldRow>,
}

#[derive(Serialize)]
struct FieldRow {
    name: String,
    storage_name: String,
    wire_type: WireTypeName,
    string_sequence: bool,
}

impl ClassifyCmd {
    pub fn run(self) -> Result<()> {
        let package = self
            .package
            .or_else(|| package_from_path(&self.interface))
            .context("cannot infer the package name, pass --package")?;
        let definition = load_interface(&package, &self.interface)?;

        let mut messages = Vec::new();
        for spec in definition.messages() {
            let fields = classify(&spec.package, &spec.fields)
                .with_context(|| format!("classifying {}", spec.full_name()))?;
            messages.push(MessageFields {
                message: spec.full_name(),
                unbounded_fields: fields
                    .iter()
                    .map(|field| FieldRow {
                        name: field.name.clone(),
                        storage_name: field.storage_name(),
                        wire_type: field.wire_type(),
                        string_sequence: field.is_string_sequence(),
                    })
                    .collect(),
            });
        }

        output_json_or(self.json, &messages, || {
            for message in &messages {
                println!("{}", message.message);
                if message.unbounded_fields.is_empty() {
                    println!("  (no unbounded sequences)");
                }
                for field in &message.unbounded_fields {
                    println!("  {}: {}", field.name, field.wire_type);
                }
            }
        })
    }
}
