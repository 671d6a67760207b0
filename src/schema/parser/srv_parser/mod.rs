// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! SRV format parser.
//!
//! A .srv file is a request message and a response message separated by a
//! line containing only `---`. Each half is parsed with the .msg parser and
//! named `<Service>_Request` / `<Service>_Response`.

use crate::core::CodegenError;
use crate::core::Result as CoreResult;
use crate::schema::ast::ServiceSpec;
use crate::schema::parser::msg_parser;

const SEPARATOR: &str = "---";

/// Parse a ROS .srv definition.
pub fn parse(package: &str, name: &str, definition: &str) -> CoreResult<ServiceSpec> {
    let lines: Vec<&str> = definition.split('\n').collect();
    let split = lines
        .iter()
        .position(|line| line.trim() == SEPARATOR)
        .ok_or_else(|| {
            CodegenError::parse(
                format!("{package}/srv/{name}"),
                "missing '---' between request and response",
            )
        })?;

    let request_text = lines[..split].join("\n");
    let response_text = lines[split + 1..].join("\n");

    Ok(ServiceSpec {
        package: package.to_string(),
        name: name.to_string(),
        request: msg_parser::parse(package, &format!("{name}_Request"), &request_text)?,
        response: msg_parser::parse(package, &format!("{name}_Response"), &response_text)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_two_ints() {
        let srv = "int64 a\nint64 b\n---\nint64 sum\n";
        let spec = parse("example_interfaces", "AddTwoInts", srv).unwrap();

        assert_eq!(spec.request.name, "AddTwoInts_Request");
        assert_eq!(spec.request.fields.len(), 2);
        assert_eq!(spec.response.name, "AddTwoInts_Response");
        assert_eq!(spec.response.fields[0].name, "sum");
    }

    #[test]
    fn test_parse_empty_halves() {
        let spec = parse("std_srvs", "Empty", "---\n").unwrap();

        assert!(spec.request.fields.is_empty());
        assert!(spec.response.fields.is_empty());
    }

    #[test]
    fn test_missing_separator() {
        let err = parse("test_srvs", "Broken", "int64 a\n").unwrap_err();
        assert!(matches!(err, CodegenError::ParseError { .. }));
    }
}
