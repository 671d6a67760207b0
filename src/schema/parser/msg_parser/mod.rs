// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! MSG format parser using Pest.
//!
//! This module handles parsing of ROS 2 .msg format files.
//!
//! The format supports:
//! - Primitive and nested field types (`int32 x`, `geometry_msgs/Point p`)
//! - Dynamic arrays `T[]`, fixed arrays `T[N]` and bounded sequences `T[<=N]`
//! - Bounded strings `string<=N`
//! - Constants (`int32 FOO=1`, skipped) and default values (ignored)
//! - Comments (# style)

use crate::core::CodegenError;
use crate::core::Result as CoreResult;
use crate::schema::ast::{Field, FieldType, MessageSpec, PrimitiveType};
use pest::Parser;
use pest_derive::Parser;

/// Pest parser for ROS .msg files.
#[derive(Parser)]
#[grammar = "schema/parser/msg_parser/msg.pest"] // Path relative to src/ directory
pub struct MsgParser;

/// Parse a ROS 2 .msg definition.
///
/// # Arguments
///
/// * `package` - Owning package, used for unqualified nested types
/// * `name` - Message name
/// * `definition` - Contents of the .msg file
pub fn parse(package: &str, name: &str, definition: &str) -> CoreResult<MessageSpec> {
    let pairs = MsgParser::parse(Rule::schema, definition)
        .map_err(|e| CodegenError::parse(format!("{package}/msg/{name}"), format!("{e}")))?;

    let mut spec = MessageSpec::new(package, name);

    for pair in pairs {
        // schema = SOI ~ line ~ (newline ~ line)* ~ EOI
        for item in pair.into_inner() {
            if item.as_rule() != Rule::msg_line {
                continue;
            }
            if let Some(field) = parse_msg_line(item.as_str())
                .map_err(|e| CodegenError::parse(format!("{package}/msg/{name}"), e))?
            {
                spec.add_field(field);
            }
        }
    }

    Ok(spec)
}

/// Parse a single declaration line into a Field.
///
/// Returns `Ok(None)` for constant declarations.
fn parse_msg_line(content: &str) -> std::result::Result<Option<Field>, String> {
    // Drop trailing comments
    let content = match content.find('#') {
        Some(pos) => &content[..pos],
        None => content,
    };
    let content = content.trim();

    let mut parts = content.splitn(2, |c: char| c.is_whitespace());
    let type_part = parts.next().unwrap_or_default();
    let rest = parts.next().unwrap_or_default().trim_start();

    let field_end = rest
        .find(|c: char| c.is_whitespace() || c == '=')
        .unwrap_or(rest.len());
    let field_name = &rest[..field_end];

    // Constants look like "int32 FOO=1" or "int32 FOO = 1"
    if rest[field_end..].trim_start().starts_with('=') {
        return Ok(None);
    }
    if field_name.is_empty() {
        return Err(format!("missing field name in '{content}'"));
    }

    let type_name = parse_type_spec(type_part)?;
    Ok(Some(Field {
        name: field_name.to_string(),
        type_name,
    }))
}

/// Parse a type token such as `int32`, `string<=10`, `pkg/Type[<=5]`.
fn parse_type_spec(type_part: &str) -> std::result::Result<FieldType, String> {
    let Some(bracket_pos) = type_part.find('[') else {
        return parse_base_type(type_part);
    };

    let base = parse_base_type(&type_part[..bracket_pos])?;
    let array_part = type_part[bracket_pos + 1..]
        .strip_suffix(']')
        .ok_or_else(|| format!("unterminated array suffix in '{type_part}'"))?;

    let (size, is_upper_bound) = if array_part.is_empty() {
        (None, false)
    } else if let Some(bound) = array_part.strip_prefix("<=") {
        (Some(parse_size(bound, type_part)?), true)
    } else {
        (Some(parse_size(array_part, type_part)?), false)
    };

    Ok(FieldType::Array {
        base_type: Box::new(base),
        size,
        is_upper_bound,
    })
}

/// Parse an element type without array suffix.
fn parse_base_type(base: &str) -> std::result::Result<FieldType, String> {
    if base.is_empty() {
        return Err("empty type".to_string());
    }

    if let Some((string_type, bound)) = base.split_once("<=") {
        let prim = PrimitiveType::try_from_str(string_type)
            .filter(|p| matches!(p, PrimitiveType::String | PrimitiveType::WString))
            .ok_or_else(|| format!("only strings can be bounded, got '{base}'"))?;
        return Ok(FieldType::BoundedString {
            base: prim,
            upper_bound: parse_size(bound, base)?,
        });
    }

    Ok(match PrimitiveType::try_from_str(base) {
        Some(prim) => FieldType::Primitive(prim),
        // Nested type (e.g., "std_msgs/Header" or "Header")
        None => FieldType::Nested(base.to_string()),
    })
}

fn parse_size(digits: &str, context: &str) -> std::result::Result<usize, String> {
    digits
        .parse()
        .map_err(|_| format!("invalid size '{digits}' in '{context}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_field() {
        let spec = parse("test_msgs", "TestMsg", "int32 value").unwrap();

        assert_eq!(spec.fields.len(), 1);
        assert_eq!(spec.fields[0].name, "value");
        assert_eq!(
            spec.fields[0].type_name,
            FieldType::Primitive(PrimitiveType::Int32)
        );
    }

    #[test]
    fn test_parse_multiple_fields() {
        let spec = parse("test_msgs", "TestMsg", "int32 x\nint32 y\n").unwrap();

        assert_eq!(spec.fields.len(), 2);
        assert_eq!(spec.fields[0].name, "x");
        assert_eq!(spec.fields[1].name, "y");
    }

    #[test]
    fn test_parse_dynamic_array() {
        let spec = parse("test_msgs", "TestMsg", "int32[] values").unwrap();

        match &spec.fields[0].type_name {
            FieldType::Array {
                size,
                is_upper_bound,
                ..
            } => {
                assert!(size.is_none(), "Expected dynamic array");
                assert!(!is_upper_bound);
            }
            _ => panic!("Expected Array type"),
        }
    }

    #[test]
    fn test_parse_fixed_array() {
        let spec = parse("test_msgs", "TestMsg", "float32[3] position").unwrap();

        assert_eq!(spec.fields[0].type_name.array_size(), Some(3));
        assert!(!spec.fields[0].type_name.is_upper_bound());
    }

    #[test]
    fn test_parse_bounded_sequence() {
        let spec = parse("test_msgs", "TestMsg", "int32[<=5] values").unwrap();

        assert_eq!(spec.fields[0].type_name.array_size(), Some(5));
        assert!(spec.fields[0].type_name.is_upper_bound());
    }

    #[test]
    fn test_parse_bounded_string() {
        let spec = parse("test_msgs", "TestMsg", "string<=10 label\nstring<=4[] tags").unwrap();

        assert_eq!(
            spec.fields[0].type_name,
            FieldType::BoundedString {
                base: PrimitiveType::String,
                upper_bound: 10,
            }
        );
        assert_eq!(
            spec.fields[1].type_name.element(),
            &FieldType::BoundedString {
                base: PrimitiveType::String,
                upper_bound: 4,
            }
        );
    }

    #[test]
    fn test_parse_nested_type() {
        let spec = parse("test_msgs", "TestMsg", "std_msgs/Header header\nPoint[] points").unwrap();

        assert_eq!(
            spec.fields[0].type_name,
            FieldType::Nested("std_msgs/Header".to_string())
        );
        assert_eq!(
            spec.fields[1].type_name.element(),
            &FieldType::Nested("Point".to_string())
        );
    }

    #[test]
    fn test_parse_skips_constants_and_comments() {
        let msg = r#"
# Status codes
int8 OK=0
int8 ERROR = 1
int8 level  # current level
string name "default"
"#;
        let spec = parse("test_msgs", "Status", msg).unwrap();

        assert_eq!(spec.fields.len(), 2);
        assert_eq!(spec.fields[0].name, "level");
        assert_eq!(spec.fields[1].name, "name");
    }

    #[test]
    fn test_parse_joint_state() {
        let msg = r#"
std_msgs/Header header

string[] name
float64[] position
float64[] velocity
float64[] effort
"#;
        let spec = parse("sensor_msgs", "JointState", msg).unwrap();

        assert_eq!(spec.fields.len(), 5);
        assert_eq!(spec.fields[1].name, "name");
        assert_eq!(spec.fields[4].name, "effort");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("test_msgs", "Bad", "int32").is_err());
        assert!(parse("test_msgs", "Bad", "int32[x] values").is_err());
        assert!(parse("test_msgs", "Bad", "int32<=3 values").is_err());
    }
}
