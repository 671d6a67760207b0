// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Field classification.
//!
//! Decides which message fields are unbounded sequences and resolves the
//! vendor runtime type name used when synthesizing patch text for them.
//!
//! # Example
//!
//! ```
//! use connext_typesupport::classify::classify;
//! use connext_typesupport::schema::msg_parser;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let spec = msg_parser::parse("sensor_msgs", "JointState", "string[] name\nfloat64[3] pos")?;
//! let unbounded = classify(&spec.package, &spec.fields)?;
//! assert_eq!(unbounded.len(), 1);
//! assert_eq!(unbounded[0].wire_type().as_str(), "DDS_String");
//! # Ok(())
//! # }
//! ```

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::core::CodegenError;
use crate::schema::{Field, FieldType, PrimitiveType};

/// Vendor type name of string elements.
pub const STRING_WIRE_TYPE: &str = "DDS_String";

/// IDL type name to vendor runtime type name.
pub const IDL_TO_DDS: [(&str, &str); 12] = [
    ("boolean", "DDS_Boolean"),
    ("char", "DDS_Char"),
    ("octet", "DDS_Octet"),
    ("short", "DDS_Short"),
    ("unsigned short", "DDS_UnsignedShort"),
    ("long", "DDS_Long"),
    ("unsigned long", "DDS_UnsignedLong"),
    ("long long", "DDS_LongLong"),
    ("unsigned long long", "DDS_UnsignedLongLong"),
    ("float", "DDS_Float"),
    ("double", "DDS_Double"),
    ("string", STRING_WIRE_TYPE),
];

/// Look up the vendor runtime type for an IDL type name.
pub fn dds_type_for_idl(idl_name: &str) -> Option<&'static str> {
    IDL_TO_DDS
        .iter()
        .find(|(idl, _)| *idl == idl_name)
        .map(|(_, dds)| *dds)
}

/// Errors raised while classifying fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// No descriptor for the given storage name
    #[error("no unbounded field with storage name '{field}'")]
    UnknownField {
        /// Storage name that was looked up
        field: String,
    },

    /// Element type has no wire mapping
    #[error("field '{field}' has unsupported element type '{type_name}'")]
    UnsupportedType {
        /// Field name
        field: String,
        /// Element type name
        type_name: String,
    },
}

impl From<ClassifyError> for CodegenError {
    fn from(err: ClassifyError) -> Self {
        match err {
            ClassifyError::UnknownField { field } => CodegenError::UnknownField { field },
            ClassifyError::UnsupportedType { field, type_name } => {
                CodegenError::UnsupportedType { field, type_name }
            }
        }
    }
}

/// Primitive element types with a wire-level mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WirePrimitive {
    /// `boolean`
    Boolean,
    /// `char`
    Char,
    /// `octet`
    Octet,
    /// `short`
    Short,
    /// `unsigned short`
    UnsignedShort,
    /// `long`
    Long,
    /// `unsigned long`
    UnsignedLong,
    /// `long long`
    LongLong,
    /// `unsigned long long`
    UnsignedLongLong,
    /// `float`
    Float,
    /// `double`
    Double,
}

impl WirePrimitive {
    /// Parse from an IDL type name.
    pub fn from_idl(name: &str) -> Option<Self> {
        match name {
            "boolean" => Some(WirePrimitive::Boolean),
            "char" => Some(WirePrimitive::Char),
            "octet" => Some(WirePrimitive::Octet),
            "short" => Some(WirePrimitive::Short),
            "unsigned short" => Some(WirePrimitive::UnsignedShort),
            "long" => Some(WirePrimitive::Long),
            "unsigned long" => Some(WirePrimitive::UnsignedLong),
            "long long" => Some(WirePrimitive::LongLong),
            "unsigned long long" => Some(WirePrimitive::UnsignedLongLong),
            "float" => Some(WirePrimitive::Float),
            "double" => Some(WirePrimitive::Double),
            _ => None,
        }
    }

    /// IDL type name.
    pub fn idl_name(self) -> &'static str {
        match self {
            WirePrimitive::Boolean => "boolean",
            WirePrimitive::Char => "char",
            WirePrimitive::Octet => "octet",
            WirePrimitive::Short => "short",
            WirePrimitive::UnsignedShort => "unsigned short",
            WirePrimitive::Long => "long",
            WirePrimitive::UnsignedLong => "unsigned long",
            WirePrimitive::LongLong => "long long",
            WirePrimitive::UnsignedLongLong => "unsigned long long",
            WirePrimitive::Float => "float",
            WirePrimitive::Double => "double",
        }
    }
}

/// Reference to a message type in some package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeRef {
    /// Owning package
    pub package: String,
    /// Message type name
    pub type_name: String,
}

/// What a sequence holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Primitive with a fixed wire type
    Primitive(WirePrimitive),
    /// Bounded or unbounded string
    String,
    /// Nested message
    NestedMessage(TypeRef),
}

/// Vendor runtime type name of a sequence element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WireTypeName(String);

impl WireTypeName {
    /// Name as used in generated code.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is the string element type.
    pub fn is_string(&self) -> bool {
        self.0 == STRING_WIRE_TYPE
    }
}

impl fmt::Display for WireTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Classified field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FieldDescriptor {
    /// Field name as declared
    pub name: String,
    /// Element kind
    pub element: ElementKind,
    /// Array-typed, no fixed size, not upper-bounded
    pub is_unbounded_sequence: bool,
}

impl FieldDescriptor {
    /// Describe a parsed field.
    ///
    /// `package` resolves nested types written without a package prefix.
    pub fn describe(package: &str, field: &Field) -> Result<Self, ClassifyError> {
        let element = match field.type_name.element() {
            FieldType::Primitive(PrimitiveType::String)
            | FieldType::BoundedString {
                base: PrimitiveType::String,
                ..
            } => ElementKind::String,
            FieldType::Primitive(prim) => prim
                .idl_name()
                .and_then(WirePrimitive::from_idl)
                .map(ElementKind::Primitive)
                .ok_or_else(|| ClassifyError::UnsupportedType {
                    field: field.name.clone(),
                    type_name: prim.as_str().to_string(),
                })?,
            FieldType::BoundedString { base, .. } => {
                return Err(ClassifyError::UnsupportedType {
                    field: field.name.clone(),
                    type_name: base.as_str().to_string(),
                })
            }
            FieldType::Nested(name) => ElementKind::NestedMessage(resolve_type_ref(package, name)),
            FieldType::Array { .. } => {
                return Err(ClassifyError::UnsupportedType {
                    field: field.name.clone(),
                    type_name: "nested array".to_string(),
                })
            }
        };

        Ok(Self {
            name: field.name.clone(),
            element,
            is_unbounded_sequence: is_unbounded(&field.type_name),
        })
    }

    /// Name of the generated struct member (`<name>_`).
    pub fn storage_name(&self) -> String {
        format!("{}_", self.name)
    }

    /// Resolve the vendor runtime type name.
    pub fn wire_type(&self) -> WireTypeName {
        let name = match &self.element {
            ElementKind::Primitive(prim) => dds_type_for_idl(prim.idl_name())
                .unwrap_or_default()
                .to_string(),
            ElementKind::String => STRING_WIRE_TYPE.to_string(),
            ElementKind::NestedMessage(type_ref) => {
                format!("{}::msg::dds_::{}_", type_ref.package, type_ref.type_name)
            }
        };
        WireTypeName(name)
    }

    /// Check if the generated container is a string sequence.
    pub fn is_string_sequence(&self) -> bool {
        matches!(self.element, ElementKind::String)
    }
}

/// Check if a field type is an unbounded sequence.
pub fn is_unbounded(field_type: &FieldType) -> bool {
    field_type.is_array() && field_type.array_size().is_none() && !field_type.is_upper_bound()
}

/// Classify fields, keeping only unbounded sequences in input order.
pub fn classify(package: &str, fields: &[Field]) -> Result<Vec<FieldDescriptor>, ClassifyError> {
    fields
        .iter()
        .filter(|field| is_unbounded(&field.type_name))
        .map(|field| FieldDescriptor::describe(package, field))
        .collect()
}

/// Find the descriptor for a storage name (`<name>_`).
pub fn lookup<'a>(
    descriptors: &'a [FieldDescriptor],
    storage_name: &str,
) -> Result<&'a FieldDescriptor, ClassifyError> {
    descriptors
        .iter()
        .find(|d| d.storage_name() == storage_name)
        .ok_or_else(|| ClassifyError::UnknownField {
            field: storage_name.to_string(),
        })
}

/// Split `pkg/Type` or `pkg/msg/Type`; bare names belong to `package`.
fn resolve_type_ref(package: &str, name: &str) -> TypeRef {
    let mut parts = name.split('/');
    let first = parts.next().unwrap_or(name);
    match parts.last() {
        Some(type_name) => TypeRef {
            package: first.to_string(),
            type_name: type_name.to_string(),
        },
        None => TypeRef {
            package: package.to_string(),
            type_name: name.to_string(),
        },
    }
}
