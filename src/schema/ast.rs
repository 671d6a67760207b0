// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! AST types for parsed ROS interface definitions.

/// A parsed ROS message definition.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageSpec {
    /// Owning package (e.g., "sensor_msgs")
    pub package: String,
    /// Message name (e.g., "JointState")
    pub name: String,
    /// Ordered list of fields
    pub fields: Vec<Field>,
}

/// A parsed ROS service definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSpec {
    /// Owning package
    pub package: String,
    /// Service name (e.g., "AddTwoInts")
    pub name: String,
    /// Request message (`<Name>_Request`)
    pub request: MessageSpec,
    /// Response message (`<Name>_Response`)
    pub response: MessageSpec,
}

/// A field in a message.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name
    pub name: String,
    /// Field type
    pub type_name: FieldType,
}

/// Field type - can be primitive, bounded string, array, or nested message.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// Primitive type
    Primitive(PrimitiveType),
    /// String with a declared maximum length (`string<=N`)
    BoundedString {
        /// `String` or `WString`
        base: PrimitiveType,
        /// Maximum number of characters
        upper_bound: usize,
    },
    /// Array type
    Array {
        /// Base type (element type)
        base_type: Box<FieldType>,
        /// Array size (None = dynamic, Some(N) = fixed or bound)
        size: Option<usize>,
        /// `T[<=N]`: `size` is an upper bound rather than a fixed size
        is_upper_bound: bool,
    },
    /// Nested message type (`Type` or `package/Type`)
    Nested(String),
}

/// Primitive ROS 2 types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// Boolean
    Bool,
    /// Byte (opaque 8-bit)
    Byte,
    /// Char (8-bit)
    Char,
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 8-bit unsigned integer
    UInt8,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit unsigned integer
    UInt64,
    /// 32-bit float
    Float32,
    /// 64-bit float
    Float64,
    /// String
    String,
    /// Wide string (UTF-16)
    WString,
}

impl PrimitiveType {
    /// Parse a primitive type from a string.
    pub fn try_from_str(s: &str) -> Option<Self> {
        match s {
            "bool" => Some(PrimitiveType::Bool),
            "byte" => Some(PrimitiveType::Byte),
            "char" => Some(PrimitiveType::Char),
            "int8" => Some(PrimitiveType::Int8),
            "int16" => Some(PrimitiveType::Int16),
            "int32" => Some(PrimitiveType::Int32),
            "int64" => Some(PrimitiveType::Int64),
            "uint8" => Some(PrimitiveType::UInt8),
            "uint16" => Some(PrimitiveType::UInt16),
            "uint32" => Some(PrimitiveType::UInt32),
            "uint64" => Some(PrimitiveType::UInt64),
            "float32" => Some(PrimitiveType::Float32),
            "float64" => Some(PrimitiveType::Float64),
            "string" => Some(PrimitiveType::String),
            "wstring" => Some(PrimitiveType::WString),
            _ => None,
        }
    }

    /// Name as written in a `.msg` file.
    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveType::Bool => "bool",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Char => "char",
            PrimitiveType::Int8 => "int8",
            PrimitiveType::Int16 => "int16",
            PrimitiveType::Int32 => "int32",
            PrimitiveType::Int64 => "int64",
            PrimitiveType::UInt8 => "uint8",
            PrimitiveType::UInt16 => "uint16",
            PrimitiveType::UInt32 => "uint32",
            PrimitiveType::UInt64 => "uint64",
            PrimitiveType::Float32 => "float32",
            PrimitiveType::Float64 => "float64",
            PrimitiveType::String => "string",
            PrimitiveType::WString => "wstring",
        }
    }

    /// The IDL type this primitive is emitted as.
    ///
    /// Returns `None` for types the DDS IDL mapping does not cover.
    pub fn idl_name(self) -> Option<&'static str> {
        match self {
            PrimitiveType::Bool => Some("boolean"),
            PrimitiveType::Byte | PrimitiveType::UInt8 => Some("octet"),
            PrimitiveType::Char | PrimitiveType::Int8 => Some("char"),
            PrimitiveType::Int16 => Some("short"),
            PrimitiveType::UInt16 => Some("unsigned short"),
            PrimitiveType::Int32 => Some("long"),
            PrimitiveType::UInt32 => Some("unsigned long"),
            PrimitiveType::Int64 => Some("long long"),
            PrimitiveType::UInt64 => Some("unsigned long long"),
            PrimitiveType::Float32 => Some("float"),
            PrimitiveType::Float64 => Some("double"),
            PrimitiveType::String => Some("string"),
            PrimitiveType::WString => None,
        }
    }
}

impl FieldType {
    /// Check if this is an array or sequence.
    pub fn is_array(&self) -> bool {
        matches!(self, FieldType::Array { .. })
    }

    /// Declared array size or bound, if any.
    pub fn array_size(&self) -> Option<usize> {
        match self {
            FieldType::Array { size, .. } => *size,
            _ => None,
        }
    }

    /// Check if this array carries an explicit upper bound.
    pub fn is_upper_bound(&self) -> bool {
        matches!(
            self,
            FieldType::Array {
                is_upper_bound: true,
                ..
            }
        )
    }

    /// Element type for arrays, the type itself otherwise.
    pub fn element(&self) -> &FieldType {
        match self {
            FieldType::Array { base_type, .. } => base_type,
            other => other,
        }
    }
}

impl MessageSpec {
    /// Create an empty message spec.
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field to this message.
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Fully qualified name (`package/msg/Name`).
    pub fn full_name(&self) -> String {
        format!("{}/msg/{}", self.package, self.name)
    }
}

impl ServiceSpec {
    /// Request and response messages, in that order.
    pub fn messages(&self) -> [&MessageSpec; 2] {
        [&self.request, &self.response]
    }
}
