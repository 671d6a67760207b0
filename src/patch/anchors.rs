// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Anchor text in vendor-generated sources.
//!
//! The vendor compiler output is not a stable grammar, so every rule matches
//! on literal fragments. All of them live here so a change in the vendor's
//! output format is fixed in one place.

/// Trailing comment appended to every line written by a patch rule.
pub const PATCH_TAG: &str = "/* ROSIDL */";

/// Capacity literal the vendor uses for sequences without a declared bound.
pub const DEFAULT_BOUND: &str = "(100)";

/// [`DEFAULT_BOUND`] as a stand-alone argument line.
pub const DEFAULT_BOUND_ARG: &str = "(100),";

/// `DDS_<T>Seq_set_maximum(&sample-><member>` prefix.
pub const SET_MAXIMUM_CALL: &str = "Seq_set_maximum(&sample->";

/// Tail of the default capacity initialization, after the member name.
pub const SET_MAXIMUM_DEFAULT_TAIL: &str = " , (100))";

/// First line of the two-line string buffer array initialization.
pub const INIT_STRING_ARRAY_OPEN: &str = "if (!RTICdrType_initStringArray(buffer,";

/// `DDS_<T>Seq_get_length(&sample-><member>` prefix.
pub const GET_LENGTH_CALL: &str = "Seq_get_length(&sample->";

/// Declaration of the local length variable in sequence deserialization.
pub const SEQUENCE_LENGTH_DECL: &str = "RTICdrUnsignedLong sequence_length;";

/// Name of the local length variable.
pub const SEQUENCE_LENGTH_VAR: &str = "sequence_length";

/// `DDS_<T>Seq_get_contiguous_bufferI(&sample-><member>` prefix.
pub const GET_CONTIGUOUS_BUFFER_CALL: &str = "Seq_get_contiguous_bufferI(&sample->";

/// Sample finalizer call with optional members enabled.
pub const FINALIZE_OPTIONAL_MEMBERS_CALL: &str = "__finalize_optional_members(sample, RTI_TRUE);";

/// Suffix of the serialize entry point: `<Msg>Plugin_serialize(`.
pub const SERIALIZE_ENTRY_SUFFIX: &str = "Plugin_serialize(";

/// Name of the sample parameter in vendor-generated functions.
pub const SAMPLE_PARAM: &str = "sample";

/// Name given to the serialize sample parameter once the fast path is injected.
pub const RENAMED_SAMPLE_PARAM: &str = "untyped_sample";

/// Name of the CDR stream parameter.
pub const STREAM_PARAM: &str = "stream";

/// Handle type carrying an optional pre-serialized buffer.
pub const MESSAGE_HANDLE_TYPE: &str = "ConnextStaticMessageHandle";

/// Header declaring [`MESSAGE_HANDLE_TYPE`].
pub const MESSAGE_HANDLE_HEADER: &str =
    "#include \"rosidl_typesupport_connext_cpp/connext_static_message_handle.hpp\"";

/// Cleanup label present in vendor deserialize functions.
pub const ERROR_LABEL: &str = "fin";

/// Default maximum string length the vendor assumes.
pub const DEFAULT_STRING_BOUND: u32 = 255;

/// Bound written for unbounded sequences on serialize.
pub const UNLIMITED_BOUND: u32 = u32::MAX;
