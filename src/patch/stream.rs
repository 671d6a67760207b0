// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR stream operations emitted into generated deserializers.
//!
//! CDR encodes a sequence as a 4-byte unsigned length followed by the
//! elements. The vendor deserializer reads that length itself and then
//! rejects anything above the sequence's current maximum. To grow the
//! sequence first, the generated code peeks at the length prefix: it reads
//! the 4 bytes and moves the cursor back by the same amount, so the vendor
//! code still sees the stream exactly where it expects it. The wire format
//! is never altered.

use super::anchors::{ERROR_LABEL, SAMPLE_PARAM, STREAM_PARAM};

/// Size of a CDR sequence length prefix in bytes.
pub const LENGTH_PREFIX_BYTES: u32 = 4;

/// Statements that read the next length prefix into `var` without consuming it.
pub fn peek_length_prefix(var: &str) -> [String; 2] {
    [
        format!("RTICdrStream_deserializeUnsignedLong({STREAM_PARAM}, &{var});"),
        format!(
            "RTICdrStream_incrementCurrentPosition({STREAM_PARAM}, -{LENGTH_PREFIX_BYTES});"
        ),
    ]
}

/// `<Wire>Seq_set_maximum(&sample-><storage>, <value>);`
pub fn set_maximum(wire_type: &str, storage: &str, value: &str) -> String {
    format!("{wire_type}Seq_set_maximum(&{SAMPLE_PARAM}->{storage}, {value});")
}

/// Statements that (re)allocate every string slot of a string sequence.
///
/// Each slot gets room for `max_length` characters plus the terminator.
/// Allocation failure jumps to the deserializer's cleanup label. The
/// statements form their own block so `buffer` does not leak into the
/// surrounding scope.
pub fn init_string_buffers(storage: &str, count_var: &str, max_length: u32) -> Vec<String> {
    vec![
        "{".to_string(),
        format!(
            "    void* buffer = DDS_StringSeq_get_contiguous_bufferI(&{SAMPLE_PARAM}->{storage});"
        ),
        "    if (buffer) {".to_string(),
        format!(
            "        if (!RTICdrType_initStringArray(buffer, ({count_var}), ({max_length})+1, RTI_CDR_CHAR_TYPE)) {{"
        ),
        format!("            goto {ERROR_LABEL};"),
        "        }".to_string(),
        "    }".to_string(),
        "}".to_string(),
    ]
}
