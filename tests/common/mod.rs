// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::path::{Path, PathBuf};

use connext_typesupport::vendor::{CompilerCommand, CompilerExit, CompilerRunner, VendorError};

// ============================================================================
// Generated Source Fixtures
// ============================================================================

/// Interface matching the fixtures below.
pub const FOO_MSG: &str = "\
# Mixed sequences
int32[] values
string[] names
int32[<=5] bounded
float64 scale
";

const MESSAGE_SOURCE: &str = "\
#include <string.h>
#include \"@STEM@.h\"

RTIBool @STEM@_initialize_ex(@STEM@ * sample, RTIBool allocatePointers, RTIBool allocateMemory)
{
    void* buffer = NULL;
    if (!DDS_LongSeq_initialize(&sample->values_ )) {
        return RTI_FALSE;
    }
    if (!DDS_LongSeq_set_maximum(&sample->values_ , (100))) {
        return RTI_FALSE;
    }
    if (!DDS_StringSeq_initialize(&sample->names_ )) {
        return RTI_FALSE;
    }
    if (!DDS_StringSeq_set_maximum(&sample->names_ , (100))) {
        return RTI_FALSE;
    }
    buffer = DDS_StringSeq_get_contiguous_bufferI(&sample->names_);
    if (buffer != NULL) {
        if (!RTICdrType_initStringArray(buffer,
            (100),
            (255)+1,
            RTI_CDR_CHAR_TYPE)) {
            return RTI_FALSE;
        }
    }
    if (!DDS_LongSeq_set_maximum(&sample->bounded_ , (5))) {
        return RTI_FALSE;
    }
    sample->scale_ = 0;
    return RTI_TRUE;
}
";

const PLUGIN_SOURCE: &str = "\
#include <string.h>
#include \"@STEM@Plugin.h\"

void @STEM@PluginSupport_return_data(@STEM@ *sample)
{
    @STEM@_finalize_optional_members(sample, RTI_TRUE);
}

RTIBool
@STEM@Plugin_serialize(
    PRESTypePluginEndpointData endpoint_data,
    const @STEM@ *sample,
    struct RTICdrStream *stream,
    RTIBool serialize_encapsulation,
    RTIEncapsulationId encapsulation_id,
    RTIBool serialize_sample,
    void *endpoint_plugin_qos)
{
    if (serialize_sample) {
        if (!RTICdrStream_serializePrimitiveSequence(
            stream,
            DDS_LongSeq_get_contiguous_bufferI(&sample->values_),
            DDS_LongSeq_get_length(&sample->values_),
            (100),
            RTI_CDR_LONG_TYPE)) {
            return RTI_FALSE;
        }
        if (!RTICdrStream_serializeStringSequence(
            stream,
            DDS_StringSeq_get_contiguous_bufferI(&sample->names_),
            DDS_StringSeq_get_length(&sample->names_),
            (100),
            (255) + 1,
            RTI_CDR_CHAR_TYPE)) {
            return RTI_FALSE;
        }
    }
    return RTI_TRUE;
}

RTIBool
@STEM@Plugin_deserialize_sample(
    PRESTypePluginEndpointData endpoint_data,
    @STEM@ *sample,
    struct RTICdrStream *stream)
{
    void * buffer = NULL;
    {
        RTICdrUnsignedLong sequence_length;
        buffer = DDS_LongSeq_get_contiguous_bufferI(&sample->values_);
        if (!RTICdrStream_deserializePrimitiveSequence(stream, buffer, &sequence_length,
            DDS_LongSeq_get_maximum(&sample->values_), RTI_CDR_LONG_TYPE)) {
            goto fin;
        }
        DDS_LongSeq_set_length(&sample->values_, sequence_length);
    }
    {
        RTICdrUnsignedLong sequence_length;
        buffer = DDS_StringSeq_get_contiguous_bufferI(&sample->names_);
        if (!RTICdrStream_deserializeStringSequence(stream, buffer, &sequence_length,
            DDS_StringSeq_get_maximum(&sample->names_), (255)+1, RTI_CDR_CHAR_TYPE)) {
            goto fin;
        }
        DDS_StringSeq_set_length(&sample->names_, sequence_length);
    }
fin:
    return RTI_TRUE;
}
";

const PLUGIN_HEADER: &str = "\
#ifndef @STEM@Plugin_h
#define @STEM@Plugin_h

#include \"@STEM@.h\"

extern \"C\" {

NDDSUSERDllExport extern RTIBool
@STEM@Plugin_serialize(
    PRESTypePluginEndpointData endpoint_data,
    const @STEM@ *sample,
    struct RTICdrStream *stream,
    RTIBool serialize_encapsulation,
    RTIEncapsulationId encapsulation_id,
    RTIBool serialize_sample,
    void *endpoint_plugin_qos);

}

#endif
";

/// Message source (`<stem>.cxx`) as the vendor emits it.
pub fn message_source(stem: &str) -> String {
    MESSAGE_SOURCE.replace("@STEM@", stem)
}

/// Plugin source (`<stem>Plugin.cxx`) as the vendor emits it.
pub fn plugin_source(stem: &str) -> String {
    PLUGIN_SOURCE.replace("@STEM@", stem)
}

/// Complete plugin header (`<stem>Plugin.h`).
pub fn plugin_header(stem: &str) -> String {
    PLUGIN_HEADER.replace("@STEM@", stem)
}

/// Plugin header cut off before its linkage block.
pub fn truncated_plugin_header(stem: &str) -> String {
    let full = plugin_header(stem);
    let cut = full.find("extern").unwrap_or(full.len());
    full[..cut].to_string()
}

/// Count lines containing `needle`.
pub fn count_lines(text: &str, needle: &str) -> usize {
    text.lines().filter(|l| l.contains(needle)).count()
}

// ============================================================================
// Fake Compiler
// ============================================================================

/// Stand-in for the vendor compiler.
///
/// Writes all six generated files for the IDL stem. The first
/// `incomplete_runs` runs leave out the plugin header.
#[derive(Debug, Default)]
pub struct FakeCompiler {
    pub incomplete_runs: u32,
    pub exit_code: Option<i32>,
    pub runs: Cell<u32>,
}

impl FakeCompiler {
    /// Compiler that succeeds on the first run.
    pub fn reliable() -> Self {
        Self::default()
    }

    /// Compiler whose first `runs` runs produce incomplete output.
    pub fn flaky(runs: u32) -> Self {
        Self {
            incomplete_runs: runs,
            ..Self::default()
        }
    }

    /// Compiler that exits with `code` without writing anything.
    pub fn failing(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            ..Self::default()
        }
    }
}

impl CompilerRunner for FakeCompiler {
    fn run(&self, command: &CompilerCommand) -> Result<CompilerExit, VendorError> {
        let run = self.runs.get() + 1;
        self.runs.set(run);
        if let Some(code) = self.exit_code {
            return Ok(CompilerExit::with_code(code));
        }

        let stem = command.idl_stem().unwrap_or_default().to_string();
        let dir = command.output_dir();
        let write = |name: String, text: String| {
            std::fs::write(dir.join(name), text).unwrap();
        };
        write(format!("{stem}.h"), format!("// {stem}.h\n"));
        write(format!("{stem}.cxx"), message_source(&stem));
        write(format!("{stem}Plugin.cxx"), plugin_source(&stem));
        write(format!("{stem}Support.h"), format!("// {stem}Support.h\n"));
        write(format!("{stem}Support.cxx"), format!("// {stem}Support.cxx\n"));
        if run > self.incomplete_runs {
            write(format!("{stem}Plugin.h"), plugin_header(&stem));
        }
        Ok(CompilerExit::success())
    }
}

// ============================================================================
// Temporary Directories
// ============================================================================

/// Fresh temporary directory unique to this process and `name`.
pub fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "connext_typesupport_{}_{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Removes a directory tree when dropped.
pub struct CleanupGuard(pub PathBuf);

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

/// Write `text` to `dir/relative`, creating parent directories.
pub fn write_file(dir: &Path, relative: &str, text: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, text).unwrap();
    path
}
