// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI integration tests.
//!
//! These tests run the actual connext-typesupport binary and verify its
//! behavior.

mod common;

use std::{
    path::{Path, PathBuf},
    process::{Command, Output},
};

use common::{count_lines, message_source, temp_dir, write_file, CleanupGuard, FOO_MSG};

/// Get the path to the built connext-typesupport binary
fn cli_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    // The test binary is in target/debug/deps/
    // The CLI binary is in target/debug/
    path.pop(); // deps
    path.pop(); // debug or release
    path.push("connext-typesupport");
    path
}

/// Run the CLI with arguments
fn run(args: &[&str]) -> Output {
    let bin = cli_bin();
    Command::new(&bin)
        .args(args)
        .output()
        .unwrap_or_else(|_| panic!("Failed to run {:?}", bin))
}

/// Run the CLI and assert success
fn run_ok(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        output.status.success(),
        "Command failed: {:?}\nstdout: {}\nstderr: {}",
        args,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and assert failure
fn run_err(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        !output.status.success(),
        "Command should have failed but succeeded: {:?}",
        args
    );
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_cli_help() {
    let output = run_ok(&["--help"]);
    assert!(output.contains("generate"));
    assert!(output.contains("call-idl-pp"));
    assert!(output.contains("patch"));
    assert!(output.contains("classify"));
    assert!(output.contains("apply-diff"));
}

#[test]
fn test_cli_unknown_subcommand() {
    let stderr = run_err(&["frobnicate"]);
    assert!(stderr.contains("frobnicate"));
}

// ============================================================================
// Classify
// ============================================================================

#[test]
fn test_classify_json() {
    let dir = temp_dir("cli_classify");
    let _guard = CleanupGuard(dir.clone());
    let msg = write_file(&dir, "test_msgs/msg/Foo.msg", FOO_MSG);

    let stdout = run_ok(&["classify", path_str(&msg), "--json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    let messages = value.as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["message"], "test_msgs/msg/Foo");
    let fields = messages[0]["unbounded_fields"].as_array().unwrap();
    let names: Vec<&str> = fields.iter().map(|f| f["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["values", "names"]);
    assert_eq!(fields[1]["string_sequence"], true);
}

#[test]
fn test_classify_service_lists_both_messages() {
    let dir = temp_dir("cli_classify_srv");
    let _guard = CleanupGuard(dir.clone());
    let srv = write_file(&dir, "test_srvs/srv/Query.srv", "string[] keys\n---\nint64[] ids\n");

    let stdout = run_ok(&["classify", path_str(&srv)]);
    assert!(stdout.contains("Query_Request"));
    assert!(stdout.contains("keys"));
    assert!(stdout.contains("Query_Response"));
    assert!(stdout.contains("ids"));
}

// ============================================================================
// Patch
// ============================================================================

#[test]
fn test_patch_message() {
    let dir = temp_dir("cli_patch_message");
    let _guard = CleanupGuard(dir.clone());
    let msg = write_file(&dir, "test_msgs/msg/Foo.msg", FOO_MSG);
    let source = write_file(&dir, "out/Foo_.cxx", &message_source("Foo_"));

    let stdout = run_ok(&[
        "patch",
        "message",
        path_str(&source),
        "--interface",
        path_str(&msg),
        "--json",
    ]);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["rules_applied"][0], "set-maximum");

    let text = std::fs::read_to_string(&source).unwrap();
    assert_eq!(count_lines(&text, "/* ROSIDL */"), 3);
}

#[test]
fn test_patch_plugin_rejects_non_plugin_file() {
    let dir = temp_dir("cli_patch_plugin_name");
    let _guard = CleanupGuard(dir.clone());
    let msg = write_file(&dir, "test_msgs/msg/Foo.msg", FOO_MSG);
    let source = write_file(&dir, "out/Foo_.cxx", &message_source("Foo_"));

    let stderr = run_err(&[
        "patch",
        "plugin",
        path_str(&source),
        "--interface",
        path_str(&msg),
    ]);
    assert!(stderr.contains("not a plugin source"));
}

#[test]
fn test_patch_unknown_message() {
    let dir = temp_dir("cli_patch_unknown");
    let _guard = CleanupGuard(dir.clone());
    let msg = write_file(&dir, "test_msgs/msg/Foo.msg", FOO_MSG);
    let source = write_file(&dir, "out/Bar_.cxx", &message_source("Bar_"));

    let stderr = run_err(&[
        "patch",
        "message",
        path_str(&source),
        "--interface",
        path_str(&msg),
    ]);
    assert!(stderr.contains("does not define message Bar"));
}

// ============================================================================
// Apply Diff
// ============================================================================

#[test]
fn test_apply_diff_forward_and_revert() {
    let dir = temp_dir("cli_apply_diff");
    let _guard = CleanupGuard(dir.clone());
    let input = write_file(&dir, "a.txt", "one\ntwo\nthree\n");
    let diff = write_file(
        &dir,
        "a.diff",
        "--- a.txt\n+++ a.txt\n@@ -1,3 +1,3 @@\n one\n-two\n+TWO\n three\n",
    );
    let out = dir.join("b.txt");

    run_ok(&[
        "apply-diff",
        "--input",
        path_str(&input),
        "--patch",
        path_str(&diff),
        "--out",
        path_str(&out),
    ]);
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "one\nTWO\nthree\n");

    run_ok(&[
        "apply-diff",
        "--input",
        path_str(&out),
        "--patch",
        path_str(&diff),
        "--out",
        path_str(&out),
        "--revert",
    ]);
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "one\ntwo\nthree\n");
}

#[test]
fn test_apply_diff_mismatched_lists() {
    let dir = temp_dir("cli_apply_diff_mismatch");
    let _guard = CleanupGuard(dir.clone());
    let input = write_file(&dir, "a.txt", "one\n");
    let diff = write_file(&dir, "a.diff", "@@ -1 +1 @@\n-one\n+uno\n");

    let stderr = run_err(&[
        "apply-diff",
        "--input",
        path_str(&input),
        path_str(&input),
        "--patch",
        path_str(&diff),
        "--out",
        path_str(&input),
    ]);
    assert!(stderr.contains("same number of files"));
    assert_eq!(std::fs::read_to_string(&input).unwrap(), "one\n");
}

// ============================================================================
// Vendor Compiler (shell stand-ins)
// ============================================================================

#[cfg(unix)]
mod vendor {
    use super::*;
    use super::common::{plugin_header, plugin_source, truncated_plugin_header};
    use std::os::unix::fs::PermissionsExt;

    /// Write an executable shell script that copies `template`'s files into
    /// the `-d` directory, renaming `@STEM@` to the IDL stem.
    fn fake_compiler(dir: &Path, template: &Path) -> PathBuf {
        let script = format!(
            "#!/bin/sh\n\
             out=\"\"\n\
             while [ $# -gt 1 ]; do\n\
             \x20 if [ \"$1\" = \"-d\" ]; then out=\"$2\"; shift; fi\n\
             \x20 shift\n\
             done\n\
             stem=$(basename \"$1\" .idl)\n\
             for f in \"{template}\"/*; do\n\
             \x20 name=$(basename \"$f\" | sed \"s/@STEM@/$stem/\")\n\
             \x20 cp \"$f\" \"$out/$name\"\n\
             done\n",
            template = template.display()
        );
        let path = dir.join("rtiddsgen");
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn template(dir: &Path, header: &str) -> PathBuf {
        let template = dir.join("template");
        write_file(&template, "@STEM@.h", "// header\n");
        write_file(&template, "@STEM@.cxx", &message_source("Foo_"));
        write_file(&template, "@STEM@Plugin.h", header);
        write_file(&template, "@STEM@Plugin.cxx", &plugin_source("Foo_"));
        write_file(&template, "@STEM@Support.h", "// support\n");
        write_file(&template, "@STEM@Support.cxx", "// support\n");
        template
    }

    #[test]
    fn test_call_idl_pp_succeeds() {
        let dir = temp_dir("cli_call_idl_pp_ok");
        let _guard = CleanupGuard(dir.clone());
        let compiler = fake_compiler(&dir, &template(&dir, &plugin_header("Foo_")));
        let idl = write_file(&dir, "Foo_.idl", "struct Foo_ {};");
        let out = dir.join("gen");

        run_ok(&[
            "call-idl-pp",
            "--idl-pp",
            path_str(&compiler),
            "--idl-file",
            path_str(&idl),
            "-d",
            path_str(&out),
        ]);
        assert!(out.join("Foo_Plugin.h").is_file());
    }

    #[test]
    fn test_call_idl_pp_exhausted() {
        let dir = temp_dir("cli_call_idl_pp_exhausted");
        let _guard = CleanupGuard(dir.clone());
        let compiler = fake_compiler(&dir, &template(&dir, &truncated_plugin_header("Foo_")));
        let idl = write_file(&dir, "Foo_.idl", "struct Foo_ {};");
        let out = dir.join("gen");

        let output = run(&[
            "call-idl-pp",
            "--idl-pp",
            path_str(&compiler),
            "--idl-file",
            path_str(&idl),
            "-d",
            path_str(&out),
            "--max-tries",
            "2",
        ]);
        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Could not successfully generate Connext serialized data"));
        assert!(stderr.contains("Retrying 2/2"));
    }

    #[test]
    fn test_generate_package() {
        let dir = temp_dir("cli_generate");
        let _guard = CleanupGuard(dir.clone());
        let compiler = fake_compiler(&dir, &template(&dir, &plugin_header("Foo_")));
        let idl = write_file(&dir, "idl/test_msgs/msg/Foo_.idl", "struct Foo_ {};");
        let msg = write_file(&dir, "src/test_msgs/msg/Foo.msg", FOO_MSG);
        let out = dir.join("out");

        let stdout = run_ok(&[
            "generate",
            "--package",
            "test_msgs",
            "--idl-base",
            path_str(&dir.join("idl")),
            "--output",
            path_str(&out),
            "--interface",
            path_str(&msg),
            "--idl-pp",
            path_str(&compiler),
            "--json",
            path_str(&idl),
        ]);
        let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(report["package"], "test_msgs");
        assert_eq!(report["files"][0]["attempts"], 1);

        let plugin = std::fs::read_to_string(out.join("test_msgs/msg/Foo_Plugin.cxx")).unwrap();
        assert!(plugin.contains("untyped_sample"));
    }
}
