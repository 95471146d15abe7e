//! The `sketchc` binary: arguments, outputs and exit status.

use std::path::Path;
use std::process::{Command, Output};

fn sketchc(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sketchc"))
        .args(args)
        .current_dir(cwd)
        .env_remove("SKETCHC_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("run sketchc")
}

#[test]
fn test_compiles_to_stdout() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join("dots.pde"), "void draw() { point(1, 2); }\n")
        .expect("write sketch");

    let output = sketchc(&["dots.pde", "--stdout"], dir.path());
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("$p.point(1, 2);"), "{stdout}");
    assert!(!dir.path().join("dots.js").exists());
}

#[test]
fn test_writes_output_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join("a.pde"), "int a = 1;\n").expect("write sketch");
    std::fs::write(dir.path().join("b.pde"), "int b = 2;\n").expect("write sketch");

    let output = sketchc(&["a.pde", "b.pde", "--out-dir", "build"], dir.path());
    assert_eq!(output.status.code(), Some(0), "{}", String::from_utf8_lossy(&output.stderr));
    let a = std::fs::read_to_string(dir.path().join("build/a.js")).expect("a.js");
    let b = std::fs::read_to_string(dir.path().join("build/b.js")).expect("b.js");
    assert!(a.contains("var a = 1;"), "{a}");
    assert!(b.contains("var b = 2;"), "{b}");
}

#[test]
fn test_exit_status_for_broken_sketch() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join("broken.pde"), "void setup() { (\n").expect("write sketch");

    let output = sketchc(&["broken.pde", "--pretty", "false"], dir.path());
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("broken.pde - error: unbalanced delimiter"), "{stderr}");
}

#[test]
fn test_json_diagnostics() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(
        dir.path().join("shape.pde"),
        "class Shape {\n  void scale(int a) { }\n  void scale(float b) { }\n}\n",
    )
    .expect("write sketch");

    let output = sketchc(
        &["shape.pde", "--stdout", "--diagnostics-json", "--deny-warnings"],
        dir.path(),
    );
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    let line = stderr.lines().next().expect("one diagnostic");
    let value: serde_json::Value = serde_json::from_str(line).expect("json line");
    assert_eq!(value["file"], "shape.pde");
    assert_eq!(value["code"], 3001);
    assert_eq!(value["category"], "error");
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let output = sketchc(&["nope.pde"], dir.path());
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read nope.pde"), "{stderr}");
}
