use super::args::CliArgs;
use super::driver::{ExitStatus, compile_files, load_options, output_path, run};
use crate::CompilerOptions;
use clap::Parser;
use std::path::{Path, PathBuf};

fn args(list: &[&str]) -> CliArgs {
    let mut argv = vec!["sketchc"];
    argv.extend_from_slice(list);
    CliArgs::try_parse_from(argv).expect("valid args")
}

fn run_to_strings(args: &CliArgs) -> (ExitStatus, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let status = run(args, false, &mut out, &mut err).expect("runs");
    (
        status,
        String::from_utf8(out).expect("utf8"),
        String::from_utf8(err).expect("utf8"),
    )
}

#[test]
fn test_output_path() {
    assert_eq!(
        output_path(Path::new("sketches/ball.pde"), None),
        PathBuf::from("sketches/ball.js")
    );
    assert_eq!(
        output_path(Path::new("sketches/ball.pde"), Some(Path::new("out"))),
        PathBuf::from("out/ball.js")
    );
}

#[test]
fn test_writes_js_next_to_sketch() {
    let dir = tempfile::tempdir().expect("temp dir");
    let sketch = dir.path().join("ball.pde");
    std::fs::write(&sketch, "void draw() { background(0); }\n").expect("write sketch");

    let args = args(&[sketch.to_str().expect("utf8 path")]);
    let (status, out, err) = run_to_strings(&args);
    assert_eq!(status, ExitStatus::Success, "{err}");
    assert!(out.is_empty());

    let code = std::fs::read_to_string(dir.path().join("ball.js")).expect("output written");
    assert!(code.contains("$p.background(0);"), "{code}");
}

#[test]
fn test_out_dir_and_stdout() {
    let dir = tempfile::tempdir().expect("temp dir");
    let sketch = dir.path().join("a.pde");
    std::fs::write(&sketch, "int x = 1;\n").expect("write sketch");
    let out_dir = dir.path().join("build");

    let (status, _, _) = run_to_strings(&args(&[
        sketch.to_str().expect("utf8 path"),
        "--out-dir",
        out_dir.to_str().expect("utf8 path"),
    ]));
    assert_eq!(status, ExitStatus::Success);
    assert!(out_dir.join("a.js").exists());

    let (status, out, _) = run_to_strings(&args(&[sketch.to_str().expect("utf8 path"), "--stdout"]));
    assert_eq!(status, ExitStatus::Success);
    assert!(out.contains("var x = 1;"), "{out}");
}

#[test]
fn test_structural_failure_exit_status() {
    let dir = tempfile::tempdir().expect("temp dir");
    let broken = dir.path().join("broken.pde");
    std::fs::write(&broken, "void setup() {\n").expect("write sketch");
    let fine = dir.path().join("fine.pde");
    std::fs::write(&fine, "int x = 1;\n").expect("write sketch");

    let (status, _, err) = run_to_strings(&args(&[
        broken.to_str().expect("utf8 path"),
        fine.to_str().expect("utf8 path"),
    ]));
    assert_eq!(status, ExitStatus::CompileFailure);
    assert_eq!(status.code(), 2);
    assert!(err.contains("broken.pde - error: unbalanced delimiter"), "{err}");
    assert!(!broken.with_extension("js").exists());
    assert!(fine.with_extension("js").exists(), "other files are still written");
}

#[test]
fn test_deny_warnings_turns_warnings_into_failures() {
    let dir = tempfile::tempdir().expect("temp dir");
    let sketch = dir.path().join("shape.pde");
    std::fs::write(
        &sketch,
        "class Shape {\n  void scale(int a) { }\n  void scale(float b) { }\n}\n",
    )
    .expect("write sketch");
    let path = sketch.to_str().expect("utf8 path");

    let (status, _, err) = run_to_strings(&args(&[path, "--stdout"]));
    assert_eq!(status, ExitStatus::Success);
    assert!(err.contains("warning SK3001"), "{err}");

    let (status, _, err) = run_to_strings(&args(&[path, "--stdout", "--deny-warnings"]));
    assert_eq!(status, ExitStatus::DiagnosticsWithErrors);
    assert!(err.contains("error SK3001"), "{err}");
}

#[test]
fn test_config_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = dir.path().join("sketchc.json");
    std::fs::write(&config, r#"{ "autogeneratedHeader": false, "extraHostMembers": ["fft"] }"#)
        .expect("write config");

    let options = load_options(&args(&["x.pde", "--config", config.to_str().expect("utf8 path")]))
        .expect("config loads");
    assert!(!options.autogenerated_header);
    assert_eq!(options.extra_host_members, ["fft"]);

    std::fs::write(&config, "{ not json").expect("write config");
    let error = load_options(&args(&["x.pde", "--config", config.to_str().expect("utf8 path")]))
        .expect_err("invalid config");
    assert!(format!("{error:#}").contains("invalid config"), "{error:#}");
}

#[test]
fn test_missing_file_is_an_error() {
    let result = compile_files(&[PathBuf::from("/nonexistent/sketch.pde")], &CompilerOptions::default());
    let error = result.expect_err("missing file");
    assert!(format!("{error:#}").contains("failed to read"), "{error:#}");
}

#[test]
fn test_parallel_compilation_keeps_input_order() {
    let dir = tempfile::tempdir().expect("temp dir");
    let inputs: Vec<PathBuf> = (0..8)
        .map(|i| {
            let path = dir.path().join(format!("s{i}.pde"));
            std::fs::write(&path, format!("int value{i} = {i};\n")).expect("write sketch");
            path
        })
        .collect();

    let outcomes = compile_files(&inputs, &CompilerOptions::default()).expect("compiles");
    for (i, outcome) in outcomes.iter().enumerate() {
        assert_eq!(outcome.input, inputs[i]);
        let output = outcome.result.as_ref().expect("compiles");
        assert!(output.code.contains(&format!("var value{i} = {i};")), "{}", output.code);
    }
}
