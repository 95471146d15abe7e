//! Compiles the files named on the command line.

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info_span;

use super::args::CliArgs;
use super::reporter::Reporter;
use crate::{CompileError, CompileOutput, CompilerOptions, compile};

/// Process exit status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    /// At least one file reported an error diagnostic.
    DiagnosticsWithErrors = 1,
    /// At least one file could not be compiled at all.
    CompileFailure = 2,
}

impl ExitStatus {
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Result for one input file.
#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub result: Result<CompileOutput, CompileError>,
}

/// Options from `--config` (if any), with command-line overrides applied.
pub fn load_options(args: &CliArgs) -> Result<CompilerOptions> {
    let mut options = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            CompilerOptions::from_json(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => CompilerOptions::default(),
    };
    if args.deny_warnings {
        options.treat_warnings_as_errors = true;
    }
    Ok(options)
}

/// `<out_dir or input dir>/<stem>.js`.
pub fn output_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let file_name = input.with_extension("js");
    match (out_dir, file_name.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => file_name,
    }
}

/// Read and compile every file, in parallel. Each compilation is
/// independent; the outcomes keep the input order.
pub fn compile_files(inputs: &[PathBuf], options: &CompilerOptions) -> Result<Vec<FileOutcome>> {
    let _span = info_span!("compile_files", files = inputs.len()).entered();
    inputs
        .par_iter()
        .map(|input| -> Result<FileOutcome> {
            let source = std::fs::read_to_string(input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            Ok(FileOutcome {
                input: input.clone(),
                result: compile(&source, options),
            })
        })
        .collect()
}

fn write_outputs(outputs: &[(PathBuf, &str)]) -> Result<()> {
    outputs.par_iter().try_for_each(|(path, code)| -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        std::fs::write(path, code).with_context(|| format!("failed to write {}", path.display()))
    })
}

/// Run a whole invocation. Generated code (with `--stdout`) goes to `out`,
/// diagnostics to `err`.
pub fn run(
    args: &CliArgs,
    color: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<ExitStatus> {
    let options = load_options(args)?;
    let outcomes = compile_files(&args.files, &options)?;
    let reporter = Reporter::new(color, args.diagnostics_json);

    let mut status = ExitStatus::Success;
    let mut outputs = Vec::new();
    let mut seen = FxHashSet::default();
    for outcome in &outcomes {
        match &outcome.result {
            Ok(output) => {
                if !output.diagnostics.is_empty() {
                    writeln!(err, "{}", reporter.render(&outcome.input, &output.diagnostics))?;
                }
                if output.has_errors() && status == ExitStatus::Success {
                    status = ExitStatus::DiagnosticsWithErrors;
                }
                if args.stdout {
                    writeln!(out, "{}", output.code)?;
                    continue;
                }
                let path = output_path(&outcome.input, args.out_dir.as_deref());
                if !seen.insert(path.clone()) {
                    bail!("two inputs would both be written to {}", path.display());
                }
                outputs.push((path, output.code.as_str()));
            }
            Err(error) => {
                writeln!(err, "{}", reporter.format_failure(&outcome.input, &error.to_string()))?;
                status = ExitStatus::CompileFailure;
            }
        }
    }

    write_outputs(&outputs)?;
    Ok(status)
}
