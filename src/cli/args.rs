use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the sketchc binary.
#[derive(Parser, Debug)]
#[command(
    name = "sketchc",
    version,
    about = "Transpile Processing sketches into scripts for the $p host runtime"
)]
pub struct CliArgs {
    /// Sketch files to compile (`.pde`).
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Directory for the generated `.js` files. Defaults to each sketch's own directory.
    #[arg(short = 'o', long = "out-dir", conflicts_with = "stdout")]
    pub out_dir: Option<PathBuf>,

    /// Print generated code to stdout instead of writing files.
    #[arg(long)]
    pub stdout: bool,

    /// JSON file with compiler options.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Report diagnostics as JSON lines instead of text.
    #[arg(long = "diagnostics-json")]
    pub diagnostics_json: bool,

    /// Treat warnings as errors.
    #[arg(long = "deny-warnings")]
    pub deny_warnings: bool,

    /// Colorize diagnostics (auto-detected when omitted).
    #[arg(long, value_name = "BOOL")]
    pub pretty: Option<bool>,
}
