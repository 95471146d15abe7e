#![allow(clippy::print_stderr)]

use clap::Parser;
use std::io::{IsTerminal, Write};

use sketchc::cli::args::CliArgs;
use sketchc::cli::driver::{self, ExitStatus};

fn main() {
    // Initialize tracing if SKETCHC_LOG or RUST_LOG is set (zero cost otherwise).
    sketchc::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let color = args
        .pretty
        .unwrap_or_else(|| std::io::stderr().is_terminal());

    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr().lock();
    let status = match driver::run(&args, color, &mut stdout, &mut stderr) {
        Ok(status) => status,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitStatus::CompileFailure
        }
    };
    let _ = stdout.flush();
    drop(stderr);
    std::process::exit(status.code());
}
