//! Compiler options.
//!
//! Options are plain data so a host can build them in code or load them
//! from a JSON file (`camelCase` keys, every key optional):
//!
//! ```json
//! { "extraHostMembers": ["fft"], "autogeneratedHeader": false }
//! ```

use serde::{Deserialize, Serialize};
use sketchc_common::HostMembers;
use sketchc_emitter::PrintOptions;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct CompilerOptions {
    /// Names the host runtime provides on top of the standard surface.
    pub extra_host_members: Vec<String>,
    /// Start the output with the autogenerated-code comment.
    pub autogenerated_header: bool,
    /// Remove `/* @pjs */` directive blocks before compiling.
    pub strip_directives: bool,
    /// Report warnings with error severity.
    pub treat_warnings_as_errors: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            extra_host_members: Vec::new(),
            autogenerated_header: true,
            strip_directives: true,
            treat_warnings_as_errors: false,
        }
    }
}

impl CompilerOptions {
    /// Parse options from JSON text.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn host_members(&self) -> HostMembers {
        if self.extra_host_members.is_empty() {
            HostMembers::standard()
        } else {
            HostMembers::with_extra(self.extra_host_members.iter().map(String::as_str))
        }
    }

    pub const fn print_options(&self) -> PrintOptions {
        PrintOptions {
            autogenerated_header: self.autogenerated_header,
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
