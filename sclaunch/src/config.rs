use std::{ffi::OsString, path::PathBuf};

use crate::tool::Tool;

/// Directory searched for SCML files
pub const DEFAULT_ROOT: &str = "test/syscall";
/// File name suffix of SCML files
pub const DEFAULT_SUFFIX: &str = ".scml";
/// Manifest the tool is built from when no executable is given
pub const DEFAULT_MANIFEST: &str = "tools/sctrace/Cargo.toml";
/// cargo executable used when `CARGO` is not set
pub const DEFAULT_CARGO: &str = "cargo";

pub const ROOT_VAR: &str = "SCRUN_ROOT";
pub const SUFFIX_VAR: &str = "SCRUN_SUFFIX";
pub const MANIFEST_VAR: &str = "SCRUN_MANIFEST";
pub const TOOL_VAR: &str = "SCRUN_TOOL";
pub const RELEASE_VAR: &str = "SCRUN_RELEASE";
pub const VERBOSE_VAR: &str = "SCRUN_VERBOSE";
pub const CARGO_VAR: &str = "CARGO";

/// Launcher settings.
///
/// Every command line argument goes to the tool untouched,
/// so settings are read from the environment instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Search root
    pub root: PathBuf,
    /// Suffix filter
    pub suffix: String,
    pub tool: Tool,
    /// Print launcher diagnostics to stderr
    pub verbose: bool,
}

impl Config {
    /// Reads settings from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Reads settings using the lookup function given.
    /// Unset and empty variables fall back to defaults.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let flag = |key: &str| get(key).is_some_and(|v| is_on(&v.to_string_lossy()));

        let tool = if let Some(path) = get(TOOL_VAR) {
            Tool::Program {
                path: PathBuf::from(path),
                args: vec![],
            }
        } else {
            Tool::Cargo {
                cargo: get(CARGO_VAR).unwrap_or_else(|| DEFAULT_CARGO.into()),
                manifest: get(MANIFEST_VAR).map_or_else(|| DEFAULT_MANIFEST.into(), PathBuf::from),
                release: flag(RELEASE_VAR),
            }
        };

        Self {
            root: get(ROOT_VAR).map_or_else(|| DEFAULT_ROOT.into(), PathBuf::from),
            suffix: get(SUFFIX_VAR)
                .map_or_else(|| DEFAULT_SUFFIX.to_owned(), |v| v.to_string_lossy().into_owned()),
            tool,
            verbose: flag(VERBOSE_VAR),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn is_on(value: &str) -> bool {
    ["1", "true", "yes", "on"]
        .iter()
        .any(|v| value.trim().eq_ignore_ascii_case(v))
}
