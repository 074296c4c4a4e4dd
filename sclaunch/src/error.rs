use std::{io, path::PathBuf};

use miette::Diagnostic;
use thiserror::Error;

/// Exit code a POSIX shell reports when a command cannot be found
pub const COMMAND_NOT_FOUND: exitcode::ExitCode = 127;
/// Exit code a POSIX shell reports when a command is found but cannot be executed
pub const COMMAND_NOT_EXECUTABLE: exitcode::ExitCode = 126;

/// Everything that can stop the launcher before the tool runs.
///
/// A nonzero exit of the tool itself is not an error: it is returned
/// as the launcher's exit code.
#[derive(Debug, Error, Diagnostic)]
pub enum LaunchError {
    #[error("Search root {} does not exist", .path.display())]
    #[diagnostic(
        code(scrun::root),
        help("Set SCRUN_ROOT to the directory that holds the SCML files")
    )]
    RootNotFound { path: PathBuf },

    #[error("Search root {} is not a directory", .path.display())]
    #[diagnostic(
        code(scrun::root),
        help("Set SCRUN_ROOT to the directory that holds the SCML files")
    )]
    RootNotDirectory { path: PathBuf },

    #[error("Search root {} cannot be read", .path.display())]
    #[diagnostic(code(scrun::root))]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to walk {}", .path.display())]
    #[diagnostic(code(scrun::walk), help("Check permissions of the directory tree"))]
    Walk {
        path: PathBuf,
        #[source]
        source: jwalk::Error,
    },

    #[error("Tool manifest {} not found", .path.display())]
    #[diagnostic(
        code(scrun::manifest),
        help("Set SCRUN_MANIFEST to the tool's Cargo.toml or SCRUN_TOOL to a built executable")
    )]
    ManifestNotFound { path: PathBuf },

    #[error("Tool executable {} not found", .path.display())]
    #[diagnostic(code(scrun::tool), help("Set SCRUN_TOOL to an existing executable"))]
    ToolNotFound { path: PathBuf },

    #[error("Failed to start {program}")]
    #[diagnostic(code(scrun::spawn))]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Building the tool from {} failed with exit code {code}", .manifest.display())]
    #[diagnostic(code(scrun::build), help("Fix the build errors reported above"))]
    Build { manifest: PathBuf, code: i32 },
}

impl LaunchError {
    /// Exit code the launcher terminates with when this error occurs
    #[must_use]
    pub fn exit_code(&self) -> exitcode::ExitCode {
        match self {
            LaunchError::RootNotFound { .. } | LaunchError::RootNotDirectory { .. } => {
                exitcode::NOINPUT
            }
            LaunchError::RootUnreadable { .. } | LaunchError::Walk { .. } => exitcode::IOERR,
            LaunchError::ManifestNotFound { .. } => exitcode::OSFILE,
            LaunchError::ToolNotFound { .. } => COMMAND_NOT_FOUND,
            LaunchError::Spawn { source, .. } => match source.kind() {
                io::ErrorKind::NotFound => COMMAND_NOT_FOUND,
                io::ErrorKind::PermissionDenied => COMMAND_NOT_EXECUTABLE,
                _ => exitcode::OSERR,
            },
            LaunchError::Build { code, .. } if *code != 0 => *code,
            LaunchError::Build { .. } => exitcode::SOFTWARE,
        }
    }
}
