use std::{
    ffi::{OsStr, OsString},
    fmt::{self, Display},
    path::{Path, PathBuf},
    process::{Command, ExitStatus},
};

use itertools::Itertools;

use crate::{error::LaunchError, Observe};

/// The external analysis tool and the way to obtain it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tool {
    /// Tool built on demand from its cargo manifest
    Cargo {
        /// cargo executable
        cargo: OsString,
        /// Path to the tool's `Cargo.toml`
        manifest: PathBuf,
        /// Build and run with `--release`
        release: bool,
    },
    /// Already built executable
    Program {
        path: PathBuf,
        /// Fixed arguments placed before the composed ones
        args: Vec<OsString>,
    },
}

impl Tool {
    /// Checks that the tool can be started and builds it when it comes from a manifest.
    /// Must succeed before [`Tool::invocation`] is run.
    ///
    /// # Errors
    ///
    /// Returns an error if manifest or executable does not exist,
    /// cargo cannot be started, or the build fails.
    pub fn prepare(&self, observer: &mut dyn Observe) -> Result<(), LaunchError> {
        match self {
            Tool::Cargo {
                cargo, manifest, ..
            } => {
                if !manifest.is_file() {
                    return Err(LaunchError::ManifestNotFound {
                        path: manifest.clone(),
                    });
                }
                let build = Invocation {
                    program: cargo.clone(),
                    args: self.cargo_args("build"),
                };
                observer.building(&build);
                match build.run()? {
                    exitcode::OK => Ok(()),
                    code => Err(LaunchError::Build {
                        manifest: manifest.clone(),
                        code,
                    }),
                }
            }
            Tool::Program { path, .. } => {
                // bare names are looked up in PATH by the OS
                if has_directory(path) && !path.is_file() {
                    Err(LaunchError::ToolNotFound { path: path.clone() })
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Full command line that runs the tool with the arguments given
    #[must_use]
    pub fn invocation(&self, args: Vec<OsString>) -> Invocation {
        match self {
            Tool::Cargo { cargo, .. } => {
                let mut all = self.cargo_args("run");
                all.push("--".into());
                all.extend(args);
                Invocation {
                    program: cargo.clone(),
                    args: all,
                }
            }
            Tool::Program { path, args: leading } => Invocation {
                program: path.clone().into_os_string(),
                args: leading.iter().cloned().chain(args).collect(),
            },
        }
    }

    fn cargo_args(&self, subcommand: &str) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![subcommand.into(), "--quiet".into()];
        if let Tool::Cargo {
            manifest, release, ..
        } = self
        {
            args.push("--manifest-path".into());
            args.push(manifest.clone().into_os_string());
            if *release {
                args.push("--release".into());
            }
        }
        args
    }
}

fn has_directory(path: &Path) -> bool {
    path.parent().is_some_and(|p| !p.as_os_str().is_empty())
}

/// Program with its complete argument list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl Invocation {
    /// Runs the program with standard streams inherited from the launcher
    /// and waits for it to finish. Returns the program's exit code.
    ///
    /// ## Remarks
    /// On Unix a program killed by a signal yields `128 + signal` like a shell does.
    pub fn run(&self) -> Result<i32, LaunchError> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .status()
            .map_err(|source| LaunchError::Spawn {
                program: self.program.to_string_lossy().into_owned(),
                source,
            })?;
        Ok(code_of(status))
    }
}

impl Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(OsStr::to_string_lossy)
            .join(" ");
        write!(f, "{line}")
    }
}

#[cfg(unix)]
fn code_of(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status
        .code()
        .or_else(|| status.signal().map(|s| 128 + s))
        .unwrap_or(exitcode::SOFTWARE)
}

#[cfg(not(unix))]
fn code_of(status: ExitStatus) -> i32 {
    status.code().unwrap_or(exitcode::SOFTWARE)
}
