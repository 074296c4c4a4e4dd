/*!
A library that finds SCML files under a search root and runs
the sctrace analysis tool over them.

The launcher works in strictly sequential steps:
discover files, compose the argument vector, prepare the tool (building it when needed)
and invoke it. The first failing step stops everything, and the tool's exit code
becomes the launcher's.

## Example: running a prebuilt tool

```no_run
use sclaunch::{launch, Config, Quiet, Tool};
use std::ffi::OsString;

let config = Config {
    tool: Tool::Program {
        path: "target/release/sctrace".into(),
        args: vec![],
    },
    ..Config::default()
};

let code = launch(&config, [OsString::from("--quiet")], &mut Quiet).unwrap_or_else(|e| e.exit_code());
std::process::exit(code);
```
*/

#![warn(unused_extern_crates)]
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

pub mod compose;
pub mod config;
pub mod discover;
pub mod error;
pub mod tool;

pub use compose::compose;
pub use config::Config;
pub use discover::discover;
pub use error::LaunchError;
pub use tool::{Invocation, Tool};

/// Observe receives launcher progress
pub trait Observe {
    /// Called once discovery has finished
    fn discovered(&mut self, root: &Path, suffix: &str, paths: &[PathBuf], elapsed: Duration);
    /// Called before the tool is built from its manifest
    fn building(&mut self, invocation: &Invocation);
    /// Called right before the tool is started
    fn invoking(&mut self, invocation: &Invocation);
}

/// Observer that ignores everything
pub struct Quiet;

impl Observe for Quiet {
    fn discovered(&mut self, _root: &Path, _suffix: &str, _paths: &[PathBuf], _elapsed: Duration) {
    }

    fn building(&mut self, _invocation: &Invocation) {}

    fn invoking(&mut self, _invocation: &Invocation) {}
}

/// `launch` discovers files under the configured root, appends `passthrough`
/// to them and runs the configured tool with the result.
/// Returns the tool's exit code.
///
/// # Errors
///
/// Returns an error if discovery fails, the tool cannot be built or located,
/// or the tool cannot be started. The tool is never started in these cases.
pub fn launch<I>(
    config: &Config,
    passthrough: I,
    observer: &mut dyn Observe,
) -> Result<i32, LaunchError>
where
    I: IntoIterator<Item = OsString>,
{
    let now = Instant::now();
    let paths = discover(&config.root, &config.suffix)?;
    observer.discovered(&config.root, &config.suffix, &paths, now.elapsed());

    let args = compose(paths, passthrough);

    config.tool.prepare(observer)?;

    let invocation = config.tool.invocation(args);
    observer.invoking(&invocation);
    invocation.run()
}
