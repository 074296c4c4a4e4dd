#![warn(unused_extern_crates)]
pub mod ux;

use std::ffi::OsString;

use sclaunch::{Config, LaunchError, Quiet};

use crate::ux::Verbose;

/// Runs the launcher with the configuration given and returns
/// the exit code the process must terminate with
pub fn run<I>(config: &Config, passthrough: I) -> i32
where
    I: IntoIterator<Item = OsString>,
{
    let result = if config.verbose {
        sclaunch::launch(config, passthrough, &mut Verbose::new())
    } else {
        sclaunch::launch(config, passthrough, &mut Quiet)
    };
    result.unwrap_or_else(report)
}

fn report(error: LaunchError) -> i32 {
    let code = error.exit_code();
    eprintln!("{:?}", miette::Report::new(error));
    code
}
