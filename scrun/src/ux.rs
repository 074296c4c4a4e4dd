use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use crossterm::style::Stylize;
use sclaunch::{Invocation, Observe};

/// Prints launcher progress. Used when `SCRUN_VERBOSE` is on
pub struct Verbose<W: Write> {
    out: W,
}

impl Verbose<io::Stderr> {
    #[must_use]
    pub fn new() -> Self {
        Self { out: io::stderr() }
    }
}

impl Default for Verbose<io::Stderr> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Verbose<W> {
    #[must_use]
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Observe for Verbose<W> {
    fn discovered(&mut self, root: &Path, suffix: &str, paths: &[PathBuf], elapsed: Duration) {
        // whole milliseconds are enough here
        let millis = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        let duration = humantime::format_duration(Duration::from_millis(millis));
        let _ = writeln!(
            self.out,
            " {} {} *{suffix} files under {} in {duration}",
            "found:".green().bold(),
            paths.len(),
            root.display(),
        );
    }

    fn building(&mut self, invocation: &Invocation) {
        let _ = writeln!(self.out, " {} {invocation}", "building:".yellow().bold());
    }

    fn invoking(&mut self, invocation: &Invocation) {
        let _ = writeln!(self.out, " {} {invocation}", "running:".cyan().bold());
    }
}
