#![cfg(unix)]

use std::{
    fs,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
    process::{Command, Output},
    sync::OnceLock,
};

use tempfile::TempDir;
use test_case::test_case;

const TOOL_SCRIPT: &str = r#"#!/bin/sh
printf '%s\n' "$@" > "$TOOL_OUT"
exit "${TOOL_EXIT:-0}"
"#;

/// Fake analysis tool that records its arguments.
/// Written once before any test spawns a process
fn tool() -> &'static Path {
    static TOOL: OnceLock<PathBuf> = OnceLock::new();
    TOOL.get_or_init(|| {
        let path = Path::new(env!("CARGO_TARGET_TMPDIR")).join("fake-sctrace");
        fs::write(&path, TOOL_SCRIPT).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    })
}

struct Fixture {
    root: TempDir,
    out: TempDir,
}

impl Fixture {
    fn new(files: &[&str]) -> Self {
        let root = tempfile::tempdir().unwrap();
        for f in files {
            let path = root.path().join(f);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }
        Self {
            root,
            out: tempfile::tempdir().unwrap(),
        }
    }

    fn out(&self) -> PathBuf {
        self.out.path().join("args")
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_scrun"));
        cmd.args(args)
            .env_remove("SCRUN_SUFFIX")
            .env_remove("SCRUN_MANIFEST")
            .env_remove("SCRUN_RELEASE")
            .env_remove("SCRUN_VERBOSE")
            .env("SCRUN_ROOT", self.root.path())
            .env("SCRUN_TOOL", tool())
            .env("TOOL_OUT", self.out());
        cmd
    }

    fn received(&self) -> Vec<String> {
        fs::read_to_string(self.out())
            .unwrap()
            .lines()
            .map(|l| {
                Path::new(l)
                    .strip_prefix(self.root.path())
                    .map_or_else(|_| l.to_owned(), |p| p.to_string_lossy().into_owned())
            })
            .collect()
    }
}

fn run(cmd: &mut Command) -> Output {
    cmd.output().unwrap()
}

#[test]
fn scml_files_then_passthrough() {
    // Arrange
    let fixture = Fixture::new(&["fs/open.scml", "fs/read.scml", "net/socket.scml", "net/README.md"]);

    // Act
    let output = run(&mut fixture.command(&["--verbose", "--", "-o", "out.json"]));

    // Assert
    assert!(output.status.success(), "{output:?}");
    assert_eq!(
        fixture.received(),
        vec![
            "fs/open.scml",
            "fs/read.scml",
            "net/socket.scml",
            "--verbose",
            "--",
            "-o",
            "out.json"
        ]
    );
}

#[test_case(0 ; "success")]
#[test_case(1 ; "failure")]
#[test_case(2 ; "usage")]
#[test_case(127 ; "not found")]
fn tool_exit_code_propagated(code: i32) {
    // Arrange
    let fixture = Fixture::new(&["a.scml"]);

    // Act
    let output = run(fixture.command(&[]).env("TOOL_EXIT", code.to_string()));

    // Assert
    assert_eq!(output.status.code(), Some(code));
}

#[test]
fn empty_root_passes_only_arguments() {
    // Arrange
    let fixture = Fixture::new(&["notes.txt"]);

    // Act
    let output = run(&mut fixture.command(&["--help"]));

    // Assert
    assert!(output.status.success());
    assert_eq!(fixture.received(), vec!["--help"]);
}

#[test]
fn suffix_configurable() {
    // Arrange
    let fixture = Fixture::new(&["a.ext", "b.ext", "c.txt"]);

    // Act
    let output = run(fixture.command(&["--verbose"]).env("SCRUN_SUFFIX", ".ext"));

    // Assert
    assert!(output.status.success());
    assert_eq!(fixture.received(), vec!["a.ext", "b.ext", "--verbose"]);
}

#[test]
fn missing_root_fails_without_invoking() {
    // Arrange
    let fixture = Fixture::new(&[]);
    let absent = fixture.root.path().join("absent");

    // Act
    let output = run(fixture.command(&[]).env("SCRUN_ROOT", &absent));

    // Assert
    assert_eq!(output.status.code(), Some(66));
    assert!(!fixture.out().exists());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
}

#[test]
fn missing_tool_fails_without_invoking() {
    // Arrange
    let fixture = Fixture::new(&["a.scml"]);
    let absent = fixture.root.path().join("bin/sctrace");

    // Act
    let output = run(fixture.command(&[]).env("SCRUN_TOOL", &absent));

    // Assert
    assert_eq!(output.status.code(), Some(127));
    assert!(!fixture.out().exists());
}

#[test]
fn missing_manifest_fails_without_building() {
    // Arrange
    let fixture = Fixture::new(&["a.scml"]);
    let manifest = fixture.root.path().join("sctrace/Cargo.toml");

    // Act
    let output = run(fixture
        .command(&[])
        .env_remove("SCRUN_TOOL")
        .env("SCRUN_MANIFEST", &manifest));

    // Assert
    assert_eq!(output.status.code(), Some(72));
    assert!(!fixture.out().exists());
}

#[test]
fn verbose_reports_progress_on_stderr() {
    // Arrange
    let fixture = Fixture::new(&["a.scml", "b.scml"]);

    // Act
    let output = run(fixture.command(&[]).env("SCRUN_VERBOSE", "1"));

    // Assert
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("2 *.scml files"), "{stderr}");
    assert!(stderr.contains("fake-sctrace"), "{stderr}");
    assert!(output.stdout.is_empty());
}
