//! Exit code and output checks for the lucy-filetests binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn lucy_filetests() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_lucy-filetests"));
    cmd.env_remove("LUCY_COMPILER").env("NO_COLOR", "1");
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_missing_argument_exits_1() {
    let output = lucy_filetests().output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Usage"));
}

#[test]
fn test_extra_argument_exits_1() {
    let output = lucy_filetests().args(["a", "b"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_help_exits_0() {
    let output = lucy_filetests().arg("--help").output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("--timeout"));
}

#[test]
fn test_nonexistent_directory_exits_1_without_running() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");

    let output = lucy_filetests().arg(&missing).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("is not a valid directory"));
    assert!(!stdout(&output).contains("Total tests"));
}

#[test]
fn test_empty_directory_exits_0() {
    let dir = tempfile::tempdir().unwrap();
    let output = lucy_filetests().arg(dir.path()).output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Total tests: 0"));
}

#[test]
fn test_no_color_with_any_value_disables_escapes() {
    let dir = tempfile::tempdir().unwrap();
    for value in ["0", "false"] {
        let output = lucy_filetests()
            .env("NO_COLOR", value)
            .arg(dir.path())
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(0));
        assert!(!stdout(&output).contains('\x1b'), "NO_COLOR={value}");
    }
}

#[test]
fn test_same_extensions_exit_1_and_keep_cases() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("f.lc"), "# ret void\n").unwrap();

    let output = lucy_filetests()
        .arg(dir.path())
        .args(["--output-extension", "lc"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("invalid configuration"));
    assert!(dir.path().join("f.lc").exists());
}

/// Copies the expected block of the case into `<case>.ll`, or exits 1 for
/// cases named `broken*`.
#[cfg(unix)]
const FAKE_LUCY: &str = r#"
case "$2" in
    broken*) exit 1 ;;
esac
out="${2%.lc}.ll"
printf '; ModuleID = %s\nsource_filename = %s\n' "$2" "$2" > "$out"
sed -n 's/^# //p' "$2" >> "$out"
"#;

#[cfg(unix)]
fn run_with_fake_compiler(cases: &[(&str, &str)]) -> (Output, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    for (name, source) in cases {
        fs::write(dir.path().join(name), source).unwrap();
    }
    let script = tempfile::NamedTempFile::new().unwrap();
    fs::write(script.path(), FAKE_LUCY).unwrap();

    let output = lucy_filetests()
        .arg(dir.path())
        .args(["--compiler", "sh", "--compiler-arg"])
        .arg(script.path())
        .output()
        .unwrap();
    (output, dir)
}

#[cfg(unix)]
fn artifacts_in(dir: &Path) -> usize {
    fs::read_dir(dir)
        .unwrap()
        .filter(|entry| {
            entry
                .as_ref()
                .unwrap()
                .path()
                .extension()
                .is_some_and(|ext| ext == "ll")
        })
        .count()
}

#[cfg(unix)]
#[test]
fn test_passing_cases_exit_0() {
    let (output, dir) = run_with_fake_compiler(&[
        ("one.lc", "# define i32 @one() {\n#   ret i32 1\n# }\n"),
        ("two.lc", "# define i32 @two() {\n#     ret i32 2\n# }\n"),
    ]);

    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));
    let out = stdout(&output);
    assert!(out.contains("Test successful: one.lc"));
    assert!(out.contains("Test successful: two.lc"));
    assert!(out.contains("Total tests: 2\nPassed: 2\nFailed: 0"));
    assert_eq!(artifacts_in(dir.path()), 0);
}

#[cfg(unix)]
#[test]
fn test_any_failing_case_exits_1() {
    let (output, dir) = run_with_fake_compiler(&[
        ("ok.lc", "# ret void\n"),
        ("broken.lc", "# ret void\n"),
    ]);

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("Error running compiler on broken.lc"));
    assert!(out.contains("Total tests: 2\nPassed: 1\nFailed: 1"));
    assert_eq!(artifacts_in(dir.path()), 0);
}
