//! Integration tests for ipsetctl.
//!
//! A shell script stands in for the ipset executable. It records its
//! arguments (one per line) next to itself and exits with a fixed status.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Mutex, MutexGuard};

use ipsetctl::{Ipset, IpsetError, IPV6, SUPPRESS_ERRORS};
use tempfile::TempDir;

static SERIAL: Mutex<()> = Mutex::new(());

/// Tests that write and exec fake scripts run one at a time, so no
/// concurrent fork can hold a write handle to a script (ETXTBSY).
fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

/// Fake ipset that writes `stdout`/`stderr` and exits with `code`.
struct FakeIpset {
    dir: TempDir,
}

impl FakeIpset {
    fn new(code: i32, stdout: &str, stderr: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let script = format!(
            "#!/bin/sh\n\
             printf '%s\\n' \"$@\" > \"$(dirname \"$0\")/args\"\n\
             printf '{}'\n\
             printf '{}' >&2\n\
             exit {}\n",
            stdout, stderr, code
        );
        let path = dir.path().join("ipset");
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        Self { dir }
    }

    fn path(&self) -> PathBuf {
        self.dir.path().join("ipset")
    }

    fn handle(&self) -> Ipset {
        Ipset::with_path(self.path())
    }

    /// Arguments of the last invocation, without the program name.
    fn recorded_args(&self) -> Vec<String> {
        fs::read_to_string(self.dir.path().join("args"))
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }
}

#[test]
fn test_create_issues_exact_args() {
    let _guard = serial();
    let fake = FakeIpset::new(0, "", "");
    fake.handle().create("myset", "hash:ip", &[]).unwrap();
    assert_eq!(fake.recorded_args(), vec!["create", "myset", "hash:ip"]);
}

#[test]
fn test_add_appends_options_in_order() {
    let _guard = serial();
    let fake = FakeIpset::new(0, "", "");
    fake.handle()
        .add("myset", "10.0.0.1", &[SUPPRESS_ERRORS, IPV6, "timeout", "30"])
        .unwrap();
    assert_eq!(
        fake.recorded_args(),
        vec!["add", "myset", "10.0.0.1", "-!", "-6", "timeout", "30"]
    );
}

#[test]
fn test_del_and_flush() {
    let _guard = serial();
    let fake = FakeIpset::new(0, "", "");
    let ipset = fake.handle();

    ipset.del("myset", "10.0.0.1", &[]).unwrap();
    assert_eq!(fake.recorded_args(), vec!["del", "myset", "10.0.0.1"]);

    ipset.flush("myset").unwrap();
    assert_eq!(fake.recorded_args(), vec!["flush", "myset"]);
}

#[test]
fn test_set_exists_true_on_success() {
    let _guard = serial();
    let fake = FakeIpset::new(0, "Name: myset\\n", "");
    assert!(fake.handle().set_exists("myset").unwrap());
    assert_eq!(fake.recorded_args(), vec!["list", "myset"]);
}

#[test]
fn test_set_exists_false_on_exit_one() {
    let _guard = serial();
    let fake = FakeIpset::new(1, "", "set myset does not exist\\n");
    assert!(!fake.handle().set_exists("myset").unwrap());
}

#[test]
fn test_set_exists_error_on_other_exit() {
    let _guard = serial();
    let fake = FakeIpset::new(3, "", "permission denied\\n");
    let err = fake.handle().set_exists("myset").unwrap_err();
    let exit = err.as_exit().expect("exit error");
    assert_eq!(exit.code(), 3);
    assert_eq!(exit.message(), "permission denied");
}

#[test]
fn test_destroy_in_use_trims_message() {
    let _guard = serial();
    let fake = FakeIpset::new(2, "", "Set cannot be destroyed: it is in use\\r\\n\\n");
    let err = fake.handle().destroy("myset").unwrap_err();
    let exit = err.as_exit().expect("exit error");

    assert_eq!(exit.code(), 2);
    assert_eq!(exit.message(), "Set cannot be destroyed: it is in use");
    assert_eq!(exit.args()[0], fake.path().to_string_lossy());
    assert_eq!(&exit.args()[1..], ["destroy", "myset"]);

    let rendered = err.to_string();
    assert!(rendered.contains("exit status 2"));
    assert!(rendered.contains("\"destroy\", \"myset\""));
    assert!(rendered.ends_with("Set cannot be destroyed: it is in use"));
}

#[test]
fn test_list_streams_stdout() {
    let _guard = serial();
    let fake = FakeIpset::new(0, "Name: myset\\nMembers:\\n10.0.0.1\\n", "");
    let mut out: Vec<u8> = Vec::new();
    fake.handle().list("myset", &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "Name: myset\nMembers:\n10.0.0.1\n");
}

#[test]
fn test_list_failure_keeps_partial_stdout() {
    let _guard = serial();
    let fake = FakeIpset::new(1, "Name: partial\\n", "boom\\n");
    let mut out: Vec<u8> = Vec::new();
    let err = fake.handle().list("myset", &mut out).unwrap_err();

    assert_eq!(err.exit_code(), Some(1));
    assert_eq!(err.as_exit().unwrap().message(), "boom");
    assert_eq!(String::from_utf8(out).unwrap(), "Name: partial\n");
}

#[test]
fn test_new_in_resolves_executable() {
    let _guard = serial();
    let fake = FakeIpset::new(0, "", "");
    let ipset = Ipset::new_in(fake.dir.path()).unwrap();
    assert_eq!(ipset.path(), fake.path());

    ipset.flush("myset").unwrap();
    assert_eq!(fake.recorded_args(), vec!["flush", "myset"]);
}

#[test]
fn test_new_in_empty_dir_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = Ipset::new_in(dir.path()).unwrap_err();
    assert!(matches!(err, IpsetError::NotFound { .. }));
    assert!(err.to_string().starts_with("cannot find ipset executable"));
}

#[test]
fn test_new_in_skips_non_executable() {
    let _guard = serial();
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("ipset"), "#!/bin/sh\n").unwrap();
    fs::set_permissions(dir.path().join("ipset"), fs::Permissions::from_mode(0o644)).unwrap();

    let err = Ipset::new_in(dir.path()).unwrap_err();
    assert!(matches!(err, IpsetError::NotFound { .. }));
}

#[test]
fn test_membership_test() {
    let _guard = serial();
    let member = FakeIpset::new(0, "", "");
    assert!(member.handle().test("s", "10.0.0.1", &[]).unwrap());
    assert_eq!(member.recorded_args(), vec!["test", "s", "10.0.0.1"]);

    let absent = FakeIpset::new(1, "", "10.0.0.2 is NOT in set s.\\n");
    assert!(!absent.handle().test("s", "10.0.0.2", &[]).unwrap());
}

#[test]
fn test_missing_executable_is_launch_error() {
    let _guard = serial();
    let fake = FakeIpset::new(0, "", "");
    let ipset = fake.handle();
    fs::remove_file(fake.path()).unwrap();

    let err = ipset.flush("myset").unwrap_err();
    assert!(err.as_exit().is_none());
    match err {
        IpsetError::Launch(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_non_executable_is_launch_error() {
    let _guard = serial();
    let fake = FakeIpset::new(0, "", "");
    fs::set_permissions(fake.path(), fs::Permissions::from_mode(0o644)).unwrap();

    let err = fake.handle().destroy("myset").unwrap_err();
    assert!(matches!(err, IpsetError::Launch(_)));
}

/// Path to the compiled binary
fn binary_path() -> &'static Path {
    Path::new(env!("CARGO_BIN_EXE_ipsetctl"))
}

/// Run ipsetctl with a config pointing at `fake`
fn run_ipsetctl(fake: &FakeIpset, config: &str, args: &[&str]) -> std::process::Output {
    let config_path = fake.dir.path().join("config.yaml");
    fs::write(
        &config_path,
        format!("binary: {}\n{}", fake.path().display(), config),
    )
    .unwrap();

    Command::new(binary_path())
        .arg("--config")
        .arg(&config_path)
        .args(args)
        .output()
        .expect("Failed to execute ipsetctl")
}

#[test]
fn test_version_command() {
    let _guard = serial();
    let output = Command::new(binary_path()).arg("version").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ipsetctl"));
}

#[test]
fn test_help_command() {
    let _guard = serial();
    let output = Command::new(binary_path()).arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("create"));
    assert!(stdout.contains("exists"));
}

#[test]
fn test_cli_exists_false_exits_one() {
    let _guard = serial();
    let fake = FakeIpset::new(1, "", "set myset does not exist\\n");
    let output = run_ipsetctl(&fake, "", &["exists", "myset"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "false");
}

#[test]
fn test_cli_add_prepends_config_flags() {
    let _guard = serial();
    let fake = FakeIpset::new(0, "", "");
    let output = run_ipsetctl(
        &fake,
        "ipv6: true\nsuppress_errors: true\n",
        &["add", "myset", "::1", "timeout", "10"],
    );
    assert!(output.status.success());
    assert_eq!(
        fake.recorded_args(),
        vec!["add", "myset", "::1", "-6", "-!", "timeout", "10"]
    );
}

#[test]
fn test_cli_reports_tool_failure() {
    let _guard = serial();
    let fake = FakeIpset::new(2, "", "Set cannot be destroyed: it is in use\\n");
    let output = run_ipsetctl(&fake, "", &["destroy", "myset"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to destroy set myset"));
    assert!(stderr.contains("Set cannot be destroyed: it is in use"));
}
