//! Handle to the ipset executable and its subcommands.

use std::env;
use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cmd_abstraction::{CommandExecutor, ProcessOutcome, RealCommandExecutor};
use crate::error::{ExitError, IpsetError, Result};

/// Name of the executable looked up on `PATH`.
pub const IPSET_BINARY: &str = "ipset";

/// Select the IPv6 address family.
pub const IPV6: &str = "-6";
/// Ignore errors for entries/sets that already exist or are missing.
pub const SUPPRESS_ERRORS: &str = "-!";
/// Ignore "already exists" errors for `create`/`add` and missing entries for `del`.
pub const EXIST: &str = "-exist";

/// Exit code ipset uses for a missing set on `list` or a non-member on `test`.
const EXIT_NEGATIVE: i32 = 1;

/// Handle to a resolved ipset executable.
///
/// The path is fixed at construction and reused for every invocation.
#[derive(Debug, Clone)]
pub struct Ipset<E: CommandExecutor = RealCommandExecutor> {
    path: PathBuf,
    executor: E,
}

impl Ipset<RealCommandExecutor> {
    /// Locate `ipset` on the search path.
    pub fn new() -> Result<Self> {
        Self::new_in(env::var_os("PATH").unwrap_or_default())
    }

    /// Locate `ipset` in `paths`, a `PATH`-style list of directories.
    pub fn new_in(paths: impl AsRef<OsStr>) -> Result<Self> {
        let cwd = env::current_dir().unwrap_or_default();
        let path = which::which_in(IPSET_BINARY, Some(paths), cwd)
            .map_err(|source| IpsetError::NotFound { source })?;
        debug!("Found ipset at {}", path.display());
        Ok(Self::with_path(path))
    }

    /// Use an explicit executable path without searching `PATH`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self::with_executor(path, RealCommandExecutor::new())
    }
}

impl<E: CommandExecutor> Ipset<E> {
    pub fn with_executor(path: impl Into<PathBuf>, executor: E) -> Self {
        Self {
            path: path.into(),
            executor,
        }
    }

    /// Resolved path of the executable.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn create(&self, setname: &str, typename: &str, opts: &[&str]) -> Result<()> {
        self.run(command(&["create", setname, typename], opts))
    }

    pub fn destroy(&self, setname: &str) -> Result<()> {
        self.run(command(&["destroy", setname], &[]))
    }

    /// Check whether a set exists.
    ///
    /// ipset exits with 1 for an unknown set, which is reported as `Ok(false)`.
    /// Any other failure is returned as an error.
    pub fn set_exists(&self, setname: &str) -> Result<bool> {
        self.run_negative_as_false(command(&["list", setname], &[]))
    }

    pub fn add(&self, setname: &str, addr: &str, opts: &[&str]) -> Result<()> {
        self.run(command(&["add", setname, addr], opts))
    }

    pub fn del(&self, setname: &str, addr: &str, opts: &[&str]) -> Result<()> {
        self.run(command(&["del", setname, addr], opts))
    }

    pub fn flush(&self, setname: &str) -> Result<()> {
        self.run(command(&["flush", setname], &[]))
    }

    /// Test whether `addr` is a member of the set.
    ///
    /// ipset exits with 1 when the entry is not in the set.
    pub fn test(&self, setname: &str, addr: &str, opts: &[&str]) -> Result<bool> {
        self.run_negative_as_false(command(&["test", setname, addr], opts))
    }

    /// Write the `list` output of a set into `out`.
    pub fn list(&self, setname: &str, out: &mut dyn Write) -> Result<()> {
        self.run_with_output(command(&["list", setname], &[]), Some(out))
    }

    /// Exchange the contents of two sets.
    pub fn swap(&self, from: &str, to: &str) -> Result<()> {
        self.run(command(&["swap", from, to], &[]))
    }

    pub fn rename(&self, from: &str, to: &str) -> Result<()> {
        self.run(command(&["rename", from, to], &[]))
    }

    fn run(&self, args: Vec<String>) -> Result<()> {
        self.run_with_output(args, None)
    }

    fn run_negative_as_false(&self, args: Vec<String>) -> Result<bool> {
        match self.run(args) {
            Ok(()) => Ok(true),
            Err(IpsetError::Exit(e)) if e.code() == EXIT_NEGATIVE => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Run ipset with `args` verbatim.
    ///
    /// When `stdout` is given, the tool's standard output is streamed into it
    /// while the process runs, so output written before a failure is kept.
    /// Otherwise it is discarded. Standard error is always captured and
    /// becomes the message of an [`ExitError`] on non-zero exit.
    pub fn run_with_output(&self, args: Vec<String>, stdout: Option<&mut dyn Write>) -> Result<()> {
        debug!("Running {} {:?}", self.path.display(), args);

        let mut discard = io::sink();
        let sink: &mut dyn Write = match stdout {
            Some(out) => out,
            None => &mut discard,
        };

        match self.executor.execute(&self.path, &args, sink) {
            ProcessOutcome::Success => Ok(()),
            ProcessOutcome::ExitedNonZero { code, stderr } => {
                debug!("ipset {:?} exited with status {}", args, code);
                let mut full = Vec::with_capacity(args.len() + 1);
                full.push(self.path.to_string_lossy().into_owned());
                full.extend(args);
                Err(ExitError::new(full, code, &stderr).into())
            }
            ProcessOutcome::LaunchFailed(e) => Err(IpsetError::Launch(e)),
            ProcessOutcome::OutputFailed(e) => Err(IpsetError::Output(e)),
        }
    }
}

/// Build `[positional..., opts...]` without reordering or validation.
fn command(positional: &[&str], opts: &[&str]) -> Vec<String> {
    positional
        .iter()
        .chain(opts.iter())
        .map(|s| s.to_string())
        .collect()
}
