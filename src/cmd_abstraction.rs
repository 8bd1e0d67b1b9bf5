//! Command execution abstraction for testability.
//!
//! This module provides a trait-based abstraction over spawning the ipset
//! executable, allowing unit tests to mock the child process without
//! actually running it.

use std::io::{self, Read, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

#[cfg(test)]
use mockall::automock;

use crate::error::SIGNALED_EXIT_CODE;

/// Result of running a child process to completion.
#[derive(Debug)]
pub enum ProcessOutcome {
    /// Exit status 0.
    Success,
    /// The process ran and exited with a non-zero status.
    ExitedNonZero { code: i32, stderr: String },
    /// The process could not be started or waited on.
    LaunchFailed(io::Error),
    /// Writing the process's standard output into the sink failed.
    /// The child has been killed and reaped.
    OutputFailed(io::Error),
}

/// Trait for process execution, allowing dependency injection for testing.
#[cfg_attr(test, automock)]
pub trait CommandExecutor: Send + Sync {
    /// Run `program` with `args` and wait for it to exit.
    ///
    /// Standard output is copied into `stdout` while the process runs.
    /// Standard error is always captured.
    fn execute(&self, program: &Path, args: &[String], stdout: &mut dyn Write) -> ProcessOutcome;
}

/// Real implementation of CommandExecutor that spawns actual processes.
#[derive(Debug, Clone, Default)]
pub struct RealCommandExecutor;

impl RealCommandExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for RealCommandExecutor {
    fn execute(&self, program: &Path, args: &[String], stdout: &mut dyn Write) -> ProcessOutcome {
        let mut child = match Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => return ProcessOutcome::LaunchFailed(e),
        };

        // stderr is drained on its own thread so a full pipe cannot stall
        // the child while stdout is being copied.
        let stderr_reader = child.stderr.take().map(|mut pipe| {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = pipe.read_to_end(&mut buf);
                buf
            })
        });

        let copied = match child.stdout.take() {
            Some(mut pipe) => io::copy(&mut pipe, stdout).and_then(|_| stdout.flush()),
            None => Ok(()),
        };

        if copied.is_err() {
            let _ = child.kill();
        }
        let status = child.wait();
        let stderr = stderr_reader
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();

        if let Err(e) = copied {
            return ProcessOutcome::OutputFailed(e);
        }

        match status {
            Ok(status) if status.success() => ProcessOutcome::Success,
            Ok(status) => ProcessOutcome::ExitedNonZero {
                code: status.code().unwrap_or(SIGNALED_EXIT_CODE),
                stderr: String::from_utf8_lossy(&stderr).into_owned(),
            },
            Err(e) => ProcessOutcome::LaunchFailed(e),
        }
    }
}

/// Convert a slice of &str to Vec<String>.
pub fn args_to_strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}
