//! Error types for ipsetctl.

use std::fmt;

use thiserror::Error;

/// Exit code reported when the child was terminated by a signal.
pub const SIGNALED_EXIT_CODE: i32 = -1;

#[derive(Error, Debug)]
pub enum IpsetError {
    #[error("cannot find ipset executable: {source}")]
    NotFound {
        #[source]
        source: which::Error,
    },

    #[error(transparent)]
    Exit(#[from] ExitError),

    /// The process could not be started at all.
    #[error(transparent)]
    Launch(std::io::Error),

    #[error("failed to write ipset output: {0}")]
    Output(#[source] std::io::Error),
}

impl IpsetError {
    /// Exit code of the failed invocation, if the tool ran at all.
    pub fn exit_code(&self) -> Option<i32> {
        self.as_exit().map(ExitError::code)
    }

    pub fn as_exit(&self) -> Option<&ExitError> {
        match self {
            IpsetError::Exit(e) => Some(e),
            _ => None,
        }
    }
}

/// Failure reported by ipset itself: the process ran and exited non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitError {
    args: Vec<String>,
    code: i32,
    message: String,
}

impl ExitError {
    /// Build from the full argument vector and raw stderr text.
    ///
    /// Trailing `\r`/`\n` characters are stripped from `stderr`.
    pub fn new(args: Vec<String>, code: i32, stderr: &str) -> Self {
        Self {
            args,
            code,
            message: stderr.trim_end_matches(['\r', '\n']).to_string(),
        }
    }

    /// Argument vector as executed, starting with the executable path.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "running {:?}: exit status {}: {}",
            self.args, self.code, self.message
        )
    }
}

impl std::error::Error for ExitError {}

pub type Result<T> = std::result::Result<T, IpsetError>;
