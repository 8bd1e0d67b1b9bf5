//! # ipsetctl - Typed wrapper around the Linux `ipset` tool
//!
//! Every operation spawns the `ipset` executable once, waits for it, and
//! turns a non-zero exit into an [`ExitError`] carrying the argument
//! vector, the exit code and the tool's stderr text.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        ipsetctl                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CLI (clap) + Config (serde_yaml)                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Ipset handle                                               │
//! │    └── create, destroy, set_exists, add, del, flush, ...    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CommandExecutor trait                                      │
//! │    └── RealCommandExecutor (std::process)                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use ipsetctl::{Ipset, SUPPRESS_ERRORS};
//!
//! fn main() -> Result<(), ipsetctl::IpsetError> {
//!     let ipset = Ipset::new()?;
//!
//!     if !ipset.set_exists("blocklist")? {
//!         ipset.create("blocklist", "hash:net", &[])?;
//!     }
//!     ipset.add("blocklist", "203.0.113.0/24", &[SUPPRESS_ERRORS])?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! - [`IpsetError::NotFound`] - `ipset` is not on `PATH`
//! - [`IpsetError::Launch`] - the process could not be started (the OS error, unchanged)
//! - [`IpsetError::Exit`] - ipset ran and exited non-zero
//!
//! Exit code 1 from `list` (for [`Ipset::set_exists`]) and from `test`
//! (for [`Ipset::test`]) is reported as `Ok(false)` instead.
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface definitions
//! - [`cmd_abstraction`] - Process execution behind a mockable trait
//! - [`commands`] - CLI command implementations
//! - [`config`] - Configuration parsing and validation
//! - [`error`] - Error types
//! - [`ipset`] - The ipset handle and subcommands

pub mod cli;
pub mod cmd_abstraction;
pub mod commands;
pub mod config;
pub mod error;
pub mod ipset;

pub use config::Config;
pub use error::{ExitError, IpsetError};
pub use ipset::{Ipset, EXIST, IPV6, SUPPRESS_ERRORS};
