//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ipsetctl")]
#[command(author, version, about = "Typed front-end for the ipset tool")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "/etc/ipsetctl/config.yaml", global = true)]
    pub config: PathBuf,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a set
    Create {
        /// Set name
        setname: String,
        /// Set type (e.g. hash:ip, hash:net)
        typename: String,
        /// Extra ipset options, passed through verbatim. Put `--` before
        /// options that would otherwise parse as ipsetctl flags (`-c`, `-q`, `-v`)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        opts: Vec<String>,
    },

    /// Destroy a set
    Destroy { setname: String },

    /// Check whether a set exists (exit status 1 if not)
    Exists { setname: String },

    /// Add an entry to a set
    Add {
        setname: String,
        /// Address, range or CIDR
        addr: String,
        /// Extra ipset options, passed through verbatim. Put `--` before
        /// options that would otherwise parse as ipsetctl flags (`-c`, `-q`, `-v`)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        opts: Vec<String>,
    },

    /// Delete an entry from a set
    Del {
        setname: String,
        addr: String,
        /// Extra ipset options, passed through verbatim. Put `--` before
        /// options that would otherwise parse as ipsetctl flags (`-c`, `-q`, `-v`)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        opts: Vec<String>,
    },

    /// Remove all entries from a set
    Flush { setname: String },

    /// Test whether an entry is in a set (exit status 1 if not)
    Test {
        setname: String,
        addr: String,
        /// Extra ipset options, passed through verbatim. Put `--` before
        /// options that would otherwise parse as ipsetctl flags (`-c`, `-q`, `-v`)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        opts: Vec<String>,
    },

    /// Print the header and members of a set
    List { setname: String },

    /// Swap the contents of two sets
    Swap { from: String, to: String },

    /// Rename a set
    Rename { from: String, to: String },

    /// Show version
    Version,
}
