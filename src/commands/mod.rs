//! CLI command implementations.

pub mod member;
pub mod query;
pub mod set;

use crate::config::Config;

/// Config-implied flags followed by the user's options.
pub(crate) fn merge_opts<'a>(config: &Config, opts: &'a [String]) -> Vec<&'a str> {
    let mut merged: Vec<&'a str> = config.default_opts();
    merged.extend(opts.iter().map(String::as_str));
    merged
}
