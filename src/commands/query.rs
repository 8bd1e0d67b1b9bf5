//! Read-only commands: exists, list.

use anyhow::{Context, Result};
use std::io;

use crate::ipset::Ipset;

/// Returns whether the set exists.
pub fn exists(ipset: &Ipset, setname: &str) -> Result<bool> {
    let found = ipset
        .set_exists(setname)
        .with_context(|| format!("Failed to look up set {}", setname))?;
    println!("{}", found);
    Ok(found)
}

pub fn list(ipset: &Ipset, setname: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    ipset
        .list(setname, &mut out)
        .with_context(|| format!("Failed to list set {}", setname))
}
