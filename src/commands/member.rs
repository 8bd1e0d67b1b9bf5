//! Entry commands: add, del, test.

use anyhow::{Context, Result};

use super::merge_opts;
use crate::config::Config;
use crate::ipset::Ipset;

pub fn add(ipset: &Ipset, config: &Config, setname: &str, addr: &str, opts: &[String]) -> Result<()> {
    let opts = merge_opts(config, opts);
    ipset
        .add(setname, addr, &opts)
        .with_context(|| format!("Failed to add {} to {}", addr, setname))?;
    println!("[OK] Added {} to {}", addr, setname);
    Ok(())
}

pub fn del(ipset: &Ipset, config: &Config, setname: &str, addr: &str, opts: &[String]) -> Result<()> {
    let opts = merge_opts(config, opts);
    ipset
        .del(setname, addr, &opts)
        .with_context(|| format!("Failed to delete {} from {}", addr, setname))?;
    println!("[OK] Deleted {} from {}", addr, setname);
    Ok(())
}

/// Returns whether `addr` is in the set.
pub fn test(ipset: &Ipset, config: &Config, setname: &str, addr: &str, opts: &[String]) -> Result<bool> {
    let opts = merge_opts(config, opts);
    let member = ipset
        .test(setname, addr, &opts)
        .with_context(|| format!("Failed to test {} in {}", addr, setname))?;
    println!("{}", member);
    Ok(member)
}
