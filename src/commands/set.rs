//! Set lifecycle commands: create, destroy, flush, swap, rename.

use anyhow::{Context, Result};
use tracing::info;

use super::merge_opts;
use crate::config::Config;
use crate::ipset::Ipset;

pub fn create(ipset: &Ipset, config: &Config, setname: &str, typename: &str, opts: &[String]) -> Result<()> {
    let opts = merge_opts(config, opts);
    ipset
        .create(setname, typename, &opts)
        .with_context(|| format!("Failed to create set {}", setname))?;
    info!("Created set {} ({})", setname, typename);
    println!("[OK] Set {} created", setname);
    Ok(())
}

pub fn destroy(ipset: &Ipset, setname: &str) -> Result<()> {
    ipset
        .destroy(setname)
        .with_context(|| format!("Failed to destroy set {}", setname))?;
    println!("[OK] Set {} destroyed", setname);
    Ok(())
}

pub fn flush(ipset: &Ipset, setname: &str) -> Result<()> {
    ipset
        .flush(setname)
        .with_context(|| format!("Failed to flush set {}", setname))?;
    println!("[OK] Set {} flushed", setname);
    Ok(())
}

pub fn swap(ipset: &Ipset, from: &str, to: &str) -> Result<()> {
    ipset
        .swap(from, to)
        .with_context(|| format!("Failed to swap {} and {}", from, to))?;
    println!("[OK] Swapped {} and {}", from, to);
    Ok(())
}

pub fn rename(ipset: &Ipset, from: &str, to: &str) -> Result<()> {
    ipset
        .rename(from, to)
        .with_context(|| format!("Failed to rename {} to {}", from, to))?;
    println!("[OK] Renamed {} to {}", from, to);
    Ok(())
}
