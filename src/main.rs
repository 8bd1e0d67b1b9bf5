//! ipsetctl - typed front-end for the ipset tool

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use ipsetctl::cli::{Cli, Commands};
use ipsetctl::commands::{member, query, set};
use ipsetctl::config::Config;
use ipsetctl::ipset::Ipset;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let found = match cli.command {
        Commands::Create {
            setname,
            typename,
            opts,
        } => {
            let (config, ipset) = load(&cli.config)?;
            set::create(&ipset, &config, &setname, &typename, &opts).map(|_| true)
        }
        Commands::Destroy { setname } => {
            let (_, ipset) = load(&cli.config)?;
            set::destroy(&ipset, &setname).map(|_| true)
        }
        Commands::Exists { setname } => {
            let (_, ipset) = load(&cli.config)?;
            query::exists(&ipset, &setname)
        }
        Commands::Add {
            setname,
            addr,
            opts,
        } => {
            let (config, ipset) = load(&cli.config)?;
            member::add(&ipset, &config, &setname, &addr, &opts).map(|_| true)
        }
        Commands::Del {
            setname,
            addr,
            opts,
        } => {
            let (config, ipset) = load(&cli.config)?;
            member::del(&ipset, &config, &setname, &addr, &opts).map(|_| true)
        }
        Commands::Flush { setname } => {
            let (_, ipset) = load(&cli.config)?;
            set::flush(&ipset, &setname).map(|_| true)
        }
        Commands::Test {
            setname,
            addr,
            opts,
        } => {
            let (config, ipset) = load(&cli.config)?;
            member::test(&ipset, &config, &setname, &addr, &opts)
        }
        Commands::List { setname } => {
            let (_, ipset) = load(&cli.config)?;
            query::list(&ipset, &setname).map(|_| true)
        }
        Commands::Swap { from, to } => {
            let (_, ipset) = load(&cli.config)?;
            set::swap(&ipset, &from, &to).map(|_| true)
        }
        Commands::Rename { from, to } => {
            let (_, ipset) = load(&cli.config)?;
            set::rename(&ipset, &from, &to).map(|_| true)
        }
        Commands::Version => {
            println!("ipsetctl {}", env!("CARGO_PKG_VERSION"));
            Ok(true)
        }
    }?;

    Ok(if found {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Load the config (defaults if the file is missing) and resolve ipset.
fn load(config_path: &Path) -> Result<(Config, Ipset)> {
    let config = Config::load_or_default(config_path)?;
    let ipset = config.handle()?;
    Ok((config, ipset))
}
