//! hd-crawler - Fast, stateless Home Depot product lookup CLI
//!
//! A Rust implementation with TLS fingerprint emulation for reliable scraping.

use anyhow::Result;
use clap::{Parser, Subcommand};
use hd_crawler::commands::{NormalizeCommand, SearchCommand, SpecsCommand};
use hd_crawler::config::{Config, OutputFormat};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "hd-crawler",
    version,
    about = "Fast, stateless Home Depot product lookup CLI",
    long_about = "Looks up Home Depot products by search term and reports their summary, \
                  specification table, or a Gemini-normalized rendition."
)]
struct Cli {
    /// Store search ZIP code
    #[arg(short, long, global = true, env = "HD_ZIP")]
    zip: Option<String>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "HD_PROXY")]
    proxy: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "HD_TIMEOUT")]
    timeout: Option<u64>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a product summary
    #[command(alias = "s")]
    Search {
        /// Product search term
        term: String,
    },

    /// Look up a product's specification table
    #[command(alias = "sp")]
    Specs {
        /// Product search term
        term: String,
    },

    /// Look up a product and normalize it with Gemini
    #[command(alias = "n")]
    Normalize {
        /// Product search term
        term: String,
    },

    /// Show the effective CSS selectors
    Selectors,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides only where flags were given
    if let Some(zip) = cli.zip {
        config.zip = zip;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    match cli.command {
        Commands::Search { term } => {
            let cmd = SearchCommand::new(config);
            let output = cmd.execute(&term).await?;
            println!("{}", output);
        }

        Commands::Specs { term } => {
            let cmd = SpecsCommand::new(config);
            let output = cmd.execute(&term).await?;
            println!("{}", output);
        }

        Commands::Normalize { term } => {
            let cmd = NormalizeCommand::new(config);
            let output = cmd.execute(&term).await?;
            println!("{}", output);
        }

        Commands::Selectors => {
            println!("Effective CSS selectors:\n");
            println!("{:<14} {}", "Field", "Selector");
            println!("{:-<14} {:-<40}", "", "");

            let selectors = &config.selectors;
            for (field, css) in [
                ("name", &selectors.name),
                ("brand", &selectors.brand),
                ("model_number", &selectors.model_number),
                ("price", &selectors.price),
                ("product_link", &selectors.product_link),
                ("spec_table", &selectors.spec_table),
            ] {
                println!("{:<14} {}", field, css);
            }
        }
    }

    Ok(())
}
