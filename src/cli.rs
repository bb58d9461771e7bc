use crate::tracing::LogFormat;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mdx-search")]
#[command(about = "Index MDX content and search it locally", long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Root content directory (overrides the config file)
    #[arg(long, global = true)]
    pub content_dir: Option<PathBuf>,
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the index endpoint until interrupted
    Serve {
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },
    /// Scan content and print the index document
    Index {
        #[arg(long)]
        pretty: bool,
    },
    /// Rank the index against a query
    Search {
        query: String,
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Fetch the index from this endpoint instead of scanning locally.
        /// Defaults to `index_url` from the config file
        #[arg(long)]
        url: Option<String>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
}
