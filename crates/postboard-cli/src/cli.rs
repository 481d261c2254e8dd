use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "postboard", about = "Postboard: a public, append-only post board", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Print the normalized hashtags found in text
    Tags(TagsArgs),
    /// Print the effective configuration
    Config(ConfigArgs),
}

/// Settings shared by commands that read a configuration file.
#[derive(Args, Debug, Default)]
pub struct ConfigSource {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Address to listen on (overrides the file)
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// Store blobs under this directory instead of in memory
    #[arg(long)]
    pub blob_dir: Option<PathBuf>,
    /// Base URL used in blob links (overrides the file)
    #[arg(long)]
    pub public_url: Option<String>,
}

#[derive(Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub source: ConfigSource,
}

#[derive(Args)]
pub struct TagsArgs {
    /// Text to scan; multiple arguments are joined with spaces
    #[arg(required = true)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub source: ConfigSource,
}
