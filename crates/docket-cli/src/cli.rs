use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "docket",
    about = "Versioned JSON documents over HTTP with optimistic concurrency",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// List repositories and their documents
    Ls(LsArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    /// Base directory containing the repositories
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct LsArgs {
    /// Base directory containing the repositories
    #[arg(long, default_value = "repos")]
    pub root: PathBuf,
}
