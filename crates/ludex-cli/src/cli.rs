use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ludex",
    about = "Ludex — a game shelf with images and play notes",
    version,
)]
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
    /// Run the HTTP server
    Serve(ServeArgs),
    /// Print the shelf from the data file
    List(ListArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Listen port (overrides the config file and the PORT environment variable)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Full listen address, e.g. 127.0.0.1:4000
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    /// JSON data file holding the shelf
    #[arg(long)]
    pub data_file: Option<PathBuf>,

    /// Directory holding uploaded images
    #[arg(long)]
    pub images_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct ListArgs {
    /// JSON data file holding the shelf
    #[arg(long, default_value = "games.json")]
    pub data_file: PathBuf,

    /// Directory holding uploaded images
    #[arg(long, default_value = "public/images")]
    pub images_dir: PathBuf,
}
