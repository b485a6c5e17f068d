use clap::Parser;
use std::path::PathBuf;

/// Browse, search and edit users in a remote user directory.
#[derive(Debug, Parser)]
#[command(name = "userdir-manager", version, about)]
pub struct Args {
    /// API root, e.g. http://localhost:5000/api
    #[arg(long, env = "USERDIR_API_URL")]
    pub api_url: Option<String>,

    /// Settings file (defaults to userdir.conf in the config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// File that receives log output
    #[arg(long)]
    pub log_file: Option<String>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long)]
    pub log_level: Option<String>,
}
