use clap::Parser;

/// Pharmacy notification relay CLI arguments
#[derive(Debug, Parser)]
#[command(
    name = "pharmacy-notify",
    version,
    about = "Locates nearby pharmacies and records a notification for each"
)]
pub struct Cli {
    /// Port to listen on (overrides PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// SQLite connection string (overrides DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,
}
