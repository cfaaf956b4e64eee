use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "homam-booking")]
#[command(about = "Browse ceremonial services and book a priest")]
pub struct CliConfig {
    /// Path to the TOML application config
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List all services
    Services,

    /// Show one service in detail
    Service { id: String },

    /// List priests matching the given filters
    Priests {
        #[arg(long, default_value = "")]
        search: String,

        #[arg(long, default_value = "all")]
        language: String,

        #[arg(long, default_value = "any")]
        min_experience: String,

        #[arg(long, default_value = "any")]
        min_rating: String,

        /// Mark which priests are available on this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<chrono::NaiveDate>,
    },

    /// Run a booking described in a TOML request file
    Book {
        #[arg(short, long)]
        request: PathBuf,

        /// Coupon code, overrides the one in the request
        #[arg(long)]
        coupon: Option<String>,

        /// Stop before paying and only show the price breakdown
        #[arg(long)]
        dry_run: bool,
    },
}
