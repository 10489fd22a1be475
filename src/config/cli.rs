use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Base URL of the price comparison site
    #[arg(long, env = "BASE_URL")]
    pub base_url: Option<String>,

    /// Path to a JSON scraper configuration file
    #[arg(long)]
    pub config_file: Option<PathBuf>,

    /// Maximum number of game pages fetched at the same time
    #[arg(long)]
    pub max_concurrent_games: Option<usize>,

    /// Maximum number of store redirects resolved at the same time, per game
    #[arg(long)]
    pub max_concurrent_offers: Option<usize>,

    /// Seconds before a single game scrape is given up
    #[arg(long)]
    pub task_timeout_secs: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List the store regions offered by the site
    Regions,
    /// Search games by title
    Games {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "us")]
        region: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
    /// Fetch a single game's prices
    Game {
        id: String,
        #[arg(long, default_value = "us")]
        region: String,
        #[arg(long = "type", default_value = "game")]
        game_type: String,
    },
}
