use gameprices::config::{Commands, Config};
use gameprices::{GameService, Result};
use serde::Serialize;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::new()?;

    let level = config.args.log_level.parse().unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let service = GameService::new(config.scraper_config.clone())?;

    match config.args.command {
        Commands::Regions => {
            let regions = service.list_regions().await?;
            print_json(&regions)?;
        }
        Commands::Games {
            title,
            region,
            limit,
            offset,
        } => {
            let result = service.scrape_games(&title, &region, limit, offset).await?;
            print_json(&result)?;
        }
        Commands::Game {
            id,
            region,
            game_type,
        } => {
            let game = service.scrape_game(&id, &region, Some(&game_type)).await?;
            print_json(&game)?;
        }
    }

    info!("Scraping completed successfully!");
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
