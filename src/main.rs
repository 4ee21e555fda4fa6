use std::error::Error;
use std::io::{self, Write};
use trend_aggregator::utils::display::DisplayFormatter;
use trend_aggregator::{AggregatorConfig, TrendService};
use tracing::{debug, error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing with debug level
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting Trending-Topics Aggregator");

    let config = AggregatorConfig::from_env();
    let service = TrendService::new(config);
    let display = DisplayFormatter::new();

    println!("=== Trending-Topics Aggregator ===");
    println!("Commands:");
    println!("  trending - Microblogging trending topics");
    println!("  memes    - Popular image macros");
    println!("  reddit   - Hot web3 forum posts");
    println!("  news     - Recent web3 headlines");
    println!("  board    - Imageboard web3 threads");
    println!("  exit     - Exit the program");

    let mut input = String::new();
    loop {
        input.clear();
        print!("> ");
        io::stdout().flush()?;
        io::stdin().read_line(&mut input)?;

        let command = input.trim();
        match command {
            "exit" => {
                debug!("Received exit command");
                break;
            }
            "trending" => match service.trending().await {
                Ok(response) => {
                    println!("{}", display.format_header("Trending Topics"));
                    println!("{}", display.format_trends(&response.data));
                    if let Some(message) = response.message {
                        println!("({})", message);
                    }
                }
                Err(e) => error!("trending request failed: {}", e),
            },
            "memes" => match service.memes().await {
                Ok(response) => {
                    println!("{}", display.format_header("Trending Memes"));
                    println!("{}", display.format_memes(&response.data));
                    if let Some(message) = response.message {
                        println!("({})", message);
                    }
                }
                Err(e) => error!("memes request failed: {}", e),
            },
            "reddit" => match service.reddit().await {
                Ok(response) => {
                    println!("{}", display.format_header("Hot Web3 Posts"));
                    println!("{}", display.format_reddit(&response.data));
                    if let Some(message) = response.message {
                        println!("({})", message);
                    }
                }
                Err(e) => error!("reddit request failed: {}", e),
            },
            "news" => match service.news().await {
                Ok(response) => {
                    println!("{}", display.format_header("Web3 Headlines"));
                    println!("{}", display.format_news(&response.data));
                    if let Some(message) = response.message {
                        println!("({})", message);
                    }
                }
                Err(e) => error!("news request failed: {}", e),
            },
            "board" => match service.board().await {
                Ok(response) => {
                    println!("{}", display.format_header("Imageboard Threads"));
                    println!("{}", display.format_board(&response.data));
                    if let Some(message) = response.message {
                        println!("({})", message);
                    }
                }
                Err(e) => error!("board request failed: {}", e),
            },
            "" => {}
            unknown => println!("Unknown command: {}", unknown),
        }
    }

    info!("Shutting down");
    Ok(())
}
