mod scrape;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "wishly-cli")]
#[command(about = "Wishly product metadata command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch a product page and print the extracted metadata as JSON
    Scrape {
        /// Product page URL; `https://` is assumed when no scheme is given
        url: String,
        /// Override the configured fetch timeout
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
    /// Parse a price out of free-form text
    Price {
        text: String,
    },
    /// Detect the currency of a price string
    Currency {
        text: String,
        /// Domain of the page the price came from
        #[arg(long, default_value = "")]
        domain: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Scrape { url, timeout_secs }) => {
            let config = wishly_core::load_app_config()?;
            scrape::run_scrape(&config, &url, timeout_secs).await?;
        }
        Some(Commands::Price { text }) => println!("{}", scrape::format_price(&text)),
        Some(Commands::Currency { text, domain }) => {
            println!("{}", wishly_scraper::detect_currency(&text, &domain));
        }
        None => println!("wishly-cli: run with --help to list commands"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
