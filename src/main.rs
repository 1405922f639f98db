use clap::Parser;
use harvest_page::Scraper;
use std::process::ExitCode;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging; stdout is reserved for the JSON result
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command-line arguments
    let args = Args::parse();

    let urls = match args.url_list() {
        Ok(urls) => urls,
        Err(e) => {
            ::log::error!("Expected a JSON array of URL strings: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = match args.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let scraper = match Scraper::http(config) {
        Ok(scraper) => scraper,
        Err(e) => {
            ::log::error!("Failed to build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    ::log::info!(
        "Starting scrape of {} URLs with up to {} workers",
        urls.len(),
        scraper.config().max_workers
    );
    let results = scraper.scrape_all(&urls).await;

    let output = if args.pretty {
        serde_json::to_string_pretty(&results)
    } else {
        serde_json::to_string(&results)
    };

    match output {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            ::log::error!("Failed to serialize results: {}", e);
            ExitCode::FAILURE
        }
    }
}
