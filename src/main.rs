// Entrypoint for the CLI application.
// - Keeps `main` small: resolve config, build the API client and the
//   view-model, and hand them to the UI loop.

use anyhow::Context;
use catalogo_cli::{api::ApiClient, client::CatalogClient, config, ui::main_menu};
use clap::Parser;
use log::info;

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; raise with RUST_LOG=debug to see requests.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = config::Cli::parse();
    let config = config::load_config(&cli).context("Failed to load configuration")?;
    info!("Using product API at {}", config.base_url);

    let api = ApiClient::new(&config.base_url).context("Failed to build HTTP client")?;
    let client = CatalogClient::new(api, config.debounce);

    // Blocks until the user picks "Exit".
    main_menu(client, &config.base_url)?;
    Ok(())
}
