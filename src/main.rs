use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use pokedex::{
    app::load_config_from,
    cli::Cli,
    load_config,
    runtime::{emit, SpriteSaver},
    utils::init_logger,
    PokeApiClient, QueryPipeline, Request,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments; clap exits on invalid input
    let cli = Cli::parse();

    init_logger(cli.verbose);

    // Load configuration
    let mut config = if let Some(config_path) = &cli.config {
        load_config_from(config_path)?
    } else {
        load_config().unwrap_or_default()
    };
    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }

    let sprite_saver = cli.sprites.as_ref().map(SpriteSaver::new).transpose()?;

    let mut request = Request::new(cli.mode, cli.input, cli.expanded, &cli.output)
        .with_sprites(sprite_saver.is_some());

    let pipeline = QueryPipeline::new(Box::new(PokeApiClient::new(&config.api)?));

    let resolved = pipeline
        .run_request(&mut request, |event| {
            if let Some(saver) = &sprite_saver {
                if let Err(e) = saver.save(event) {
                    tracing::warn!("Could not save sprite for '{}': {}", event.identifier, e);
                }
            }
        })
        .await;

    if let Err(e) = resolved {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    emit(&request.output, &request.results)?;

    Ok(())
}
