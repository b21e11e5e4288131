//! Wayfarer terminal client.
//!
//! Composition root: environment config, logging, content, runtime and the
//! terminal frontend, in that order.

use std::sync::Arc;

use anyhow::{Context, Result};
use game_content::{ConfigLoader, ContentBundle, ContentFactory};
use game_core::{GameConfig, SpriteOracle};
use runtime::{Runtime, RuntimeConfig};
use wayfarer_client::frontend::{App, GlyphSprites};
use wayfarer_client::{ClientConfig, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _log_guard = logging::setup_logging(&config)?;

    tracing::info!("Starting Wayfarer");

    let (game_config, content) = load_content(&config)?;
    tracing::info!(seed = game_config.seed, fps = config.fps, "Content loaded");

    let items = content.items.clone();
    let sprites = Arc::new(GlyphSprites::standard());
    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            game_config,
            frame_interval: RuntimeConfig::frame_interval_for(config.fps),
            ..RuntimeConfig::default()
        })
        .content(content)
        .sprites(sprites.clone() as Arc<dyn SpriteOracle>)
        .build()
        .await?;

    let app = App::new(runtime.handle(), items, sprites, config.hold);
    let result = app.run().await;

    runtime.shutdown().await?;
    tracing::info!("Wayfarer stopped");
    result
}

/// Game config and content. A data directory replaces the built-in items
/// and area layouts; an explicit config file wins over its `config.toml`.
fn load_content(config: &ClientConfig) -> Result<(GameConfig, ContentBundle)> {
    let factory = config.data_dir.as_ref().map(ContentFactory::new);

    let mut game_config = match (&config.config_path, &factory) {
        (Some(path), _) => ConfigLoader::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        (None, Some(factory)) => factory.load_config()?,
        (None, None) => GameConfig::default(),
    };
    if let Some(seed) = config.seed {
        game_config.seed = seed;
    }

    let mut content = ContentBundle::standard(&game_config);
    if let Some(factory) = &factory {
        content.items = factory.load_items()?;
        for layout in factory.load_areas()? {
            tracing::info!(area = %layout.area, "Using area layout from data directory");
            content.areas = content.areas.with_override(layout);
        }
    }
    Ok((game_config, content))
}
