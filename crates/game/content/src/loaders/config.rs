//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing sections and keys fall back to [`GameConfig::default`].
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Self::validate(&config)?;
        Ok(config)
    }

    fn validate(config: &GameConfig) -> LoadResult<()> {
        let world = &config.world;
        if world.width <= 0.0 || world.height <= 0.0 {
            anyhow::bail!(
                "world must have a positive size, got {}x{}",
                world.width,
                world.height
            );
        }
        if config.timing.max_tick <= 0.0 {
            anyhow::bail!("timing.max_tick must be positive");
        }
        if config.player.base_speed < 0.0 {
            anyhow::bail!("player.base_speed must not be negative");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            seed = 99

            [world]
            width = 800.0
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, 99);
        assert_eq!(config.world.width, 800.0);
        assert_eq!(config.world.height, GameConfig::default().world.height);
        assert_eq!(config.timing, GameConfig::default().timing);
    }

    #[test]
    fn rejects_empty_world() {
        let error = ConfigLoader::parse("[world]\nheight = 0.0\n").unwrap_err();
        assert!(error.to_string().contains("positive size"));
    }

    #[test]
    fn reports_missing_file() {
        let error = ConfigLoader::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(error.to_string().starts_with("Failed to read file"));
    }
}
