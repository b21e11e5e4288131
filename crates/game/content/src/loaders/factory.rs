//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use game_core::{AreaLayout, GameConfig};

use crate::bundle::ContentBundle;
use crate::items::ItemCatalog;
use crate::loaders::{AreaLoader, ConfigLoader, ItemLoader, LoadResult};

/// Content factory that loads game content from a data directory.
///
/// Every file is optional; anything missing falls back to the built-in
/// content.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── items.ron
/// └── areas/
///     ├── camp.ron
///     └── ravine.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<ItemCatalog> {
        let path = self.data_dir.join("items.ron");
        if !path.exists() {
            return Ok(ItemCatalog::standard());
        }
        ItemLoader::load(&path)
    }

    /// Load every `areas/*.ron` layout, sorted by file name.
    pub fn load_areas(&self) -> LoadResult<Vec<AreaLayout>> {
        let dir = self.data_dir.join("areas");
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?
        {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "ron") {
                paths.push(path);
            }
        }
        paths.sort();

        paths.iter().map(|path| AreaLoader::load(path)).collect()
    }

    /// Loads the configuration and a content bundle built on top of it.
    pub fn load_bundle(&self) -> LoadResult<(GameConfig, ContentBundle)> {
        let config = self.load_config()?;
        let mut bundle = ContentBundle::standard(&config);
        bundle.items = self.load_items()?;
        for layout in self.load_areas()? {
            bundle.areas = bundle.areas.with_override(layout);
        }
        Ok((config, bundle))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{AreaId, ZoneOracle};

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn empty_directory_gives_builtin_content() {
        let dir = tempfile::tempdir().unwrap();
        let (config, bundle) = ContentFactory::new(dir.path()).load_bundle().unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(bundle.items.len(), 7);
        assert!(bundle.areas.layout(AreaId::CAMP, config.seed).is_some());
    }

    #[test]
    fn data_files_override_builtins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "seed = 5\n").unwrap();
        std::fs::create_dir(dir.path().join("areas")).unwrap();
        std::fs::write(
            dir.path().join("areas").join("ravine.ron"),
            "(area: AreaId(3), hazard: Some((delay: 0.25)))",
        )
        .unwrap();
        std::fs::write(dir.path().join("areas").join("notes.txt"), "ignored").unwrap();

        let factory = ContentFactory::new(dir.path());
        let (config, bundle) = factory.load_bundle().unwrap();
        assert_eq!(config.seed, 5);

        let ravine = bundle.areas.layout(AreaId::RAVINE, config.seed).unwrap();
        assert!(ravine.rocks.is_empty());
        assert_eq!(ravine.hazard.unwrap().delay, 0.25);
    }

    #[test]
    fn broken_area_file_names_the_format() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("areas")).unwrap();
        std::fs::write(dir.path().join("areas").join("camp.ron"), "(area: ").unwrap();

        let error = ContentFactory::new(dir.path()).load_areas().unwrap_err();
        assert!(error.to_string().starts_with("Failed to parse area RON"));
    }
}
