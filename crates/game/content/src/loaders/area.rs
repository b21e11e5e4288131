//! Area layout loader.

use std::path::Path;

use game_core::AreaLayout;

use crate::loaders::{LoadResult, read_file};

/// Loader for hand-authored area layouts from RON files.
///
/// A loaded layout replaces the procedural one for its area, see
/// [`AreaCatalog::with_override`](crate::AreaCatalog::with_override).
pub struct AreaLoader;

impl AreaLoader {
    pub fn load(path: &Path) -> LoadResult<AreaLayout> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<AreaLayout> {
        let layout: AreaLayout = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse area RON: {}", e))?;

        for gate in &layout.gates {
            if gate.bounds.w <= 0.0 || gate.bounds.h <= 0.0 {
                anyhow::bail!("gate {} in area {} has an empty rectangle", gate.kind, layout.area);
            }
        }
        if layout.hazard.is_some() && !layout.exits.is_empty() {
            anyhow::bail!("area {} has a hazard and exits", layout.area);
        }
        Ok(layout)
    }
}
