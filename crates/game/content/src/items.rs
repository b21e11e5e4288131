//! Item display names, icons and use text.

use std::collections::HashMap;

use game_core::{ItemDefinition, ItemKind, ItemOracle};

#[derive(Clone, Debug, Default)]
pub struct ItemCatalog {
    definitions: HashMap<ItemKind, ItemDefinition>,
}

impl ItemCatalog {
    pub fn from_definitions(definitions: impl IntoIterator<Item = ItemDefinition>) -> Self {
        Self {
            definitions: definitions
                .into_iter()
                .map(|definition| (definition.kind, definition))
                .collect(),
        }
    }

    pub fn standard() -> Self {
        Self::from_definitions(
            [
                (
                    ItemKind::RustyKey,
                    "Rusty Key",
                    "🗝",
                    "It's cold and flaked with rust. Some lock must want it.",
                ),
                (
                    ItemKind::Mushroom,
                    "Mushroom",
                    "🍄",
                    "You nibble the mushroom. Earthy, and hopefully harmless.",
                ),
                (ItemKind::Herb, "Herb", "🌿", "You crush the herb. The smell clears your head."),
                (
                    ItemKind::Lantern,
                    "Lantern",
                    "🏮",
                    "The lantern flickers to life, then sputters out.",
                ),
                (ItemKind::Berries, "Berries", "🫐", "Sweet and a little sour."),
                (ItemKind::Flint, "Flint", "🪨", "Sparks jump from the flint and die in the grass."),
                (ItemKind::Feather, "Feather", "🪶", "You twirl the feather. Nothing happens."),
            ]
            .into_iter()
            .map(|(kind, name, icon, use_text)| ItemDefinition {
                kind,
                name: name.to_owned(),
                icon: icon.to_owned(),
                use_text: use_text.to_owned(),
            }),
        )
    }

    /// Adds or replaces one definition.
    pub fn insert(&mut self, definition: ItemDefinition) {
        self.definitions.insert(definition.kind, definition);
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl ItemOracle for ItemCatalog {
    fn definition(&self, kind: ItemKind) -> Option<ItemDefinition> {
        self.definitions.get(&kind).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_covers_every_kind() {
        let catalog = ItemCatalog::standard();
        assert_eq!(catalog.len(), 7);
        assert_eq!(
            catalog.definition(ItemKind::RustyKey).map(|item| item.name),
            Some("Rusty Key".to_owned())
        );
    }

    #[test]
    fn insert_overrides_by_kind() {
        let mut catalog = ItemCatalog::standard();
        catalog.insert(ItemDefinition {
            kind: ItemKind::Herb,
            name: "Sage".into(),
            icon: "s".into(),
            use_text: "Fragrant.".into(),
        });
        assert_eq!(catalog.len(), 7);
        assert_eq!(catalog.definition(ItemKind::Herb).unwrap().name, "Sage");
    }
}
