//! In-crate stub oracles for engine unit tests.

use crate::env::{
    AreaLayout, Decoration, DecorationOracle, DialogueOracle, Env, GameEnv, GateSpawn,
    ItemDefinition, ItemOracle, ItemSpawn, NpcSpawn, SpriteOracle, ZoneOracle,
};
use crate::geometry::{Rect, Vec2};
use crate::state::{
    AreaId, DialogueContext, DialogueEffect, DialogueScript, ExitRule, Facing, GateKind, GateLock,
    Hazard, ItemKind, NpcKind, QuestFlags,
};

pub struct StubZones {
    pub layouts: Vec<AreaLayout>,
}

impl ZoneOracle for StubZones {
    fn layout(&self, area: AreaId, _seed: u64) -> Option<AreaLayout> {
        self.layouts
            .iter()
            .find(|layout| layout.area == area)
            .cloned()
    }
}

pub struct StubDecorations;

impl DecorationOracle for StubDecorations {
    fn trees(&self, anchors: &[Vec2]) -> Vec<Decoration> {
        anchors
            .iter()
            .map(|anchor| Decoration {
                visual: Rect::new(anchor.x - 32.0, anchor.y - 63.0, 64.0, 63.0),
                collider: Rect::new(anchor.x - 9.0, anchor.y - 13.0, 18.0, 11.0),
            })
            .collect()
    }

    fn tents(&self, anchors: &[Vec2]) -> Vec<Decoration> {
        anchors
            .iter()
            .map(|anchor| Decoration {
                visual: Rect::new(anchor.x, anchor.y - 80.0, 96.0, 80.0),
                collider: Rect::new(anchor.x + 19.0, anchor.y - 17.0, 57.0, 17.0),
            })
            .collect()
    }
}

pub struct StubDialogue;

impl DialogueOracle for StubDialogue {
    fn resolve(&self, npc: NpcKind, context: &DialogueContext) -> DialogueScript {
        match npc {
            NpcKind::Homeless if context.flags.contains(QuestFlags::GATE_QUEST_DONE) => {
                DialogueScript::new(["The gate is open now."])
            }
            NpcKind::Homeless if context.coins >= 5 => {
                DialogueScript::new(["Counting...", "Go east."]).with_effect(
                    DialogueEffect::OpenGate {
                        gate: GateKind::EastGate,
                        flag: QuestFlags::GATE_QUEST_DONE,
                    },
                )
            }
            NpcKind::Homeless => DialogueScript::new(["Bring me 5 coins!"]),
            // No lines: the effect applies without opening a dialogue.
            NpcKind::Scout => DialogueScript::default().with_effect(DialogueEffect::OpenGate {
                gate: GateKind::EastGate,
                flag: QuestFlags::GATE_QUEST_DONE,
            }),
        }
    }
}

pub struct StubItems;

impl ItemOracle for StubItems {
    fn definition(&self, kind: ItemKind) -> Option<ItemDefinition> {
        match kind {
            ItemKind::RustyKey => Some(ItemDefinition {
                kind,
                name: "Rusty Key".into(),
                icon: "key".into(),
                use_text: "It doesn't fit anything here.".into(),
            }),
            _ => None,
        }
    }
}

pub struct StubSprites;

impl SpriteOracle for StubSprites {
    fn walk_frames(&self, _facing: Facing) -> usize {
        4
    }
}

/// Owns one of each stub so tests can borrow a [`GameEnv`] from it.
pub struct TestWorld {
    pub zones: StubZones,
}

impl TestWorld {
    pub fn new() -> Self {
        Self {
            zones: StubZones {
                layouts: vec![camp(), woods(), ravine()],
            },
        }
    }

    pub fn env(&self) -> GameEnv<'_> {
        static DECORATIONS: StubDecorations = StubDecorations;
        static DIALOGUE: StubDialogue = StubDialogue;
        static ITEMS: StubItems = StubItems;
        static SPRITES: StubSprites = StubSprites;
        Env::with_all(&self.zones, &DECORATIONS, &DIALOGUE, &ITEMS, &SPRITES).as_game_env()
    }
}

pub const HOMELESS_BOUNDS: Rect = Rect::new(260.0, 180.0, 32.0, 40.0);
pub const EAST_GATE_BOUNDS: Rect = Rect::new(600.0, 200.0, 16.0, 120.0);
pub const IRON_GATE_BOUNDS: Rect = Rect::new(600.0, 240.0, 16.0, 120.0);
pub const KEY_BOUNDS: Rect = Rect::new(300.0, 400.0, 16.0, 16.0);

pub fn camp() -> AreaLayout {
    AreaLayout {
        area: AreaId::CAMP,
        walls: vec![Rect::new(600.0, 0.0, 16.0, 200.0)],
        tent_anchors: vec![Vec2::new(150.0, 150.0)],
        tree_anchors: vec![Vec2::new(400.0, 500.0)],
        npcs: vec![NpcSpawn {
            kind: NpcKind::Homeless,
            bounds: HOMELESS_BOUNDS,
        }],
        coins: vec![Rect::new(20.0, 300.0, 18.0, 18.0)],
        gates: vec![GateSpawn {
            kind: GateKind::EastGate,
            bounds: EAST_GATE_BOUNDS,
            lock: GateLock::Quest,
            flag: QuestFlags::GATE_QUEST_DONE,
        }],
        exits: vec![ExitRule {
            to: AreaId::EASTERN_WOODS,
            requires_flag: QuestFlags::GATE_QUEST_DONE,
            requires_gate_removed: Some(GateKind::EastGate),
        }],
        ..AreaLayout::default()
    }
}

pub fn woods() -> AreaLayout {
    AreaLayout {
        area: AreaId::EASTERN_WOODS,
        npcs: vec![NpcSpawn {
            kind: NpcKind::Scout,
            bounds: Rect::new(480.0, 120.0, 32.0, 50.0),
        }],
        items: vec![ItemSpawn {
            kind: ItemKind::RustyKey,
            quantity: 1,
            bounds: KEY_BOUNDS,
        }],
        gates: vec![GateSpawn {
            kind: GateKind::IronGate,
            bounds: IRON_GATE_BOUNDS,
            lock: GateLock::Key(ItemKind::RustyKey),
            flag: QuestFlags::IRON_GATE_UNLOCKED,
        }],
        exits: vec![ExitRule {
            to: AreaId::RAVINE,
            requires_flag: QuestFlags::empty(),
            requires_gate_removed: Some(GateKind::IronGate),
        }],
        ..AreaLayout::default()
    }
}

pub fn ravine() -> AreaLayout {
    AreaLayout {
        area: AreaId::RAVINE,
        rocks: vec![Rect::new(0.0, 0.0, 640.0, 30.0)],
        hazard: Some(Hazard { delay: 1.5 }),
        ..AreaLayout::default()
    }
}
