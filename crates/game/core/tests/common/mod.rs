//! Shared fixtures for game-core integration tests.
#![allow(dead_code)]

use game_core::{
    AreaId, AreaLayout, Decoration, DecorationOracle, DialogueContext, DialogueEffect,
    DialogueOracle, DialogueScript, Env, ExitRule, Facing, GameConfig, GameEngine, GameEnv,
    GameState, GateKind, GateLock, GateSpawn, Hazard, InputState, ItemDefinition, ItemKind,
    ItemOracle, ItemSpawn, NpcKind, NpcSpawn, QuestFlags, Rect, SpriteOracle, TickReport, Vec2,
    ZoneOracle,
};

pub const HOMELESS: Rect = Rect::new(260.0, 180.0, 32.0, 40.0);
pub const EAST_GATE: Rect = Rect::new(620.0, 180.0, 20.0, 160.0);
pub const IRON_GATE: Rect = Rect::new(620.0, 200.0, 20.0, 160.0);
pub const RUSTY_KEY: Rect = Rect::new(320.0, 420.0, 16.0, 16.0);

pub struct Areas;

impl ZoneOracle for Areas {
    fn layout(&self, area: AreaId, _seed: u64) -> Option<AreaLayout> {
        match area {
            AreaId::CAMP => Some(camp()),
            AreaId::EASTERN_WOODS => Some(woods()),
            AreaId::RAVINE => Some(ravine()),
            _ => None,
        }
    }
}

/// East fence with a gap between `gap_top` and `gap_bottom`.
fn fence(gap_top: f32, gap_bottom: f32) -> Vec<Rect> {
    vec![
        Rect::new(620.0, 0.0, 20.0, gap_top),
        Rect::new(620.0, gap_bottom, 20.0, 576.0 - gap_bottom),
    ]
}

fn camp() -> AreaLayout {
    AreaLayout {
        area: AreaId::CAMP,
        walls: fence(EAST_GATE.top(), EAST_GATE.bottom()),
        tent_anchors: vec![Vec2::new(150.0, 150.0)],
        npcs: vec![NpcSpawn {
            kind: NpcKind::Homeless,
            bounds: HOMELESS,
        }],
        coins: (0..5)
            .map(|i| Rect::new(40.0 + i as f32 * 40.0, 400.0, 18.0, 18.0))
            .collect(),
        gates: vec![GateSpawn {
            kind: GateKind::EastGate,
            bounds: EAST_GATE,
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

fn woods() -> AreaLayout {
    AreaLayout {
        area: AreaId::EASTERN_WOODS,
        walls: fence(IRON_GATE.top(), IRON_GATE.bottom()),
        items: vec![ItemSpawn {
            kind: ItemKind::RustyKey,
            quantity: 1,
            bounds: RUSTY_KEY,
        }],
        gates: vec![GateSpawn {
            kind: GateKind::IronGate,
            bounds: IRON_GATE,
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

fn ravine() -> AreaLayout {
    AreaLayout {
        area: AreaId::RAVINE,
        hazard: Some(Hazard { delay: 1.5 }),
        ..AreaLayout::default()
    }
}

pub struct Decorations;

impl DecorationOracle for Decorations {
    fn trees(&self, anchors: &[Vec2]) -> Vec<Decoration> {
        anchors
            .iter()
            .map(|a| Decoration {
                visual: Rect::new(a.x - 32.0, a.y - 63.0, 64.0, 63.0),
                collider: Rect::new(a.x - 8.0, a.y - 13.0, 17.0, 11.0),
            })
            .collect()
    }

    fn tents(&self, anchors: &[Vec2]) -> Vec<Decoration> {
        anchors
            .iter()
            .map(|a| Decoration {
                visual: Rect::new(a.x, a.y - 80.0, 96.0, 80.0),
                collider: Rect::new(a.x + 19.0, a.y - 17.0, 57.0, 17.0),
            })
            .collect()
    }
}

pub struct Dialogue;

impl DialogueOracle for Dialogue {
    fn resolve(&self, npc: NpcKind, context: &DialogueContext) -> DialogueScript {
        match npc {
            NpcKind::Homeless if context.flags.contains(QuestFlags::GATE_QUEST_DONE) => {
                DialogueScript::new(["The gate is open now."])
            }
            NpcKind::Homeless if context.coins >= 5 => {
                DialogueScript::new(["One, two...", "Go east."]).with_effect(
                    DialogueEffect::OpenGate {
                        gate: GateKind::EastGate,
                        flag: QuestFlags::GATE_QUEST_DONE,
                    },
                )
            }
            NpcKind::Homeless => DialogueScript::new(["Bring me 5 coins!"]),
            NpcKind::Scout => DialogueScript::new(["..."]),
        }
    }
}

pub struct Items;

impl ItemOracle for Items {
    fn definition(&self, kind: ItemKind) -> Option<ItemDefinition> {
        (kind == ItemKind::RustyKey).then(|| ItemDefinition {
            kind,
            name: "Rusty Key".into(),
            icon: "k".into(),
            use_text: "Nothing happens.".into(),
        })
    }
}

pub struct Sprites;

impl SpriteOracle for Sprites {
    fn walk_frames(&self, _facing: Facing) -> usize {
        3
    }
}

static AREAS: Areas = Areas;
static DECORATIONS: Decorations = Decorations;
static DIALOGUE: Dialogue = Dialogue;
static ITEMS: Items = Items;
static SPRITES: Sprites = Sprites;

pub fn env() -> GameEnv<'static> {
    Env::with_all(&AREAS, &DECORATIONS, &DIALOGUE, &ITEMS, &SPRITES).as_game_env()
}

/// A running session plus its input queue.
pub struct Session {
    pub config: GameConfig,
    pub state: GameState,
    pub input: InputState,
}

impl Session {
    pub fn start() -> Self {
        let config = GameConfig::default();
        let state = GameEngine::start_session(env(), &config).expect("session starts");
        Self {
            config,
            state,
            input: InputState::new(),
        }
    }

    pub fn tick(&mut self, dt: f32) -> TickReport {
        GameEngine::new(&mut self.state, &self.config)
            .tick(env(), &mut self.input, dt)
            .expect("tick succeeds")
    }

    /// Ticks `count` frames, collecting every report.
    pub fn run(&mut self, count: usize, dt: f32) -> Vec<TickReport> {
        (0..count).map(|_| self.tick(dt)).collect()
    }

    pub fn press(&mut self, key: game_core::Key) -> TickReport {
        self.input.key_down(key);
        let report = self.tick(0.016);
        self.input.key_up(key);
        report
    }

    pub fn teleport(&mut self, x: f32, y: f32) {
        self.state.player.bounds = self.state.player.bounds.with_origin(Vec2::new(x, y));
    }
}
