//! Read-only presentation snapshot.
//!
//! Frontends draw from a [`GameView`] and never touch [`GameState`]
//! directly, so the same view can be sent across threads or channels.

use crate::config::GameConfig;
use crate::geometry::{Rect, Vec2};
use crate::state::{
    AreaId, Facing, GameState, GateKind, HintTarget, InventorySlot, ItemKind, NpcKind, PropKind,
};

/// Everything a frontend needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameView {
    pub world: Vec2,
    pub area: AreaId,

    pub player: Rect,
    pub facing: Facing,
    pub moving: bool,
    /// Idle pose is drawn flipped.
    pub mirrored: bool,
    pub frame: usize,
    pub speed: f32,

    pub coins: u32,
    pub obstacle_count: usize,
    pub inventory: Vec<InventorySlot>,
    pub inventory_open: bool,

    pub dialogue: Option<DialogueView>,
    pub hint: Option<HintView>,
    pub notices: Vec<String>,

    /// Screen darkness in `[0, 1]`.
    pub fade: f32,
    pub dead: bool,

    pub props: Vec<PropView>,
    pub npcs: Vec<NpcView>,
    pub items: Vec<ItemView>,
    pub coin_rects: Vec<Rect>,
    pub gates: Vec<GateView>,
    pub walls: Vec<Rect>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialogueView {
    pub speaker: NpcKind,
    pub line: String,
    /// Zero-based index of the current line.
    pub index: usize,
    pub total: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HintView {
    pub target: HintTarget,
    pub anchor: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropView {
    pub kind: PropKind,
    pub visual: Rect,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcView {
    pub kind: NpcKind,
    pub bounds: Rect,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemView {
    pub kind: ItemKind,
    pub quantity: u32,
    pub bounds: Rect,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GateView {
    pub kind: GateKind,
    pub bounds: Rect,
    pub locked: bool,
}

impl GameView {
    pub fn from_state(state: &GameState, config: &GameConfig) -> Self {
        let animation = &state.player.animation;
        let entities = &state.entities;

        Self {
            world: Vec2::new(config.world.width, config.world.height),
            area: state.zone.area,
            player: state.player.bounds,
            facing: animation.facing,
            moving: animation.moving,
            mirrored: animation.mirrored(),
            frame: animation.frame,
            speed: state.player.speed,
            coins: state.quest.coins,
            obstacle_count: state.obstacles.len(),
            inventory: state.inventory.slots().to_vec(),
            inventory_open: state.ui.inventory_open,
            dialogue: state.dialogue.as_ref().and_then(|dialogue| {
                dialogue.current_line().map(|line| DialogueView {
                    speaker: dialogue.speaker,
                    line: line.to_owned(),
                    index: dialogue.index,
                    total: dialogue.script.lines.len(),
                })
            }),
            hint: state.ui.hint.map(|hint| HintView {
                target: hint.target,
                anchor: hint.anchor,
            }),
            notices: state
                .ui
                .notices
                .iter()
                .map(|notice| notice.text.clone())
                .collect(),
            fade: state.zone.fade_level(config.timing.fade_duration),
            dead: state.is_dead(),
            props: entities
                .props
                .iter()
                .map(|prop| PropView {
                    kind: prop.kind,
                    visual: prop.visual,
                })
                .collect(),
            npcs: entities
                .npcs
                .iter()
                .map(|npc| NpcView {
                    kind: npc.kind,
                    bounds: npc.bounds,
                })
                .collect(),
            items: entities
                .items
                .iter()
                .map(|item| ItemView {
                    kind: item.kind,
                    quantity: item.quantity,
                    bounds: item.bounds,
                })
                .collect(),
            coin_rects: entities.coins.iter().map(|coin| coin.bounds).collect(),
            gates: entities
                .gates
                .iter()
                .map(|gate| GateView {
                    kind: gate.kind,
                    bounds: gate.bounds,
                    locked: gate.required_key().is_some(),
                })
                .collect(),
            walls: state
                .obstacles
                .iter()
                .filter(|obstacle| {
                    matches!(
                        obstacle.tag,
                        crate::state::ObstacleTag::Wall | crate::state::ObstacleTag::Rock
                    )
                })
                .map(|obstacle| obstacle.bounds)
                .collect(),
        }
    }
}
