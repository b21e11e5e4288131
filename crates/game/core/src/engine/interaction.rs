//! Interaction dispatcher and inventory actions.
//!
//! One interact press does exactly one thing, chosen by priority: advance an
//! open dialogue, pick up an item, try a locked gate, talk to an NPC.

use crate::config::GameConfig;
use crate::env::{GameEnv, OracleError};
use crate::event::GameEvent;
use crate::geometry::{Rect, Vec2, clamp};
use crate::state::{
    DialogueEffect, DialogueState, DialogueStep, EntityId, Facing, GameState, GateKind, GateState,
    InventoryError, ItemKind, ObstacleTag, PropKind, WorldItem,
};

use super::errors::{EngineError, TickPhase};
use super::proximity;

/// Size of an item spawned by dropping it.
pub const DROPPED_ITEM_SIZE: Vec2 = Vec2::new(16.0, 16.0);

/// Handles a single interact press.
pub fn interact(
    state: &mut GameState,
    config: &GameConfig,
    env: &GameEnv<'_>,
    events: &mut Vec<GameEvent>,
) -> Result<(), OracleError> {
    if state.dialogue.is_some() {
        advance_dialogue(state, config, events);
        return Ok(());
    }

    if let Some(item) = proximity::nearest_item(state, config) {
        let id = item.id;
        return pick_up(state, config, env, id, events);
    }

    if let Some(gate) = proximity::nearest_locked_gate(state, config) {
        let kind = gate.kind;
        try_unlock(state, config, env, kind, events)?;
        return Ok(());
    }

    if let Some(npc) = proximity::nearest_npc(state, config) {
        let id = npc.id;
        return talk(state, config, env, id, events);
    }

    Ok(())
}

fn advance_dialogue(state: &mut GameState, config: &GameConfig, events: &mut Vec<GameEvent>) {
    let Some(dialogue) = state.dialogue.as_mut() else {
        return;
    };
    match dialogue.advance() {
        DialogueStep::Next => events.push(GameEvent::DialogueAdvanced {
            line: dialogue.index,
        }),
        DialogueStep::Finished(effect) => {
            let speaker = dialogue.speaker;
            state.dialogue = None;
            events.push(GameEvent::DialogueClosed { npc: speaker });
            if let Some(effect) = effect {
                apply_effect(state, config, effect, events);
            }
        }
    }
}

/// Applies a dialogue completion effect at most once per session.
///
/// The effect's flag is the idempotency guard: replaying the dialogue after
/// the flag is set does nothing.
pub fn apply_effect(
    state: &mut GameState,
    config: &GameConfig,
    effect: DialogueEffect,
    events: &mut Vec<GameEvent>,
) {
    match effect {
        DialogueEffect::OpenGate { gate, flag } => {
            if !state.quest.raise(flag) {
                return;
            }
            open_gate(state, gate, events);
            if gate == GateKind::EastGate {
                // The camp packs up once the way east is open.
                state.entities.remove_props(PropKind::Tent);
                state
                    .obstacles
                    .remove_tagged(|tag| *tag == ObstacleTag::Tent);
                state.ui.notify(
                    "You hear a heavy bolt slide open to the east...",
                    config.timing.notice_duration,
                );
            }
        }
    }
}

/// Removes the gate and its obstacle. Opening an absent gate is a no-op.
fn open_gate(state: &mut GameState, gate: GateKind, events: &mut Vec<GameEvent>) {
    let removed_entity = state.entities.remove_gate(gate).is_some();
    let removed_obstacles = state
        .obstacles
        .remove_tagged(|tag| *tag == ObstacleTag::Gate(gate));
    if removed_entity || removed_obstacles > 0 {
        events.push(GameEvent::GateOpened { gate });
    }
}

fn pick_up(
    state: &mut GameState,
    config: &GameConfig,
    env: &GameEnv<'_>,
    id: EntityId,
    events: &mut Vec<GameEvent>,
) -> Result<(), OracleError> {
    let Some(item) = state.entities.item(id) else {
        return Ok(());
    };
    let kind = item.kind;
    let name = item_name(env, kind)?;

    if !state.inventory.can_accept(kind) {
        state
            .ui
            .notify("Your pack is full.", config.timing.notice_duration);
        events.push(GameEvent::PackFull { kind });
        return Ok(());
    }

    let Some(item) = state.entities.remove_item(id) else {
        return Ok(());
    };
    match state.inventory.add(kind, item.quantity) {
        Ok(total) => {
            let text = if item.quantity > 1 {
                format!("Picked up {name} x{}.", item.quantity)
            } else {
                format!("Picked up {name}.")
            };
            state.ui.notify(text, config.timing.notice_duration);
            events.push(GameEvent::ItemPickedUp { kind, total });
        }
        Err(_) => {
            state.entities.items.push(item);
            events.push(GameEvent::PackFull { kind });
        }
    }
    Ok(())
}

fn try_unlock(
    state: &mut GameState,
    config: &GameConfig,
    env: &GameEnv<'_>,
    gate: GateKind,
    events: &mut Vec<GameEvent>,
) -> Result<(), OracleError> {
    let Some((key, flag)) = state
        .entities
        .gate(gate)
        .and_then(|found| found.required_key().map(|key| (key, found.flag)))
    else {
        return Ok(());
    };

    if state.inventory.consume_one(key).is_err() {
        let key_name = item_name(env, key)?;
        state.ui.notify(
            format!("It's locked. You'll need a {key_name}."),
            config.timing.locked_notice_duration,
        );
        events.push(GameEvent::GateLocked { gate });
        return Ok(());
    }

    open_gate(state, gate, events);
    state.quest.raise(flag);
    state.ui.notify(
        "The key turns with a groan. The way is open.",
        config.timing.notice_duration,
    );
    Ok(())
}

fn talk(
    state: &mut GameState,
    config: &GameConfig,
    env: &GameEnv<'_>,
    id: EntityId,
    events: &mut Vec<GameEvent>,
) -> Result<(), OracleError> {
    let Some(npc) = state.entities.npc(id) else {
        return Ok(());
    };
    let kind = npc.kind;
    let npc_bounds = npc.bounds;

    let context = state.dialogue_context();
    let script = env.dialogue()?.resolve(kind, &context);

    let offset = npc_bounds.center() - state.player.bounds.center();
    if let Some(facing) = Facing::from_offset(offset.x, offset.y) {
        state.player.animation.facing = facing;
    }

    if script.lines.is_empty() {
        // Nothing to say; the completion effect still applies.
        if let Some(effect) = script.effect {
            apply_effect(state, config, effect, events);
        }
        return Ok(());
    }

    state.dialogue = Some(DialogueState::open(id, kind, script));
    events.push(GameEvent::DialogueOpened { npc: kind });
    Ok(())
}

/// Uses one unit of `kind` and shows its use text.
///
/// A key is only spent on a locked gate it opens within reach; anywhere
/// else the use is refused and the key stays in the pack.
pub fn use_item(
    state: &mut GameState,
    config: &GameConfig,
    env: &GameEnv<'_>,
    kind: ItemKind,
    events: &mut Vec<GameEvent>,
) -> Result<(), EngineError> {
    if !state.inventory.contains(kind) {
        return Err(InventoryError::NotHeld(kind).into());
    }

    let opens = |gate: &GateState| gate.required_key() == Some(kind);
    if kind.is_key() || state.entities.gates.iter().any(opens) {
        let gate = proximity::nearest_locked_gate(state, config)
            .filter(|gate| opens(*gate))
            .map(|gate| gate.kind);
        if let Some(gate) = gate {
            return try_unlock(state, config, env, gate, events)
                .map_err(|error| EngineError::oracle(TickPhase::Commands, error));
        }
        let text = use_text(env, kind)?;
        state.ui.notify(text, config.timing.notice_duration);
        return Err(InventoryError::NoUse(kind).into());
    }

    let text = use_text(env, kind)?;
    let remaining = state.inventory.consume_one(kind)?;
    state.ui.notify(text, config.timing.notice_duration);
    events.push(GameEvent::ItemUsed { kind, remaining });
    Ok(())
}

/// Drops the whole stack of `kind` at the player's feet.
pub fn drop_item(
    state: &mut GameState,
    config: &GameConfig,
    kind: ItemKind,
    events: &mut Vec<GameEvent>,
) -> Result<(), EngineError> {
    let slot = state.inventory.take(kind)?;
    let bounds = drop_bounds(&state.player.bounds, config);
    let id = state.allocate_entity_id();
    state.entities.items.push(WorldItem {
        id,
        kind,
        quantity: slot.quantity,
        bounds,
    });
    events.push(GameEvent::ItemDropped {
        kind,
        quantity: slot.quantity,
    });
    Ok(())
}

/// Rectangle centred on the player's feet, kept inside the world.
fn drop_bounds(player: &Rect, config: &GameConfig) -> Rect {
    let feet = player.bottom_center();
    let size = DROPPED_ITEM_SIZE;
    Rect::new(
        clamp(feet.x - size.x / 2.0, 0.0, config.world.width - size.x),
        clamp(feet.y - size.y, 0.0, config.world.height - size.y),
        size.x,
        size.y,
    )
}

fn use_text(env: &GameEnv<'_>, kind: ItemKind) -> Result<String, EngineError> {
    Ok(env
        .items()
        .map_err(|error| EngineError::oracle(TickPhase::Commands, error))?
        .definition(kind)
        .map(|definition| definition.use_text)
        .unwrap_or_else(|| format!("You use the {kind}.")))
}

fn item_name(env: &GameEnv<'_>, kind: ItemKind) -> Result<String, OracleError> {
    Ok(env
        .items()?
        .definition(kind)
        .map(|definition| definition.name)
        .unwrap_or_else(|| kind.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GameEngine;
    use crate::engine::test_support::{HOMELESS_BOUNDS, TestWorld};
    use crate::engine::zone::mount_area;
    use crate::state::{AreaId, GateLock, GateState, QuestFlags};

    fn session(world: &TestWorld, config: &GameConfig) -> GameState {
        GameEngine::start_session(world.env(), config).expect("camp mounts")
    }

    fn herb_at(state: &mut GameState, bounds: Rect) -> EntityId {
        let id = state.allocate_entity_id();
        state.entities.items.push(WorldItem {
            id,
            kind: ItemKind::Herb,
            quantity: 1,
            bounds,
        });
        id
    }

    #[test]
    fn picks_up_the_item_in_reach() {
        let world = TestWorld::new();
        let config = GameConfig::default();
        let mut state = session(&world, &config);
        herb_at(&mut state, Rect::new(100.0, 155.0, 16.0, 16.0));

        let mut events = Vec::new();
        interact(&mut state, &config, &world.env(), &mut events).unwrap();

        assert_eq!(state.inventory.quantity(ItemKind::Herb), 1);
        assert!(state.entities.items.is_empty());
        assert_eq!(
            events,
            vec![GameEvent::ItemPickedUp {
                kind: ItemKind::Herb,
                total: 1
            }]
        );
        assert_eq!(state.ui.notices[0].text, "Picked up herb.");
    }

    #[test]
    fn full_pack_leaves_item_in_world() {
        let world = TestWorld::new();
        let config = GameConfig::default();
        let mut state = session(&world, &config);
        for kind in [
            ItemKind::RustyKey,
            ItemKind::Mushroom,
            ItemKind::Lantern,
            ItemKind::Berries,
            ItemKind::Flint,
            ItemKind::Feather,
        ] {
            state.inventory.add(kind, 1).unwrap();
        }
        herb_at(&mut state, Rect::new(100.0, 155.0, 16.0, 16.0));

        let mut events = Vec::new();
        interact(&mut state, &config, &world.env(), &mut events).unwrap();

        assert_eq!(events, vec![GameEvent::PackFull { kind: ItemKind::Herb }]);
        assert_eq!(state.entities.items.len(), 1);
        assert!(!state.inventory.contains(ItemKind::Herb));
        assert_eq!(state.ui.notices[0].text, "Your pack is full.");
    }

    #[test]
    fn locked_gate_needs_its_key() {
        let world = TestWorld::new();
        let config = GameConfig::default();
        let mut state = session(&world, &config);
        let bounds = Rect::new(140.0, 100.0, 16.0, 60.0);
        state.entities.gates.push(GateState {
            kind: GateKind::IronGate,
            bounds,
            lock: GateLock::Key(ItemKind::RustyKey),
            flag: QuestFlags::IRON_GATE_UNLOCKED,
            area: AreaId::CAMP,
        });
        state
            .obstacles
            .spawn(bounds, ObstacleTag::Gate(GateKind::IronGate));

        let mut events = Vec::new();
        interact(&mut state, &config, &world.env(), &mut events).unwrap();
        assert_eq!(events, vec![GameEvent::GateLocked { gate: GateKind::IronGate }]);
        assert_eq!(
            state.ui.notices[0].text,
            "It's locked. You'll need a Rusty Key."
        );
        assert_eq!(
            state.ui.notices[0].remaining,
            config.timing.locked_notice_duration
        );
        assert!(state.obstacles.contains_gate(GateKind::IronGate));

        state.inventory.add(ItemKind::RustyKey, 1).unwrap();
        events.clear();
        interact(&mut state, &config, &world.env(), &mut events).unwrap();
        assert_eq!(events, vec![GameEvent::GateOpened { gate: GateKind::IronGate }]);
        assert!(!state.obstacles.contains_gate(GateKind::IronGate));
        assert!(state.entities.gate(GateKind::IronGate).is_none());
        assert!(!state.inventory.contains(ItemKind::RustyKey));
        assert!(state.quest.has(QuestFlags::IRON_GATE_UNLOCKED));
    }

    #[test]
    fn finishing_the_coin_dialogue_opens_the_east_gate_once() {
        let world = TestWorld::new();
        let config = GameConfig::default();
        let mut state = session(&world, &config);
        state.player.bounds = Rect::new(220.0, 180.0, 32.0, 50.0);
        state.quest.coins = 5;
        assert!(state.obstacles.contains_tag(ObstacleTag::Tent));

        let env = world.env();
        let mut events = Vec::new();
        interact(&mut state, &config, &env, &mut events).unwrap();
        assert_eq!(
            events,
            vec![GameEvent::DialogueOpened {
                npc: crate::state::NpcKind::Homeless
            }]
        );
        assert_eq!(state.player.facing(), Facing::Right);
        assert_eq!(
            state.dialogue.as_ref().and_then(|d| d.current_line()),
            Some("Counting...")
        );

        interact(&mut state, &config, &env, &mut events).unwrap();
        interact(&mut state, &config, &env, &mut events).unwrap();
        assert!(state.dialogue.is_none());
        assert!(events.contains(&GameEvent::GateOpened { gate: GateKind::EastGate }));
        assert!(state.quest.has(QuestFlags::GATE_QUEST_DONE));
        assert!(!state.obstacles.contains_gate(GateKind::EastGate));
        assert!(!state.obstacles.contains_tag(ObstacleTag::Tent));
        assert!(state.entities.props.iter().all(|prop| prop.kind != PropKind::Tent));
        assert!(
            state
                .ui
                .notices
                .iter()
                .any(|notice| notice.text.contains("heavy bolt"))
        );

        // Replaying the effect does nothing once the flag is set.
        let obstacles = state.obstacles.len();
        events.clear();
        apply_effect(
            &mut state,
            &config,
            DialogueEffect::OpenGate {
                gate: GateKind::EastGate,
                flag: QuestFlags::GATE_QUEST_DONE,
            },
            &mut events,
        );
        assert!(events.is_empty());
        assert_eq!(state.obstacles.len(), obstacles);

        interact(&mut state, &config, &env, &mut events).unwrap();
        assert_eq!(
            state.dialogue.as_ref().and_then(|d| d.current_line()),
            Some("The gate is open now.")
        );
    }

    #[test]
    fn open_dialogue_takes_priority_over_items() {
        let world = TestWorld::new();
        let config = GameConfig::default();
        let mut state = session(&world, &config);
        state.player.bounds = Rect::new(220.0, 180.0, 32.0, 50.0);
        let env = world.env();
        let mut events = Vec::new();
        interact(&mut state, &config, &env, &mut events).unwrap();
        assert!(state.dialogue.is_some());

        herb_at(&mut state, Rect::new(220.0, 232.0, 16.0, 16.0));
        events.clear();
        interact(&mut state, &config, &env, &mut events).unwrap();
        assert_eq!(
            events,
            vec![GameEvent::DialogueClosed { npc: crate::state::NpcKind::Homeless }]
        );
        assert_eq!(state.entities.items.len(), 1);
        assert!(state.inventory.is_empty());
    }

    #[test]
    fn empty_script_applies_its_effect_without_opening() {
        let world = TestWorld::new();
        let config = GameConfig::default();
        let mut state = session(&world, &config);
        let env = world.env();
        mount_area(&mut state, &env, AreaId::EASTERN_WOODS).unwrap();
        state.player.bounds = Rect::new(440.0, 120.0, 32.0, 50.0);

        let mut events = Vec::new();
        interact(&mut state, &config, &env, &mut events).unwrap();
        assert!(state.dialogue.is_none());
        assert!(state.quest.has(QuestFlags::GATE_QUEST_DONE));
    }

    #[test]
    fn npc_out_of_range_is_ignored() {
        let world = TestWorld::new();
        let config = GameConfig::default();
        let mut state = session(&world, &config);
        state.player.bounds = Rect::new(
            HOMELESS_BOUNDS.x - 32.0 - config.interaction.npc_margin - 1.0,
            HOMELESS_BOUNDS.y,
            32.0,
            50.0,
        );
        let mut events = Vec::new();
        interact(&mut state, &config, &world.env(), &mut events).unwrap();
        assert!(events.is_empty());
        assert!(state.dialogue.is_none());
    }

    #[test]
    fn using_an_item_consumes_one_unit() {
        let world = TestWorld::new();
        let config = GameConfig::default();
        let mut state = session(&world, &config);
        let env = world.env();
        let mut events = Vec::new();

        let error = use_item(&mut state, &config, &env, ItemKind::Herb, &mut events).unwrap_err();
        assert!(matches!(
            error,
            EngineError::Inventory(InventoryError::NotHeld(ItemKind::Herb))
        ));

        state.inventory.add(ItemKind::Herb, 2).unwrap();
        use_item(&mut state, &config, &env, ItemKind::Herb, &mut events).unwrap();
        assert_eq!(
            events,
            vec![GameEvent::ItemUsed {
                kind: ItemKind::Herb,
                remaining: 1
            }]
        );
        assert_eq!(state.ui.notices[0].text, "You use the herb.");
    }

    #[test]
    fn keys_are_only_spent_on_their_gate() {
        let world = TestWorld::new();
        let config = GameConfig::default();
        let mut state = session(&world, &config);
        let env = world.env();
        let mut events = Vec::new();
        state.inventory.add(ItemKind::RustyKey, 1).unwrap();

        // No gate in reach: the key stays in the pack.
        let error =
            use_item(&mut state, &config, &env, ItemKind::RustyKey, &mut events).unwrap_err();
        assert!(matches!(
            error,
            EngineError::Inventory(InventoryError::NoUse(ItemKind::RustyKey))
        ));
        assert!(events.is_empty());
        assert_eq!(state.inventory.quantity(ItemKind::RustyKey), 1);
        assert_eq!(state.ui.notices[0].text, "It doesn't fit anything here.");

        let bounds = Rect::new(140.0, 100.0, 16.0, 60.0);
        state.entities.gates.push(GateState {
            kind: GateKind::IronGate,
            bounds,
            lock: GateLock::Key(ItemKind::RustyKey),
            flag: QuestFlags::IRON_GATE_UNLOCKED,
            area: AreaId::CAMP,
        });
        state
            .obstacles
            .spawn(bounds, ObstacleTag::Gate(GateKind::IronGate));

        use_item(&mut state, &config, &env, ItemKind::RustyKey, &mut events).unwrap();
        assert_eq!(events, vec![GameEvent::GateOpened { gate: GateKind::IronGate }]);
        assert!(!state.inventory.contains(ItemKind::RustyKey));
        assert!(!state.obstacles.contains_gate(GateKind::IronGate));
        assert!(state.quest.has(QuestFlags::IRON_GATE_UNLOCKED));
    }

    #[test]
    fn dropping_spawns_the_stack_at_the_feet() {
        let world = TestWorld::new();
        let config = GameConfig::default();
        let mut state = session(&world, &config);
        state.inventory.add(ItemKind::Mushroom, 3).unwrap();

        let mut events = Vec::new();
        drop_item(&mut state, &config, ItemKind::Mushroom, &mut events).unwrap();

        assert!(!state.inventory.contains(ItemKind::Mushroom));
        let dropped = state.entities.items.last().unwrap();
        assert_eq!(dropped.quantity, 3);
        assert_eq!(dropped.bounds, Rect::new(108.0, 134.0, 16.0, 16.0));
        assert_eq!(
            events,
            vec![GameEvent::ItemDropped {
                kind: ItemKind::Mushroom,
                quantity: 3
            }]
        );

        assert!(drop_item(&mut state, &config, ItemKind::Mushroom, &mut events).is_err());
    }

    #[test]
    fn dropped_item_stays_inside_the_world() {
        let config = GameConfig::default();
        let player = Rect::new(630.0, 560.0, 32.0, 50.0);
        let bounds = drop_bounds(&player, &config);
        assert!(bounds.right() <= config.world.width);
        assert!(bounds.bottom() <= config.world.height);
    }
}
