//! Area state machine: mounting, exits, fades, and the ravine hazard.
//!
//! A transition is driven by ticks rather than timers: the phase records the
//! fade stage and elapsed time, the swap happens exactly once between the
//! two stages, and control only returns once the fade-in has finished.

use crate::config::GameConfig;
use crate::env::{GameEnv, OracleError};
use crate::event::GameEvent;
use crate::geometry::{Rect, Vec2, clamp};
use crate::state::{
    AreaId, CoinState, FadeStage, GameState, GateState, NpcState, ObstacleTag, PropKind,
    PropState, QuestFlags, WorldItem, ZonePhase,
};

/// Vertical search step when the entry point is blocked.
const ENTRY_PROBE_STEP: f32 = 4.0;

/// Replaces everything dynamic with the content of `area`.
///
/// The obstacle registry is rebuilt from walls, decoration colliders, NPCs
/// and gates, then filtered so that only obstacles with a live owner remain.
/// The zone phase is left untouched.
pub fn mount_area(
    state: &mut GameState,
    env: &GameEnv<'_>,
    area: AreaId,
) -> Result<(), OracleError> {
    let layout = env
        .zones()?
        .layout(area, state.seed)
        .ok_or(OracleError::UnknownArea(area))?;
    let decorations = env.decorations()?;

    state.entities.clear();
    state.dialogue = None;
    state.ui.hint = None;

    let mut obstacles: Vec<(Rect, ObstacleTag)> = Vec::new();
    obstacles.extend(layout.walls.iter().map(|wall| (*wall, ObstacleTag::Wall)));
    obstacles.extend(layout.rocks.iter().map(|rock| (*rock, ObstacleTag::Rock)));

    let placed = [
        (PropKind::Tree, decorations.trees(&layout.tree_anchors)),
        (PropKind::Tent, decorations.tents(&layout.tent_anchors)),
    ];
    for (kind, batch) in placed {
        let tag = match kind {
            PropKind::Tree => ObstacleTag::Tree,
            PropKind::Tent => ObstacleTag::Tent,
        };
        for decoration in batch {
            let id = state.allocate_entity_id();
            state.entities.props.push(PropState {
                id,
                kind,
                visual: decoration.visual,
            });
            obstacles.push((decoration.collider, tag));
        }
    }

    for spawn in &layout.npcs {
        let id = state.allocate_entity_id();
        state.entities.npcs.push(NpcState {
            id,
            kind: spawn.kind,
            bounds: spawn.bounds,
        });
        obstacles.push((spawn.bounds, ObstacleTag::Npc(id)));
    }

    for spawn in &layout.items {
        let id = state.allocate_entity_id();
        state.entities.items.push(WorldItem {
            id,
            kind: spawn.kind,
            quantity: spawn.quantity.max(1),
            bounds: spawn.bounds,
        });
    }

    for bounds in &layout.coins {
        let id = state.allocate_entity_id();
        state.entities.coins.push(CoinState {
            id,
            bounds: *bounds,
        });
    }

    for spawn in &layout.gates {
        if !spawn.flag.is_empty() && state.quest.has(spawn.flag) {
            continue;
        }
        state.entities.gates.push(GateState {
            kind: spawn.kind,
            bounds: spawn.bounds,
            lock: spawn.lock,
            flag: spawn.flag,
            area,
        });
        obstacles.push((spawn.bounds, ObstacleTag::Gate(spawn.kind)));
    }

    state.obstacles.replace(obstacles);
    state.obstacles.retain_live(&state.entities);

    state.zone.area = area;
    state.zone.exits = layout.exits;
    state.zone.hazard = layout.hazard;
    state.zone.hazard_elapsed = 0.0;
    Ok(())
}

/// Starts a transition to `to`. Ignored unless the area is active.
pub fn request_transition(state: &mut GameState, to: AreaId, events: &mut Vec<GameEvent>) -> bool {
    if !state.zone.phase.is_active() {
        return false;
    }
    state.zone.phase = ZonePhase::Transitioning {
        to,
        stage: FadeStage::FadeOut,
        elapsed: 0.0,
    };
    state.dialogue = None;
    events.push(GameEvent::TransitionStarted {
        from: state.zone.area,
        to,
    });
    true
}

/// Fires the first satisfied exit rule when the player hugs the east edge.
pub fn check_exit(state: &mut GameState, config: &GameConfig, events: &mut Vec<GameEvent>) {
    if !state.zone.phase.is_active() {
        return;
    }
    let at_edge =
        state.player.bounds.right() >= config.world.width - config.world.edge_tolerance;
    if !at_edge {
        return;
    }

    let flags = state.quest.flags;
    let obstacles = &state.obstacles;
    let exit = state
        .zone
        .exits
        .iter()
        .find(|exit| {
            flags.contains(exit.requires_flag)
                && exit
                    .requires_gate_removed
                    .is_none_or(|gate| !obstacles.contains_gate(gate))
        })
        .copied();
    if let Some(exit) = exit {
        request_transition(state, exit.to, events);
    }
}

/// Advances fades and the hazard countdown by `dt`.
pub fn advance(
    state: &mut GameState,
    config: &GameConfig,
    env: &GameEnv<'_>,
    dt: f32,
    events: &mut Vec<GameEvent>,
) -> Result<(), OracleError> {
    let fade = config.timing.fade_duration;
    match state.zone.phase {
        ZonePhase::Active => advance_hazard(state, dt, events),
        ZonePhase::Transitioning {
            to,
            stage: FadeStage::FadeOut,
            elapsed,
        } => {
            let elapsed = elapsed + dt;
            if elapsed < fade {
                state.zone.phase = ZonePhase::Transitioning {
                    to,
                    stage: FadeStage::FadeOut,
                    elapsed,
                };
                return Ok(());
            }
            mount_area(state, env, to)?;
            place_at_entry(state, config);
            events.push(GameEvent::AreaEntered { area: to });
            state.zone.phase = ZonePhase::Transitioning {
                to,
                stage: FadeStage::FadeIn,
                elapsed: 0.0,
            };
        }
        ZonePhase::Transitioning {
            to,
            stage: FadeStage::FadeIn,
            elapsed,
        } => {
            let elapsed = elapsed + dt;
            state.zone.phase = if elapsed < fade {
                ZonePhase::Transitioning {
                    to,
                    stage: FadeStage::FadeIn,
                    elapsed,
                }
            } else {
                events.push(GameEvent::TransitionFinished { area: to });
                ZonePhase::Active
            };
        }
        ZonePhase::Dead => {}
    }
    Ok(())
}

fn advance_hazard(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    let Some(hazard) = state.zone.hazard else {
        return;
    };
    state.zone.hazard_elapsed += dt;
    if state.zone.hazard_elapsed < hazard.delay {
        return;
    }

    state.zone.phase = ZonePhase::Dead;
    state.dialogue = None;
    state.ui.hint = None;
    state.quest.raise(QuestFlags::HAZARD_TRIGGERED);
    events.push(GameEvent::HazardTriggered {
        area: state.zone.area,
    });
    events.push(GameEvent::Died);
}

/// Moves the player to the west entry point of a freshly mounted area.
///
/// The previous y is kept, clamped into the entry band. If that spot is
/// blocked the nearest free y inside the band is used instead.
pub fn place_at_entry(state: &mut GameState, config: &GameConfig) {
    let world = &config.world;
    let min_y = world.entry_min_y;
    let max_y = world.height - world.entry_bottom_margin;
    let y = clamp(state.player.bounds.y, min_y, max_y);
    let entry = state
        .player
        .bounds
        .with_origin(Vec2::new(world.entry_x, y));

    state.player.bounds = free_entry(entry, min_y, max_y, state).unwrap_or(entry);
}

fn free_entry(entry: Rect, min_y: f32, max_y: f32, state: &GameState) -> Option<Rect> {
    if !state.obstacles.blocks(&entry) {
        return Some(entry);
    }
    let span = (max_y - min_y).max(0.0);
    let mut offset = ENTRY_PROBE_STEP;
    while offset <= span {
        for candidate_y in [entry.y + offset, entry.y - offset] {
            if candidate_y < min_y || candidate_y > max_y {
                continue;
            }
            let candidate = entry.with_origin(Vec2::new(entry.x, candidate_y));
            if !state.obstacles.blocks(&candidate) {
                return Some(candidate);
            }
        }
        offset += ENTRY_PROBE_STEP;
    }
    None
}
