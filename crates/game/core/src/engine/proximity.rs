//! Entity proximity queries.
//!
//! An entity is in range when the edge-to-edge gap to the player is within
//! an activation margin. Among several in range, the one with the closest
//! centre wins; exact ties keep the earlier candidate.

use crate::config::GameConfig;
use crate::geometry::{Rect, center_distance, edge_gap};
use crate::state::{GameState, GateState, HintTarget, InteractionHint, NpcState, WorldItem};

/// Picks the closest candidate whose gap to `player` is at most `margin`.
pub fn nearest_in_range<T, I>(player: &Rect, margin: f32, candidates: I) -> Option<T>
where
    I: IntoIterator<Item = (T, Rect)>,
{
    let mut best: Option<(T, f32)> = None;
    for (candidate, bounds) in candidates {
        if edge_gap(player, &bounds).max > margin {
            continue;
        }
        let distance = center_distance(player, &bounds);
        match &best {
            Some((_, best_distance)) if distance >= *best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }
    best.map(|(candidate, _)| candidate)
}

pub fn nearest_item<'s>(state: &'s GameState, config: &GameConfig) -> Option<&'s WorldItem> {
    nearest_in_range(
        &state.player.bounds,
        config.interaction.item_margin,
        state.entities.items.iter().map(|item| (item, item.bounds)),
    )
}

pub fn nearest_npc<'s>(state: &'s GameState, config: &GameConfig) -> Option<&'s NpcState> {
    nearest_in_range(
        &state.player.bounds,
        config.interaction.npc_margin,
        state.entities.npcs.iter().map(|npc| (npc, npc.bounds)),
    )
}

/// Closest key-locked gate in the current area.
pub fn nearest_locked_gate<'s>(state: &'s GameState, config: &GameConfig) -> Option<&'s GateState> {
    let area = state.zone.area;
    nearest_in_range(
        &state.player.bounds,
        config.interaction.gate_margin,
        state
            .entities
            .gates
            .iter()
            .filter(|gate| gate.area == area && gate.required_key().is_some())
            .map(|gate| (gate, gate.bounds)),
    )
}

/// What the "press to interact" hint should point at.
///
/// Gates outrank items, which outrank NPCs. Hidden while a dialogue is open
/// or the area is not active.
pub fn interaction_hint(state: &GameState, config: &GameConfig) -> Option<InteractionHint> {
    if state.dialogue.is_some() || state.zone.is_suspended() {
        return None;
    }

    if let Some(gate) = nearest_locked_gate(state, config) {
        return Some(InteractionHint {
            target: HintTarget::Gate(gate.kind),
            anchor: gate.bounds.top_center(),
        });
    }
    if let Some(item) = nearest_item(state, config) {
        return Some(InteractionHint {
            target: HintTarget::Item {
                id: item.id,
                kind: item.kind,
            },
            anchor: item.bounds.top_center(),
        });
    }
    nearest_npc(state, config).map(|npc| InteractionHint {
        target: HintTarget::Npc {
            id: npc.id,
            kind: npc.kind,
        },
        anchor: npc.bounds.top_center(),
    })
}
