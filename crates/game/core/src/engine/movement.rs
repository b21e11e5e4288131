//! Movement and collision resolution.
//!
//! Each tick turns held keys into a displacement, clamps it to the world,
//! then commits it one axis at a time against the obstacle registry. Moving
//! diagonally into a wall therefore slides along it instead of stopping.

use crate::config::WorldConfig;
use crate::geometry::{Rect, Vec2, clamp, overlaps};
use crate::input::HeldKeys;
use crate::state::{Facing, GameState, ObstacleRegistry, PlayerState};

/// Result of one movement step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveOutcome {
    /// A direction was held (even if every axis was blocked).
    pub moving: bool,
    pub displacement: Vec2,
}

/// Runs one movement step for the player.
///
/// `dt` must already be capped by the caller.
pub fn step(
    player: &mut PlayerState,
    obstacles: &ObstacleRegistry,
    world: &WorldConfig,
    held: HeldKeys,
    dt: f32,
) -> MoveOutcome {
    let raw = held.direction();
    if let Some(facing) = Facing::from_offset(raw.x, raw.y) {
        player.animation.facing = facing;
    }

    let speed = if held.sprinting() {
        player.base_speed * player.sprint_multiplier
    } else {
        player.base_speed
    };
    player.speed = speed;

    let direction = raw.normalized();
    let before = player.bounds.origin();
    let proposed = before + direction.scaled(speed * dt);
    let proposed = Vec2::new(
        clamp(proposed.x, 0.0, world.width - player.bounds.w),
        clamp(proposed.y, 0.0, world.height - player.bounds.h),
    );

    let resolved = resolve_axes(&player.bounds, proposed, obstacles);
    player.bounds = resolved;

    MoveOutcome {
        moving: !raw.is_zero(),
        displacement: resolved.origin() - before,
    }
}

/// Commits x first, then y using the resolved x; each axis reverts on
/// overlap.
pub fn resolve_axes(current: &Rect, proposed: Vec2, obstacles: &ObstacleRegistry) -> Rect {
    let mut next = *current;

    let along_x = next.with_origin(Vec2::new(proposed.x, next.y));
    if !obstacles.blocks(&along_x) {
        next = along_x;
    }

    let along_y = next.with_origin(Vec2::new(next.x, proposed.y));
    if !obstacles.blocks(&along_y) {
        next = along_y;
    }

    next
}

/// Collects every coin the player is touching. Returns the new totals in
/// pickup order.
pub fn collect_coins(state: &mut GameState) -> Vec<u32> {
    let player = state.player.bounds;
    let mut totals = Vec::new();
    let quest = &mut state.quest;
    state.entities.coins.retain(|coin| {
        if overlaps(&player, &coin.bounds) {
            totals.push(quest.add_coin());
            false
        } else {
            true
        }
    });
    totals
}
