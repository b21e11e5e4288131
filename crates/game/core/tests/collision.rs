//! Collision containment, axis sliding and proximity range properties.

use game_core::config::{PlayerConfig, WorldConfig};
use game_core::engine::movement;
use game_core::engine::proximity::nearest_in_range;
use game_core::geometry::{edge_gap, overlaps};
use game_core::state::{ObstacleRegistry, PlayerState};
use game_core::{HeldKeys, ObstacleTag, PcgRng, Rect, Vec2};

const DIRECTIONS: [HeldKeys; 9] = [
    HeldKeys::empty(),
    HeldKeys::UP,
    HeldKeys::DOWN,
    HeldKeys::LEFT,
    HeldKeys::RIGHT,
    HeldKeys::UP.union(HeldKeys::LEFT),
    HeldKeys::UP.union(HeldKeys::RIGHT),
    HeldKeys::DOWN.union(HeldKeys::LEFT),
    HeldKeys::DOWN.union(HeldKeys::RIGHT),
];

fn random_obstacles(rng: &mut PcgRng, count: usize) -> ObstacleRegistry {
    let mut registry = ObstacleRegistry::new();
    for _ in 0..count {
        let w = rng.range_f32(8.0, 90.0);
        let h = rng.range_f32(8.0, 90.0);
        let x = rng.range_f32(0.0, 640.0 - w);
        let y = rng.range_f32(0.0, 576.0 - h);
        registry.spawn(Rect::new(x, y, w, h), ObstacleTag::Rock);
    }
    registry
}

#[test]
fn player_never_ends_a_step_inside_an_obstacle() {
    let world = WorldConfig::default();
    let mut rng = PcgRng::new(7);

    for _ in 0..40 {
        let obstacles = random_obstacles(&mut rng, 12);
        let mut player = PlayerState::from_config(&PlayerConfig::default());

        // Find a free starting spot.
        let mut placed = false;
        for _ in 0..200 {
            let start = Vec2::new(rng.range_f32(0.0, 608.0), rng.range_f32(0.0, 526.0));
            player.bounds = player.bounds.with_origin(start);
            if !obstacles.blocks(&player.bounds) {
                placed = true;
                break;
            }
        }
        if !placed {
            continue;
        }

        for _ in 0..300 {
            let index = rng.range_u32(0, DIRECTIONS.len() as u32 - 1) as usize;
            let mut held = DIRECTIONS[index];
            if rng.next_f32() < 0.3 {
                held |= HeldKeys::SPRINT;
            }
            let dt = rng.range_f32(0.0, 0.033);
            movement::step(&mut player, &obstacles, &world, held, dt);

            assert!(!obstacles.blocks(&player.bounds));
            assert!(player.bounds.left() >= 0.0);
            assert!(player.bounds.top() >= 0.0);
            assert!(player.bounds.right() <= world.width + 1e-3);
            assert!(player.bounds.bottom() <= world.height + 1e-3);
        }
    }
}

#[test]
fn diagonal_into_a_wall_slides_along_it() {
    let world = WorldConfig::default();
    let mut obstacles = ObstacleRegistry::new();
    let wall = Rect::new(140.0, 0.0, 20.0, 576.0);
    obstacles.spawn(wall, ObstacleTag::Wall);

    let mut player = PlayerState::from_config(&PlayerConfig::default());
    player.bounds = player.bounds.with_origin(Vec2::new(108.0, 200.0));

    for _ in 0..20 {
        movement::step(
            &mut player,
            &obstacles,
            &world,
            HeldKeys::RIGHT | HeldKeys::DOWN,
            0.033,
        );
    }

    assert!(player.bounds.right() <= wall.left());
    assert!(player.bounds.y > 200.0 + 50.0);
    assert!(!overlaps(&player.bounds, &wall));
}

#[test]
fn widening_the_margin_only_adds_candidates() {
    let mut rng = PcgRng::new(99);
    let player = Rect::new(300.0, 260.0, 32.0, 50.0);
    let candidates: Vec<Rect> = (0..60)
        .map(|_| {
            Rect::new(
                rng.range_f32(200.0, 420.0),
                rng.range_f32(160.0, 380.0),
                16.0,
                16.0,
            )
        })
        .collect();

    let mut previous: Vec<usize> = Vec::new();
    for margin in [0.0, 4.0, 8.0, 12.0, 24.0, 48.0, 96.0] {
        let in_range: Vec<usize> = candidates
            .iter()
            .enumerate()
            .filter(|(_, rect)| edge_gap(&player, rect).max <= margin)
            .map(|(index, _)| index)
            .collect();
        assert!(previous.iter().all(|index| in_range.contains(index)));

        let nearest = nearest_in_range(
            &player,
            margin,
            candidates.iter().enumerate().map(|(index, rect)| (index, *rect)),
        );
        assert_eq!(nearest.is_some(), !in_range.is_empty());
        previous = in_range;
    }
}
