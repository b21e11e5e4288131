//! Area layouts for the camp, the eastern woods and the ravine.
//!
//! Fixed geometry (fences, gates, NPCs, items) is hand-placed. Tree rows are
//! extended and a few interior trees and the coins are scattered from the
//! session seed, so the same seed always yields the same world.

use std::collections::{HashMap, VecDeque};

use game_core::geometry::{center_distance, overlaps};
use game_core::{
    AreaId, AreaLayout, ExitRule, GameConfig, GateKind, GateLock, GateSpawn, Hazard, ItemKind,
    ItemSpawn, NpcKind, NpcSpawn, PcgRng, QuestFlags, Rect, Vec2, ZoneOracle, compute_seed,
};

use crate::decorations::DecorationPlanner;

const CAMP_BOTTOM_ROW: [(f32, f32); 10] = [
    (15.0, 525.0),
    (75.0, 525.0),
    (135.0, 520.0),
    (195.0, 530.0),
    (255.0, 520.0),
    (310.0, 510.0),
    (350.0, 535.0),
    (420.0, 520.0),
    (500.0, 530.0),
    (550.0, 510.0),
];

const CAMP_LEFT_COLUMN: [(f32, f32); 8] = [
    (10.0, 465.0),
    (12.0, 405.0),
    (10.0, 345.0),
    (13.0, 275.0),
    (11.0, 225.0),
    (14.0, 165.0),
    (12.0, 105.0),
    (13.0, 45.0),
];

const CAMP_TOP_ROW: [(f32, f32); 9] = [
    (65.0, 20.0),
    (125.0, 15.0),
    (185.0, 20.0),
    (245.0, 15.0),
    (305.0, 20.0),
    (365.0, 15.0),
    (425.0, 20.0),
    (485.0, 15.0),
    (545.0, 20.0),
];

const CAMP_TENT: Vec2 = Vec2::new(150.0, 150.0);
const HOMELESS: Rect = Rect::new(260.0, 180.0, 32.0, 40.0);
const SCOUT: Rect = Rect::new(480.0, 120.0, 32.0, 50.0);

const COIN_COUNT: usize = 5;
const COIN_SIZE: f32 = 18.0;
const COIN_ATTEMPTS: usize = 20;

/// Spacing of the walkability grid used to place coins.
const REACH_STEP: f32 = 8.0;
/// Extra room the player box needs around obstacles on that grid.
const REACH_CLEARANCE: f32 = 2.0;

const ROW_STEP: f32 = 60.0;
const ROW_START: f32 = 15.0;
const ROW_END_MARGIN: f32 = 20.0;
const JITTER_X: u32 = 8;
const JITTER_Y_TOP: u32 = 4;
const JITTER_Y_BOTTOM: u32 = 10;

const INTERIOR_TREES: (u32, u32) = (3, 4);
const INTERIOR_MARGIN: f32 = 20.0;
const INTERIOR_MIN_DISTANCE: f32 = 72.0;
const INTERIOR_ATTEMPTS: usize = 120;

const FENCE_WIDTH: f32 = 16.0;
const GATE_GAP: (f32, f32) = (220.0, 340.0);
const IRON_GATE_GAP: (f32, f32) = (240.0, 360.0);

// Stream separators for `compute_seed`.
const STREAM_ROWS: u32 = 0;
const STREAM_INTERIOR: u32 = 1;
const STREAM_COINS: u32 = 2;

/// Serves every area layout, procedural or loaded from data.
pub struct AreaCatalog {
    world: Vec2,
    player_start: Rect,
    hazard_delay: f32,
    decorations: DecorationPlanner,
    overrides: HashMap<AreaId, AreaLayout>,
}

impl AreaCatalog {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            world: Vec2::new(config.world.width, config.world.height),
            player_start: Rect::at(config.player.start, config.player.size),
            hazard_delay: config.timing.hazard_delay,
            decorations: DecorationPlanner::default(),
            overrides: HashMap::new(),
        }
    }

    pub fn with_decorations(mut self, decorations: DecorationPlanner) -> Self {
        self.decorations = decorations;
        self
    }

    /// Serves `layout` verbatim instead of the built-in one for its area.
    pub fn with_override(mut self, layout: AreaLayout) -> Self {
        self.overrides.insert(layout.area, layout);
        self
    }

    pub fn camp(&self, seed: u64) -> AreaLayout {
        let area = AreaId::CAMP;
        let to_anchors = |points: &[(f32, f32)]| -> Vec<Vec2> {
            points.iter().map(|&(x, y)| Vec2::new(x, y)).collect()
        };
        let top = to_anchors(&CAMP_TOP_ROW);
        let bottom = to_anchors(&CAMP_BOTTOM_ROW);

        let mut rows = PcgRng::new(compute_seed(seed, area.0, STREAM_ROWS));
        let mut tree_anchors = to_anchors(&CAMP_LEFT_COLUMN);
        tree_anchors.extend(self.extend_row(&top, JITTER_Y_TOP, &mut rows));
        tree_anchors.extend(self.extend_row(&bottom, JITTER_Y_BOTTOM, &mut rows));
        tree_anchors.extend(top);
        tree_anchors.extend(bottom);

        let npcs = vec![
            NpcSpawn {
                kind: NpcKind::Homeless,
                bounds: HOMELESS,
            },
            NpcSpawn {
                kind: NpcKind::Scout,
                bounds: SCOUT,
            },
        ];

        let tent = self.decorations.tent(CAMP_TENT);
        let mut reserved: Vec<Rect> = npcs.iter().map(|npc| npc.bounds).collect();
        reserved.push(tent.visual);
        reserved.push(self.player_start);
        let mut interior = PcgRng::new(compute_seed(seed, area.0, STREAM_INTERIOR));
        let extra = self.interior_trees(&tree_anchors, &reserved, &mut interior);
        tree_anchors.extend(extra);

        let gate = self.gate_rect(GATE_GAP);
        let walls = self.fence(GATE_GAP);

        let mut layout = AreaLayout {
            area,
            walls,
            tree_anchors,
            tent_anchors: vec![CAMP_TENT],
            npcs,
            gates: vec![GateSpawn {
                kind: GateKind::EastGate,
                bounds: gate,
                lock: GateLock::Quest,
                flag: QuestFlags::GATE_QUEST_DONE,
            }],
            exits: vec![ExitRule {
                to: AreaId::EASTERN_WOODS,
                requires_flag: QuestFlags::GATE_QUEST_DONE,
                requires_gate_removed: Some(GateKind::EastGate),
            }],
            ..AreaLayout::default()
        };

        let blockers = self.blockers(&layout);
        let reach = Reachable::flood(self.world, self.player_start, &blockers);
        let mut coins = PcgRng::new(compute_seed(seed, area.0, STREAM_COINS));
        layout.coins = self.scatter_coins(&blockers, &reach, &mut coins);
        layout
    }

    pub fn eastern_woods(&self, _seed: u64) -> AreaLayout {
        let row = |y: f32| -> Vec<Vec2> {
            let mut anchors = Vec::new();
            let mut x = ROW_START;
            while x < self.world.x - ROW_END_MARGIN {
                anchors.push(Vec2::new(x, y));
                x += ROW_STEP;
            }
            anchors
        };
        let mut tree_anchors = row(20.0);
        tree_anchors.extend(row((self.world.y - 60.0).max(40.0)));

        let item = |kind: ItemKind, quantity: u32, x: f32, y: f32| ItemSpawn {
            kind,
            quantity,
            bounds: Rect::new(x, y, 16.0, 16.0),
        };

        AreaLayout {
            area: AreaId::EASTERN_WOODS,
            walls: self.fence(IRON_GATE_GAP),
            tree_anchors,
            npcs: vec![NpcSpawn {
                kind: NpcKind::Scout,
                bounds: SCOUT,
            }],
            items: vec![
                item(ItemKind::RustyKey, 1, 340.0, 300.0),
                item(ItemKind::Mushroom, 1, 180.0, 380.0),
                item(ItemKind::Herb, 2, 420.0, 200.0),
                item(ItemKind::Berries, 3, 520.0, 420.0),
                item(ItemKind::Feather, 1, 250.0, 160.0),
                item(ItemKind::Flint, 1, 120.0, 300.0),
                item(ItemKind::Lantern, 1, 560.0, 180.0),
            ],
            gates: vec![GateSpawn {
                kind: GateKind::IronGate,
                bounds: self.gate_rect(IRON_GATE_GAP),
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

    pub fn ravine(&self, _seed: u64) -> AreaLayout {
        let (w, h) = (self.world.x, self.world.y);
        AreaLayout {
            area: AreaId::RAVINE,
            rocks: vec![
                Rect::new(0.0, 0.0, w, 24.0),
                Rect::new(0.0, h - 24.0, w, 24.0),
                Rect::new(180.0, 120.0, 70.0, 48.0),
                Rect::new(320.0, 380.0, 90.0, 56.0),
                Rect::new(470.0, 200.0, 60.0, 60.0),
            ],
            hazard: Some(Hazard {
                delay: self.hazard_delay,
            }),
            ..AreaLayout::default()
        }
    }

    /// East fence from top to bottom with a gap for a gate.
    fn fence(&self, (gap_top, gap_bottom): (f32, f32)) -> Vec<Rect> {
        let x = self.fence_x();
        vec![
            Rect::new(x, 0.0, FENCE_WIDTH, gap_top),
            Rect::new(x, gap_bottom, FENCE_WIDTH, self.world.y - gap_bottom),
        ]
    }

    fn gate_rect(&self, (gap_top, gap_bottom): (f32, f32)) -> Rect {
        Rect::new(self.fence_x(), gap_top, FENCE_WIDTH, gap_bottom - gap_top)
    }

    fn fence_x(&self) -> f32 {
        self.world.x - 24.0
    }

    /// Continues a hand-placed row to both world edges with jitter.
    fn extend_row(&self, row: &[Vec2], jitter_y: u32, rng: &mut PcgRng) -> Vec<Vec2> {
        let (Some(first), Some(last)) = (
            row.iter().map(|anchor| anchor.x).reduce(f32::min),
            row.iter().map(|anchor| anchor.x).reduce(f32::max),
        ) else {
            return Vec::new();
        };
        let y = row.iter().map(|anchor| anchor.y).sum::<f32>() / row.len() as f32;
        let mut jittered = |x: f32| {
            Vec2::new(
                x + jitter(rng, JITTER_X),
                (y + jitter(rng, jitter_y)).round(),
            )
        };

        let mut anchors = Vec::new();
        let mut x = last + ROW_STEP;
        while x < self.world.x - ROW_END_MARGIN {
            anchors.push(jittered(x));
            x += ROW_STEP;
        }
        let mut x = first - ROW_STEP;
        while x > 0.0 {
            anchors.push(jittered(x));
            x -= ROW_STEP;
        }
        anchors
    }

    /// Three or four trees away from existing trees and `reserved` areas.
    fn interior_trees(&self, existing: &[Vec2], reserved: &[Rect], rng: &mut PcgRng) -> Vec<Vec2> {
        let size = self.decorations.tree.size;
        let visual = |anchor: Vec2| self.decorations.tree_visual(anchor);
        let mut placed: Vec<Rect> = existing.iter().map(|anchor| visual(*anchor)).collect();
        let target = rng.range_u32(INTERIOR_TREES.0, INTERIOR_TREES.1) as usize;

        let max_x = (self.world.x - size.x - INTERIOR_MARGIN).max(INTERIOR_MARGIN);
        let max_y = (self.world.y - size.y - INTERIOR_MARGIN).max(INTERIOR_MARGIN);
        let mut anchors = Vec::new();
        for _ in 0..INTERIOR_ATTEMPTS {
            if anchors.len() >= target {
                break;
            }
            let left = rng.range_u32(INTERIOR_MARGIN as u32, max_x as u32) as f32;
            let top = rng.range_u32(INTERIOR_MARGIN as u32, max_y as u32) as f32;
            let anchor = Vec2::new(left + size.x / 2.0, top + size.y);
            let candidate = visual(anchor);

            let far = placed
                .iter()
                .all(|tree| center_distance(tree, &candidate) > INTERIOR_MIN_DISTANCE);
            let clear = reserved.iter().all(|rect| !overlaps(rect, &candidate));
            if far && clear {
                placed.push(candidate);
                anchors.push(anchor);
            }
        }
        anchors
    }

    /// Every rectangle that blocks movement once `layout` is mounted.
    fn blockers(&self, layout: &AreaLayout) -> Vec<Rect> {
        let mut blockers = layout.walls.clone();
        blockers.extend(layout.rocks.iter().copied());
        blockers.extend(
            layout
                .tree_anchors
                .iter()
                .map(|anchor| self.decorations.tree(*anchor).collider),
        );
        blockers.extend(
            layout
                .tent_anchors
                .iter()
                .map(|anchor| self.decorations.tent(*anchor).collider),
        );
        blockers.extend(layout.npcs.iter().map(|npc| npc.bounds));
        blockers.extend(layout.gates.iter().map(|gate| gate.bounds));
        blockers
    }

    /// Coins clear of `blockers` and of the player start, each one touchable
    /// from the start. When every attempt fails the coin goes in the middle
    /// of a random reachable spot.
    fn scatter_coins(&self, blockers: &[Rect], reach: &Reachable, rng: &mut PcgRng) -> Vec<Rect> {
        let mut coins = Vec::with_capacity(COIN_COUNT);
        for _ in 0..COIN_COUNT {
            let mut placed = None;
            for _ in 0..COIN_ATTEMPTS {
                let coin = Rect::new(
                    rng.range_f32(0.0, self.world.x - COIN_SIZE),
                    rng.range_f32(0.0, self.world.y - COIN_SIZE),
                    COIN_SIZE,
                    COIN_SIZE,
                );
                let clear = !overlaps(&self.player_start, &coin)
                    && !blockers.iter().any(|blocker| overlaps(blocker, &coin));
                if clear && reach.touches(&coin) {
                    placed = Some(coin);
                    break;
                }
            }
            let coin = placed.or_else(|| {
                let spots: Vec<&Rect> = reach
                    .spots
                    .iter()
                    .filter(|spot| !overlaps(spot, &self.player_start))
                    .collect();
                let last = u32::try_from(spots.len().checked_sub(1)?).ok()?;
                let center = spots[rng.range_u32(0, last) as usize].center();
                Some(Rect::new(
                    center.x - COIN_SIZE / 2.0,
                    center.y - COIN_SIZE / 2.0,
                    COIN_SIZE,
                    COIN_SIZE,
                ))
            });
            coins.extend(coin);
        }
        coins
    }
}

/// Player boxes reachable from the start, on a grid of `REACH_STEP`.
///
/// A spot counts only if the box grown by `REACH_CLEARANCE` is clear, so a
/// gap the grid squeezes through is one the player can walk.
struct Reachable {
    spots: Vec<Rect>,
}

impl Reachable {
    fn flood(world: Vec2, start: Rect, blockers: &[Rect]) -> Self {
        let size = Vec2::new(start.w, start.h);
        let cols = ((world.x - size.x) / REACH_STEP).floor().max(0.0) as usize + 1;
        let rows = ((world.y - size.y) / REACH_STEP).floor().max(0.0) as usize + 1;
        let spot = |col: usize, row: usize| {
            Rect::new(col as f32 * REACH_STEP, row as f32 * REACH_STEP, size.x, size.y)
        };
        let free = |col: usize, row: usize| {
            let grown = spot(col, row).inflated(REACH_CLEARANCE);
            !blockers.iter().any(|blocker| overlaps(blocker, &grown))
        };

        let first = (
            ((start.x / REACH_STEP).floor().max(0.0) as usize).min(cols - 1),
            ((start.y / REACH_STEP).floor().max(0.0) as usize).min(rows - 1),
        );
        let mut seen = vec![false; cols * rows];
        let mut queue = VecDeque::new();
        if free(first.0, first.1) {
            seen[first.1 * cols + first.0] = true;
            queue.push_back(first);
        }

        let mut spots = Vec::new();
        while let Some((col, row)) = queue.pop_front() {
            spots.push(spot(col, row));
            let neighbours = [
                (col.wrapping_sub(1), row),
                (col + 1, row),
                (col, row.wrapping_sub(1)),
                (col, row + 1),
            ];
            for (next_col, next_row) in neighbours {
                if next_col >= cols || next_row >= rows {
                    continue;
                }
                let index = next_row * cols + next_col;
                if !seen[index] && free(next_col, next_row) {
                    seen[index] = true;
                    queue.push_back((next_col, next_row));
                }
            }
        }
        Self { spots }
    }

    /// Whether a reachable player box overlaps `rect`.
    fn touches(&self, rect: &Rect) -> bool {
        self.spots.iter().any(|spot| overlaps(spot, rect))
    }
}

/// Uniform integer offset in `[-amount, amount]`.
fn jitter(rng: &mut PcgRng, amount: u32) -> f32 {
    rng.range_u32(0, amount * 2) as f32 - amount as f32
}

impl ZoneOracle for AreaCatalog {
    fn layout(&self, area: AreaId, seed: u64) -> Option<AreaLayout> {
        if let Some(layout) = self.overrides.get(&area) {
            return Some(layout.clone());
        }
        match area {
            AreaId::CAMP => Some(self.camp(seed)),
            AreaId::EASTERN_WOODS => Some(self.eastern_woods(seed)),
            AreaId::RAVINE => Some(self.ravine(seed)),
            _ => None,
        }
    }
}
