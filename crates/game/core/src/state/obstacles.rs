//! Registry of every rectangle that blocks player movement.
//!
//! The registry is the single collision source for the movement resolver. It
//! must only ever hold obstacles that belong to something still live in the
//! active area; area swaps rebuild it wholesale and then call
//! [`ObstacleRegistry::retain_live`] to drop anything whose owner is gone.

use std::fmt;

use crate::error::{ErrorSeverity, GameError};
use crate::geometry::{Rect, overlaps};

use super::common::{EntityId, GateKind};
use super::entities::EntitiesState;

/// Identifier of a single obstacle inside the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObstacleId(pub u32);

impl fmt::Display for ObstacleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "obstacle#{}", self.0)
    }
}

/// What an obstacle belongs to. Used for selective removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObstacleTag {
    /// Static world geometry (fences, borders).
    Wall,
    /// Tree trunk collider.
    Tree,
    /// Tent base collider.
    Tent,
    /// Body of a mounted NPC.
    Npc(EntityId),
    /// Gate leaf; removed when the gate opens.
    Gate(GateKind),
    Rock,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub id: ObstacleId,
    pub bounds: Rect,
    pub tag: ObstacleTag,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ObstacleError {
    #[error("{0} is already registered")]
    Duplicate(ObstacleId),
}

impl GameError for ObstacleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Duplicate(_) => "OBSTACLE_DUPLICATE",
        }
    }
}

/// Ordered, duplicate-free obstacle collection.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObstacleRegistry {
    next_id: u32,
    obstacles: Vec<Obstacle>,
}

impl ObstacleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh id and appends the obstacle.
    pub fn spawn(&mut self, bounds: Rect, tag: ObstacleTag) -> ObstacleId {
        let id = self.allocate_id();
        self.obstacles.push(Obstacle { id, bounds, tag });
        id
    }

    /// Appends a pre-built obstacle, rejecting an id that is already present.
    pub fn insert(&mut self, obstacle: Obstacle) -> Result<(), ObstacleError> {
        if self.get(obstacle.id).is_some() {
            return Err(ObstacleError::Duplicate(obstacle.id));
        }
        self.next_id = self.next_id.max(obstacle.id.0.saturating_add(1));
        self.obstacles.push(obstacle);
        Ok(())
    }

    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.iter().find(|obstacle| obstacle.id == id)
    }

    /// Removes an obstacle by identity. Returns it if it was present.
    pub fn remove(&mut self, id: ObstacleId) -> Option<Obstacle> {
        let index = self.obstacles.iter().position(|obstacle| obstacle.id == id)?;
        Some(self.obstacles.remove(index))
    }

    /// Removes every obstacle whose tag matches `predicate`; returns how many.
    pub fn remove_tagged<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&ObstacleTag) -> bool,
    {
        let before = self.obstacles.len();
        self.obstacles.retain(|obstacle| !predicate(&obstacle.tag));
        before - self.obstacles.len()
    }

    /// True if `rect` strictly overlaps any registered obstacle.
    pub fn blocks(&self, rect: &Rect) -> bool {
        self.obstacles
            .iter()
            .any(|obstacle| overlaps(rect, &obstacle.bounds))
    }

    pub fn contains_tag(&self, tag: ObstacleTag) -> bool {
        self.obstacles.iter().any(|obstacle| obstacle.tag == tag)
    }

    pub fn contains_gate(&self, kind: GateKind) -> bool {
        self.contains_tag(ObstacleTag::Gate(kind))
    }

    /// Drops the whole collection and rebuilds it from `entries`.
    ///
    /// Ids keep increasing across replacements so a stale id never aliases a
    /// new obstacle.
    pub fn replace<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (Rect, ObstacleTag)>,
    {
        self.obstacles.clear();
        for (bounds, tag) in entries {
            self.spawn(bounds, tag);
        }
    }

    /// Keeps only obstacles whose owner still exists in `entities`.
    ///
    /// Untagged geometry (walls, rocks) and decoration colliders are always
    /// kept; NPC and gate obstacles need a live owner.
    pub fn retain_live(&mut self, entities: &EntitiesState) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|obstacle| match obstacle.tag {
            ObstacleTag::Npc(id) => entities.npc(id).is_some(),
            ObstacleTag::Gate(kind) => entities.gate(kind).is_some(),
            ObstacleTag::Wall | ObstacleTag::Tree | ObstacleTag::Tent | ObstacleTag::Rock => true,
        });
        before - self.obstacles.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    fn allocate_id(&mut self) -> ObstacleId {
        let id = ObstacleId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }
}
