//! Area bookkeeping: which area is mounted and what phase it is in.

use super::common::{AreaId, GateKind};
use super::quest::QuestFlags;

/// Half of an area fade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum FadeStage {
    /// Screen darkening; the old area is still mounted.
    FadeOut,
    /// Screen clearing; the new area is already mounted.
    FadeIn,
}

/// Lifecycle of the active area.
///
/// `Transitioning` doubles as the single-permit guard against re-entrant
/// transitions, and `Dead` is terminal until restart.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZonePhase {
    #[default]
    Active,
    Transitioning {
        to: AreaId,
        stage: FadeStage,
        elapsed: f32,
    },
    Dead,
}

impl ZonePhase {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn is_dead(&self) -> bool {
        matches!(self, Self::Dead)
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self, Self::Transitioning { .. })
    }
}

/// Condition for leaving an area through its east edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExitRule {
    pub to: AreaId,
    /// Every bit must be set. Empty means no flag requirement.
    #[cfg_attr(feature = "serde", serde(default))]
    pub requires_flag: QuestFlags,
    /// The gate's obstacle must be gone from the registry.
    #[cfg_attr(feature = "serde", serde(default))]
    pub requires_gate_removed: Option<GateKind>,
}

/// Scripted failure that fires `delay` seconds after the area becomes active.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hazard {
    pub delay: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneState {
    pub area: AreaId,
    pub phase: ZonePhase,
    pub exits: Vec<ExitRule>,
    pub hazard: Option<Hazard>,
    /// Seconds spent active in a hazard area.
    pub hazard_elapsed: f32,
}

impl ZoneState {
    pub fn new(area: AreaId, exits: Vec<ExitRule>, hazard: Option<Hazard>) -> Self {
        Self {
            area,
            phase: ZonePhase::Active,
            exits,
            hazard,
            hazard_elapsed: 0.0,
        }
    }

    /// Movement and interaction only run while the area is active.
    pub fn is_suspended(&self) -> bool {
        !self.phase.is_active()
    }

    /// Screen darkness in `[0, 1]` for the current phase.
    pub fn fade_level(&self, fade_duration: f32) -> f32 {
        let progress = |elapsed: f32| {
            if fade_duration <= 0.0 {
                1.0
            } else {
                (elapsed / fade_duration).clamp(0.0, 1.0)
            }
        };
        match self.phase {
            ZonePhase::Active => 0.0,
            ZonePhase::Transitioning {
                stage: FadeStage::FadeOut,
                elapsed,
                ..
            } => progress(elapsed),
            ZonePhase::Transitioning {
                stage: FadeStage::FadeIn,
                elapsed,
                ..
            } => 1.0 - progress(elapsed),
            ZonePhase::Dead => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_level_follows_stage() {
        let mut zone = ZoneState::new(AreaId::CAMP, Vec::new(), None);
        assert_eq!(zone.fade_level(0.25), 0.0);

        zone.phase = ZonePhase::Transitioning {
            to: AreaId::EASTERN_WOODS,
            stage: FadeStage::FadeOut,
            elapsed: 0.125,
        };
        assert!(zone.is_suspended());
        assert!((zone.fade_level(0.25) - 0.5).abs() < 1e-6);

        zone.phase = ZonePhase::Transitioning {
            to: AreaId::EASTERN_WOODS,
            stage: FadeStage::FadeIn,
            elapsed: 0.25,
        };
        assert_eq!(zone.fade_level(0.25), 0.0);

        zone.phase = ZonePhase::Dead;
        assert_eq!(zone.fade_level(0.25), 1.0);
    }
}
