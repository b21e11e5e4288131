use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::geometry::Vec2;

use super::common::{EntityId, GateKind, ItemKind, NpcKind};

/// Transient toast message.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Notice {
    pub text: String,
    /// Seconds left on screen.
    pub remaining: f32,
}

/// What the interaction hint points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HintTarget {
    Gate(GateKind),
    Item { id: EntityId, kind: ItemKind },
    Npc { id: EntityId, kind: NpcKind },
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InteractionHint {
    pub target: HintTarget,
    /// Top-centre of the target's rectangle, in world coordinates.
    pub anchor: Vec2,
}

/// Presentation-only state owned by the simulation.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UiState {
    pub inventory_open: bool,
    pub notices: ArrayVec<Notice, { GameConfig::MAX_NOTICES }>,
    pub hint: Option<InteractionHint>,
}

impl UiState {
    /// Queues a notice, evicting the oldest one when the queue is full.
    pub fn notify(&mut self, text: impl Into<String>, duration: f32) {
        if self.notices.is_full() {
            self.notices.remove(0);
        }
        self.notices.push(Notice {
            text: text.into(),
            remaining: duration,
        });
    }

    /// Counts notices down and drops the expired ones.
    pub fn age_notices(&mut self, dt: f32) {
        for notice in self.notices.iter_mut() {
            notice.remaining -= dt;
        }
        self.notices.retain(|notice| notice.remaining > 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oldest_notice_is_evicted_when_full() {
        let mut ui = UiState::default();
        for index in 0..=GameConfig::MAX_NOTICES {
            ui.notify(format!("notice {index}"), 1.0);
        }
        assert_eq!(ui.notices.len(), GameConfig::MAX_NOTICES);
        assert_eq!(ui.notices[0].text, "notice 1");
    }

    #[test]
    fn notices_expire() {
        let mut ui = UiState::default();
        ui.notify("short", 0.5);
        ui.notify("long", 2.0);
        ui.age_notices(0.6);
        assert_eq!(ui.notices.len(), 1);
        assert_eq!(ui.notices[0].text, "long");
    }
}
