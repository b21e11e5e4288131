//! Open dialogue and the data that resolves it.

use super::common::{AreaId, EntityId, GateKind, NpcKind};
use super::quest::QuestFlags;

/// World effect applied when a dialogue reaches its last line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DialogueEffect {
    /// Removes `gate` and raises `flag`. Skipped if `flag` is already set.
    OpenGate { gate: GateKind, flag: QuestFlags },
}

/// Snapshot of quest progress handed to dialogue resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DialogueContext {
    pub coins: u32,
    pub flags: QuestFlags,
    pub area: AreaId,
}

/// Lines to show plus an optional completion effect.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialogueScript {
    pub lines: Vec<String>,
    pub effect: Option<DialogueEffect>,
}

impl DialogueScript {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            effect: None,
        }
    }

    pub fn with_effect(mut self, effect: DialogueEffect) -> Self {
        self.effect = Some(effect);
        self
    }
}

/// Result of advancing an open dialogue by one line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogueStep {
    /// Another line is now showing.
    Next,
    /// The last line was dismissed; the dialogue should close.
    Finished(Option<DialogueEffect>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialogueState {
    pub npc: EntityId,
    pub speaker: NpcKind,
    pub script: DialogueScript,
    pub index: usize,
}

impl DialogueState {
    pub fn open(npc: EntityId, speaker: NpcKind, script: DialogueScript) -> Self {
        Self {
            npc,
            speaker,
            script,
            index: 0,
        }
    }

    pub fn current_line(&self) -> Option<&str> {
        self.script.lines.get(self.index).map(String::as_str)
    }

    pub fn advance(&mut self) -> DialogueStep {
        self.index += 1;
        if self.index >= self.script.lines.len() {
            DialogueStep::Finished(self.script.effect)
        } else {
            DialogueStep::Next
        }
    }
}
