use bitflags::bitflags;

bitflags! {
    /// Named progress flags. Set once and never cleared until restart.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct QuestFlags: u8 {
        /// The homeless man received his coins and opened the east gate.
        const GATE_QUEST_DONE    = 1 << 0;
        const IRON_GATE_UNLOCKED = 1 << 1;
        /// The ravine floor gave way.
        const HAZARD_TRIGGERED   = 1 << 2;
    }
}

/// Quest progress consulted by dialogue and exit rules.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestState {
    pub flags: QuestFlags,
    pub coins: u32,
}

impl QuestState {
    /// Raises `flag`. Returns false when every bit was already set.
    pub fn raise(&mut self, flag: QuestFlags) -> bool {
        if self.flags.contains(flag) {
            return false;
        }
        self.flags.insert(flag);
        true
    }

    pub fn has(&self, flag: QuestFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn add_coin(&mut self) -> u32 {
        self.coins = self.coins.saturating_add(1);
        self.coins
    }
}
