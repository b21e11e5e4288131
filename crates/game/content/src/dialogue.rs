//! NPC dialogue table.
//!
//! Each NPC kind maps to a resolver that picks lines from the current quest
//! progress. Adding an NPC means adding a row, not a branch in the engine.

use std::collections::HashMap;

use game_core::{
    AreaId, DialogueContext, DialogueEffect, DialogueOracle, DialogueScript, GateKind, NpcKind,
    QuestFlags,
};

/// Coins the homeless man asks for.
pub const COIN_QUEST_TARGET: u32 = 5;

/// Picks a script for one NPC kind.
pub type DialogueResolver = fn(&DialogueContext) -> DialogueScript;

const FALLBACK_LINE: &str = "...";

pub struct DialogueTable {
    resolvers: HashMap<NpcKind, DialogueResolver>,
}

impl DialogueTable {
    pub fn empty() -> Self {
        Self {
            resolvers: HashMap::new(),
        }
    }

    /// The camp's homeless man and the wandering scout.
    pub fn standard() -> Self {
        Self::empty()
            .with(NpcKind::Homeless, homeless)
            .with(NpcKind::Scout, scout)
    }

    pub fn with(mut self, npc: NpcKind, resolver: DialogueResolver) -> Self {
        self.resolvers.insert(npc, resolver);
        self
    }

    pub fn contains(&self, npc: NpcKind) -> bool {
        self.resolvers.contains_key(&npc)
    }
}

impl Default for DialogueTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl DialogueOracle for DialogueTable {
    fn resolve(&self, npc: NpcKind, context: &DialogueContext) -> DialogueScript {
        match self.resolvers.get(&npc) {
            Some(resolver) => resolver(context),
            None => DialogueScript::new([FALLBACK_LINE]),
        }
    }
}

fn homeless(context: &DialogueContext) -> DialogueScript {
    if context.flags.contains(QuestFlags::GATE_QUEST_DONE) {
        return DialogueScript::new([
            "Homeless Man: The gate is open now.",
            "Keep your wits about you, traveler.",
        ]);
    }

    if context.coins >= COIN_QUEST_TARGET {
        return DialogueScript::new([
            "Homeless Man: 1... 2... 3... 4...",
            "It seems you are missing 1 coin",
            "Ah you're right, it slipped through my fingers...",
            "Over to the east I'll open the gate for you to continue on your journey.",
            "Don't let me catch you passed out in the woods again!",
        ])
        .with_effect(DialogueEffect::OpenGate {
            gate: GateKind::EastGate,
            flag: QuestFlags::GATE_QUEST_DONE,
        });
    }

    DialogueScript::new([
        "Homeless Man: Ah, you've awoken.",
        "I found you passed out in the woods over there and brought you to my home to rest.",
        "My kindness does not come cheap. Bring me 5 coins!",
    ])
}

fn scout(context: &DialogueContext) -> DialogueScript {
    if context.area == AreaId::EASTERN_WOODS {
        return DialogueScript::new([
            "Scout: Welcome to the eastern woods.",
            "You'll find rare items out here... but be ever wary of the danger that lurks.",
            "Press 'E' to pick up items when you are close by.",
            "Press 'I' to look at you items in your inventory.",
            "Safe travels, adventurer!",
        ]);
    }

    if context.flags.contains(QuestFlags::GATE_QUEST_DONE) {
        DialogueScript::new([
            "Scout: Opened the gate already? Not bad.",
            "Be wary, traveler. Many dangers lurk past these walls.",
        ])
    } else {
        DialogueScript::new([
            "Scout: If you're short on coin, check near the tree lines.",
            "Birds love shiny things.",
        ])
    }
}
