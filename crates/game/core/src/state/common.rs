use std::fmt;

/// Unique identifier for any entity or obstacle tracked in the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the controllable player character.
    pub const PLAYER: Self = Self(0);

    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of a bounded area. Areas are numbered from 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaId(pub u8);

impl AreaId {
    pub const CAMP: Self = Self(1);
    pub const EASTERN_WOODS: Self = Self(2);
    pub const RAVINE: Self = Self(3);
}

impl Default for AreaId {
    fn default() -> Self {
        Self::CAMP
    }
}

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Area {}", self.0)
    }
}

/// Cardinal facing of the player sprite.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Facing {
    #[default]
    Down,
    Left,
    Right,
    Up,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::Down, Facing::Left, Facing::Right, Facing::Up];

    /// Picks a facing from a direction or offset.
    ///
    /// The larger-magnitude axis wins; on an exact tie the horizontal axis
    /// wins because it is checked first. Returns `None` for a zero offset.
    pub fn from_offset(dx: f32, dy: f32) -> Option<Facing> {
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        if dx.abs() >= dy.abs() {
            Some(if dx > 0.0 { Facing::Right } else { Facing::Left })
        } else {
            Some(if dy > 0.0 { Facing::Down } else { Facing::Up })
        }
    }
}

/// Identity of a non-player character. Dialogue is resolved per variant.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum NpcKind {
    /// Keeper of the camp; asks for coins and opens the east gate.
    Homeless,
    /// Wandering scout with area-specific advice.
    Scout,
}

/// Identity of an inventory item. Duplicate pickups aggregate by kind.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemKind {
    RustyKey,
    Mushroom,
    Herb,
    Lantern,
    Berries,
    Flint,
    Feather,
}

impl ItemKind {
    /// Keys are only ever spent on a gate.
    pub fn is_key(self) -> bool {
        matches!(self, Self::RustyKey)
    }
}

/// Identity of a gate. Each gate exists in at most one area.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum GateKind {
    /// Opened by the homeless man once the coin quest is done.
    EastGate,
    /// Locked; opens with a rusty key.
    IronGate,
}
