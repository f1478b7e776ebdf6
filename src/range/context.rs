use super::action::ActionKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Six-max table positions, in preflop action order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "UTG")]
    Utg,
    #[serde(rename = "MP")]
    Mp,
    #[serde(rename = "CO")]
    Co,
    #[serde(rename = "BTN")]
    Btn,
    #[serde(rename = "SB")]
    Sb,
    #[serde(rename = "BB")]
    Bb,
}

impl Position {
    /// Preflop action order.
    pub const ALL: [Position; 6] =
        [Position::Utg, Position::Mp, Position::Co, Position::Btn, Position::Sb, Position::Bb];

    /// Positions by clockwise offset from the dealer seat.
    pub const ROTATION: [Position; 6] =
        [Position::Btn, Position::Sb, Position::Bb, Position::Utg, Position::Mp, Position::Co];

    /// The position held by a seat `offset` places after the dealer (wraps).
    pub const fn from_dealer_offset(offset: usize) -> Position {
        Position::ROTATION[offset % 6]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Position::Utg => "UTG",
            Position::Mp => "MP",
            Position::Co => "CO",
            Position::Btn => "BTN",
            Position::Sb => "SB",
            Position::Bb => "BB",
        }
    }

    fn order(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PositionParseError {
    #[error("invalid position: '{0}'")]
    Invalid(String),
}

impl FromStr for Position {
    type Err = PositionParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PositionParseError::Invalid(s.to_string()))
    }
}

/// Second key of a chart: the villain's position, or `ALL` for villain-agnostic actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum VillainKey {
    All,
    Vs(Position),
}

impl fmt::Display for VillainKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VillainKey::All => f.write_str("ALL"),
            VillainKey::Vs(p) => write!(f, "{p}"),
        }
    }
}

impl From<VillainKey> for String {
    fn from(key: VillainKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for VillainKey {
    type Error = PositionParseError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == "ALL" {
            return Ok(VillainKey::All);
        }
        value.parse().map(VillainKey::Vs)
    }
}

/// Identifies one range chart: (action, hero position, villain key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrainingContext {
    pub action: ActionKind,
    pub hero: Position,
    pub villain: VillainKey,
}

impl TrainingContext {
    /// Villain is ignored (collapses to `ALL`) for villain-agnostic actions.
    /// A villain-relative action without a villain defaults to UTG.
    pub fn new(action: ActionKind, hero: Position, villain: Option<Position>) -> Self {
        let villain = if action.is_villain_relative() {
            VillainKey::Vs(villain.unwrap_or(Position::Utg))
        } else {
            VillainKey::All
        };
        Self { action, hero, villain }
    }

    pub fn rfi(hero: Position) -> Self {
        Self::new(ActionKind::Rfi, hero, None)
    }
}

impl fmt::Display for TrainingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.villain {
            VillainKey::All => write!(f, "{} {}", self.action, self.hero),
            VillainKey::Vs(v) => write!(f, "{} {} vs {}", self.action, self.hero, v),
        }
    }
}

/// Positions a villain can open from (everyone but the big blind).
pub fn villain_positions() -> Vec<Position> {
    Position::ALL.into_iter().filter(|p| *p != Position::Bb).collect()
}

/// Hero positions that make sense for an action.
///
/// RFI: everyone but the big blind. Villain-relative actions: the positions
/// acting after the villain.
pub fn hero_positions(action: ActionKind, villain: Option<Position>) -> Vec<Position> {
    if !action.is_villain_relative() {
        return villain_positions();
    }
    let villain = villain.unwrap_or(Position::Utg);
    Position::ALL.into_iter().filter(|p| p.order() > villain.order()).collect()
}
