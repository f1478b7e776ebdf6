//! Hole cards and the 169 canonical starting-hand labels.
//!
//! The catalog order is the familiar 13x13 chart: row and column both run
//! from Ace down to Two, pairs sit on the diagonal, suited hands above it and
//! offsuit hands below it. The same order is used for formatting ranges and
//! for grid navigation in the chart editor.

use crate::cards::{parse_cards, Card, CardError, Rank};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Number of canonical starting hands.
pub const CATALOG_LEN: usize = 169;

/// Width of the chart grid.
pub const GRID_WIDTH: usize = 13;

/// Number of two-card combinations in a 52-card deck.
pub const TOTAL_COMBOS: u32 = 1326;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("duplicate cards in hole cards")]
    DuplicateHoleCards,
    #[error("expected exactly two hole cards, got {0}")]
    HoleCount(usize),
    #[error(transparent)]
    Card(#[from] CardError),
}

/// A player's two private hole cards.
///
/// ```
/// use range_trainer::cards::{Card, Rank, Suit};
/// use range_trainer::hand::HoleCards;
///
/// let hole = HoleCards::try_new(
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::King, Suit::Spades),
/// ).unwrap();
/// assert_eq!(hole.label().to_string(), "AKs");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoleCards(Card, Card);

impl HoleCards {
    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        if a == b {
            return Err(HandError::DuplicateHoleCards);
        }
        Ok(Self(a, b))
    }

    pub fn from_slice(slice: &[Card]) -> Result<Self, HandError> {
        if slice.len() != 2 {
            return Err(HandError::HoleCount(slice.len()));
        }
        Self::try_new(slice[0], slice[1])
    }

    /// Return the first (left) hole card.
    pub fn first(&self) -> Card {
        self.0
    }

    /// Return the second (right) hole card.
    pub fn second(&self) -> Card {
        self.1
    }

    pub fn as_array(&self) -> [Card; 2] {
        [self.0, self.1]
    }

    /// The canonical label of these two cards.
    pub fn label(&self) -> HandLabel {
        HandLabel::from_cards(self.0, self.1)
    }
}

impl FromStr for HoleCards {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s)?;
        Self::from_slice(&cards)
    }
}

/// Pair, suited or offsuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Pair,
    Suited,
    Offsuit,
}

impl Shape {
    /// Number of concrete card combinations per label of this shape.
    pub const fn combos(self) -> u32 {
        match self {
            Shape::Pair => 6,
            Shape::Suited => 4,
            Shape::Offsuit => 12,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandLabelError {
    #[error("invalid hand label: '{0}'")]
    Invalid(String),
    #[error("pair cannot be suited or offsuit: '{0}'")]
    ShapedPair(String),
    #[error("non-pair hand needs an 's' or 'o' suffix: '{0}'")]
    MissingSuffix(String),
}

/// One of the 169 canonical starting hands, e.g. `AA`, `AKs`, `72o`.
///
/// Ordering follows the catalog (chart) order, so sorted collections of labels
/// iterate in the canonical formatting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandLabel {
    high: Rank,
    low: Rank,
    shape: Shape,
}

impl HandLabel {
    pub const fn pair(rank: Rank) -> Self {
        Self { high: rank, low: rank, shape: Shape::Pair }
    }

    /// Suited hand from two different ranks, in either order.
    pub fn suited(a: Rank, b: Rank) -> Option<Self> {
        Self::unpaired(a, b, Shape::Suited)
    }

    /// Offsuit hand from two different ranks, in either order.
    pub fn offsuit(a: Rank, b: Rank) -> Option<Self> {
        Self::unpaired(a, b, Shape::Offsuit)
    }

    fn unpaired(a: Rank, b: Rank, shape: Shape) -> Option<Self> {
        match a.cmp(&b) {
            Ordering::Equal => None,
            Ordering::Greater => Some(Self { high: a, low: b, shape }),
            Ordering::Less => Some(Self { high: b, low: a, shape }),
        }
    }

    pub fn from_cards(a: Card, b: Card) -> Self {
        if a.rank() == b.rank() {
            return Self::pair(a.rank());
        }
        let shape = if a.suit() == b.suit() { Shape::Suited } else { Shape::Offsuit };
        let (high, low) = if a.rank() > b.rank() { (a.rank(), b.rank()) } else { (b.rank(), a.rank()) };
        Self { high, low, shape }
    }

    pub const fn high(self) -> Rank {
        self.high
    }

    pub const fn low(self) -> Rank {
        self.low
    }

    pub const fn shape(self) -> Shape {
        self.shape
    }

    pub const fn combos(self) -> u32 {
        self.shape.combos()
    }

    /// Position in the catalog, `0..CATALOG_LEN`.
    pub const fn index(self) -> usize {
        let h = 12 - self.high.index();
        let l = 12 - self.low.index();
        match self.shape {
            Shape::Pair | Shape::Suited => h * GRID_WIDTH + l,
            Shape::Offsuit => l * GRID_WIDTH + h,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index >= CATALOG_LEN {
            return None;
        }
        let row = index / GRID_WIDTH;
        let col = index % GRID_WIDTH;
        let row_rank = Rank::from_index(12 - row)?;
        let col_rank = Rank::from_index(12 - col)?;
        match row.cmp(&col) {
            Ordering::Equal => Some(Self::pair(row_rank)),
            Ordering::Less => Self::suited(row_rank, col_rank),
            Ordering::Greater => Self::offsuit(row_rank, col_rank),
        }
    }
}

impl PartialOrd for HandLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandLabel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index().cmp(&other.index())
    }
}

impl fmt::Display for HandLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shape {
            Shape::Pair => write!(f, "{}{}", self.high, self.low),
            Shape::Suited => write!(f, "{}{}s", self.high, self.low),
            Shape::Offsuit => write!(f, "{}{}o", self.high, self.low),
        }
    }
}

/// Accepts `RR`, `R1R2s`, `R1R2o` with case-insensitive ranks and suffix.
/// A non-pair written low-rank first is normalized (`5As` is `A5s`).
impl FromStr for HandLabel {
    type Err = HandLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let chars: Vec<char> = t.chars().collect();
        let invalid = || HandLabelError::Invalid(s.to_string());
        if chars.len() < 2 || chars.len() > 3 {
            return Err(invalid());
        }
        let a = Rank::try_from(chars[0]).map_err(|_| invalid())?;
        let b = Rank::try_from(chars[1]).map_err(|_| invalid())?;
        let suffix = chars.get(2).map(|c| c.to_ascii_lowercase());
        match (a == b, suffix) {
            (true, None) => Ok(Self::pair(a)),
            (true, Some(_)) => Err(HandLabelError::ShapedPair(s.to_string())),
            (false, None) => Err(HandLabelError::MissingSuffix(s.to_string())),
            (false, Some('s')) => Self::suited(a, b).ok_or_else(invalid),
            (false, Some('o')) => Self::offsuit(a, b).ok_or_else(invalid),
            (false, Some(_)) => Err(invalid()),
        }
    }
}

impl From<HandLabel> for String {
    fn from(label: HandLabel) -> Self {
        label.to_string()
    }
}

impl TryFrom<String> for HandLabel {
    type Error = HandLabelError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The full catalog in chart order.
///
/// ```
/// use range_trainer::hand::{catalog, TOTAL_COMBOS};
///
/// assert_eq!(catalog().count(), 169);
/// assert_eq!(catalog().map(|h| h.combos()).sum::<u32>(), TOTAL_COMBOS);
/// ```
pub fn catalog() -> impl Iterator<Item = HandLabel> {
    (0..CATALOG_LEN).filter_map(HandLabel::from_index)
}

/// Combo count of a label.
pub fn combo_count(label: HandLabel) -> u32 {
    label.combos()
}

/// Direction of a cursor move on the chart grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridStep {
    Up,
    Down,
    Left,
    Right,
}

/// Move a catalog index one cell on the 13-wide grid. Moves off the edge stay put.
pub fn grid_step(index: usize, step: GridStep) -> usize {
    let index = index.min(CATALOG_LEN - 1);
    match step {
        GridStep::Up if index >= GRID_WIDTH => index - GRID_WIDTH,
        GridStep::Down if index + GRID_WIDTH < CATALOG_LEN => index + GRID_WIDTH,
        GridStep::Left if index % GRID_WIDTH != 0 => index - 1,
        GridStep::Right if (index + 1) % GRID_WIDTH != 0 => index + 1,
        _ => index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;

    fn label(s: &str) -> HandLabel {
        s.parse().unwrap()
    }

    #[test]
    fn hole_cards_must_be_distinct() {
        let a = Card::new(Rank::Ace, Suit::Spades);
        assert!(matches!(HoleCards::try_new(a, a), Err(HandError::DuplicateHoleCards)));
        assert!(matches!(HoleCards::from_slice(&[a]), Err(HandError::HoleCount(1))));
    }

    #[test]
    fn hole_cards_label_orders_high_rank_first() {
        let hole: HoleCards = "7h 2c".parse().unwrap();
        assert_eq!(hole.label().to_string(), "72o");
        let hole: HoleCards = "Qs Ks".parse().unwrap();
        assert_eq!(hole.label().to_string(), "KQs");
        let hole: HoleCards = "9d 9c".parse().unwrap();
        assert_eq!(hole.label().to_string(), "99");
    }

    #[test]
    fn catalog_shape_counts() {
        let all: Vec<HandLabel> = catalog().collect();
        assert_eq!(all.len(), 169);
        assert_eq!(all.iter().filter(|h| h.shape() == Shape::Pair).count(), 13);
        assert_eq!(all.iter().filter(|h| h.shape() == Shape::Suited).count(), 78);
        assert_eq!(all.iter().filter(|h| h.shape() == Shape::Offsuit).count(), 78);
    }

    #[test]
    fn catalog_starts_with_chart_first_row() {
        let first: Vec<String> = catalog().take(14).map(|h| h.to_string()).collect();
        assert_eq!(first[0], "AA");
        assert_eq!(first[1], "AKs");
        assert_eq!(first[12], "A2s");
        assert_eq!(first[13], "AKo");
        assert_eq!(HandLabel::from_index(14).unwrap().to_string(), "KK");
        assert_eq!(HandLabel::from_index(168).unwrap().to_string(), "22");
    }

    #[test]
    fn index_round_trips() {
        for i in 0..CATALOG_LEN {
            assert_eq!(HandLabel::from_index(i).unwrap().index(), i);
        }
        assert_eq!(HandLabel::from_index(CATALOG_LEN), None);
    }

    #[test]
    fn parsing_normalizes_and_rejects() {
        assert_eq!(label("aks").to_string(), "AKs");
        assert_eq!(label("5As").to_string(), "A5s");
        assert_eq!(label("tjo").to_string(), "JTo");
        assert!(matches!("AAs".parse::<HandLabel>(), Err(HandLabelError::ShapedPair(_))));
        assert!(matches!("AK".parse::<HandLabel>(), Err(HandLabelError::MissingSuffix(_))));
        assert!("Zz".parse::<HandLabel>().is_err());
        assert!("AKx".parse::<HandLabel>().is_err());
        assert!("AKso".parse::<HandLabel>().is_err());
    }

    #[test]
    fn combo_counts_by_shape() {
        assert_eq!(combo_count(label("AA")), 6);
        assert_eq!(combo_count(label("AKs")), 4);
        assert_eq!(combo_count(label("AKo")), 12);
    }

    #[test]
    fn grid_step_stays_inside_grid() {
        assert_eq!(grid_step(0, GridStep::Up), 0);
        assert_eq!(grid_step(0, GridStep::Left), 0);
        assert_eq!(grid_step(0, GridStep::Right), 1);
        assert_eq!(grid_step(0, GridStep::Down), 13);
        assert_eq!(grid_step(12, GridStep::Right), 12);
        assert_eq!(grid_step(13, GridStep::Left), 13);
        assert_eq!(grid_step(168, GridStep::Down), 168);
    }
}
