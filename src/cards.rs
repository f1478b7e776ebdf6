//! Ranks, suits and cards in the short text form used by range charts (`A`, `Ts`, `7c`).

use std::fmt;
use std::str::FromStr;

const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];
const SUIT_CHARS: [char; 4] = ['c', 'd', 'h', 's'];

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardError {
    #[error("invalid rank: '{0}'")]
    Rank(char),
    #[error("invalid suit: '{0}'")]
    Suit(char),
    #[error("a card is a rank and a suit, got '{0}'")]
    Shape(String),
}

/// Card ranks, Two lowest. Ordering follows strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// Lowest first.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Two is 0, Ace is 12.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Rank> {
        Rank::ALL.get(index).copied()
    }

    pub const fn to_char(self) -> char {
        RANK_CHARS[self.index()]
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl TryFrom<char> for Rank {
    type Error = CardError;
    /// Case-insensitive; ten is `T` only.
    fn try_from(c: char) -> Result<Self, Self::Error> {
        let upper = c.to_ascii_uppercase();
        RANK_CHARS
            .iter()
            .position(|r| *r == upper)
            .and_then(Rank::from_index)
            .ok_or(CardError::Rank(c))
    }
}

impl FromStr for Rank {
    type Err = CardError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Rank::try_from(c),
            _ => Err(CardError::Shape(s.to_string())),
        }
    }
}

/// Suits only matter for telling suited from offsuit hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub const fn to_char(self) -> char {
        SUIT_CHARS[self as usize]
    }

    pub const fn symbol(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }

    pub const fn is_red(self) -> bool {
        matches!(self, Suit::Diamonds | Suit::Hearts)
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl TryFrom<char> for Suit {
    type Error = CardError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        let lower = c.to_ascii_lowercase();
        SUIT_CHARS
            .iter()
            .position(|s| *s == lower)
            .and_then(|i| Suit::ALL.get(i).copied())
            .ok_or(CardError::Suit(c))
    }
}

/// A playing card.
///
/// ```
/// use range_trainer::cards::{Card, Rank, Suit};
///
/// let card: Card = "Ts".parse().unwrap();
/// assert_eq!(card, Card::new(Rank::Ten, Suit::Spades));
/// assert_eq!(card.to_string(), "Ts");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn rank(self) -> Rank {
        self.rank
    }

    pub const fn suit(self) -> Suit {
        self.suit
    }

    /// Dense index in `0..52`, suit-major.
    pub const fn index(self) -> usize {
        self.suit as usize * 13 + self.rank.index()
    }

    pub fn from_index(index: usize) -> Option<Card> {
        let suit = Suit::ALL.get(index / 13)?;
        let rank = Rank::from_index(index % 13)?;
        Some(Card::new(rank, *suit))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = CardError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(su), None) => Ok(Card::new(Rank::try_from(r)?, Suit::try_from(su)?)),
            _ => Err(CardError::Shape(s.to_string())),
        }
    }
}

/// Parse cards separated by whitespace and/or commas.
pub fn parse_cards(input: &str) -> Result<Vec<Card>, CardError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(Card::from_str)
        .collect()
}
