//! Six-max table: seats, the dealer button, positions, blinds and the hero's deal.
//!
//! Seat 5 (index 4) always belongs to the observer, the player being trained.
//! Every other seat is a placeholder that folds when the action reaches it.

use crate::deck::deal_hole_cards;
use crate::hand::{HandLabel, HoleCards};
use crate::range::Position;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::BTreeSet;
use std::fmt;

/// Seats at the table.
pub const SEATS: usize = 6;

/// A seat at the table, stored zero-based and displayed one-based (`P1`..`P6`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Seat(usize);

impl Seat {
    /// The observer's fixed seat.
    pub const OBSERVER: Seat = Seat(4);

    pub const ALL: [Seat; SEATS] = [Seat(0), Seat(1), Seat(2), Seat(3), Seat(4), Seat(5)];

    pub fn new(index: usize) -> Option<Seat> {
        (index < SEATS).then_some(Seat(index))
    }

    pub const fn index(self) -> usize {
        self.0
    }

    /// One-based seat number.
    pub const fn number(self) -> usize {
        self.0 + 1
    }

    /// The seat `n` places clockwise (wraps).
    pub const fn offset(self, n: usize) -> Seat {
        Seat((self.0 + n) % SEATS)
    }

    pub const fn next(self) -> Seat {
        self.offset(1)
    }

    /// Clockwise distance from `from` to this seat.
    pub const fn distance_from(self, from: Seat) -> usize {
        (self.0 + SEATS - from.0) % SEATS
    }

    pub const fn is_observer(self) -> bool {
        self.0 == Seat::OBSERVER.0
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.number())
    }
}

/// Position assignment derived from a dealer seat. Bijective by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seating {
    dealer: Seat,
}

impl Seating {
    pub const fn new(dealer: Seat) -> Self {
        Self { dealer }
    }

    pub const fn dealer(&self) -> Seat {
        self.dealer
    }

    pub const fn position_of(&self, seat: Seat) -> Position {
        Position::from_dealer_offset(seat.distance_from(self.dealer))
    }

    pub fn seat_of(&self, position: Position) -> Seat {
        let offset = Position::ROTATION.iter().position(|p| *p == position).unwrap_or(0);
        self.dealer.offset(offset)
    }

    pub const fn small_blind(&self) -> Seat {
        self.dealer.offset(1)
    }

    pub const fn big_blind(&self) -> Seat {
        self.dealer.offset(2)
    }

    /// First seat to act preflop (UTG).
    pub const fn first_to_act(&self) -> Seat {
        self.dealer.offset(3)
    }

    /// Position of every seat, indexed by seat.
    pub fn positions(&self) -> [Position; SEATS] {
        Seat::ALL.map(|s| self.position_of(s))
    }
}

/// Position the observer would hold with `dealer` on the button.
pub const fn observer_position(dealer: Seat) -> Position {
    Seating::new(dealer).position_of(Seat::OBSERVER)
}

/// How the dealer seat for a hand was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealerChoice {
    pub dealer: Seat,
    /// No candidate matched a trained position and the pick fell back to any seat.
    pub fallback: bool,
    /// The pick would have put the observer in the big blind and was moved one seat.
    pub shifted: bool,
}

/// Pick the dealer seat for a new hand.
///
/// Candidates are the seats that give the observer a trained position (every
/// seat when nothing is trained). One is drawn uniformly; with no candidates
/// any seat is drawn. If the observer would then be the big blind the button
/// moves one seat on, without re-checking the trained positions, so the
/// observer can land in an untrained position.
pub fn select_dealer<R: Rng + ?Sized>(trained: &BTreeSet<Position>, rng: &mut R) -> DealerChoice {
    let candidates: Vec<Seat> = Seat::ALL
        .into_iter()
        .filter(|d| trained.is_empty() || trained.contains(&observer_position(*d)))
        .collect();
    let (picked, fallback) = match candidates.choose(rng) {
        Some(seat) => (*seat, false),
        None => (Seat(rng.random_range(0..SEATS)), true),
    };
    let shifted = Seating::new(picked).big_blind() == Seat::OBSERVER;
    let dealer = if shifted { picked.next() } else { picked };
    if fallback {
        log::debug!("no seat gives a trained position, dealer drawn from all seats");
    }
    if shifted {
        log::debug!("dealer moved from {picked} to {dealer} to keep the observer out of the big blind");
    }
    DealerChoice { dealer, fallback, shifted }
}

/// The observer's bet, fold flag and the pot, captured before a decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeatSnapshot {
    pub seat: Seat,
    pub bet: Option<f64>,
    pub folded: bool,
    pub pot: f64,
}

/// Table state for one hand. A new hand gets a fresh `DealState`.
#[derive(Debug, Clone, PartialEq)]
pub struct DealState {
    seating: Seating,
    bets: [Option<f64>; SEATS],
    folded: [bool; SEATS],
    pot: f64,
    current: Option<Seat>,
    dealer_visible: bool,
    hole: Option<HoleCards>,
    cards_revealed: bool,
}

impl DealState {
    pub fn new(seating: Seating) -> Self {
        Self {
            seating,
            bets: [None; SEATS],
            folded: [false; SEATS],
            pot: 0.0,
            current: None,
            dealer_visible: false,
            hole: None,
            cards_revealed: false,
        }
    }

    pub fn seating(&self) -> &Seating {
        &self.seating
    }

    pub fn dealer(&self) -> Seat {
        self.seating.dealer()
    }

    pub fn position_of(&self, seat: Seat) -> Position {
        self.seating.position_of(seat)
    }

    pub fn observer_position(&self) -> Position {
        self.position_of(Seat::OBSERVER)
    }

    pub fn bet(&self, seat: Seat) -> Option<f64> {
        self.bets[seat.index()]
    }

    pub fn is_folded(&self, seat: Seat) -> bool {
        self.folded[seat.index()]
    }

    pub fn pot(&self) -> f64 {
        self.pot
    }

    /// The single seat currently highlighted as acting, if any.
    pub fn current(&self) -> Option<Seat> {
        self.current
    }

    pub fn dealer_visible(&self) -> bool {
        self.dealer_visible
    }

    pub fn hole(&self) -> Option<HoleCards> {
        self.hole
    }

    pub fn observer_label(&self) -> Option<HandLabel> {
        self.hole.map(|h| h.label())
    }

    pub fn cards_revealed(&self) -> bool {
        self.cards_revealed
    }

    pub(crate) fn show_dealer(&mut self) {
        self.dealer_visible = true;
        self.current = Some(self.seating.dealer());
    }

    pub(crate) fn set_current(&mut self, seat: Seat) {
        self.current = Some(seat);
    }

    /// Add chips in front of a seat and to the pot.
    pub(crate) fn place_bet(&mut self, seat: Seat, amount: f64) {
        let slot = &mut self.bets[seat.index()];
        *slot = Some(slot.unwrap_or(0.0) + amount);
        self.pot += amount;
    }

    pub(crate) fn fold(&mut self, seat: Seat) {
        self.folded[seat.index()] = true;
    }

    pub(crate) fn post_small_blind(&mut self, amount: f64) -> Seat {
        let seat = self.seating.small_blind();
        self.place_bet(seat, amount);
        self.current = Some(seat);
        seat
    }

    pub(crate) fn post_big_blind(&mut self, amount: f64) -> Seat {
        let seat = self.seating.big_blind();
        self.place_bet(seat, amount);
        self.current = Some(seat);
        seat
    }

    pub(crate) fn deal_observer<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.hole = deal_hole_cards(rng);
        self.cards_revealed = false;
    }

    #[cfg(test)]
    pub(crate) fn set_hole(&mut self, hole: HoleCards) {
        self.hole = Some(hole);
    }

    pub(crate) fn set_cards_revealed(&mut self, revealed: bool) {
        self.cards_revealed = revealed;
    }

    pub fn snapshot(&self, seat: Seat) -> SeatSnapshot {
        SeatSnapshot { seat, bet: self.bet(seat), folded: self.is_folded(seat), pot: self.pot }
    }

    pub(crate) fn restore(&mut self, snap: &SeatSnapshot) {
        self.bets[snap.seat.index()] = snap.bet;
        self.folded[snap.seat.index()] = snap.folded;
        self.pot = snap.pot;
    }
}
