use crate::cards::Card;
use crate::hand::HoleCards;
use rand::seq::index;
use rand::Rng;

/// Cards in a standard deck.
pub const DECK_SIZE: usize = 52;

/// Draw two distinct cards uniformly from a full deck.
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use range_trainer::deck::deal_hole_cards;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// let hole = deal_hole_cards(&mut rng).unwrap();
/// assert_ne!(hole.first(), hole.second());
/// ```
pub fn deal_hole_cards<R: Rng + ?Sized>(rng: &mut R) -> Option<HoleCards> {
    let picks = index::sample(rng, DECK_SIZE, 2);
    let a = Card::from_index(picks.index(0))?;
    let b = Card::from_index(picks.index(1))?;
    HoleCards::try_new(a, b).ok()
}
