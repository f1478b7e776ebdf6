//! Shorthand range notation.
//!
//! Grammar: tokens separated by commas and/or whitespace. A token is either an
//! exact hand (`AA`, `AKs`, `KQo`) or a dash range between two hands of the
//! same category (`JJ-99`, `A5s-A2s`, `KTo-K8o`). Ranks are case-insensitive
//! and a non-pair written low rank first is normalized. Tokens that do not
//! fit the grammar are dropped individually.
//!
//! ```
//! use range_trainer::range::notation::parse;
//!
//! let hands: Vec<String> = parse("JJ-99, A5s-A4s").iter().map(|h| h.to_string()).collect();
//! assert_eq!(hands, ["A5s", "A4s", "JJ", "TT", "99"]);
//! ```

use super::action::ActionKind;
use super::store::RangeSlot;
use crate::cards::Rank;
use crate::hand::{HandLabel, HandLabelError, Shape};
use std::collections::BTreeSet;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotationError {
    #[error(transparent)]
    Hand(#[from] HandLabelError),
    #[error("range endpoints are not the same category: '{0}'")]
    MixedRange(String),
}

/// Canonical text of the hands tagged with `action`: catalog order, joined by `", "`.
pub fn format(slot: &RangeSlot, action: ActionKind) -> String {
    format_labels(slot.tagged(action))
}

/// Join labels with `", "`, in the order given.
pub fn format_labels<I>(labels: I) -> String
where
    I: IntoIterator<Item = HandLabel>,
{
    labels.into_iter().map(|h| h.to_string()).collect::<Vec<_>>().join(", ")
}

/// Parse range text into the set of hands it names. Bad tokens are skipped.
pub fn parse(text: &str) -> BTreeSet<HandLabel> {
    let mut hands = BTreeSet::new();
    for token in tokens(text) {
        match parse_token(token) {
            Ok(expanded) => hands.extend(expanded),
            Err(err) => log::debug!("dropping range token {token:?}: {err}"),
        }
    }
    hands
}

/// Parse a single token (exact hand or dash range).
pub fn parse_token(token: &str) -> Result<Vec<HandLabel>, NotationError> {
    match token.split_once('-') {
        None => Ok(vec![token.parse::<HandLabel>()?]),
        Some((from, to)) => {
            let from: HandLabel = from.parse()?;
            let to: HandLabel = to.parse()?;
            expand(from, to).ok_or_else(|| NotationError::MixedRange(token.to_string()))
        }
    }
}

/// Replace `action`'s membership in `slot` with exactly `hands`.
///
/// Hands in the set gain the tag, every other hand loses it; other actions are untouched.
pub fn apply(slot: &RangeSlot, action: ActionKind, hands: &BTreeSet<HandLabel>) -> RangeSlot {
    let mut next = slot.clone();
    for (label, tags) in slot.iter() {
        let wanted = hands.contains(&label);
        if wanted != tags.contains(action) {
            next.toggle(label, action);
        }
    }
    next
}

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == ',' || c.is_whitespace()).filter(|t| !t.is_empty())
}

/// Hands between two endpoints, highest first. `None` when the endpoints differ in category.
fn expand(a: HandLabel, b: HandLabel) -> Option<Vec<HandLabel>> {
    let shape = a.shape();
    if shape != b.shape() {
        return None;
    }
    let (lo, hi) = match shape {
        Shape::Pair => ordered(a.high(), b.high()),
        Shape::Suited | Shape::Offsuit if a.high() == b.high() => ordered(a.low(), b.low()),
        _ => return None,
    };
    let hands = (lo.index()..=hi.index())
        .rev()
        .filter_map(Rank::from_index)
        .filter_map(|r| match shape {
            Shape::Pair => Some(HandLabel::pair(r)),
            Shape::Suited => HandLabel::suited(a.high(), r),
            Shape::Offsuit => HandLabel::offsuit(a.high(), r),
        })
        .collect();
    Some(hands)
}

fn ordered(a: Rank, b: Rank) -> (Rank, Rank) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(set: &BTreeSet<HandLabel>) -> Vec<String> {
        set.iter().map(|h| h.to_string()).collect()
    }

    #[test]
    fn single_tokens() {
        assert_eq!(parse_token("aa").unwrap()[0].to_string(), "AA");
        assert_eq!(parse_token("KAo").unwrap()[0].to_string(), "AKo");
        assert!(matches!(parse_token("Zz"), Err(NotationError::Hand(_))));
    }

    #[test]
    fn ranges_are_order_independent() {
        assert_eq!(names(&parse("A2s-A5s")), names(&parse("A5s-A2s")));
        assert_eq!(names(&parse("99-JJ")), vec!["JJ", "TT", "99"]);
    }

    #[test]
    fn mixed_category_range_is_dropped() {
        assert!(matches!(parse_token("AKs-AQo"), Err(NotationError::MixedRange(_))));
        assert!(matches!(parse_token("AKs-KQs"), Err(NotationError::MixedRange(_))));
        assert!(matches!(parse_token("AA-AKs"), Err(NotationError::MixedRange(_))));
        assert!(parse("AA-AKs, QQ").len() == 1);
    }

    #[test]
    fn offsuit_range_expands_low_card() {
        assert_eq!(names(&parse("KTo-K8o")), vec!["KTo", "K9o", "K8o"]);
    }

    #[test]
    fn single_point_range() {
        assert_eq!(names(&parse("77-77")), vec!["77"]);
    }

    #[test]
    fn whitespace_and_commas_both_separate() {
        assert_eq!(names(&parse(" AA,KK  QQ,,AKs ")), vec!["AA", "AKs", "KK", "QQ"]);
        assert!(parse("").is_empty());
        assert!(parse(" , ").is_empty());
    }

    #[test]
    fn format_joins_in_catalog_order() {
        let hands = parse("KQo, AA, AKs");
        assert_eq!(format_labels(hands), "AA, AKs, KQo");
    }
}
