use proptest::prelude::*;
use range_trainer::hand::{catalog, HandLabel, CATALOG_LEN};
use range_trainer::range::notation::{apply, format, parse};
use range_trainer::range::{ActionKind, RangeSlot};
use std::collections::BTreeSet;

fn set(hands: &[&str]) -> BTreeSet<HandLabel> {
    hands.iter().map(|h| h.parse().unwrap()).collect()
}

fn any_action() -> impl Strategy<Value = ActionKind> {
    prop_oneof![Just(ActionKind::Rfi), Just(ActionKind::Call), Just(ActionKind::ThreeBet)]
}

fn any_label() -> impl Strategy<Value = HandLabel> {
    (0..CATALOG_LEN).prop_map(|i| HandLabel::from_index(i).unwrap())
}

prop_compose! {
    /// A slot with random tags for every action.
    fn any_slot()(bits in proptest::collection::vec(0u8..8, CATALOG_LEN)) -> RangeSlot {
        let mut slot = RangeSlot::baseline();
        for (label, b) in catalog().zip(bits) {
            for (i, action) in ActionKind::ALL.into_iter().enumerate() {
                if b & (1 << i) != 0 {
                    slot = slot.toggled(label, action);
                }
            }
        }
        slot
    }
}

#[test]
fn suited_range_expands_downwards() {
    assert_eq!(parse("A5s-A2s"), set(&["A5s", "A4s", "A3s", "A2s"]));
}

#[test]
fn pair_range_expands() {
    assert_eq!(parse("JJ-99"), set(&["JJ", "TT", "99"]));
}

#[test]
fn exact_hands() {
    assert_eq!(parse("AA, AKs, KQo"), set(&["AA", "AKs", "KQo"]));
}

#[test]
fn malformed_token_is_dropped_alone() {
    assert_eq!(parse("AA, Zz, KQo"), set(&["AA", "KQo"]));
}

#[test]
fn unsuffixed_non_pair_is_rejected() {
    assert_eq!(parse("AK, QQ"), set(&["QQ"]));
}

#[test]
fn format_of_empty_slot_is_empty() {
    assert_eq!(format(&RangeSlot::baseline(), ActionKind::Rfi), "");
}

proptest! {
    #[test]
    fn format_then_parse_round_trips(slot in any_slot(), action in any_action()) {
        let parsed = parse(&format(&slot, action));
        let applied = apply(&RangeSlot::baseline(), action, &parsed);
        let want: Vec<HandLabel> = slot.tagged(action).collect();
        let got: Vec<HandLabel> = applied.tagged(action).collect();
        prop_assert_eq!(got, want);
    }

    #[test]
    fn apply_leaves_other_actions_alone(slot in any_slot(), action in any_action(), hand in any_label()) {
        let hands: BTreeSet<HandLabel> = [hand].into_iter().collect();
        let next = apply(&slot, action, &hands);
        for other in ActionKind::ALL.into_iter().filter(|a| *a != action) {
            prop_assert_eq!(next.tagged(other).collect::<Vec<_>>(), slot.tagged(other).collect::<Vec<_>>());
        }
        prop_assert_eq!(next.tagged(action).collect::<Vec<_>>(), vec![hand]);
    }

    #[test]
    fn toggle_twice_restores(slot in any_slot(), action in any_action(), hand in any_label()) {
        let back = slot.toggled(hand, action).toggled(hand, action);
        prop_assert_eq!(back, slot);
    }

    #[test]
    fn parse_never_panics(text in ".{0,40}") {
        let _ = parse(&text);
    }
}
