use range_trainer::hand::{catalog, CATALOG_LEN, TOTAL_COMBOS};
use range_trainer::range::context::{hero_positions, villain_positions};
use range_trainer::range::{ActionKind, Position, RangeStore, TrainingContext};

fn all_contexts() -> Vec<TrainingContext> {
    let mut out = Vec::new();
    for action in ActionKind::ALL {
        if action.is_villain_relative() {
            for villain in villain_positions() {
                for hero in hero_positions(action, Some(villain)) {
                    out.push(TrainingContext::new(action, hero, Some(villain)));
                }
            }
        } else {
            for hero in hero_positions(action, None) {
                out.push(TrainingContext::new(action, hero, None));
            }
        }
    }
    out
}

#[test]
fn every_context_has_a_full_catalog() {
    let store = RangeStore::default().toggle(
        TrainingContext::rfi(Position::Co),
        "AA".parse().unwrap(),
        ActionKind::Rfi,
    );
    for ctx in all_contexts() {
        let slot = store.slot(ctx);
        assert_eq!(slot.len(), CATALOG_LEN, "{ctx}");
        let combos: u32 = slot.iter().map(|(h, _)| h.combos()).sum();
        assert_eq!(combos, TOTAL_COMBOS);
    }
}

#[test]
fn single_pair_is_045_percent() {
    let ctx = TrainingContext::rfi(Position::Utg);
    let store = RangeStore::default().apply_notation(ctx, ActionKind::Rfi, "AA");
    assert_eq!(store.percentage_label(ctx, ActionKind::Rfi), "0.45");
}

#[test]
fn whole_catalog_is_100_percent() {
    let ctx = TrainingContext::new(ActionKind::ThreeBet, Position::Bb, Some(Position::Btn));
    let store = catalog().fold(RangeStore::default(), |s, h| s.toggle(ctx, h, ActionKind::ThreeBet));
    assert_eq!(store.percentage_label(ctx, ActionKind::ThreeBet), "100.00");
    assert_eq!(store.percentage_label(ctx, ActionKind::Call), "0.00");
}

#[test]
fn contexts_are_independent() {
    let vs_utg = TrainingContext::new(ActionKind::Call, Position::Btn, Some(Position::Utg));
    let vs_co = TrainingContext::new(ActionKind::Call, Position::Btn, Some(Position::Co));
    let store = RangeStore::default().apply_notation(vs_utg, ActionKind::Call, "TT-77");
    assert_eq!(store.range(vs_utg, ActionKind::Call).len(), 4);
    assert!(store.range(vs_co, ActionKind::Call).is_empty());
}

#[test]
fn persisted_form_round_trips_several_contexts() {
    let store = RangeStore::default()
        .apply_notation(TrainingContext::rfi(Position::Btn), ActionKind::Rfi, "22-AA, A5s-A2s")
        .apply_notation(
            TrainingContext::new(ActionKind::ThreeBet, Position::Sb, Some(Position::Co)),
            ActionKind::ThreeBet,
            "QQ-AA, AKs",
        );
    let json = store.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["3bet"]["CO"]["SB"]["AKs"], serde_json::json!(["3bet"]));
    assert_eq!(RangeStore::from_json(&json).unwrap(), store);
}

#[test]
fn training_plan_is_a_snapshot() {
    let ctx = TrainingContext::rfi(Position::Co);
    let store = RangeStore::default().apply_notation(ctx, ActionKind::Rfi, "AA");
    let plan = store.training_plan(ActionKind::Rfi);
    let store = store.apply_notation(ctx, ActionKind::Rfi, "KK");
    assert!(plan.contains(Position::Co, "AA".parse().unwrap()));
    assert!(!plan.contains(Position::Co, "KK".parse().unwrap()));
    assert_eq!(store.format(ctx, ActionKind::Rfi), "KK");
}
