use range_trainer::config::Pacing;
use range_trainer::drill::{Decision, Drill, DrillSettings, Phase};
use range_trainer::range::{ActionKind, Position, RangeStore, TrainingContext};
use range_trainer::table::Seat;
use std::time::{Duration, Instant};

fn plan_store() -> RangeStore {
    RangeStore::default().apply_notation(TrainingContext::rfi(Position::Btn), ActionKind::Rfi, "AA, AKs")
}

fn fast_drill(seed: u64) -> Drill {
    let plan = plan_store().training_plan(ActionKind::Rfi);
    let settings = DrillSettings { pacing: Pacing::instant(), seed: Some(seed), ..DrillSettings::default() };
    let mut drill = Drill::new(plan, settings);
    drill.start(Instant::now());
    drill.settle();
    drill
}

fn observer_hand(drill: &Drill) -> (Position, range_trainer::hand::HandLabel) {
    let deal = drill.deal().unwrap();
    (deal.observer_position(), deal.observer_label().unwrap())
}

#[test]
fn every_hand_reaches_the_observer_at_the_button() {
    let mut drill = fast_drill(1);
    for _ in 0..20 {
        assert!(drill.awaiting_decision());
        let deal = drill.deal().unwrap();
        assert_eq!(deal.observer_position(), Position::Btn);
        // UTG, MP and CO fold before the button acts
        let folded = Seat::ALL.iter().filter(|s| deal.is_folded(**s)).count();
        assert_eq!(folded, 3);
        assert!((deal.pot() - 1.5).abs() < 1e-9);
        assert!(deal.cards_revealed());
        assert!(drill.next(Instant::now()));
        drill.settle();
    }
}

#[test]
fn correct_decisions_score_and_deal_on() {
    let mut drill = fast_drill(2);
    for _ in 0..30 {
        let (position, hand) = observer_hand(&drill);
        let decision = if drill.plan().contains(position, hand) { Decision::Raise } else { Decision::Fold };
        assert!(drill.decide(decision, Instant::now()));
        drill.settle();
        assert!(drill.awaiting_decision());
    }
    assert_eq!(drill.score().correct, 30);
    assert_eq!(drill.score().incorrect, 0);
}

#[test]
fn wrong_decision_shows_range_and_retry_restores() {
    let mut drill = fast_drill(3);
    let (position, hand) = observer_hand(&drill);
    let wrong = if drill.plan().contains(position, hand) { Decision::Fold } else { Decision::Raise };
    let before = drill.deal().unwrap().snapshot(Seat::OBSERVER);

    assert!(drill.decide(wrong, Instant::now()));
    drill.settle();
    let fb = drill.feedback().cloned().unwrap();
    assert_eq!(fb.hand, hand);
    assert_eq!(fb.position, Position::Btn);
    assert_eq!(fb.decision, wrong);
    assert_eq!(fb.range.len(), 2);
    assert_eq!(drill.score().incorrect, 1);
    // feedback waits for the user
    assert_eq!(drill.pending_steps(), 0);

    assert!(drill.retry());
    assert_eq!(drill.phase(), &Phase::ObserverTurn);
    assert_eq!(drill.deal().unwrap().snapshot(Seat::OBSERVER), before);
    assert_eq!(drill.deal().unwrap().observer_label(), Some(hand));
}

#[test]
fn raise_adds_to_posted_blind() {
    // force the observer into the small blind by training it alone
    let store = RangeStore::default().apply_notation(TrainingContext::rfi(Position::Sb), ActionKind::Rfi, "AA");
    let settings = DrillSettings { pacing: Pacing::instant(), seed: Some(9), ..DrillSettings::default() };
    let mut drill = Drill::new(store.training_plan(ActionKind::Rfi), settings);
    drill.start(Instant::now());
    drill.settle();
    assert_eq!(drill.deal().unwrap().observer_position(), Position::Sb);
    assert!(drill.decide(Decision::Raise, Instant::now()));
    let deal = drill.deal().unwrap();
    assert_eq!(deal.bet(Seat::OBSERVER), Some(3.0));
    assert!((deal.pot() - 4.0).abs() < 1e-9);
}

#[test]
fn second_decision_while_evaluating_is_ignored() {
    let mut drill = fast_drill(4);
    let now = Instant::now();
    assert!(drill.decide(Decision::Fold, now));
    assert!(!drill.decide(Decision::Raise, now));
    assert!(matches!(drill.phase(), Phase::Deciding(Decision::Fold)));
}

#[test]
fn steps_follow_pacing_delays() {
    let plan = plan_store().training_plan(ActionKind::Rfi);
    let settings = DrillSettings { seed: Some(6), ..DrillSettings::default() };
    let pacing = settings.pacing;
    let mut drill = Drill::new(plan, settings);
    let t0 = Instant::now();
    drill.start(t0);
    assert!(!drill.tick(t0));
    assert_eq!(drill.next_due(), Some(t0 + pacing.dealer()));
    assert!(drill.tick(t0 + pacing.dealer()));
    assert_eq!(drill.phase(), &Phase::DealerAssigned);
    assert!(drill.deal().unwrap().dealer_visible());
    assert!(!drill.awaiting_decision());
    assert!(!drill.decide(Decision::Raise, t0 + pacing.dealer()));
}

#[test]
fn next_hand_cancels_pending_sequence() {
    let plan = plan_store().training_plan(ActionKind::Rfi);
    let settings = DrillSettings { seed: Some(7), ..DrillSettings::default() };
    let mut drill = Drill::new(plan, settings);
    let t0 = Instant::now();
    drill.start(t0);
    drill.tick(t0 + Duration::from_secs(1));
    assert!(drill.next(t0 + Duration::from_secs(1)));
    // only the new hand's first step is queued
    assert_eq!(drill.pending_steps(), 1);
    assert_eq!(drill.phase(), &Phase::Idle);
    assert!(!drill.deal().unwrap().dealer_visible());
}

#[test]
fn abandoned_drill_stays_inert() {
    let mut drill = fast_drill(8);
    drill.abandon();
    assert_eq!(drill.pending_steps(), 0);
    assert!(!drill.next(Instant::now()));
    assert!(!drill.decide(Decision::Fold, Instant::now()));
    assert!(!drill.tick(Instant::now() + Duration::from_secs(10)));
    assert_eq!(drill.phase(), &Phase::Abandoned);
}
