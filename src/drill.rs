//! Practice drill: the turn sequencer and the decision evaluator.
//!
//! A hand is a chain of [`Step`]s on a [`Timeline`]. Each step runs once its
//! delay has elapsed and queues the next one, so the table only ever shows one
//! state at a time and at most one seat as acting. Starting a new hand or
//! leaving the drill invalidates the [`Token`] of the running chain; nothing
//! queued under an old token ever runs.

use crate::config::{Pacing, TrainerConfig};
use crate::hand::HandLabel;
use crate::range::{Position, TrainingPlan};
use crate::table::{select_dealer, DealState, Seat, SeatSnapshot, Seating};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::{BTreeSet, VecDeque};
use std::fmt;
use std::time::Instant;

/// Identifies one chain of steps. Only the most recent token is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token(u64);

/// Single-threaded scheduler of delayed steps, run strictly in queue order.
#[derive(Debug)]
pub struct Timeline<S> {
    generation: u64,
    queue: VecDeque<(Token, Instant, S)>,
}

impl<S> Default for Timeline<S> {
    fn default() -> Self {
        Self { generation: 0, queue: VecDeque::new() }
    }
}

impl<S> Timeline<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything outstanding and hand out a fresh token.
    pub fn begin(&mut self) -> Token {
        self.cancel();
        Token(self.generation)
    }

    /// Invalidate the live token and drop its pending steps.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.queue.clear();
    }

    pub fn is_current(&self, token: Token) -> bool {
        token.0 == self.generation
    }

    /// Queue `step` to run at `at`. Refused for a stale token.
    pub fn schedule(&mut self, token: Token, step: S, at: Instant) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.queue.push_back((token, at, step));
        true
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.queue.front().map(|(_, at, _)| *at)
    }

    /// Take the front step if it is due at `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<S> {
        if self.next_due().is_some_and(|at| at <= now) {
            return self.pop_next().map(|(_, step)| step);
        }
        None
    }

    /// Take the front step whatever its due time.
    pub fn pop_next(&mut self) -> Option<(Instant, S)> {
        while let Some((token, at, step)) = self.queue.pop_front() {
            if self.is_current(token) {
                return Some((at, step));
            }
        }
        None
    }
}

/// The observer's two admissible actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    Fold,
    Raise,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Decision::Fold => "fold",
            Decision::Raise => "raise",
        })
    }
}

/// One step of a practice hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    RevealDealer,
    SmallBlind,
    BigBlind,
    /// Action reaches a seat: placeholders fold, the observer gets to decide.
    Turn(Seat),
    Evaluate(Decision),
    NextHand,
}

/// Presentation events. Queued by the drill, drained by whoever renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Cue {
    DealerAssigned,
    BetPlaced,
    Fold,
    CardsRevealed,
}

/// What the observer got wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub position: Position,
    /// The trained range at `position`; empty if that position was never trained.
    pub range: BTreeSet<HandLabel>,
    pub hand: HandLabel,
    pub decision: Decision,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    DealerAssigned,
    BlindsPosted,
    AutoFold(Seat),
    ObserverTurn,
    Deciding(Decision),
    Correct,
    Feedback(Feedback),
    Abandoned,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub correct: u32,
    pub incorrect: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrillSettings {
    pub pacing: Pacing,
    pub small_blind: f64,
    pub big_blind: f64,
    pub raise_size: f64,
    pub seed: Option<u64>,
}

impl Default for DrillSettings {
    fn default() -> Self {
        Self::from(&TrainerConfig::default())
    }
}

impl From<&TrainerConfig> for DrillSettings {
    fn from(cfg: &TrainerConfig) -> Self {
        Self {
            pacing: cfg.pacing,
            small_blind: cfg.small_blind,
            big_blind: cfg.big_blind,
            raise_size: cfg.raise_size,
            seed: cfg.seed,
        }
    }
}

/// Whether `decision` with `hand` at `position` agrees with the plan:
/// fold outside the trained range, raise inside it.
pub fn is_correct(
    plan: &TrainingPlan,
    position: Position,
    hand: HandLabel,
    decision: Decision,
) -> bool {
    let in_range = plan.contains(position, hand);
    match decision {
        Decision::Fold => !in_range,
        Decision::Raise => in_range,
    }
}

/// A practice session over a fixed [`TrainingPlan`].
#[derive(Debug)]
pub struct Drill {
    plan: TrainingPlan,
    settings: DrillSettings,
    rng: ChaCha8Rng,
    timeline: Timeline<Step>,
    token: Token,
    deal: Option<DealState>,
    phase: Phase,
    snapshot: Option<SeatSnapshot>,
    cues: Vec<Cue>,
    score: Score,
}

impl Drill {
    pub fn new(plan: TrainingPlan, settings: DrillSettings) -> Self {
        let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
        let mut timeline = Timeline::new();
        let token = timeline.begin();
        Self {
            plan,
            settings,
            rng: ChaCha8Rng::seed_from_u64(seed),
            timeline,
            token,
            deal: None,
            phase: Phase::Idle,
            snapshot: None,
            cues: Vec::new(),
            score: Score::default(),
        }
    }

    /// Deal the first hand.
    pub fn start(&mut self, now: Instant) {
        log::info!(
            "practice started for {} at {:?}",
            self.plan.action(),
            self.plan.trained_positions()
        );
        self.new_hand(now);
    }

    pub fn plan(&self) -> &TrainingPlan {
        &self.plan
    }

    pub fn settings(&self) -> &DrillSettings {
        &self.settings
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn deal(&self) -> Option<&DealState> {
        self.deal.as_ref()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        match &self.phase {
            Phase::Feedback(fb) => Some(fb),
            _ => None,
        }
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn pending_steps(&self) -> usize {
        self.timeline.len()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.timeline.next_due()
    }

    /// True when a decision would be accepted right now.
    pub fn awaiting_decision(&self) -> bool {
        self.phase == Phase::ObserverTurn && self.timeline.is_idle()
    }

    pub fn take_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    /// Run every step that is due at `now`. Returns whether anything ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut ran = false;
        while let Some(step) = self.timeline.pop_due(now) {
            self.run(step, now);
            ran = true;
        }
        ran
    }

    /// Run queued steps without waiting for their delays, until the drill needs
    /// input. Returns the number of steps run.
    pub fn settle(&mut self) -> usize {
        let mut count = 0;
        while let Some((at, step)) = self.timeline.pop_next() {
            self.run(step, at);
            count += 1;
        }
        count
    }

    /// Submit the observer's decision. Ignored unless the observer is to act and
    /// no earlier decision is still being evaluated.
    pub fn decide(&mut self, decision: Decision, now: Instant) -> bool {
        if !self.awaiting_decision() {
            return false;
        }
        let Some(deal) = self.deal.as_mut() else {
            return false;
        };
        self.snapshot = Some(deal.snapshot(Seat::OBSERVER));
        match decision {
            Decision::Fold => {
                deal.fold(Seat::OBSERVER);
                deal.set_cards_revealed(false);
                self.cues.push(Cue::Fold);
            }
            Decision::Raise => {
                deal.place_bet(Seat::OBSERVER, self.settings.raise_size);
                self.cues.push(Cue::BetPlaced);
            }
        }
        log::debug!("observer chose {decision} at {}", deal.observer_position());
        self.phase = Phase::Deciding(decision);
        self.schedule(Step::Evaluate(decision), now + self.settings.pacing.evaluate());
        true
    }

    /// Undo the wrong decision and let the observer act again on the same cards.
    pub fn retry(&mut self) -> bool {
        if !matches!(self.phase, Phase::Feedback(_)) {
            return false;
        }
        let (Some(deal), Some(snap)) = (self.deal.as_mut(), self.snapshot.take()) else {
            return false;
        };
        deal.restore(&snap);
        deal.set_current(Seat::OBSERVER);
        deal.set_cards_revealed(true);
        self.phase = Phase::ObserverTurn;
        log::debug!("retrying hand at {}", deal.observer_position());
        true
    }

    /// Throw away the current hand, including any steps still queued, and deal a new one.
    pub fn next(&mut self, now: Instant) -> bool {
        if self.phase == Phase::Abandoned {
            return false;
        }
        self.new_hand(now);
        true
    }

    /// Leave practice. Pending steps are cancelled and the drill stays inert.
    pub fn abandon(&mut self) {
        if !self.timeline.is_idle() {
            log::debug!("cancelling {} pending steps", self.timeline.len());
        }
        self.timeline.cancel();
        self.phase = Phase::Abandoned;
        log::info!(
            "practice ended: {} correct, {} incorrect",
            self.score.correct,
            self.score.incorrect
        );
    }

    fn new_hand(&mut self, now: Instant) {
        if !self.timeline.is_idle() {
            log::debug!("cancelling {} pending steps", self.timeline.len());
        }
        self.token = self.timeline.begin();
        let choice = select_dealer(&self.plan.trained_positions(), &mut self.rng);
        let deal = DealState::new(Seating::new(choice.dealer));
        log::info!(
            "new hand: dealer {}, observer {}",
            choice.dealer,
            deal.observer_position()
        );
        self.deal = Some(deal);
        self.snapshot = None;
        self.phase = Phase::Idle;
        self.schedule(Step::RevealDealer, now + self.settings.pacing.dealer());
    }

    fn schedule(&mut self, step: Step, at: Instant) {
        if !self.timeline.schedule(self.token, step, at) {
            log::warn!("dropped {step:?} scheduled under a stale token");
        }
    }

    fn run(&mut self, step: Step, now: Instant) {
        if step == Step::NextHand {
            self.new_hand(now);
            return;
        }
        let Some(deal) = self.deal.as_mut() else {
            return;
        };
        let pacing = self.settings.pacing;
        let next = match step {
            Step::RevealDealer => {
                deal.show_dealer();
                self.cues.push(Cue::DealerAssigned);
                self.phase = Phase::DealerAssigned;
                Some((Step::SmallBlind, pacing.blind()))
            }
            Step::SmallBlind => {
                deal.post_small_blind(self.settings.small_blind);
                self.cues.push(Cue::BetPlaced);
                Some((Step::BigBlind, pacing.blind()))
            }
            Step::BigBlind => {
                deal.post_big_blind(self.settings.big_blind);
                deal.deal_observer(&mut self.rng);
                self.cues.push(Cue::BetPlaced);
                self.phase = Phase::BlindsPosted;
                Some((Step::Turn(deal.seating().first_to_act()), pacing.turn()))
            }
            Step::Turn(seat) if seat.is_observer() => {
                deal.set_current(seat);
                deal.set_cards_revealed(true);
                self.cues.push(Cue::CardsRevealed);
                self.phase = Phase::ObserverTurn;
                None
            }
            Step::Turn(seat) => {
                deal.set_current(seat);
                deal.fold(seat);
                self.cues.push(Cue::Fold);
                self.phase = Phase::AutoFold(seat);
                Some((Step::Turn(seat.next()), pacing.turn()))
            }
            Step::Evaluate(decision) => {
                let position = deal.observer_position();
                let Some(hand) = deal.observer_label() else {
                    log::error!("evaluating a hand with no hole cards");
                    return;
                };
                if is_correct(&self.plan, position, hand, decision) {
                    self.score.correct += 1;
                    log::info!("{decision} with {hand} at {position}: correct");
                    self.phase = Phase::Correct;
                    Some((Step::NextHand, pacing.next_hand()))
                } else {
                    self.score.incorrect += 1;
                    log::info!("{decision} with {hand} at {position}: incorrect");
                    let range = self.plan.range(position).into_owned();
                    self.phase = Phase::Feedback(Feedback { position, range, hand, decision });
                    None
                }
            }
            Step::NextHand => None,
        };
        if let Some((step, delay)) = next {
            self.schedule(step, now + delay);
        }
    }

    #[cfg(test)]
    fn force_hole(&mut self, hole: &str) {
        if let (Some(deal), Ok(cards)) = (self.deal.as_mut(), hole.parse::<crate::hand::HoleCards>()) {
            deal.set_hole(cards);
        }
    }
}
