//! Range charts per training context.
//!
//! A [`RangeStore`] is a value: every update consumes the store and returns the
//! updated one, so the caller decides when (and whether) to persist it.

use super::action::{ActionKind, ActionSet};
use super::context::{Position, TrainingContext, VillainKey};
use super::notation;
use crate::hand::{catalog, HandLabel, CATALOG_LEN, TOTAL_COMBOS};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

/// Action tags for every hand of the catalog. Untagged hands carry an empty set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSlot {
    tags: Vec<ActionSet>,
}

impl Default for RangeSlot {
    fn default() -> Self {
        Self::baseline()
    }
}

impl RangeSlot {
    /// All 169 hands, nothing tagged.
    pub fn baseline() -> Self {
        Self { tags: vec![ActionSet::EMPTY; CATALOG_LEN] }
    }

    /// Always `CATALOG_LEN`.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn tags(&self, label: HandLabel) -> ActionSet {
        self.tags.get(label.index()).copied().unwrap_or_default()
    }

    pub fn has(&self, label: HandLabel, action: ActionKind) -> bool {
        self.tags(label).contains(action)
    }

    /// Hands with their tags, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (HandLabel, ActionSet)> + '_ {
        catalog().zip(self.tags.iter().copied())
    }

    /// Hands tagged with `action`, in catalog order.
    pub fn tagged(&self, action: ActionKind) -> impl Iterator<Item = HandLabel> + '_ {
        self.iter().filter(move |(_, tags)| tags.contains(action)).map(|(h, _)| h)
    }

    /// Sum of combos over hands tagged with `action`.
    pub fn combos(&self, action: ActionKind) -> u32 {
        self.tagged(action).map(|h| h.combos()).sum()
    }

    /// Copy of this slot with `action` flipped on one hand.
    #[must_use]
    pub fn toggled(&self, label: HandLabel, action: ActionKind) -> Self {
        let mut next = self.clone();
        next.toggle(label, action);
        next
    }

    pub(crate) fn toggle(&mut self, label: HandLabel, action: ActionKind) {
        if let Some(tags) = self.tags.get_mut(label.index()) {
            tags.toggle(action);
        }
    }
}

/// Every range chart the user has edited, keyed by training context.
///
/// ```
/// use range_trainer::range::{ActionKind, Position, RangeStore, TrainingContext};
///
/// let ctx = TrainingContext::rfi(Position::Btn);
/// let store = RangeStore::default().apply_notation(ctx, ActionKind::Rfi, "AA");
/// assert_eq!(store.percentage_label(ctx, ActionKind::Rfi), "0.45");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeStore {
    slots: BTreeMap<TrainingContext, RangeSlot>,
}

impl RangeStore {
    /// Stored slot for a context, or a baseline slot when none was stored.
    pub fn slot(&self, ctx: TrainingContext) -> Cow<'_, RangeSlot> {
        match self.slots.get(&ctx) {
            Some(slot) => Cow::Borrowed(slot),
            None => Cow::Owned(RangeSlot::baseline()),
        }
    }

    pub fn contexts(&self) -> impl Iterator<Item = TrainingContext> + '_ {
        self.slots.keys().copied()
    }

    #[must_use]
    pub fn toggle(mut self, ctx: TrainingContext, label: HandLabel, action: ActionKind) -> Self {
        self.slots.entry(ctx).or_default().toggle(label, action);
        self
    }

    #[must_use]
    pub fn clear(mut self, ctx: TrainingContext) -> Self {
        self.slots.insert(ctx, RangeSlot::baseline());
        self
    }

    #[must_use]
    pub fn set_slot(mut self, ctx: TrainingContext, slot: RangeSlot) -> Self {
        self.slots.insert(ctx, slot);
        self
    }

    /// Parse `text` and make it the exact membership of `action` in the context's slot.
    #[must_use]
    pub fn apply_notation(self, ctx: TrainingContext, action: ActionKind, text: &str) -> Self {
        let hands = notation::parse(text);
        let next = notation::apply(&self.slot(ctx), action, &hands);
        self.set_slot(ctx, next)
    }

    /// Hands tagged with `action` in a context.
    pub fn range(&self, ctx: TrainingContext, action: ActionKind) -> BTreeSet<HandLabel> {
        self.slot(ctx).tagged(action).collect()
    }

    pub fn format(&self, ctx: TrainingContext, action: ActionKind) -> String {
        notation::format(&self.slot(ctx), action)
    }

    /// Share of all 1326 combos tagged with `action`, in percent, rounded to 2 decimals.
    pub fn percentage(&self, ctx: TrainingContext, action: ActionKind) -> f64 {
        let combos = f64::from(self.slot(ctx).combos(action));
        let pct = combos / f64::from(TOTAL_COMBOS) * 100.0;
        (pct * 100.0).round() / 100.0
    }

    pub fn percentage_label(&self, ctx: TrainingContext, action: ActionKind) -> String {
        format!("{:.2}", self.percentage(ctx, action))
    }

    /// Snapshot of the villain-agnostic ranges for `action`, per hero position.
    pub fn training_plan(&self, action: ActionKind) -> TrainingPlan {
        let ranges = Position::ALL.into_iter().map(|hero| {
            let ctx = TrainingContext::new(action, hero, None);
            (hero, self.range(ctx, action))
        });
        TrainingPlan::from_ranges(action, ranges)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_stored())
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let stored: StoredRanges = serde_json::from_str(text)?;
        Ok(Self::from_stored(stored))
    }

    fn to_stored(&self) -> StoredRanges {
        let mut out = StoredRanges::new();
        for (ctx, slot) in &self.slots {
            let hands: BTreeMap<String, Vec<String>> = slot
                .iter()
                .map(|(label, tags)| {
                    (label.to_string(), tags.iter().map(|a| a.label().to_string()).collect::<Vec<_>>())
                })
                .collect();
            out.entry(ctx.action.label().to_string())
                .or_default()
                .entry(ctx.villain.to_string())
                .or_default()
                .insert(ctx.hero.label().to_string(), hands);
        }
        out
    }

    /// Keys that do not name an action, villain, hero or hand are skipped, not fatal.
    fn from_stored(stored: StoredRanges) -> Self {
        let mut slots = BTreeMap::new();
        for (action_key, by_villain) in stored {
            let Some(action) = ActionKind::from_label(&action_key) else {
                log::debug!("ignoring stored action {action_key:?}");
                continue;
            };
            for (villain_key, by_hero) in by_villain {
                let Ok(villain) = VillainKey::try_from(villain_key.clone()) else {
                    log::debug!("ignoring stored villain {villain_key:?}");
                    continue;
                };
                for (hero_key, hands) in by_hero {
                    let Ok(hero) = hero_key.parse::<Position>() else {
                        log::debug!("ignoring stored hero {hero_key:?}");
                        continue;
                    };
                    slots.insert(TrainingContext { action, hero, villain }, slot_from_stored(hands));
                }
            }
        }
        Self { slots }
    }
}

fn slot_from_stored(hands: BTreeMap<String, Vec<String>>) -> RangeSlot {
    let mut slot = RangeSlot::baseline();
    for (text, names) in hands {
        let Ok(label) = text.parse::<HandLabel>() else {
            log::debug!("ignoring stored hand {text:?}");
            continue;
        };
        for name in names {
            match ActionKind::from_label(&name) {
                Some(act) if !slot.has(label, act) => slot.toggle(label, act),
                Some(_) => {}
                None => log::debug!("ignoring stored action {name:?}"),
            }
        }
    }
    slot
}

/// Nested storage shape: action -> villain key -> hero -> hand -> tags.
type StoredRanges =
    BTreeMap<String, BTreeMap<String, BTreeMap<String, BTreeMap<String, Vec<String>>>>>;

/// Ranges being practised: one non-empty range per trained hero position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingPlan {
    action: ActionKind,
    ranges: BTreeMap<Position, BTreeSet<HandLabel>>,
}

impl Default for TrainingPlan {
    fn default() -> Self {
        Self { action: ActionKind::Rfi, ranges: BTreeMap::new() }
    }
}

impl TrainingPlan {
    /// Empty ranges are left out.
    pub fn from_ranges<I>(action: ActionKind, ranges: I) -> Self
    where
        I: IntoIterator<Item = (Position, BTreeSet<HandLabel>)>,
    {
        let ranges = ranges.into_iter().filter(|(_, r)| !r.is_empty()).collect();
        Self { action, ranges }
    }

    pub fn action(&self) -> ActionKind {
        self.action
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn trained_positions(&self) -> BTreeSet<Position> {
        self.ranges.keys().copied().collect()
    }

    /// The trained range at a position; empty when that position was never trained.
    pub fn range(&self, position: Position) -> Cow<'_, BTreeSet<HandLabel>> {
        match self.ranges.get(&position) {
            Some(r) => Cow::Borrowed(r),
            None => Cow::Owned(BTreeSet::new()),
        }
    }

    pub fn contains(&self, position: Position, label: HandLabel) -> bool {
        self.ranges.get(&position).is_some_and(|r| r.contains(&label))
    }
}
