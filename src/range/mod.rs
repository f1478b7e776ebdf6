//! Range charts: which starting hands are played for which action in which spot.
//!
//! - [`action`]: the actions a hand can be tagged with.
//! - [`context`]: table positions and the training context keying a chart.
//! - [`notation`]: the shorthand range grammar (`AA, AKs, A5s-A2s`).
//! - [`store`]: per-context charts, their pure update operations and statistics.

pub mod action;
pub mod context;
pub mod notation;
pub mod store;

pub use action::{ActionKind, ActionSet};
pub use context::{Position, TrainingContext, VillainKey};
pub use store::{RangeSlot, RangeStore, TrainingPlan};
