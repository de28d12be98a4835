//! Forge-step history, rule patterns, and work-value arithmetic.
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Identifies a forge step within a step catalog.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct StepId(pub u16);

/// Number of steps a work-piece remembers; rules never look further back.
pub const HISTORY_LEN: usize = 3;

/// The most recent steps applied to a work-piece.
///
/// Slot 0 is the oldest step still in the window; unfilled slots trail.
/// Once the window is full, pushing evicts the oldest step.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug, Serialize, Deserialize)]
pub struct StepHistory {
    slots: [Option<StepId>; HISTORY_LEN],
}

impl StepHistory {
    pub const EMPTY: StepHistory = StepHistory {
        slots: [None; HISTORY_LEN],
    };

    #[inline]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    pub fn push(&mut self, step: StepId) {
        for slot in self.slots.iter_mut() {
            if slot.is_none() {
                *slot = Some(step);
                return;
            }
        }
        self.slots.rotate_left(1);
        self.slots[HISTORY_LEN - 1] = Some(step);
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<StepId> {
        self.slots.get(i).copied().flatten()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots[0].is_none()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.slots = [None; HISTORY_LEN];
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Option<StepId>> + '_ {
        self.slots.iter().copied()
    }
}

/// One position of a rule pattern.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum RuleSlot {
    /// Wildcard: admits any step, including an empty history slot.
    Any,
    /// Admits exactly this step; never admits an empty slot.
    Is(StepId),
}

impl RuleSlot {
    #[inline]
    fn admits(self, step: Option<StepId>) -> bool {
        match self {
            RuleSlot::Any => true,
            RuleSlot::Is(want) => step == Some(want),
        }
    }
}

/// Positional pattern over a step history.
///
/// Patterns shorter than the window are padded with trailing wildcards, so
/// a rule can never outrun the history it is matched against.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Rule {
    slots: [RuleSlot; HISTORY_LEN],
}

impl Rule {
    /// Matches anything, even an empty history.
    pub const ANY: Rule = Rule {
        slots: [RuleSlot::Any; HISTORY_LEN],
    };

    #[inline]
    pub const fn new(slots: [RuleSlot; HISTORY_LEN]) -> Self {
        Rule { slots }
    }

    /// Builds a rule from a leading prefix; remaining positions are wildcards.
    pub fn from_prefix(prefix: &[RuleSlot]) -> Self {
        let mut slots = [RuleSlot::Any; HISTORY_LEN];
        for (dst, src) in slots.iter_mut().zip(prefix.iter()) {
            *dst = *src;
        }
        Rule { slots }
    }

    #[inline]
    pub fn slots(&self) -> &[RuleSlot; HISTORY_LEN] {
        &self.slots
    }

    /// True iff every position admits the corresponding history slot.
    pub fn matches(&self, steps: &StepHistory) -> bool {
        self.slots
            .iter()
            .zip(steps.iter())
            .all(|(slot, step)| slot.admits(step))
    }
}

/// Inclusive clamp bounds for the work value. Injected by the recipe data,
/// never hardcoded.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct WorkBounds {
    pub min: i32,
    pub max: i32,
}

impl WorkBounds {
    #[inline]
    pub const fn new(min: i32, max: i32) -> Self {
        WorkBounds { min, max }
    }

    #[inline]
    pub fn clamp(&self, v: i32) -> i32 {
        v.max(self.min).min(self.max)
    }

    #[inline]
    pub fn contains(&self, v: i32) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Applies one step's work delta, saturating at the configured bounds.
#[inline]
pub fn apply_step(work: i32, delta: i32, bounds: WorkBounds) -> i32 {
    bounds.clamp(work.saturating_add(delta))
}

/// Match results for the present rules, in slot order. Absent slots are
/// skipped entirely; they never block completion.
pub fn evaluate_all(rules: &[Option<Rule>], steps: &StepHistory) -> Vec<bool> {
    rules.iter().flatten().map(|r| r.matches(steps)).collect()
}

/// Logical AND over the present rules; vacuously true with none present.
pub fn all_satisfied(rules: &[Option<Rule>], steps: &StepHistory) -> bool {
    rules.iter().flatten().all(|r| r.matches(steps))
}

/// Forging completion from the evaluator's perspective. Exhaustion
/// ("failed") is a host mechanic and is not represented here.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ForgingState {
    InProgress,
    Ready,
}

/// `Ready` iff the work value sits on the target and every present rule
/// matches the current history.
pub fn assess(
    work: i32,
    target: i32,
    rules: &[Option<Rule>],
    steps: &StepHistory,
) -> ForgingState {
    if work == target && all_satisfied(rules, steps) {
        ForgingState::Ready
    } else {
        ForgingState::InProgress
    }
}
