use serde::{Deserialize, Serialize};

use smithy_forging::{
    ForgingState, StepHistory, StepId, WorkBounds, apply_step, assess, evaluate_all,
};

use super::catalog::StepCatalog;
use super::registry::AnvilRecipe;

/// Caller-owned forging state for one item on the anvil: the step window,
/// the work value, and the recipe's target. The host block-entity embeds
/// and persists this; nothing here touches engine state.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct WorkPiece {
    steps: StepHistory,
    work: i32,
    target: i32,
}

impl WorkPiece {
    pub fn new(target: i32) -> Self {
        Self {
            steps: StepHistory::EMPTY,
            work: 0,
            target,
        }
    }

    #[inline]
    pub fn steps(&self) -> &StepHistory {
        &self.steps
    }

    #[inline]
    pub fn work(&self) -> i32 {
        self.work
    }

    #[inline]
    pub fn target(&self) -> i32 {
        self.target
    }

    /// Records one step and drives the work value by its delta. Returns the
    /// new work value, or `None` for a step the catalog does not know
    /// (state is left untouched).
    pub fn apply(
        &mut self,
        catalog: &StepCatalog,
        bounds: WorkBounds,
        step: StepId,
    ) -> Option<i32> {
        let delta = catalog.delta(step)?;
        self.steps.push(step);
        self.work = apply_step(self.work, delta, bounds);
        Some(self.work)
    }

    /// Per-rule match feedback for the recipe's present rule slots.
    pub fn rule_matches(&self, recipe: &AnvilRecipe) -> Vec<bool> {
        evaluate_all(&recipe.patterns(), &self.steps)
    }

    pub fn state(&self, recipe: &AnvilRecipe) -> ForgingState {
        assess(self.work, self.target, &recipe.patterns(), &self.steps)
    }
}
