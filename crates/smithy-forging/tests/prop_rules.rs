use proptest::prelude::*;
use smithy_forging::{
    HISTORY_LEN, Rule, RuleSlot, StepHistory, StepId, WorkBounds, apply_step, evaluate_all,
};

fn arb_step() -> impl Strategy<Value = StepId> {
    (0u16..8).prop_map(StepId)
}

fn arb_history() -> impl Strategy<Value = StepHistory> {
    prop::collection::vec(arb_step(), 0..6).prop_map(|steps| {
        let mut h = StepHistory::new();
        for s in steps {
            h.push(s);
        }
        h
    })
}

fn arb_slot() -> impl Strategy<Value = RuleSlot> {
    prop_oneof![
        Just(RuleSlot::Any),
        arb_step().prop_map(RuleSlot::Is),
    ]
}

fn arb_rule() -> impl Strategy<Value = Rule> {
    prop::array::uniform3(arb_slot()).prop_map(Rule::new)
}

proptest! {
    // All-wildcard rules match every history, including the empty one.
    #[test]
    fn wildcards_match_everything(h in arb_history()) {
        prop_assert!(Rule::ANY.matches(&h));
    }

    // A concrete position never matches an empty history slot.
    #[test]
    fn concrete_never_matches_empty(i in 0usize..HISTORY_LEN, s in arb_step()) {
        let mut slots = [RuleSlot::Any; HISTORY_LEN];
        slots[i] = RuleSlot::Is(s);
        let rule = Rule::new(slots);
        prop_assert!(!rule.matches(&StepHistory::EMPTY));
    }

    // evaluate_all yields exactly one result per present rule slot.
    #[test]
    fn evaluate_all_length(
        h in arb_history(),
        rules in prop::collection::vec(prop::option::of(arb_rule()), 0..4),
    ) {
        let present = rules.iter().filter(|r| r.is_some()).count();
        prop_assert_eq!(evaluate_all(&rules, &h).len(), present);
    }

    // A rule spelled from the history's own slots always matches it.
    #[test]
    fn self_rule_matches(h in arb_history()) {
        let slots = [0, 1, 2].map(|i| match h.get(i) {
            Some(s) => RuleSlot::Is(s),
            None => RuleSlot::Any,
        });
        prop_assert!(Rule::new(slots).matches(&h));
    }

    // Sequential application composes, and the result never escapes bounds.
    #[test]
    fn apply_step_composes_within_bounds(
        start in 0i32..=145,
        deltas in prop::collection::vec(-20i32..=20, 1..10),
    ) {
        let bounds = WorkBounds::new(0, 145);
        let mut work = bounds.clamp(start);
        let mut stepped = work;
        for &d in &deltas {
            stepped = apply_step(stepped, d, bounds);
            prop_assert!(bounds.contains(stepped));
        }
        // Folding in one pass is the same as stepping one at a time.
        for &d in &deltas {
            work = apply_step(work, d, bounds);
        }
        prop_assert_eq!(work, stepped);
    }

    // The window always holds the most recent steps, oldest first.
    #[test]
    fn history_window_keeps_last_three(steps in prop::collection::vec(arb_step(), 0..10)) {
        let mut h = StepHistory::new();
        for &s in &steps {
            h.push(s);
        }
        let tail: Vec<StepId> = steps
            .iter()
            .copied()
            .skip(steps.len().saturating_sub(HISTORY_LEN))
            .collect();
        prop_assert_eq!(h.len(), tail.len());
        for (i, s) in tail.iter().enumerate() {
            prop_assert_eq!(h.get(i), Some(*s));
        }
    }
}
