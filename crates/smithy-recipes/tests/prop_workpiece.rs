use proptest::prelude::*;
use smithy_forging::ForgingState;
use smithy_recipes::{RecipeRegistry, WorkPiece};

const STEPS: &str = r#"
[forging]
work_min = 0
work_max = 145

[steps]
hit_light = -3
hit_medium = -6
hit_hard = -9
draw = -15
punch = 2
bend = 7
upset = 13
shrink = 16
"#;

const RECIPES: &str = r#"
[[recipes]]
name = "ingot_to_hook"
input = "metal/ingot"
output = "metal/hook"
target = 60
rules = [["any", "any", "hit_light"], ["bend"]]
"#;

fn load() -> RecipeRegistry {
    RecipeRegistry::from_toml_strs(STEPS, RECIPES).expect("registry")
}

proptest! {
    // Whatever the player mashes, the work value stays inside the pack's
    // bounds and the window never grows past three steps.
    #[test]
    fn work_never_escapes_bounds(idxs in prop::collection::vec(0usize..8, 0..40)) {
        let reg = load();
        let recipe = reg.recipes.first().expect("recipe").clone();
        let mut piece = WorkPiece::new(recipe.target);
        for i in idxs {
            let id = reg.steps.steps[i].id;
            piece.apply(&reg.steps, reg.bounds, id).expect("known step");
            prop_assert!(reg.bounds.contains(piece.work()));
            prop_assert!(piece.steps().len() <= smithy_forging::HISTORY_LEN);
        }
        // Ready is exactly "on target and every present rule matched".
        let ready = piece.state(&recipe) == ForgingState::Ready;
        let expect = piece.work() == recipe.target
            && piece.rule_matches(&recipe).iter().all(|&m| m);
        prop_assert_eq!(ready, expect);
    }
}
