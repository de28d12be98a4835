use std::error::Error;
use std::path::Path;

use hashbrown::HashSet;

use smithy_forging::{HISTORY_LEN, RuleSlot};
use smithy_lamps::FuelCatalog;
use smithy_recipes::RecipeRegistry;
use smithy_woods::WoodRegistry;

/// Everything a smithing pack defines, loaded and cross-checked.
pub struct ContentPack {
    pub recipes: RecipeRegistry,
    pub fuels: FuelCatalog,
    pub woods: WoodRegistry,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PackSummary {
    pub steps: usize,
    pub recipes: usize,
    pub items: usize,
    pub fuels: usize,
    pub woods: usize,
    pub wood_blocks: usize,
    pub chained_recipes: usize,
}

impl ContentPack {
    pub fn load(root: &Path) -> Result<Self, Box<dyn Error>> {
        let recipes = RecipeRegistry::load_from_paths(
            crate::assets::steps_path(root),
            crate::assets::recipes_path(root),
        )?;
        let fuels = FuelCatalog::from_path(crate::assets::fuels_path(root))?;
        let woods = WoodRegistry::from_path(crate::assets::woods_path(root))?;
        let pack = ContentPack {
            recipes,
            fuels,
            woods,
        };
        pack.lint();
        Ok(pack)
    }

    /// Checks that span files. These warn rather than fail: a pack that
    /// parses is usable, odd as it may be.
    fn lint(&self) {
        for recipe in &self.recipes.recipes {
            if recipe.input == recipe.output {
                log::warn!("recipe `{}` transforms an item into itself", recipe.name);
            }
            if recipe.rules.iter().all(|r| r.is_none()) {
                log::warn!(
                    "recipe `{}` has no rules; any step history completes it",
                    recipe.name
                );
            }
            // Two rules that pin different steps to the same window slot
            // can never both match, so the recipe cannot complete.
            let patterns = recipe.patterns();
            let present: Vec<_> = patterns.iter().flatten().collect();
            for (i, a) in present.iter().enumerate() {
                for b in present.iter().skip(i + 1) {
                    for k in 0..HISTORY_LEN {
                        if let (RuleSlot::Is(x), RuleSlot::Is(y)) = (a.slots()[k], b.slots()[k]) {
                            if x != y {
                                log::warn!(
                                    "recipe `{}`: rules disagree on window slot {}; it can never complete",
                                    recipe.name,
                                    k
                                );
                            }
                        }
                    }
                }
            }
        }
    }

    pub fn summary(&self) -> PackSummary {
        // An output feeding another recipe's input forms a chain
        // (ingot -> sheet -> blade); count them for the report.
        let inputs: HashSet<_> = self.recipes.recipes.iter().map(|r| r.input).collect();
        let chained = self
            .recipes
            .recipes
            .iter()
            .filter(|r| inputs.contains(&r.output))
            .count();
        PackSummary {
            steps: self.recipes.steps.steps.len(),
            recipes: self.recipes.recipes.len(),
            items: self.recipes.items.items.len(),
            fuels: self.fuels.fuels.len(),
            woods: self.woods.woods.len(),
            wood_blocks: self.woods.woods.len() * smithy_woods::BlockVariant::VALUES.len(),
            chained_recipes: chained,
        }
    }
}
