use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use smithy_forging::{Rule, RuleSlot, WorkBounds};

use super::catalog::{ItemCatalog, StepCatalog};
use super::config::{RecipesConfig, RuleDef, StepsConfig};
use super::types::{ItemId, RecipeId};

/// Rule slots per recipe. Recipes may leave any of them absent.
pub const MAX_RULES: usize = 3;

/// A compiled rule slot: the match pattern plus its display icon.
#[derive(Copy, Clone, Debug)]
pub struct RuleEntry {
    pub rule: Rule,
    pub icon: Option<[u16; 2]>,
}

#[derive(Clone, Debug)]
pub struct AnvilRecipe {
    pub id: RecipeId,
    pub name: String,
    pub input: ItemId,
    pub output: ItemId,
    pub target: i32,
    pub tier: Option<u8>,
    pub rules: [Option<RuleEntry>; MAX_RULES],
}

impl AnvilRecipe {
    /// The match patterns alone, in slot order, for the evaluator.
    pub fn patterns(&self) -> [Option<Rule>; MAX_RULES] {
        let mut out = [None; MAX_RULES];
        for (dst, src) in out.iter_mut().zip(self.rules.iter()) {
            *dst = src.map(|e| e.rule);
        }
        out
    }
}

#[derive(Clone, Debug)]
pub struct RecipeRegistry {
    pub bounds: WorkBounds,
    pub steps: StepCatalog,
    pub items: ItemCatalog,
    pub recipes: Vec<AnvilRecipe>,
    pub by_name: HashMap<String, RecipeId>,
    pub by_input: HashMap<ItemId, RecipeId>,
}

impl Default for RecipeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeRegistry {
    pub fn new() -> Self {
        Self {
            bounds: WorkBounds::new(0, 145),
            steps: StepCatalog::new(),
            items: ItemCatalog::new(),
            recipes: Vec::new(),
            by_name: HashMap::new(),
            by_input: HashMap::new(),
        }
    }

    #[inline]
    pub fn get(&self, id: RecipeId) -> Option<&AnvilRecipe> {
        self.recipes.get(id.0 as usize)
    }

    pub fn id_by_name(&self, name: &str) -> Option<RecipeId> {
        self.by_name.get(name).copied()
    }

    /// Recipe for an input item, if any. One recipe per input; the first
    /// definition wins.
    pub fn recipe_for(&self, input: ItemId) -> Option<&AnvilRecipe> {
        self.by_input.get(&input).and_then(|id| self.get(*id))
    }

    pub fn load_from_paths(
        steps_path: impl AsRef<Path>,
        recipes_path: impl AsRef<Path>,
    ) -> Result<Self, Box<dyn Error>> {
        let steps_toml = fs::read_to_string(steps_path)?;
        let recipes_toml = fs::read_to_string(recipes_path)?;
        Self::from_toml_strs(&steps_toml, &recipes_toml)
    }

    pub fn from_toml_strs(steps_toml: &str, recipes_toml: &str) -> Result<Self, Box<dyn Error>> {
        let steps_cfg: StepsConfig = toml::from_str(steps_toml)?;
        let recipes_cfg: RecipesConfig = toml::from_str(recipes_toml)?;
        Self::from_configs(&steps_cfg, recipes_cfg)
    }

    pub fn from_configs(
        steps_cfg: &StepsConfig,
        cfg: RecipesConfig,
    ) -> Result<Self, Box<dyn Error>> {
        let bounds = WorkBounds::new(steps_cfg.forging.work_min, steps_cfg.forging.work_max);
        if bounds.min > bounds.max {
            return Err(format!(
                "work bounds are inverted: min {} > max {}",
                bounds.min, bounds.max
            )
            .into());
        }
        let steps = StepCatalog::from_config(steps_cfg)?;
        let mut reg = RecipeRegistry {
            bounds,
            steps,
            items: ItemCatalog::new(),
            recipes: Vec::new(),
            by_name: HashMap::new(),
            by_input: HashMap::new(),
        };
        for def in cfg.recipes.into_iter() {
            let id = RecipeId(reg.recipes.len() as u16);
            if !reg.bounds.contains(def.target) {
                return Err(format!(
                    "recipe `{}`: target {} outside work bounds {}..={}",
                    def.name, def.target, reg.bounds.min, reg.bounds.max
                )
                .into());
            }
            if def.rules.len() > MAX_RULES {
                return Err(format!(
                    "recipe `{}`: {} rule slots (max {})",
                    def.name,
                    def.rules.len(),
                    MAX_RULES
                )
                .into());
            }
            let mut rules: [Option<RuleEntry>; MAX_RULES] = [None; MAX_RULES];
            for (i, rule_def) in def.rules.iter().enumerate() {
                rules[i] = compile_rule(&def.name, rule_def, &reg.steps)?;
            }
            let input = reg.items.intern(&def.input);
            let output = reg.items.intern(&def.output);
            let recipe = AnvilRecipe {
                id,
                name: def.name,
                input,
                output,
                target: def.target,
                tier: def.tier,
                rules,
            };
            if let Some(prev) = reg.by_name.get(&recipe.name) {
                log::warn!(
                    "duplicate recipe name `{}` (keeping #{})",
                    recipe.name,
                    prev.0
                );
            } else {
                reg.by_name.insert(recipe.name.clone(), id);
            }
            if let Some(prev) = reg.by_input.get(&input) {
                log::warn!(
                    "recipe `{}`: input `{}` already handled by #{}; keeping the first",
                    recipe.name,
                    reg.items.key(input).unwrap_or("?"),
                    prev.0
                );
            } else {
                reg.by_input.insert(input, id);
            }
            reg.recipes.push(recipe);
        }
        Ok(reg)
    }
}

fn compile_rule(
    recipe: &str,
    def: &RuleDef,
    steps: &StepCatalog,
) -> Result<Option<RuleEntry>, Box<dyn Error>> {
    let (pattern, icon) = match def {
        RuleDef::Keyword(word) if word == "none" => return Ok(None),
        RuleDef::Keyword(word) => {
            return Err(format!(
                "recipe `{}`: unknown rule keyword `{}` (expected `none` or a pattern)",
                recipe, word
            )
            .into());
        }
        RuleDef::Pattern(pattern) => (pattern, None),
        RuleDef::Detail { pattern, icon } => (pattern, *icon),
    };
    if pattern.is_empty() || pattern.len() > smithy_forging::HISTORY_LEN {
        return Err(format!(
            "recipe `{}`: rule pattern must have 1..={} entries, got {}",
            recipe,
            smithy_forging::HISTORY_LEN,
            pattern.len()
        )
        .into());
    }
    let mut slots = Vec::with_capacity(pattern.len());
    for key in pattern {
        if key == "any" {
            slots.push(RuleSlot::Any);
        } else {
            match steps.get_id(key) {
                Some(id) => slots.push(RuleSlot::Is(id)),
                None => {
                    return Err(
                        format!("recipe `{}`: unknown step `{}` in rule", recipe, key).into(),
                    );
                }
            }
        }
    }
    Ok(Some(RuleEntry {
        rule: Rule::from_prefix(&slots),
        icon,
    }))
}
