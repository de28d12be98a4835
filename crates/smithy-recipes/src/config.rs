use serde::Deserialize;
use std::collections::HashMap;

// Top-level steps config file: the step set plus the work-value bounds.
#[derive(Deserialize, Debug)]
pub struct StepsConfig {
    #[serde(default)]
    pub forging: ForgingConfig,
    pub steps: HashMap<String, StepEntry>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ForgingConfig {
    #[serde(default = "default_work_min")]
    pub work_min: i32,
    #[serde(default = "default_work_max")]
    pub work_max: i32,
}

impl Default for ForgingConfig {
    fn default() -> Self {
        ForgingConfig {
            work_min: default_work_min(),
            work_max: default_work_max(),
        }
    }
}

// A step is either a bare work delta or a detailed table. Button
// coordinates are opaque display data for the host renderer.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum StepEntry {
    // Simple: hit_light = -3
    Delta(i32),
    // Detailed: hit_light = { delta = -3, button = [0, 0] }
    Detail {
        delta: i32,
        #[serde(default)]
        button: Option<[u16; 2]>,
    },
}

// Top-level recipes config file
#[derive(Deserialize, Debug)]
pub struct RecipesConfig {
    pub recipes: Vec<RecipeDef>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RecipeDef {
    pub name: String,
    pub input: String,
    pub output: String,
    pub target: i32,
    #[serde(default)]
    pub tier: Option<u8>,
    #[serde(default)]
    pub rules: Vec<RuleDef>,
}

// A rule slot is a positional pattern of step keys ("any" is a wildcard),
// optionally with an icon, or the literal string "none" for an absent slot.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum RuleDef {
    // Simple: ["hit_light", "any", "draw"]
    Pattern(Vec<String>),
    // Detailed: { pattern = ["draw"], icon = [32, 0] }
    Detail {
        pattern: Vec<String>,
        #[serde(default)]
        icon: Option<[u16; 2]>,
    },
    // Absent slot: "none"
    Keyword(String),
}

fn default_work_min() -> i32 {
    0
}
fn default_work_max() -> i32 {
    145
}
