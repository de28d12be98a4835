use std::collections::HashMap;
use std::error::Error;

use smithy_forging::StepId;

use super::config::{StepEntry, StepsConfig};
use super::types::ItemId;

#[derive(Clone, Debug)]
pub struct StepDef {
    pub id: StepId,
    pub key: String,
    pub delta: i32,
    pub button: Option<[u16; 2]>,
}

/// The forge-step set for a pack. Ids are assigned at load and are only
/// meaningful against this catalog.
#[derive(Default, Clone, Debug)]
pub struct StepCatalog {
    pub steps: Vec<StepDef>,
    pub by_key: HashMap<String, StepId>,
}

impl StepCatalog {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            by_key: HashMap::new(),
        }
    }

    pub fn get_id(&self, key: &str) -> Option<StepId> {
        self.by_key.get(key).copied()
    }

    pub fn get(&self, id: StepId) -> Option<&StepDef> {
        self.steps.get(id.0 as usize)
    }

    pub fn delta(&self, id: StepId) -> Option<i32> {
        self.get(id).map(|s| s.delta)
    }

    pub fn from_config(cfg: &StepsConfig) -> Result<Self, Box<dyn Error>> {
        let mut catalog = StepCatalog::new();
        let mut entries: Vec<(&String, &StepEntry)> = cfg.steps.iter().collect();
        // HashMap iteration order is nondeterministic; sort keys so StepId
        // assignment is stable across loads.
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (key, entry) in entries {
            if key == "any" || key == "none" {
                return Err(format!("step key `{}` is reserved", key).into());
            }
            let (delta, button) = match entry {
                StepEntry::Delta(d) => (*d, None),
                StepEntry::Detail { delta, button } => (*delta, *button),
            };
            let id = StepId(catalog.steps.len() as u16);
            catalog.by_key.insert(key.clone(), id);
            catalog.steps.push(StepDef {
                id,
                key: key.clone(),
                delta,
                button,
            });
        }
        Ok(catalog)
    }
}

/// Interned item keys referenced by recipes. The host resolves these names
/// against its own item registry.
#[derive(Default, Clone, Debug)]
pub struct ItemCatalog {
    pub items: Vec<String>,
    pub by_key: HashMap<String, ItemId>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            by_key: HashMap::new(),
        }
    }

    pub fn get_id(&self, key: &str) -> Option<ItemId> {
        self.by_key.get(key).copied()
    }

    pub fn key(&self, id: ItemId) -> Option<&str> {
        self.items.get(id.0 as usize).map(|s| s.as_str())
    }

    pub fn intern(&mut self, key: &str) -> ItemId {
        if let Some(id) = self.get_id(key) {
            return id;
        }
        let id = ItemId(self.items.len() as u16);
        self.by_key.insert(key.to_string(), id);
        self.items.push(key.to_string());
        id
    }
}
