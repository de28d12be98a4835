//! Lamp fuel catalog and burn-down arithmetic.
#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct FuelId(pub u16);

#[derive(Clone, Debug)]
pub struct Fuel {
    pub id: FuelId,
    pub key: String,
    /// Ticks to burn one mB. Always positive.
    pub burn_rate: u64,
}

/// Lamp fuels for a pack: fluid key -> burn rate.
#[derive(Default, Clone, Debug)]
pub struct FuelCatalog {
    pub fuels: Vec<Fuel>,
    pub by_key: HashMap<String, FuelId>,
}

impl FuelCatalog {
    pub fn new() -> Self {
        Self {
            fuels: Vec::new(),
            by_key: HashMap::new(),
        }
    }

    pub fn get_id(&self, key: &str) -> Option<FuelId> {
        self.by_key.get(key).copied()
    }

    pub fn get(&self, id: FuelId) -> Option<&Fuel> {
        self.fuels.get(id.0 as usize)
    }

    pub fn burn_rate(&self, id: FuelId) -> Option<u64> {
        self.get(id).map(|f| f.burn_rate)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: FuelsConfig = toml::from_str(toml_str)?;
        let mut catalog = FuelCatalog::new();
        let mut entries: Vec<(String, FuelEntry)> = cfg.fuels.into_iter().collect();
        // HashMap iteration order is nondeterministic; sort keys so FuelId
        // assignment is stable across loads.
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (key, entry) in entries {
            let burn_rate = match entry {
                FuelEntry::Rate(r) => r,
                FuelEntry::Detail { burn_rate } => burn_rate,
            };
            if burn_rate == 0 {
                return Err(format!("fuel `{}`: burn_rate must be positive", key).into());
            }
            let id = FuelId(catalog.fuels.len() as u16);
            catalog.by_key.insert(key.clone(), id);
            catalog.fuels.push(Fuel { id, key, burn_rate });
        }
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

/// Engine-injected lamp settings. The tank size lives in server config,
/// not in code.
#[derive(Copy, Clone, Debug)]
pub struct LampConfig {
    pub capacity_mb: u32,
}

impl LampConfig {
    pub const fn new(capacity_mb: u32) -> Self {
        LampConfig { capacity_mb }
    }
}

/// One lamp's persistent state: tank contents, lit flag, and the tick the
/// burn counter was last settled at. All arithmetic is integer-exact; the
/// host block-entity owns persistence and the world clock.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Lamp {
    fuel: Option<(FuelId, u32)>,
    lit: bool,
    counter_start: u64,
}

impl Lamp {
    pub fn new() -> Self {
        Lamp::default()
    }

    #[inline]
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    #[inline]
    pub fn fuel(&self) -> Option<(FuelId, u32)> {
        self.fuel
    }

    /// Pours fuel into the tank and returns the amount accepted. Lit lamps
    /// and mismatched fluids accept nothing; the tank clamps at the
    /// configured capacity.
    pub fn fill(&mut self, fuel: FuelId, mb: u32, config: LampConfig) -> u32 {
        if self.lit {
            return 0;
        }
        let current = match self.fuel {
            Some((have, amount)) => {
                if have != fuel {
                    return 0;
                }
                amount
            }
            None => 0,
        };
        let accepted = mb.min(config.capacity_mb.saturating_sub(current));
        if accepted > 0 {
            self.fuel = Some((fuel, current + accepted));
        }
        accepted
    }

    /// Lights the lamp if it holds fuel, resetting the burn counter.
    pub fn light(&mut self, now: u64) -> bool {
        if self.fuel.is_none() {
            return false;
        }
        self.lit = true;
        self.counter_start = now;
        true
    }

    /// Settles consumption, then extinguishes. A player can quench a lamp
    /// that still has fuel; the remaining fuel stays in the tank.
    pub fn quench(&mut self, catalog: &FuelCatalog, now: u64) {
        self.check_run_out(catalog, now);
        self.lit = false;
        self.counter_start = now;
    }

    /// Fuel remaining at `now` without settling state. Unlit lamps never
    /// consume.
    pub fn fuel_after(&self, catalog: &FuelCatalog, now: u64) -> u32 {
        let Some((fuel, amount)) = self.fuel else {
            return 0;
        };
        if !self.lit {
            return amount;
        }
        let Some(rate) = catalog.burn_rate(fuel) else {
            return amount;
        };
        let elapsed = now.saturating_sub(self.counter_start);
        let consumed = elapsed / rate;
        amount.saturating_sub(consumed.min(u64::from(u32::MAX)) as u32)
    }

    /// Settles consumption since the counter was last advanced and reports
    /// whether the lamp has burned dry (extinguishing it if so). The
    /// counter only advances by whole-mB spans, so partial burn carries
    /// across calls.
    pub fn check_run_out(&mut self, catalog: &FuelCatalog, now: u64) -> bool {
        if !self.lit {
            return false;
        }
        let Some((fuel, amount)) = self.fuel else {
            self.lit = false;
            return true;
        };
        let Some(rate) = catalog.burn_rate(fuel) else {
            log::warn!("lamp holds fuel {:?} unknown to the catalog", fuel);
            return false;
        };
        let elapsed = now.saturating_sub(self.counter_start);
        let consumed = elapsed / rate;
        if consumed >= u64::from(amount) {
            self.fuel = None;
            self.lit = false;
            self.counter_start = now;
            return true;
        }
        self.fuel = Some((fuel, amount - consumed as u32));
        self.counter_start += consumed * rate;
        false
    }
}

// --- Config ---

#[derive(Deserialize)]
pub struct FuelsConfig {
    pub fuels: HashMap<String, FuelEntry>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum FuelEntry {
    // Simple: olive_oil = 8000
    Rate(u64),
    // Detailed: olive_oil = { burn_rate = 8000 }
    Detail { burn_rate: u64 },
}
