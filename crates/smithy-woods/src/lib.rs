//! Wood species registry and per-species block variant naming.
#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct WoodId(pub u16);

/// The fixed set of blocks every wood species contributes. Planks
/// variants carry the species inside the name; the rest group by variant.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum BlockVariant {
    Log,
    StrippedLog,
    Wood,
    StrippedWood,
    Leaves,
    Planks,
    Sapling,
    Bookshelf,
    Door,
    Trapdoor,
    Fence,
    LogFence,
    FenceGate,
    Button,
    PressurePlate,
    Slab,
    Stairs,
    ToolRack,
}

impl BlockVariant {
    pub const VALUES: [BlockVariant; 18] = [
        BlockVariant::Log,
        BlockVariant::StrippedLog,
        BlockVariant::Wood,
        BlockVariant::StrippedWood,
        BlockVariant::Leaves,
        BlockVariant::Planks,
        BlockVariant::Sapling,
        BlockVariant::Bookshelf,
        BlockVariant::Door,
        BlockVariant::Trapdoor,
        BlockVariant::Fence,
        BlockVariant::LogFence,
        BlockVariant::FenceGate,
        BlockVariant::Button,
        BlockVariant::PressurePlate,
        BlockVariant::Slab,
        BlockVariant::Stairs,
        BlockVariant::ToolRack,
    ];

    /// Index lookup with a Log fallback for out-of-range values.
    pub fn from_index(i: usize) -> BlockVariant {
        Self::VALUES.get(i).copied().unwrap_or(BlockVariant::Log)
    }

    pub fn key(self) -> &'static str {
        match self {
            BlockVariant::Log => "log",
            BlockVariant::StrippedLog => "stripped_log",
            BlockVariant::Wood => "wood",
            BlockVariant::StrippedWood => "stripped_wood",
            BlockVariant::Leaves => "leaves",
            BlockVariant::Planks => "planks",
            BlockVariant::Sapling => "sapling",
            BlockVariant::Bookshelf => "bookshelf",
            BlockVariant::Door => "door",
            BlockVariant::Trapdoor => "trapdoor",
            BlockVariant::Fence => "fence",
            BlockVariant::LogFence => "log_fence",
            BlockVariant::FenceGate => "fence_gate",
            BlockVariant::Button => "button",
            BlockVariant::PressurePlate => "pressure_plate",
            BlockVariant::Slab => "slab",
            BlockVariant::Stairs => "stairs",
            BlockVariant::ToolRack => "tool_rack",
        }
    }

    /// Planks-derived blocks live under `wood/planks/` with the species
    /// folded into the final segment.
    pub fn is_planks_variant(self) -> bool {
        !matches!(
            self,
            BlockVariant::Log
                | BlockVariant::StrippedLog
                | BlockVariant::Wood
                | BlockVariant::StrippedWood
                | BlockVariant::Leaves
                | BlockVariant::Planks
                | BlockVariant::Sapling
        )
    }
}

/// How a species' trees are placed by worldgen. Carried as data for the
/// host's feature system; never interpreted here.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeFeature {
    /// Pick one of `variants` pre-built structures.
    Random { variants: u32 },
    /// Random placement with a wide double canopy.
    DoubleRandom { variants: u32 },
    /// A base structure with a leaf overlay.
    Overlay { base: String, overlay: String },
}

#[derive(Clone, Debug)]
pub struct WoodType {
    pub id: WoodId,
    pub name: String,
    pub conifer: bool,
    pub fall_foliage: Option<[u16; 2]>,
    pub tree: TreeFeature,
    pub old_growth: Option<TreeFeature>,
}

impl WoodType {
    /// Species-qualified block name, e.g. `wood/log/oak` or
    /// `wood/planks/oak_door`.
    pub fn variant_name(&self, variant: BlockVariant) -> String {
        if variant.is_planks_variant() {
            format!("wood/planks/{}_{}", self.name, variant.key())
        } else {
            format!("wood/{}/{}", variant.key(), self.name)
        }
    }

    /// Every block name this species contributes.
    pub fn block_names(&self) -> Vec<String> {
        BlockVariant::VALUES
            .iter()
            .map(|v| self.variant_name(*v))
            .collect()
    }
}

#[derive(Default, Clone, Debug)]
pub struct WoodRegistry {
    pub woods: Vec<WoodType>,
    pub by_name: HashMap<String, WoodId>,
}

impl WoodRegistry {
    pub fn new() -> Self {
        Self {
            woods: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    #[inline]
    pub fn get(&self, id: WoodId) -> Option<&WoodType> {
        self.woods.get(id.0 as usize)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&WoodType> {
        self.by_name.get(name).and_then(|id| self.get(*id))
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: WoodsConfig = toml::from_str(toml_str)?;
        Self::from_config(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn from_config(cfg: WoodsConfig) -> Result<Self, Box<dyn Error>> {
        let mut reg = WoodRegistry::new();
        for def in cfg.woods.into_iter() {
            if reg.by_name.contains_key(&def.name) {
                log::warn!("duplicate wood species `{}`; keeping the first", def.name);
                continue;
            }
            let id = WoodId(reg.woods.len() as u16);
            reg.by_name.insert(def.name.clone(), id);
            reg.woods.push(WoodType {
                id,
                name: def.name,
                conifer: def.conifer,
                fall_foliage: def.fall_foliage,
                tree: def.tree,
                old_growth: def.old_growth,
            });
        }
        Ok(reg)
    }
}

// --- Config ---

#[derive(Deserialize, Debug)]
pub struct WoodsConfig {
    pub woods: Vec<WoodDef>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct WoodDef {
    pub name: String,
    #[serde(default)]
    pub conifer: bool,
    #[serde(default)]
    pub fall_foliage: Option<[u16; 2]>,
    pub tree: TreeFeature,
    #[serde(default)]
    pub old_growth: Option<TreeFeature>,
}
