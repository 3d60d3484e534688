use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

pub type CrateId = u32;

/// Accepts integral JSON numbers, including floats such as `10.0`.
pub fn deserialize_u32_from_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let n = serde_json::Number::deserialize(deserializer)?;
    if let Some(v) = n.as_u64() {
        return u32::try_from(v)
            .map_err(|_| serde::de::Error::custom(format!("{} is out of range", v)));
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= 0.0 && f <= u32::MAX as f64 => Ok(f as u32),
        _ => Err(serde::de::Error::custom(format!(
            "expected a non-negative whole number, got {}",
            n
        ))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dims {
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub width: u32,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub height: u32,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub length: u32,
}

impl Dims {
    pub fn new(width: u32, height: u32, length: u32) -> Self {
        Self {
            width,
            height,
            length,
        }
    }

    pub fn volume(&self) -> u64 {
        self.width as u64 * self.height as u64 * self.length as u64
    }

    pub fn fits_in(&self, other: &Dims) -> bool {
        self.width <= other.width && self.height <= other.height && self.length <= other.length
    }

    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0 && self.length > 0
    }
}

impl std::fmt::Display for Dims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.length)
    }
}

/// A box to be loaded. Never mutated by the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crate {
    pub id: CrateId,
    #[serde(flatten)]
    pub dims: Dims,
}

impl Crate {
    pub fn new(id: CrateId, width: u32, height: u32, length: u32) -> Self {
        Self {
            id,
            dims: Dims::new(width, height, length),
        }
    }
}

/// Cargo volume of a truck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Truck {
    #[serde(flatten)]
    pub dims: Dims,
}

impl Truck {
    pub fn new(width: u32, height: u32, length: u32) -> Self {
        Self {
            dims: Dims::new(width, height, length),
        }
    }

    pub fn volume(&self) -> u64 {
        self.dims.volume()
    }
}

/// One candidate rotation of a crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orientation {
    pub crate_id: CrateId,
    pub dims: Dims,
}

impl Orientation {
    /// `(turn_horizontal, turn_vertical)` relative to the crate's original dims.
    pub fn turns(&self, original: &Dims) -> (bool, bool) {
        (
            self.dims.width != original.width,
            self.dims.height != original.height,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Position {
    pub fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadingInstruction {
    /// 1-based position in the loading sequence.
    pub step: usize,
    pub crate_id: CrateId,
    pub x: u32,
    pub y: u32,
    pub z: u32,
    pub turn_horizontal: bool,
    pub turn_vertical: bool,
    /// Dimensions of the crate as it sits in the truck.
    pub placed: Dims,
}

impl LoadingInstruction {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y, self.z)
    }
}

/// Crate id to instruction. Either holds every crate or nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadingPlan {
    pub instructions: BTreeMap<CrateId, LoadingInstruction>,
}

impl LoadingPlan {
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn get(&self, id: CrateId) -> Option<&LoadingInstruction> {
        self.instructions.get(&id)
    }

    pub fn in_step_order(&self) -> Vec<LoadingInstruction> {
        let mut steps: Vec<LoadingInstruction> = self.instructions.values().copied().collect();
        steps.sort_by_key(|i| i.step);
        steps
    }

    pub fn loaded_volume(&self) -> u64 {
        self.instructions.values().map(|i| i.placed.volume()).sum()
    }
}
