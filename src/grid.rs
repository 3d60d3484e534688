use crate::types::{Dims, Position};

/// Voxel occupancy of the cargo volume, indexed by `(x, y, z)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    extent: Dims,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Empty grid. Callers bound the extent's volume before allocating.
    pub fn new(extent: Dims) -> Self {
        Self {
            extent,
            cells: vec![false; extent.volume() as usize],
        }
    }

    pub fn extent(&self) -> Dims {
        self.extent
    }

    fn index(&self, x: u32, y: u32, z: u32) -> usize {
        let h = self.extent.height as usize;
        let l = self.extent.length as usize;
        (x as usize * h + y as usize) * l + z as usize
    }

    pub fn is_occupied(&self, x: u32, y: u32, z: u32) -> bool {
        self.cells[self.index(x, y, z)]
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// In bounds and every covered cell free.
    pub fn fits(&self, dims: &Dims, at: Position) -> bool {
        let in_bounds = at.x as u64 + dims.width as u64 <= self.extent.width as u64
            && at.y as u64 + dims.height as u64 <= self.extent.height as u64
            && at.z as u64 + dims.length as u64 <= self.extent.length as u64;
        if !in_bounds {
            return false;
        }
        for x in at.x..at.x + dims.width {
            for y in at.y..at.y + dims.height {
                let row = self.index(x, y, at.z);
                if self.cells[row..row + dims.length as usize]
                    .iter()
                    .any(|&c| c)
                {
                    return false;
                }
            }
        }
        true
    }

    /// Marks the box occupied. `fits` must have just returned true for the same arguments.
    pub fn occupy(&mut self, dims: &Dims, at: Position) {
        self.fill(dims, at, true);
    }

    /// Exact inverse of [`occupy`](Self::occupy) with identical arguments.
    pub fn release(&mut self, dims: &Dims, at: Position) {
        self.fill(dims, at, false);
    }

    fn fill(&mut self, dims: &Dims, at: Position, value: bool) {
        for x in at.x..at.x + dims.width {
            for y in at.y..at.y + dims.height {
                let row = self.index(x, y, at.z);
                self.cells[row..row + dims.length as usize].fill(value);
            }
        }
    }
}
