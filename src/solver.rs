use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::OccupancyGrid;
use crate::orientation::{distinct_orientations, orientations};
use crate::recorder::InstructionRecorder;
use crate::types::{Crate, Dims, LoadingPlan, Orientation, Position, Truck};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Largest truck volume, in unit cells, the grid will allocate.
pub const MAX_GRID_CELLS: u64 = 1 << 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Backtracks allowed before the whole search gives up.
    pub max_attempts: u32,
    /// Skip repeated orientations of crates with equal sides.
    pub distinct_orientations: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            distinct_orientations: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Every crate has a place.
    Placed,
    /// No candidate left for the first crate.
    Exhausted,
    /// The attempt ceiling was reached. Says nothing about feasibility.
    BudgetExhausted,
}

#[derive(Debug, Clone)]
pub struct SearchReport {
    /// Full plan on success, empty otherwise.
    pub plan: LoadingPlan,
    pub outcome: Outcome,
    pub attempts: u32,
}

impl SearchReport {
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Placed
    }
}

/// Anchor positions for one orientation: x outermost, z innermost.
#[derive(Debug, Clone)]
struct Positions {
    last: Position,
    next: Option<Position>,
}

impl Positions {
    fn empty() -> Self {
        Self {
            last: Position::default(),
            next: None,
        }
    }

    fn new(truck: &Dims, dims: &Dims) -> Self {
        if !dims.fits_in(truck) {
            return Self::empty();
        }
        Self {
            last: Position::new(
                truck.width - dims.width,
                truck.height - dims.height,
                truck.length - dims.length,
            ),
            next: Some(Position::default()),
        }
    }
}

impl Iterator for Positions {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        let cur = self.next?;
        self.next = if cur.z < self.last.z {
            Some(Position::new(cur.x, cur.y, cur.z + 1))
        } else if cur.y < self.last.y {
            Some(Position::new(cur.x, cur.y + 1, 0))
        } else if cur.x < self.last.x {
            Some(Position::new(cur.x + 1, 0, 0))
        } else {
            None
        };
        Some(cur)
    }
}

/// Search state for one crate on the current path.
struct Frame {
    crate_index: usize,
    orientations: Vec<Orientation>,
    orientation: usize,
    positions: Positions,
    placed: Option<(Orientation, Position)>,
}

impl Frame {
    fn new(crate_index: usize, orientations: Vec<Orientation>, truck: &Dims) -> Self {
        let positions = orientations
            .first()
            .map_or_else(Positions::empty, |o| Positions::new(truck, &o.dims));
        Self {
            crate_index,
            orientations,
            orientation: 0,
            positions,
            placed: None,
        }
    }

    /// Resumes the scan after the last candidate handed out.
    fn next_fit(&mut self, truck: &Dims, grid: &OccupancyGrid) -> Option<(Orientation, Position)> {
        loop {
            let orientation = *self.orientations.get(self.orientation)?;
            if let Some(at) = self.positions.find(|&at| grid.fits(&orientation.dims, at)) {
                return Some((orientation, at));
            }
            self.orientation += 1;
            if let Some(o) = self.orientations.get(self.orientation) {
                self.positions = Positions::new(truck, &o.dims);
            }
        }
    }
}

pub struct Solver {
    truck: Truck,
    crates: Vec<Crate>,
    config: SearchConfig,
}

impl Solver {
    /// Validates the inputs. Crates keep the caller's order.
    pub fn new(truck: Truck, crates: Vec<Crate>) -> Result<Self> {
        if !truck.dims.is_valid() {
            return Err(Error::InvalidTruck(truck.dims));
        }
        let cells = truck.volume();
        if cells > MAX_GRID_CELLS {
            return Err(Error::GridTooLarge {
                dims: truck.dims,
                cells,
                limit: MAX_GRID_CELLS,
            });
        }
        let mut seen = HashSet::with_capacity(crates.len());
        for c in &crates {
            if !c.dims.is_valid() {
                return Err(Error::InvalidCrate {
                    id: c.id,
                    dims: c.dims,
                });
            }
            if !seen.insert(c.id) {
                return Err(Error::DuplicateCrateId(c.id));
            }
        }
        Ok(Self {
            truck,
            crates,
            config: SearchConfig::default(),
        })
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Full plan, or an empty one when the search fails for any reason.
    pub fn loading_instructions(&self) -> LoadingPlan {
        self.solve().plan
    }

    pub fn solve(&self) -> SearchReport {
        tracing::debug!(
            truck = %self.truck.dims,
            crates = self.crates.len(),
            max_attempts = self.config.max_attempts,
            "starting loading search"
        );

        let (outcome, attempts, recorder) = self.search();
        let plan = match outcome {
            Outcome::Placed => recorder.into_plan(),
            Outcome::Exhausted | Outcome::BudgetExhausted => {
                tracing::warn!(
                    ?outcome,
                    attempts,
                    crates = self.crates.len(),
                    truck = %self.truck.dims,
                    "no loading plan found, the crates do not seem to fit in the truck"
                );
                LoadingPlan::default()
            }
        };

        tracing::debug!(?outcome, attempts, placed = plan.len(), "loading search finished");
        SearchReport {
            plan,
            outcome,
            attempts,
        }
    }

    fn candidates(&self, c: &Crate) -> Vec<Orientation> {
        if self.config.distinct_orientations {
            distinct_orientations(c)
        } else {
            orientations(c).to_vec()
        }
    }

    fn frame(&self, crate_index: usize) -> Frame {
        Frame::new(
            crate_index,
            self.candidates(&self.crates[crate_index]),
            &self.truck.dims,
        )
    }

    /// Depth-first placement in input order on an explicit stack.
    ///
    /// A frame whose candidates run out is popped and its parent undoes its own
    /// placement, counts one attempt and resumes scanning where it left off.
    fn search(&self) -> (Outcome, u32, InstructionRecorder) {
        let truck = self.truck.dims;
        let mut grid = OccupancyGrid::new(truck);
        let mut recorder = InstructionRecorder::new();
        let mut attempts: u32 = 0;

        if self.crates.is_empty() {
            return (Outcome::Placed, attempts, recorder);
        }

        let mut stack: Vec<Frame> = Vec::with_capacity(self.crates.len());
        stack.push(self.frame(0));

        while let Some(frame) = stack.last_mut() {
            match frame.next_fit(&truck, &grid) {
                Some((orientation, at)) => {
                    let c = &self.crates[frame.crate_index];
                    grid.occupy(&orientation.dims, at);
                    recorder.record(c, &orientation, at);
                    frame.placed = Some((orientation, at));

                    let next = frame.crate_index + 1;
                    if next == self.crates.len() {
                        return (Outcome::Placed, attempts, recorder);
                    }
                    stack.push(self.frame(next));
                }
                None => {
                    stack.pop();
                    let Some(parent) = stack.last_mut() else {
                        return (Outcome::Exhausted, attempts, recorder);
                    };
                    if let Some((orientation, at)) = parent.placed.take() {
                        grid.release(&orientation.dims, at);
                        recorder.remove(orientation.crate_id);
                    }
                    attempts += 1;
                    tracing::trace!(
                        crate_index = parent.crate_index,
                        attempts,
                        "backtracking"
                    );
                    if attempts >= self.config.max_attempts {
                        return (Outcome::BudgetExhausted, attempts, recorder);
                    }
                }
            }
        }

        (Outcome::Exhausted, attempts, recorder)
    }
}
