//! Input validation errors.

use thiserror::Error;

use crate::types::{CrateId, Dims};

pub type Result<T> = std::result::Result<T, Error>;

/// Rejected inputs. A failed search is not an error; see [`crate::solver::Outcome`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("truck dimensions must be non-zero, got {0}")]
    InvalidTruck(Dims),

    #[error("crate {id} dimensions must be non-zero, got {dims}")]
    InvalidCrate { id: CrateId, dims: Dims },

    #[error("crate id {0} appears more than once")]
    DuplicateCrateId(CrateId),

    #[error("truck {dims} needs {cells} grid cells, limit is {limit}")]
    GridTooLarge { dims: Dims, cells: u64, limit: u64 },
}
