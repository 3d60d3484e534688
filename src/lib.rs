pub mod error;
pub mod grid;
pub mod orientation;
pub mod recorder;
pub mod render;
pub mod request;
pub mod solver;
pub mod types;
