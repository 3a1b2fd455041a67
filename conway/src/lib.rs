// lib.rs - Bounded Conway's Game of Life driven by placement scripts
//
// script text -> Interpreter -> PatternStore + transform -> Grid::place -> Simulation::step

pub mod codec;
pub mod config;
pub mod error;
pub mod grid;
pub mod logging;
pub mod matrix;
pub mod pregen;
pub mod script;
pub mod store;
pub mod transform;

pub use config::LifeConfig;
pub use error::{LifeError, Result};
pub use grid::{Anchor, Grid, Position, Simulation};
pub use matrix::CellMatrix;
pub use script::{Directive, Interpreter, interpret};
pub use store::{DirSource, PatternSource, PatternStore};
pub use transform::{Angle, Flip, Orientation, transform};
