//! Pure contagion-spread logic.
//!
//! A grid of cells, each absent, healthy or infected, where infection
//! spreads to orthogonal neighbours one time step per wave. Everything here
//! takes plain data and returns results; console output and argument
//! handling live in the `contagion-sim` binary.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`cell`] | Positions and per-cell infection time ("earliest wins") |
//! | [`grid`] | Multi-source wave propagation, step observers, census |
//! | [`generation`] | Seeded random grids from absent/healthy/infected bands |
//! | [`layout`] | Build grids from `O`/`A`/`I` text layouts |
//! | [`render`] | Bordered text snapshots of a grid |
//!
//! # Example
//!
//! ```
//! use contagion_logic::layout::parse_layout;
//!
//! let mut grid = parse_layout("AAA/AIA/AAA").unwrap();
//! assert_eq!(grid.run(), 2);
//! ```

pub mod cell;
pub mod generation;
pub mod grid;
pub mod layout;
pub mod render;

pub use cell::{Cell, Position};
pub use grid::{Census, Grid, NoopObserver, StepObserver};
