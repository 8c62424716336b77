//! Random grid generation.
//!
//! Each cell independently rolls a number in `0..100` and the roll is split
//! into three bands: absent, healthy, initially infected. The defaults are
//! 10 % absent, 80 % healthy and 10 % infected on a 5×5 grid.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::cell::{Cell, Position};
use crate::grid::{CellRows, Grid};

/// Width of the roll range the bands are carved from.
pub const ROLL_RANGE: u8 = 100;

/// Grid dimensions and cell-state bands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub rows: usize,
    pub cols: usize,
    /// Percentage of positions left without a cell.
    pub absent_pct: u8,
    /// Percentage of cells infected at time 0.
    pub infected_pct: u8,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 5,
            absent_pct: 10,
            infected_pct: 10,
        }
    }
}

/// Errors raised by an invalid `GenerationConfig`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyGrid { rows: usize, cols: usize },
    BandsOverflow { absent_pct: u8, infected_pct: u8 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyGrid { rows, cols } => {
                write!(f, "grid must be at least 1x1, got {}x{}", rows, cols)
            }
            ConfigError::BandsOverflow {
                absent_pct,
                infected_pct,
            } => write!(
                f,
                "absent ({}%) and infected ({}%) bands exceed {}%",
                absent_pct, infected_pct, ROLL_RANGE
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl GenerationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if u16::from(self.absent_pct) + u16::from(self.infected_pct) > u16::from(ROLL_RANGE) {
            return Err(ConfigError::BandsOverflow {
                absent_pct: self.absent_pct,
                infected_pct: self.infected_pct,
            });
        }
        Ok(())
    }

    /// Percentage of cells that start healthy.
    pub fn healthy_pct(&self) -> u8 {
        ROLL_RANGE.saturating_sub(self.absent_pct.saturating_add(self.infected_pct))
    }
}

/// Initial state of a generated position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Absent,
    Healthy,
    Infected,
}

impl CellState {
    /// Map a roll in `0..ROLL_RANGE` onto the configured bands.
    pub fn from_roll(roll: u8, config: &GenerationConfig) -> Self {
        if roll < config.absent_pct {
            Self::Absent
        } else if roll >= ROLL_RANGE.saturating_sub(config.infected_pct) {
            Self::Infected
        } else {
            Self::Healthy
        }
    }

    pub fn into_cell(self, pos: Position) -> Option<Cell> {
        match self {
            Self::Absent => None,
            Self::Healthy => Some(Cell::healthy(pos)),
            Self::Infected => Some(Cell::infected(pos)),
        }
    }
}

/// Roll every position of a `rows × cols` grid.
pub fn generate_cells<R: Rng>(config: &GenerationConfig, rng: &mut R) -> CellRows {
    (0..config.rows)
        .map(|row| {
            (0..config.cols)
                .map(|col| {
                    let roll = rng.gen_range(0..ROLL_RANGE);
                    CellState::from_roll(roll, config).into_cell(Position::new(row, col))
                })
                .collect()
        })
        .collect()
}

/// Generate a grid deterministically from `seed`.
pub fn generate_seeded(config: &GenerationConfig, seed: u64) -> Result<Grid, ConfigError> {
    config.validate()?;
    let mut rng = StdRng::seed_from_u64(seed);
    let grid = Grid::new(generate_cells(config, &mut rng));
    log::debug!(
        "generated {}x{} grid from seed {}: {:?}",
        config.rows,
        config.cols,
        seed,
        grid.census()
    );
    Ok(grid)
}
