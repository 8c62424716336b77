//! Wave propagation over a sparse grid of cells.
//!
//! Every step, each cell that changed in the previous step tries to infect
//! its four orthogonal neighbours one time unit later. The first step has
//! no previous frontier and scans every present cell, which is how the
//! initially infected seeds get their turn. The run ends once a full step
//! produces no new infection.
//!
//! Because a cell only accepts a strictly earlier infection time, the final
//! times equal the multi-source shortest-path distance to the nearest seed,
//! regardless of the order in which sources are visited within a step.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::cell::{Cell, Position};

/// Row-major cell storage. `None` marks an absent position.
pub type CellRows = Vec<Vec<Option<Cell>>>;

/// Hook invoked after every propagation step.
pub trait StepObserver {
    fn on_step(&mut self, step: usize, grid: &Grid);
}

/// Observer that ignores every step.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    fn on_step(&mut self, _step: usize, _grid: &Grid) {}
}

impl<F> StepObserver for F
where
    F: FnMut(usize, &Grid),
{
    fn on_step(&mut self, step: usize, grid: &Grid) {
        self(step, grid)
    }
}

/// Counts of cells by state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub absent: usize,
    pub healthy: usize,
    pub infected: usize,
}

impl Census {
    pub fn total(&self) -> usize {
        self.absent + self.healthy + self.infected
    }
}

/// The simulation grid. Owns all of its cells.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: CellRows,
    /// `None` until the first step has run.
    frontier: Option<BTreeSet<Position>>,
    max_infected_at: u32,
    steps: usize,
}

impl Grid {
    /// Wrap the given cells. Rows are not checked for equal length;
    /// lookups past the end of a short row are treated as absent.
    pub fn new(cells: CellRows) -> Self {
        Self {
            cells,
            frontier: None,
            max_infected_at: 0,
            steps: 0,
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Column count of the first row (0 for an empty grid).
    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn cells(&self) -> &[Vec<Option<Cell>>] {
        &self.cells
    }

    /// Cell at `pos`, or `None` if out of bounds or absent.
    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.cells.get(pos.row)?.get(pos.col)?.as_ref()
    }

    fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.cells.get_mut(pos.row)?.get_mut(pos.col)?.as_mut()
    }

    /// Latest infection time assigned so far.
    pub fn max_infected_at(&self) -> u32 {
        self.max_infected_at
    }

    /// Number of propagation steps executed.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// True once a step has produced no new infection.
    pub fn is_settled(&self) -> bool {
        self.frontier.as_ref().is_some_and(BTreeSet::is_empty)
    }

    /// Positions that changed in the most recent step.
    pub fn frontier(&self) -> Option<&BTreeSet<Position>> {
        self.frontier.as_ref()
    }

    fn present_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .flatten()
            .filter_map(|slot| slot.as_ref().map(Cell::position))
    }

    /// Infection time per position; absent and healthy cells map to `None`.
    pub fn infection_times(&self) -> Vec<Vec<Option<u32>>> {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|slot| slot.as_ref().and_then(Cell::infected_at))
                    .collect()
            })
            .collect()
    }

    pub fn census(&self) -> Census {
        let mut census = Census::default();
        for slot in self.cells.iter().flatten() {
            match slot {
                None => census.absent += 1,
                Some(cell) if cell.is_infected() => census.infected += 1,
                Some(_) => census.healthy += 1,
            }
        }
        census
    }

    /// Run until settled and return the saturation time.
    pub fn run(&mut self) -> u32 {
        self.run_with(&mut NoopObserver)
    }

    /// Run until settled, calling `observer` after every step.
    pub fn run_with<O>(&mut self, observer: &mut O) -> u32
    where
        O: StepObserver + ?Sized,
    {
        while !self.is_settled() {
            let changed = self.step();
            log::debug!(
                "step {}: {} newly infected, saturation {}",
                self.steps,
                changed,
                self.max_infected_at
            );
            observer.on_step(self.steps, self);
        }
        log::info!(
            "settled after {} steps, saturation time {}",
            self.steps,
            self.max_infected_at
        );
        self.max_infected_at
    }

    /// Execute one wave. Returns how many cells changed.
    pub fn step(&mut self) -> usize {
        let sources: Vec<Position> = match self.frontier.take() {
            None => self.present_positions().collect(),
            Some(frontier) => frontier.into_iter().collect(),
        };

        let mut next_frontier = BTreeSet::new();
        for source in sources {
            // Re-infected this step: spreads next step with its new time.
            if next_frontier.contains(&source) {
                continue;
            }
            let Some(at) = self.cell(source).and_then(Cell::infected_at) else {
                continue;
            };
            let spread_at = at.saturating_add(1);
            for neighbor in source.neighbors() {
                let Some(cell) = self.cell_mut(neighbor) else {
                    continue;
                };
                if cell.attempt_infect(spread_at) {
                    log::trace!("{} infected {} at {}", source, neighbor, spread_at);
                    next_frontier.insert(neighbor);
                    self.max_infected_at = self.max_infected_at.max(spread_at);
                }
            }
        }

        let changed = next_frontier.len();
        self.frontier = Some(next_frontier);
        self.steps += 1;
        changed
    }
}
