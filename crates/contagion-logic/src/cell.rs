//! Grid cells and their infection state.
//!
//! A `Cell` is a present grid position. Absent positions are never
//! allocated; the grid stores them as `None`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Row/column coordinate of a cell. Identity key for frontier membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Orthogonal neighbours in up, down, left, right order.
    ///
    /// Coordinates that would underflow are dropped; the upper bounds are
    /// left to the grid lookup.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        let Position { row, col } = self;
        [
            row.checked_sub(1).map(|r| Position::new(r, col)),
            row.checked_add(1).map(|r| Position::new(r, col)),
            col.checked_sub(1).map(|c| Position::new(row, c)),
            col.checked_add(1).map(|c| Position::new(row, c)),
        ]
        .into_iter()
        .flatten()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A present cell: healthy until `infected_at` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    position: Position,
    infected_at: Option<u32>,
}

impl Cell {
    /// Create a cell. Initially infected cells start at time 0.
    pub fn new(position: Position, infected: bool) -> Self {
        Self {
            position,
            infected_at: infected.then_some(0),
        }
    }

    pub fn healthy(position: Position) -> Self {
        Self::new(position, false)
    }

    pub fn infected(position: Position) -> Self {
        Self::new(position, true)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Time step at which the cell was infected, if ever.
    pub fn infected_at(&self) -> Option<u32> {
        self.infected_at
    }

    pub fn is_infected(&self) -> bool {
        self.infected_at.is_some()
    }

    /// Try to infect the cell at `at_time`.
    ///
    /// Accepted only if the cell is healthy or was infected strictly later
    /// than `at_time`. Returns whether the state changed.
    pub fn attempt_infect(&mut self, at_time: u32) -> bool {
        match self.infected_at {
            Some(current) if current <= at_time => false,
            _ => {
                self.infected_at = Some(at_time);
                true
            }
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_infected() {
            "Infected"
        } else {
            "Not infected"
        };
        write!(f, "{}, position={}", state, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_states() {
        let healthy = Cell::healthy(Position::new(1, 2));
        assert!(!healthy.is_infected());
        assert_eq!(healthy.infected_at(), None);

        let infected = Cell::infected(Position::new(0, 0));
        assert!(infected.is_infected());
        assert_eq!(infected.infected_at(), Some(0));
    }

    #[test]
    fn test_healthy_cell_accepts_any_time() {
        let mut cell = Cell::healthy(Position::new(0, 0));
        assert!(cell.attempt_infect(7));
        assert_eq!(cell.infected_at(), Some(7));
    }

    #[test]
    fn test_earlier_time_wins() {
        let mut cell = Cell::healthy(Position::new(0, 0));
        assert!(cell.attempt_infect(5));
        assert!(cell.attempt_infect(3));
        assert_eq!(cell.infected_at(), Some(3));
    }

    #[test]
    fn test_equal_or_later_time_rejected() {
        let mut cell = Cell::healthy(Position::new(0, 0));
        assert!(cell.attempt_infect(3));
        assert!(!cell.attempt_infect(3));
        assert!(!cell.attempt_infect(4));
        assert_eq!(cell.infected_at(), Some(3));
    }

    #[test]
    fn test_initial_source_never_reinfected() {
        let mut cell = Cell::infected(Position::new(2, 2));
        assert!(!cell.attempt_infect(0));
        assert!(!cell.attempt_infect(1));
        assert_eq!(cell.infected_at(), Some(0));
    }

    #[test]
    fn test_monotone_over_sequence() {
        let mut cell = Cell::healthy(Position::new(0, 0));
        let mut last: Option<u32> = None;
        for t in [9, 12, 4, 4, 6, 1, 2, 0, 3] {
            let changed = cell.attempt_infect(t);
            let now = cell.infected_at();
            if let Some(prev) = last {
                assert!(now.unwrap() <= prev);
            }
            assert_eq!(changed, now != last);
            last = now;
        }
        assert_eq!(cell.infected_at(), Some(0));
    }

    #[test]
    fn test_neighbors_order_and_edges() {
        let inner: Vec<_> = Position::new(1, 1).neighbors().collect();
        assert_eq!(
            inner,
            vec![
                Position::new(0, 1),
                Position::new(2, 1),
                Position::new(1, 0),
                Position::new(1, 2),
            ]
        );

        let corner: Vec<_> = Position::new(0, 0).neighbors().collect();
        assert_eq!(corner, vec![Position::new(1, 0), Position::new(0, 1)]);
    }

    #[test]
    fn test_display() {
        let mut cell = Cell::healthy(Position::new(3, 4));
        assert_eq!(cell.to_string(), "Not infected, position=(3, 4)");
        cell.attempt_infect(2);
        assert_eq!(cell.to_string(), "Infected, position=(3, 4)");
    }
}
