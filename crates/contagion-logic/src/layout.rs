//! Text layouts: build a grid from the same symbols the renderer prints.
//!
//! Rows are separated by newlines or `/`. Each non-whitespace character is
//! one cell: `O` (or `.`) absent, `A` healthy, `I` infected. Case is
//! ignored.

use std::fmt;

use crate::cell::{Cell, Position};
use crate::grid::{CellRows, Grid};

/// Errors produced while parsing a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    Empty,
    UnknownSymbol { row: usize, col: usize, symbol: char },
    Ragged { row: usize, expected: usize, found: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::Empty => write!(f, "layout has no rows"),
            LayoutError::UnknownSymbol { row, col, symbol } => write!(
                f,
                "unknown symbol '{}' at row {}, column {} (expected O, A or I)",
                symbol, row, col
            ),
            LayoutError::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} cells, expected {}",
                row, found, expected
            ),
        }
    }
}

impl std::error::Error for LayoutError {}

fn parse_symbol(symbol: char, pos: Position) -> Result<Option<Cell>, LayoutError> {
    match symbol.to_ascii_uppercase() {
        'O' | '.' => Ok(None),
        'A' => Ok(Some(Cell::healthy(pos))),
        'I' => Ok(Some(Cell::infected(pos))),
        _ => Err(LayoutError::UnknownSymbol {
            row: pos.row,
            col: pos.col,
            symbol,
        }),
    }
}

/// Parse a rectangular layout into its cells.
pub fn parse_cells(text: &str) -> Result<CellRows, LayoutError> {
    let lines: Vec<&str> = text
        .split(['\n', '/'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.is_empty() {
        return Err(LayoutError::Empty);
    }

    let mut rows: CellRows = Vec::with_capacity(lines.len());
    for (r, line) in lines.iter().enumerate() {
        let row = line
            .chars()
            .filter(|c| !c.is_whitespace())
            .enumerate()
            .map(|(c, symbol)| parse_symbol(symbol, Position::new(r, c)))
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(first) = rows.first() {
            if row.len() != first.len() {
                return Err(LayoutError::Ragged {
                    row: r,
                    expected: first.len(),
                    found: row.len(),
                });
            }
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Parse a layout into a fresh, unstepped grid.
pub fn parse_layout(text: &str) -> Result<Grid, LayoutError> {
    parse_cells(text).map(Grid::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slash_and_newline() {
        let a = parse_layout("AIO/OAA").unwrap();
        let b = parse_layout("AIO\nOAA\n").unwrap();
        assert_eq!(a.cells(), b.cells());
        assert_eq!(a.rows(), 2);
        assert_eq!(a.cols(), 3);
    }

    #[test]
    fn test_positions_assigned() {
        let g = parse_layout("AA/AI").unwrap();
        let cell = g.cell(Position::new(1, 1)).unwrap();
        assert_eq!(cell.position(), Position::new(1, 1));
        assert!(cell.is_infected());
        assert!(g.cell(Position::new(0, 0)).is_some());
    }

    #[test]
    fn test_absent_aliases_and_case() {
        let g = parse_layout("o.a/i A O").unwrap();
        let census = g.census();
        assert_eq!(census.absent, 3);
        assert_eq!(census.healthy, 2);
        assert_eq!(census.infected, 1);
    }

    #[test]
    fn test_empty_layout() {
        assert_eq!(parse_layout("").unwrap_err(), LayoutError::Empty);
        assert_eq!(parse_layout(" / \n").unwrap_err(), LayoutError::Empty);
    }

    #[test]
    fn test_unknown_symbol() {
        let err = parse_layout("AA/AX").unwrap_err();
        assert_eq!(
            err,
            LayoutError::UnknownSymbol {
                row: 1,
                col: 1,
                symbol: 'X'
            }
        );
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = parse_layout("AAA/AA").unwrap_err();
        assert_eq!(
            err,
            LayoutError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            }
        );
        assert_eq!(err.to_string(), "row 1 has 2 cells, expected 3");
    }
}
