//! Plain-text rendering of a grid snapshot.
//!
//! ```
//! use contagion_logic::layout::parse_layout;
//! use contagion_logic::render::render_grid;
//!
//! let grid = parse_layout("AIO").unwrap();
//! assert_eq!(render_grid(&grid), " _______\n|A|I|O|\n-------\n");
//! ```

use crate::cell::Cell;
use crate::grid::Grid;

pub const ABSENT: char = 'O';
pub const HEALTHY: char = 'A';
pub const INFECTED: char = 'I';

/// Display symbol for a grid slot.
pub fn symbol(slot: Option<&Cell>) -> char {
    match slot {
        None => ABSENT,
        Some(cell) if cell.is_infected() => INFECTED,
        Some(_) => HEALTHY,
    }
}

/// Render the grid with a border sized from its column count.
pub fn render_grid(grid: &Grid) -> String {
    let width = grid.cols() * 2 + 1;
    let mut out = String::with_capacity((width + 2) * (grid.rows() + 2));

    out.push(' ');
    out.push_str(&"_".repeat(width));
    out.push('\n');
    for row in grid.cells() {
        for slot in row {
            out.push('|');
            out.push(symbol(slot.as_ref()));
        }
        out.push_str("|\n");
    }
    out.push_str(&"-".repeat(width));
    out.push('\n');
    out
}

/// Render infection times instead of symbols; `.` for absent, `-` for
/// healthy. Times above 9 are shown modulo 10.
pub fn render_times(grid: &Grid) -> String {
    let mut out = String::new();
    for row in grid.cells() {
        for slot in row {
            let ch = match slot {
                None => '.',
                Some(cell) => match cell.infected_at() {
                    Some(t) => char::from_digit(t % 10, 10).unwrap_or('?'),
                    None => '-',
                },
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}
