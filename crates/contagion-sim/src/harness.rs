//! Built-in scenario checks (`--selfcheck`).
//!
//! Runs entirely in-process against hand-written layouts and seeded grids,
//! printing one line per failed check (every check with `--verbose`).

use contagion_logic::generation::{generate_seeded, GenerationConfig};
use contagion_logic::layout::parse_layout;
use contagion_logic::render::render_grid;
use contagion_logic::Grid;

pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub detail: String,
}

/// Run a layout to completion and compare its saturation time.
fn check_layout(name: &str, layout: &str, expected: u32) -> CheckResult {
    match parse_layout(layout) {
        Ok(mut grid) => {
            let got = grid.run();
            CheckResult {
                name: name.into(),
                passed: got == expected,
                detail: format!("{} → {} (expected {})", layout, got, expected),
            }
        }
        Err(e) => CheckResult {
            name: name.into(),
            passed: false,
            detail: format!("layout error: {}", e),
        },
    }
}

fn scenario_checks() -> Vec<CheckResult> {
    println!("--- Scenarios ---");
    vec![
        check_layout("center_source_3x3", "AAA/AIA/AAA", 2),
        check_layout("isolated_source", "OOO/OIO/OOO", 0),
        check_layout("no_sources", "AAA/AAA/AAA", 0),
        check_layout("linear_row", "IAAAA", 4),
        check_layout("two_sources", "IAAAAAI", 3),
        check_layout("walled_off", "AOI/AOA/AOA", 2),
    ]
}

fn generated_checks() -> Vec<CheckResult> {
    println!("--- Generated grids ---");
    let mut results = Vec::new();
    let config = GenerationConfig {
        rows: 30,
        cols: 30,
        ..Default::default()
    };

    let runs: Vec<Option<(u32, usize, Grid)>> = (0..2)
        .map(|_| {
            generate_seeded(&config, 1234).ok().map(|mut grid| {
                let seconds = grid.run();
                (seconds, grid.steps(), grid)
            })
        })
        .collect();

    match (&runs[0], &runs[1]) {
        (Some((a, steps_a, grid_a)), Some((b, steps_b, grid_b))) => {
            results.push(CheckResult {
                name: "seeded_determinism".into(),
                passed: a == b && steps_a == steps_b && render_grid(grid_a) == render_grid(grid_b),
                detail: format!("seed 1234 → {} and {}", a, b),
            });
            let cells = config.rows * config.cols;
            results.push(CheckResult {
                name: "step_bound".into(),
                passed: *steps_a <= cells,
                detail: format!("{} steps for {} cells", steps_a, cells),
            });
        }
        _ => results.push(CheckResult {
            name: "seeded_generation".into(),
            passed: false,
            detail: "default config rejected".into(),
        }),
    }

    results
}

/// Run all checks. Returns `true` if every check passed.
pub fn run(verbose: bool) -> bool {
    println!("=== Contagion Self-Check ===\n");

    let mut results = Vec::new();
    results.extend(scenario_checks());
    results.extend(generated_checks());

    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed,
        results.len(),
        failed
    );
    failed == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_checks_pass() {
        assert!(run(true));
    }

    #[test]
    fn test_layout_check_reports_mismatch() {
        let result = check_layout("wrong", "IA", 5);
        assert!(!result.passed);
        assert!(result.detail.contains("expected 5"));
    }
}
