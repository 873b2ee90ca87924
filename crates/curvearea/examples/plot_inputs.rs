//! Print the intermediate artifacts a plotter would consume for the star.
//!
//! Usage:
//!   cargo run -p curvearea --example plot_inputs
//!
//! Prints the vertex list, the partially covered grid cells, and a dart tally.

use curvearea::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

fn main() {
    let star = shapes::star(5, 4.0, 2.0).unwrap();
    let mut rng = StdRng::seed_from_u64(2025);

    println!("vertices:");
    for v in star.vertices() {
        println!("  ({:.4}, {:.4})", v.x, v.y);
    }

    let grid = grid_area_detailed(&star, GridParams::new(20, 16), &mut rng).unwrap();
    let partial: Vec<_> = grid
        .cells
        .iter()
        .filter(|c| c.coverage > 0.0 && c.coverage < 1.0)
        .collect();
    println!(
        "grid 20x20: area {:.6}, {} partial cells of {}",
        grid.estimate.area,
        partial.len(),
        grid.cells.len()
    );

    let darts =
        monte_carlo_area_detailed(&star, MonteCarloParams::new(3000), &mut rng).unwrap();
    println!(
        "darts: {} inside, {} outside, area {:.6} (exact {:.6})",
        darts.inside().count(),
        darts.outside().count(),
        darts.estimate.area,
        exact_area(&star)
    );
}
