//! Subplot grid example.
//!
//! Builds a 2x3 grid of plots, shows it on the recording backend, and saves
//! the recorded figure as JSON.
//!
//! Run with:
//! ```
//! RUST_LOG=plot_lattice=debug cargo run -p plot-lattice --example subplot_grid
//! ```

use plot_lattice::prelude::*;
use plot_lattice::RecordingBackend;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("plot_lattice=info")),
        )
        .init();

    let backend = RecordingBackend::new();
    let presentations = backend.presentations();
    let mut fig = Figure::with_backend(backend);

    let xs: Vec<f64> = (0..20).map(|i| i as f64 * 0.25).collect();
    let sin: Vec<f64> = xs.iter().map(|x| x.sin()).collect();
    let cos: Vec<f64> = xs.iter().map(|x| x.cos()).collect();

    fig.at((0, 0))?
        .record(Command::new("plot").arg(xs.clone()).arg(sin).kwarg("color", "tab:blue"));
    fig.at((0, 1))?
        .record(Command::new("plot").arg(xs.clone()).arg(cos).kwarg("linestyle", "--"));
    fig.at((0, 2))?
        .record(Command::new("hist").arg(xs).kwarg("bins", 8));
    fig.at((1, 0))?
        .record(Command::new("bar").arg(vec!["a", "b", "c"]).arg(vec![3, 1, 2]));
    fig.at((1, 1))?
        .record(Command::new("scatter").arg(vec![1, 2, 3]).arg(vec![3, 1, 2]));
    fig.at((1, 2))?
        .record(Command::new("pie").arg(vec![30, 50, 20]));

    // Decorations for the whole grid and for the first row.
    fig.at((.., ..))?.record(Command::new("grid").arg(true));
    fig.at((0, ..))?.record(Command::new("set_xlabel").arg("t"));

    println!("{fig}: {} grid", fig.extent());

    fig.show()?;
    if let Some(shown) = presentations.last() {
        for region in &shown.regions {
            let ops: Vec<String> = region.calls.iter().map(ToString::to_string).collect();
            println!("({}, {}): {}", region.row, region.col, ops.join("; "));
        }
    }

    let path = std::env::temp_dir().join("subplot_grid.json");
    fig.save(&path)?;
    println!("saved {}", path.display());

    Ok(())
}
