//! HEXPOOL CLI - Command-line interface
//!
//! Commands:
//! - random: generate a random board and report its pools
//! - show: load a board snapshot and report its pools
//! - geometry: print range/ring/line figures for a radius

use anyhow::Context;
use clap::{Parser, Subcommand};
use hexpool_core::{geometry_for, Board, BoardSnapshot, Layout, Point, Topology};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hexpool")]
#[command(about = "HEXPOOL hex-grid board generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random board and report its pools
    Random {
        #[arg(long, default_value = "4")]
        radius: u32,
        /// Probability of a tile per cell
        #[arg(long, default_value = "0.6")]
        fill: f64,
        #[arg(long, default_value = "0")]
        seed: u64,
        /// Use the flat-top orientation
        #[arg(long)]
        flat: bool,
        /// Write the board to a JSON snapshot
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Load a snapshot and report its pools
    Show {
        input: PathBuf,
    },
    /// Print range/ring/line figures for a radius
    Geometry {
        #[arg(long, default_value = "3")]
        radius: u32,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Random {
            radius,
            fill,
            seed,
            flat,
            output,
        } => {
            let size = Point::new(16.0, 16.0);
            let origin = Point::new(0.0, 0.0);
            let layout = if flat {
                Layout::flat(size, origin)
            } else {
                Layout::pointy(size, origin)
            };
            let mut board = Board::new(Topology::Hexagon, layout, radius)?;
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let placed = board.randomize(&mut rng, fill)?;
            tracing::info!(placed, seed, "board randomized");
            report(&board);
            if let Some(path) = output {
                BoardSnapshot::capture(&board)
                    .save(&path)
                    .with_context(|| format!("writing snapshot to {}", path.display()))?;
                println!("snapshot written to {}", path.display());
            }
            Ok(())
        }
        Commands::Show { input } => {
            let snapshot = BoardSnapshot::load(&input)
                .with_context(|| format!("reading snapshot from {}", input.display()))?;
            let board = snapshot.restore()?;
            report(&board);
            Ok(())
        }
        Commands::Geometry { radius } => {
            let geometry = geometry_for(Topology::Hexagon)
                .context("hexagon geometry unavailable")?;
            let origin = geometry.origin();
            for r in 0..=radius {
                let range = geometry.cells_in_range(origin, r)?.len();
                let ring = geometry.ring(origin, r)?.len();
                println!("radius {:>2}: {:>4} cells in range, {:>3} on the ring", r, range, ring);
            }
            let far = geometry
                .ring(origin, radius)?
                .into_iter()
                .next()
                .unwrap_or(origin);
            let line = geometry.line(origin, far)?;
            println!("line to {:?}: {} cells", far, line.len());

            let layout = Layout::pointy(Point::new(16.0, 16.0), Point::new(0.0, 0.0));
            let pixel = geometry.to_pixel(&layout, far)?;
            let back = geometry.from_pixel(&layout, pixel);
            println!(
                "pixel round-trip for {:?}: ({:.1}, {:.1}) -> {:?}",
                far, pixel.x, pixel.y, back
            );
            Ok(())
        }
    }
}

/// Print a per-pool summary, largest pools first
fn report(board: &Board) {
    println!(
        "{} cells, {} tiles, {} pools",
        board.grid().cells().len(),
        board.tiles().len(),
        board.pools().len()
    );

    let mut pools: Vec<_> = board.pools().pools().collect();
    pools.sort_by_key(|p| (std::cmp::Reverse(p.len()), p.id));
    for pool in pools {
        println!(
            "  pool {:>3} {:?}: {} tiles, best neighbor count {}",
            pool.id,
            pool.kind,
            pool.len(),
            pool.highest_neighbor_count
        );
    }
}
