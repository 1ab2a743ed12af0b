//! Prints the boundary of the ellipse spanned by a baseline A-B and a radius.
//!
//! ```bash
//! cargo run --bin ellipse -- --ax 1 --ay 1 --bx 4 --by 5 --radius 1
//! ```

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use shape_voronoi::math::Point2;
use shape_voronoi::operations::creation::{MakeEllipse, DEFAULT_QUAD_SEGS};
use shape_voronoi::output::write_ring;
use tracing::{error, info};

/// Ellipse boundary from a baseline and a minor radius.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// X coordinate of endpoint A.
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    ax: f64,

    /// Y coordinate of endpoint A.
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    ay: f64,

    /// X coordinate of endpoint B.
    #[arg(long, default_value_t = 4.0, allow_negative_numbers = true)]
    bx: f64,

    /// Y coordinate of endpoint B.
    #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
    by: f64,

    /// Half-length of the axis perpendicular to A-B.
    #[arg(long, default_value_t = 1.0)]
    radius: f64,

    /// Segments per quarter of the underlying circle.
    #[arg(long, default_value_t = DEFAULT_QUAD_SEGS)]
    quad_segs: usize,
}

fn main() -> ExitCode {
    // Default: WARN for everything, INFO for shape_voronoi.
    // Override with RUST_LOG env var (e.g. RUST_LOG=shape_voronoi=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("ellipse=info".parse().unwrap_or_default())
        .add_directive("shape_voronoi=info".parse().unwrap_or_default());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let a = Point2::new(cli.ax, cli.ay);
    let b = Point2::new(cli.bx, cli.by);

    let ring = match MakeEllipse::new(a, b, cli.radius)
        .with_quad_segs(cli.quad_segs)
        .execute()
    {
        Ok(ring) => ring,
        Err(err) => {
            error!(%err, "cannot build ellipse");
            return ExitCode::FAILURE;
        }
    };
    info!(vertices = ring.vertices().len(), "built ellipse");

    let mut stdout = io::stdout().lock();
    if let Err(err) = write_ring(&ring, &mut stdout).and_then(|()| stdout.flush()) {
        error!(%err, "cannot write ellipse");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
