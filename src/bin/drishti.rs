//! Sensor placement from a ROS map.
//!
//! Usage:
//!   drishti --map maps/office.yaml
//!   drishti --map maps/office.yaml --config configs/placement.yaml --seed 42
//!
//! Writes into the output directory:
//!   placement.yaml   final poses, coverage and per-iteration trace
//!   area_map.pgm     the (cropped) map the targets came from, with area_map.yaml
//!   placement.svg    rendering of map, targets and sensors
//!
//! Ctrl-C stops the optimizer between iterations and keeps the best
//! placement found so far.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use log::{error, info, warn};

use drishti::io::{SvgConfig, export_ros_map, load_ros_map};
use drishti::{CancelToken, PlacementConfig, PlacementPlanner};

/// Sensor placement optimizer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Map metadata file (ROS map_server YAML)
    #[arg(short, long)]
    map: PathBuf,

    /// Configuration file path (defaults to configs/placement.yaml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory (overrides output.directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// RNG seed (overrides pso.seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of sensors (overrides sensor.count)
    #[arg(long)]
    sensors: Option<usize>,

    /// Update particles in parallel
    #[arg(long)]
    parallel: bool,

    /// Skip the SVG rendering
    #[arg(long)]
    no_svg: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => PlacementConfig::load(path)?,
        None => PlacementConfig::load_default()?,
    };
    if let Some(seed) = args.seed {
        config.pso.seed = Some(seed);
    }
    if let Some(count) = args.sensors {
        config.sensor.count = count;
    }
    if args.parallel {
        config.pso.use_parallel = true;
    }
    if args.no_svg {
        config.output.svg = false;
    }
    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.directory));

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received interrupt, stopping after the current iteration");
        handler_token.cancel();
    }) {
        warn!("Could not install Ctrl-C handler: {}", e);
    }

    let map = load_ros_map(&args.map)?;
    let svg_config = SvgConfig::with_scale(config.output.svg_scale);
    let write_svg = config.output.svg;

    let mut planner = PlacementPlanner::new(config);
    planner.set_map(map);
    let run = planner.start_with_cancel(&cancel)?;

    std::fs::create_dir_all(&output_dir)?;
    let result_path = output_dir.join("placement.yaml");
    run.result.save(&result_path)?;
    export_ros_map(&run.map, &output_dir.join("area_map"))?;
    if write_svg {
        run.visualizer(svg_config).save(&output_dir.join("placement.svg"))?;
    }

    info!(
        "{}: coverage {:.2}% ({} / {} targets), multiple coverage index {:.3}, {} iterations",
        run.result.termination.name(),
        run.result.coverage * 100.0,
        run.result.covered_targets,
        run.result.target_count,
        run.result.multiple_coverage_index,
        run.result.iterations
    );
    for (i, pose) in run.result.poses.iter().enumerate() {
        info!(
            "  sensor {}: ({:.3}, {:.3}) yaw {:.1} deg",
            i + 1,
            pose.x,
            pose.y,
            pose.yaw.to_degrees()
        );
    }
    if run.result.anomalies > 0 {
        warn!("{} numerical anomalies were recovered", run.result.anomalies);
    }
    info!("Results written to {}", output_dir.display());
    Ok(())
}
