use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tools::{load_tour, load_viewer_config, orbit, overlay, render_stop, stop_lines, write_png};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tour")]
#[command(about = "Drive the virtual tour engine without a browser")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Tour stops as JSON (`{"stops": [...]}`); the built-in tour otherwise
    #[arg(long, global = true)]
    stops: Option<PathBuf>,

    /// Viewer configuration as JSON; missing fields take defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the tour stops in order
    Stops,

    /// Export a stop's panorama as PNG and print its text overlay as JSON
    Render {
        /// One-based stop number
        #[arg(long, default_value_t = 1)]
        stop: usize,

        #[arg(long)]
        out: PathBuf,

        #[arg(long)]
        width: Option<u32>,

        #[arg(long)]
        height: Option<u32>,

        /// Seed for landmark placement
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Simulate the render loop and print one JSON line per frame
    Orbit {
        /// One-based stop number
        #[arg(long, default_value_t = 1)]
        stop: usize,

        #[arg(long, default_value_t = 60)]
        frames: usize,

        /// Drag distance in pixels applied before the first frame
        #[arg(long, num_args = 2, value_names = ["DX", "DY"], allow_negative_numbers = true)]
        drag: Option<Vec<f64>>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match real_main(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn real_main(cli: Cli) -> Result<(), String> {
    let tour = Arc::new(load_tour(cli.stops.as_deref())?);
    let mut config = load_viewer_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Stops => {
            for line in stop_lines(&tour) {
                println!("{line}");
            }
        }
        Commands::Render {
            stop,
            out,
            width,
            height,
            seed,
        } => {
            if let Some(width) = width {
                config.texture.width = width;
            }
            if let Some(height) = height {
                config.texture.height = height;
            }
            let texture = render_stop(tour, zero_based(stop)?, &config.texture, seed)?;
            write_png(&texture, &out)?;
            info!(out = %out.display(), "panorama written");
            let json = serde_json::to_string_pretty(&overlay(&texture))
                .map_err(|e| format!("json: {e}"))?;
            println!("{json}");
        }
        Commands::Orbit {
            stop,
            frames,
            drag,
        } => {
            let drag = drag.map(|d| (d[0], d[1]));
            for sample in orbit(tour, zero_based(stop)?, config, frames, drag)? {
                let line = serde_json::to_string(&sample).map_err(|e| format!("json: {e}"))?;
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn zero_based(stop: usize) -> Result<usize, String> {
    stop.checked_sub(1)
        .ok_or_else(|| "stops are numbered from 1".to_string())
}
