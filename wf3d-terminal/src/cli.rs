/// Command line arguments for the terminal renderer
use clap::Parser;
use std::path::PathBuf;

use crate::logging::DEFAULT_LOG_FILE;

#[derive(Debug, Parser)]
#[command(name = "wf3d-terminal", version, about = "Spinning cubes and prisms in the terminal")]
pub struct Args {
    /// Scene file to render instead of the built-in showcase
    #[arg(short, long)]
    pub scene: Option<PathBuf>,

    /// Target frame rate; defaults to the scene's rate, or 30
    #[arg(long)]
    pub fps: Option<f64>,

    /// Cubes per row and column in the showcase grid
    #[arg(long, default_value_t = 10)]
    pub grid: u32,

    /// Edge length of each showcase cube, in pixels
    #[arg(long, default_value_t = 50.0)]
    pub cube_size: f64,

    /// Log filter, e.g. "debug" or "wf3d_core=trace"
    #[arg(long)]
    pub log: Option<String>,

    /// Log file; the terminal itself is reserved for the frame
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
}
