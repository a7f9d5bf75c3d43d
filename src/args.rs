use clap::Parser;

use crate::params::DeviceLocation;

#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Running-bout detection from resultant accelerometer recordings.")]
pub struct Cli {
    /// Recording to classify, one resultant acceleration sample (g) per line
    pub input: String,

    /// Where the device was worn: torso or wrist
    #[arg(short, long, default_value = "torso")]
    pub location: DeviceLocation,

    /// Minimum bout duration in seconds
    #[arg(short, long, default_value_t = 5)]
    pub continuity: usize,

    /// Sampling rate in Hz
    #[arg(short = 'r', long, default_value_t = 100.0)]
    pub sample_rate: f64,

    /// Classifier parameter file; defaults to the shipped coefficients
    #[arg(short, long)]
    pub params: Option<String>,
}
