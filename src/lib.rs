//! Per-sample running-bout classification for resultant (vector-magnitude)
//! accelerometer recordings.

pub mod args;
pub mod classifier;
pub mod filter;
pub mod gate;
pub mod interp;
pub mod params;
pub mod pipeline;
pub mod resample;
pub mod spectral;
pub mod squash;
pub mod streak;
pub mod util;

pub use params::{ClassifierParameters, DeviceLocation, ModeParameters};
pub use pipeline::{classify, extract_features};
pub use streak::{find_bouts, Bouts, Streak};
