pub mod cwt;
pub mod ridge;

pub use cwt::{Cwt, CwtPower};
pub use ridge::{octave_count, DominantFrequency, DominantFrequencyOutput};
