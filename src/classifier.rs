use anyhow::{ensure, Result};

use crate::params::{DeviceLocation, ModeParameters};

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Pretrained logistic decision over per-window features; a window is
/// positive when the squashed score strictly exceeds the threshold.
pub struct LinearBoutClassifier<'a> {
    params: &'a ModeParameters,
    location: DeviceLocation,
}

impl<'a> LinearBoutClassifier<'a> {
    pub fn new(params: &'a ModeParameters, location: DeviceLocation) -> Result<Self> {
        ensure!(
            params.weights.len() == location.feature_count() + 1,
            "{} model expects {} weights (intercept included), got {}",
            location,
            location.feature_count() + 1,
            params.weights.len()
        );
        ensure!(
            params.threshold > 0.0 && params.threshold < 1.0,
            "decision threshold must lie in (0, 1), got {}",
            params.threshold
        );
        Ok(Self { params, location })
    }

    // one boolean per window; inputs truncate to the common window count
    pub fn predict(&self, dominant_freq: &[f64], peak_to_peak: &[f64]) -> Vec<bool> {
        let w = &self.params.weights;
        let n = dominant_freq.len().min(peak_to_peak.len());
        (0..n)
            .map(|i| {
                let f = dominant_freq[i];
                let p = peak_to_peak[i];
                let z = match self.location {
                    DeviceLocation::Torso => w[0] + w[1] * f + w[2] * p,
                    DeviceLocation::Wrist => w[0] + w[1] * f + w[2] * f * f + w[3] * p,
                };
                sigmoid(z) > self.params.threshold
            })
            .collect()
    }
}
