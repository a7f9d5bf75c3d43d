use anyhow::{bail, Result};
use log::{debug, warn};

use crate::filter;
use crate::resample::resample;
use crate::spectral::cwt::Cwt;
use crate::util::repeat_each;

pub const VOICES_PER_OCTAVE: usize = 48;
pub const MAX_OCTAVES: usize = 4;

// A center frequency needs at least this many full cycles in the signal to be
// resolvable by the transform.
const MIN_CYCLES: f64 = 2.0;

// usable octave range below Nyquist, shrinking with signal length, never
// below 1
pub fn octave_count(n_samples: usize, fs: f64) -> usize {
    let duration_s = n_samples as f64 / fs;
    let mut octaves = MAX_OCTAVES;
    while octaves > 1 {
        let lowest_hz = fs / 2.0 / 2f64.powi(octaves as i32);
        if duration_s * lowest_hz >= MIN_CYCLES {
            break;
        }
        octaves -= 1;
    }
    octaves
}

/// Wavelet-ridge dominant frequency, one estimate per fixed-size window.
/// Windows without any local maximum report 0.0, never NaN, so the value
/// stays usable as a classifier feature.
pub struct DominantFrequency {
    pub fs_in: f64,
    pub fs_out: f64,
    pub lowpass_hz: Option<f64>,
    pub window_s: f64,
    cwt: Cwt,
}

pub struct DominantFrequencyOutput {
    pub per_window: Vec<f64>,
    /// Each window's value repeated across its native-rate samples.
    pub per_sample: Vec<f64>,
}

impl DominantFrequency {
    pub fn new(fs_in: f64, fs_out: f64, lowpass_hz: Option<f64>, window_s: f64) -> Self {
        Self {
            fs_in,
            fs_out,
            lowpass_hz,
            window_s,
            cwt: Cwt::new(VOICES_PER_OCTAVE),
        }
    }

    pub fn estimate(&self, signal: &[f64]) -> Result<DominantFrequencyOutput> {
        let mut x = signal.to_vec();
        if let Some(cutoff) = self.lowpass_hz {
            filter::lowpass_zero_phase(&mut x, self.fs_in, cutoff)?;
        }
        let x = resample(&x, self.fs_in, self.fs_out);

        let win_out = (self.window_s * self.fs_out.round()) as usize;
        let n_windows = x.len() / win_out;
        if n_windows == 0 {
            bail!(
                "signal too short for frequency estimation: {} samples at {} Hz, window {} s",
                x.len(),
                self.fs_out,
                self.window_s
            );
        }

        let octaves = octave_count(x.len(), self.fs_out);
        if octaves == 1 {
            warn!("wavelet range reduced to one octave; frequency precision is degraded");
        }
        debug!(
            "frequency estimation: {} windows, {} octaves at {} Hz",
            n_windows, octaves, self.fs_out
        );

        let transform = self.cwt.power(&x, self.fs_out, octaves);
        let mut per_window = Vec::with_capacity(n_windows);
        for w in 0..n_windows {
            let span = w * win_out..(w + 1) * win_out;
            let summed: Vec<f64> = transform
                .power
                .iter()
                .map(|row| row[span.clone()].iter().sum())
                .collect();
            per_window.push(strongest_local_max(&summed, &transform.freqs_hz));
        }

        let win_in = (self.window_s * self.fs_in.round()) as usize;
        let per_sample = repeat_each(&per_window, win_in);
        Ok(DominantFrequencyOutput {
            per_window,
            per_sample,
        })
    }
}

// 0.0 when no interior strict local maximum exists (flat spectrum)
fn strongest_local_max(amps: &[f64], freqs_hz: &[f64]) -> f64 {
    let mut best_hz = 0.0;
    let mut best_amp = f64::NEG_INFINITY;
    for i in 1..amps.len().saturating_sub(1) {
        if amps[i] > amps[i - 1] && amps[i] > amps[i + 1] && amps[i] > best_amp {
            best_amp = amps[i];
            best_hz = freqs_hz[i];
        }
    }
    best_hz
}
