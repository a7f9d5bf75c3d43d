use anyhow::{bail, Result};
use log::{debug, info, warn};

use crate::classifier::LinearBoutClassifier;
use crate::filter;
use crate::gate::EnergeticActivityGate;
use crate::interp;
use crate::params::{ClassifierParameters, DeviceLocation};
use crate::spectral::DominantFrequency;
use crate::squash::SquashMap;
use crate::util::{mean, repeat_each, windowed_peak_to_peak};

pub const AMPLITUDE_THRESHOLD_G: f64 = 1.0;
pub const LOWPASS_HZ: f64 = 8.0;
pub const WAVELET_RATE_HZ: f64 = 16.0;
pub const WINDOW_SECONDS: f64 = 1.0;

/// Classify every sample of a resultant-acceleration recording as running or
/// not; `true` marks running bouts of at least `continuity_s` seconds.
pub fn classify(
    signal: &[f64],
    location: DeviceLocation,
    continuity_s: usize,
    fs: f64,
    params: &ClassifierParameters,
) -> Result<Vec<bool>> {
    if fs <= 0.0 {
        bail!("sampling rate must be positive, got {}", fs);
    }
    let win = fs.round() as usize;
    if win == 0 {
        bail!("sampling rate {} Hz rounds to an empty window", fs);
    }
    if continuity_s == 0 {
        bail!("continuity must be at least 1 second");
    }
    if continuity_s < 3 {
        warn!(
            "continuity of {} s is below the recommended minimum of 3 s",
            continuity_s
        );
    }
    if signal.len() < continuity_s * win {
        bail!(
            "{} samples at {} Hz cannot contain a {} s bout",
            signal.len(),
            fs,
            continuity_s
        );
    }
    if fs.fract() != 0.0 {
        warn!("non-integer sampling rate {} Hz; windows use {} samples", fs, win);
    }

    let mut x = if signal.iter().any(|v| v.is_nan()) {
        warn!("missing samples present; repairing with cubic spline interpolation");
        interp::spline_fill(signal)?
    } else {
        signal.to_vec()
    };
    if mean(&x) > 7.0 {
        warn!(
            "mean amplitude {:.1} g is implausibly high; check units and that the signal is resultant acceleration",
            mean(&x)
        );
    }

    let original_len = x.len();
    reflect_pad(&mut x, win);
    filter::lowpass_zero_phase(&mut x, fs, LOWPASS_HZ)?;

    let gate = EnergeticActivityGate::new(WINDOW_SECONDS, AMPLITUDE_THRESHOLD_G, continuity_s, fs);
    let m1 = gate.mask(&x);
    if !m1.iter().any(|&b| b) {
        debug!("no energetic activity; skipping frequency estimation");
        return Ok(vec![false; original_len]);
    }

    let map = SquashMap::from_mask(&m1);
    let squashed = map.squash(&x);
    info!(
        "gate pass 1: {} of {} samples survive",
        map.compact_len(),
        x.len()
    );

    let ptp = windowed_peak_to_peak(&squashed, win);
    let estimator = DominantFrequency::new(fs, WAVELET_RATE_HZ, None, WINDOW_SECONDS);
    let freq = estimator.estimate(&squashed)?;

    let classifier = LinearBoutClassifier::new(params.mode(location), location)?;
    let verdict = classifier.predict(&freq.per_window, &ptp);
    debug!(
        "classifier: {}/{} windows positive",
        verdict.iter().filter(|&&v| v).count(),
        verdict.len()
    );
    let m2 = map.scatter(&repeat_each(&verdict, win), false);

    // second continuity pass over the classifier's survivors
    let masked: Vec<f64> = x
        .iter()
        .zip(&m2)
        .map(|(&v, &keep)| if keep { v } else { f64::NAN })
        .collect();
    let m3 = gate.mask(&masked);

    let mut out: Vec<bool> = m1
        .iter()
        .zip(&m2)
        .zip(&m3)
        .map(|((&a, &b), &c)| a && b && c)
        .collect();
    out.truncate(original_len);
    Ok(out)
}

/// Per-window dominant frequency and peak-to-peak amplitude, the feature pair
/// the classifier consumes. `lowpass_hz: None` skips pre-filtering.
pub fn extract_features(
    signal: &[f64],
    fs_in: f64,
    fs_out: f64,
    lowpass_hz: Option<f64>,
    window_s: f64,
) -> Result<(Vec<f64>, Vec<f64>)> {
    let estimator = DominantFrequency::new(fs_in, fs_out, lowpass_hz, window_s);
    let mut dominant = estimator.estimate(signal)?.per_window;
    let win = (window_s * fs_in.round()) as usize;
    let mut ptp = windowed_peak_to_peak(signal, win);
    let n = dominant.len().min(ptp.len());
    dominant.truncate(n);
    ptp.truncate(n);
    Ok((dominant, ptp))
}

// extend to a whole number of windows by appending the tail samples reversed
fn reflect_pad(signal: &mut Vec<f64>, window: usize) {
    let rem = signal.len() % window;
    if rem == 0 {
        return;
    }
    let leftover = window - rem;
    let n = signal.len();
    for i in 0..leftover {
        signal.push(signal[n - 1 - i]);
    }
}
