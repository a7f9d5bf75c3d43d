use log::debug;

use crate::streak::streaks;
use crate::util::repeat_each;

/// Amplitude rule (per-window peak-to-peak strictly above the threshold)
/// followed by the continuity rule over streaks of passing windows. A window
/// containing any missing (NaN) sample fails the amplitude rule.
pub struct EnergeticActivityGate {
    pub window_s: f64,
    pub threshold_g: f64,
    pub continuity_s: usize,
    pub fs: f64,
}

impl EnergeticActivityGate {
    pub fn new(window_s: f64, threshold_g: f64, continuity_s: usize, fs: f64) -> Self {
        Self {
            window_s,
            threshold_g,
            continuity_s,
            fs,
        }
    }

    // fs is rounded to the nearest integer for windowing purposes only
    pub fn window_len(&self) -> usize {
        (self.window_s * self.fs.round()) as usize
    }

    fn window_passes(&self, window: &[f64]) -> bool {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &x in window {
            if x.is_nan() {
                return false;
            }
            lo = lo.min(x);
            hi = hi.max(x);
        }
        hi - lo > self.threshold_g
    }

    pub fn amplitude_rule(&self, signal: &[f64]) -> Vec<bool> {
        signal
            .chunks_exact(self.window_len())
            .map(|w| self.window_passes(w))
            .collect()
    }

    /// Callers guarantee the signal length is a multiple of the window length.
    pub fn mask(&self, signal: &[f64]) -> Vec<bool> {
        let win = self.window_len();
        debug_assert_eq!(signal.len() % win, 0);

        let passed = self.amplitude_rule(signal);
        if !passed.iter().any(|&p| p) {
            debug!("gate: no window exceeds {} g", self.threshold_g);
            return vec![false; signal.len()];
        }

        let expanded = repeat_each(&passed, win);
        let min_len = self.continuity_s * self.fs.round() as usize;
        let mut out = vec![false; signal.len()];
        for s in streaks(&expanded) {
            if s.value && s.len >= min_len {
                out[s.start..s.end].fill(true);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    fn window(high: bool, len: usize) -> Vec<f64> {
        if high {
            (0..len).map(|i| if i % 2 == 0 { 0.0 } else { 2.0 }).collect()
        } else {
            vec![0.0; len]
        }
    }

    fn build(pattern: &[bool], win: usize) -> Vec<f64> {
        pattern.iter().flat_map(|&h| window(h, win)).collect()
    }

    #[test]
    fn test_continuity_rule() {
        let gate = EnergeticActivityGate::new(1.0, 1.0, 2, 10.0);
        // two passing windows (20 samples, passes), one isolated (10, fails)
        let x = build(&[true, true, false, true, false], 10);
        let mask = gate.mask(&x);
        assert!(mask[..20].iter().all(|&b| b));
        assert!(mask[20..].iter().all(|&b| !b));
    }

    #[test]
    fn test_all_quiet_short_circuits() {
        let gate = EnergeticActivityGate::new(1.0, 1.0, 2, 10.0);
        let mask = gate.mask(&vec![0.5; 50]);
        assert!(mask.iter().all(|&b| !b));
    }

    #[test]
    fn test_threshold_is_strict() {
        let gate = EnergeticActivityGate::new(1.0, 1.0, 1, 4.0);
        // peak-to-peak exactly 1.0 must not pass
        let x = vec![0.0, 1.0, 0.0, 1.0];
        assert_eq!(gate.amplitude_rule(&x), vec![false]);
    }

    #[test]
    fn test_missing_samples_fail_their_window() {
        let gate = EnergeticActivityGate::new(1.0, 1.0, 1, 4.0);
        let mut x = vec![f64::NAN; 4];
        x.extend([0.0, f64::NAN, 3.0, 0.0]); // one NaN poisons the whole window
        x.extend([0.0, 2.0, 0.0, 2.0]);
        assert_eq!(gate.amplitude_rule(&x), vec![false, false, true]);
    }

    #[test]
    fn test_output_subset_of_amplitude_rule() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        let gate = EnergeticActivityGate::new(1.0, 1.0, 3, 5.0);
        for _ in 0..20 {
            let x: Vec<f64> = (0..100).map(|_| rng.gen_range(-2.0..2.0)).collect();
            let rule1 = repeat_each(&gate.amplitude_rule(&x), gate.window_len());
            let mask = gate.mask(&x);
            for (&m, &r) in mask.iter().zip(&rule1) {
                assert!(!m || r, "gate output must imply the amplitude rule");
            }
        }
    }
}
