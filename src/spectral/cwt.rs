use rustfft::{num_complex::Complex, FftPlanner};
use std::sync::Mutex;

// Morlet center frequency in rad/sample at unit scale
const OMEGA0: f64 = 6.0;

/// Analytic Morlet CWT evaluated in the frequency domain: one forward FFT of
/// the signal, one inverse FFT per scale.
pub struct Cwt {
    voices: usize,
    planner: Mutex<FftPlanner<f64>>,
}

/// Squared-magnitude coefficients, `power[bin][time]`, `freqs_hz` ascending.
pub struct CwtPower {
    pub freqs_hz: Vec<f64>,
    pub power: Vec<Vec<f64>>,
}

impl Cwt {
    pub fn new(voices: usize) -> Self {
        Self {
            voices,
            planner: Mutex::new(FftPlanner::new()),
        }
    }

    pub fn power(&self, signal: &[f64], fs: f64, octaves: usize) -> CwtPower {
        let n = signal.len();
        let mut spectrum: Vec<Complex<f64>> =
            signal.iter().map(|&x| Complex::new(x, 0.0)).collect();

        let (forward, inverse) = {
            let mut planner = self.planner.lock().unwrap();
            (planner.plan_fft_forward(n), planner.plan_fft_inverse(n))
        };
        forward.process(&mut spectrum);

        let f_max = fs / 2.0;
        let bins = octaves * self.voices + 1;
        let norm = 1.0 / (n as f64 * n as f64);

        let mut freqs_hz = Vec::with_capacity(bins);
        let mut power = Vec::with_capacity(bins);
        for j in 0..bins {
            let f = f_max * 2f64.powf((j as f64 - (bins - 1) as f64) / self.voices as f64);
            // scale that centers the wavelet's passband on f
            let scale = OMEGA0 * fs / (2.0 * std::f64::consts::PI * f);
            let gain = scale.sqrt() * std::f64::consts::PI.powf(-0.25);

            let mut buf = vec![Complex::new(0.0, 0.0); n];
            // analytic wavelet: positive frequencies only, DC excluded
            for (k, slot) in buf.iter_mut().enumerate().take(n / 2 + 1).skip(1) {
                let w = 2.0 * std::f64::consts::PI * k as f64 / n as f64;
                let h = gain * (-0.5 * (scale * w - OMEGA0).powi(2)).exp();
                *slot = spectrum[k] * h;
            }
            inverse.process(&mut buf);

            freqs_hz.push(f);
            power.push(buf.iter().map(|c| c.norm_sqr() * norm).collect());
        }

        CwtPower { freqs_hz, power }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f64, fs: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| (2.0 * std::f64::consts::PI * freq * i as f64 / fs).sin())
            .collect()
    }

    #[test]
    fn test_sine_peak_at_tone() {
        let fs = 16.0;
        let x = sine(2.0, fs, 256);
        let out = Cwt::new(48).power(&x, fs, 4);
        let energy: Vec<f64> = out.power.iter().map(|row| row.iter().sum()).collect();
        let best = energy
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .unwrap()
            .0;
        let peak_hz = out.freqs_hz[best];
        assert!(
            (peak_hz - 2.0).abs() < 0.2,
            "expected ridge near 2 Hz, got {}",
            peak_hz
        );
    }

    #[test]
    fn test_grid_shape() {
        let out = Cwt::new(48).power(&sine(1.0, 16.0, 64), 16.0, 3);
        assert_eq!(out.freqs_hz.len(), 3 * 48 + 1);
        assert_eq!(out.power.len(), out.freqs_hz.len());
        assert!(out.power.iter().all(|row| row.len() == 64));
        assert!((out.freqs_hz.last().unwrap() - 8.0).abs() < 1e-9);
        assert!((out.freqs_hz[0] - 1.0).abs() < 1e-9);
        assert!(out.freqs_hz.windows(2).all(|p| p[0] < p[1]));
    }

    #[test]
    fn test_zero_signal_has_zero_power() {
        let out = Cwt::new(48).power(&vec![0.0; 32], 16.0, 2);
        assert!(out.power.iter().flatten().all(|&p| p == 0.0));
    }
}
