use crate::util::{lerp, mean};

// Linear resampling; callers lowpass upstream, no anti-alias filter here.
// The mean is removed before interpolation and restored afterwards.
pub fn resample(signal: &[f64], fs_in: f64, fs_out: f64) -> Vec<f64> {
    if signal.is_empty() || fs_in == fs_out {
        return signal.to_vec();
    }
    let out_len = (signal.len() as f64 * fs_out / fs_in).round() as usize;
    let dc = mean(signal);
    let detrended: Vec<f64> = signal.iter().map(|&x| x - dc).collect();
    let step = fs_in / fs_out;
    let last = detrended.len() - 1;
    let mut out = Vec::with_capacity(out_len);
    for i in 0..out_len {
        let pos = i as f64 * step;
        let i0 = (pos.floor() as usize).min(last);
        let i1 = (i0 + 1).min(last);
        out.push(lerp(detrended[i0], detrended[i1], pos - i0 as f64) + dc);
    }
    out
}
