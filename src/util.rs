pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

pub fn repeat_each<T: Copy>(values: &[T], width: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(values.len() * width);
    for &v in values {
        out.extend(std::iter::repeat(v).take(width));
    }
    out
}

// NaN samples are skipped; None when the window has no finite sample
pub fn peak_to_peak(window: &[f64]) -> Option<f64> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &x in window {
        if x.is_nan() {
            continue;
        }
        lo = lo.min(x);
        hi = hi.max(x);
    }
    if hi >= lo {
        Some(hi - lo)
    } else {
        None
    }
}

pub fn windowed_peak_to_peak(signal: &[f64], width: usize) -> Vec<f64> {
    signal
        .chunks_exact(width)
        .map(|w| peak_to_peak(w).unwrap_or(0.0))
        .collect()
}
