use anyhow::{bail, Result};

/// Replace NaN samples with a natural cubic spline through the finite ones.
pub fn spline_fill(signal: &[f64]) -> Result<Vec<f64>> {
    let xs: Vec<usize> = (0..signal.len()).filter(|&i| !signal[i].is_nan()).collect();
    if xs.len() == signal.len() {
        return Ok(signal.to_vec());
    }
    if xs.len() < 2 {
        bail!(
            "cannot repair missing samples: only {} finite sample(s) present",
            xs.len()
        );
    }

    let x: Vec<f64> = xs.iter().map(|&i| i as f64).collect();
    let y: Vec<f64> = xs.iter().map(|&i| signal[i]).collect();
    let m = second_derivatives(&x, &y);

    let mut out = signal.to_vec();
    for (i, v) in out.iter_mut().enumerate() {
        if v.is_nan() {
            *v = evaluate(&x, &y, &m, i as f64);
        }
    }
    Ok(out)
}

// Thomas algorithm on the tridiagonal system; natural boundary (zero ends).
fn second_derivatives(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    let mut m = vec![0.0; n];
    if n < 3 {
        return m;
    }
    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];
    for i in 1..n - 1 {
        let h0 = x[i] - x[i - 1];
        let h1 = x[i + 1] - x[i];
        let a = h0;
        let b = 2.0 * (h0 + h1);
        let c = h1;
        let d = 6.0 * ((y[i + 1] - y[i]) / h1 - (y[i] - y[i - 1]) / h0);
        let denom = b - a * c_prime[i - 1];
        c_prime[i] = c / denom;
        d_prime[i] = (d - a * d_prime[i - 1]) / denom;
    }
    for i in (1..n - 1).rev() {
        m[i] = d_prime[i] - c_prime[i] * m[i + 1];
    }
    m
}

fn evaluate(x: &[f64], y: &[f64], m: &[f64], t: f64) -> f64 {
    let n = x.len();
    // segment index, clamped so out-of-range t uses the end segments
    let j = x.partition_point(|&v| v <= t).clamp(1, n - 1) - 1;
    let h = x[j + 1] - x[j];
    let a = x[j + 1] - t;
    let b = t - x[j];
    m[j] * a * a * a / (6.0 * h)
        + m[j + 1] * b * b * b / (6.0 * h)
        + (y[j] / h - m[j] * h / 6.0) * a
        + (y[j + 1] / h - m[j + 1] * h / 6.0) * b
}
