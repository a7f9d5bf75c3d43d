use anyhow::{anyhow, Result};
use biquad::{Biquad, Coefficients, DirectForm1, Type, Q_BUTTERWORTH_F64};

pub fn forward_backward_filter<F: Biquad<f64>>(signal: &mut [f64], filter: &mut F) {
    signal.iter_mut().for_each(|x| *x = filter.run(*x));
    filter.reset_state();
    signal.reverse();
    signal.iter_mut().for_each(|x| *x = filter.run(*x));
    filter.reset_state();
    signal.reverse();
}

/// 2nd-order Butterworth lowpass applied zero-phase in place.
pub fn lowpass_zero_phase(signal: &mut [f64], fs: f64, cutoff_hz: f64) -> Result<()> {
    // from_normalized_params takes omega/pi, i.e. 2*f0/fs, and rejects
    // cutoffs at or above Nyquist
    let coeffs = Coefficients::<f64>::from_normalized_params(
        Type::LowPass,
        2.0 * cutoff_hz / fs,
        Q_BUTTERWORTH_F64,
    )
    .map_err(|_| {
        anyhow!(
            "Failed to create lowpass coefficients (cutoff {} Hz at {} Hz)",
            cutoff_hz,
            fs
        )
    })?;
    let mut lowpass = DirectForm1::<f64>::new(coeffs);
    forward_backward_filter(signal, &mut lowpass);
    Ok(())
}
