//! Constant gain application.
//!
//! The chain applies gain twice: once at the input (drive into the
//! saturator) and once at the output (trim after the wet/dry mix). Both are
//! plain multiplications; the dB mapping lives in `params::db_to_gain`
//! because human-facing gain controls are logarithmic:
//!
//! ```text
//! ×1.0  =  0 dB   (unity)
//! ×0.5  = -6 dB   (half amplitude)
//! ×2.0  = +6 dB   (double amplitude)
//! ```
//!
//! Extreme gain values are allowed; the saturator and the quantizer clamp
//! downstream, so input gain doubles as a drive control.

/// Multiply a signal by a constant gain factor (in-place).
#[inline]
pub fn apply_gain(signal: &mut [f32], gain: f32) {
    for sample in signal.iter_mut() {
        *sample *= gain;
    }
}
