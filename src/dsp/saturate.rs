//! Fixed tanh soft-clipper.
//!
//! A waveshaper applies a transfer function to each sample:
//!
//! ```text
//! output = makeup · tanh(drive · input)
//! ```
//!
//! tanh is linear near zero and compresses smoothly toward ±1, so small
//! signals pass with a mild boost while peaks get rounded off - the classic
//! "analog fuzz" front end. Drive and makeup are fixed: with drive = 1.7,
//! tanh(1.7) ≈ 0.935, and makeup = 1.15 brings a full-scale input back to
//! roughly unity (1.15 · 0.935 ≈ 1.08). The stage has no parameters and no
//! state; it exists to shape the distribution of the signal before the
//! compressor and quantizer see it.

/// Drive into the tanh nonlinearity.
pub const DRIVE: f32 = 1.7;
/// Post-tanh makeup gain, chosen so full-scale input lands near unity.
pub const MAKEUP: f32 = 1.15;

/// Soft-clip one sample.
#[inline]
pub fn light_saturate(sample: f32) -> f32 {
    MAKEUP * (DRIVE * sample).tanh()
}

/// Apply the soft-clipper to an entire buffer in place.
pub fn saturate_buffer(buffer: &mut [f32]) {
    for sample in buffer.iter_mut() {
        *sample = light_saturate(*sample);
    }
}
