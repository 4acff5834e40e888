//! Bit-depth quantizer and zero-order-hold downsampler.
//!
//! Two degradations run as one stage:
//!
//! Quantization maps each sample onto a grid of `2 · steps + 1` levels in
//! [-1, 1], where `steps = 2^(bits-1) - 1`. With 16 bits the grid is
//! inaudible; at 4-6 bits the rounding error becomes the gritty broadband
//! noise the pedal is named for.
//!
//! Sample-and-hold repeats the last quantized value for `factor` samples,
//! simulating a lower effective sample rate (zero-order hold). Aliasing from
//! the hold is the point, not a defect; the chain's lowpass tames the worst
//! of it afterwards.
//!
//! A fixed +6 dB pre-drive pushes the signal into the clamp before
//! quantization so the grid is well exercised even at conservative input
//! gain. Hold state is per channel and the phase counters are left free to
//! drift apart between channels - stereo material acquires a slight
//! divergence by design.

/// Fixed pre-drive into the quantizer clamp, as a linear gain (+6 dB).
pub const CRUSH_DRIVE: f32 = 1.9952623;

/// Quantize a sample to the grid of a given bit depth.
///
/// Clamps to [-1, 1], scales by `2^(bits-1) - 1`, rounds to the nearest
/// integer, and scales back.
#[inline]
pub fn quantize(sample: f32, bits: i32) -> f32 {
    let steps = ((1_i32 << (bits - 1)) - 1) as f32;
    (sample.clamp(-1.0, 1.0) * steps).round() / steps
}

/// Per-channel sample-and-hold state.
#[derive(Debug, Clone, Default)]
pub struct SampleHold {
    counter: i32,
    held: f32,
}

impl SampleHold {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.counter = 0;
        self.held = 0.0;
    }

    /// Advance one sample: latch a fresh quantized value when the counter
    /// is at zero, otherwise repeat the held one.
    ///
    /// The counter wraps with `>=` so a factor decrease mid-stream cannot
    /// strand it outside [0, factor).
    #[inline]
    pub fn next_sample(&mut self, input: f32, bits: i32, factor: i32) -> f32 {
        if self.counter == 0 {
            self.held = quantize(input * CRUSH_DRIVE, bits);
        }
        self.counter += 1;
        if self.counter >= factor {
            self.counter = 0;
        }
        self.held
    }

    /// Crush an entire buffer in place.
    pub fn render(&mut self, buffer: &mut [f32], bits: i32, factor: i32) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample, bits, factor);
        }
    }
}
