//! Feed-forward dynamic range compressor.
//!
//! A compressor reduces gain once the signal's envelope exceeds a threshold.
//! This one is deliberately simple - the fixed front end of a fuzz pedal,
//! not a mastering tool:
//!
//!   - Envelope: branching one-pole follower over |x|. The smoothing
//!     coefficient is `exp(-1 / (time · sample_rate))`; attack (5 ms) is
//!     used while the level rises, release (80 ms) while it falls.
//!   - Gain computer: unity below the linear threshold, otherwise
//!     `(env / threshold)^(1/ratio - 1)`, the hard-knee curve expressed in
//!     the linear domain.
//!
//! Threshold and ratio are updated per block from the "sustain" control
//! with no smoothing of their own; the envelope follower already low-passes
//! the audible transitions. State is per channel - the chain owns one
//! `Compressor` per channel and resets them on reconfigure.

/// Fixed attack time in milliseconds.
pub const ATTACK_MS: f32 = 5.0;
/// Fixed release time in milliseconds.
pub const RELEASE_MS: f32 = 80.0;

#[inline]
fn ballistics_coeff(time_ms: f32, sample_rate: f32) -> f32 {
    (-1.0 / (time_ms * 0.001 * sample_rate)).exp()
}

pub struct Compressor {
    attack_coeff: f32,
    release_coeff: f32,
    threshold: f32, // linear
    threshold_inv: f32,
    ratio_inv: f32,
    envelope: f32,
}

impl Compressor {
    pub fn new(sample_rate: f32) -> Self {
        let mut compressor = Self {
            attack_coeff: 0.0,
            release_coeff: 0.0,
            threshold: 1.0,
            threshold_inv: 1.0,
            ratio_inv: 1.0,
            envelope: 0.0,
        };
        compressor.prepare(sample_rate);
        compressor
    }

    /// Recompute ballistics for a new sample rate and clear the envelope.
    pub fn prepare(&mut self, sample_rate: f32) {
        self.attack_coeff = ballistics_coeff(ATTACK_MS, sample_rate);
        self.release_coeff = ballistics_coeff(RELEASE_MS, sample_rate);
        self.reset();
    }

    pub fn set_threshold_db(&mut self, threshold_db: f32) {
        self.threshold = 10.0_f32.powf(threshold_db / 20.0);
        self.threshold_inv = 1.0 / self.threshold;
    }

    pub fn set_ratio(&mut self, ratio: f32) {
        debug_assert!(ratio >= 1.0);
        self.ratio_inv = 1.0 / ratio.max(1.0);
    }

    pub fn reset(&mut self) {
        self.envelope = 0.0;
    }

    /// Compress one sample, updating the envelope state.
    #[inline]
    pub fn next_sample(&mut self, sample: f32) -> f32 {
        let level = sample.abs();
        let coeff = if level > self.envelope {
            self.attack_coeff
        } else {
            self.release_coeff
        };
        self.envelope = level + coeff * (self.envelope - level);

        let gain = if self.envelope < self.threshold {
            1.0
        } else {
            (self.envelope * self.threshold_inv).powf(self.ratio_inv - 1.0)
        };

        sample * gain
    }

    /// Compress an entire buffer in place.
    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample);
        }
    }
}
