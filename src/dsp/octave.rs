//! Octave-up rectifier and octave-down zero-crossing divider.
//!
//! Both are crude time-domain pitch tricks from the analog pedal world, not
//! pitch shifters:
//!
//! Up: full-wave rectify and recenter, `y = clamp(2·|x| - 1, -1, 1)`. For a
//! sine input the rectified wave repeats twice per original cycle, which
//! reads as one octave up. Stateless.
//!
//! Down: a frequency-halving divider. Count the input's zero-crossings and
//! flip an output polarity on every second one - the output then crosses
//! zero half as often as the input, one octave down. The raw square that
//! produces is shaped by an amplitude envelope following |x| with a fast
//! attack (0.01) and slow release (0.001) one-pole, so the divided tone
//! inherits the input's dynamics. Output is `clamp(polarity · envelope)`.
//!
//! The divider only makes sense on near-monophonic input; on chords the
//! crossing pattern is irregular and the output gets appropriately nasty.

/// Envelope smoothing coefficient while |x| rises.
pub const ENV_ATTACK: f32 = 0.01;
/// Envelope smoothing coefficient while |x| falls.
pub const ENV_RELEASE: f32 = 0.001;

/// Full-wave rectify and rescale: one octave up.
#[inline]
pub fn octave_up(sample: f32) -> f32 {
    (2.0 * sample.abs() - 1.0).clamp(-1.0, 1.0)
}

/// Per-channel state for the octave-down divider.
#[derive(Debug, Clone)]
pub struct OctaveState {
    last_sample: f32,
    zero_cross_count: i32,
    polarity: f32, // +1 or -1
    envelope: f32,
}

impl Default for OctaveState {
    fn default() -> Self {
        Self {
            last_sample: 0.0,
            zero_cross_count: 0,
            polarity: 1.0,
            envelope: 0.0,
        }
    }
}

impl OctaveState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Current divider polarity (exposed for tests and metering).
    pub fn polarity(&self) -> f32 {
        self.polarity
    }

    /// Process one sample through the divider.
    ///
    /// `last_sample` updates every call whether or not a crossing occurred;
    /// zero counts as nonnegative on both sides of the comparison.
    #[inline]
    pub fn next_down(&mut self, sample: f32) -> f32 {
        let crossed = (sample >= 0.0) != (self.last_sample >= 0.0);
        if crossed {
            self.zero_cross_count += 1;
            if self.zero_cross_count >= 2 {
                self.polarity = -self.polarity;
                self.zero_cross_count = 0;
            }
        }
        self.last_sample = sample;

        let target = sample.abs();
        let coeff = if target > self.envelope {
            ENV_ATTACK
        } else {
            ENV_RELEASE
        };
        self.envelope = (1.0 - coeff) * self.envelope + coeff * target;
        debug_assert!(self.envelope >= 0.0);

        (self.polarity * self.envelope).clamp(-1.0, 1.0)
    }

    /// Apply the divider to an entire buffer in place.
    pub fn render_down(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_down(*sample);
        }
    }
}

/// Apply the octave-up rectifier to an entire buffer in place.
pub fn render_up(buffer: &mut [f32]) {
    for sample in buffer.iter_mut() {
        *sample = octave_up(*sample);
    }
}
