//! Topology-preserving lowpass filter.
//!
//! The chain's final tone stage: a state-variable filter in TPT form, used
//! only through its lowpass tap and with resonance pinned to zero (k = 2).
//! It sits after the quantizer and octave stages to tame the aliasing and
//! rectification harshness they introduce. Cutoff is prewarped with tan so
//! the digital response matches the analog prototype at the cutoff
//! frequency even close to Nyquist.
//!
//! The two integrator states persist across blocks; the chain resets them
//! on reconfigure.

use std::f32::consts::TAU;

pub struct Lowpass {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory
    cutoff_hz: f32,
}

impl Lowpass {
    pub fn new(cutoff_hz: f32) -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            cutoff_hz,
        }
    }

    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        self.cutoff_hz = cutoff_hz;
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff_hz
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    #[inline]
    fn compute_g(&self, sample_rate: f32) -> f32 {
        let wd = TAU * self.cutoff_hz;
        let wa = (2.0 * sample_rate) * (wd / (2.0 * sample_rate)).tan();
        wa / (2.0 * sample_rate)
    }

    #[inline]
    pub fn next_sample(&mut self, sample: f32, g: f32, k: f32) -> f32 {
        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        v2
    }

    /// Filter an entire buffer in place.
    pub fn render(&mut self, buffer: &mut [f32], sample_rate: f32) {
        let g = self.compute_g(sample_rate);
        let k = 2.0; // resonance-free

        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample, g, k);
        }
    }
}
