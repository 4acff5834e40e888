//! Parameter snapshot and per-block derivation.
//!
//! The host/editor layer owns parameter storage and hands the chain one
//! strongly-typed `ParamSnapshot` per block. The snapshot is immutable for
//! the duration of that block; `BlockParams::derive` turns it into the
//! clamped, linearized values the stages actually consume. There is no
//! smoothing between blocks: value jumps land exactly at block boundaries,
//! which is part of the pedal's lo-fi character.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Convert decibels to a linear gain factor (10^(db/20)).
#[inline]
pub fn db_to_gain(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

/// Linear interpolation between `a` and `b` by `t` in [0, 1].
#[inline]
fn lerp(t: f32, a: f32, b: f32) -> f32 {
    a + t * (b - a)
}

/// Octave effect selector.
///
/// `Down` halves the perceived pitch via a zero-crossing divider, `Up`
/// doubles it via full-wave rectification. `Off` skips the stage entirely
/// and leaves its per-channel state untouched.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OctaveMode {
    Down,
    Off,
    Up,
}

/// Control values for one block, as exposed to the host.
///
/// Ranges mirror the pedal's knobs; every numeric field is clamped again
/// during derivation, so an out-of-range snapshot degrades gracefully
/// instead of producing NaN/Inf downstream.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSnapshot {
    /// Input gain in dB, [-24, 24].
    pub gain_db: f32,
    /// Quantizer bit depth, [4, 16] on the knob (clamped to [4, 24] internally).
    pub bit_depth: i32,
    /// Sample-and-hold factor, [1, 16].
    pub downsample: i32,
    pub octave_mode: OctaveMode,
    /// Lowpass cutoff in Hz, [500, 20000].
    pub cutoff_hz: f32,
    /// Wet/dry blend, [0, 100] percent.
    pub wet_percent: f32,
    /// Output trim in dB, [-24, 24].
    pub out_trim_db: f32,
    /// Compressor amount, [0, 100]; maps to threshold and ratio.
    pub sustain: f32,
    /// When set, the block is returned verbatim.
    pub bypass: bool,
}

impl Default for ParamSnapshot {
    /// Factory settings of the pedal.
    fn default() -> Self {
        Self {
            gain_db: 6.0,
            bit_depth: 6,
            downsample: 4,
            octave_mode: OctaveMode::Off,
            cutoff_hz: 8_000.0,
            wet_percent: 100.0,
            out_trim_db: 0.0,
            sustain: 60.0,
            bypass: false,
        }
    }
}

/// Clamped, linearized control values consumed by the stages.
#[derive(Debug, Clone, Copy)]
pub struct BlockParams {
    pub gain: f32,
    pub bits: i32,
    pub downsample: i32,
    pub octave_mode: OctaveMode,
    pub cutoff_hz: f32,
    pub wet: f32,
    pub dry: f32,
    pub out_gain: f32,
    pub threshold_db: f32,
    pub ratio: f32,
}

impl BlockParams {
    /// Derive the block's control values from a raw snapshot.
    pub fn derive(snapshot: &ParamSnapshot) -> Self {
        let wet = (snapshot.wet_percent / 100.0).clamp(0.0, 1.0);
        let sustain = (snapshot.sustain / 100.0).clamp(0.0, 1.0);

        Self {
            gain: db_to_gain(snapshot.gain_db.clamp(-24.0, 24.0)),
            bits: snapshot.bit_depth.clamp(4, 24),
            downsample: snapshot.downsample.max(1),
            octave_mode: snapshot.octave_mode,
            // Knob range tops out well below Nyquist; an unclamped cutoff
            // would push the filter's prewarp past tan's pole and the
            // integrators would diverge.
            cutoff_hz: snapshot.cutoff_hz.clamp(500.0, 20_000.0),
            wet,
            dry: 1.0 - wet,
            out_gain: db_to_gain(snapshot.out_trim_db.clamp(-24.0, 24.0)),
            // More sustain = lower threshold and harder ratio.
            threshold_db: lerp(sustain, -12.0, -30.0),
            ratio: lerp(sustain, 2.0, 6.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_conversion_reference_points() {
        assert!((db_to_gain(0.0) - 1.0).abs() < 1e-6);
        assert!((db_to_gain(6.0) - 1.9953).abs() < 1e-3);
        assert!((db_to_gain(-6.0) - 0.5012).abs() < 1e-3);
    }

    #[test]
    fn derive_clamps_bit_depth() {
        let mut snapshot = ParamSnapshot::default();

        snapshot.bit_depth = 1;
        assert_eq!(BlockParams::derive(&snapshot).bits, 4);

        snapshot.bit_depth = 99;
        assert_eq!(BlockParams::derive(&snapshot).bits, 24);
    }

    #[test]
    fn derive_clamps_downsample_and_wet() {
        let mut snapshot = ParamSnapshot::default();

        snapshot.downsample = 0;
        snapshot.wet_percent = 250.0;
        let params = BlockParams::derive(&snapshot);
        assert_eq!(params.downsample, 1);
        assert!((params.wet - 1.0).abs() < 1e-6);
        assert!(params.dry.abs() < 1e-6);

        snapshot.wet_percent = -10.0;
        let params = BlockParams::derive(&snapshot);
        assert!(params.wet.abs() < 1e-6);
        assert!((params.dry - 1.0).abs() < 1e-6);
    }

    #[test]
    fn derive_clamps_gain_trim_and_cutoff() {
        let mut snapshot = ParamSnapshot::default();

        // A wildly oversized gain must land on the knob limit, not inf
        snapshot.gain_db = 1e10;
        snapshot.out_trim_db = -1e10;
        snapshot.cutoff_hz = 40_000.0;
        let params = BlockParams::derive(&snapshot);
        assert!(params.gain.is_finite());
        assert!((params.gain - db_to_gain(24.0)).abs() < 1e-4);
        assert!((params.out_gain - db_to_gain(-24.0)).abs() < 1e-6);
        assert!((params.cutoff_hz - 20_000.0).abs() < 1e-3);

        snapshot.cutoff_hz = 10.0;
        let params = BlockParams::derive(&snapshot);
        assert!((params.cutoff_hz - 500.0).abs() < 1e-3);
    }

    #[test]
    fn sustain_maps_to_compressor_settings() {
        let mut snapshot = ParamSnapshot::default();

        snapshot.sustain = 0.0;
        let params = BlockParams::derive(&snapshot);
        assert!((params.threshold_db + 12.0).abs() < 1e-6);
        assert!((params.ratio - 2.0).abs() < 1e-6);

        snapshot.sustain = 100.0;
        let params = BlockParams::derive(&snapshot);
        assert!((params.threshold_db + 30.0).abs() < 1e-6);
        assert!((params.ratio - 6.0).abs() < 1e-6);

        snapshot.sustain = 50.0;
        let params = BlockParams::derive(&snapshot);
        assert!((params.threshold_db + 21.0).abs() < 1e-6);
        assert!((params.ratio - 4.0).abs() < 1e-6);
    }

    #[test]
    fn default_matches_factory_settings() {
        let snapshot = ParamSnapshot::default();
        assert_eq!(snapshot.bit_depth, 6);
        assert_eq!(snapshot.downsample, 4);
        assert_eq!(snapshot.octave_mode, OctaveMode::Off);
        assert!(!snapshot.bypass);
    }
}
