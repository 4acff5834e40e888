//! Low-level DSP primitives used by the stomp chain.
//!
//! These components are allocation-free and realtime-safe, making them safe
//! to run inside the audio callback. They intentionally stay focused on the
//! signal-processing math so the chain module can layer on orchestration,
//! parameter derivation, and wet/dry mixing.

/// Constant gain application.
pub mod amplify;
/// Feed-forward dynamic range compressor with fixed ballistics.
pub mod compressor;
/// Bit-depth quantizer and zero-order-hold downsampler.
pub mod crush;
/// Topology-preserving lowpass filter.
pub mod filter;
/// Octave-up rectifier and octave-down zero-crossing divider.
pub mod octave;
/// Fixed tanh soft-clipper.
pub mod saturate;
