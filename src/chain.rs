//! The stomp chain: fixed-order effect pipeline over streamed blocks.
//!
//! Stage order is structural, not incidental - each stage's output range is
//! what the next stage was tuned for (the crusher expects near-unity input
//! after compression, the lowpass cleans up crusher/octave aliasing):
//!
//!   gain -> saturate -> compress -> crush -> octave -> lowpass -> mix -> trim
//!
//! One `StompChain` instance owns all mutable state (per-channel hold
//! counters, octave dividers, compressor envelopes, filter integrators, the
//! dry buffer), so independent instances never interfere. `process_block`
//! reads the parameter snapshot once, derives the block's control values,
//! and runs the chain in place; it allocates nothing in steady state. The
//! dry buffer is sized at `reconfigure` and only grows, never shrinks, if a
//! caller violates the declared maximum block size.

use crate::{
    dsp::{
        amplify::apply_gain,
        compressor::Compressor,
        crush::SampleHold,
        filter::Lowpass,
        octave::{render_up, OctaveState},
        saturate::saturate_buffer,
    },
    params::{BlockParams, OctaveMode, ParamSnapshot},
};

/// All mutable state belonging to one audio channel.
struct ChannelState {
    hold: SampleHold,
    octave: OctaveState,
    compressor: Compressor,
    lowpass: Lowpass,
}

impl ChannelState {
    fn new(sample_rate: f32) -> Self {
        Self {
            hold: SampleHold::new(),
            octave: OctaveState::new(),
            compressor: Compressor::new(sample_rate),
            lowpass: Lowpass::new(8_000.0),
        }
    }
}

pub struct StompChain {
    sample_rate: f32,
    max_block_size: usize,
    channels: Vec<ChannelState>,
    dry: Vec<Vec<f32>>,
}

impl StompChain {
    pub fn new(sample_rate: f32, max_block_size: usize, num_channels: usize) -> Self {
        let mut chain = Self {
            sample_rate,
            max_block_size,
            channels: Vec::new(),
            dry: Vec::new(),
        };
        chain.reconfigure(sample_rate, max_block_size, num_channels);
        chain
    }

    /// Rebuild all channel state and dry buffers.
    ///
    /// Must be called before the first block and whenever sample rate,
    /// maximum block size, or channel count changes. Acts as a barrier: it
    /// is never run concurrently with `process_block`.
    pub fn reconfigure(&mut self, sample_rate: f32, max_block_size: usize, num_channels: usize) {
        self.sample_rate = sample_rate;
        self.max_block_size = max_block_size;
        self.channels = (0..num_channels)
            .map(|_| ChannelState::new(sample_rate))
            .collect();
        self.dry = (0..num_channels)
            .map(|_| vec![0.0; max_block_size])
            .collect();
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Process one block in place.
    ///
    /// `buffer` holds one Vec per channel. A channel count differing from
    /// the last `reconfigure` is an integration error; state is rebuilt
    /// defensively (audio for that block is best-effort, memory safety is
    /// not negotiable).
    pub fn process_block(&mut self, buffer: &mut [Vec<f32>], params: &ParamSnapshot) {
        if buffer.len() != self.channels.len() {
            let (sample_rate, max_block) = (self.sample_rate, self.max_block_size);
            self.reconfigure(sample_rate, max_block, buffer.len());
        }

        // Bypass short-circuits before any stage touches the live buffer.
        if params.bypass {
            return;
        }

        let p = BlockParams::derive(params);

        for ((state, data), dry) in self
            .channels
            .iter_mut()
            .zip(buffer.iter_mut())
            .zip(self.dry.iter_mut())
        {
            let num_samples = data.len();
            if dry.len() < num_samples {
                dry.resize(num_samples, 0.0);
            }
            dry[..num_samples].copy_from_slice(data);

            state.compressor.set_threshold_db(p.threshold_db);
            state.compressor.set_ratio(p.ratio);
            state.lowpass.set_cutoff(p.cutoff_hz);

            // 0) Input gain
            apply_gain(data, p.gain);

            // 1) Light saturation
            saturate_buffer(data);

            // 2) Compression
            state.compressor.render(data);

            // 3) Bit/rate reduction
            state.hold.render(data, p.bits, p.downsample);

            // 4) Octave (Off leaves both buffer and state untouched)
            match p.octave_mode {
                OctaveMode::Up => render_up(data),
                OctaveMode::Down => state.octave.render_down(data),
                OctaveMode::Off => {}
            }

            // 5) Lowpass
            state.lowpass.render(data, self.sample_rate);

            // Wet/dry blend; skipped entirely at full wet
            if p.wet < 1.0 {
                for (wet_sample, &dry_sample) in data.iter_mut().zip(dry.iter()) {
                    *wet_sample = *wet_sample * p.wet + dry_sample * p.dry;
                }
            }

            // Output trim
            apply_gain(data, p.out_gain);
        }
    }
}
