pub mod chain;
pub mod control; // Lock-free UI -> audio parameter delivery
pub mod dsp;
pub mod params;

pub use chain::StompChain;
pub use params::{OctaveMode, ParamSnapshot};

/// Largest block size hosts are expected to configure: a sizing hint for
/// the `max_block_size` argument of [`StompChain::new`] /
/// [`StompChain::reconfigure`]. Blocks beyond the configured maximum are
/// survived (the dry buffer grows defensively) but cost an allocation on
/// the audio thread.
pub const MAX_BLOCK_SIZE: usize = 2048;
