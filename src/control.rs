//! Lock-free parameter delivery from the UI/automation thread.
//!
//! The audio callback must never lock or allocate, so parameter edits
//! travel through a single-producer single-consumer ring: the control
//! thread pushes whole `ParamSnapshot` values, the audio side drains the
//! ring once at the top of each block and keeps the newest one. Draining
//! per block (rather than per edit) gives the chain exactly the snapshot
//! semantics it wants: values are eventually consistent and stable for the
//! duration of one block.
//!
//! If the ring is full the push is dropped; the next successful push
//! carries the complete state anyway, so no edit is ever half-applied.

#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, RingBuffer};

use crate::params::ParamSnapshot;

/// Anything the audio side can poll snapshots from.
pub trait ParamSource {
    fn poll(&mut self) -> Option<ParamSnapshot>;
}

#[cfg(feature = "rtrb")]
impl ParamSource for Consumer<ParamSnapshot> {
    fn poll(&mut self) -> Option<ParamSnapshot> {
        Consumer::pop(self).ok()
    }
}

/// Create a snapshot ring; producer goes to the control thread, consumer
/// feeds a `ParamFeed` on the audio thread.
#[cfg(feature = "rtrb")]
pub fn param_channel(
    capacity: usize,
) -> (Producer<ParamSnapshot>, Consumer<ParamSnapshot>) {
    RingBuffer::new(capacity)
}

/// Audio-side snapshot cache: drains the source and remembers the latest
/// value so the chain always has a full snapshot, even on blocks where the
/// control thread sent nothing.
pub struct ParamFeed<R: ParamSource> {
    rx: R,
    current: ParamSnapshot,
}

impl<R: ParamSource> ParamFeed<R> {
    pub fn new(rx: R) -> Self {
        Self {
            rx,
            current: ParamSnapshot::default(),
        }
    }

    /// Snapshot for the next block: newest pushed value, or the previous
    /// one if nothing arrived.
    pub fn snapshot(&mut self) -> ParamSnapshot {
        while let Some(snapshot) = self.rx.poll() {
            self.current = snapshot;
        }
        self.current
    }
}
