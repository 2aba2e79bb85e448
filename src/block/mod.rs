//! Audio block ownership.
//!
//! Blocks come from a pool owned by the host. A node receives blocks from its
//! input channels, mutates at most one of them, forwards that one downstream
//! and hands the rest back. `BlockPool` is the contract a host implements;
//! [`WritableBlock`] and [`ReadOnlyBlock`] wrap the raw handles so every
//! received block is released exactly once, on every exit path.

/// Scoped handles that release on drop.
pub mod handle;
/// Lock-free queue-backed pool for threaded hosts.
#[cfg(feature = "rtrb")]
pub mod ring;

use std::ops::{Deref, DerefMut};

use crate::AudioBlock;

pub use handle::{ReadOnlyBlock, WritableBlock};

/// Source and sink of audio blocks for a node.
///
/// Methods take `&self`: pools are shared with whatever feeds the inputs and
/// use interior mutability. A node never calls this concurrently with itself.
pub trait BlockPool {
    /// Exclusive handle to a block the node may mutate.
    type Writable: DerefMut<Target = AudioBlock>;
    /// Shared handle to a block the node may only read.
    type ReadOnly: Deref<Target = AudioBlock>;

    /// Take the next block on `input` for in-place mutation.
    fn receive_writable(&self, input: usize) -> Option<Self::Writable>;

    /// Take a read-only reference to the next block on `input`.
    fn receive_read_only(&self, input: usize) -> Option<Self::ReadOnly>;

    /// Give back a writable handle that was not transmitted.
    fn release_writable(&self, block: Self::Writable);

    /// Give back a read-only handle.
    fn release_read_only(&self, block: Self::ReadOnly);

    /// Hand a block to the consumers of `output`. Ownership moves downstream.
    fn transmit(&self, output: usize, block: Self::Writable);
}
