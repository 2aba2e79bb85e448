use std::ops::{Deref, DerefMut};

use super::BlockPool;
use crate::AudioBlock;

/// Exclusive block received from a pool.
///
/// Dropping it releases the block; [`WritableBlock::transmit`] forwards it
/// instead. Either way the pool sees exactly one of the two calls.
pub struct WritableBlock<'p, P: BlockPool> {
    pool: &'p P,
    // Only `None` while being consumed by `transmit` or `drop`
    block: Option<P::Writable>,
}

impl<'p, P: BlockPool> WritableBlock<'p, P> {
    /// Receive the next block on `input`, if there is one.
    pub fn receive(pool: &'p P, input: usize) -> Option<Self> {
        pool.receive_writable(input).map(|block| Self {
            pool,
            block: Some(block),
        })
    }

    /// Forward the block to `output` without releasing it.
    pub fn transmit(mut self, output: usize) {
        if let Some(block) = self.block.take() {
            self.pool.transmit(output, block);
        }
    }

    fn raw(&self) -> &P::Writable {
        match &self.block {
            Some(block) => block,
            None => unreachable!("writable block used after it was consumed"),
        }
    }

    fn raw_mut(&mut self) -> &mut P::Writable {
        match &mut self.block {
            Some(block) => block,
            None => unreachable!("writable block used after it was consumed"),
        }
    }
}

impl<P: BlockPool> Deref for WritableBlock<'_, P> {
    type Target = AudioBlock;

    fn deref(&self) -> &AudioBlock {
        self.raw()
    }
}

impl<P: BlockPool> DerefMut for WritableBlock<'_, P> {
    fn deref_mut(&mut self) -> &mut AudioBlock {
        self.raw_mut()
    }
}

impl<P: BlockPool> Drop for WritableBlock<'_, P> {
    fn drop(&mut self) {
        if let Some(block) = self.block.take() {
            self.pool.release_writable(block);
        }
    }
}

/// Shared block received from a pool, released when dropped.
pub struct ReadOnlyBlock<'p, P: BlockPool> {
    pool: &'p P,
    block: Option<P::ReadOnly>,
}

impl<'p, P: BlockPool> ReadOnlyBlock<'p, P> {
    /// Receive the next block on `input`, if there is one.
    pub fn receive(pool: &'p P, input: usize) -> Option<Self> {
        pool.receive_read_only(input).map(|block| Self {
            pool,
            block: Some(block),
        })
    }
}

impl<P: BlockPool> Deref for ReadOnlyBlock<'_, P> {
    type Target = AudioBlock;

    fn deref(&self) -> &AudioBlock {
        match &self.block {
            Some(block) => block,
            None => unreachable!("read-only block used after release"),
        }
    }
}

impl<P: BlockPool> Drop for ReadOnlyBlock<'_, P> {
    fn drop(&mut self) {
        if let Some(block) = self.block.take() {
            self.pool.release_read_only(block);
        }
    }
}
