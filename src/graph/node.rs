use crate::block::BlockPool;

/// Core trait for block-processing nodes
///
/// `update` runs once per audio block inside the realtime callback. It must
/// not block, allocate, or perform I/O, and it is never re-entered.
pub trait AudioNode<P: BlockPool> {
    /// Number of input channels this node reads.
    const NUM_INPUTS: usize;

    /// Number of output channels this node writes.
    const NUM_OUTPUTS: usize;

    /// Process one block: receive inputs from `pool`, transmit outputs to it.
    fn update(&mut self, pool: &P);
}
