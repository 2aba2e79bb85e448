//! Queue-backed block pool.
//!
//! For hosts where blocks are produced on one thread (decoder, generator,
//! network) and mixed on the audio thread. Every channel is an `rtrb` SPSC
//! queue of boxed blocks; nothing on the audio side allocates.
//!
//! ```text
//!   RingPorts (feeder side)                 RingPool (audio side)
//!   ──────────────────────                  ─────────────────────
//!   send(0, ..) ──── input A queue ───────▶ receive_writable(0)
//!   send(1, ..) ──── input B queue ───────▶ receive_read_only(1)
//!   send(2, ..) ──── control queue ───────▶ receive_read_only(2)
//!   receive()   ◀─── output queue ───────── transmit(0, ..)
//!   (reuse)     ◀─── recycle queue ──────── release_*(..)
//! ```

use std::cell::RefCell;

use rtrb::{Consumer, Producer, PushError, RingBuffer};

use super::BlockPool;
use crate::{AudioBlock, AUDIO_BLOCK_SAMPLES};

/// Number of input channels a `RingPool` serves.
pub const RING_INPUTS: usize = 3;

/// A heap block that moves between the two sides without copying.
pub type BoxedBlock = Box<AudioBlock>;

/// Audio-thread half: implements [`BlockPool`] over lock-free queues.
pub struct RingPool {
    inputs: [RefCell<Consumer<BoxedBlock>>; RING_INPUTS],
    output: RefCell<Producer<BoxedBlock>>,
    recycle: RefCell<Producer<BoxedBlock>>,
}

/// Feeder-thread half: pushes input blocks, pulls mixed output.
pub struct RingPorts {
    inputs: [Producer<BoxedBlock>; RING_INPUTS],
    output: Consumer<BoxedBlock>,
    recycled: Consumer<BoxedBlock>,
    spare: Vec<BoxedBlock>,
    capacity: usize,
}

impl RingPool {
    /// Create a pool whose queues each hold `capacity` blocks.
    pub fn new(capacity: usize) -> (Self, RingPorts) {
        let (a_tx, a_rx) = RingBuffer::new(capacity);
        let (b_tx, b_rx) = RingBuffer::new(capacity);
        let (ctrl_tx, ctrl_rx) = RingBuffer::new(capacity);
        let (out_tx, out_rx) = RingBuffer::new(capacity);
        // `send` drains this queue before allocating, so at most 3 × capacity
        // port-fed blocks are ever waiting here
        let (recycle_tx, recycle_rx) = RingBuffer::new(capacity * (RING_INPUTS + 1));

        let pool = Self {
            inputs: [
                RefCell::new(a_rx),
                RefCell::new(b_rx),
                RefCell::new(ctrl_rx),
            ],
            output: RefCell::new(out_tx),
            recycle: RefCell::new(recycle_tx),
        };
        let ports = RingPorts {
            inputs: [a_tx, b_tx, ctrl_tx],
            output: out_rx,
            recycled: recycle_rx,
            spare: Vec::with_capacity(capacity),
            capacity,
        };

        (pool, ports)
    }

    fn pop(&self, input: usize) -> Option<BoxedBlock> {
        self.inputs.get(input)?.borrow_mut().pop().ok()
    }

    /// Only blocks that never came through `RingPorts` can overflow the recycle
    /// queue; those are dropped, which frees on the calling thread.
    fn recycle(&self, block: BoxedBlock) {
        if let Err(PushError::Full(block)) = self.recycle.borrow_mut().push(block) {
            log::warn!("recycle queue full, dropping audio block");
            drop(block);
        }
    }
}

impl BlockPool for RingPool {
    type Writable = BoxedBlock;
    type ReadOnly = BoxedBlock;

    fn receive_writable(&self, input: usize) -> Option<BoxedBlock> {
        self.pop(input)
    }

    fn receive_read_only(&self, input: usize) -> Option<BoxedBlock> {
        self.pop(input)
    }

    fn release_writable(&self, block: BoxedBlock) {
        self.recycle(block);
    }

    fn release_read_only(&self, block: BoxedBlock) {
        self.recycle(block);
    }

    fn transmit(&self, output: usize, block: BoxedBlock) {
        if output != 0 {
            log::warn!("no consumer on output {}, recycling block", output);
            self.recycle(block);
            return;
        }

        if let Err(PushError::Full(block)) = self.output.borrow_mut().push(block) {
            log::warn!("output queue full, block overrun");
            self.recycle(block);
        }
    }
}

impl RingPorts {
    /// Queue a block on `input`, filled by `fill`.
    ///
    /// Reuses a recycled or spare block when one exists. Returns `false` if
    /// the input queue is full or `input` is out of range.
    pub fn send(&mut self, input: usize, fill: impl FnOnce(&mut AudioBlock)) -> bool {
        let Some(tx) = self.inputs.get_mut(input) else {
            return false;
        };
        if tx.is_full() {
            return false;
        }

        let mut block = match self.recycled.pop() {
            Ok(block) => block,
            Err(_) => self
                .spare
                .pop()
                .unwrap_or_else(|| Box::new([0; AUDIO_BLOCK_SAMPLES])),
        };
        fill(&mut block);

        match tx.push(block) {
            Ok(()) => true,
            Err(PushError::Full(block)) => {
                self.spare.push(block);
                false
            }
        }
    }

    /// Copy `samples` into a block on `input`; the rest of the block is zeroed.
    pub fn send_samples(&mut self, input: usize, samples: &[i16]) -> bool {
        let len = samples.len().min(AUDIO_BLOCK_SAMPLES);
        self.send(input, |block| {
            block[..len].copy_from_slice(&samples[..len]);
            block[len..].fill(0);
        })
    }

    /// Next mixed block, if the mixer has produced one.
    pub fn receive(&mut self) -> Option<BoxedBlock> {
        self.output.pop().ok()
    }

    /// Return an output block for reuse by later `send` calls.
    pub fn reclaim(&mut self, block: BoxedBlock) {
        self.spare.push(block);
    }

    /// Blocks released by the audio side and not yet reused.
    pub fn recycled_len(&self) -> usize {
        self.recycled.slots()
    }

    /// Mixed blocks waiting in the output queue.
    pub fn output_len(&self) -> usize {
        self.output.slots()
    }

    /// Blocks waiting on `input`.
    pub fn queued(&self, input: usize) -> usize {
        self.inputs
            .get(input)
            .map(|tx| self.capacity - tx.slots())
            .unwrap_or(0)
    }
}
