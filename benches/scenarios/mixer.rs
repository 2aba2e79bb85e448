//! Mixer updates over a queue-backed pool.

use std::hint::black_box;

use criterion::Criterion;
use saavy_xfade::{
    block::ring::RingPool,
    graph::{
        crossfade::{INPUT_A, INPUT_B, INPUT_CONTROL},
        CrossfadeMixer,
    },
    AUDIO_BLOCK_SAMPLES,
};

use crate::signal;

pub fn bench_mixer(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/mixer");

    let signal_a = signal(AUDIO_BLOCK_SAMPLES, 0.05);
    let signal_b = signal(AUDIO_BLOCK_SAMPLES, 0.07);
    let ctrl = vec![12_000i16; AUDIO_BLOCK_SAMPLES];

    let (pool, mut ports) = RingPool::new(4);
    let mut mixer: CrossfadeMixer = CrossfadeMixer::new();

    // Queue traffic included: this is the whole per-block cost on the host
    group.bench_function("constant_mix_block", |b| {
        b.iter(|| {
            ports.send_samples(INPUT_A, &signal_a);
            ports.send_samples(INPUT_B, &signal_b);
            black_box(mixer.process(&pool));
            if let Some(block) = ports.receive() {
                ports.reclaim(block);
            }
        })
    });

    group.bench_function("crossfade_block", |b| {
        b.iter(|| {
            ports.send_samples(INPUT_A, &signal_a);
            ports.send_samples(INPUT_B, &signal_b);
            ports.send_samples(INPUT_CONTROL, &ctrl);
            black_box(mixer.process(&pool));
            if let Some(block) = ports.receive() {
                ports.reclaim(block);
            }
        })
    });

    group.finish();
}
