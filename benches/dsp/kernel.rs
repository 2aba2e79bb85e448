//! Constant and crossfade mixes for both datapaths.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_xfade::dsp::{GainKernel, NarrowKernel, WideKernel};

use crate::{signal, BLOCK_SIZES};

fn bench_kernel<K: GainKernel>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("dsp/{}", K::NAME));

    for &size in BLOCK_SIZES {
        let signal_a = signal(size, 0.1);
        let signal_b = signal(size, 0.15);
        let ctrl: Vec<i16> = (0..size)
            .map(|i| (i as i32 * K::CONTROL_UNITY.min(i16::MAX as i32) / size as i32) as i16)
            .collect();
        let mut buffer = signal_a.clone();

        group.bench_with_input(BenchmarkId::new("constant", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&signal_a);
                K::apply_gain_const(black_box(&mut buffer), black_box(&signal_b));
            })
        });

        group.bench_with_input(BenchmarkId::new("crossfade", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&signal_a);
                K::apply_gain_xf(
                    black_box(&mut buffer),
                    black_box(&signal_b),
                    black_box(&ctrl),
                );
            })
        });
    }

    group.finish();
}

pub fn bench_kernels(c: &mut Criterion) {
    bench_kernel::<WideKernel>(c);
    bench_kernel::<NarrowKernel>(c);
}
