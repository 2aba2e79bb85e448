#![cfg(feature = "rtrb")]

use saavy_xfade::{
    block::ring::RingPool,
    dsp::{GainKernel, NarrowKernel, WideKernel},
    graph::{
        crossfade::{INPUT_A, INPUT_B, INPUT_CONTROL},
        AudioNode, CrossfadeMixer, MixOutcome,
    },
    AUDIO_BLOCK_SAMPLES,
};

fn tone(amplitude: f32, cycles: f32) -> Vec<i16> {
    (0..AUDIO_BLOCK_SAMPLES)
        .map(|i| {
            let phase = i as f32 / AUDIO_BLOCK_SAMPLES as f32 * cycles * std::f32::consts::TAU;
            (phase.sin() * amplitude) as i16
        })
        .collect()
}

#[test]
fn reference_block_mixes_half_and_half() {
    let (pool, mut ports) = RingPool::new(4);
    let mut mixer: CrossfadeMixer = CrossfadeMixer::new();

    ports.send_samples(INPUT_A, &[100, -100, 0, 32767]);
    ports.send_samples(INPUT_B, &[0, 100, 0, -32768]);
    mixer.update(&pool);

    let out = ports.receive().expect("mixed block");
    assert_eq!(&out[..4], &[50, 0, 0, -1]);
    assert!(out[4..].iter().all(|&s| s == 0));
    // B released, A transmitted
    assert_eq!(ports.recycled_len(), 1);
}

#[test]
fn presence_matrix_over_queues() {
    let (pool, mut ports) = RingPool::new(4);
    let mut mixer: CrossfadeMixer = CrossfadeMixer::new();

    // Nothing queued
    assert_eq!(mixer.process(&pool), MixOutcome::Silent);
    assert!(ports.receive().is_none());

    // A only
    ports.send_samples(INPUT_A, &[7; 4]);
    assert_eq!(mixer.process(&pool), MixOutcome::PassThrough);
    assert_eq!(ports.receive().map(|b| b[0]), Some(7));

    // A and B
    ports.send_samples(INPUT_A, &[10; 4]);
    ports.send_samples(INPUT_B, &[20; 4]);
    assert_eq!(mixer.process(&pool), MixOutcome::ConstantMix);
    assert_eq!(ports.receive().map(|b| b[0]), Some(15));
    assert_eq!(ports.recycled_len(), 1);

    // All three, zero control keeps A
    ports.send_samples(INPUT_A, &[10; 4]);
    ports.send_samples(INPUT_B, &[20; 4]);
    ports.send_samples(INPUT_CONTROL, &[0; 4]);
    assert_eq!(mixer.process(&pool), MixOutcome::Crossfade);
    assert_eq!(ports.receive().map(|b| b[0]), Some(10));

    // The recycled B was reused for the last A; B and control came back
    assert_eq!(ports.recycled_len(), 2);
    assert_eq!(ports.queued(INPUT_A), 0);
    assert_eq!(ports.queued(INPUT_B), 0);
    assert_eq!(ports.queued(INPUT_CONTROL), 0);
}

#[test]
fn control_ramp_crossfades_between_tones() {
    fn run<K: GainKernel>(control_unity: i32) {
        let (pool, mut ports) = RingPool::new(4);
        let mut mixer = CrossfadeMixer::<K>::new();

        let a = tone(20_000.0, 2.0);
        let b = tone(-20_000.0, 2.0);
        let ramp: Vec<i16> = (0..AUDIO_BLOCK_SAMPLES)
            .map(|i| (i as i32 * control_unity.min(i16::MAX as i32) / (AUDIO_BLOCK_SAMPLES as i32 - 1)) as i16)
            .collect();

        ports.send_samples(INPUT_A, &a);
        ports.send_samples(INPUT_B, &b);
        ports.send_samples(INPUT_CONTROL, &ramp);
        assert_eq!(mixer.process(&pool), MixOutcome::Crossfade);

        let out = ports.receive().expect("mixed block");
        // Start follows A, end follows B, middle passes near zero
        assert_eq!(out[0], a[0]);
        assert!((out[AUDIO_BLOCK_SAMPLES - 1] as i32 - b[AUDIO_BLOCK_SAMPLES - 1] as i32).abs() <= 2);
        let mid = AUDIO_BLOCK_SAMPLES / 2;
        assert!(out[mid - 4..mid + 4].iter().all(|&s| (s as i32).abs() < 1_000));
    }

    run::<WideKernel>(WideKernel::CONTROL_UNITY);
    run::<NarrowKernel>(NarrowKernel::CONTROL_UNITY);
}

#[test]
fn blocks_cycle_without_growing() {
    let (pool, mut ports) = RingPool::new(2);
    let mut mixer: CrossfadeMixer = CrossfadeMixer::new();

    for round in 0..64 {
        assert!(ports.send_samples(INPUT_A, &[round as i16; 8]));
        assert!(ports.send_samples(INPUT_B, &[0; 8]));
        mixer.update(&pool);

        let out = ports.receive().expect("mixed block");
        assert_eq!(out[0], (round as i16) >> 1);
        ports.reclaim(out);
    }

    // One block parked as spare, one recycled B: the same two blocks all along
    assert_eq!(ports.recycled_len(), 1);
}
