//! Q8 kernel for targets without a wide multiply.
//!
//! One sample per step, every product fits in 32 bits: a full-scale sample
//! (2^15) times the largest multiplier an `i16` control can produce
//! (256 + 32768) stays below 2^31.

use super::{intrinsics::saturate16, kernel::GainKernel};

const SHIFT: u32 = 8;
const UNITY: i32 = 1 << SHIFT;
const HALF: i32 = UNITY / 2;
// Round to nearest, ties down
const ROUND_BIAS: i32 = HALF - 1;

/// One sample at a time, `UNITY_GAIN = 256`, control samples used directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct NarrowKernel;

/// Scalar narrow mix for one sample with multiplier `gain`.
#[inline(always)]
pub fn mix_sample_narrow(a: i16, b: i16, gain: i32) -> i16 {
    let part_a = saturate16((i32::from(a) * (UNITY - gain) + ROUND_BIAS) >> SHIFT);
    let part_b = saturate16((i32::from(b) * gain + ROUND_BIAS) >> SHIFT);
    saturate16(i32::from(part_a) + i32::from(part_b))
}

impl GainKernel for NarrowKernel {
    const NAME: &'static str = "narrow";
    const SHIFT: u32 = SHIFT;
    const CONTROL_UNITY: i32 = UNITY;

    #[inline(always)]
    fn gain_from_control(control: i16) -> i32 {
        i32::from(control)
    }

    fn apply_gain_const(dst: &mut [i16], src: &[i16]) {
        debug_assert_eq!(dst.len(), src.len());

        for (d, &s) in dst.iter_mut().zip(src.iter()) {
            *d = mix_sample_narrow(*d, s, HALF);
        }
    }

    fn apply_gain_xf(dst: &mut [i16], src: &[i16], ctrl: &[i16]) {
        debug_assert_eq!(dst.len(), src.len());
        debug_assert_eq!(dst.len(), ctrl.len());

        for ((d, &s), &c) in dst.iter_mut().zip(src.iter()).zip(ctrl.iter()) {
            *d = mix_sample_narrow(*d, s, Self::gain_from_control(c));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::kernel::sweep::{exact_mix, random_block, EDGE_SAMPLES};
    use crate::AUDIO_BLOCK_SAMPLES;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn test_constant_mix_reference_block() {
        let mut a = [100, -100, 0, 32767];
        let b = [0, 100, 0, -32768];

        NarrowKernel::apply_gain_const(&mut a, &b);

        assert_eq!(a, [50, 0, 0, -1]);
    }

    #[test]
    fn test_constant_mix_within_one_lsb() {
        let mut rng = StdRng::seed_from_u64(0xA11C_0001);
        let mut pairs: Vec<(i16, i16)> = (0..20_000).map(|_| (rng.gen(), rng.gen())).collect();
        for &a in &EDGE_SAMPLES {
            for &b in &EDGE_SAMPLES {
                pairs.push((a, b));
            }
        }

        for (a, b) in pairs {
            let mut dst = [a];
            NarrowKernel::apply_gain_const(&mut dst, &[b]);

            let expected = (a as f64 * 0.5 + b as f64 * 0.5).round();
            assert!(
                (dst[0] as f64 - expected).abs() <= 1.0,
                "a={} b={} got {} expected ~{}",
                a,
                b,
                dst[0],
                expected
            );
        }
    }

    #[test]
    fn test_crossfade_within_one_lsb() {
        let mut rng = StdRng::seed_from_u64(0xA11C_0002);
        let mut cases: Vec<(i16, i16, i16)> = (0..20_000)
            .map(|_| (rng.gen(), rng.gen(), rng.gen_range(0..=UNITY as i16)))
            .collect();
        for &a in &EDGE_SAMPLES {
            for &b in &EDGE_SAMPLES {
                for c in [0, 1, 16, 64, 128, 255, 256] {
                    cases.push((a, b, c));
                }
            }
        }

        for (a, b, c) in cases {
            let mut dst = [a];
            NarrowKernel::apply_gain_xf(&mut dst, &[b], &[c]);

            let reference = exact_mix(a, b, c as i32, NarrowKernel::CONTROL_UNITY);
            assert!(
                (dst[0] as f64 - reference).abs() <= 1.0,
                "a={} b={} c={} got {} exact {}",
                a,
                b,
                c,
                dst[0],
                reference
            );
        }
    }

    #[test]
    fn test_crossfade_small_control_regression() {
        // Exact value is 17265.5; a plain floor on both partials lands at 17264
        let mut dst = [19_285];
        NarrowKernel::apply_gain_xf(&mut dst, &[-13_027], &[16]);

        assert_eq!(dst, [17_266]);
    }

    #[test]
    fn test_zero_control_keeps_input_a() {
        let mut rng = StdRng::seed_from_u64(0xA11C_0003);
        let a = random_block(&mut rng, AUDIO_BLOCK_SAMPLES);
        let b = random_block(&mut rng, AUDIO_BLOCK_SAMPLES);

        let mut dst = a.clone();
        NarrowKernel::apply_gain_xf(&mut dst, &b, &[0; AUDIO_BLOCK_SAMPLES]);

        assert_eq!(dst, a);
    }

    #[test]
    fn test_unity_control_forwards_input_b() {
        let mut rng = StdRng::seed_from_u64(0xA11C_0004);
        let a = random_block(&mut rng, AUDIO_BLOCK_SAMPLES);
        let b = random_block(&mut rng, AUDIO_BLOCK_SAMPLES);

        let mut dst = a.clone();
        NarrowKernel::apply_gain_xf(&mut dst, &b, &[UNITY as i16; AUDIO_BLOCK_SAMPLES]);

        assert_eq!(dst, b);
    }

    #[test]
    fn test_out_of_range_control_saturates() {
        // Control -1.0: weights become (2.0, -1.0)
        let mut dst = [30_000, -30_000];
        NarrowKernel::apply_gain_xf(&mut dst, &[-30_000, 30_000], &[-256, -256]);
        assert_eq!(dst, [32767, -32768]);

        // Control 2.0: weights become (-1.0, 2.0)
        let mut dst = [-30_000, 30_000];
        NarrowKernel::apply_gain_xf(&mut dst, &[30_000, -30_000], &[512, 512]);
        assert_eq!(dst, [32767, -32768]);
    }

    #[test]
    fn test_extreme_controls_do_not_overflow() {
        let controls = [i16::MIN, -1, 257, i16::MAX];
        for &a in &EDGE_SAMPLES {
            for &b in &EDGE_SAMPLES {
                for &c in &controls {
                    let mut dst = [a];
                    NarrowKernel::apply_gain_xf(&mut dst, &[b], &[c]);

                    // Same result as the 64-bit formula, so nothing wrapped
                    let g = i64::from(c);
                    let pa = ((i64::from(a) * (256 - g) + 127) >> 8).clamp(-32768, 32767);
                    let pb = ((i64::from(b) * g + 127) >> 8).clamp(-32768, 32767);
                    assert_eq!(i64::from(dst[0]), (pa + pb).clamp(-32768, 32767));
                }
            }
        }
    }

    #[test]
    fn test_half_control_matches_constant_mix() {
        let mut rng = StdRng::seed_from_u64(0xA11C_0005);
        let a = random_block(&mut rng, AUDIO_BLOCK_SAMPLES);
        let b = random_block(&mut rng, AUDIO_BLOCK_SAMPLES);

        let mut xf = a.clone();
        NarrowKernel::apply_gain_xf(&mut xf, &b, &[HALF as i16; AUDIO_BLOCK_SAMPLES]);
        let mut constant = a.clone();
        NarrowKernel::apply_gain_const(&mut constant, &b);

        assert_eq!(xf, constant);
    }
}
