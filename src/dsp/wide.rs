//! Q16 kernel for targets with a 32x16 multiply and packed half-word adds.
//!
//! Samples are processed in pairs: both lanes of a 32-bit word are scaled,
//! saturated, repacked and added with a single saturating lane add. A trailing
//! odd sample (short test blocks) falls back to [`mix_sample_wide`], which the
//! packed path matches bit for bit.

use super::{
    intrinsics::{
        pack_16b_16b, pack_pair, saturate16, signed_add_16_and_16,
        signed_multiply_32x16b_round, signed_multiply_32x16t_round, signed_saturate_rshift,
        unpack_pair, ROUND_BIAS_Q16,
    },
    kernel::GainKernel,
};

const UNITY: i32 = 1 << 16;
const HALF: i32 = UNITY / 2;

/// Two samples per word, `UNITY_GAIN = 65536`, Q15 control samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct WideKernel;

/// Scalar form of the wide mix for one sample with multiplier `gain`.
#[inline]
pub fn mix_sample_wide(a: i16, b: i16, gain: i32) -> i16 {
    let part_a = (i64::from(a) * i64::from(UNITY - gain) + ROUND_BIAS_Q16) >> 16;
    let part_b = (i64::from(b) * i64::from(gain) + ROUND_BIAS_Q16) >> 16;
    let part_a = saturate16(part_a as i32);
    let part_b = saturate16(part_b as i32);
    saturate16(i32::from(part_a) + i32::from(part_b))
}

/// Scale both lanes of `word`: bottom by `mult_bottom`, top by `mult_top`.
#[inline(always)]
fn scale_pair(mult_bottom: i32, mult_top: i32, word: u32) -> u32 {
    let bottom = signed_saturate_rshift(signed_multiply_32x16b_round(mult_bottom, word), 16, 0);
    let top = signed_saturate_rshift(signed_multiply_32x16t_round(mult_top, word), 16, 0);
    pack_16b_16b(top, bottom)
}

#[inline(always)]
fn load_pair(pair: &[i16]) -> u32 {
    pack_pair([pair[0], pair[1]])
}

#[inline(always)]
fn store_pair(pair: &mut [i16], word: u32) {
    let [bottom, top] = unpack_pair(word);
    pair[0] = bottom;
    pair[1] = top;
}

impl GainKernel for WideKernel {
    const NAME: &'static str = "wide";
    const SHIFT: u32 = 16;
    const CONTROL_UNITY: i32 = 1 << 15;

    #[inline(always)]
    fn gain_from_control(control: i16) -> i32 {
        i32::from(control) << 1
    }

    fn apply_gain_const(dst: &mut [i16], src: &[i16]) {
        debug_assert_eq!(dst.len(), src.len());

        let mut dst_pairs = dst.chunks_exact_mut(2);
        let mut src_pairs = src.chunks_exact(2);

        for (d, s) in (&mut dst_pairs).zip(&mut src_pairs) {
            let b = scale_pair(HALF, HALF, load_pair(s));
            let a = scale_pair(HALF, HALF, load_pair(d));
            store_pair(d, signed_add_16_and_16(b, a));
        }

        for (d, &s) in dst_pairs
            .into_remainder()
            .iter_mut()
            .zip(src_pairs.remainder())
        {
            *d = mix_sample_wide(*d, s, HALF);
        }
    }

    fn apply_gain_xf(dst: &mut [i16], src: &[i16], ctrl: &[i16]) {
        debug_assert_eq!(dst.len(), src.len());
        debug_assert_eq!(dst.len(), ctrl.len());

        let mut dst_pairs = dst.chunks_exact_mut(2);
        let mut src_pairs = src.chunks_exact(2);
        let mut ctrl_pairs = ctrl.chunks_exact(2);

        for ((d, s), c) in (&mut dst_pairs).zip(&mut src_pairs).zip(&mut ctrl_pairs) {
            let gain_bottom = Self::gain_from_control(c[0]);
            let gain_top = Self::gain_from_control(c[1]);

            let a = scale_pair(UNITY - gain_bottom, UNITY - gain_top, load_pair(d));
            let b = scale_pair(gain_bottom, gain_top, load_pair(s));
            store_pair(d, signed_add_16_and_16(a, b));
        }

        let tail = src_pairs.remainder().iter().zip(ctrl_pairs.remainder());
        for (d, (&s, &c)) in dst_pairs.into_remainder().iter_mut().zip(tail) {
            *d = mix_sample_wide(*d, s, Self::gain_from_control(c));
        }
    }
}
