//! Saturating and packed half-word arithmetic.

/*
Packed Half-Word Arithmetic
===========================

A 32-bit word holds two 16-bit samples ("lanes"):

    bits 31..16   top lane     (second sample)
    bits 15..0    bottom lane  (first sample)

The Cortex-M4 DSP extension operates on both lanes with one instruction.
These functions are portable, bit-exact versions of the ones the wide
kernel uses, so it runs (and is tested) on any host:

    SMULWB   signed_multiply_32x16b   (a × bottom) >> 16, 48-bit product
    SMULWT   signed_multiply_32x16t   (a × top) >> 16, 48-bit product
             *_round variants add 0x7FFF to the product before the shift
    SSAT     signed_saturate_rshift   shift right, clamp to N signed bits
    PKHBT    pack_16b_16b             two low half-words into one word
    QADD16   signed_add_16_and_16     per-lane saturating add

Shifts are arithmetic, so the plain multiplies round toward negative infinity.
The rounding variants round to nearest with ties going down, which keeps the
error of a two-term mix under one LSB.
*/

/// Clamp a 32-bit value to the `i16` range.
#[inline(always)]
pub fn saturate16(val: i32) -> i16 {
    val.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

/// Arithmetic shift right by `rshift`, then clamp to a signed `bits`-wide range.
#[inline(always)]
pub fn signed_saturate_rshift(val: i32, bits: u32, rshift: u32) -> i32 {
    debug_assert!((1..=32).contains(&bits));
    debug_assert!(rshift < 32);

    let max = (1i64 << (bits - 1)) - 1;
    let min = -(1i64 << (bits - 1));
    i64::from(val >> rshift).clamp(min, max) as i32
}

/// Multiply `a` by the signed bottom half-word of `b`, keeping the upper 32
/// bits of the 48-bit product.
#[inline(always)]
pub fn signed_multiply_32x16b(a: i32, b: u32) -> i32 {
    ((i64::from(a) * i64::from(b as u16 as i16)) >> 16) as i32
}

/// Multiply `a` by the signed top half-word of `b`, keeping the upper 32 bits
/// of the 48-bit product.
#[inline(always)]
pub fn signed_multiply_32x16t(a: i32, b: u32) -> i32 {
    ((i64::from(a) * i64::from((b >> 16) as u16 as i16)) >> 16) as i32
}

/// Bias added to a Q16 product before the shift: round to nearest, ties down.
pub const ROUND_BIAS_Q16: i64 = (1 << 15) - 1;

/// [`signed_multiply_32x16b`] rounded to nearest (ties toward negative infinity).
#[inline(always)]
pub fn signed_multiply_32x16b_round(a: i32, b: u32) -> i32 {
    ((i64::from(a) * i64::from(b as u16 as i16) + ROUND_BIAS_Q16) >> 16) as i32
}

/// [`signed_multiply_32x16t`] rounded to nearest (ties toward negative infinity).
#[inline(always)]
pub fn signed_multiply_32x16t_round(a: i32, b: u32) -> i32 {
    ((i64::from(a) * i64::from((b >> 16) as u16 as i16) + ROUND_BIAS_Q16) >> 16) as i32
}

/// Pack the low half-words of `top` and `bottom` into one word.
#[inline(always)]
pub fn pack_16b_16b(top: i32, bottom: i32) -> u32 {
    ((top as u32) << 16) | (bottom as u32 & 0xFFFF)
}

/// Saturating add of each lane of `a` and `b`.
#[inline(always)]
pub fn signed_add_16_and_16(a: u32, b: u32) -> u32 {
    let [a_bottom, a_top] = unpack_pair(a);
    let [b_bottom, b_top] = unpack_pair(b);
    pack_pair([a_bottom.saturating_add(b_bottom), a_top.saturating_add(b_top)])
}

/// Pack two consecutive samples into a word, first sample in the bottom lane.
#[inline(always)]
pub fn pack_pair(pair: [i16; 2]) -> u32 {
    u32::from(pair[0] as u16) | (u32::from(pair[1] as u16) << 16)
}

/// Inverse of [`pack_pair`].
#[inline(always)]
pub fn unpack_pair(word: u32) -> [i16; 2] {
    [word as u16 as i16, (word >> 16) as u16 as i16]
}
