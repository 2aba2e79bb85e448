//! The gain-application interface shared by both datapaths.

/*
Mix Equation
============

For every sample index i:

    out[i] = sat16( a[i] × (UNITY - g[i]) / UNITY  +  b[i] × g[i] / UNITY )

    a       destination block, also the first input
    b       second input
    g[i]    per-sample gain taken from the control block
            (UNITY / 2 when there is no control block)

Each partial product is rounded to nearest with ties going down (a bias of
UNITY/2 - 1 is added before the arithmetic shift) and saturated to 16 bits,
then the two partials are added with saturation. Results never wrap, and for
controls in [0, unity] they stay within one LSB of the exact mix.

Control samples are NOT clamped. A negative control makes (UNITY - g) larger
than UNITY and b's weight negative; a control above unity does the opposite.
The output stays in range because every step saturates.


Two Datapaths
-------------

  wide     UNITY = 65536 (Q16). Control samples are Q15, so the multiplier is
           control << 1. Two samples are processed per 32-bit word.

  narrow   UNITY = 256 (Q8). Control samples are used as-is. One sample at a
           time with 32-bit products only.

The two are each self-consistent but not bit-compatible with one another.
Exactly one is the build's `ActiveKernel`, chosen with Cargo features.
*/

#[cfg(feature = "narrow-datapath")]
use super::narrow::NarrowKernel;
#[cfg(all(feature = "wide-datapath", not(feature = "narrow-datapath")))]
use super::wide::WideKernel;

#[cfg(not(any(feature = "wide-datapath", feature = "narrow-datapath")))]
compile_error!("enable one of the `wide-datapath` or `narrow-datapath` features");

/// A fixed-point implementation of the constant and crossfade mixes.
///
/// Implementations are stateless; all buffers must have the same length.
pub trait GainKernel {
    /// Short label for diagnostics.
    const NAME: &'static str;
    /// log2 of [`GainKernel::UNITY_GAIN`].
    const SHIFT: u32;
    /// Multiplier value meaning a gain of 1.0.
    const UNITY_GAIN: i32 = 1 << Self::SHIFT;
    /// Control sample value meaning "all of input B".
    const CONTROL_UNITY: i32;

    /// Convert a control sample to a multiplier in `UNITY_GAIN` scale.
    fn gain_from_control(control: i16) -> i32;

    /// `dst[i] = sat16(dst[i] × 0.5 + src[i] × 0.5)`.
    fn apply_gain_const(dst: &mut [i16], src: &[i16]);

    /// `dst[i] = sat16(dst[i] × (1 - g) + src[i] × g)` with `g` from `ctrl[i]`.
    fn apply_gain_xf(dst: &mut [i16], src: &[i16], ctrl: &[i16]);
}

/// The kernel selected by the `narrow-datapath` / `wide-datapath` features.
#[cfg(feature = "narrow-datapath")]
pub type ActiveKernel = NarrowKernel;

/// The kernel selected by the `narrow-datapath` / `wide-datapath` features.
#[cfg(all(feature = "wide-datapath", not(feature = "narrow-datapath")))]
pub type ActiveKernel = WideKernel;

/// Copy `ctrl` into `out`, limiting each value to `[0, K::CONTROL_UNITY]`.
///
/// The upper bound is capped at `i16::MAX` where the control unity does not
/// fit in a sample.
#[inline]
pub fn clamp_control<K: GainKernel>(ctrl: &[i16], out: &mut [i16]) {
    debug_assert_eq!(ctrl.len(), out.len());

    let upper = K::CONTROL_UNITY.min(i16::MAX as i32) as i16;
    for (o, &c) in out.iter_mut().zip(ctrl.iter()) {
        *o = c.clamp(0, upper);
    }
}
