//! Beat quantization.
//!
//! Source beats are floats; destination times are a whole beat plus an exact
//! fraction. The fraction is the best rational approximation of the float
//! with a bounded denominator, computed with continued fractions over the
//! float's exact binary value so no rounding happens along the way.

use tripsaber_format::RationalBeatTime;

use crate::error::ConvertError;

/// Fractions below this are always nearer to 0 than to `1/cap` for any
/// `u16` cap. Also keeps the binary denominator within `2^72`.
const ZERO_CUTOFF: f64 = 1.0 / (1u64 << 20) as f64;

/// Splits a beat into a whole beat and a reduced sub-beat fraction whose
/// denominator is at most `cap`.
///
/// Among all fractions with denominator `<= cap`, the one closest to the
/// input wins; ties go to the smaller denominator. A fraction that rounds up
/// to a whole beat carries into `beat`.
///
/// # Errors
/// `InvalidBeat` if `beat` is negative, not finite, or too large for a `u64`
/// whole beat, or if `cap` is zero.
///
/// # Example
/// ```
/// use tripsaber_convert::beat::split_beat;
///
/// let t = split_beat(5.5, 4).unwrap();
/// assert_eq!((t.beat, t.numerator, t.denominator), (5, 1, 2));
///
/// let t = split_beat(5.33333, 4).unwrap();
/// assert_eq!((t.beat, t.numerator, t.denominator), (5, 1, 3));
/// ```
pub fn split_beat(beat: f64, cap: u16) -> Result<RationalBeatTime, ConvertError> {
    if cap == 0 {
        return Err(ConvertError::InvalidBeat(
            "subdivision cap must be at least 1".to_string(),
        ));
    }
    if !beat.is_finite() {
        return Err(ConvertError::InvalidBeat(format!(
            "beat must be finite, got {}",
            beat
        )));
    }
    if beat < 0.0 {
        return Err(ConvertError::InvalidBeat(format!(
            "beat must not be negative, got {}",
            beat
        )));
    }

    let whole = beat.floor();
    if whole >= u64::MAX as f64 {
        return Err(ConvertError::InvalidBeat(format!(
            "beat too large, got {}",
            beat
        )));
    }
    let mut whole_beat = whole as u64;

    // Exact: floor and subtraction of the same float lose nothing.
    let (numerator, denominator) = limit_denominator(beat - whole, cap);

    if numerator == denominator {
        whole_beat += 1;
        return Ok(RationalBeatTime::whole(whole_beat));
    }

    Ok(RationalBeatTime {
        beat: whole_beat,
        numerator,
        denominator,
    })
}

/// Best approximation of `frac` in `[0, 1)` with denominator `<= cap`.
///
/// May return `(1, 1)` when `frac` is closer to one than to any smaller
/// fraction.
fn limit_denominator(frac: f64, cap: u16) -> (u32, u32) {
    if frac <= ZERO_CUTOFF {
        return (0, 1);
    }

    let (num, den) = exact_fraction(frac);
    let cap = u128::from(cap);

    // Convergents p0/q0 (previous) and p1/q1 (current).
    let (mut p0, mut q0, mut p1, mut q1) = (0u128, 1u128, 1u128, 0u128);
    let (mut n, mut d) = (num, den);
    loop {
        let a = n / d;
        let q2 = q0 + a * q1;
        if q2 > cap {
            break;
        }
        let p2 = p0 + a * p1;
        p0 = p1;
        q0 = q1;
        p1 = p2;
        q1 = q2;

        let r = n - a * d;
        n = d;
        d = r;
        if d == 0 {
            // Exact value reached within the cap
            return (p1 as u32, q1 as u32);
        }
    }

    // Best semiconvergent below the cap versus the last convergent.
    let k = (cap - q0) / q1;
    let (pb, qb) = (p0 + k * p1, q0 + k * q1);

    // |p/q - num/den| compared by cross-multiplying over the common den.
    let err_conv = (p1 * den).abs_diff(num * q1) * qb;
    let err_semi = (pb * den).abs_diff(num * qb) * q1;

    let use_semi = err_semi < err_conv || (err_semi == err_conv && qb < q1);
    if use_semi {
        (pb as u32, qb as u32)
    } else {
        (p1 as u32, q1 as u32)
    }
}

/// Exact `num / den` of a normal positive float below one, in lowest terms
/// with `den` a power of two.
fn exact_fraction(frac: f64) -> (u128, u128) {
    let bits = frac.to_bits();
    let mantissa = (bits & ((1u64 << 52) - 1)) | (1u64 << 52);
    let exponent = ((bits >> 52) & 0x7ff) as i32 - 1075;

    // frac < 1 so exponent <= -53; the zero cutoff keeps it >= -72.
    let mut shift = (-exponent) as u32;
    let mut num = u128::from(mantissa);
    let tz = num.trailing_zeros().min(shift);
    num >>= tz;
    shift -= tz;

    (num, 1u128 << shift)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(t: RationalBeatTime) -> (u64, u32, u32) {
        (t.beat, t.numerator, t.denominator)
    }

    #[test]
    fn test_whole_beat() {
        assert_eq!(parts(split_beat(5.0, 4).unwrap()), (5, 0, 1));
        assert_eq!(parts(split_beat(0.0, 4).unwrap()), (0, 0, 1));
    }

    #[test]
    fn test_half_beat() {
        assert_eq!(parts(split_beat(5.5, 4).unwrap()), (5, 1, 2));
    }

    #[test]
    fn test_thirds_within_cap() {
        assert_eq!(parts(split_beat(5.33333, 4).unwrap()), (5, 1, 3));
        assert_eq!(parts(split_beat(2.0 / 3.0, 4).unwrap()), (0, 2, 3));
        assert_eq!(parts(split_beat(0.375, 4).unwrap()), (0, 1, 3));
    }

    #[test]
    fn test_third_with_small_cap() {
        // 1/2 is nearer than 0 when thirds are not allowed
        assert_eq!(parts(split_beat(5.33333, 2).unwrap()), (5, 1, 2));
        assert_eq!(parts(split_beat(5.33333, 1).unwrap()), (5, 0, 1));
    }

    #[test]
    fn test_tie_goes_to_smaller_denominator() {
        // 0.125 is equidistant from 0/1 and 1/4
        assert_eq!(parts(split_beat(3.125, 4).unwrap()), (3, 0, 1));
        // 0.75 is equidistant from 1/2 and 1/1 with cap 2
        assert_eq!(parts(split_beat(0.75, 2).unwrap()), (1, 0, 1));
    }

    #[test]
    fn test_rounds_up_into_next_beat() {
        assert_eq!(parts(split_beat(6.95, 4).unwrap()), (7, 0, 1));
        assert_eq!(parts(split_beat(0.999_999, 16).unwrap()), (1, 0, 1));
    }

    #[test]
    fn test_exact_binary_fractions() {
        assert_eq!(parts(split_beat(12.25, 4).unwrap()), (12, 1, 4));
        assert_eq!(parts(split_beat(12.75, 4).unwrap()), (12, 3, 4));
        assert_eq!(parts(split_beat(1.0625, 16).unwrap()), (1, 1, 16));
        assert_eq!(parts(split_beat(1.0625, 8).unwrap()), (1, 0, 1));
    }

    #[test]
    fn test_tiny_fraction_is_zero() {
        assert_eq!(parts(split_beat(4.0 + 1e-12, 4).unwrap()), (4, 0, 1));
        assert_eq!(parts(split_beat(f64::MIN_POSITIVE, 4).unwrap()), (0, 0, 1));
    }

    #[test]
    fn test_large_cap() {
        let t = split_beat(std::f64::consts::PI, u16::MAX).unwrap();
        assert_eq!(t.beat, 3);
        assert!(u32::from(u16::MAX) >= t.denominator);
        assert!((t.as_f64() - std::f64::consts::PI).abs() < 1e-8);
        // 355/113 is the classic convergent; with cap 200 it must be picked
        assert_eq!(parts(split_beat(std::f64::consts::PI, 200).unwrap()), (3, 16, 113));
    }

    #[test]
    fn test_negative_beat_rejected() {
        assert!(matches!(
            split_beat(-0.5, 4),
            Err(ConvertError::InvalidBeat(_))
        ));
    }

    #[test]
    fn test_non_finite_beat_rejected() {
        assert!(matches!(
            split_beat(f64::NAN, 4),
            Err(ConvertError::InvalidBeat(_))
        ));
        assert!(matches!(
            split_beat(f64::INFINITY, 4),
            Err(ConvertError::InvalidBeat(_))
        ));
    }

    #[test]
    fn test_zero_cap_rejected() {
        assert!(matches!(split_beat(1.0, 0), Err(ConvertError::InvalidBeat(_))));
    }

    #[test]
    fn test_result_is_reduced_and_bounded() {
        for cap in 1..=12u16 {
            for i in 0..400 {
                let beat = i as f64 * 0.0371;
                let t = split_beat(beat, cap).unwrap();
                assert!(t.denominator >= 1);
                assert!(t.denominator <= u32::from(cap));
                assert!(t.numerator < t.denominator || (t.numerator, t.denominator) == (0, 1));
                assert_eq!(gcd(t.numerator, t.denominator), 1, "{:?}", t);
            }
        }
    }

    #[test]
    fn test_result_is_nearest() {
        for cap in 1..=8u16 {
            for i in 0..200 {
                let beat = i as f64 * 0.0173;
                let t = split_beat(beat, cap).unwrap();
                let err = (t.as_f64() - beat).abs();
                for q in 1..=u32::from(cap) {
                    let p = (beat * q as f64).round();
                    let candidate_err = (p / q as f64 - beat).abs();
                    assert!(
                        err <= candidate_err + 1e-12,
                        "beat {} cap {}: got {:?}, {}/{} is closer",
                        beat,
                        cap,
                        t,
                        p,
                        q
                    );
                }
            }
        }
    }

    #[test]
    fn test_split_is_idempotent() {
        for cap in [1u16, 2, 3, 4, 6, 8, 12, 16] {
            for i in 0..300 {
                let beat = i as f64 * 0.1234567;
                let first = split_beat(beat, cap).unwrap();
                let second = split_beat(first.as_f64(), cap).unwrap();
                assert_eq!(first, second, "beat {} cap {}", beat, cap);
            }
        }
    }

    fn gcd(mut a: u32, mut b: u32) -> u32 {
        while b != 0 {
            let t = a % b;
            a = b;
            b = t;
        }
        a
    }
}
