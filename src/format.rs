//! Human-readable quantities and durations.
//!
//! Amounts are shown as mixed fractions ("1 and 1/2") approximated to a
//! fixed resolution, cooking times as "X hr Y mins".

use crate::model::Cell;

/// Default fraction resolution: eighths
pub const DEFAULT_PRECISION: f64 = 1.0 / 8.0;

/// Format `value` as a mixed fraction with denominators up to 8.
pub fn to_mixed_fraction(value: f64) -> String {
    to_mixed_fraction_with_precision(value, DEFAULT_PRECISION)
}

/// Format `value` as the closest fraction whose denominator is at most
/// `1 / precision`, split into whole part and proper remainder.
///
/// Zero and exact integers print without a fractional part. Inputs the
/// approximation cannot represent (negative, NaN, infinite) print as the
/// plain decimal.
pub fn to_mixed_fraction_with_precision(value: f64, precision: f64) -> String {
    let max_denominator = if precision.is_finite() && precision > 0.0 {
        ((1.0 / precision) as u128).max(1)
    } else {
        1
    };

    if !value.is_finite() || value < 0.0 {
        return value.to_string();
    }
    let Some((numerator, denominator)) = exact_ratio(value) else {
        // Larger than any ratio we track exactly, so already an integer
        return format!("{:.0}", value);
    };

    let (numerator, denominator) = limit_denominator(numerator, denominator, max_denominator);
    let whole = numerator / denominator;
    let remainder = numerator % denominator;

    if remainder == 0 {
        return whole.to_string();
    }
    let divisor = gcd(remainder, denominator);
    let fraction = format!("{}/{}", remainder / divisor, denominator / divisor);
    if whole == 0 {
        fraction
    } else {
        format!("{} and {}", whole, fraction)
    }
}

/// Round to two decimal places.
///
/// Works on the exact binary value, so only true ties (0.125, 0.625, ...)
/// go half-to-even; 2.675 is stored just below the tie and rounds down.
pub fn round_hundredths(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let Some((numerator, denominator)) = exact_ratio(value.abs()) else {
        return value;
    };
    if numerator == 0 {
        return 0.0_f64.copysign(value);
    }
    if denominator == 1 {
        return value;
    }

    // denominator > 1 keeps numerator below 2^53, so the product fits
    let scaled = numerator * 100;
    let mut hundredths = scaled / denominator;
    let twice_remainder = 2 * (scaled % denominator);
    if twice_remainder > denominator || (twice_remainder == denominator && hundredths % 2 == 1)
    {
        hundredths += 1;
    }

    (hundredths as f64 / 100.0).copysign(value)
}

/// Format a minute count as "<h> hr[s] <m> min[s]".
///
/// The value is rounded half-to-even to whole minutes. Units are pluralised
/// only above one, zero components are omitted and zero overall yields an
/// empty string. A cell that is not numeric is returned as its raw text.
pub fn format_time(minutes: &Cell) -> String {
    let Some(total) = minutes
        .as_number()
        .map(f64::round_ties_even)
        .filter(|m| m.is_finite() && m.abs() < i64::MAX as f64)
    else {
        return minutes.to_string();
    };

    let total = total as i64;
    let hours = total.div_euclid(60);
    let mins = total.rem_euclid(60);

    let mut parts = Vec::with_capacity(2);
    if hours != 0 {
        parts.push(format!("{} hr{}", hours, if hours > 1 { "s" } else { "" }));
    }
    if mins != 0 {
        parts.push(format!("{} min{}", mins, if mins > 1 { "s" } else { "" }));
    }
    parts.join(" ")
}

/// Exact binary value of a non-negative finite float as a reduced ratio.
///
/// Returns `None` for values too large to hold in `u128`; values too small
/// to hold collapse to zero.
fn exact_ratio(value: f64) -> Option<(u128, u128)> {
    if value == 0.0 {
        return Some((0, 1));
    }
    let bits = value.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = (bits & ((1u64 << 52) - 1)) as u128;
    let (mut mantissa, exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u128 << 52), biased - 1075)
    };

    if exponent >= 0 {
        if exponent > 74 {
            return None;
        }
        return Some((mantissa << exponent, 1));
    }

    let mut shift = exponent.unsigned_abs();
    let trailing = mantissa.trailing_zeros().min(shift);
    mantissa >>= trailing;
    shift -= trailing;
    if shift > 126 {
        return Some((0, 1));
    }
    Some((mantissa, 1u128 << shift))
}

/// Closest ratio to `numerator / denominator` with denominator at most
/// `max_denominator`, via continued-fraction convergents and semiconvergents.
/// On a tie the convergent is preferred.
fn limit_denominator(numerator: u128, denominator: u128, max_denominator: u128) -> (u128, u128) {
    if denominator <= max_denominator {
        return (numerator, denominator);
    }

    let (mut p0, mut q0, mut p1, mut q1) = (0u128, 1u128, 1u128, 0u128);
    let (mut n, mut d) = (numerator, denominator);
    loop {
        let a = n / d;
        let q2 = q0.saturating_add(a.saturating_mul(q1));
        if q2 > max_denominator {
            break;
        }
        (p0, q0, p1, q1) = (p1, q1, p0 + a * p1, q2);
        (n, d) = (d, n - a * d);
    }

    let k = (max_denominator - q0) / q1;
    let prefer_convergent = (q0 + k * q1)
        .checked_mul(d)
        .and_then(|v| v.checked_mul(2))
        .is_some_and(|v| v <= denominator);

    if prefer_convergent {
        (p1, q1)
    } else {
        (p0 + k * p1, q0 + k * q1)
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
