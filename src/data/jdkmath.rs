// src/data/jdkmath.rs

//! Exact conversions between the time units found in GC logs.
//!
//! Logged times are decimal text (`0.0224830`, `1.767`, `0,01`). Converting
//! through floating point would drift, so the text is scaled as a decimal
//! integer and rounded half-to-even, the same rounding a JDK `BigDecimal`
//! uses for `HALF_EVEN`.

use crate::common::{Centis, Micros, Millis, Nanos, Parallelism, PARALLELISM_MAX, PARALLELISM_UNITY};

use std::io::{Error, ErrorKind, Result};

use ::si_trace_print::{defn, defx};

/// Round `quotient` (with `remainder` of `divisor`) half-to-even.
const fn round_half_even(
    quotient: u128,
    remainder: u128,
    divisor: u128,
) -> u128 {
    let twice: u128 = remainder * 2;
    if twice > divisor || (twice == divisor && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

/// Parse decimal `text` (separator `.` or `,`) and return its value times
/// `10^scale`, rounded half-to-even.
pub fn parse_decimal_scaled(
    text: &str,
    scale: u32,
) -> Result<i64> {
    defn!("({:?}, {})", text, scale);
    let text: &str = text.trim();
    let (whole, frac): (&str, &str) = match text.find(|c: char| c == '.' || c == ',') {
        Some(at) => (&text[..at], &text[at + 1..]),
        None => (text, ""),
    };
    let bad = || Error::new(ErrorKind::InvalidData, format!("bad decimal {:?}", text));
    if whole.is_empty() && frac.is_empty() {
        defx!("empty");
        return Err(bad());
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        defx!("not digits");
        return Err(bad());
    }
    if whole.len() + frac.len() > 30 {
        defx!("too long");
        return Err(bad());
    }
    let whole_v: u128 = if whole.is_empty() { 0 } else { whole.parse::<u128>().map_err(|_| bad())? };
    let frac_v: u128 = if frac.is_empty() { 0 } else { frac.parse::<u128>().map_err(|_| bad())? };
    let frac_len: u32 = frac.len() as u32;
    let scaled: u128 = if frac_len <= scale {
        whole_v * 10u128.pow(scale) + frac_v * 10u128.pow(scale - frac_len)
    } else {
        let divisor: u128 = 10u128.pow(frac_len - scale);
        let numerator: u128 = whole_v * 10u128.pow(frac_len) + frac_v;
        round_half_even(numerator / divisor, numerator % divisor, divisor)
    };
    if scaled > i64::MAX as u128 {
        defx!("overflow");
        return Err(bad());
    }
    defx!("return {}", scaled);

    Ok(scaled as i64)
}

/// Seconds text (e.g. `0.0224830`) to microseconds.
pub fn convert_secs_to_micros(secs: &str) -> Result<Micros> {
    parse_decimal_scaled(secs, 6)
}

/// Milliseconds text (e.g. `1.767`) to microseconds.
pub fn convert_millis_to_micros(millis: &str) -> Result<Micros> {
    parse_decimal_scaled(millis, 3)
}

/// Seconds text (e.g. `7.944`) to milliseconds.
pub fn convert_secs_to_millis(secs: &str) -> Result<Millis> {
    parse_decimal_scaled(secs, 3)
}

/// Seconds text (e.g. `0.01`) to centiseconds.
pub fn convert_secs_to_centis(secs: &str) -> Result<Centis> {
    let centis: i64 = parse_decimal_scaled(secs, 2)?;
    Centis::try_from(centis)
        .map_err(|_| Error::new(ErrorKind::InvalidData, format!("CPU time out of range {:?}", secs)))
}

/// Microseconds to milliseconds, truncating.
pub const fn convert_micros_to_millis(micros: Micros) -> Millis {
    micros / 1000
}

/// Nanoseconds to microseconds, rounded half-to-even.
pub const fn convert_nanos_to_micros(nanos: Nanos) -> Micros {
    round_half_even(nanos as u128 / 1000, nanos as u128 % 1000, 1000) as Micros
}

/// Percentage of CPU time to wall clock time, `(user + sys) / real * 100`,
/// rounded half-to-even.
///
/// When `real` is zero the ratio is undefined: it is [`PARALLELISM_MAX`] if
/// any CPU time was used, otherwise [`PARALLELISM_UNITY`].
pub fn calc_parallelism(
    user: Centis,
    sys: Centis,
    real: Centis,
) -> Parallelism {
    let cpu: i64 = user as i64 + sys as i64;
    if real <= 0 {
        if cpu > 0 {
            return PARALLELISM_MAX;
        }
        return PARALLELISM_UNITY;
    }
    let numerator: u128 = (cpu.max(0) as u128) * 100;
    let real: u128 = real as u128;
    let parallelism: u128 = round_half_even(numerator / real, numerator % real, real);

    Parallelism::try_from(parallelism).unwrap_or(PARALLELISM_MAX)
}

/// Does `parallelism` fall below the low-parallelism `threshold`?
///
/// [`PARALLELISM_MAX`] never counts as inverted.
pub const fn is_inverted_parallelism(
    parallelism: Parallelism,
    threshold: Parallelism,
) -> bool {
    parallelism != PARALLELISM_MAX && parallelism < threshold
}
