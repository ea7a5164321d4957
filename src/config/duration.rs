//! Duration strings such as `10s`, `1m30s`, `250ms` or `1.5h`.
//!
//! A duration is one or more `<decimal number><unit>` terms with no
//! separators; units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`.
//! A bare `0` is accepted. Signs are rejected since a negative probe
//! timeout has no meaning.

use std::time::Duration;

use crate::error::HealthCheckError;

pub const DEFAULT_TIMEOUT: &str = "10s";

const UNITS: &[(&str, u128)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("µs", 1_000),
    ("μs", 1_000),
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60_000_000_000),
    ("h", 3_600_000_000_000),
];

pub fn parse_duration(input: &str) -> Result<Duration, HealthCheckError> {
    let invalid = |reason: &str| HealthCheckError::InvalidDuration {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    if input == "0" {
        return Ok(Duration::ZERO);
    }
    if input.is_empty() {
        return Err(invalid("empty duration"));
    }
    if input.starts_with(['-', '+']) {
        return Err(invalid("sign is not allowed"));
    }

    let mut total: u128 = 0;
    let mut rest = input;

    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);
        if number.is_empty() || number == "." || number.matches('.').count() > 1 {
            return Err(invalid("expected a number"));
        }

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        if unit.is_empty() {
            return Err(invalid("missing unit"));
        }
        let Some(&(_, nanos_per_unit)) = UNITS.iter().find(|(name, _)| *name == unit) else {
            return Err(invalid(&format!("unknown unit '{unit}'")));
        };

        total = total
            .checked_add(scale(number, nanos_per_unit).ok_or_else(|| invalid("overflow"))?)
            .ok_or_else(|| invalid("overflow"))?;
        rest = tail;
    }

    let nanos = u64::try_from(total).map_err(|_| invalid("overflow"))?;
    Ok(Duration::from_nanos(nanos))
}

/// `number` × `nanos_per_unit`, keeping fractional digits exact down to
/// one nanosecond.
fn scale(number: &str, nanos_per_unit: u128) -> Option<u128> {
    let (whole, frac) = number.split_once('.').unwrap_or((number, ""));

    let whole: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut nanos = whole.checked_mul(nanos_per_unit)?;

    let mut divisor: u128 = 1;
    let mut frac_value: u128 = 0;
    for digit in frac.chars().take(18) {
        frac_value = frac_value * 10 + u128::from(digit.to_digit(10)?);
        divisor *= 10;
    }
    nanos = nanos.checked_add(frac_value.checked_mul(nanos_per_unit)? / divisor)?;
    Some(nanos)
}
