//! Duration strings in Go syntax (`250ms`, `2.5s`, `1m30s`).
//!
//! Accepted units: `ns`, `us` (also `µs`/`μs`), `ms`, `s`, `m`, `h`.
//! A bare `0` is allowed; any other number needs a unit. Negative durations
//! are rejected since a sleep bound cannot be negative.

use std::time::Duration;

/// Error returned by [`parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationParseError {
    #[error("empty duration")]
    Empty,
    #[error("negative duration {0:?}")]
    Negative(String),
    #[error("invalid duration {0:?}")]
    Invalid(String),
    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),
    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },
    #[error("duration {0:?} out of range")]
    Overflow(String),
}

const NANOS_PER_UNIT: &[(&str, u128)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("µs", 1_000),
    ("μs", 1_000),
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60 * 1_000_000_000),
    ("h", 3600 * 1_000_000_000),
];

/// Parse a Go-style duration string.
pub fn parse(input: &str) -> Result<Duration, DurationParseError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(DurationParseError::Empty);
    }

    let s = match s.as_bytes()[0] {
        b'-' => {
            let rest = &s[1..];
            // "-0" is still zero.
            if rest.chars().all(|c| c == '0') && !rest.is_empty() {
                return Ok(Duration::ZERO);
            }
            return Err(DurationParseError::Negative(input.to_string()));
        }
        b'+' => &s[1..],
        _ => s,
    };

    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() {
        return Err(DurationParseError::Invalid(input.to_string()));
    }

    let mut total: u128 = 0;
    let mut rest = s;
    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let int_part = &rest[..int_len];
        rest = &rest[int_len..];

        let mut frac_part = "";
        if let Some(after_dot) = rest.strip_prefix('.') {
            let frac_len = after_dot.bytes().take_while(u8::is_ascii_digit).count();
            frac_part = &after_dot[..frac_len];
            rest = &after_dot[frac_len..];
        }
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(DurationParseError::Invalid(input.to_string()));
        }

        let unit_len = rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() || *c == '.')
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let unit = &rest[..unit_len];
        rest = &rest[unit_len..];
        if unit.is_empty() {
            return Err(DurationParseError::MissingUnit(input.to_string()));
        }
        let scale = NANOS_PER_UNIT
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, nanos)| *nanos)
            .ok_or_else(|| DurationParseError::UnknownUnit {
                unit: unit.to_string(),
                input: input.to_string(),
            })?;

        let overflow = || DurationParseError::Overflow(input.to_string());
        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| overflow())?
        };
        let mut nanos = whole.checked_mul(scale).ok_or_else(overflow)?;

        // Fractions beyond nanosecond precision are truncated.
        let mut divisor: u128 = 1;
        let mut frac: u128 = 0;
        for digit in frac_part.bytes().take(20) {
            frac = frac * 10 + u128::from(digit - b'0');
            divisor *= 10;
        }
        nanos = nanos
            .checked_add(frac * scale / divisor)
            .ok_or_else(overflow)?;
        total = total.checked_add(nanos).ok_or_else(overflow)?;
    }

    let secs = u64::try_from(total / 1_000_000_000)
        .map_err(|_| DurationParseError::Overflow(input.to_string()))?;
    Ok(Duration::new(secs, (total % 1_000_000_000) as u32))
}

/// Format a duration in the compact form accepted by [`parse`].
pub fn format(d: Duration) -> String {
    if d.is_zero() {
        return "0s".to_string();
    }
    let nanos = d.as_nanos();
    if nanos % 1_000_000_000 == 0 {
        return format!("{}s", nanos / 1_000_000_000);
    }
    if nanos % 1_000_000 == 0 {
        let ms = nanos / 1_000_000;
        if ms >= 1000 {
            return format!("{}s", trim_decimal(ms, 3));
        }
        return format!("{}ms", ms);
    }
    if nanos % 1_000 == 0 {
        return format!("{}us", nanos / 1_000);
    }
    format!("{}ns", nanos)
}

fn trim_decimal(value: u128, places: u32) -> String {
    let scale = 10u128.pow(places);
    let frac = format!("{:0width$}", value % scale, width = places as usize);
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        format!("{}", value / scale)
    } else {
        format!("{}.{}", value / scale, frac)
    }
}

/// Serde adapter for `Duration` fields written as Go duration strings.
pub mod serde_str {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format(*d))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_forms() {
        assert_eq!(parse("250ms").unwrap(), Duration::from_millis(250));
        assert_eq!(parse("2500ms").unwrap(), Duration::from_millis(2500));
        assert_eq!(parse("2.5s").unwrap(), Duration::from_millis(2500));
        assert_eq!(parse("1m30s").unwrap(), Duration::from_secs(90));
        assert_eq!(parse("1h").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse("10us").unwrap(), Duration::from_micros(10));
        assert_eq!(parse("10µs").unwrap(), Duration::from_micros(10));
        assert_eq!(parse("7ns").unwrap(), Duration::from_nanos(7));
        assert_eq!(parse(".5s").unwrap(), Duration::from_millis(500));
        assert_eq!(parse("1.s").unwrap(), Duration::from_secs(1));
        assert_eq!(parse("+3ms").unwrap(), Duration::from_millis(3));
    }

    #[test]
    fn zero_forms() {
        assert_eq!(parse("0").unwrap(), Duration::ZERO);
        assert_eq!(parse("-0").unwrap(), Duration::ZERO);
        assert_eq!(parse("0s").unwrap(), Duration::ZERO);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(parse(""), Err(DurationParseError::Empty));
        assert!(matches!(parse("-1s"), Err(DurationParseError::Negative(_))));
        assert!(matches!(parse("100"), Err(DurationParseError::MissingUnit(_))));
        assert!(matches!(parse("3d"), Err(DurationParseError::UnknownUnit { .. })));
        assert!(matches!(parse("ms"), Err(DurationParseError::Invalid(_))));
        assert!(matches!(parse("."), Err(DurationParseError::Invalid(_))));
        assert!(matches!(
            parse("99999999999999999999999h"),
            Err(DurationParseError::Overflow(_))
        ));
    }

    #[test]
    fn formats_compactly() {
        assert_eq!(format(Duration::ZERO), "0s");
        assert_eq!(format(Duration::from_millis(250)), "250ms");
        assert_eq!(format(Duration::from_millis(2500)), "2.5s");
        assert_eq!(format(Duration::from_secs(3)), "3s");
        assert_eq!(format(Duration::from_micros(15)), "15us");
        assert_eq!(format(Duration::from_nanos(1_000_001)), "1000001ns");
    }

    #[test]
    fn format_output_parses_back() {
        for d in [
            Duration::from_millis(250),
            Duration::from_millis(2500),
            Duration::from_millis(1001),
            Duration::from_micros(3),
        ] {
            assert_eq!(parse(&format(d)).unwrap(), d);
        }
    }
}
