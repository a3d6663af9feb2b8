//! Duration literals attached to triggers, in whole minutes.
//!
//! Two tiers are tried in order: the `<n>d` / `<n>w` shorthand, then a general
//! literal made of `<decimal><unit>` components (`15m`, `1h30m`, `1.5h`,
//! `90s`). The general tier has no day or week unit, so `2d` is only ever
//! accepted by the shorthand.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::DurationError;

const MINUTES_PER_DAY: i64 = 24 * 60;
const MINUTES_PER_WEEK: i64 = 7 * MINUTES_PER_DAY;
const NANOS_PER_MINUTE: u128 = 60 * 1_000_000_000;

/// A non-negative number of minutes. Zero means "no expiry".
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Minutes(u64);

impl Minutes {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn new(minutes: u64) -> Self {
        Self(minutes)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

/// Renders in the general literal form (`15m0s`, `2h0m0s`, `168h0m0s`),
/// never collapsed back into day/week shorthand.
impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0 / 60;
        let minutes = self.0 % 60;
        if self.0 == 0 {
            f.write_str("0s")
        } else if hours == 0 {
            write!(f, "{minutes}m0s")
        } else {
            write!(f, "{hours}h{minutes}m0s")
        }
    }
}

fn shorthand_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([0-9]+)([wd])$").expect("shorthand pattern is valid"))
}

fn literal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:ns|us|µs|μs|ms|s|m|h))+$")
            .expect("literal pattern is valid")
    })
}

fn component_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"([0-9]*)(?:\.([0-9]*))?(ns|us|µs|μs|ms|s|m|h)")
            .expect("component pattern is valid")
    })
}

/// Parse a duration literal into minutes.
///
/// The empty string is zero minutes.
///
/// # Errors
///
/// Returns [`DurationError::InvalidDuration`] when neither tier accepts the
/// literal or the value does not fit in `i64` minutes.
pub fn parse_duration(text: &str) -> Result<Minutes, DurationError> {
    if text.is_empty() {
        return Ok(Minutes::ZERO);
    }
    let invalid = || DurationError::InvalidDuration {
        literal: text.to_string(),
    };

    let Some(caps) = shorthand_re().captures(text) else {
        let nanos = parse_literal_nanos(text).ok_or_else(invalid)?;
        return u64::try_from(nanos / NANOS_PER_MINUTE)
            .map(Minutes)
            .map_err(|_| invalid());
    };

    let count: i64 = caps[1].parse().map_err(|_| invalid())?;
    let unit = if &caps[2] == "w" {
        MINUTES_PER_WEEK
    } else {
        MINUTES_PER_DAY
    };
    count
        .checked_mul(unit)
        .map(|minutes| Minutes(minutes.unsigned_abs()))
        .ok_or_else(invalid)
}

/// General tier: sum of `<decimal><unit>` components in nanoseconds, capped at
/// `i64::MAX`. A bare `0` is accepted.
fn parse_literal_nanos(text: &str) -> Option<u128> {
    if text == "0" {
        return Some(0);
    }
    if !literal_re().is_match(text) {
        return None;
    }

    let mut total: u128 = 0;
    for caps in component_re().captures_iter(text) {
        let unit = unit_nanos(&caps[3])?;
        let whole: u128 = if caps[1].is_empty() {
            0
        } else {
            caps[1].parse().ok()?
        };
        let mut value = whole.checked_mul(unit)?;

        if let Some(frac) = caps.get(2).map(|m| m.as_str()).filter(|f| !f.is_empty()) {
            // Digits beyond nanosecond precision of an hour cannot matter.
            let end = frac.char_indices().nth(18).map_or(frac.len(), |(at, _)| at);
            let digits = &frac[..end];
            let scale = 10u128.checked_pow(u32::try_from(digits.len()).ok()?)?;
            let fraction: u128 = digits.parse().ok()?;
            value = value.checked_add(fraction.checked_mul(unit)? / scale)?;
        }

        total = total.checked_add(value)?;
    }

    (total <= u128::from(i64::MAX.unsigned_abs())).then_some(total)
}

fn unit_nanos(unit: &str) -> Option<u128> {
    let nanos = match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => 1_000_000_000,
        "m" => NANOS_PER_MINUTE,
        "h" => 60 * NANOS_PER_MINUTE,
        _ => return None,
    };
    Some(nanos)
}
