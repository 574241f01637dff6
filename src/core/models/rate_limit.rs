//! Quota rate limits
//!
//! A rate limit caps either the number of messages or the number of
//! megabytes that may pass through an API within a period. Limits are
//! written loosely in declarative files and compared through their
//! canonical form, so `"10MB/s"` and `"10 MB per 1 second"` are the same
//! limit.
//!
//! # Examples
//!
//! ```
//! use gwsync::core::models::{LimitKind, RateLimit, TimeUnit};
//!
//! let limit = RateLimit::parse("100 msg per 2 minutes").unwrap();
//! assert_eq!(limit.kind(), LimitKind::Messages);
//! assert_eq!(limit.period_unit(), TimeUnit::Minute);
//! assert_eq!(limit.canonicalize(), "100msg/2minute");
//!
//! let a = RateLimit::parse("10MB/s").unwrap();
//! let b = RateLimit::parse("10 MB per 1 second").unwrap();
//! assert_eq!(a, b);
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Human description of the accepted limit syntax
pub const LIMIT_GRAMMAR: &str =
    "<amount> <MB|msg> (per|/) [<time_amount>] <second|minute|hour|day|week>[s]";

static LIMIT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?P<amount>[0-9]+)\s*(?P<unit>mb|msg)\s*(?:per|/)\s*(?P<period>[0-9]*)\s*(?P<tunit>[a-z]+)\s*$",
    )
    .expect("limit pattern is a valid regex")
});

// Each canonical unit accepts any prefix of itself, plus a trailing 's'.
// The prefixes must stay disjoint: a unit such as "month" would collide
// with "minute" on a bare 'm'.
static UNIT_PATTERNS: LazyLock<[(TimeUnit, Regex); 5]> = LazyLock::new(|| {
    let compile = |p: &str| Regex::new(p).expect("time unit pattern is a valid regex");
    [
        (TimeUnit::Second, compile(r"^se?c?o?n?d?s?$")),
        (TimeUnit::Minute, compile(r"^mi?n?u?t?e?s?$")),
        (TimeUnit::Hour, compile(r"^ho?u?r?s?$")),
        (TimeUnit::Day, compile(r"^da?y?s?$")),
        (TimeUnit::Week, compile(r"^we?e?k?s?$")),
    ]
});

/// Errors raised when a time unit cannot be resolved
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnknownUnitError {
    /// No canonical unit accepts the input
    #[error("unknown time unit '{0}': expected one of second, minute, hour, day, week")]
    Unrecognized(String),

    /// More than one canonical unit accepts the input
    #[error("ambiguous time unit '{unit}': matches {candidates:?}")]
    Ambiguous {
        /// The raw unit
        unit: String,
        /// Every canonical unit that matched
        candidates: Vec<TimeUnit>,
    },
}

/// Errors that can occur when parsing a rate limit
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input does not follow the limit grammar
    #[error("cannot understand limit '{input}': expected {expected}")]
    Malformed {
        /// The offending input
        input: String,
        /// The accepted grammar
        expected: &'static str,
    },

    /// An amount was zero
    #[error("limit '{input}' has a zero {field}")]
    ZeroAmount {
        /// The offending input
        input: String,
        /// Which amount was zero
        field: &'static str,
    },

    /// An amount does not fit in 32 bits
    #[error("limit '{input}' has an out of range {field}: {value}")]
    AmountOverflow {
        /// The offending input
        input: String,
        /// Which amount overflowed
        field: &'static str,
        /// The digits as written
        value: String,
    },

    /// The time unit did not resolve to a canonical unit
    #[error("limit '{input}': {source}")]
    UnknownUnit {
        /// The offending input
        input: String,
        /// The unit resolution failure
        #[source]
        source: UnknownUnitError,
    },
}

/// What a limit counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitKind {
    /// Number of messages
    Messages,
    /// Megabytes transferred
    Megabytes,
}

impl LimitKind {
    /// The unit symbol used in the canonical form
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Messages => "msg",
            Self::Megabytes => "MB",
        }
    }

    fn from_symbol(symbol: &str) -> Option<Self> {
        if symbol.eq_ignore_ascii_case("msg") {
            Some(Self::Messages)
        } else if symbol.eq_ignore_ascii_case("mb") {
            Some(Self::Megabytes)
        } else {
            None
        }
    }
}

impl std::fmt::Display for LimitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Canonical time units for a limit period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// One second
    Second,
    /// One minute
    Minute,
    /// One hour
    Hour,
    /// One day
    Day,
    /// One week
    Week,
}

impl TimeUnit {
    /// Canonical long name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
        }
    }
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TimeUnit {
    type Err = UnknownUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        canon_unit(s)
    }
}

/// Resolve an abbreviated time unit to its canonical unit
///
/// `"s"`, `"sec"`, `"secs"` and `"seconds"` all resolve to
/// [`TimeUnit::Second`]. Matching is case-insensitive.
///
/// # Errors
///
/// Returns [`UnknownUnitError`] when no canonical unit, or more than one,
/// accepts the input.
pub fn canon_unit(raw: &str) -> Result<TimeUnit, UnknownUnitError> {
    let unit = raw.trim().to_ascii_lowercase();
    let candidates: Vec<TimeUnit> = UNIT_PATTERNS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(&unit))
        .map(|(canonical, _)| *canonical)
        .collect();

    if let [single] = candidates.as_slice() {
        return Ok(*single);
    }
    if candidates.is_empty() {
        Err(UnknownUnitError::Unrecognized(raw.to_string()))
    } else {
        Err(UnknownUnitError::Ambiguous {
            unit: raw.to_string(),
            candidates,
        })
    }
}

/// A structured quota limit
///
/// Both amounts are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RateLimit {
    kind: LimitKind,
    amount: u32,
    period_amount: u32,
    period_unit: TimeUnit,
}

impl RateLimit {
    /// Build a limit from its parts
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::ZeroAmount`] if either amount is zero.
    pub fn new(
        kind: LimitKind,
        amount: u32,
        period_amount: u32,
        period_unit: TimeUnit,
    ) -> Result<Self, ParseError> {
        let describe = || format!("{amount}{kind}/{period_amount}{period_unit}");
        if amount == 0 {
            return Err(ParseError::ZeroAmount {
                input: describe(),
                field: "amount",
            });
        }
        if period_amount == 0 {
            return Err(ParseError::ZeroAmount {
                input: describe(),
                field: "time amount",
            });
        }
        Ok(Self {
            kind,
            amount,
            period_amount,
            period_unit,
        })
    }

    /// Parse a loosely written limit
    ///
    /// # Format
    ///
    /// ```text
    /// <amount> <MB|msg> (per|/) [<time_amount>] <time_unit>
    ///
    /// 20 MB per minute
    /// 100 msg per 2 minutes
    /// 10MB/s
    /// 10 msg / 5 sec
    /// ```
    ///
    /// A missing time amount means 1.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let malformed = || ParseError::Malformed {
            input: s.to_string(),
            expected: LIMIT_GRAMMAR,
        };
        let caps = LIMIT_PATTERN.captures(s).ok_or_else(malformed)?;

        let kind = LimitKind::from_symbol(&caps["unit"]).ok_or_else(malformed)?;
        let amount = parse_amount(s, "amount", &caps["amount"])?;
        let period_amount = match &caps["period"] {
            "" => 1,
            digits => parse_amount(s, "time amount", digits)?,
        };
        let period_unit = canon_unit(&caps["tunit"]).map_err(|source| ParseError::UnknownUnit {
            input: s.to_string(),
            source,
        })?;

        Ok(Self {
            kind,
            amount,
            period_amount,
            period_unit,
        })
    }

    /// Serialize to the canonical form, e.g. `100msg/2minute`
    #[must_use]
    pub fn canonicalize(&self) -> String {
        format!(
            "{}{}/{}{}",
            self.amount,
            self.kind.symbol(),
            self.period_amount,
            self.period_unit
        )
    }

    /// What the limit counts
    #[must_use]
    pub const fn kind(&self) -> LimitKind {
        self.kind
    }

    /// Messages or megabytes allowed per period
    #[must_use]
    pub const fn amount(&self) -> u32 {
        self.amount
    }

    /// Number of time units in a period
    #[must_use]
    pub const fn period_amount(&self) -> u32 {
        self.period_amount
    }

    /// Time unit of a period
    #[must_use]
    pub const fn period_unit(&self) -> TimeUnit {
        self.period_unit
    }
}

fn parse_amount(input: &str, field: &'static str, digits: &str) -> Result<u32, ParseError> {
    let value: u32 = digits.parse().map_err(|_| ParseError::AmountOverflow {
        input: input.to_string(),
        field,
        value: digits.to_string(),
    })?;
    if value == 0 {
        return Err(ParseError::ZeroAmount {
            input: input.to_string(),
            field,
        });
    }
    Ok(value)
}

impl std::fmt::Display for RateLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.canonicalize())
    }
}

impl std::str::FromStr for RateLimit {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RateLimit {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RateLimit> for String {
    fn from(limit: RateLimit) -> Self {
        limit.canonicalize()
    }
}
