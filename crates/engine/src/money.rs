use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Money amount represented as **integer yen**.
///
/// Yen has no minor unit, so every amount the engine produces (payments,
/// remainders, fixed organizer amounts) is a whole number of yen and no
/// floating point is involved anywhere in a split.
///
/// # Examples
///
/// ```rust
/// use engine::Yen;
///
/// let amount = Yen::new(1_234_567);
/// assert_eq!(amount.amount(), 1234567);
/// assert_eq!(amount.to_string(), "1,234,567円");
/// ```
///
/// Parsing from user input (accepts `,` grouping and a trailing `円`; rejects
/// signs and decimals):
///
/// ```rust
/// use engine::Yen;
///
/// assert_eq!("1000".parse::<Yen>().unwrap().amount(), 1000);
/// assert_eq!("12,000円".parse::<Yen>().unwrap().amount(), 12000);
/// assert!("10.5".parse::<Yen>().is_err());
/// assert!("-3".parse::<Yen>().is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Yen(i64);

impl Yen {
    pub const ZERO: Yen = Yen(0);

    /// Creates a new amount from integer yen.
    #[must_use]
    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    /// Returns the raw value in yen.
    #[must_use]
    pub const fn amount(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for Yen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (idx, ch) in digits.chars().enumerate() {
            if idx > 0 && (digits.len() - idx) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        write!(f, "{sign}{grouped}円")
    }
}

impl FromStr for Yen {
    type Err = EngineError;

    /// Parses a non-negative whole yen amount.
    ///
    /// Validation rules:
    /// - surrounding whitespace and a trailing `円` are ignored
    /// - `,` is accepted only as a thousands separator (`1,000`, not `10,00`)
    /// - signs, decimals and any other character are rejected
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::InvalidInput("empty amount".to_string());
        let invalid = || EngineError::InvalidInput(format!("invalid amount: {}", s.trim()));
        let overflow = || EngineError::InvalidInput("amount too large".to_string());

        let trimmed = s.trim();
        let trimmed = trimmed.strip_suffix('円').unwrap_or(trimmed).trim_end();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let mut groups = trimmed.split(',');
        let mut digits = String::with_capacity(trimmed.len());
        if let Some(head) = groups.next() {
            if head.is_empty() || !head.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            let grouped = trimmed.contains(',');
            if grouped && head.len() > 3 {
                return Err(invalid());
            }
            digits.push_str(head);
        }
        for group in groups {
            if group.len() != 3 || !group.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            digits.push_str(group);
        }

        let amount: i64 = digits.parse().map_err(|_| overflow())?;
        Ok(Yen(amount))
    }
}
