//! Calculation input and its validation.
//!
//! Form values arrive as strings; [`CalculationInput::parse`] is the only
//! place where they turn into numbers. Nothing is coerced: a value that is not
//! a plain non-negative integer is rejected with
//! [`EngineError::InvalidInput`].

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine, SplitKind, SplitPattern, Yen};

pub const MIN_TOTAL_AMOUNT: Yen = Yen::new(1);
pub const MAX_TOTAL_AMOUNT: Yen = Yen::new(10_000_000_000);
pub const MIN_PEOPLE: u32 = 1;
pub const MAX_PEOPLE: u32 = 9_999;
pub const MIN_PERCENT: u32 = 1;
pub const MAX_BURDEN_PERCENT: u32 = 100;
pub const MAX_REDUCTION_PERCENT: u32 = 99;

/// One calculation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    pub total_amount: Yen,
    pub number_of_people: u32,
    #[serde(flatten)]
    pub pattern: SplitPattern,
}

impl CalculationInput {
    /// Builds an input without validating it; [`crate::Engine::calculate`]
    /// validates before computing.
    #[must_use]
    pub const fn new(total_amount: Yen, number_of_people: u32, pattern: SplitPattern) -> Self {
        Self {
            total_amount,
            number_of_people,
            pattern,
        }
    }

    /// Shorthand for an equal split.
    #[must_use]
    pub const fn equal(total_amount: Yen, number_of_people: u32) -> Self {
        Self::new(total_amount, number_of_people, SplitPattern::Equal)
    }

    /// Parses raw form values into a validated input.
    ///
    /// `kind` is checked first so an unsupported pattern is reported as
    /// [`EngineError::UnknownCalculationType`] regardless of the other
    /// fields. `parameter` is required for every pattern except `equal`,
    /// where it is ignored.
    pub fn parse(
        total_amount: &str,
        number_of_people: &str,
        kind: &str,
        parameter: Option<&str>,
    ) -> ResultEngine<Self> {
        let kind: SplitKind = kind.parse()?;
        let total_amount: Yen = total_amount.parse()?;
        let number_of_people = parse_count(number_of_people, "number of people")?;

        let parameter = if kind.takes_parameter() {
            required(parameter, parameter_label(kind))?
        } else {
            ""
        };
        let pattern = match kind {
            SplitKind::Equal => SplitPattern::Equal,
            SplitKind::OrganizerMore => SplitPattern::OrganizerMore {
                burden_percent: parse_count(parameter, parameter_label(kind))?,
            },
            SplitKind::OrganizerLess => SplitPattern::OrganizerLess {
                reduction_percent: parse_count(parameter, parameter_label(kind))?,
            },
            SplitKind::OrganizerFixed => SplitPattern::OrganizerFixed {
                amount: parameter.parse()?,
            },
        };

        let input = Self::new(total_amount, number_of_people, pattern);
        input.validate()?;
        Ok(input)
    }

    /// Checks every bound an input must satisfy before it can be split.
    pub fn validate(&self) -> ResultEngine<()> {
        if self.total_amount < MIN_TOTAL_AMOUNT || self.total_amount > MAX_TOTAL_AMOUNT {
            return Err(EngineError::InvalidInput(format!(
                "total amount must be between {} and {}, got {}",
                MIN_TOTAL_AMOUNT.amount(),
                MAX_TOTAL_AMOUNT.amount(),
                self.total_amount.amount()
            )));
        }
        if !(MIN_PEOPLE..=MAX_PEOPLE).contains(&self.number_of_people) {
            return Err(EngineError::InvalidInput(format!(
                "number of people must be between {MIN_PEOPLE} and {MAX_PEOPLE}, got {}",
                self.number_of_people
            )));
        }

        match self.pattern {
            SplitPattern::Equal => {}
            SplitPattern::OrganizerMore { burden_percent } => {
                ensure_percent(burden_percent, MAX_BURDEN_PERCENT, "organizer burden percent")?;
            }
            SplitPattern::OrganizerLess { reduction_percent } => {
                ensure_percent(
                    reduction_percent,
                    MAX_REDUCTION_PERCENT,
                    "organizer reduction percent",
                )?;
            }
            SplitPattern::OrganizerFixed { amount } => {
                if amount.amount() < 0 {
                    return Err(EngineError::InvalidInput(format!(
                        "organizer fixed amount must be >= 0, got {}",
                        amount.amount()
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parameter_label(kind: SplitKind) -> &'static str {
    match kind {
        SplitKind::Equal => "parameter",
        SplitKind::OrganizerMore => "organizer burden percent",
        SplitKind::OrganizerLess => "organizer reduction percent",
        SplitKind::OrganizerFixed => "organizer fixed amount",
    }
}

fn ensure_percent(value: u32, max: u32, label: &str) -> ResultEngine<()> {
    if !(MIN_PERCENT..=max).contains(&value) {
        return Err(EngineError::InvalidInput(format!(
            "{label} must be between {MIN_PERCENT} and {max}, got {value}"
        )));
    }
    Ok(())
}

fn required<'a>(value: Option<&'a str>, label: &str) -> ResultEngine<&'a str> {
    match value.map(str::trim) {
        Some(raw) if !raw.is_empty() => Ok(raw),
        _ => Err(EngineError::InvalidInput(format!("{label} is required"))),
    }
}

/// Parses a plain non-negative integer (people count or percent).
fn parse_count(raw: &str, label: &str) -> ResultEngine<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(format!("{label} is required")));
    }
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(EngineError::InvalidInput(format!(
            "invalid {label}: {trimmed}"
        )));
    }
    trimmed
        .parse()
        .map_err(|_| EngineError::InvalidInput(format!("{label} too large")))
}
