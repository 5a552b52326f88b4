use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{SplitKind, SplitPattern, Yen};

/// Outcome of one calculation.
///
/// `pattern` is the pattern that was actually applied: when a pattern falls
/// back to an equal split the result carries [`SplitPattern::Equal`] and no
/// pattern parameter.
///
/// Every result conserves the total:
/// `organizer_payment + participant_payment * (number_of_people - 1) + remainder == total_amount`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    #[serde(flatten)]
    pub pattern: SplitPattern,
    pub total_amount: Yen,
    pub number_of_people: u32,
    /// Same as `participant_payment`; kept for consumers reading the equal
    /// split figure.
    pub per_person: Yen,
    pub remainder: Yen,
    pub organizer_payment: Yen,
    pub participant_payment: Yen,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl CalculationResult {
    #[must_use]
    pub const fn kind(&self) -> SplitKind {
        self.pattern.kind()
    }

    /// Number of people other than the organizer.
    #[must_use]
    pub const fn participant_count(&self) -> u32 {
        self.number_of_people.saturating_sub(1)
    }

    /// Sum of every yen assigned by the split, remainder included.
    #[must_use]
    pub fn allocated_total(&self) -> Yen {
        let participants = self.participant_payment.amount() * i64::from(self.participant_count());
        Yen::new(self.organizer_payment.amount() + participants + self.remainder.amount())
    }

    /// Returns `true` if the split accounts for exactly the total amount.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.allocated_total() == self.total_amount
    }

    #[must_use]
    pub fn has_remainder(&self) -> bool {
        self.remainder.is_positive()
    }

    /// One-line, human-readable summary.
    #[must_use]
    pub fn summary(&self) -> String {
        match self.pattern {
            SplitPattern::Equal => format!("一人 {}", self.per_person),
            _ => format!(
                "幹事: {}、参加者: 一人 {}",
                self.organizer_payment, self.participant_payment
            ),
        }
    }
}
