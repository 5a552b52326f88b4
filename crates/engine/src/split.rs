//! Split arithmetic for the four patterns.
//!
//! Percentages are exact rationals over 100, so every payment is an integer
//! floor of `total * numerator / denominator`. Inputs are validated before
//! they reach this module: `total <= 10^10` and `people <= 9_999` keep every
//! intermediate product below `10^17`, well inside `i64`.
//!
//! Patterns that would need a non-positive rate or have nobody to share with
//! fall back to [`equal`]. A fallback is a regular result, not an error.

use crate::{SplitPattern, Yen};

/// Amounts produced by a split, before the engine stamps a timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Split {
    pub pattern: SplitPattern,
    pub organizer_payment: Yen,
    pub participant_payment: Yen,
    pub remainder: Yen,
}

pub(crate) fn split(total: Yen, people: u32, pattern: SplitPattern) -> Split {
    let total = total.amount();
    let people = i64::from(people);

    match pattern {
        SplitPattern::Equal => equal(total, people),
        SplitPattern::OrganizerMore { burden_percent } => {
            organizer_more(total, people, burden_percent)
        }
        SplitPattern::OrganizerLess { reduction_percent } => {
            organizer_less(total, people, reduction_percent)
        }
        SplitPattern::OrganizerFixed { amount } => organizer_fixed(total, people, amount.amount()),
    }
}

/// Everybody pays `floor(total / people)`; the remainder is reported and never
/// redistributed.
fn equal(total: i64, people: i64) -> Split {
    let per_person = total / people;
    Split {
        pattern: SplitPattern::Equal,
        organizer_payment: Yen::new(per_person),
        participant_payment: Yen::new(per_person),
        remainder: Yen::new(total % people),
    }
}

fn fall_back(total: i64, people: i64, from: SplitPattern, reason: &str) -> Split {
    tracing::debug!(pattern = %from.kind(), people, reason, "falling back to equal split");
    equal(total, people)
}

/// Organizer rate is `1 + burden/100`, participant rate keeps the sum of all
/// rates equal to `people`.
///
/// Rounding surplus goes to the organizer; a deficit is added to the
/// participant payment as a whole. The remainder is always 0.
fn organizer_more(total: i64, people: i64, burden_percent: u32) -> Split {
    let pattern = SplitPattern::OrganizerMore { burden_percent };
    let participants = people - 1;
    if participants <= 0 {
        return fall_back(total, people, pattern, "no participants besides the organizer");
    }

    let organizer_rate = 100 + i64::from(burden_percent);
    let participant_rate = 100 * people - organizer_rate;
    if participant_rate <= 0 {
        return fall_back(total, people, pattern, "participant rate is not positive");
    }

    let mut organizer = total * organizer_rate / (100 * people);
    let mut participant = total * participant_rate / (100 * people * participants);

    let shortfall = total - (organizer + participant * participants);
    if shortfall > 0 {
        organizer += shortfall;
    } else if shortfall < 0 {
        participant += shortfall.abs();
    }

    tracing::debug!(pattern = %pattern.kind(), people, shortfall, "split computed");
    Split {
        pattern,
        organizer_payment: Yen::new(organizer),
        participant_payment: Yen::new(participant),
        remainder: Yen::ZERO,
    }
}

/// Organizer rate is `1 - reduction/100`, participant rate keeps the sum of
/// all rates equal to `people`.
///
/// Rounding surplus is spread evenly over the participants and what cannot be
/// spread is reported as remainder; a deficit is absorbed by the organizer.
fn organizer_less(total: i64, people: i64, reduction_percent: u32) -> Split {
    let pattern = SplitPattern::OrganizerLess { reduction_percent };
    let participants = people - 1;
    if participants <= 0 {
        return fall_back(total, people, pattern, "no participants besides the organizer");
    }

    let organizer_rate = 100 - i64::from(reduction_percent);
    let participant_rate = 100 * people - organizer_rate;
    if organizer_rate <= 0 || participant_rate <= 0 {
        return fall_back(total, people, pattern, "organizer or participant rate is not positive");
    }

    let mut organizer = total * organizer_rate / (100 * people);
    let mut participant = total * participant_rate / (100 * people * participants);
    let mut remainder = 0;

    let shortfall = total - (organizer + participant * participants);
    if shortfall > 0 {
        let per_head = shortfall / participants;
        participant += per_head;
        remainder = shortfall - per_head * participants;
    } else if shortfall < 0 {
        organizer += shortfall.abs();
    }

    tracing::debug!(pattern = %pattern.kind(), people, shortfall, "split computed");
    Split {
        pattern,
        organizer_payment: Yen::new(organizer),
        participant_payment: Yen::new(participant),
        remainder: Yen::new(remainder),
    }
}

/// Organizer pays exactly `fixed`; the rest is split equally over the
/// participants with the remainder reported.
fn organizer_fixed(total: i64, people: i64, fixed: i64) -> Split {
    let pattern = SplitPattern::OrganizerFixed {
        amount: Yen::new(fixed),
    };
    if fixed >= total {
        return fall_back(total, people, pattern, "fixed amount covers the total");
    }
    if fixed < 0 {
        return fall_back(total, people, pattern, "fixed amount is negative");
    }
    let participants = people - 1;
    if participants <= 0 {
        return fall_back(total, people, pattern, "no participants besides the organizer");
    }

    let remaining = total - fixed;
    tracing::debug!(pattern = %pattern.kind(), people, remaining, "split computed");
    Split {
        pattern,
        organizer_payment: Yen::new(fixed),
        participant_payment: Yen::new(remaining / participants),
        remainder: Yen::new(remaining % participants),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amounts(split: Split) -> (i64, i64, i64) {
        (
            split.organizer_payment.amount(),
            split.participant_payment.amount(),
            split.remainder.amount(),
        )
    }

    #[test]
    fn equal_reports_remainder() {
        assert_eq!(amounts(equal(1000, 3)), (333, 333, 1));
        assert_eq!(amounts(equal(1000, 4)), (250, 250, 0));
        assert_eq!(amounts(equal(1, 2)), (0, 0, 1));
        assert_eq!(amounts(equal(1, 1)), (1, 1, 0));
    }

    #[test]
    fn organizer_more_pushes_surplus_to_organizer() {
        // 5000 * 1.2 / 4 = 1500; 5000 * (2.8 / 3) / 4 = 1166.66..; 2 yen short.
        let split = organizer_more(5000, 4, 20);
        assert_eq!(amounts(split), (1502, 1166, 0));
        assert_eq!(split.pattern, SplitPattern::OrganizerMore { burden_percent: 20 });
    }

    #[test]
    fn organizer_more_falls_back_on_non_positive_rate() {
        // 2 people, organizer rate 2.0 leaves the participant rate at 0.
        let split = organizer_more(1000, 2, 100);
        assert_eq!(split, equal(1000, 2));
        assert_eq!(organizer_more(1000, 1, 50), equal(1000, 1));
    }

    #[test]
    fn organizer_less_spreads_surplus_over_participants() {
        // organizer: 1000 * 0.7 / 3 = 233.33 -> 233
        // participant: 1000 * (2.3 / 2) / 3 = 383.33 -> 383
        // shortfall 1000 - (233 + 766) = 1 -> cannot be spread over 2, stays as remainder.
        let split = organizer_less(1000, 3, 30);
        assert_eq!(amounts(split), (233, 383, 1));

        // organizer: 10000 * 0.9 / 5 = 1800
        // participant: 10000 * (4.1 / 4) / 5 = 2050
        let split = organizer_less(10_000, 5, 10);
        assert_eq!(amounts(split), (1800, 2050, 0));
    }

    #[test]
    fn organizer_less_single_person_falls_back() {
        assert_eq!(organizer_less(1000, 1, 50), equal(1000, 1));
    }

    #[test]
    fn organizer_fixed_splits_the_rest() {
        let split = organizer_fixed(6000, 4, 2000);
        assert_eq!(amounts(split), (2000, 1333, 1));
        assert_eq!(amounts(organizer_fixed(6000, 4, 0)), (0, 2000, 0));
    }

    #[test]
    fn organizer_fixed_degenerate_cases_fall_back() {
        assert_eq!(organizer_fixed(100, 150, 150), equal(100, 150));
        assert_eq!(organizer_fixed(1000, 3, 1000), equal(1000, 3));
        assert_eq!(organizer_fixed(1000, 3, -1), equal(1000, 3));
        assert_eq!(organizer_fixed(1000, 1, 200), equal(1000, 1));
    }
}
