//! Data shapes exchanged with the collaborators around the engine: the share
//! token payload and the history records.
use chrono::{DateTime, SubsecRound, Utc};
use engine::{
    CalculationInput, CalculationResult, Clock, EngineError, SplitKind, SplitPattern, Yen,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod share {
    use super::*;

    /// Compact projection of a result embedded in a share link.
    ///
    /// Only the inputs travel; computed fields are dropped and recomputed by
    /// the receiver.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SharePayload {
        /// Total amount in yen.
        pub t: i64,
        /// Number of people.
        pub n: u32,
        /// Pattern tag. Missing means `equal`.
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        pub kind: Option<String>,
        /// Burden percent (`organizer_more`) or reduction percent
        /// (`organizer_less`).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub b: Option<u32>,
        /// Organizer fixed amount (`organizer_fixed`).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub f: Option<i64>,
        /// Result timestamp, epoch milliseconds. Informational only.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub ts: Option<i64>,
    }

    impl From<&CalculationResult> for SharePayload {
        fn from(result: &CalculationResult) -> Self {
            let (b, f) = match result.pattern {
                SplitPattern::Equal => (None, None),
                SplitPattern::OrganizerMore { burden_percent } => (Some(burden_percent), None),
                SplitPattern::OrganizerLess { reduction_percent } => {
                    (Some(reduction_percent), None)
                }
                SplitPattern::OrganizerFixed { amount } => (None, Some(amount.amount())),
            };
            Self {
                t: result.total_amount.amount(),
                n: result.number_of_people,
                kind: Some(result.kind().as_str().to_string()),
                b,
                f,
                ts: Some(result.timestamp.timestamp_millis()),
            }
        }
    }

    impl SharePayload {
        /// Rebuilds the validated calculation input this payload describes.
        ///
        /// # Errors
        ///
        /// [`EngineError::UnknownCalculationType`] for an unsupported tag,
        /// [`EngineError::InvalidInput`] when the pattern parameter is missing
        /// or a value is out of range.
        pub fn into_input(&self) -> Result<CalculationInput, EngineError> {
            let kind = match self.kind.as_deref() {
                None | Some("") => SplitKind::Equal,
                Some(tag) => tag.parse()?,
            };
            let missing =
                |field: &str| EngineError::InvalidInput(format!("share payload is missing `{field}`"));

            let pattern = match kind {
                SplitKind::Equal => SplitPattern::Equal,
                SplitKind::OrganizerMore => SplitPattern::OrganizerMore {
                    burden_percent: self.b.ok_or_else(|| missing("b"))?,
                },
                SplitKind::OrganizerLess => SplitPattern::OrganizerLess {
                    reduction_percent: self.b.ok_or_else(|| missing("b"))?,
                },
                SplitKind::OrganizerFixed => SplitPattern::OrganizerFixed {
                    amount: Yen::new(self.f.ok_or_else(|| missing("f"))?),
                },
            };

            let input = CalculationInput::new(Yen::new(self.t), self.n, pattern);
            input.validate()?;
            Ok(input)
        }
    }
}

pub mod history {
    use super::*;

    pub const HIGH_AMOUNT_THRESHOLD: Yen = Yen::new(10_000);
    pub const LOW_AMOUNT_THRESHOLD: Yen = Yen::new(1_000);
    pub const LARGE_GROUP_THRESHOLD: u32 = 10;
    pub const SMALL_GROUP_THRESHOLD: u32 = 3;

    /// Derived label attached to a history entry.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum HistoryTag {
        HighAmount,
        LowAmount,
        LargeGroup,
        SmallGroup,
        HasRemainder,
    }

    impl HistoryTag {
        /// Tags describing a result, in amount / group / remainder order.
        ///
        /// Amounts between the thresholds get no amount tag, same for groups.
        #[must_use]
        pub fn extract(result: &CalculationResult) -> Vec<HistoryTag> {
            let mut tags = Vec::new();

            if result.total_amount >= HIGH_AMOUNT_THRESHOLD {
                tags.push(HistoryTag::HighAmount);
            } else if result.total_amount <= LOW_AMOUNT_THRESHOLD {
                tags.push(HistoryTag::LowAmount);
            }

            if result.number_of_people >= LARGE_GROUP_THRESHOLD {
                tags.push(HistoryTag::LargeGroup);
            } else if result.number_of_people <= SMALL_GROUP_THRESHOLD {
                tags.push(HistoryTag::SmallGroup);
            }

            if result.has_remainder() {
                tags.push(HistoryTag::HasRemainder);
            }

            tags
        }
    }

    /// A saved calculation.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct HistoryEntry {
        pub id: Uuid,
        pub calculation_result: CalculationResult,
        /// Free-text user note, empty when none.
        #[serde(default)]
        pub note: String,
        #[serde(default)]
        pub tags: Vec<HistoryTag>,
        #[serde(with = "chrono::serde::ts_milliseconds")]
        pub created_at: DateTime<Utc>,
    }

    impl HistoryEntry {
        /// New entry with a fresh id and tags derived from `result`.
        ///
        /// `created_at` is read from `clock` and truncated to milliseconds,
        /// the precision it is stored with.
        #[must_use]
        pub fn new(result: CalculationResult, note: impl Into<String>, clock: &dyn Clock) -> Self {
            Self {
                id: Uuid::new_v4(),
                tags: HistoryTag::extract(&result),
                calculation_result: result,
                note: note.into(),
                created_at: clock.now().trunc_subsecs(3),
            }
        }
    }

    /// Exported history document.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct HistoryExport {
        pub version: String,
        #[serde(with = "chrono::serde::ts_milliseconds")]
        pub exported_at: DateTime<Utc>,
        /// Newest first.
        pub entries: Vec<HistoryEntry>,
    }
}

#[cfg(test)]
mod tests {
    use engine::{Engine, FixedClock};

    use super::{
        history::{HistoryEntry, HistoryExport, HistoryTag},
        share::SharePayload,
        *,
    };

    fn calculate(total: i64, people: u32, pattern: SplitPattern) -> CalculationResult {
        Engine::builder()
            .clock(FixedClock::from_millis(1_700_000_000_000))
            .build()
            .calculate(&CalculationInput::new(Yen::new(total), people, pattern))
            .unwrap()
    }

    #[test]
    fn payload_keeps_only_inputs() {
        let result = calculate(5000, 4, SplitPattern::OrganizerMore { burden_percent: 20 });
        let payload = SharePayload::from(&result);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({
                "t": 5000,
                "n": 4,
                "type": "organizer_more",
                "b": 20,
                "ts": 1_700_000_000_000_i64
            })
        );
        assert_eq!(
            payload.into_input().unwrap(),
            CalculationInput::new(
                Yen::new(5000),
                4,
                SplitPattern::OrganizerMore { burden_percent: 20 }
            )
        );
    }

    #[test]
    fn payload_maps_reduction_and_fixed_parameters() {
        let less = SharePayload::from(&calculate(
            1000,
            3,
            SplitPattern::OrganizerLess {
                reduction_percent: 30,
            },
        ));
        assert_eq!((less.b, less.f), (Some(30), None));

        let fixed = SharePayload::from(&calculate(
            6000,
            4,
            SplitPattern::OrganizerFixed {
                amount: Yen::new(2000),
            },
        ));
        assert_eq!((fixed.b, fixed.f), (None, Some(2000)));
        assert_eq!(
            fixed.into_input().unwrap().pattern,
            SplitPattern::OrganizerFixed {
                amount: Yen::new(2000)
            }
        );
    }

    #[test]
    fn payload_without_type_is_equal() {
        let payload: SharePayload = serde_json::from_str(r#"{"t":1000,"n":3}"#).unwrap();
        assert_eq!(
            payload.into_input().unwrap(),
            CalculationInput::equal(Yen::new(1000), 3)
        );
    }

    #[test]
    fn payload_errors() {
        let payload: SharePayload =
            serde_json::from_str(r#"{"t":1000,"n":3,"type":"organizer_more"}"#).unwrap();
        assert_eq!(
            payload.into_input(),
            Err(EngineError::InvalidInput(
                "share payload is missing `b`".to_string()
            ))
        );

        let payload: SharePayload =
            serde_json::from_str(r#"{"t":1000,"n":3,"type":"lottery"}"#).unwrap();
        assert_eq!(
            payload.into_input(),
            Err(EngineError::UnknownCalculationType("lottery".to_string()))
        );

        let payload: SharePayload = serde_json::from_str(r#"{"t":0,"n":3}"#).unwrap();
        assert!(payload.into_input().unwrap_err().is_invalid_input());
    }

    #[test]
    fn tags_follow_thresholds() {
        assert_eq!(
            HistoryTag::extract(&calculate(1000, 3, SplitPattern::Equal)),
            vec![
                HistoryTag::LowAmount,
                HistoryTag::SmallGroup,
                HistoryTag::HasRemainder
            ]
        );
        assert_eq!(
            HistoryTag::extract(&calculate(10_000, 10, SplitPattern::Equal)),
            vec![HistoryTag::HighAmount, HistoryTag::LargeGroup]
        );
        assert!(HistoryTag::extract(&calculate(5000, 5, SplitPattern::Equal)).is_empty());
        // More folds the remainder into the organizer payment.
        assert_eq!(
            HistoryTag::extract(&calculate(
                5000,
                4,
                SplitPattern::OrganizerMore { burden_percent: 20 }
            )),
            Vec::<HistoryTag>::new()
        );
    }

    #[test]
    fn history_entry_round_trips() {
        let clock = FixedClock::from_millis(1_700_000_123_456);
        let entry = HistoryEntry::new(calculate(6000, 3, SplitPattern::Equal), "忘年会", &clock);
        assert_eq!(entry.created_at.timestamp_millis(), 1_700_000_123_456);
        let export = HistoryExport {
            version: "1.0.0".to_string(),
            exported_at: entry.created_at,
            entries: vec![entry],
        };

        let json = serde_json::to_string(&export).unwrap();
        let back: HistoryExport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, export);

        let value = serde_json::to_value(&export.entries[0]).unwrap();
        assert_eq!(value["note"], "忘年会");
        assert_eq!(value["calculationResult"]["perPerson"], 2000);
        assert_eq!(value["tags"], serde_json::json!(["small_group"]));
        assert_eq!(value["createdAt"], 1_700_000_123_456_i64);
    }

    #[test]
    fn history_entry_time_comes_from_clock() {
        let result = calculate(1000, 3, SplitPattern::Equal);
        let clock = FixedClock(
            DateTime::from_timestamp(1_700_000_000, 987_654_321).unwrap(),
        );
        let first = HistoryEntry::new(result, "", &clock);
        let second = HistoryEntry::new(result, "", &clock);
        assert_eq!(first.created_at, second.created_at);
        assert_eq!(first.created_at.timestamp_millis(), 1_700_000_000_987);
        assert_ne!(first.id, second.id);
    }
}
