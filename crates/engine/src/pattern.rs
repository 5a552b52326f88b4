use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{EngineError, Yen};

/// Tag of a split pattern, without its parameter.
///
/// The wire form is the snake_case tag used in share tokens and history
/// records (`equal`, `organizer_more`, `organizer_less`, `organizer_fixed`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitKind {
    #[default]
    Equal,
    OrganizerMore,
    OrganizerLess,
    OrganizerFixed,
}

impl SplitKind {
    /// Canonical wire tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SplitKind::Equal => "equal",
            SplitKind::OrganizerMore => "organizer_more",
            SplitKind::OrganizerLess => "organizer_less",
            SplitKind::OrganizerFixed => "organizer_fixed",
        }
    }

    /// Short label shown next to a result.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            SplitKind::Equal => "均等割り",
            SplitKind::OrganizerMore => "幹事多め",
            SplitKind::OrganizerLess => "幹事少なめ",
            SplitKind::OrganizerFixed => "幹事固定",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            SplitKind::Equal => "全員で均等に割り勘します",
            SplitKind::OrganizerMore => "幹事が指定した割合だけ多く負担します",
            SplitKind::OrganizerLess => "幹事が指定した割合だけ少なく負担します",
            SplitKind::OrganizerFixed => "幹事が固定額を負担し、残りを均等に割ります",
        }
    }

    /// How leftover yen is treated by this pattern.
    #[must_use]
    pub const fn remainder_handling(self) -> &'static str {
        match self {
            SplitKind::Equal => "余りは表示され、調整は行いません",
            SplitKind::OrganizerMore => "余りは幹事が負担します",
            SplitKind::OrganizerLess => "余りは参加者間で分配されます",
            SplitKind::OrganizerFixed => "参加者間の割り勘で生じた余りは表示されます",
        }
    }

    /// Whether the pattern needs a parameter next to total and people.
    #[must_use]
    pub const fn takes_parameter(self) -> bool {
        !matches!(self, SplitKind::Equal)
    }
}

impl fmt::Display for SplitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SplitKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "equal" => Ok(SplitKind::Equal),
            "organizer_more" => Ok(SplitKind::OrganizerMore),
            "organizer_less" => Ok(SplitKind::OrganizerLess),
            "organizer_fixed" => Ok(SplitKind::OrganizerFixed),
            other => Err(EngineError::UnknownCalculationType(other.to_string())),
        }
    }
}

/// A split pattern together with the parameter it needs.
///
/// Carrying the parameter inside the variant makes a mismatched
/// pattern/parameter pair unrepresentable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SplitPattern {
    /// Everybody pays the same share, remainder is reported.
    #[default]
    Equal,
    /// The organizer pays `burden_percent`% on top of an equal share.
    OrganizerMore {
        #[serde(rename = "organizerBurdenPercent")]
        burden_percent: u32,
    },
    /// The organizer pays `reduction_percent`% less than an equal share.
    OrganizerLess {
        #[serde(rename = "organizerReductionPercent")]
        reduction_percent: u32,
    },
    /// The organizer pays a fixed amount, the rest is split equally.
    OrganizerFixed {
        #[serde(rename = "organizerFixedAmount")]
        amount: Yen,
    },
}

impl SplitPattern {
    #[must_use]
    pub const fn kind(self) -> SplitKind {
        match self {
            SplitPattern::Equal => SplitKind::Equal,
            SplitPattern::OrganizerMore { .. } => SplitKind::OrganizerMore,
            SplitPattern::OrganizerLess { .. } => SplitKind::OrganizerLess,
            SplitPattern::OrganizerFixed { .. } => SplitKind::OrganizerFixed,
        }
    }
}

impl From<SplitPattern> for SplitKind {
    fn from(value: SplitPattern) -> Self {
        value.kind()
    }
}
