//! Rank label value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Mark placed on a single option: a rank `1`-`5`, `No`, or unset.
///
/// Serializes to the wire strings `"1"`..`"5"`, `"No"` and `""`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RankLabel {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "No")]
    No,
    #[default]
    #[serde(rename = "")]
    Unset,
}

impl RankLabel {
    /// All labels in display order
    pub const ALL: [RankLabel; 7] = [
        RankLabel::One,
        RankLabel::Two,
        RankLabel::Three,
        RankLabel::Four,
        RankLabel::Five,
        RankLabel::No,
        RankLabel::Unset,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RankLabel::One => "1",
            RankLabel::Two => "2",
            RankLabel::Three => "3",
            RankLabel::Four => "4",
            RankLabel::Five => "5",
            RankLabel::No => "No",
            RankLabel::Unset => "",
        }
    }

    /// Whether the option carries any mark
    pub fn is_set(&self) -> bool {
        !matches!(self, RankLabel::Unset)
    }

    /// Numeric ranks are subject to per-question exclusivity; `No` is not.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            RankLabel::One | RankLabel::Two | RankLabel::Three | RankLabel::Four | RankLabel::Five
        )
    }
}

impl std::fmt::Display for RankLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RankLabel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(RankLabel::One),
            "2" => Ok(RankLabel::Two),
            "3" => Ok(RankLabel::Three),
            "4" => Ok(RankLabel::Four),
            "5" => Ok(RankLabel::Five),
            "No" => Ok(RankLabel::No),
            "" => Ok(RankLabel::Unset),
            other => Err(DomainError::InvalidRankLabel(other.to_string())),
        }
    }
}
