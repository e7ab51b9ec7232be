//! Split models
//!
//! A split policy is one of three closed kinds. Raw caller input is a tagged
//! union over the same kinds, and the finalized [`Split`] carries the computed
//! amount each participant owes.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ParticipantId;
use super::money::Money;
use super::percent::Percentage;

/// How an expense is divided among its participants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SplitKind {
    /// Divide the total evenly
    Equal,
    /// Each participant owes a caller-supplied amount
    Exact,
    /// Each participant owes a caller-supplied percentage
    Percent,
}

impl SplitKind {
    /// Parse a split kind from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EQUAL" => Some(Self::Equal),
            "EXACT" => Some(Self::Exact),
            "PERCENT" | "PERCENTAGE" => Some(Self::Percent),
            _ => None,
        }
    }

    /// Get all split kinds
    pub fn all() -> &'static [Self] {
        &[Self::Equal, Self::Exact, Self::Percent]
    }
}

impl fmt::Display for SplitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "EQUAL"),
            Self::Exact => write!(f, "EXACT"),
            Self::Percent => write!(f, "PERCENT"),
        }
    }
}

/// Raw per-participant input, before the split engine has run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "UPPERCASE")]
pub enum SplitInput {
    Equal {
        participant: ParticipantId,
    },
    Exact {
        participant: ParticipantId,
        amount: Money,
    },
    Percent {
        participant: ParticipantId,
        percent: Percentage,
    },
}

impl SplitInput {
    pub fn equal(participant: impl Into<ParticipantId>) -> Self {
        Self::Equal {
            participant: participant.into(),
        }
    }

    pub fn exact(participant: impl Into<ParticipantId>, amount: Money) -> Self {
        Self::Exact {
            participant: participant.into(),
            amount,
        }
    }

    pub fn percent(participant: impl Into<ParticipantId>, percent: Percentage) -> Self {
        Self::Percent {
            participant: participant.into(),
            percent,
        }
    }

    /// The policy this input was written for
    pub fn kind(&self) -> SplitKind {
        match self {
            Self::Equal { .. } => SplitKind::Equal,
            Self::Exact { .. } => SplitKind::Exact,
            Self::Percent { .. } => SplitKind::Percent,
        }
    }

    pub fn participant(&self) -> &ParticipantId {
        match self {
            Self::Equal { participant }
            | Self::Exact { participant, .. }
            | Self::Percent { participant, .. } => participant,
        }
    }
}

/// A participant's computed share of one expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    /// Who owes this share
    pub participant: ParticipantId,

    /// The amount owed to the payer
    pub amount: Money,

    /// The requested percentage, for PERCENT splits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<Percentage>,
}

impl Split {
    /// Create a new split
    pub fn new(participant: impl Into<ParticipantId>, amount: Money) -> Self {
        Self {
            participant: participant.into(),
            amount,
            percent: None,
        }
    }

    /// Create a split that records the percentage it was derived from
    pub fn with_percent(
        participant: impl Into<ParticipantId>,
        amount: Money,
        percent: Percentage,
    ) -> Self {
        Self {
            participant: participant.into(),
            amount,
            percent: Some(percent),
        }
    }
}
