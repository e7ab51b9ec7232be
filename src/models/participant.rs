//! Participant model
//!
//! A member of the group who can pay for expenses or owe a share of them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ParticipantId;

/// A registered participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Caller-supplied identifier
    pub id: ParticipantId,

    /// Display name used in balance reports
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub mobile: String,

    /// When the participant was last (re-)registered
    pub registered_at: DateTime<Utc>,
}

impl Participant {
    /// Create a new participant
    pub fn new(
        id: impl Into<ParticipantId>,
        name: impl Into<String>,
        email: impl Into<String>,
        mobile: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into().trim().to_string(),
            email: email.into().trim().to_string(),
            mobile: mobile.into().trim().to_string(),
            registered_at: Utc::now(),
        }
    }

    /// Name to show in reports, falling back to the id when no name was given
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.id.as_str()
        } else {
            &self.name
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name(), self.id)
    }
}
