//! Participant registry
//!
//! In-memory lookup of participants by id. Registration is an upsert: the
//! latest profile wins and the participant's balances are left untouched.

use std::collections::BTreeMap;

use crate::error::{SplitLedgerError, SplitLedgerResult};
use crate::models::{Participant, ParticipantId};

#[derive(Debug, Default, Clone)]
pub struct ParticipantRegistry {
    participants: BTreeMap<ParticipantId, Participant>,
}

impl ParticipantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a participant. Returns true if the id was new.
    pub fn register(&mut self, participant: Participant) -> bool {
        self.participants
            .insert(participant.id.clone(), participant)
            .is_none()
    }

    pub fn get(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.get(id)
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.participants.contains_key(id)
    }

    /// Fail with `UNKNOWN_USER` if `id` is not registered
    pub fn require(&self, id: &ParticipantId) -> SplitLedgerResult<&Participant> {
        self.get(id)
            .ok_or_else(|| SplitLedgerError::UnknownUser(id.to_string()))
    }

    /// Display name for `id`, falling back to the raw id for strangers
    pub fn name_of<'a>(&'a self, id: &'a ParticipantId) -> &'a str {
        self.get(id).map(|p| p.display_name()).unwrap_or(id.as_str())
    }

    /// All participants ordered by id
    pub fn all(&self) -> Vec<Participant> {
        self.participants.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
