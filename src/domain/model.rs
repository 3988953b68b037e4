use crate::utils::error::{Result, SantaError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use thiserror::Error;

static NO_EXCLUSIONS: BTreeSet<String> = BTreeSet::new();

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub contact: String,
}

impl Participant {
    pub fn new(name: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contact: contact.into(),
        }
    }
}

/// Non-empty set of participants with unique names, kept in name order.
/// That order is the order givers are processed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    pub fn new(mut participants: Vec<Participant>) -> Result<Self> {
        if participants.is_empty() {
            return Err(SantaError::ConfigValidationError {
                field: "participants".to_string(),
                message: "at least one participant is required".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for participant in &participants {
            if participant.name.trim().is_empty() {
                return Err(SantaError::InvalidConfigValueError {
                    field: "participants".to_string(),
                    value: participant.name.clone(),
                    reason: "participant name cannot be blank".to_string(),
                });
            }
            if participant.contact.trim().is_empty() {
                return Err(SantaError::InvalidConfigValueError {
                    field: format!("participants.{}", participant.name),
                    value: participant.contact.clone(),
                    reason: "contact address cannot be blank".to_string(),
                });
            }
            if !seen.insert(participant.name.as_str()) {
                return Err(SantaError::InvalidConfigValueError {
                    field: "participants".to_string(),
                    value: participant.name.clone(),
                    reason: "participant names must be unique".to_string(),
                });
            }
        }

        participants.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Self { participants })
    }

    pub fn from_contacts(contacts: &BTreeMap<String, String>) -> Result<Self> {
        Self::new(
            contacts
                .iter()
                .map(|(name, contact)| Participant::new(name, contact))
                .collect(),
        )
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.participants.iter().map(|p| p.name.as_str())
    }

    pub fn contact_of(&self, name: &str) -> Option<&str> {
        self.participants
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.contact.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.participants.iter().any(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

/// Giver -> receivers the giver must not draw. One-directional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExclusionRelation {
    rules: BTreeMap<String, BTreeSet<String>>,
}

impl ExclusionRelation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total lookup: givers without a rule get the empty set.
    pub fn excluded_for(&self, giver: &str) -> &BTreeSet<String> {
        self.rules.get(giver).unwrap_or(&NO_EXCLUSIONS)
    }

    pub fn excludes(&self, giver: &str, receiver: &str) -> bool {
        self.excluded_for(giver).contains(receiver)
    }
}

impl<G, R, I> FromIterator<(G, I)> for ExclusionRelation
where
    G: Into<String>,
    R: Into<String>,
    I: IntoIterator<Item = R>,
{
    fn from_iter<T: IntoIterator<Item = (G, I)>>(iter: T) -> Self {
        let mut relation = Self::new();
        for (giver, receivers) in iter {
            let giver = giver.into();
            let entry = relation.rules.entry(giver).or_default();
            entry.extend(receivers.into_iter().map(Into::into));
        }
        relation
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub giver: String,
    pub receiver: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentViolation {
    #[error("{0} has no receiver")]
    MissingGiver(String),
    #[error("{0} is not a participant")]
    UnknownParticipant(String),
    #[error("{0} is assigned more than once")]
    DuplicateReceiver(String),
    #[error("{0} is assigned to themselves")]
    SelfAssignment(String),
    #[error("{giver} may not give to {receiver}")]
    ExcludedPair { giver: String, receiver: String },
}

/// Giver -> receiver pairs, in the order the givers were processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pairs: Vec<Pairing>,
}

impl Assignment {
    pub(crate) fn from_pairs(pairs: Vec<Pairing>) -> Self {
        Self { pairs }
    }

    pub fn receiver_for(&self, giver: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|p| p.giver == giver)
            .map(|p| p.receiver.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pairing> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Checks that this is a complete derangement of `roster` respecting `exclusions`.
    pub fn verify(
        &self,
        roster: &Roster,
        exclusions: &ExclusionRelation,
    ) -> std::result::Result<(), AssignmentViolation> {
        let mut givers = HashSet::new();
        let mut receivers = HashSet::new();

        for pair in &self.pairs {
            if !roster.contains(&pair.giver) {
                return Err(AssignmentViolation::UnknownParticipant(pair.giver.clone()));
            }
            if !roster.contains(&pair.receiver) {
                return Err(AssignmentViolation::UnknownParticipant(pair.receiver.clone()));
            }
            if pair.giver == pair.receiver {
                return Err(AssignmentViolation::SelfAssignment(pair.giver.clone()));
            }
            if exclusions.excludes(&pair.giver, &pair.receiver) {
                return Err(AssignmentViolation::ExcludedPair {
                    giver: pair.giver.clone(),
                    receiver: pair.receiver.clone(),
                });
            }
            if !receivers.insert(pair.receiver.as_str()) {
                return Err(AssignmentViolation::DuplicateReceiver(pair.receiver.clone()));
            }
            givers.insert(pair.giver.as_str());
        }

        match roster.names().find(|name| !givers.contains(name)) {
            Some(name) => Err(AssignmentViolation::MissingGiver(name.to_string())),
            None => Ok(()),
        }
    }
}
