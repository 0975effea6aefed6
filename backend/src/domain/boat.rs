//! Boat aggregate and the denormalised load summaries it carries.
//!
//! ## Invariants
//! - Every entry in `loads` corresponds to a load whose carrier points back
//!   at this boat. The store offers no cross-entity transaction, so the
//!   association services own keeping both sides in step.
//! - `owner` never changes after creation; update and patch preserve it.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::entity_id::EntityId;
use crate::domain::load::Load;
use crate::domain::subject::Subject;

/// Validation errors for boat payload fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoatValidationError {
    /// `name` was empty once trimmed.
    #[error("boat name must not be empty")]
    EmptyName,
    /// `type` was empty once trimmed.
    #[error("boat type must not be empty")]
    EmptyType,
    /// `length` was negative.
    #[error("boat length must not be negative")]
    NegativeLength,
}

/// Denormalised reference to a load carried by a boat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoadSummary {
    /// Identifier of the carried load.
    pub id: EntityId,
    /// Canonical URL of the carried load.
    #[serde(rename = "self")]
    pub self_link: String,
}

impl From<&Load> for LoadSummary {
    fn from(load: &Load) -> Self {
        Self {
            id: load.id(),
            self_link: load.self_link().to_owned(),
        }
    }
}

/// Validated boat payload fields, shared by create and full update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoatDraft {
    name: String,
    boat_type: String,
    length: i64,
}

impl BoatDraft {
    /// Validate raw payload fields.
    pub fn new(
        name: impl Into<String>,
        boat_type: impl Into<String>,
        length: i64,
    ) -> Result<Self, BoatValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(BoatValidationError::EmptyName);
        }
        let boat_type = boat_type.into();
        if boat_type.trim().is_empty() {
            return Err(BoatValidationError::EmptyType);
        }
        if length < 0 {
            return Err(BoatValidationError::NegativeLength);
        }
        Ok(Self {
            name,
            boat_type,
            length,
        })
    }

    /// Boat name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Boat type, e.g. `"tug"`.
    #[must_use]
    pub fn boat_type(&self) -> &str {
        self.boat_type.as_str()
    }

    /// Boat length in feet.
    #[must_use]
    pub fn length(&self) -> i64 {
        self.length
    }
}

/// A boat owned by exactly one subject, carrying zero or more loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Boat {
    /// Store-generated identifier.
    id: EntityId,
    /// Boat name.
    name: String,
    /// Boat type, e.g. `"tug"`.
    #[serde(rename = "type")]
    boat_type: String,
    /// Boat length in feet.
    length: i64,
    /// Subject that owns this boat.
    owner: Subject,
    /// Summaries of the loads currently on board, in attachment order.
    loads: Vec<LoadSummary>,
    /// Canonical URL of this boat.
    #[serde(rename = "self")]
    self_link: String,
}

impl Boat {
    /// Assemble a boat from its stored parts. Used by persistence adapters
    /// after they have attached the computed `id` and `self` fields.
    #[must_use]
    pub fn from_parts(
        id: EntityId,
        self_link: String,
        draft: BoatDraft,
        owner: Subject,
        loads: Vec<LoadSummary>,
    ) -> Self {
        Self {
            id,
            name: draft.name,
            boat_type: draft.boat_type,
            length: draft.length,
            owner,
            loads,
            self_link,
        }
    }

    /// Store-generated identifier.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Boat name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Boat type.
    #[must_use]
    pub fn boat_type(&self) -> &str {
        self.boat_type.as_str()
    }

    /// Boat length in feet.
    #[must_use]
    pub fn length(&self) -> i64 {
        self.length
    }

    /// Owning subject.
    #[must_use]
    pub fn owner(&self) -> &Subject {
        &self.owner
    }

    /// Summaries of the loads currently on board.
    #[must_use]
    pub fn loads(&self) -> &[LoadSummary] {
        self.loads.as_slice()
    }

    /// Canonical URL of this boat.
    #[must_use]
    pub fn self_link(&self) -> &str {
        self.self_link.as_str()
    }

    /// Whether a load with this identifier is on board.
    #[must_use]
    pub fn carries(&self, load_id: EntityId) -> bool {
        self.loads.iter().any(|entry| entry.id == load_id)
    }

    /// Append a load summary. Callers check [`Boat::carries`] first; the
    /// sequence never holds duplicate identifiers.
    pub fn attach_load(&mut self, summary: LoadSummary) {
        self.loads.push(summary);
    }

    /// Remove the summary matching this identifier. Returns whether an
    /// entry was removed.
    pub fn detach_load(&mut self, load_id: EntityId) -> bool {
        let before = self.loads.len();
        self.loads.retain(|entry| entry.id != load_id);
        self.loads.len() != before
    }

    /// Replace every payload field, preserving `owner` and `loads`.
    pub fn apply_update(&mut self, draft: BoatDraft) {
        self.name = draft.name;
        self.boat_type = draft.boat_type;
        self.length = draft.length;
    }

    /// Overwrite only the supplied fields; omitted fields keep their
    /// current value.
    pub fn apply_patch(
        &mut self,
        name: Option<String>,
        boat_type: Option<String>,
        length: Option<i64>,
    ) -> Result<(), BoatValidationError> {
        let draft = BoatDraft::new(
            name.unwrap_or_else(|| self.name.clone()),
            boat_type.unwrap_or_else(|| self.boat_type.clone()),
            length.unwrap_or(self.length),
        )?;
        self.apply_update(draft);
        Ok(())
    }
}
