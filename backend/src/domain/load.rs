//! Load aggregate and its denormalised carrier reference.
//!
//! ## Invariants
//! - `carrier` is `None` (unassociated) or names exactly one boat; a load
//!   is never on two boats at once.
//! - An absent or falsy stored carrier is normalised to `None` on read and
//!   serialised as an explicit JSON `null`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::boat::Boat;
use crate::domain::entity_id::EntityId;

/// Validation errors for load payload fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadValidationError {
    /// `weight` was negative.
    #[error("load weight must not be negative")]
    NegativeWeight,
    /// `content` was empty once trimmed.
    #[error("load content must not be empty")]
    EmptyContent,
    /// `delivery_date` was empty once trimmed.
    #[error("load delivery_date must not be empty")]
    EmptyDeliveryDate,
}

/// Denormalised reference to the boat currently carrying a load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CarrierSummary {
    /// Identifier of the carrying boat.
    pub id: EntityId,
    /// Name of the carrying boat at association time.
    pub name: String,
    /// Canonical URL of the carrying boat.
    #[serde(rename = "self")]
    pub self_link: String,
}

impl From<&Boat> for CarrierSummary {
    fn from(boat: &Boat) -> Self {
        Self {
            id: boat.id(),
            name: boat.name().to_owned(),
            self_link: boat.self_link().to_owned(),
        }
    }
}

/// Validated load payload fields, shared by create and full update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadDraft {
    weight: i64,
    content: String,
    delivery_date: String,
}

impl LoadDraft {
    /// Validate raw payload fields.
    pub fn new(
        weight: i64,
        content: impl Into<String>,
        delivery_date: impl Into<String>,
    ) -> Result<Self, LoadValidationError> {
        if weight < 0 {
            return Err(LoadValidationError::NegativeWeight);
        }
        let content = content.into();
        if content.trim().is_empty() {
            return Err(LoadValidationError::EmptyContent);
        }
        let delivery_date = delivery_date.into();
        if delivery_date.trim().is_empty() {
            return Err(LoadValidationError::EmptyDeliveryDate);
        }
        Ok(Self {
            weight,
            content,
            delivery_date,
        })
    }

    /// Load weight.
    #[must_use]
    pub fn weight(&self) -> i64 {
        self.weight
    }

    /// Description of the cargo.
    #[must_use]
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    /// Requested delivery date, kept as an opaque string.
    #[must_use]
    pub fn delivery_date(&self) -> &str {
        self.delivery_date.as_str()
    }
}

/// A shippable load, optionally associated to one carrying boat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Load {
    /// Store-generated identifier.
    id: EntityId,
    /// Load weight.
    weight: i64,
    /// Description of the cargo.
    content: String,
    /// Requested delivery date.
    delivery_date: String,
    /// The carrying boat, or `null` when unassociated.
    carrier: Option<CarrierSummary>,
    /// Canonical URL of this load.
    #[serde(rename = "self")]
    self_link: String,
}

impl Load {
    /// Assemble a load from its stored parts. Used by persistence adapters
    /// after they have attached the computed `id` and `self` fields.
    #[must_use]
    pub fn from_parts(
        id: EntityId,
        self_link: String,
        draft: LoadDraft,
        carrier: Option<CarrierSummary>,
    ) -> Self {
        Self {
            id,
            weight: draft.weight,
            content: draft.content,
            delivery_date: draft.delivery_date,
            carrier,
            self_link,
        }
    }

    /// Store-generated identifier.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Load weight.
    #[must_use]
    pub fn weight(&self) -> i64 {
        self.weight
    }

    /// Description of the cargo.
    #[must_use]
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    /// Requested delivery date.
    #[must_use]
    pub fn delivery_date(&self) -> &str {
        self.delivery_date.as_str()
    }

    /// The carrying boat, if any.
    #[must_use]
    pub fn carrier(&self) -> Option<&CarrierSummary> {
        self.carrier.as_ref()
    }

    /// Canonical URL of this load.
    #[must_use]
    pub fn self_link(&self) -> &str {
        self.self_link.as_str()
    }

    /// Record the boat now carrying this load.
    pub fn set_carrier(&mut self, carrier: CarrierSummary) {
        self.carrier = Some(carrier);
    }

    /// Clear the association with the carrying boat.
    pub fn clear_carrier(&mut self) {
        self.carrier = None;
    }

    /// Replace every payload field, preserving `carrier`.
    pub fn apply_update(&mut self, draft: LoadDraft) {
        self.weight = draft.weight;
        self.content = draft.content;
        self.delivery_date = draft.delivery_date;
    }

    /// Overwrite only the supplied fields; omitted fields keep their
    /// current value.
    pub fn apply_patch(
        &mut self,
        weight: Option<i64>,
        content: Option<String>,
        delivery_date: Option<String>,
    ) -> Result<(), LoadValidationError> {
        let draft = LoadDraft::new(
            weight.unwrap_or(self.weight),
            content.unwrap_or_else(|| self.content.clone()),
            delivery_date.unwrap_or_else(|| self.delivery_date.clone()),
        )?;
        self.apply_update(draft);
        Ok(())
    }
}
