//! Registered API user.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::entity_id::EntityId;
use crate::domain::subject::Subject;

/// A user registered on first successful OAuth exchange.
///
/// Users are never updated or deleted by this system; the only relation to
/// other resources is `subject` equality with a boat's owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Store-generated identifier.
    id: EntityId,
    /// Stable OAuth identity, unique per account.
    subject: Subject,
}

impl User {
    /// Assemble a user from its stored parts.
    #[must_use]
    pub fn from_parts(id: EntityId, subject: Subject) -> Self {
        Self { id, subject }
    }

    /// Store-generated identifier.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Stable OAuth identity.
    #[must_use]
    pub fn subject(&self) -> &Subject {
        &self.subject
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn wire_shape_exposes_id_and_subject() {
        let user = User::from_parts(
            EntityId::new(3).expect("positive id"),
            Subject::new("110248495921238986420").expect("non-empty subject"),
        );
        let value = serde_json::to_value(&user).expect("serialisable");
        assert_eq!(value["id"], "3");
        assert_eq!(value["subject"], "110248495921238986420");
    }
}
