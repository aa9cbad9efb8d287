//! Declared model elements
//!
//! An element is the explicit record a declaration leaves behind: the
//! derived ID, the declaration timestamp and the retained options payload.
//! The kind lives on the payload (and is folded into the ID), assigned
//! exactly once and never reassigned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::ElementId;
use super::kind::Kind;
use super::options::Payload;

/// A declared model element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier, derived from kind and name
    pub id: ElementId,

    /// When the element was declared
    pub declared_at: DateTime<Utc>,

    /// The retained options payload (carries the kind tag and name)
    #[serde(flatten)]
    pub payload: Payload,
}

impl Element {
    /// Creates an element from a payload, deriving its ID
    pub fn new(payload: Payload) -> Self {
        Self {
            id: ElementId::new(payload.kind(), payload.name()),
            declared_at: Utc::now(),
            payload,
        }
    }

    /// Returns the element's kind
    pub fn kind(&self) -> Kind {
        self.payload.kind()
    }

    /// Returns the element's declared name
    pub fn name(&self) -> &str {
        self.payload.name()
    }

    /// Returns true if the ID is consistent with the kind and name
    pub fn id_is_consistent(&self) -> bool {
        self.id.kind() == self.kind() && self.id.matches_name(self.name())
    }
}
