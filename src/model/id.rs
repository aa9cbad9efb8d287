//! Element IDs
//!
//! ID format: `{kind-code}-{7-char-hash}` (e.g. `jn-7f2b4c1` for a journey,
//! `sp-9d3e5f2` for a step). The hash is derived from the kind code and the
//! element name only, so IDs are deterministic: declaring the same (kind,
//! name) pair twice produces the same ID, which is how the registry detects
//! duplicate declarations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::kind::Kind;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid element ID format: expected '{{kind-code}}-{{7-char-hash}}', got '{0}'")]
    InvalidFormat(String),

    #[error("Unknown kind code '{0}' in element ID '{1}'")]
    UnknownKindCode(String, String),
}

/// Generates a 7-character hash from a kind code and element name
fn generate_hash(code: &str, name: &str) -> String {
    let input = format!("{}:{}", code, name);
    let hash = blake3::hash(input.as_bytes());
    let hex = hash.to_hex();
    hex[..7].to_string()
}

/// Identifier of a model element, in the format `{kind-code}-{7-char-hash}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ElementId {
    kind: Kind,
    hash: String,
}

impl ElementId {
    /// Derives the ID for an element of the given kind and name
    pub fn new(kind: Kind, name: &str) -> Self {
        Self {
            kind,
            hash: generate_hash(kind.code(), name.trim()),
        }
    }

    /// Returns the kind encoded in this ID
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the hash portion of the ID
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Returns true if this is the ID that `name` would produce for this kind
    pub fn matches_name(&self, name: &str) -> bool {
        self.hash == generate_hash(self.kind.code(), name.trim())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind.code(), self.hash)
    }
}

impl FromStr for ElementId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (code, hash) = s
            .split_once('-')
            .ok_or_else(|| IdError::InvalidFormat(s.to_string()))?;

        if hash.len() != 7 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(IdError::InvalidFormat(s.to_string()));
        }

        let kind = Kind::from_code(code)
            .ok_or_else(|| IdError::UnknownKindCode(code.to_string(), s.to_string()))?;

        Ok(Self {
            kind,
            hash: hash.to_string(),
        })
    }
}

impl TryFrom<String> for ElementId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ElementId> for String {
    fn from(id: ElementId) -> Self {
        id.to_string()
    }
}
