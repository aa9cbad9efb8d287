//! Typed handles to declared model elements
//!
//! A `Ref<K>` is an element ID statically restricted to one kind: a field
//! typed `Ref<kinds::Step>` only accepts handles produced by declaring a
//! step. Wiring a handle of the wrong kind is a compile error, so kind
//! mismatches never reach a running program. IDs coming from serialized
//! documents are re-checked against the expected kind on deserialization.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use super::id::ElementId;
use super::kind::Kind;

/// Maps a zero-sized marker type to its model-element kind
pub trait KindMarker {
    const KIND: Kind;
}

/// Zero-sized marker types, one per model-element kind
pub mod kinds {
    use super::super::kind::Kind;
    use super::KindMarker;

    macro_rules! markers {
        ($($(#[$doc:meta])* $name:ident),* $(,)?) => {
            $(
                $(#[$doc])*
                #[derive(Debug, Clone, Copy, PartialEq, Eq)]
                pub struct $name;

                impl KindMarker for $name {
                    const KIND: Kind = Kind::$name;
                }
            )*
        };
    }

    markers! {
        Strategy,
        BusinessInitiative,
        Metric,
        Context,
        Journey,
        Milestone,
        Step,
        Action,
        Expectation,
        Stakeholder,
        Persona,
        Behavior,
        Test,
        Interaction,
        Attribute,
    }
}

/// A handle to a declared element, restricted to kind `K`
///
/// Handles are obtained from [`crate::Registry::declare`]; the type
/// parameter is what lets reference fields reject wrongly-kinded elements
/// before anything runs:
///
/// ```compile_fail
/// use blueprint_cli::model::{BehaviorOptions, MilestoneOptions};
/// use blueprint_cli::Registry;
///
/// let mut registry = Registry::new();
/// let not_a_step = registry
///     .declare(BehaviorOptions::new("NotAStep"))
///     .unwrap();
///
/// // A behavior handle cannot be used where a step handle is required.
/// let milestone = MilestoneOptions::new("DepositMilestone").step(not_a_step, 1);
/// ```
pub struct Ref<K: KindMarker> {
    id: ElementId,
    _kind: PhantomData<fn() -> K>,
}

impl<K: KindMarker> Ref<K> {
    /// Wraps an ID already known to carry kind `K`
    ///
    /// Only the registry and the document loader construct handles; both
    /// guarantee the ID's kind matches `K::KIND`.
    pub(crate) fn new(id: ElementId) -> Self {
        debug_assert_eq!(id.kind(), K::KIND);
        Self {
            id,
            _kind: PhantomData,
        }
    }

    /// Checks an untrusted ID against kind `K`
    pub fn from_id(id: ElementId) -> Result<Self, RefKindError> {
        if id.kind() == K::KIND {
            Ok(Self::new(id))
        } else {
            Err(RefKindError {
                expected: K::KIND,
                found: id.kind(),
                id,
            })
        }
    }

    /// Returns the underlying element ID
    pub fn id(&self) -> &ElementId {
        &self.id
    }

    /// Returns the kind this handle is restricted to
    pub fn kind(&self) -> Kind {
        K::KIND
    }

    /// Pairs this handle with an author-supplied order number
    pub fn at(self, order: u32) -> OrderedRef<K> {
        OrderedRef { inner: self, order }
    }
}

/// An ID carried a kind other than the one the handle requires
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Expected a {expected} reference, but '{id}' is a {found}")]
pub struct RefKindError {
    pub expected: Kind,
    pub found: Kind,
    pub id: ElementId,
}

// Manual impls: deriving would put unnecessary bounds on K.

impl<K: KindMarker> Clone for Ref<K> {
    fn clone(&self) -> Self {
        Self::new(self.id.clone())
    }
}

impl<K: KindMarker> PartialEq for Ref<K> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<K: KindMarker> Eq for Ref<K> {}

impl<K: KindMarker> Hash for Ref<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Hash::hash(&self.id, state);
    }
}

impl<K: KindMarker> fmt::Debug for Ref<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ref<{}>({})", K::KIND, self.id)
    }
}

impl<K: KindMarker> fmt::Display for Ref<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.id.fmt(f)
    }
}

impl<K: KindMarker> Serialize for Ref<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.id.serialize(serializer)
    }
}

impl<'de, K: KindMarker> Deserialize<'de> for Ref<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = ElementId::deserialize(deserializer)?;
        Ref::from_id(id).map_err(serde::de::Error::custom)
    }
}

/// A typed handle paired with an explicit position in an ordered list
///
/// Order numbers are author-supplied and carried as-is: no uniqueness or
/// contiguity is enforced, and consumers must tolerate gaps and duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "", deserialize = ""))]
pub struct OrderedRef<K: KindMarker> {
    #[serde(rename = "ref")]
    inner: Ref<K>,
    order: u32,
}

impl<K: KindMarker> OrderedRef<K> {
    /// Creates an ordered reference
    pub fn new(reference: Ref<K>, order: u32) -> Self {
        Self {
            inner: reference,
            order,
        }
    }

    /// Returns the underlying typed handle
    pub fn reference(&self) -> &Ref<K> {
        &self.inner
    }

    /// Returns the underlying element ID
    pub fn id(&self) -> &ElementId {
        self.inner.id()
    }

    /// Returns the author-supplied order number
    pub fn order(&self) -> u32 {
        self.order
    }
}
