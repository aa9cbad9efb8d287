//! The element registry
//!
//! A registry is the declare-once arena behind a model: each element is
//! inserted exactly once by [`Registry::declare`] and referenced by
//! identity afterwards. Declaring requires every referenced element to
//! already be present, so a registry built through the typed API is always
//! closed under references (and therefore acyclic). Registries rebuilt
//! from serialized documents re-validate everything the typed API
//! guarantees by construction.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::model::{Declare, Element, ElementId, Kind, KindMarker, Ref};

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("Element already declared: {kind} '{name}' ({id})")]
    AlreadyDeclared {
        id: ElementId,
        kind: Kind,
        name: String,
    },

    #[error("{kind} '{name}' references unknown element {target} in field '{role}'")]
    UnknownReference {
        kind: Kind,
        name: String,
        role: &'static str,
        target: ElementId,
    },

    #[error("Element name must not be empty")]
    EmptyName,

    #[error("Element ID '{id}' does not match its kind and name ('{name}')")]
    InconsistentId { id: ElementId, name: String },
}

/// Arena of declared model elements, keyed by ID
#[derive(Debug, Default)]
pub struct Registry {
    elements: BTreeMap<String, Element>,
}

impl Registry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            elements: BTreeMap::new(),
        }
    }

    /// Declares an element and returns a typed handle to it
    ///
    /// Fails if an element of the same kind and name was already declared,
    /// or if the options reference an element not yet in the registry.
    /// Declaring one element never touches any other.
    pub fn declare<O: Declare>(&mut self, options: O) -> Result<Ref<O::Kind>, RegistryError> {
        let name = options.name().trim().to_string();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }

        let payload = options.into_payload();
        let kind = payload.kind();
        let id = ElementId::new(kind, &name);

        if self.elements.contains_key(&id.to_string()) {
            return Err(RegistryError::AlreadyDeclared { id, kind, name });
        }

        for reference in payload.references() {
            if !self.contains(&reference.target) {
                return Err(RegistryError::UnknownReference {
                    kind,
                    name,
                    role: reference.role,
                    target: reference.target,
                });
            }
        }

        self.elements.insert(id.to_string(), Element::new(payload));
        Ok(Ref::new(id))
    }

    /// Rebuilds a registry from loaded elements, re-validating IDs,
    /// duplicates and references
    pub fn from_elements(
        elements: impl IntoIterator<Item = Element>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();

        // First pass: IDs and duplicates. References are checked against
        // the whole set afterwards since documents carry no declaration
        // order.
        for element in elements {
            if !element.id_is_consistent() {
                return Err(RegistryError::InconsistentId {
                    id: element.id.clone(),
                    name: element.name().to_string(),
                });
            }
            let key = element.id.to_string();
            if let Some(existing) = registry.elements.get(&key) {
                return Err(RegistryError::AlreadyDeclared {
                    id: existing.id.clone(),
                    kind: existing.kind(),
                    name: existing.name().to_string(),
                });
            }
            registry.elements.insert(key, element);
        }

        for element in registry.elements.values() {
            for reference in element.payload.references() {
                if !registry.contains(&reference.target) {
                    return Err(RegistryError::UnknownReference {
                        kind: element.kind(),
                        name: element.name().to_string(),
                        role: reference.role,
                        target: reference.target,
                    });
                }
            }
        }

        Ok(registry)
    }

    /// Looks up an element by ID
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.get(&id.to_string())
    }

    /// Resolves a typed handle to its element
    pub fn resolve<K: KindMarker>(&self, handle: &Ref<K>) -> Option<&Element> {
        self.get(handle.id())
    }

    /// Returns the declared kind of an element, if present
    ///
    /// This is the targeted kind lookup: enumeration never exposes
    /// anything different from what this returns.
    pub fn kind_of(&self, id: &ElementId) -> Option<Kind> {
        self.get(id).map(Element::kind)
    }

    /// Returns true if the element is declared
    pub fn contains(&self, id: &ElementId) -> bool {
        self.elements.contains_key(&id.to_string())
    }

    /// Iterates over all elements, ordered by ID
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// Iterates over elements of one kind, ordered by ID
    pub fn by_kind(&self, kind: Kind) -> impl Iterator<Item = &Element> + '_ {
        self.iter().filter(move |e| e.kind() == kind)
    }

    /// Returns the number of declared elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if nothing has been declared
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Consumes the registry, yielding its elements ordered by ID
    pub fn into_elements(self) -> Vec<Element> {
        self.elements.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        ActionOptions, BehaviorOptions, MilestoneOptions, StepOptions, TestOptions,
    };

    #[test]
    fn declare_returns_resolvable_handle() {
        let mut registry = Registry::new();
        let deposit = registry.declare(ActionOptions::new("Deposit")).unwrap();

        assert_eq!(registry.len(), 1);
        let element = registry.resolve(&deposit).unwrap();
        assert_eq!(element.name(), "Deposit");
        assert_eq!(element.kind(), Kind::Action);
    }

    #[test]
    fn kind_lookup_returns_declared_kind() {
        let mut registry = Registry::new();
        let deposit = registry.declare(ActionOptions::new("Deposit")).unwrap();
        let behavior = registry
            .declare(BehaviorOptions::new("ValidateDeposit"))
            .unwrap();

        assert_eq!(registry.kind_of(deposit.id()), Some(Kind::Action));
        assert_eq!(registry.kind_of(behavior.id()), Some(Kind::Behavior));
        assert_eq!(
            registry.kind_of(&ElementId::new(Kind::Test, "missing")),
            None
        );
    }

    #[test]
    fn duplicate_declaration_is_rejected() {
        let mut registry = Registry::new();
        registry.declare(ActionOptions::new("Deposit")).unwrap();

        let err = registry
            .declare(ActionOptions::new("Deposit"))
            .unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyDeclared { kind, .. } if kind == Kind::Action));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn same_name_different_kind_is_allowed() {
        let mut registry = Registry::new();
        registry.declare(ActionOptions::new("Deposit")).unwrap();
        registry.declare(StepOptions::new("Deposit")).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn reference_to_undeclared_element_is_rejected() {
        let mut registry = Registry::new();
        // Build a handle in a separate registry, then use it in this one.
        let mut other = Registry::new();
        let step = other.declare(StepOptions::new("Orphan step")).unwrap();

        let err = registry
            .declare(MilestoneOptions::new("M").step(step, 1))
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::UnknownReference { role: "steps", .. }
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut registry = Registry::new();
        let err = registry.declare(ActionOptions::new("   ")).unwrap_err();
        assert_eq!(err, RegistryError::EmptyName);
    }

    #[test]
    fn declaring_one_element_leaves_others_untouched() {
        let mut registry = Registry::new();
        let c = registry.declare(TestOptions::new("C")).unwrap();
        let c_element = registry.resolve(&c).unwrap().clone();

        registry.declare(TestOptions::new("D")).unwrap();

        assert_eq!(registry.resolve(&c), Some(&c_element));
        assert_eq!(registry.kind_of(c.id()), Some(Kind::Test));
    }

    #[test]
    fn deposit_chain_declares_cleanly() {
        // The end-to-end chain: action, behavior without tests, steps,
        // milestone listing only step handles.
        let mut registry = Registry::new();

        let deposit = registry.declare(ActionOptions::new("Deposit")).unwrap();
        let validate = registry
            .declare(BehaviorOptions::new("ValidateDeposit"))
            .unwrap();
        let enter = registry
            .declare(StepOptions::new("Enter amount").action(deposit.clone()))
            .unwrap();
        let confirm = registry.declare(StepOptions::new("Confirm")).unwrap();
        let milestone = registry
            .declare(
                MilestoneOptions::new("DepositMilestone")
                    .step(enter, 1)
                    .step(confirm, 2),
            )
            .unwrap();

        assert_eq!(registry.kind_of(deposit.id()), Some(Kind::Action));
        assert_eq!(registry.kind_of(validate.id()), Some(Kind::Behavior));
        assert_eq!(registry.kind_of(milestone.id()), Some(Kind::Milestone));
    }

    #[test]
    fn from_elements_roundtrip() {
        let mut registry = Registry::new();
        let step = registry.declare(StepOptions::new("Enter amount")).unwrap();
        registry
            .declare(MilestoneOptions::new("M").step(step, 1))
            .unwrap();

        let elements = registry.into_elements();
        let rebuilt = Registry::from_elements(elements).unwrap();
        assert_eq!(rebuilt.len(), 2);
        assert_eq!(
            rebuilt.kind_of(&ElementId::new(Kind::Milestone, "M")),
            Some(Kind::Milestone)
        );
    }

    #[test]
    fn from_elements_rejects_dangling_reference() {
        let mut registry = Registry::new();
        let step = registry.declare(StepOptions::new("S")).unwrap();
        registry
            .declare(MilestoneOptions::new("M").step(step.clone(), 1))
            .unwrap();

        let elements: Vec<Element> = registry
            .into_elements()
            .into_iter()
            .filter(|e| &e.id != step.id())
            .collect();

        let err = Registry::from_elements(elements).unwrap_err();
        assert!(matches!(err, RegistryError::UnknownReference { .. }));
    }

    #[test]
    fn from_elements_rejects_tampered_id() {
        let mut registry = Registry::new();
        registry.declare(StepOptions::new("S")).unwrap();

        let mut elements = registry.into_elements();
        elements[0].id = ElementId::new(Kind::Step, "Renamed");

        let err = Registry::from_elements(elements).unwrap_err();
        assert!(matches!(err, RegistryError::InconsistentId { .. }));
    }

    #[test]
    fn by_kind_filters() {
        let mut registry = Registry::new();
        registry.declare(StepOptions::new("A")).unwrap();
        registry.declare(StepOptions::new("B")).unwrap();
        registry.declare(ActionOptions::new("A")).unwrap();

        assert_eq!(registry.by_kind(Kind::Step).count(), 2);
        assert_eq!(registry.by_kind(Kind::Action).count(), 1);
        assert_eq!(registry.by_kind(Kind::Journey).count(), 0);
    }
}
