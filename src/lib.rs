//! Blueprint CLI - Documentation-as-code for product strategy models
//!
//! Blueprint models a product as typed, cross-referenced elements: strategies
//! break into initiatives, journeys, milestones and steps, with expectations,
//! behaviors and tests hanging off them. Elements are declared through typed
//! builder options and collected in a [`Registry`] that rejects duplicate
//! declarations and dangling references. Kind-checked handles ([`model::Ref`])
//! make cross-kind reference mistakes a compile error.

pub mod cli;
pub mod export;
pub mod model;
pub mod registry;

pub use model::{Element, ElementId, Kind};
pub use registry::{Registry, RegistryError};
