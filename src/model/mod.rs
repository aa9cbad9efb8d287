//! Model elements, kinds, typed handles and options payloads
//!
//! Contains the core modeling vocabulary without any I/O concerns.

mod element;
mod graph;
mod handle;
mod id;
mod kind;
mod options;

pub use element::Element;
pub use graph::{GraphError, Issue, ReferenceGraph, Severity};
pub use handle::{kinds, KindMarker, OrderedRef, Ref, RefKindError};
pub use id::{ElementId, IdError};
pub use kind::Kind;
pub use options::{
    ActionOptions, AttributeOptions, BehaviorOptions, BusinessInitiativeOptions, ContextOptions,
    Declare, ExpectationOptions, InteractionOptions, JourneyOptions, MetricOptions,
    MilestoneOptions, Payload, PersonaOptions, Reference, ServiceQuality, StakeholderOptions,
    StepOptions, StrategyOptions, TestOptions, VerificationLevel,
};
