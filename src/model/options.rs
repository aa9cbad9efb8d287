//! Per-kind options payloads
//!
//! Each model kind has one options struct: the metadata an author supplies
//! when declaring an element. `name` is required everywhere; every other
//! field is optional documentation with no behavioral effect. Reference
//! fields use typed handles, so only correctly-kinded elements can be
//! wired in.
//!
//! Declared payloads are retained on the element so export and validation
//! tooling can traverse them.

use serde::{Deserialize, Serialize};

use super::handle::{kinds, KindMarker, OrderedRef, Ref};
use super::id::ElementId;
use super::kind::Kind;

/// How an expectation is verified in practice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VerificationLevel {
    #[default]
    Unverified,
    Manual,
    Automated,
    Monitored,
}

impl VerificationLevel {
    pub fn label(&self) -> &'static str {
        match self {
            VerificationLevel::Unverified => "unverified",
            VerificationLevel::Manual => "manual",
            VerificationLevel::Automated => "automated",
            VerificationLevel::Monitored => "monitored",
        }
    }
}

impl std::fmt::Display for VerificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Quality/SLA documentation attached to an expectation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ServiceQuality {
    /// Target availability, as a percentage (e.g. 99.9)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_pct: Option<f64>,

    /// Target p99 latency in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p99_latency_ms: Option<u32>,

    /// Target sustained throughput, requests per second
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throughput_rps: Option<u32>,

    /// Free-form error budget note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_budget: Option<String>,
}

impl ServiceQuality {
    pub fn is_empty(&self) -> bool {
        self.availability_pct.is_none()
            && self.p99_latency_ms.is_none()
            && self.throughput_rps.is_none()
            && self.error_budget.is_none()
    }
}

/// An outgoing reference extracted from a payload, with the field it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    /// Name of the options field holding the reference
    pub role: &'static str,
    /// ID of the referenced element
    pub target: ElementId,
}

impl Reference {
    fn of<K: KindMarker>(role: &'static str, handle: &Ref<K>) -> Self {
        Self {
            role,
            target: handle.id().clone(),
        }
    }
}

fn push_refs<K: KindMarker>(out: &mut Vec<Reference>, role: &'static str, refs: &[Ref<K>]) {
    out.extend(refs.iter().map(|r| Reference::of(role, r)));
}

fn push_ordered<K: KindMarker>(
    out: &mut Vec<Reference>,
    role: &'static str,
    refs: &[OrderedRef<K>],
) {
    out.extend(refs.iter().map(|r| Reference::of(role, r.reference())));
}

fn push_opt<K: KindMarker>(out: &mut Vec<Reference>, role: &'static str, handle: &Option<Ref<K>>) {
    if let Some(handle) = handle {
        out.push(Reference::of(role, handle));
    }
}

macro_rules! common_builders {
    () => {
        /// Sets the description
        pub fn description(mut self, description: impl Into<String>) -> Self {
            self.description = Some(description.into());
            self
        }
    };
}

/// Options for a Strategy, the root of the hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyOptions {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vision: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub initiatives: Vec<Ref<kinds::BusinessInitiative>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stakeholders: Vec<Ref<kinds::Stakeholder>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl StrategyOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            vision: None,
            initiatives: Vec::new(),
            stakeholders: Vec::new(),
            tags: Vec::new(),
        }
    }

    common_builders!();

    pub fn vision(mut self, vision: impl Into<String>) -> Self {
        self.vision = Some(vision.into());
        self
    }

    pub fn initiative(mut self, initiative: Ref<kinds::BusinessInitiative>) -> Self {
        self.initiatives.push(initiative);
        self
    }

    pub fn stakeholder(mut self, stakeholder: Ref<kinds::Stakeholder>) -> Self {
        self.stakeholders.push(stakeholder);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// Options for a BusinessInitiative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessInitiativeOptions {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub journeys: Vec<Ref<kinds::Journey>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<Ref<kinds::Metric>>,
}

impl BusinessInitiativeOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            objective: None,
            journeys: Vec::new(),
            metrics: Vec::new(),
        }
    }

    common_builders!();

    pub fn objective(mut self, objective: impl Into<String>) -> Self {
        self.objective = Some(objective.into());
        self
    }

    pub fn journey(mut self, journey: Ref<kinds::Journey>) -> Self {
        self.journeys.push(journey);
        self
    }

    pub fn metric(mut self, metric: Ref<kinds::Metric>) -> Self {
        self.metrics.push(metric);
        self
    }
}

/// Options for a Journey
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyOptions {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub personas: Vec<Ref<kinds::Persona>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry_actions: Vec<Ref<kinds::Action>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub milestones: Vec<OrderedRef<kinds::Milestone>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Ref<kinds::Context>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl JourneyOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            personas: Vec::new(),
            entry_actions: Vec::new(),
            milestones: Vec::new(),
            context: None,
            tags: Vec::new(),
        }
    }

    common_builders!();

    pub fn persona(mut self, persona: Ref<kinds::Persona>) -> Self {
        self.personas.push(persona);
        self
    }

    pub fn entry_action(mut self, action: Ref<kinds::Action>) -> Self {
        self.entry_actions.push(action);
        self
    }

    /// Adds a milestone at an explicit position. Order numbers may repeat
    /// or leave gaps.
    pub fn milestone(mut self, milestone: Ref<kinds::Milestone>, order: u32) -> Self {
        self.milestones.push(milestone.at(order));
        self
    }

    pub fn context(mut self, context: Ref<kinds::Context>) -> Self {
        self.context = Some(context);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// Options for a Milestone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneOptions {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<OrderedRef<kinds::Step>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expectations: Vec<Ref<kinds::Expectation>>,
}

impl MilestoneOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            steps: Vec::new(),
            expectations: Vec::new(),
        }
    }

    common_builders!();

    /// Adds a step at an explicit position. Order numbers may repeat or
    /// leave gaps.
    pub fn step(mut self, step: Ref<kinds::Step>, order: u32) -> Self {
        self.steps.push(step.at(order));
        self
    }

    pub fn expectation(mut self, expectation: Ref<kinds::Expectation>) -> Self {
        self.expectations.push(expectation);
        self
    }
}

/// Options for a Step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOptions {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Ref<kinds::Action>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Ref<kinds::Attribute>>,
}

impl StepOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            actions: Vec::new(),
            attributes: Vec::new(),
        }
    }

    common_builders!();

    pub fn action(mut self, action: Ref<kinds::Action>) -> Self {
        self.actions.push(action);
        self
    }

    pub fn attribute(mut self, attribute: Ref<kinds::Attribute>) -> Self {
        self.attributes.push(attribute);
        self
    }
}

/// Options for an Action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOptions {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction: Option<Ref<kinds::Interaction>>,
}

impl ActionOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            interaction: None,
        }
    }

    common_builders!();

    pub fn interaction(mut self, interaction: Ref<kinds::Interaction>) -> Self {
        self.interaction = Some(interaction);
        self
    }
}

/// Options for an Expectation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectationOptions {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Ref<kinds::Stakeholder>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer: Option<Ref<kinds::Persona>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction: Option<Ref<kinds::Action>>,
    #[serde(default)]
    pub verification: VerificationLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behavior: Option<Ref<kinds::Behavior>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<ServiceQuality>,
}

impl ExpectationOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            provider: None,
            consumer: None,
            interaction: None,
            verification: VerificationLevel::default(),
            behavior: None,
            quality: None,
        }
    }

    common_builders!();

    pub fn provider(mut self, provider: Ref<kinds::Stakeholder>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn consumer(mut self, consumer: Ref<kinds::Persona>) -> Self {
        self.consumer = Some(consumer);
        self
    }

    pub fn interaction(mut self, interaction: Ref<kinds::Action>) -> Self {
        self.interaction = Some(interaction);
        self
    }

    pub fn verification(mut self, level: VerificationLevel) -> Self {
        self.verification = level;
        self
    }

    pub fn behavior(mut self, behavior: Ref<kinds::Behavior>) -> Self {
        self.behavior = Some(behavior);
        self
    }

    pub fn quality(mut self, quality: ServiceQuality) -> Self {
        self.quality = Some(quality);
        self
    }
}

/// Options for a Behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorOptions {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preconditions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub postconditions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tests: Vec<Ref<kinds::Test>>,
}

impl BehaviorOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            preconditions: Vec::new(),
            postconditions: Vec::new(),
            implementation: None,
            tests: Vec::new(),
        }
    }

    common_builders!();

    pub fn precondition(mut self, condition: impl Into<String>) -> Self {
        self.preconditions.push(condition.into());
        self
    }

    pub fn postcondition(mut self, condition: impl Into<String>) -> Self {
        self.postconditions.push(condition.into());
        self
    }

    pub fn implementation(mut self, note: impl Into<String>) -> Self {
        self.implementation = Some(note.into());
        self
    }

    pub fn test(mut self, test: Ref<kinds::Test>) -> Self {
        self.tests.push(test);
        self
    }
}

/// Options for a Test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestOptions {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
}

impl TestOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            scenario: None,
        }
    }

    common_builders!();

    pub fn scenario(mut self, scenario: impl Into<String>) -> Self {
        self.scenario = Some(scenario.into());
        self
    }
}

/// Options for a Stakeholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeholderOptions {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl StakeholderOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            role: None,
        }
    }

    common_builders!();

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// Options for a Persona
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaOptions {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub goals: Vec<String>,
}

impl PersonaOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            goals: Vec::new(),
        }
    }

    common_builders!();

    pub fn goal(mut self, goal: impl Into<String>) -> Self {
        self.goals.push(goal.into());
        self
    }
}

/// Options for a Metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricOptions {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl MetricOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            unit: None,
            target: None,
        }
    }

    common_builders!();

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

/// Options for a Context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextOptions {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub systems: Vec<String>,
}

impl ContextOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            systems: Vec::new(),
        }
    }

    common_builders!();

    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.systems.push(system.into());
        self
    }
}

/// Options for an Interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionOptions {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl InteractionOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            channel: None,
        }
    }

    common_builders!();

    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }
}

/// Options for an Attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeOptions {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl AttributeOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            value: None,
        }
    }

    common_builders!();

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// The retained options payload of a declared element, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    Strategy(StrategyOptions),
    BusinessInitiative(BusinessInitiativeOptions),
    Metric(MetricOptions),
    Context(ContextOptions),
    Journey(JourneyOptions),
    Milestone(MilestoneOptions),
    Step(StepOptions),
    Action(ActionOptions),
    Expectation(ExpectationOptions),
    Stakeholder(StakeholderOptions),
    Persona(PersonaOptions),
    Behavior(BehaviorOptions),
    Test(TestOptions),
    Interaction(InteractionOptions),
    Attribute(AttributeOptions),
}

impl Payload {
    /// Returns the kind this payload belongs to
    pub fn kind(&self) -> Kind {
        match self {
            Payload::Strategy(_) => Kind::Strategy,
            Payload::BusinessInitiative(_) => Kind::BusinessInitiative,
            Payload::Metric(_) => Kind::Metric,
            Payload::Context(_) => Kind::Context,
            Payload::Journey(_) => Kind::Journey,
            Payload::Milestone(_) => Kind::Milestone,
            Payload::Step(_) => Kind::Step,
            Payload::Action(_) => Kind::Action,
            Payload::Expectation(_) => Kind::Expectation,
            Payload::Stakeholder(_) => Kind::Stakeholder,
            Payload::Persona(_) => Kind::Persona,
            Payload::Behavior(_) => Kind::Behavior,
            Payload::Test(_) => Kind::Test,
            Payload::Interaction(_) => Kind::Interaction,
            Payload::Attribute(_) => Kind::Attribute,
        }
    }

    /// Returns the declared name
    pub fn name(&self) -> &str {
        match self {
            Payload::Strategy(o) => &o.name,
            Payload::BusinessInitiative(o) => &o.name,
            Payload::Metric(o) => &o.name,
            Payload::Context(o) => &o.name,
            Payload::Journey(o) => &o.name,
            Payload::Milestone(o) => &o.name,
            Payload::Step(o) => &o.name,
            Payload::Action(o) => &o.name,
            Payload::Expectation(o) => &o.name,
            Payload::Stakeholder(o) => &o.name,
            Payload::Persona(o) => &o.name,
            Payload::Behavior(o) => &o.name,
            Payload::Test(o) => &o.name,
            Payload::Interaction(o) => &o.name,
            Payload::Attribute(o) => &o.name,
        }
    }

    /// Returns the declared description, if any
    pub fn description(&self) -> Option<&str> {
        let description = match self {
            Payload::Strategy(o) => &o.description,
            Payload::BusinessInitiative(o) => &o.description,
            Payload::Metric(o) => &o.description,
            Payload::Context(o) => &o.description,
            Payload::Journey(o) => &o.description,
            Payload::Milestone(o) => &o.description,
            Payload::Step(o) => &o.description,
            Payload::Action(o) => &o.description,
            Payload::Expectation(o) => &o.description,
            Payload::Stakeholder(o) => &o.description,
            Payload::Persona(o) => &o.description,
            Payload::Behavior(o) => &o.description,
            Payload::Test(o) => &o.description,
            Payload::Interaction(o) => &o.description,
            Payload::Attribute(o) => &o.description,
        };
        description.as_deref()
    }

    /// Returns every outgoing reference with the field it was declared in
    pub fn references(&self) -> Vec<Reference> {
        let mut out = Vec::new();
        match self {
            Payload::Strategy(o) => {
                push_refs(&mut out, "initiatives", &o.initiatives);
                push_refs(&mut out, "stakeholders", &o.stakeholders);
            }
            Payload::BusinessInitiative(o) => {
                push_refs(&mut out, "journeys", &o.journeys);
                push_refs(&mut out, "metrics", &o.metrics);
            }
            Payload::Journey(o) => {
                push_refs(&mut out, "personas", &o.personas);
                push_refs(&mut out, "entry_actions", &o.entry_actions);
                push_ordered(&mut out, "milestones", &o.milestones);
                push_opt(&mut out, "context", &o.context);
            }
            Payload::Milestone(o) => {
                push_ordered(&mut out, "steps", &o.steps);
                push_refs(&mut out, "expectations", &o.expectations);
            }
            Payload::Step(o) => {
                push_refs(&mut out, "actions", &o.actions);
                push_refs(&mut out, "attributes", &o.attributes);
            }
            Payload::Action(o) => {
                push_opt(&mut out, "interaction", &o.interaction);
            }
            Payload::Expectation(o) => {
                push_opt(&mut out, "provider", &o.provider);
                push_opt(&mut out, "consumer", &o.consumer);
                push_opt(&mut out, "interaction", &o.interaction);
                push_opt(&mut out, "behavior", &o.behavior);
            }
            Payload::Behavior(o) => {
                push_refs(&mut out, "tests", &o.tests);
            }
            Payload::Metric(_)
            | Payload::Context(_)
            | Payload::Stakeholder(_)
            | Payload::Persona(_)
            | Payload::Test(_)
            | Payload::Interaction(_)
            | Payload::Attribute(_) => {}
        }
        out
    }

    /// Returns the ordered reference lists in this payload, with the field
    /// name, for duplicate-order reporting
    pub fn ordered_lists(&self) -> Vec<(&'static str, Vec<(ElementId, u32)>)> {
        match self {
            Payload::Journey(o) => vec![(
                "milestones",
                o.milestones
                    .iter()
                    .map(|m| (m.id().clone(), m.order()))
                    .collect(),
            )],
            Payload::Milestone(o) => vec![(
                "steps",
                o.steps.iter().map(|s| (s.id().clone(), s.order())).collect(),
            )],
            _ => Vec::new(),
        }
    }
}

/// The common contract of all options types: which kind they declare and
/// how they become a retained payload
pub trait Declare {
    type Kind: KindMarker;

    fn name(&self) -> &str;
    fn into_payload(self) -> Payload;
}

macro_rules! impl_declare {
    ($($options:ident => $kind:ident),* $(,)?) => {
        $(
            impl Declare for $options {
                type Kind = kinds::$kind;

                fn name(&self) -> &str {
                    &self.name
                }

                fn into_payload(self) -> Payload {
                    Payload::$kind(self)
                }
            }
        )*
    };
}

impl_declare! {
    StrategyOptions => Strategy,
    BusinessInitiativeOptions => BusinessInitiative,
    MetricOptions => Metric,
    ContextOptions => Context,
    JourneyOptions => Journey,
    MilestoneOptions => Milestone,
    StepOptions => Step,
    ActionOptions => Action,
    ExpectationOptions => Expectation,
    StakeholderOptions => Stakeholder,
    PersonaOptions => Persona,
    BehaviorOptions => Behavior,
    TestOptions => Test,
    InteractionOptions => Interaction,
    AttributeOptions => Attribute,
}
