//! Model-element kinds
//!
//! Every element in a model belongs to exactly one kind, assigned when the
//! element is declared and never changed afterwards. The closed set of
//! kinds covers the full hierarchy (Strategy down to Test) plus the
//! supporting catalogue kinds (Metric, Context, Persona, ...).

use serde::{Deserialize, Serialize};

/// The kind of a model element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
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

impl Kind {
    /// Returns the lowercase wire name of the kind
    pub fn label(&self) -> &'static str {
        match self {
            Kind::Strategy => "strategy",
            Kind::BusinessInitiative => "business_initiative",
            Kind::Metric => "metric",
            Kind::Context => "context",
            Kind::Journey => "journey",
            Kind::Milestone => "milestone",
            Kind::Step => "step",
            Kind::Action => "action",
            Kind::Expectation => "expectation",
            Kind::Stakeholder => "stakeholder",
            Kind::Persona => "persona",
            Kind::Behavior => "behavior",
            Kind::Test => "test",
            Kind::Interaction => "interaction",
            Kind::Attribute => "attribute",
        }
    }

    /// Returns the two-letter ID prefix for the kind (unique per kind)
    pub fn code(&self) -> &'static str {
        match self {
            Kind::Strategy => "st",
            Kind::BusinessInitiative => "bi",
            Kind::Metric => "mt",
            Kind::Context => "cx",
            Kind::Journey => "jn",
            Kind::Milestone => "ms",
            Kind::Step => "sp",
            Kind::Action => "ac",
            Kind::Expectation => "ex",
            Kind::Stakeholder => "sh",
            Kind::Persona => "pe",
            Kind::Behavior => "bh",
            Kind::Test => "ts",
            Kind::Interaction => "in",
            Kind::Attribute => "at",
        }
    }

    /// Returns all kinds in hierarchy-then-catalogue order
    pub fn all() -> &'static [Kind] {
        &[
            Kind::Strategy,
            Kind::BusinessInitiative,
            Kind::Journey,
            Kind::Milestone,
            Kind::Step,
            Kind::Expectation,
            Kind::Behavior,
            Kind::Test,
            Kind::Action,
            Kind::Interaction,
            Kind::Metric,
            Kind::Context,
            Kind::Stakeholder,
            Kind::Persona,
            Kind::Attribute,
        ]
    }

    /// Looks up a kind by its two-letter code
    pub fn from_code(code: &str) -> Option<Kind> {
        Kind::all().iter().copied().find(|k| k.code() == code)
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        if let Some(kind) = Kind::from_code(&s) {
            return Ok(kind);
        }
        match s.as_str() {
            "strategy" => Ok(Kind::Strategy),
            "business_initiative" | "business-initiative" | "initiative" => {
                Ok(Kind::BusinessInitiative)
            }
            "metric" => Ok(Kind::Metric),
            "context" => Ok(Kind::Context),
            "journey" => Ok(Kind::Journey),
            "milestone" => Ok(Kind::Milestone),
            "step" => Ok(Kind::Step),
            "action" => Ok(Kind::Action),
            "expectation" => Ok(Kind::Expectation),
            "stakeholder" => Ok(Kind::Stakeholder),
            "persona" => Ok(Kind::Persona),
            "behavior" | "behaviour" => Ok(Kind::Behavior),
            "test" => Ok(Kind::Test),
            "interaction" => Ok(Kind::Interaction),
            "attribute" => Ok(Kind::Attribute),
            _ => Err(format!("Unknown model kind: {}", s)),
        }
    }
}
