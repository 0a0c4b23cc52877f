use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::{Identifier, Mdp, MdpError, ModelConfig};

/// Marker accepted in place of a number for the remainder probability.
pub const REMAINDER_MARKER: &str = "*";

/// Probability attached to one transition of a row.
///
/// In YAML this is either a number or the string `"*"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Probability {
    /// An explicit probability; must be finite and non-negative.
    Explicit(f64),
    /// Whatever probability mass the explicit entries of the row leave over.
    /// Only valid as the last entry of a row.
    Remainder,
}

impl Probability {
    pub fn is_remainder(&self) -> bool {
        matches!(self, Probability::Remainder)
    }
}

impl From<f64> for Probability {
    fn from(value: f64) -> Self {
        Probability::Explicit(value)
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Probability::Explicit(p) => write!(f, "{p}"),
            Probability::Remainder => f.write_str(REMAINDER_MARKER),
        }
    }
}

impl Serialize for Probability {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        match self {
            Probability::Explicit(p) => serializer.serialize_f64(*p),
            Probability::Remainder => serializer.serialize_str(REMAINDER_MARKER),
        }
    }
}

struct ProbabilityVisitor;

impl Visitor<'_> for ProbabilityVisitor {
    type Value = Probability;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a number or \"{REMAINDER_MARKER}\"")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Probability::Explicit(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Probability::Explicit(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Probability::Explicit(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        if v == REMAINDER_MARKER {
            Ok(Probability::Remainder)
        } else {
            Err(E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }
}

impl<'de> Deserialize<'de> for Probability {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ProbabilityVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One `(destination, probability, reward)` entry of a row.
pub struct Transition<S> {
    pub next: S,
    pub prob: Probability,
    pub reward: f64,
}

impl<S> Transition<S> {
    pub fn new(next: impl Into<S>, prob: impl Into<Probability>, reward: f64) -> Self {
        Transition {
            next: next.into(),
            prob: prob.into(),
            reward,
        }
    }

    /// Entry with an explicit probability.
    pub fn explicit(next: impl Into<S>, prob: f64, reward: f64) -> Self {
        Self::new(next, Probability::Explicit(prob), reward)
    }

    /// Entry absorbing the rest of the row's probability mass.
    pub fn remainder(next: impl Into<S>, reward: f64) -> Self {
        Self::new(next, Probability::Remainder, reward)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// The row for one action of a state.
pub struct ActionTransitions<S, A> {
    pub action: A,
    pub transitions: Vec<Transition<S>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// All rows declared for one source state.
pub struct StateTransitions<S, A> {
    pub state: S,
    #[serde(default)]
    pub actions: Vec<ActionTransitions<S, A>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Complete caller input for building an [`Mdp`].
///
/// Transitions are kept as ordered sequences so that repeated keys stay
/// visible to validation instead of being merged silently.
pub struct MdpSpec<S, A> {
    pub states: Vec<S>,
    pub actions: Vec<A>,
    #[serde(default)]
    pub terminal_states: Vec<S>,
    #[serde(default)]
    pub transitions: Vec<StateTransitions<S, A>>,
}

impl<S, A> MdpSpec<S, A> {
    pub fn new(states: Vec<S>, actions: Vec<A>, transitions: Vec<StateTransitions<S, A>>) -> Self {
        MdpSpec {
            states,
            actions,
            terminal_states: Vec::new(),
            transitions,
        }
    }

    pub fn with_terminal_states(mut self, terminal_states: Vec<S>) -> Self {
        self.terminal_states = terminal_states;
        self
    }
}

impl<S, A> MdpSpec<S, A>
where
    S: Identifier,
    A: Identifier,
{
    /// Validate and compile using the default config.
    pub fn compile(&self) -> Result<Mdp<S, A>, MdpError> {
        Mdp::from_spec(self)
    }

    /// Validate and compile with an explicit config.
    pub fn compile_with_config(&self, config: &ModelConfig) -> Result<Mdp<S, A>, MdpError> {
        Mdp::from_spec_with_config(self, config)
    }
}
