use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
/// Error type for MDP loading, validation, compilation, and lookups.
pub enum MdpError {
    #[error("failed to read YAML file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("an MDP needs at least one state")]
    EmptyStates,

    #[error("an MDP needs at least one action")]
    EmptyActions,

    #[error("repeated state '{state}' in states")]
    DuplicateState { state: String },

    #[error("repeated action '{action}' in actions")]
    DuplicateAction { action: String },

    #[error("terminal state '{state}' is not a valid state")]
    UnknownTerminalState { state: String },

    #[error("non-terminal states without transitions: {}", states.join(", "))]
    MissingTransitions { states: Vec<String> },

    #[error("key '{state}' in transitions is not a valid state")]
    UnknownTransitionState { state: String },

    #[error("key '{state}' in transitions is a terminal state")]
    TerminalStateHasTransitions { state: String },

    #[error("state '{state}' is repeated in transitions")]
    DuplicateTransitionState { state: String },

    #[error("action '{action}' is not valid for state '{state}'")]
    UnknownAction { state: String, action: String },

    #[error("action '{action}' is repeated for state '{state}'")]
    DuplicateActionForState { state: String, action: String },

    #[error(
        "transition list for state '{state}', action '{action}': no transitions allowed after \"*\" (found '{destination}')"
    )]
    TransitionAfterRemainder {
        state: String,
        action: String,
        destination: String,
    },

    #[error(
        "transition list for state '{state}', action '{action}': invalid destination state '{destination}'"
    )]
    UnknownDestination {
        state: String,
        action: String,
        destination: String,
    },

    #[error(
        "transition list for state '{state}', action '{action}': destination '{destination}' repeated"
    )]
    DuplicateDestination {
        state: String,
        action: String,
        destination: String,
    },

    #[error(
        "transition list for state '{state}', action '{action}': invalid probability {value} for destination '{destination}'"
    )]
    InvalidProbability {
        state: String,
        action: String,
        destination: String,
        value: f64,
    },

    #[error(
        "transition list for state '{state}', action '{action}': invalid reward {value} for destination '{destination}'"
    )]
    InvalidReward {
        state: String,
        action: String,
        destination: String,
        value: f64,
    },

    #[error(
        "transition list for state '{state}', action '{action}': probabilities add to more than 1 ({sum})"
    )]
    ProbabilityOverflow {
        state: String,
        action: String,
        sum: f64,
    },

    #[error(
        "transition list for state '{state}', action '{action}': probability for last transition must be \"*\""
    )]
    MissingRemainder { state: String, action: String },

    #[error(
        "probability sum for state '{state}', action '{action}' must be within {tolerance} of 1.0, got {sum}"
    )]
    ProbabilitySum {
        state: String,
        action: String,
        sum: f64,
        tolerance: f64,
    },

    #[error("unknown state '{state}'")]
    StateNotFound { state: String },

    #[error("unknown action '{action}'")]
    ActionNotFound { action: String },
}
