//! Finite Markov decision processes compiled into dense, immutable tensors.
//!
//! A caller describes states, actions, optional terminal states, and one
//! row of `(destination, probability, reward)` entries per admissible
//! `(state, action)` pair. The last entry of every row carries the `"*"`
//! probability and absorbs whatever mass the explicit entries leave over.
//!
//! ```
//! use mdplab_mdp::{MdpBuilder, Transition};
//!
//! let mut builder: MdpBuilder<&str, &str> = MdpBuilder::new();
//! builder
//!     .add_states(["high", "low"])
//!     .add_actions(["search", "wait"])
//!     .add_transitions(
//!         "high",
//!         "search",
//!         [Transition::explicit("high", 0.8, 15.0), Transition::remainder("low", 15.0)],
//!     )
//!     .add_transitions("high", "wait", [Transition::remainder("high", 10.0)])
//!     .add_transitions("low", "wait", [Transition::remainder("low", 10.0)]);
//! let mdp = builder.build()?;
//!
//! let probs = mdp.p(&"high", &"search")?;
//! assert!((probs[1] - 0.2).abs() < 1e-12);
//! # Ok::<(), mdplab_mdp::MdpError>(())
//! ```

mod builder;
mod config;
mod error;
mod index;
mod io;
mod model;
mod spec;

#[cfg(test)]
mod tests;

pub use builder::MdpBuilder;
pub use config::{ConfigError, ModelConfig, PROB_TOLERANCE};
pub use error::MdpError;
pub use index::{IdIndex, Identifier};
pub use io::{LabelSpec, compile_yaml, from_yaml_str, load_yaml, save_yaml};
pub use model::Mdp;
pub use spec::{
    ActionTransitions, MdpSpec, Probability, REMAINDER_MARKER, StateTransitions, Transition,
};
