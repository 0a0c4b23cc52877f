use std::collections::{HashMap, HashSet};

use ndarray::{Array3, ArrayView1, ArrayView3, ArrayViewMut1, s};
use tracing::{debug, trace};

use crate::{IdIndex, Identifier, MdpError, MdpSpec, ModelConfig, Probability, Transition};

/// Immutable finite MDP with dense transition and reward tensors.
///
/// Both tensors are indexed `[action, source, destination]`. For every
/// admissible `(state, action)` pair the probability row sums to one within
/// the configured tolerance; rows of inadmissible pairs are all zeros.
///
/// All views borrow the model and are read-only:
///
/// ```compile_fail
/// use mdplab_mdp::{MdpBuilder, Transition};
///
/// let mut builder: MdpBuilder<&str, &str> = MdpBuilder::new();
/// builder
///     .add_state("s")
///     .add_action("a")
///     .add_transitions("s", "a", [Transition::remainder("s", 1.0)]);
/// let mdp = builder.build().unwrap();
///
/// let mut row = mdp.p(&"s", &"a").unwrap();
/// row[0] = 0.5;
/// ```
#[derive(Debug, Clone)]
pub struct Mdp<S, A>
where
    S: Identifier,
    A: Identifier,
{
    states: IdIndex<S>,
    actions: IdIndex<A>,
    terminal_states: HashSet<S>,
    admissible_actions: HashMap<S, HashSet<A>>,
    transition_probs: Array3<f64>,
    rewards: Array3<f64>,
}

/// Identifies the row being compiled, for error reporting.
struct RowContext<'a, S, A> {
    state: &'a S,
    action: &'a A,
    tolerance: f64,
}

impl<S, A> RowContext<'_, S, A>
where
    S: Identifier,
    A: Identifier,
{
    fn state(&self) -> String {
        self.state.to_string()
    }

    fn action(&self) -> String {
        self.action.to_string()
    }
}

impl<S, A> Mdp<S, A>
where
    S: Identifier,
    A: Identifier,
{
    /// Validate and compile a spec using the default config.
    pub fn from_spec(spec: &MdpSpec<S, A>) -> Result<Self, MdpError> {
        Self::from_spec_with_config(spec, &ModelConfig::default())
    }

    /// Validate and compile a spec into dense tensors.
    ///
    /// Nothing is returned unless every check passes.
    pub fn from_spec_with_config(
        spec: &MdpSpec<S, A>,
        config: &ModelConfig,
    ) -> Result<Self, MdpError> {
        config.validate()?;

        if spec.states.is_empty() {
            return Err(MdpError::EmptyStates);
        }
        if spec.actions.is_empty() {
            return Err(MdpError::EmptyActions);
        }

        let states = IdIndex::from_ordered(spec.states.iter().cloned()).map_err(|state| {
            MdpError::DuplicateState {
                state: state.to_string(),
            }
        })?;
        let actions = IdIndex::from_ordered(spec.actions.iter().cloned()).map_err(|action| {
            MdpError::DuplicateAction {
                action: action.to_string(),
            }
        })?;

        let mut terminal_states = HashSet::with_capacity(spec.terminal_states.len());
        for state in &spec.terminal_states {
            if !states.contains(state) {
                return Err(MdpError::UnknownTerminalState {
                    state: state.to_string(),
                });
            }
            terminal_states.insert(state.clone());
        }

        debug!(
            states = states.len(),
            actions = actions.len(),
            terminal_states = terminal_states.len(),
            tolerance = config.tolerance,
            "compiling MDP"
        );

        // Every non-terminal state needs a transition entry; report all at once.
        let declared: HashSet<&S> = spec.transitions.iter().map(|entry| &entry.state).collect();
        let missing: Vec<String> = states
            .items()
            .iter()
            .filter(|state| !terminal_states.contains(*state) && !declared.contains(state))
            .map(ToString::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(MdpError::MissingTransitions { states: missing });
        }

        let mut admissible_actions: HashMap<S, HashSet<A>> = terminal_states
            .iter()
            .map(|state| (state.clone(), HashSet::new()))
            .collect();

        let shape = (actions.len(), states.len(), states.len());
        let mut transition_probs = Array3::<f64>::zeros(shape);
        let mut rewards = Array3::<f64>::zeros(shape);

        for entry in &spec.transitions {
            let state = &entry.state;
            let state_idx =
                states
                    .index_of(state)
                    .ok_or_else(|| MdpError::UnknownTransitionState {
                        state: state.to_string(),
                    })?;
            if terminal_states.contains(state) {
                return Err(MdpError::TerminalStateHasTransitions {
                    state: state.to_string(),
                });
            }
            if admissible_actions.contains_key(state) {
                return Err(MdpError::DuplicateTransitionState {
                    state: state.to_string(),
                });
            }

            let mut state_actions = HashSet::with_capacity(entry.actions.len());
            for row in &entry.actions {
                let action = &row.action;
                let action_idx =
                    actions
                        .index_of(action)
                        .ok_or_else(|| MdpError::UnknownAction {
                            state: state.to_string(),
                            action: action.to_string(),
                        })?;
                if !state_actions.insert(action.clone()) {
                    return Err(MdpError::DuplicateActionForState {
                        state: state.to_string(),
                        action: action.to_string(),
                    });
                }

                let ctx = RowContext {
                    state,
                    action,
                    tolerance: config.tolerance,
                };
                compile_row(
                    &ctx,
                    &row.transitions,
                    &states,
                    transition_probs.slice_mut(s![action_idx, state_idx, ..]),
                    rewards.slice_mut(s![action_idx, state_idx, ..]),
                )?;
            }

            admissible_actions.insert(state.clone(), state_actions);
        }

        let admissible_pairs: usize = admissible_actions.values().map(HashSet::len).sum();
        debug!(admissible_pairs, "compiled MDP");

        Ok(Mdp {
            states,
            actions,
            terminal_states,
            admissible_actions,
            transition_probs,
            rewards,
        })
    }

    /// States in index order.
    pub fn states(&self) -> &[S] {
        self.states.items()
    }

    /// Actions in index order.
    pub fn actions(&self) -> &[A] {
        self.actions.items()
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    pub fn num_actions(&self) -> usize {
        self.actions.len()
    }

    /// Map from state to its index along the source/destination axes.
    pub fn state_indexes(&self) -> &HashMap<S, usize> {
        self.states.indexes()
    }

    /// Map from action to its index along the action axis.
    pub fn action_indexes(&self) -> &HashMap<A, usize> {
        self.actions.indexes()
    }

    pub fn state_index(&self, state: &S) -> Result<usize, MdpError> {
        self.states
            .index_of(state)
            .ok_or_else(|| MdpError::StateNotFound {
                state: state.to_string(),
            })
    }

    pub fn action_index(&self, action: &A) -> Result<usize, MdpError> {
        self.actions
            .index_of(action)
            .ok_or_else(|| MdpError::ActionNotFound {
                action: action.to_string(),
            })
    }

    pub fn terminal_states(&self) -> &HashSet<S> {
        &self.terminal_states
    }

    pub fn is_terminal(&self, state: &S) -> Result<bool, MdpError> {
        self.state_index(state)?;
        Ok(self.terminal_states.contains(state))
    }

    /// Admissible actions of every state. Terminal states map to an empty set.
    pub fn admissible_actions(&self) -> &HashMap<S, HashSet<A>> {
        &self.admissible_actions
    }

    pub fn admissible_actions_for(&self, state: &S) -> Result<&HashSet<A>, MdpError> {
        self.admissible_actions
            .get(state)
            .ok_or_else(|| MdpError::StateNotFound {
                state: state.to_string(),
            })
    }

    pub fn is_admissible(&self, state: &S, action: &A) -> Result<bool, MdpError> {
        self.action_index(action)?;
        Ok(self.admissible_actions_for(state)?.contains(action))
    }

    /// Full probability tensor, indexed `[action, source, destination]`.
    pub fn transition_probs(&self) -> ArrayView3<'_, f64> {
        self.transition_probs.view()
    }

    /// Full reward tensor, indexed `[action, source, destination]`.
    pub fn rewards(&self) -> ArrayView3<'_, f64> {
        self.rewards.view()
    }

    /// Destination probabilities for taking `action` in `state`.
    ///
    /// Only the identifiers are checked; an inadmissible pair yields a zero row.
    pub fn p(&self, state: &S, action: &A) -> Result<ArrayView1<'_, f64>, MdpError> {
        let (action_idx, state_idx) = self.row_index(state, action)?;
        Ok(self.transition_probs.slice(s![action_idx, state_idx, ..]))
    }

    /// Destination rewards for taking `action` in `state`.
    pub fn r(&self, state: &S, action: &A) -> Result<ArrayView1<'_, f64>, MdpError> {
        let (action_idx, state_idx) = self.row_index(state, action)?;
        Ok(self.rewards.slice(s![action_idx, state_idx, ..]))
    }

    /// Expected immediate reward `sum_d P[a, s, d] * R[a, s, d]`.
    pub fn expected_reward(&self, state: &S, action: &A) -> Result<f64, MdpError> {
        let probs = self.p(state, action)?;
        let rewards = self.r(state, action)?;
        Ok(probs.dot(&rewards))
    }

    fn row_index(&self, state: &S, action: &A) -> Result<(usize, usize), MdpError> {
        Ok((self.action_index(action)?, self.state_index(state)?))
    }
}

/// Validate one row and write it into the probability and reward rows.
fn compile_row<S, A>(
    ctx: &RowContext<'_, S, A>,
    transitions: &[Transition<S>],
    states: &IdIndex<S>,
    mut probs: ArrayViewMut1<'_, f64>,
    mut rewards: ArrayViewMut1<'_, f64>,
) -> Result<(), MdpError>
where
    S: Identifier,
    A: Identifier,
{
    let mut sum_probs = 0.0_f64;
    // Set once the `"*"` entry has been resolved; nothing may follow it.
    let mut remainder: Option<f64> = None;
    let mut seen_destinations = HashSet::with_capacity(transitions.len());

    for transition in transitions {
        let next = &transition.next;

        if remainder.is_some() {
            return Err(MdpError::TransitionAfterRemainder {
                state: ctx.state(),
                action: ctx.action(),
                destination: next.to_string(),
            });
        }

        let dest_idx = states
            .index_of(next)
            .ok_or_else(|| MdpError::UnknownDestination {
                state: ctx.state(),
                action: ctx.action(),
                destination: next.to_string(),
            })?;
        if !seen_destinations.insert(dest_idx) {
            return Err(MdpError::DuplicateDestination {
                state: ctx.state(),
                action: ctx.action(),
                destination: next.to_string(),
            });
        }

        if !transition.reward.is_finite() {
            return Err(MdpError::InvalidReward {
                state: ctx.state(),
                action: ctx.action(),
                destination: next.to_string(),
                value: transition.reward,
            });
        }

        let prob = match transition.prob {
            Probability::Remainder => {
                let resolved = 1.0 - sum_probs;
                if resolved < -ctx.tolerance {
                    return Err(MdpError::ProbabilityOverflow {
                        state: ctx.state(),
                        action: ctx.action(),
                        sum: sum_probs,
                    });
                }
                let resolved = if resolved < 0.0 {
                    debug!(
                        state = %ctx.state,
                        action = %ctx.action,
                        remainder = resolved,
                        "clamping remainder probability to zero"
                    );
                    0.0
                } else {
                    resolved
                };
                remainder = Some(resolved);
                resolved
            }
            Probability::Explicit(value) => {
                if !value.is_finite() || value < 0.0 {
                    return Err(MdpError::InvalidProbability {
                        state: ctx.state(),
                        action: ctx.action(),
                        destination: next.to_string(),
                        value,
                    });
                }
                sum_probs += value;
                value
            }
        };

        probs[dest_idx] = prob;
        rewards[dest_idx] = transition.reward;
    }

    let Some(resolved) = remainder else {
        return Err(MdpError::MissingRemainder {
            state: ctx.state(),
            action: ctx.action(),
        });
    };

    let total = sum_probs + resolved;
    if (total - 1.0).abs() > ctx.tolerance {
        return Err(MdpError::ProbabilitySum {
            state: ctx.state(),
            action: ctx.action(),
            sum: total,
            tolerance: ctx.tolerance,
        });
    }

    trace!(
        state = %ctx.state,
        action = %ctx.action,
        destinations = transitions.len(),
        "validated transition row"
    );

    Ok(())
}
