use crate::{
    ActionTransitions, Identifier, Mdp, MdpError, MdpSpec, ModelConfig, StateTransitions,
    Transition,
};

#[derive(Debug, Clone)]
/// Struct to build MDPs.
///
/// Nothing is checked while adding; every error surfaces from [`MdpBuilder::build`].
pub struct MdpBuilder<S, A> {
    states: Vec<S>,
    actions: Vec<A>,
    terminal_states: Vec<S>,
    transitions: Vec<StateTransitions<S, A>>,
    config: ModelConfig,
}

impl<S, A> Default for MdpBuilder<S, A> {
    fn default() -> Self {
        MdpBuilder {
            states: Vec::new(),
            actions: Vec::new(),
            terminal_states: Vec::new(),
            transitions: Vec::new(),
            config: ModelConfig::default(),
        }
    }
}

impl<S, A> MdpBuilder<S, A>
where
    S: Identifier,
    A: Identifier,
{
    /// Create a new MdpBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a state; order of insertion is the state index.
    pub fn add_state(&mut self, state: impl Into<S>) -> &mut Self {
        self.states.push(state.into());
        self
    }

    pub fn add_states<I>(&mut self, states: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<S>,
    {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    /// Append an action; order of insertion is the action index.
    pub fn add_action(&mut self, action: impl Into<A>) -> &mut Self {
        self.actions.push(action.into());
        self
    }

    pub fn add_actions<I>(&mut self, actions: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<A>,
    {
        self.actions.extend(actions.into_iter().map(Into::into));
        self
    }

    /// Mark a state as terminal. Terminal states take no transitions.
    pub fn add_terminal_state(&mut self, state: impl Into<S>) -> &mut Self {
        self.terminal_states.push(state.into());
        self
    }

    /// Add the row for `action` in `state`.
    /// Rows of the same state are grouped in the order the state was first seen.
    pub fn add_transitions<I>(
        &mut self,
        state: impl Into<S>,
        action: impl Into<A>,
        transitions: I,
    ) -> &mut Self
    where
        I: IntoIterator<Item = Transition<S>>,
    {
        let state = state.into();
        let row = ActionTransitions {
            action: action.into(),
            transitions: transitions.into_iter().collect(),
        };

        match self.transitions.iter_mut().find(|entry| entry.state == state) {
            Some(entry) => entry.actions.push(row),
            None => self.transitions.push(StateTransitions {
                state,
                actions: vec![row],
            }),
        }
        self
    }

    /// Register `state` as a transition key without any rows.
    /// The state is covered but has no admissible actions.
    pub fn add_transition_key(&mut self, state: impl Into<S>) -> &mut Self {
        let state = state.into();
        if !self.transitions.iter().any(|entry| entry.state == state) {
            self.transitions.push(StateTransitions {
                state,
                actions: Vec::new(),
            });
        }
        self
    }

    pub fn set_config(&mut self, config: ModelConfig) -> &mut Self {
        self.config = config;
        self
    }

    pub fn build_spec(self) -> MdpSpec<S, A> {
        MdpSpec {
            states: self.states,
            actions: self.actions,
            terminal_states: self.terminal_states,
            transitions: self.transitions,
        }
    }

    pub fn build(self) -> Result<Mdp<S, A>, MdpError> {
        let config = self.config;
        self.build_spec().compile_with_config(&config)
    }
}
