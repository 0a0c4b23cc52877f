mod config_tests;

use crate::{Mdp, MdpBuilder, Transition};

/// Recycling robot with `alpha = 0.8`, `beta = 0.6`.
fn recycling_robot_builder() -> MdpBuilder<&'static str, &'static str> {
    let mut builder: MdpBuilder<&'static str, &'static str> = MdpBuilder::new();
    builder
        .add_states(["high", "low"])
        .add_actions(["search", "wait", "recharge"])
        .add_transitions(
            "high",
            "search",
            [
                Transition::explicit("high", 0.8, 15.0),
                Transition::remainder("low", 15.0),
            ],
        )
        .add_transitions("high", "wait", [Transition::remainder("high", 10.0)])
        .add_transitions(
            "low",
            "search",
            [
                Transition::explicit("low", 0.6, 15.0),
                Transition::remainder("high", -3.0),
            ],
        )
        .add_transitions("low", "wait", [Transition::remainder("low", 10.0)])
        .add_transitions("low", "recharge", [Transition::remainder("high", 0.0)]);
    builder
}

fn recycling_robot() -> Mdp<&'static str, &'static str> {
    recycling_robot_builder()
        .build()
        .expect("recycling robot should compile")
}

/// Single-state MDP whose only row is `row`.
fn single_row(row: Vec<Transition<&'static str>>) -> MdpBuilder<&'static str, &'static str> {
    let mut builder: MdpBuilder<&'static str, &'static str> = MdpBuilder::new();
    builder
        .add_states(["high", "low"])
        .add_action("go")
        .add_terminal_state("low")
        .add_transitions("high", "go", row);
    builder
}
