use crate::{ConfigError, MdpBuilder, MdpError, ModelConfig, PROB_TOLERANCE, Transition};

use super::single_row;

#[test]
fn bundled_default_matches_code_default() {
    let config = ModelConfig::from_default_yaml().expect("default yaml parses");
    assert_eq!(config, ModelConfig::default());
    assert_eq!(config.tolerance, PROB_TOLERANCE);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let config = ModelConfig::from_yaml_str("{}").expect("empty mapping parses");
    assert_eq!(config.tolerance, PROB_TOLERANCE);
}

#[test]
fn negative_tolerance_is_rejected() {
    let err = ModelConfig::from_yaml_str("tolerance: -0.5").expect_err("negative tolerance");
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn build_rejects_invalid_config() {
    let mut builder = single_row(vec![Transition::remainder("high", 0.0)]);
    builder.set_config(ModelConfig::default().with_tolerance(f64::NAN));

    let err = builder.build().expect_err("NaN tolerance");
    assert!(matches!(err, MdpError::Config(ConfigError::Invalid(_))));
}

#[test]
fn looser_tolerance_accepts_small_overshoot() {
    let mut builder: MdpBuilder<&str, &str> = MdpBuilder::new();
    builder
        .add_states(["high", "low", "mid"])
        .add_action("go")
        .add_terminal_state("low")
        .add_terminal_state("mid")
        .add_transitions(
            "high",
            "go",
            [
                Transition::explicit("high", 0.5, 0.0),
                Transition::explicit("low", 0.5001, 0.0),
                Transition::remainder("mid", 0.0),
            ],
        );
    let strict_builder = builder.clone();

    let err = strict_builder.build().expect_err("overshoot beyond default tolerance");
    assert!(matches!(err, MdpError::ProbabilityOverflow { .. }));

    builder.set_config(ModelConfig::default().with_tolerance(1e-3));
    let mdp = builder.build().expect("overshoot within loose tolerance");
    let probs = mdp.p(&"high", &"go").expect("known pair");
    assert_eq!(probs[2], 0.0);
}
