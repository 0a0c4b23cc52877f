use mdplab_mdp::{
    MdpError, MdpSpec, Probability, compile_yaml, from_yaml_str, load_yaml, save_yaml,
};

const RECYCLING_ROBOT_YAML: &str = r#"
states: [high, low]
actions: [search, wait, recharge]
transitions:
  - state: high
    actions:
      - action: search
        transitions:
          - { next: high, prob: 0.8, reward: 15 }
          - { next: low, prob: "*", reward: 15 }
      - action: wait
        transitions:
          - { next: high, prob: "*", reward: 10 }
  - state: low
    actions:
      - action: search
        transitions:
          - { next: low, prob: 0.6, reward: 15 }
          - { next: high, prob: "*", reward: -3 }
      - action: wait
        transitions:
          - { next: low, prob: "*", reward: 10 }
      - action: recharge
        transitions:
          - { next: high, prob: "*", reward: 0 }
"#;

#[test]
fn yaml_parse_and_compile_success() {
    let spec = from_yaml_str(RECYCLING_ROBOT_YAML).expect("valid yaml");
    assert!(spec.terminal_states.is_empty());
    assert_eq!(
        spec.transitions[0].actions[0].transitions[1].prob,
        Probability::Remainder
    );

    let mdp = spec.compile().expect("compile should succeed");
    let high = "high".to_string();
    let search = "search".to_string();

    assert_eq!(mdp.num_states(), 2);
    assert_eq!(mdp.num_actions(), 3);
    let probs = mdp.p(&high, &search).expect("known pair");
    assert_eq!(probs[0], 0.8);
    assert!((probs.sum() - 1.0).abs() < 1e-12);
    assert_eq!(mdp.r(&high, &search).expect("known pair").to_vec(), vec![15.0, 15.0]);
}

#[test]
fn integer_probabilities_parse_as_explicit() {
    let yaml = r#"
states: [s0, s1]
actions: [a0]
terminal_states: [s1]
transitions:
  - state: s0
    actions:
      - action: a0
        transitions:
          - { next: s1, prob: 1, reward: 2 }
          - { next: s0, prob: "*", reward: 0 }
"#;

    let mdp = from_yaml_str(yaml)
        .expect("valid yaml")
        .compile()
        .expect("compile should succeed");
    let probs = mdp
        .p(&"s0".to_string(), &"a0".to_string())
        .expect("known pair");
    assert_eq!(probs.to_vec(), vec![0.0, 1.0]);
    assert!(mdp.is_terminal(&"s1".to_string()).expect("known state"));
}

#[test]
fn non_numeric_probability_is_a_parse_error() {
    let yaml = r#"
states: [s0]
actions: [a0]
transitions:
  - state: s0
    actions:
      - action: a0
        transitions:
          - { next: s0, prob: "most", reward: 0 }
"#;

    let err = from_yaml_str(yaml).expect_err("parse should fail");
    assert!(matches!(err, MdpError::Yaml(_)));
    assert!(err.to_string().contains("a number or \"*\""));
}

#[test]
fn validation_fails_for_missing_coverage() {
    let yaml = r#"
states: [high, low]
actions: [wait]
transitions:
  - state: high
    actions:
      - action: wait
        transitions:
          - { next: high, prob: "*", reward: 10 }
"#;

    let err = from_yaml_str(yaml)
        .expect("valid syntax")
        .compile()
        .expect_err("compile should fail");

    assert!(matches!(err, MdpError::MissingTransitions { ref states } if states == &["low"]));
}

#[test]
fn validation_fails_for_unknown_state_reference() {
    let yaml = r#"
states: [s0]
actions: [a0]
transitions:
  - state: s0
    actions:
      - action: a0
        transitions:
          - { next: missing, prob: "*", reward: 1.0 }
"#;

    let err = from_yaml_str(yaml)
        .expect("valid syntax")
        .compile()
        .expect_err("compile should fail");

    assert!(matches!(err, MdpError::UnknownDestination { .. }));
}

#[test]
fn yaml_files_round_trip_through_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("robot.yaml");

    let spec = from_yaml_str(RECYCLING_ROBOT_YAML).expect("valid yaml");
    save_yaml(&path, &spec).expect("write spec");

    let reloaded: MdpSpec<String, String> = load_yaml(&path).expect("read spec");
    assert_eq!(reloaded, spec);

    let mdp = compile_yaml(&path).expect("compile from file");
    assert_eq!(mdp.states(), &["high".to_string(), "low".to_string()]);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = load_yaml(dir.path().join("absent.yaml")).expect_err("no such file");
    assert!(matches!(err, MdpError::Io(_)));
}
