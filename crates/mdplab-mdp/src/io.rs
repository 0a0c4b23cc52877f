use std::{fs, path::Path};

use crate::{Mdp, MdpError, MdpSpec};

/// MDP input document with string state and action ids.
pub type LabelSpec = MdpSpec<String, String>;

/// Parse an MDP spec from YAML text.
pub fn from_yaml_str(yaml: &str) -> Result<LabelSpec, MdpError> {
    let spec: LabelSpec = serde_yaml::from_str(yaml)?;
    Ok(spec)
}

/// Load an MDP spec from YAML on disk.
pub fn load_yaml(path: impl AsRef<Path>) -> Result<LabelSpec, MdpError> {
    let yaml = fs::read_to_string(path)?;
    from_yaml_str(&yaml)
}

/// Load and compile an MDP from a YAML file.
pub fn compile_yaml(path: impl AsRef<Path>) -> Result<Mdp<String, String>, MdpError> {
    let spec = load_yaml(path)?;
    spec.compile()
}

/// Serialize and write an MDP spec to YAML.
pub fn save_yaml(path: impl AsRef<Path>, spec: &LabelSpec) -> Result<(), MdpError> {
    let yaml = serde_yaml::to_string(spec)?;
    fs::write(path, yaml)?;
    Ok(())
}
