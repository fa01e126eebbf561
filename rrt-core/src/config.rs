use crate::{
    configuration::Configuration,
    error::{Result, RrtError},
    space::ConfigurationSpace,
    steering::Steering,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters for one planner build.
///
/// Loadable from TOML; missing keys fall back to [`Config::default`]:
///
/// ```toml
/// bounds = [[-10.0, 10.0], [-25.0, 25.0]]
/// step = 1.0
/// stop_threshold = 2.0
/// iterations = 100
/// rng_seed = 42
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bounds: Vec<[f64; 2]>,
    /// Root configuration; the origin when absent.
    pub root: Option<Vec<f64>>,
    pub step: f64,
    pub stop_threshold: f64,
    pub iterations: u32,
    pub rng_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bounds: vec![[-10.0, 10.0], [-25.0, 25.0]],
            root: None,
            step: 1.0,
            stop_threshold: 2.0,
            iterations: 100,
            rng_seed: None,
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        let space = self.space()?;
        self.steering()?.check_step(self.step)?;

        let root = self.root_config();
        if root.dim() != space.dim() {
            return Err(RrtError::DimensionMismatch {
                expected: space.dim(),
                actual: root.dim(),
            });
        }
        if !space.contains(&root) {
            return Err(RrtError::Config(format!(
                "root {root} lies outside the configured bounds"
            )));
        }
        Ok(())
    }

    pub fn space(&self) -> Result<ConfigurationSpace> {
        ConfigurationSpace::new(self.bounds.clone())
    }

    pub fn steering(&self) -> Result<Steering> {
        Steering::new(self.stop_threshold)
    }

    pub fn root_config(&self) -> Configuration {
        match &self.root {
            Some(values) => Configuration::new(values.clone()),
            None => Configuration::origin(self.bounds.len()),
        }
    }
}
