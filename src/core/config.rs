//! Pipeline and application configuration from YAML

use crate::chat::ChatClientConfig;
use crate::core::{
    error::ConfigurationError,
    pipeline::{build_pipeline, Pipeline},
    state::AppState,
    step::StepAction,
};
use crate::proxy::ProxySettings;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top-level pipeline configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Pipeline name
    pub name: String,

    /// Pipeline version (optional)
    #[serde(default)]
    pub version: Option<String>,

    /// State the run starts from
    #[serde(default)]
    pub initial: AppState,

    /// Pipeline steps, in execution order
    pub steps: Vec<StepConfig>,
}

/// Step configuration as defined in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepConfig {
    /// Unique step identifier
    pub id: String,

    /// Optional step description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// What the step does to the state
    #[serde(flatten)]
    pub action: StepAction,
}

impl PipelineConfig {
    /// Load pipeline configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse pipeline configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: PipelineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the pipeline configuration
    ///
    /// Same checks as [`build_pipeline`]: at least one step, unique ids.
    pub fn validate(&self) -> Result<()> {
        self.to_pipeline()?;
        Ok(())
    }

    /// Convert config to a Pipeline domain model
    pub fn to_pipeline(&self) -> Result<Pipeline<AppState>, ConfigurationError> {
        let steps = self
            .steps
            .iter()
            .map(|step| step.action.clone().into_step(step.id.clone()))
            .collect();
        build_pipeline(self.name.clone(), steps)
    }
}

/// Application configuration: proxy and chat settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub proxy: ProxySettings,

    #[serde(default)]
    pub chat: ChatClientConfig,
}

impl AppConfig {
    /// Default location: `<config dir>/lingraph/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lingraph").join("config.yaml"))
    }

    /// Load application config from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Load from an explicit path, else the default location if it exists,
    /// else built-in defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => {
                debug!("Loading config from {}", path.display());
                Self::from_file(path)
            }
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_pipeline() {
        let yaml = r#"
name: "Test Pipeline"
version: "1.0"
initial:
  foo: "baz"
steps:
  - id: "w_1"
    action: append
    value: "-w_1"
  - id: "w_2"
    description: "Second marker"
    action: append
    value: "-w_2"
"#;

        let config = PipelineConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.name, "Test Pipeline");
        assert_eq!(config.initial, AppState::new("baz"));
        assert_eq!(config.steps.len(), 2);
        assert_eq!(config.steps[1].description.as_deref(), Some("Second marker"));
        assert_eq!(
            config.steps[0].action,
            StepAction::Append { value: "-w_1".to_string() }
        );
    }

    #[test]
    fn test_initial_defaults_to_app_state_default() {
        let yaml = r#"
name: "Defaults"
steps:
  - id: "only"
    action: replace
    value: "x"
"#;

        let config = PipelineConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.initial, AppState::default());
    }

    #[test]
    fn test_to_pipeline_runs() {
        let yaml = r#"
name: "Mixed"
initial:
  foo: "core"
steps:
  - id: "front"
    action: prepend
    value: "<"
  - id: "back"
    action: append
    value: ">"
"#;

        let config = PipelineConfig::from_yaml(yaml).unwrap();
        let pipeline = config.to_pipeline().unwrap();
        assert_eq!(pipeline.step_names(), vec!["front", "back"]);
        assert_eq!(pipeline.run(config.initial.clone()).unwrap().foo, "<core>");
    }

    #[test]
    fn test_empty_steps_fails() {
        let yaml = r#"
name: "Empty"
steps: []
"#;

        let err = PipelineConfig::from_yaml(yaml).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigurationError>(),
            Some(&ConfigurationError::EmptyPipeline)
        );
    }

    #[test]
    fn test_duplicate_step_id_fails() {
        let yaml = r#"
name: "Test Pipeline"
steps:
  - id: "step1"
    action: append
    value: "a"
  - id: "step1"
    action: append
    value: "b"
"#;

        let err = PipelineConfig::from_yaml(yaml).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigurationError>(),
            Some(&ConfigurationError::DuplicateStep("step1".to_string()))
        );
    }

    #[test]
    fn test_unknown_action_fails() {
        let yaml = r#"
name: "Test Pipeline"
steps:
  - id: "step1"
    action: explode
"#;

        assert!(PipelineConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_app_config_sections_default() {
        let config: AppConfig = serde_yaml::from_str("chat:\n  model: gpt-4o\n").unwrap();
        assert_eq!(config.chat.model, "gpt-4o");
        assert_eq!(config.proxy, ProxySettings::default());
    }

    #[test]
    fn test_app_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "proxy:\n  http: \"http://10.0.0.1:3128\"\n",
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.proxy.http, "http://10.0.0.1:3128");
        assert_eq!(config.proxy.https, ProxySettings::default().https);
    }

    #[test]
    fn test_app_config_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(Some(&dir.path().join("nope.yaml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
