//! Configuration type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::VerifyResult;

use super::loader::{self, ConfigWarning};

/// Where the template keeps its modules, environments and workflows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_modules_dir")]
    pub modules_dir: String,

    #[serde(default = "default_environments_dir")]
    pub environments_dir: String,

    #[serde(default = "default_workflows_dir")]
    pub workflows_dir: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            modules_dir: default_modules_dir(),
            environments_dir: default_environments_dir(),
            workflows_dir: default_workflows_dir(),
        }
    }
}

fn default_modules_dir() -> String {
    "modules".to_string()
}

fn default_environments_dir() -> String {
    "live/aws".to_string()
}

fn default_workflows_dir() -> String {
    ".github/workflows".to_string()
}

/// Randomized harness settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Samples drawn per parameterized property
    #[serde(default = "default_cases")]
    pub cases: u32,

    /// Fixed RNG seed; deterministic default stream when absent
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            cases: default_cases(),
            seed: None,
            parallel: true,
        }
    }
}

fn default_cases() -> u32 {
    64
}

fn default_true() -> bool {
    true
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,

    #[serde(default)]
    pub animation: AnimationMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            animation: AnimationMode::default(),
            unicode: true,
        }
    }
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Animation output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnimationMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub harness: HarnessConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> VerifyResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> VerifyResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Layer defaults, user config and project config; env overrides last.
    pub fn resolve(project_root: &Path) -> VerifyResult<(Self, Vec<ConfigWarning>)> {
        loader::resolve(project_root)
    }

    /// Defaults and user config only, for use before the root is known.
    pub fn resolve_user() -> VerifyResult<(Self, Vec<ConfigWarning>)> {
        loader::resolve_user()
    }

    /// Apply environment variable overrides (INFRACHECK_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }
}
