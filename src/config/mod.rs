//! Configuration module for infracheck
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (INFRACHECK_*)
//! 3. Project config (infracheck.toml at the template root)
//! 4. User config (~/.config/infracheck/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{ConfigWarning, PROJECT_CONFIG_FILE};
pub use types::{AnimationMode, ColorMode, Config, HarnessConfig, LayoutConfig, OutputConfig};
