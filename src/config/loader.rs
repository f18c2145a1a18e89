//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{VerifyError, VerifyResult};

use super::types::{ColorMode, Config};

/// Project config file name, also a root marker for discovery
pub const PROJECT_CONFIG_FILE: &str = "infracheck.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> VerifyResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| VerifyError::from_read(path, e))?;
    parse_with_warnings(path, &content)
}

fn parse_with_warnings(path: &Path, content: &str) -> VerifyResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| invalid(path, e))?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

fn invalid(path: &Path, err: impl std::fmt::Display) -> VerifyError {
    VerifyError::InvalidConfig {
        file: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// `~/.config/infracheck/config.toml` (platform config dir)
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("infracheck/config.toml"))
}

/// Defaults, then user config, then project config; env overrides last.
///
/// A later file replaces whole sections (`[layout]`, `[harness]`, `[output]`)
/// it defines with at least one key. A config file that exists but does not
/// parse is an error; absence is not.
pub fn resolve(project_root: &Path) -> VerifyResult<(Config, Vec<ConfigWarning>)> {
    let mut layers: Vec<PathBuf> = user_config_path().into_iter().collect();
    layers.push(project_root.join(PROJECT_CONFIG_FILE));
    resolve_layers(&layers)
}

/// Defaults plus user config, with env overrides. Used before a root is known.
pub fn resolve_user() -> VerifyResult<(Config, Vec<ConfigWarning>)> {
    let layers: Vec<PathBuf> = user_config_path().into_iter().collect();
    resolve_layers(&layers)
}

pub(crate) fn resolve_layers(layers: &[PathBuf]) -> VerifyResult<(Config, Vec<ConfigWarning>)> {
    let mut merged = Config::default();
    let mut warnings = Vec::new();

    for path in layers.iter().filter(|p| p.is_file()) {
        let content = fs::read_to_string(path).map_err(|e| VerifyError::from_read(path, e))?;
        let table: toml::Table = content.parse().map_err(|e| invalid(path, e))?;
        let (parsed, file_warnings) = parse_with_warnings(path, &content)?;
        warnings.extend(file_warnings);

        // A header with only commented examples parses as an empty table
        // and must not reset lower layers.
        if has_non_empty_table(&table, "layout") {
            merged.layout = parsed.layout;
        }
        if has_non_empty_table(&table, "harness") {
            merged.harness = parsed.harness;
        }
        if has_non_empty_table(&table, "output") {
            merged.output = parsed.output;
        }
    }

    Ok((with_env_overrides(merged), warnings))
}

fn has_non_empty_table(root: &toml::Table, key: &str) -> bool {
    match root.get(key) {
        Some(toml::Value::Table(t)) => !t.is_empty(),
        Some(_) => true,
        None => false,
    }
}

/// Apply environment variable overrides (INFRACHECK_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_env_overrides_from(config, |key| std::env::var(key).ok())
}

pub(crate) fn with_env_overrides_from(
    mut config: Config,
    get_env: impl Fn(&str) -> Option<String>,
) -> Config {
    // INFRACHECK_CASES
    if let Some(cases) = get_env("INFRACHECK_CASES").and_then(|v| v.trim().parse::<u32>().ok()) {
        if cases > 0 {
            config.harness.cases = cases;
        }
    }

    // INFRACHECK_SEED
    if let Some(seed) = get_env("INFRACHECK_SEED").and_then(|v| v.trim().parse::<u64>().ok()) {
        config.harness.seed = Some(seed);
    }

    // INFRACHECK_PARALLEL
    if let Some(val) = get_env("INFRACHECK_PARALLEL") {
        config.harness.parallel = val.to_lowercase() != "false" && val != "0";
    }

    // INFRACHECK_COLOR
    if let Some(color) = get_env("INFRACHECK_COLOR") {
        config.output.color = match color.to_lowercase().as_str() {
            "always" => ColorMode::Always,
            "never" => ColorMode::Never,
            _ => ColorMode::Auto,
        };
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "layout",
        "modules_dir",
        "environments_dir",
        "workflows_dir",
        "harness",
        "cases",
        "seed",
        "parallel",
        "output",
        "color",
        "animation",
        "unicode",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
