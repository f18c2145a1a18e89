use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use infracheck::config::LayoutConfig;
use infracheck::{Config, Workspace};

/// Template root for this invocation.
///
/// An explicit `--root` must be an existing directory. Otherwise the root is
/// discovered upward from the current directory, using the layout from the
/// user config (the project config lives at the root being searched for).
pub(crate) fn resolve_root(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(root) = explicit {
        if !root.is_dir() {
            bail!("template root {} is not a directory", root.display());
        }
        return Ok(root.to_path_buf());
    }

    let cwd = std::env::current_dir().context("reading current directory")?;
    let (user_config, _) = Config::resolve_user().context("loading user configuration")?;
    Ok(discover_from(&cwd, user_config.layout))
}

fn discover_from(cwd: &Path, layout: LayoutConfig) -> PathBuf {
    Workspace::discover(cwd, layout).root().to_path_buf()
}
