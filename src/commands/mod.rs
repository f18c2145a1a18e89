//! Subcommand implementations

mod check;
mod explain;
mod list;
mod project_root;

use std::path::PathBuf;

use anyhow::{Context, Result};
use infracheck::Config;

use crate::cli::Cli;
use crate::ui::context::UiContext;

pub use check::cmd_check;
pub use explain::cmd_explain;
pub use list::cmd_list;

/// Root, configuration and UI settings shared by every subcommand
pub(crate) struct Session {
    pub root: PathBuf,
    pub config: Config,
    pub ui: UiContext,
}

impl Session {
    pub(crate) fn open(cli: &Cli) -> Result<Self> {
        let root = project_root::resolve_root(cli.root.as_deref())?;
        let (config, warnings) = Config::resolve(&root)
            .with_context(|| format!("loading configuration for {}", root.display()))?;
        let ui = UiContext::new(cli.json, cli.verbose, cli.color, cli.no_animation, &config);
        crate::ui::output::print_config_warnings(&warnings, ui.json, ui.unicode);
        Ok(Self { root, config, ui })
    }
}
