//! File locator for the inspected template.
//!
//! Resolves logical names (module, environment, workflow) to absolute paths
//! under the project root. Nothing is cached; every call hits the file system.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{LayoutConfig, PROJECT_CONFIG_FILE};
use crate::content::Content;
use crate::error::{VerifyError, VerifyResult};
use crate::model::Environment;

/// Test-suite directories a template's own tests run from, with their depth.
const NESTED_TEST_DIRS: &[(&str, usize)] = &[("unit", 2), ("property", 2), ("test", 1)];

/// Discover the template root from an invocation directory.
///
/// Heuristics (first match wins, walking upward from `start`):
/// - `infracheck.toml`
/// - both the modules and environments directories
/// - `.git/` or `.git` file (repo root / worktree)
///
/// Without markers, a `unit`/`property`/`test` start directory is mapped back
/// to the repository root it lives in; otherwise `start` is returned.
pub fn discover_root(start: &Path, layout: &LayoutConfig) -> PathBuf {
    for dir in start.ancestors() {
        if dir.join(PROJECT_CONFIG_FILE).is_file() {
            return dir.to_path_buf();
        }
        if dir.join(&layout.modules_dir).is_dir() && dir.join(&layout.environments_dir).is_dir() {
            return dir.to_path_buf();
        }
        if dir.join(".git").exists() {
            return dir.to_path_buf();
        }
    }

    let name = start.file_name().and_then(|n| n.to_str()).unwrap_or("");
    for (dir_name, depth) in NESTED_TEST_DIRS {
        if name == *dir_name {
            if let Some(root) = start.ancestors().nth(*depth) {
                return root.to_path_buf();
            }
        }
    }

    start.to_path_buf()
}

/// Absolute view of the template tree.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    layout: LayoutConfig,
}

impl Workspace {
    /// Anchor at `root`, made absolute against the current directory when relative.
    pub fn new(root: impl Into<PathBuf>, layout: LayoutConfig) -> Self {
        let root = root.into();
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(&root))
                .unwrap_or(root)
        };
        Self { root, layout }
    }

    /// Discover the root from `start` and anchor there.
    pub fn discover(start: &Path, layout: LayoutConfig) -> Self {
        let root = discover_root(start, &layout);
        info!(root = %root.display(), "discovered template root");
        Self::new(root, layout)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// `<root>/<modules_dir>/<name>`
    pub fn module_path(&self, name: &str) -> PathBuf {
        self.root.join(&self.layout.modules_dir).join(name)
    }

    pub fn module_file(&self, name: &str, file: &str) -> PathBuf {
        self.module_path(name).join(file)
    }

    /// `<root>/<environments_dir>/<env>`
    pub fn environment_path(&self, env: Environment) -> PathBuf {
        self.root
            .join(&self.layout.environments_dir)
            .join(env.name())
    }

    pub fn environment_file(&self, env: Environment, file: &str) -> PathBuf {
        self.environment_path(env).join(file)
    }

    pub fn workflow_file(&self, name: &str) -> PathBuf {
        self.root.join(&self.layout.workflows_dir).join(name)
    }

    pub fn root_file(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Not-found signal: `None` when nothing exists at `path`.
    pub fn locate(&self, path: impl AsRef<Path>) -> Option<PathBuf> {
        let path = path.as_ref();
        path.exists().then(|| path.to_path_buf())
    }

    /// Like [`locate`](Self::locate) but absence is a `FileNotFound` error.
    pub fn require(&self, path: impl AsRef<Path>) -> VerifyResult<PathBuf> {
        let path = path.as_ref();
        self.locate(path).ok_or_else(|| VerifyError::FileNotFound {
            path: self.display_path(path),
        })
    }

    /// Read a required artifact.
    pub fn read(&self, path: impl AsRef<Path>) -> VerifyResult<Content> {
        let path = path.as_ref();
        debug!(file = %path.display(), "reading");
        Content::read(path).map_err(|err| match err {
            VerifyError::FileNotFound { .. } => VerifyError::FileNotFound {
                path: self.display_path(path),
            },
            VerifyError::Io { source, .. } => VerifyError::Io {
                path: self.display_path(path),
                source,
            },
            other => other,
        })
    }

    /// Read an optional artifact; absence is `Ok(None)`, other failures propagate.
    pub fn read_optional(&self, path: impl AsRef<Path>) -> VerifyResult<Option<Content>> {
        match self.read(path) {
            Ok(content) => Ok(Some(content)),
            Err(VerifyError::FileNotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Path relative to the root for messages; absolute paths outside the root stay as-is.
    pub fn display_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
