//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use farm_cache::FileStore;
use farm_commerce::cart::CartStore;

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names, searched in each directory from cwd upward.
pub const CONFIG_NAMES: [&str; 3] = ["smartfarm.toml", ".smartfarm.toml", "smartfarm.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Config file the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, Path::new(path));
                (CliConfig::load(&path)?, Some(path))
            }
            None => match find_config_file(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        match &config_path {
            Some(path) => tracing::debug!(path = %path.display(), "Loaded config"),
            None => tracing::debug!("No config file found, using defaults"),
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Directory relative paths in the config resolve against.
    pub fn base_dir(&self) -> &Path {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(self.cwd.as_path())
    }

    /// Directory holding the cart snapshot.
    pub fn data_dir(&self) -> PathBuf {
        resolve(self.base_dir(), &self.config.storage.data_dir)
    }

    /// Open the persisted cart.
    ///
    /// Refuses to open with an invalid configuration.
    pub fn open_cart(&self) -> Result<CartStore<FileStore>> {
        let errors = self.config.validate();
        if !errors.is_empty() {
            bail!("Invalid configuration: {}", errors.join("; "));
        }

        let data_dir = self.data_dir();
        let store = FileStore::open(&data_dir)
            .with_context(|| format!("Failed to open cart storage: {}", data_dir.display()))?;

        Ok(CartStore::with_config(store, self.config.cart.clone()))
    }
}

/// Find a config file in the directory tree.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
