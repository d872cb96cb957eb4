mod add;
mod show;

use add::run_add;
use show::run_show;

use std::fs;

use anyhow::{Context, Result};

use adas_repo::{Repository, RepositoryConfig};

use crate::cli::{Command, GlobalOptions};
use crate::display::Context as DisplayContext;

pub fn dispatch(command: Command, global: &GlobalOptions, ctx: DisplayContext) -> Result<()> {
    let repo = Repository::with_config(resolve_config(global)?);
    tracing::debug!(root = %repo.root().display(), "using repository");

    match command {
        Command::Add(args) => run_add(args, &repo, ctx),
        Command::Show(args) => run_show(args, &repo),
    }
}

/// `--root` wins over `--config`, which wins over the environment.
fn resolve_config(global: &GlobalOptions) -> Result<RepositoryConfig> {
    if let Some(root) = &global.root {
        return Ok(RepositoryConfig::new(root));
    }
    if let Some(path) = &global.config {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
        return RepositoryConfig::from_toml_str(&text)
            .with_context(|| format!("Invalid configuration file: {}", path.display()));
    }
    Ok(RepositoryConfig::from_env())
}
