use std::{fs, path::PathBuf};

use anyhow::Context as _;
use ghost_lang::Ghost;

use crate::{args::RunCommand, Context};

impl Context {
    pub fn execute_run(&mut self, cmd: RunCommand) -> Result<(), anyhow::Error> {
        let input = fs::read_to_string(&cmd.path)
            .with_context(|| format!("failed to read {}", cmd.path.display()))?;
        let mut ghost = Ghost::new();
        ghost.set_file(cmd.path.to_string_lossy());
        let directory = cmd
            .directory
            .or_else(|| {
                cmd.path
                    .parent()
                    .filter(|parent| !parent.as_os_str().is_empty())
                    .map(ToOwned::to_owned)
            })
            .unwrap_or_else(|| PathBuf::from("."));
        log::debug!("running {} in {}", cmd.path.display(), directory.display());
        ghost.set_directory(directory);
        ghost.run(&input)?;
        Ok(())
    }
}
