use crate::{
    args::{GhostCliArgs, GhostCliCommand},
    Context,
};

mod repl;
mod run;

impl Context {
    pub fn execute(&mut self, args: GhostCliArgs) -> Result<(), anyhow::Error> {
        match args.cmd {
            GhostCliCommand::Run(cmd) => self.execute_run(cmd),
            GhostCliCommand::Repl => self.execute_repl(),
        }
    }
}
