use std::{
    env,
    io::{self, BufRead, Write},
};

use ghost_lang::Ghost;

use crate::Context;

const PROMPT: &str = ">> ";

impl Context {
    pub fn execute_repl(&mut self) -> Result<(), anyhow::Error> {
        let mut ghost = Ghost::new();
        ghost.set_directory(env::current_dir()?);
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        write!(stdout, "{PROMPT}")?;
        stdout.flush()?;
        for line in stdin.lock().lines() {
            let line = line?;
            if let (Some(value), true) = ghost.eval_line(&line) {
                if !value.is_null() {
                    writeln!(stdout, "{value}")?;
                }
            }
            write!(stdout, "{PROMPT}")?;
            stdout.flush()?;
        }
        writeln!(stdout)?;
        Ok(())
    }
}
