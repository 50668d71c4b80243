use std::{
    fmt,
    io::{self, Write},
    path::{Path, PathBuf},
    rc::Rc,
};

use crate::{
    compiler::{ast::Program, lexer, parser},
    environment::{EnvId, Environments},
    errors::GhostError,
    evaluator::Flow,
    libs::Registry,
    objects::Object,
};

/// The state every evaluation step works on: the scope arena, the host
/// registry and the output `print` writes to.
pub struct Context {
    pub envs: Environments,
    pub registry: Rc<Registry>,
    output: Box<dyn Write>,
}

impl Context {
    pub fn new(registry: Rc<Registry>, output: Box<dyn Write>) -> Context {
        let mut envs = Environments::new();
        let root = envs.root();
        registry.bind(&mut envs, root);
        Context {
            envs,
            registry,
            output,
        }
    }

    pub fn root(&self) -> EnvId {
        self.envs.root()
    }

    pub fn output(&mut self) -> &mut dyn Write {
        &mut *self.output
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("scopes", &self.envs.len())
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// An embeddable Ghost runtime.
///
/// Globals persist across calls, so one `Ghost` can run a script and then
/// keep evaluating lines against it.
#[derive(Debug)]
pub struct Ghost {
    ctx: Context,
    source: Option<String>,
    file: Option<Rc<str>>,
}

impl Ghost {
    /// A runtime printing to stdout.
    pub fn new() -> Ghost {
        Ghost::with_output(io::stdout())
    }

    pub fn with_output(output: impl Write + 'static) -> Ghost {
        Ghost {
            ctx: Context::new(Rc::new(Registry::new()), Box::new(output)),
            source: None,
            file: None,
        }
    }

    pub fn context(&mut self) -> &mut Context {
        &mut self.ctx
    }

    pub fn set_directory(&mut self, directory: impl Into<PathBuf>) {
        self.ctx.envs.set_directory(directory);
    }

    pub fn directory(&self) -> Option<&Path> {
        self.ctx.envs.directory()
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = Some(source.into());
    }

    /// Names the source in token positions and runtime errors.
    pub fn set_file(&mut self, file: impl AsRef<str>) {
        self.file = Some(Rc::from(file.as_ref()));
    }

    /// Runs the source given to [`Ghost::set_source`]. Diagnostics are
    /// logged and yield `None`.
    pub fn execute(&mut self) -> Option<Object> {
        let Some(source) = self.source.take() else {
            log::error!("no source to execute");
            return None;
        };
        let result = self.run(&source);
        self.source = Some(source);
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                log_error(&e);
                None
            }
        }
    }

    /// Scans, parses and evaluates `source` against the root scope. Any
    /// lexical or syntax error skips evaluation.
    pub fn run(&mut self, source: &str) -> Result<Object, GhostError> {
        let program = self.compile(source)?;
        log::debug!("evaluating {} statements", program.statements.len());
        let root = self.ctx.root();
        self.ctx
            .evaluate(&program, root)
            .map_err(|e| GhostError::Runtime(e.in_file(self.file.as_deref())))
    }

    /// Evaluates one chunk of input statement by statement, stopping at the
    /// first error. Returns the last value and whether every statement ran.
    pub fn eval_line(&mut self, source: &str) -> (Option<Object>, bool) {
        let program = match self.compile(source) {
            Ok(program) => program,
            Err(e) => {
                log_error(&e);
                return (None, false);
            }
        };
        let root = self.ctx.root();
        let mut result = None;
        for stmt in &program.statements {
            match self.ctx.eval_stmt(stmt, root) {
                Ok(Flow::Next(value)) => result = Some(value),
                Ok(Flow::Return(value)) => return (Some(value), true),
                Err(e) => {
                    log::error!("{}", e.in_file(self.file.as_deref()));
                    return (None, false);
                }
            }
        }
        (result, true)
    }

    fn compile(&self, source: &str) -> Result<Program, GhostError> {
        let (tokens, lex_errors) = match &self.file {
            Some(file) => lexer::tokenize_file(source, Rc::clone(file)),
            None => lexer::tokenize(source),
        };
        if !lex_errors.is_empty() {
            return Err(GhostError::Lexical(lex_errors));
        }
        let (program, parse_errors) = parser::parse(tokens);
        if !parse_errors.is_empty() {
            return Err(GhostError::Syntax(parse_errors));
        }
        Ok(program)
    }
}

impl Default for Ghost {
    fn default() -> Self {
        Ghost::new()
    }
}

fn log_error(error: &GhostError) {
    match error {
        // The scanner already logged these.
        GhostError::Lexical(_) => (),
        GhostError::Syntax(errors) => {
            for e in errors {
                log::error!("{e}");
            }
        }
        GhostError::Runtime(e) => log::error!("{e}"),
    }
}
