//! Interpreter session.
//!
//! A `Session` owns the configuration, the `)get` nesting guard and the two output
//! sinks. It is also the outermost recovery boundary: a recoverable error on a
//! top-level line is reported and the session moves on to the next line.
use std::io::{BufRead, Cursor};

use iv_core::{Config, Value};
use iv_lexer::Scanner;
use iv_syntax::{Diagnostic, Location, RenderOptions, render_diagnostic_with_options};

use crate::{Error, Line, Output, Parser, RecursionGuard, Result, exec};

pub struct Session {
    config: Config,
    guard: RecursionGuard,
    stdout: Output,
    stderr: Output,
    render: RenderOptions,
}

impl Session {
    /// A session writing to the process's stdout and stderr.
    pub fn new(config: Config) -> Self {
        Self::with_outputs(config, Output::stdout(), Output::stderr())
    }

    /// A session that keeps all output in memory.
    pub fn captured(config: Config) -> Self {
        Self::with_outputs(config, Output::capture(), Output::capture())
    }

    pub fn with_outputs(config: Config, stdout: Output, stderr: Output) -> Self {
        Self {
            config,
            guard: RecursionGuard::default(),
            stdout,
            stderr,
            render: RenderOptions::default(),
        }
    }

    pub fn with_render_options(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn guard(&self) -> &RecursionGuard {
        &self.guard
    }

    /// Current `)get` nesting depth; 0 outside any script.
    pub fn depth(&self) -> usize {
        self.guard.depth()
    }

    pub fn stdout(&mut self) -> &mut Output {
        &mut self.stdout
    }

    pub fn stderr(&mut self) -> &mut Output {
        &mut self.stderr
    }

    pub fn take_stdout(&mut self) -> String {
        self.stdout.take()
    }

    pub fn take_stderr(&mut self) -> String {
        self.stderr.take()
    }

    /// Print a computed value in the current format.
    pub fn print_value(&mut self, value: &Value) -> Result<()> {
        if self.config.debug("types") {
            self.stdout.line(&format!("type {}", value.type_name()))?;
        }
        let text = value.format(self.config.format());
        self.stdout.line(&text)?;
        Ok(())
    }

    /// Write a one-line error report to stderr.
    pub fn report(&mut self, diag: &Diagnostic) -> Result<()> {
        self.stderr
            .line(&render_diagnostic_with_options(diag, self.render))?;
        Ok(())
    }

    /// Run `reader` to the end as top-level input named `name`.
    pub fn run<R: BufRead>(&mut self, name: &str, reader: R) -> Result<()> {
        self.drive(name, reader, false)
    }

    /// Like [`Session::run`], printing the prompt before each line.
    pub fn run_interactive<R: BufRead>(&mut self, reader: R) -> Result<()> {
        self.drive("<stdin>", reader, true)
    }

    /// Run in-memory text.
    pub fn execute(&mut self, text: &str) -> Result<()> {
        self.run("<input>", Cursor::new(text))
    }

    /// Run a script file, as `)get` would at top level. Failures to open it are
    /// reported at line 0 of `path`.
    pub fn run_file(&mut self, path: &str) -> Result<()> {
        exec::run_file(self, path, Some(Location::new(path, 0)))
    }

    fn drive<R: BufRead>(&mut self, name: &str, reader: R, interactive: bool) -> Result<()> {
        tracing::debug!(input = name, interactive, "session start");
        let mut parser = Parser::new(self, Scanner::new(name, reader));
        loop {
            if interactive {
                let prompt = parser.config().prompt().to_string();
                let out = parser.session_mut().stdout();
                out.write_str(&prompt)?;
                out.flush()?;
            }
            match parser.line() {
                Ok(Line::Value(v)) => parser.session_mut().print_value(&v)?,
                Ok(Line::Empty) => {}
                Ok(Line::Eof) => break,
                Err(Error::Recoverable(diag)) => {
                    if parser.config().debug("panic") {
                        return Err(Error::Fatal(diag.to_string()));
                    }
                    tracing::debug!(error = %diag, "line failed");
                    parser.session_mut().report(&diag)?;
                    parser.flush_to_newline();
                }
                Err(e) => return Err(e),
            }
        }
        tracing::debug!(input = name, "session end");
        Ok(())
    }
}
