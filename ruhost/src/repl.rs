//! Interactive read-eval-print loop.
//!
//! Each submitted chunk compiles as its own small program and runs
//! against a persistent root scope, so bindings, functions, and state
//! machines survive across lines. Input continues onto the next line
//! while delimiters are unbalanced. A chunk consisting of one expression
//! statement is echoed through the print sink.

use std::io::{BufRead, Write};

use rulang_eval::Scope;
use rulang_par::ast::{PrintStmt, Stmt};
use rulang_util::Diagnostic;

use crate::error::Result;
use crate::registry::AppRegistry;

/// REPL session state.
pub struct Repl {
    registry: std::rc::Rc<AppRegistry>,
    root: std::rc::Rc<Scope>,
}

impl Default for Repl {
    fn default() -> Self {
        Self::new()
    }
}

impl Repl {
    pub fn new() -> Self {
        Self {
            registry: AppRegistry::new(),
            root: Scope::root(),
        }
    }

    /// Runs the loop over `input`, writing prompts to `output`.
    pub fn run(&self, input: &mut impl BufRead, output: &mut impl Write) -> Result<()> {
        let mut buffer = String::new();

        loop {
            let prompt = if buffer.is_empty() { "ru> " } else { "...> " };
            write!(output, "{}", prompt)?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(());
            }

            let trimmed = line.trim();
            if buffer.is_empty() && (trimmed == "exit" || trimmed == "quit") {
                return Ok(());
            }

            buffer.push_str(&line);
            if !delimiters_balanced(&buffer) {
                continue;
            }

            let chunk = std::mem::take(&mut buffer);
            if chunk.trim().is_empty() {
                continue;
            }
            self.eval_chunk(&chunk, output)?;
        }
    }

    /// Compiles and runs one chunk, reporting errors without exiting.
    fn eval_chunk(&self, chunk: &str, output: &mut impl Write) -> Result<()> {
        let mut compiled = match rulang_drv::compile(chunk) {
            Ok(compiled) => compiled,
            Err(err) => {
                writeln!(output, "{}", Diagnostic::from(&err))?;
                return Ok(());
            },
        };

        // Echo a lone expression by routing it through the print sink.
        if let [Stmt::Expr(_)] = compiled.program.body.as_slice() {
            if let Some(Stmt::Expr(expr)) = compiled.program.body.pop() {
                compiled.program.body.push(Stmt::Print(PrintStmt {
                    arg: expr,
                    span: rulang_util::Span::DUMMY,
                }));
            }
        }

        if let Err(err) = compiled.run(self.registry.clone(), &self.root) {
            writeln!(output, "error: {}", err)?;
        }
        Ok(())
    }
}

/// Whether every `(`, `[`, `{` in `source` is closed, skipping string
/// literals.
fn delimiters_balanced(source: &str) -> bool {
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        if let Some(open) = quote {
            if c == '\\' {
                chars.next();
            } else if c == open {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            '/' if chars.peek() == Some(&'/') => {
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            },
            _ => {},
        }
    }
    depth <= 0 && quote.is_none()
}
