#![allow(clippy::needless_return)]

//! This crate is a tree-walk interpreter, written in Rust, for Lox: a small dynamically typed
//! language with lexical scoping and first-class functions. It is a hobby project and is not
//! intended for production use.
//!
//! Lox is a dynamically typed language. This means that the type of a variable is determined at
//! runtime. This is in contrast to statically typed languages, where the type of a variable is
//! determined at compile time. Dynamically typed languages are often easier to use, but are
//! generally slower than statically typed languages.
//!
//! This is a tree-walk interpreter. This means that the interpreter walks the abstract syntax
//! tree (AST) and evaluates each node. This is in contrast to a compiler, which would convert the
//! AST into bytecode or machine code. Tree-walk interpreters are generally easier to implement
//! than compilers, but are generally slower than compilers.
//!
//! The goal of this project is to learn more about programming languages and interpreters. This
//! project is inspired by the [Crafting Interpreters](https://craftinginterpreters.com/) book by
//! Bob Nystrom.
//!
//! ## Scanning
//! The first step in the interpreter is scanning. Scanning is the process of converting a string of
//! characters into a list of tokens. A token is a single unit of a programming language. For
//! example, the string `1 + 2` would be converted into the following tokens:
//! ```text
//! [Number(1), Plus, Number(2)]
//! ```
//! The scanner is implemented in the [`scanner`](scanner) module. It is a simple state machine
//! that consumes the whole source string in one pass and returns every token found.
//!
//! The scanner reports syntax errors in the source code as a [`ScanError`](error::ScanError).
//! These errors are trivial problems like an unterminated string literal or an unexpected
//! character. Scanning does not stop at the first error: the scanner keeps going so that the
//! user can fix more than one mistake per run.
//!
//! ## Parsing
//! The second step in the interpreter is parsing. Parsing is the process of converting a list of
//! tokens into an abstract syntax tree (AST). The parser is implemented in the [`parser`](parser)
//! module as a recursive descent parser. The parser transforms the list of tokens into expressions
//! and statements. [`Expressions`](expr::Expr) are pieces of code that produce a value, specifically
//! an [`Object`](object::Object). Objects are an umbrella term for all types of values in Lox
//! including literals, functions, classes and instances. [`Statements`](stmt::Stmt) are pieces of
//! code that do not produce a value but instead perform some action. These actions modify the
//! state of the program and thus are called side effects. For example, a variable decleration or
//! an if clause would be classified as statements.
//!
//! For example, the string `print 1 + 2;` would be converted into the following AST:
//! ```text
//! PrintStatement {
//!     BinaryExpression {
//!         left: Number(1),
//!         operator: Plus,
//!         right: Number(2),
//!     }
//! }
//! ```
//! The parser reports syntax errors in the source code as a [`ParseError`](error::ParseError).
//! Unlike the scanner, the parser catches errors that span multiple tokens. For example, the
//! following expression is invalid because it is missing the right-hand operand:
//! ```text
//! 1 !=
//! ```
//! However, much like the scanner, the parser will continue parsing the source code even if it
//! has already encountered a syntax error using a technique called synchronization. This is useful
//! because it allows the user to fix multiple syntax errors at once.
//!
//! ## Resolving
//! The third step in the interpreter is resolving. Resolving is the process of statically analyzing
//! the AST to determine the scope of each variable. While this requires a pre-pass of the AST, it
//! is necessary to construct robust lexical scoping. The resolver is implemented in the
//! [`resolver`](resolver) module. It runs after the parser because it requires the AST to be fully
//! constructed. The resolver reports errors as a [`ResolveError`](error::ResolveError). These
//! errors are syntactically valid but semantically invalid, and therefore cannot be caught by the
//! scanner or the parser. For example, the following is valid Lox syntax but is semantically
//! invalid because the variable `a` is already declared in this scope:
//! ```text
//! {
//!    var a = 1;
//!    var a = 2;
//! }
//! ```
//!
//! ## Interpreting
//! The final step in the interpreter is _interpreting_. Interpreting is the process of evaluating
//! the AST. The interpreter is implemented in the [`interpreter`](interpreter) module as a
//! tree-walk interpreter. Thanks to all the previous steps, the interpreter is able to evaluate the
//! AST directly and produce a result. The interpreter reports errors as a
//! [`RuntimeError`](error::RuntimeError). While the scanner, the parser and the resolver try to
//! catch as many errors as possible before running the code, most errors can only be caught at
//! runtime. For example, the following expression is valid Lox syntax but is semantically
//! invalid because it tries to add a string and a number:
//! ```text
//! var a = "123";
//! var b = a + 123;
//! ```
//! The interpreter is also responsible for managing the environment. The environment is a mapping
//! of variable names to their values. The environment is implemented in the
//! [`environment`](environment) module as a chain of scopes, one per enclosing block or function
//! call, which is what gives Lox lexical scoping and closures.

use std::fs;
use std::path::PathBuf;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub mod error;
pub mod token;
pub mod scanner;
pub mod expr;
pub mod stmt;
pub mod environment;
pub mod parser;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod function;
pub mod resolver;
pub mod class;

use error::Diagnostic;
use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

/// Process exit codes the CLI uses to distinguish why a run did not succeed.
pub mod exitcode {
    pub const OK: i32 = 0;
    pub const USAGE: i32 = 64;
    /// A scan, parse, or resolve error: the program was never run.
    pub const DATAERR: i32 = 65;
    /// The file named on the command line could not be opened.
    pub const NOINPUT: i32 = 66;
    /// The program ran and raised a runtime error.
    pub const SOFTWARE: i32 = 70;
    /// The REPL could not read another line of input.
    pub const IOERR: i32 = 74;
}

/// The result of running one chunk of source through the pipeline, used to decide which
/// exit code `run_file` should use. Diagnostics are printed as a side effect of `run`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RunOutcome {
    Ok,
    BuildError,
    RuntimeError,
}

/// The interpreter's entry point. Owns the single [`Interpreter`] instance that persists across
/// REPL lines, so a `var` or `fun` defined on one line is visible on the next.
pub struct Lox {
    interpreter: Interpreter,
}

impl Lox {
    pub fn new() -> Self {
        Lox { interpreter: Interpreter::new() }
    }

    /// Reads `path`, runs it, and exits the process with the code corresponding to whichever
    /// stage, if any, failed.
    pub fn run_file(&mut self, path: String) {
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(error) => {
                eprintln!("Could not open file '{path}': {error}");
                std::process::exit(exitcode::NOINPUT);
            },
        };

        match self.run(&contents) {
            RunOutcome::Ok => std::process::exit(exitcode::OK),
            RunOutcome::BuildError => std::process::exit(exitcode::DATAERR),
            RunOutcome::RuntimeError => std::process::exit(exitcode::SOFTWARE),
        }
    }

    /// Runs a line-buffered read-eval-print loop over stdin. Empty lines are ignored; EOF (or an
    /// interrupt) ends the session cleanly; a build or runtime error on one line is reported but
    /// does not end the session, since each line restarts the pipeline from scratch.
    pub fn run_prompt(&mut self) {
        let mut editor = DefaultEditor::new().expect("rustyline to initialize a line editor");
        let history_path = Self::history_path();

        if let Some(path) = &history_path {
            let _ = editor.load_history(path);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }

                    let _ = editor.add_history_entry(line.as_str());
                    self.run(&line);
                },
                Err(ReadlineError::Eof | ReadlineError::Interrupted) => break,
                Err(error) => {
                    eprintln!("Error reading input: {error}");
                    std::process::exit(exitcode::IOERR);
                },
            }
        }

        if let Some(path) = &history_path {
            let _ = editor.save_history(path);
        }
    }

    fn history_path() -> Option<PathBuf> {
        home::home_dir().map(|home| home.join(".lox_history"))
    }

    /// Runs the scan, parse, resolve, interpret pipeline over one chunk of source, printing
    /// diagnostics to stderr as they're produced and stopping at the first stage that fails.
    fn run(&mut self, source: &str) -> RunOutcome {
        self.interpreter.clear_locals();

        let scanner = Scanner::new(source);
        let (tokens, scan_errors) = scanner.scan_tokens();

        if !scan_errors.is_empty() {
            scan_errors.iter().for_each(|error| eprintln!("{}", error.render()));
            return RunOutcome::BuildError;
        }

        let parser = Parser::new(tokens);
        let (statements, parse_errors) = parser.parse();

        if !parse_errors.is_empty() {
            parse_errors.iter().for_each(|error| eprintln!("{}", error.render()));
            return RunOutcome::BuildError;
        }

        let resolve_errors = Resolver::new(&mut self.interpreter).resolve(&statements);

        if !resolve_errors.is_empty() {
            resolve_errors.iter().for_each(|error| eprintln!("{}", error.render()));
            return RunOutcome::BuildError;
        }

        match self.interpreter.interpret(&statements) {
            Ok(()) => RunOutcome::Ok,
            Err(error) => {
                eprintln!("{}", error.render());
                RunOutcome::RuntimeError
            },
        }
    }
}

impl Default for Lox {
    fn default() -> Self {
        Self::new()
    }
}
