use crate::object::Object;
use crate::token::{Token, Type, Location};

/// Implemented by every diagnostic produced by the pipeline. Rendering is pure: no printing,
/// no shared mutable state. Callers collect diagnostics into a `Vec` and decide what to do
/// with them (print to stderr, fail a test, etc).
pub trait Diagnostic {
    fn render(&self) -> String;
}

/// An error raised while turning source text into tokens.
#[derive(Debug)]
pub struct ScanError {
    pub location: Location,
    pub message: String,
}

impl Diagnostic for ScanError {
    fn render(&self) -> String {
        format!(
            "[line {line}:{column}] Error: {message}",
            line = self.location.line,
            column = self.location.column,
            message = self.message,
        )
    }
}

/// An error raised while turning tokens into an AST.
#[derive(Debug)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl Diagnostic for ParseError {
    fn render(&self) -> String {
        if self.token.r#type == Type::EOF {
            format!(
                "[line {line}:{column}] Error at end: {message}",
                line = self.token.location.line,
                column = self.token.location.column,
                message = self.message,
            )
        } else {
            format!(
                "[line {line}:{column}] Error at '{lexeme}': {message}",
                line = self.token.location.line,
                column = self.token.location.column,
                lexeme = self.token.lexeme,
                message = self.message,
            )
        }
    }
}

/// An error raised while statically resolving variable scopes.
#[derive(Debug)]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

impl Diagnostic for ResolveError {
    fn render(&self) -> String {
        format!(
            "[line {line}:{column}] Error at '{lexeme}': {message}",
            line = self.token.location.line,
            column = self.token.location.column,
            lexeme = self.token.lexeme,
            message = self.message,
        )
    }
}

/// An error raised while executing a resolved, syntactically valid program.
///
/// Rendered on two lines, distinct from the build-time diagnostics above: the message first,
/// then the source location, since a runtime error is reported after some output may already
/// have been printed and should read as a trailing failure rather than a leading one.
#[derive(Debug)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl Diagnostic for RuntimeError {
    fn render(&self) -> String {
        format!(
            "{message}\n[on {line}:{column}]",
            message = self.message,
            line = self.token.location.line,
            column = self.token.location.column,
        )
    }
}

/// The outcome of executing a single statement. `Return` unwinds to the nearest enclosing
/// function call without relying on a panic or a special-purpose error variant.
#[derive(Debug)]
pub enum Signal {
    Normal,
    Return(Object),
}
