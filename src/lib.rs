pub mod ast;
pub mod dot;
pub mod lexer;
pub mod names;
pub mod parser;
pub mod symbols;

use std::io;

use parser::{Parser, Warning};

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("Parse error: {0}")]
    Parse(#[from] parser::ParseError),
    #[error("{0}")]
    Dot(#[from] dot::DotError),
}

/// Compile an ERD descriptor to a Graphviz dot document.
///
/// One-shot: builds the schema, then streams the dot output into `out`.
/// Returns the warnings raised during the build. A generation failure may
/// leave a partial document in `out`; callers must discard it.
pub fn compile<W: io::Write>(source: &str, out: W) -> Result<Vec<Warning>, CompileError> {
    let mut parser = Parser::new(source);
    let schema = parser.parse()?;
    dot::write_dot(&schema, out)?;
    Ok(parser.take_warnings())
}
