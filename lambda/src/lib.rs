//! An untyped lambda calculus evaluator, structured as a small pipeline:
//!
//! - [`lexer`] scans codepoints into a token vector ending in a sentinel.
//! - [`parser`] builds the reference-counted expression tree.
//! - [`eval`] owns substitution, alpha-conversion and beta-reduction, and
//!   reports every contraction on a trace channel.
//! - [`interpreter`] classifies input lines, keeps the session's binding
//!   store, and folds results and errors into user-facing text.

pub mod ast;
pub mod eval;
pub mod interpreter;
pub mod lexer;
pub mod parser;
