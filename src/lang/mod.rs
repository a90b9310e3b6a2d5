//! The Bubble language
//!
//! Source text flows through `lex` -> `parse` -> `eval`. `runtime` ties the phases together
//! behind a single entry point.

pub mod ast;
pub mod eval;
pub mod lex;
pub mod parse;
pub mod runtime;
pub mod value;
pub mod variables;
