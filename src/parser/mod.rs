//! Command-Line Parsing Module

pub mod lexer;

pub use lexer::{split_line, SplitError};
