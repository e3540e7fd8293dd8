#![doc = include_str!("../README.md")]

pub mod codegen;
pub mod lexer;
pub mod parser;
pub mod symbols;

pub use parser::{analyze, Analysis, AnalysisError, SyntacticAnalyzer};
