#![doc = include_str!("../README.md")]

pub use listing::*;
pub use operator::*;
pub use program::*;
pub use quadruple::*;

mod listing;
mod operator;
mod program;
mod quadruple;
