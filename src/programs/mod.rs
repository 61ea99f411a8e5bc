//! Native Programs
//!
//! - Token Program: mints, token accounts, multisig, wrapped native

pub mod token;

pub use token::*;
