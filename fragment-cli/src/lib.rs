//! Command-line front end for `fragment-validator`.
//!
//! Exposed as a library so the command handlers can be driven from tests
//! without spawning the binary.

pub mod cli;
pub mod logging;
pub mod release;
