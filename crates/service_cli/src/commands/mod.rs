//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod fill;
pub mod inspect;
pub mod run;
