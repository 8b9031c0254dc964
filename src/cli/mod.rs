//! CLI module - argument parsing and interactive prompts

mod args;
mod prompts;

pub use args::{AnalysisArgs, Cli, Commands, LoadArgs};
pub use prompts::*;
