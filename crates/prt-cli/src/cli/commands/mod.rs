//! CLI command handlers. Each command is in its own file.

mod completions;
mod config;
mod get;

pub use completions::run_completions;
pub use config::run_config;
pub use get::{run_get, GetArgs};

#[cfg(test)]
pub(crate) use get::{code_predicate, parse_header, parse_ok_code};
