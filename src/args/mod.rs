//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;

pub use cli::TesterArgs;
pub use defaults::{DEFAULT_INTERRUPT_GRACE, MAX_CONCURRENCY, default_concurrency};
pub use types::{OutputFormat, PositiveUsize, Strategy};

pub(crate) use defaults::DEFAULT_USER_AGENT;
pub use parsers::{parse_duration_arg, parse_optional_duration_arg};
