use std::num::NonZeroUsize;
use std::time::Duration;

use super::types::PositiveUsize;

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("barrage/", env!("CARGO_PKG_VERSION"));

/// Upper bound accepted for an explicit concurrency value.
pub const MAX_CONCURRENCY: usize = 10_000;
/// How long in-flight requests may finish after an interrupt.
pub const DEFAULT_INTERRUPT_GRACE: Duration = Duration::from_secs(2);
/// [`DEFAULT_INTERRUPT_GRACE`] in CLI duration syntax.
pub(crate) const DEFAULT_INTERRUPT_GRACE_ARG: &str = "2s";
/// In-flight requests per available core for the default concurrency.
const CONCURRENCY_PER_CORE: usize = 4;
/// Ceiling for the computed default concurrency.
const DEFAULT_CONCURRENCY_CAP: usize = 120;

/// Default concurrency: four in-flight requests per available core, capped at 120.
#[must_use]
pub fn default_concurrency() -> PositiveUsize {
    let cores = std::thread::available_parallelism().map_or(1, NonZeroUsize::get);
    let value = cores
        .saturating_mul(CONCURRENCY_PER_CORE)
        .min(DEFAULT_CONCURRENCY_CAP);
    PositiveUsize::try_from(value).unwrap_or(PositiveUsize::ONE)
}
