use std::sync::LazyLock;

/// Specifies the names of parameters which can not be specified in a query.
pub const PROTECTED_PARAM_NAMES: &[&str] = &["this", "parent"];

/// Specifies how many independent statement targets are fetched concurrently.
pub static MAX_CONCURRENT_TASKS: LazyLock<usize> =
	lazy_env_parse!("STRATA_MAX_CONCURRENT_TASKS", usize, 64);

/// Specifies how deep computation recursive call will go before an error is returned.
pub static MAX_COMPUTATION_DEPTH: LazyLock<u32> =
	lazy_env_parse!("STRATA_MAX_COMPUTATION_DEPTH", u32, 120);

/// The maximum number of keys that should be scanned at once in general queries.
pub static NORMAL_FETCH_SIZE: LazyLock<u32> = lazy_env_parse!("STRATA_NORMAL_FETCH_SIZE", u32, 500);
