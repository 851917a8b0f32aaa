//! Executes batches of statements. The SELECT pipeline resolves statement
//! targets, fetches their records at a single snapshot version, filters,
//! groups, orders and paginates them, and projects the output rows.

mod executor;
mod group;
mod iterator;
mod options;
mod response;
mod store;
mod variables;

pub use self::options::*;
pub use self::response::*;
pub use self::variables::*;

pub(crate) use self::executor::*;
pub(crate) use self::iterator::*;

pub(crate) const TARGET: &str = "strata::core::dbs";
