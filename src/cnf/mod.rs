/// The publicly visible name of the tool
pub const PKG_NAME: &str = "strata";

/// The version of the tool
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The log target of the command line tool
pub const TARGET: &str = "strata::cli";
