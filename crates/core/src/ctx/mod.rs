pub use self::context::{Context, MutableContext};

mod context;
