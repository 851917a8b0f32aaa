//! The typed statement and expression trees evaluated by the engine.

pub(crate) mod cond;
pub(crate) mod expression;
pub(crate) mod field;
pub(crate) mod function;
pub(crate) mod group;
pub(crate) mod idiom;
pub(crate) mod limit;
pub(crate) mod literal;
pub(crate) mod operator;
pub(crate) mod order;
pub(crate) mod param;
pub(crate) mod part;
pub(crate) mod start;

pub mod statements;

pub use self::cond::Cond;
pub use self::expression::Expr;
pub use self::field::{Field, Fields};
pub use self::function::FunctionCall;
pub use self::group::{Group, Groups};
pub use self::idiom::Idiom;
pub use self::limit::Limit;
pub use self::literal::{Literal, ObjectEntry};
pub use self::operator::{BinaryOperator, PostfixOperator, PrefixOperator};
pub use self::order::{Collation, Collator, Order, OrderDirection, OrderList};
pub use self::param::Param;
pub use self::part::Part;
pub use self::start::Start;
pub use self::statements::{SelectStatement, SetStatement, Statement};
