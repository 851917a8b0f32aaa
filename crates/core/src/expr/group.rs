use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::expr::Idiom;
use crate::fmt::Fmt;

/// The GROUP clause of a SELECT statement. An empty list groups every
/// record into a single group, as `GROUP ALL` does.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Groups(pub Vec<Group>);

impl Groups {
	/// `GROUP ALL`
	pub fn all() -> Self {
		Self(Vec::new())
	}

	/// `GROUP BY a, b, ...`
	pub fn by<I, T>(idioms: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Into<Idiom>,
	{
		Self(idioms.into_iter().map(|i| Group(i.into())).collect())
	}
}

impl Deref for Groups {
	type Target = Vec<Group>;
	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl Display for Groups {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		if self.0.is_empty() {
			write!(f, "GROUP ALL")
		} else {
			write!(f, "GROUP BY {}", Fmt::comma_separated(&self.0))
		}
	}
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Group(pub Idiom);

impl Deref for Group {
	type Target = Idiom;
	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl Display for Group {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		Display::fmt(&self.0, f)
	}
}
