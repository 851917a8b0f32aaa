use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A point in time, stored in UTC.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize, Hash)]
#[serde(transparent)]
pub struct Datetime(pub DateTime<Utc>);

impl From<DateTime<Utc>> for Datetime {
	fn from(v: DateTime<Utc>) -> Self {
		Self(v)
	}
}

impl FromStr for Datetime {
	type Err = ();
	/// Accepts RFC 3339 datetimes and plain `YYYY-MM-DD` dates, which
	/// are taken to start at midnight UTC.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if let Ok(v) = DateTime::parse_from_rfc3339(s) {
			return Ok(Datetime(v.with_timezone(&Utc)));
		}
		let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| ())?;
		let time = date.and_hms_opt(0, 0, 0).ok_or(())?;
		Ok(Datetime(Utc.from_utc_datetime(&time)))
	}
}

impl Datetime {
	pub fn now() -> Self {
		Datetime(Utc::now())
	}

	/// Returns the number of nanoseconds since the unix epoch, which is the
	/// version stamp used by the datastore. Dates before the epoch map to 0.
	pub fn to_version_stamp(&self) -> u64 {
		self.0.timestamp_nanos_opt().map(|n| n.max(0) as u64).unwrap_or(u64::MAX)
	}

	/// Creates a datetime from a datastore version stamp.
	pub fn from_version_stamp(ns: u64) -> Self {
		let ns = i64::try_from(ns).unwrap_or(i64::MAX);
		Datetime(Utc.timestamp_nanos(ns))
	}
}

impl fmt::Display for Datetime {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "d'{}'", self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_dates_and_datetimes() {
		let d: Datetime = "2017-01-01".parse().unwrap();
		let t: Datetime = "2017-01-01T00:00:00Z".parse().unwrap();
		assert_eq!(d, t);
		let t: Datetime = "2017-01-01T01:00:00+01:00".parse().unwrap();
		assert_eq!(d, t);
		assert!("test".parse::<Datetime>().is_err());
	}

	#[test]
	fn version_stamps_round_trip_through_nanoseconds() {
		let t: Datetime = "2020-06-01T12:30:00.000000001Z".parse().unwrap();
		let v = t.to_version_stamp();
		assert_eq!(Datetime::from_version_stamp(v), t);
		let early: Datetime = "1960-01-01".parse().unwrap();
		assert_eq!(early.to_version_stamp(), 0);
	}
}
