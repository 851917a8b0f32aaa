use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;

/// The log levels which can be chosen on the command line
pub const LOG_LEVELS: [&str; 7] = ["none", "full", "error", "warn", "info", "debug", "trace"];

#[derive(Default, Debug, Clone)]
pub struct Builder {
	log_level: Option<String>,
}

pub fn builder() -> Builder {
	Builder::default()
}

/// Converts a log level into a filter. The `full` level traces every
/// crate, while the other levels only apply to the strata crates.
pub fn filter_from_value(v: &str) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
	match v {
		// Don't show any logs at all
		"none" => Ok(EnvFilter::new("off")),
		// Otherwise, let's show only the strata logs
		"error" | "warn" | "info" | "debug" | "trace" => {
			EnvFilter::builder().parse(format!("error,strata={v},strata_core={v}"))
		}
		// Let's show everything
		"full" => Ok(EnvFilter::default().add_directive(tracing::Level::TRACE.into())),
		// Let's try to parse the custom filter
		_ => EnvFilter::builder().parse(v),
	}
}

impl Builder {
	/// Set the log level on the builder
	pub fn with_log_level(mut self, log_level: &str) -> Self {
		self.log_level = Some(log_level.to_string());
		self
	}

	/// Build a tracing dispatcher with a fmt subscriber writing to stderr
	pub fn build(self) -> Result<Box<dyn Subscriber + Send + Sync + 'static>, tracing_subscriber::filter::ParseError> {
		let filter = match self.log_level {
			Some(level) => Some(filter_from_value(&level)?),
			None => None,
		};
		let registry = tracing_subscriber::registry().with(filter.map(|filter| {
			tracing_subscriber::fmt::layer()
				.compact()
				.with_ansi(true)
				.with_target(true)
				.with_span_events(FmtSpan::NONE)
				.with_writer(std::io::stderr)
				.with_filter(filter)
		}));
		Ok(Box::new(registry))
	}

	/// Install the tracing dispatcher globally
	pub fn init(self) -> Result<(), tracing_subscriber::filter::ParseError> {
		self.build()?.init();
		Ok(())
	}
}
