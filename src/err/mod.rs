use std::io;

use thiserror::Error;

/// An error raised while running a command.
#[derive(Error, Debug)]
pub enum Error {
	#[error("There was a problem reading '{path}': {error}")]
	Io {
		path: String,
		error: io::Error,
	},

	#[error("There was a problem parsing '{path}': {error}")]
	Json {
		path: String,
		error: serde_json::Error,
	},

	#[error("The fixture write for '{id}' is invalid: {message}")]
	InvalidWrite {
		id: String,
		message: String,
	},

	#[error("{0}")]
	Core(#[from] anyhow::Error),
}
