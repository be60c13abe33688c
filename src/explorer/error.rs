use thiserror::Error;

/// Why a node fragment could not be obtained.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FetchError {
	#[error("network error: {0}")]
	Network(String),
	#[error("HTTP {0}")]
	Status(u16),
	#[error("could not decode fragment: {0}")]
	Decode(String),
	#[error("no such node: {0}")]
	NotFound(String),
}

impl From<serde_json::Error> for FetchError {
	fn from(err: serde_json::Error) -> Self {
		Self::Decode(err.to_string())
	}
}

/// Failures recorded by the controller against a node.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ExplorerError {
	#[error("fetch for {id} failed: {source}")]
	Fetch {
		id: String,
		#[source]
		source: FetchError,
	},
	#[error("fragment for {received} returned when {requested} was requested")]
	FragmentMismatch { requested: String, received: String },
}
