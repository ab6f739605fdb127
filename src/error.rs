use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("Model not found: {0}")]
	ModelNotFound(String),
	#[error("Invalid input: {0}")]
	InvalidInput(String),
	#[error("Configuration error: {0}")]
	ConfigError(String),
	#[error("Model registry has {0} invariant violation(s)")]
	InvalidRegistry(usize),
	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),
	#[error("Serialization error: {0}")]
	SerializationError(String),
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Error::SerializationError(err.to_string())
	}
}

impl From<toml::de::Error> for Error {
	fn from(err: toml::de::Error) -> Self {
		Error::SerializationError(err.to_string())
	}
}

pub type Result<T> = std::result::Result<T, Error>;
