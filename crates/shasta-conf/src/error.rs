//! Error types for loading settings.

/// Error raised while loading or validating settings.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Environment error: {0}")]
	Env(String),

	#[error("Deserialization error: {0}")]
	Deserialize(#[from] serde_json::Error),

	#[error("Invalid settings: {0}")]
	Invalid(String),
}
