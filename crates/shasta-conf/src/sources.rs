//! Configuration sources for layered settings
//!
//! Sources are merged in priority order (environment variables > TOML file >
//! defaults). Each source yields a map of section name to a JSON object.

use crate::error::SettingsError;
use crate::settings::Settings;
use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load configuration from this source
	fn load(&self) -> Result<IndexMap<String, Value>, SettingsError>;

	/// Get the priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Get a description of this source
	fn description(&self) -> String;
}

/// Built-in defaults from [`Settings::default`].
#[derive(Debug, Clone, Default)]
pub struct DefaultSource;

impl DefaultSource {
	pub fn new() -> Self {
		Self
	}
}

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SettingsError> {
		object_entries(serde_json::to_value(Settings::default())?)
	}

	fn priority(&self) -> u8 {
		0 // Lowest priority
	}

	fn description(&self) -> String {
		"Default values".to_string()
	}
}

/// TOML file configuration source. A missing file contributes nothing.
#[derive(Debug, Clone)]
pub struct TomlFileSource {
	path: PathBuf,
}

impl TomlFileSource {
	/// Create a new TOML file configuration source
	///
	/// # Examples
	///
	/// ```
	/// use shasta_conf::sources::TomlFileSource;
	///
	/// let source = TomlFileSource::new("shasta.toml");
	/// ```
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SettingsError> {
		if !self.path.exists() {
			tracing::debug!(path = %self.path.display(), "settings file not found, skipping");
			return Ok(IndexMap::new());
		}

		let content = fs::read_to_string(&self.path)?;
		let toml_value: toml::Value = toml::from_str(&content)?;
		object_entries(serde_json::to_value(toml_value)?)
	}

	fn priority(&self) -> u8 {
		50 // Medium priority
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// Environment variable configuration source
///
/// `<PREFIX><SECTION>_<KEY>` sets `key` in `section`, so with the prefix
/// `SHASTA_` the variable `SHASTA_HISTORY_PUSH_STATE` sets
/// `history.push_state`. Variables naming an unknown section or key are
/// ignored. Boolean settings accept `true/false`, `1/0`, `yes/no` and
/// `on/off`.
#[derive(Debug, Clone)]
pub struct EnvSource {
	prefix: String,
}

impl EnvSource {
	/// Create a source reading variables that start with `prefix`.
	pub fn with_prefix(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
		}
	}

	/// Load from an explicit list of variables instead of the process
	/// environment.
	pub fn load_from<I, K, V>(&self, vars: I) -> Result<IndexMap<String, Value>, SettingsError>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let defaults = serde_json::to_value(Settings::default())?;
		let mut config: IndexMap<String, Value> = IndexMap::new();

		for (key, value) in vars {
			let key = key.as_ref();
			let Some(stripped) = key.strip_prefix(&self.prefix) else {
				continue;
			};
			let lower_key = stripped.to_lowercase();
			let Some((section, field)) = lower_key.split_once('_') else {
				continue;
			};
			let Some(default) = defaults.get(section).and_then(|s| s.get(field)) else {
				tracing::debug!(variable = %key, "ignoring unknown settings variable");
				continue;
			};

			let parsed = parse_env_value(key, value.as_ref(), default)?;
			if let Value::Object(entries) = config
				.entry(section.to_string())
				.or_insert_with(|| Value::Object(Default::default()))
			{
				entries.insert(field.to_string(), parsed);
			}
		}

		Ok(config)
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SettingsError> {
		self.load_from(std::env::vars())
	}

	fn priority(&self) -> u8 {
		100 // Highest priority
	}

	fn description(&self) -> String {
		format!("Environment variables (prefix: {})", self.prefix)
	}
}

/// Parse a variable using the type of the default it overrides.
fn parse_env_value(key: &str, value: &str, default: &Value) -> Result<Value, SettingsError> {
	if default.is_boolean() {
		return match value.trim().to_lowercase().as_str() {
			"true" | "1" | "yes" | "on" => Ok(Value::Bool(true)),
			"false" | "0" | "no" | "off" => Ok(Value::Bool(false)),
			other => Err(SettingsError::Env(format!(
				"{} expects a boolean, got '{}'",
				key, other
			))),
		};
	}
	Ok(Value::String(value.to_string()))
}

fn object_entries(value: Value) -> Result<IndexMap<String, Value>, SettingsError> {
	match value {
		Value::Object(map) => Ok(map.into_iter().collect()),
		_ => Err(SettingsError::Invalid(
			"expected a table at the document root".to_string(),
		)),
	}
}

/// Merge `overlay` into `base`, recursing into objects.
pub(crate) fn merge_into(base: &mut IndexMap<String, Value>, overlay: IndexMap<String, Value>) {
	for (key, value) in overlay {
		match (base.get_mut(&key), value) {
			(Some(Value::Object(existing)), Value::Object(incoming)) => {
				for (k, v) in incoming {
					existing.insert(k, v);
				}
			}
			(_, value) => {
				base.insert(key, value);
			}
		}
	}
}
