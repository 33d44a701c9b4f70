//! Settings builder

use crate::error::SettingsError;
use crate::settings::Settings;
use crate::sources::{ConfigSource, DefaultSource, EnvSource, TomlFileSource, merge_into};
use indexmap::IndexMap;
use serde_json::Value;
use std::path::PathBuf;

/// Builds [`Settings`] from layered sources.
///
/// Defaults are always the lowest layer. Sources are merged by ascending
/// priority, the result is deserialised and then validated.
///
/// # Examples
///
/// ```
/// use shasta_conf::SettingsBuilder;
///
/// let settings = SettingsBuilder::new()
///     .file("does-not-exist.toml")
///     .build()
///     .unwrap();
///
/// assert_eq!(settings.history.root, "/");
/// ```
pub struct SettingsBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsBuilder {
	/// Start with the built-in defaults only.
	pub fn new() -> Self {
		Self {
			sources: vec![Box::new(DefaultSource::new())],
		}
	}

	/// Layer a TOML file over the defaults.
	pub fn file(self, path: impl Into<PathBuf>) -> Self {
		self.source(TomlFileSource::new(path))
	}

	/// Layer environment variables starting with `prefix` on top.
	pub fn env_prefix(self, prefix: impl Into<String>) -> Self {
		self.source(EnvSource::with_prefix(prefix))
	}

	/// Add any configuration source.
	pub fn source(mut self, source: impl ConfigSource + 'static) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	/// Merge, deserialise and validate.
	pub fn build(mut self) -> Result<Settings, SettingsError> {
		// Stable sort keeps insertion order among equal priorities
		self.sources.sort_by_key(|source| source.priority());

		let mut merged: IndexMap<String, Value> = IndexMap::new();
		for source in &self.sources {
			let layer = source.load()?;
			tracing::debug!(
				source = %source.description(),
				sections = layer.len(),
				"settings source loaded"
			);
			merge_into(&mut merged, layer);
		}

		let settings: Settings =
			serde_json::from_value(Value::Object(merged.into_iter().collect()))?;
		settings.validate()?;
		Ok(settings)
	}
}

impl Default for SettingsBuilder {
	fn default() -> Self {
		Self::new()
	}
}
