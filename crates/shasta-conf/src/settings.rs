//! Settings model

use crate::error::SettingsError;
use serde::{Deserialize, Serialize};

/// All Shasta settings.
///
/// Every field has a default, so a partial TOML document or no document at
/// all deserialises.
///
/// # Examples
///
/// ```
/// use shasta_conf::{DuplicateRoutes, Settings};
///
/// let settings = Settings::from_toml(
///     r#"
///     [history]
///     root = "/app"
///
///     [pages]
///     default_region = "content"
///     duplicate_routes = "replace"
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(settings.history.root, "/app");
/// assert!(settings.history.push_state);
/// assert_eq!(settings.pages.render_method, "render");
/// assert_eq!(settings.pages.default_region.as_deref(), Some("content"));
/// assert_eq!(settings.pages.duplicate_routes, DuplicateRoutes::Replace);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Options forwarded to the history mechanism on start.
	pub history: HistorySettings,
	/// View assembly and route registration options.
	pub pages: PagesSettings,
}

/// History options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
	pub root: String,
	pub push_state: bool,
	pub hash_change: bool,
	pub silent: bool,
}

impl Default for HistorySettings {
	fn default() -> Self {
		Self {
			root: "/".to_string(),
			push_state: true,
			hash_change: true,
			silent: false,
		}
	}
}

/// Page assembly options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagesSettings {
	/// Render method used when a route does not name one.
	pub render_method: String,
	/// Region used when a route does not name one.
	pub default_region: Option<String>,
	/// What happens when a route name is registered twice.
	pub duplicate_routes: DuplicateRoutes,
}

impl Default for PagesSettings {
	fn default() -> Self {
		Self {
			render_method: "render".to_string(),
			default_region: None,
			duplicate_routes: DuplicateRoutes::default(),
		}
	}
}

/// Duplicate route name handling.
///
/// Mirrors `shasta_urls::DuplicateRoutePolicy`, which the navigation manager
/// builds from it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateRoutes {
	#[default]
	Reject,
	Replace,
}

impl Settings {
	/// Parse a TOML document and validate it.
	pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
		let settings: Self = toml::from_str(content)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Check values that deserialise but cannot work.
	///
	/// # Errors
	///
	/// Returns [`SettingsError::Invalid`] for an empty render method, an empty
	/// default region, or a history root not starting with `/`.
	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.pages.render_method.trim().is_empty() {
			return Err(SettingsError::Invalid(
				"pages.render_method must not be empty".to_string(),
			));
		}
		if let Some(region) = &self.pages.default_region
			&& region.trim().is_empty()
		{
			return Err(SettingsError::Invalid(
				"pages.default_region must not be empty when set".to_string(),
			));
		}
		if !self.history.root.starts_with('/') {
			return Err(SettingsError::Invalid(format!(
				"history.root must start with '/', got '{}'",
				self.history.root
			)));
		}
		Ok(())
	}
}
