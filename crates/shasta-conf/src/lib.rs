//! # Shasta Conf
//!
//! Layered settings for Shasta applications.
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. built-in defaults
//! 2. a TOML file
//! 3. environment variables with a prefix, e.g. `SHASTA_HISTORY_ROOT`
//!
//! ```toml
//! [history]
//! root = "/"
//! push_state = true
//! hash_change = true
//! silent = false
//!
//! [pages]
//! render_method = "render"
//! default_region = "content"
//! duplicate_routes = "reject"   # or "replace"
//! ```

pub mod builder;
pub mod error;
pub mod settings;
pub mod sources;

pub use builder::SettingsBuilder;
pub use error::SettingsError;
pub use settings::{DuplicateRoutes, HistorySettings, PagesSettings, Settings};
pub use sources::{ConfigSource, DefaultSource, EnvSource, TomlFileSource};
