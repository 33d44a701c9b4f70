//! Layered settings.
//!
//! # Examples
//!
//! ```rust,no_run
//! use shasta::conf::SettingsBuilder;
//!
//! let settings = SettingsBuilder::new()
//!     .file("shasta.toml")
//!     .env_prefix("SHASTA_")
//!     .build()
//!     .unwrap();
//! ```

pub use shasta_conf::*;
