//! # Shasta
//!
//! Named routes, regions and view assembly for single-page applications.
//!
//! Shasta maps URL templates to named routes, builds a view when a route
//! fires, injects the view's element into a named region of the page and
//! tears down whatever view was showing there before.
//!
//! ## Feature Flags
//!
//! - `signals` - the route event bus
//! - `urls` - templates, reverse lookup, history and the route table
//! - `pages` - regions, views and the navigation manager
//! - `conf` - layered settings (defaults, TOML file, environment)
//! - `full` (default) - all of the above
//!
//! ## Quick Example
//!
//! ```rust
//! use shasta::prelude::*;
//!
//! let table: RouteTable = RouteTable::new();
//! table
//!     .add_url("some-path/:id(/:name)", "item", |_: &[ParamValue]| Ok::<(), RouterError>(()))
//!     .unwrap();
//!
//! let params = ParameterMap::new().with("id", 1);
//! assert_eq!(table.reverse("item", &params).unwrap(), "some-path/1");
//! ```

#[cfg(feature = "conf")]
pub mod conf;
#[cfg(feature = "pages")]
pub mod pages;
#[cfg(feature = "signals")]
pub mod signals;
#[cfg(feature = "urls")]
pub mod urls;

#[cfg(feature = "signals")]
pub use shasta_signals::{Dispatcher, EventName, SignalError};

#[cfg(feature = "urls")]
pub use shasta_urls::{
	History, MemoryHistory, NavigateOptions, ParamValue, ParameterMap, RouteTable, RouterError,
	StartOptions, reverse_lookup, reverse_lookup_strict,
};

#[cfg(feature = "pages")]
pub use shasta_pages::{
	Element, MemoryDocument, NavigationManager, PagesError, Rendered, View, ViewContext,
	ViewError, ViewFactory, ViewOptions,
};

#[cfg(feature = "conf")]
pub use shasta_conf::{Settings, SettingsBuilder, SettingsError};

/// Common imports.
pub mod prelude {
	#[cfg(feature = "signals")]
	pub use crate::{Dispatcher, EventName};

	#[cfg(feature = "urls")]
	pub use crate::{
		NavigateOptions, ParamValue, ParameterMap, RouteTable, RouterError, StartOptions,
		reverse_lookup,
	};

	#[cfg(feature = "pages")]
	pub use crate::{
		Element, MemoryDocument, NavigationManager, PagesError, Rendered, View, ViewContext,
		ViewError, ViewFactory, ViewOptions,
	};

	#[cfg(feature = "conf")]
	pub use crate::{Settings, SettingsBuilder};
}
