//! # Shasta URLs
//!
//! Route templates, reverse lookup and the route table.
//!
//! ## Template syntax
//!
//! | Syntax    | Meaning                                   |
//! |-----------|-------------------------------------------|
//! | `:name`   | required segment, no `/`                  |
//! | `*name`   | rest of the path, `/` included            |
//! | `( … )`   | optional group, not nested                |
//!
//! ## Reverse lookup
//!
//! [`reverse_lookup`] turns a template and a [`ParameterMap`] back into a URL.
//! Optional groups whose parameters are absent disappear. A missing required
//! parameter becomes the empty string, so `some-path/:id` with no `id` gives
//! `some-path/`; use [`reverse_lookup_strict`] to get an error instead.
//!
//! ## Route table
//!
//! [`RouteTable`] registers routes on a [`shasta_signals::Dispatcher`] and
//! drives a [`History`]. Emitting `route-to:<name>` with a parameter map
//! navigates to the reversed URL and then fires `route:<name>` once with the
//! values in template order.

pub mod error;
pub mod history;
pub mod params;
pub mod pattern;
pub mod table;

pub use error::RouterError;
pub use history::{History, MemoryHistory, NavigateOptions, StartOptions};
pub use params::{ParamValue, ParameterMap};
pub use pattern::{RouteMatch, RoutePattern, reverse_lookup, reverse_lookup_strict};
pub use table::{
	DuplicateRoutePolicy, RouteCallback, RouteDispatcher, RouteEvent, RouteTable, SharedHistory,
};
