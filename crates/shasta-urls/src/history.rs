//! History mechanism.
//!
//! The [`History`] trait is the contract the route table drives: it owns the
//! current URL fragment and the back/forward stack. [`MemoryHistory`] keeps
//! everything in process and is what a route table uses unless told otherwise.

use crate::error::RouterError;
use serde::{Deserialize, Serialize};

/// Options for a single navigation, forwarded verbatim from `route-to` events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigateOptions {
	/// Dispatch the route for the new URL after updating it.
	pub trigger: bool,
	/// Overwrite the current history entry instead of pushing a new one.
	pub replace: bool,
}

impl NavigateOptions {
	/// Options with `trigger` set.
	pub fn trigger() -> Self {
		Self {
			trigger: true,
			replace: false,
		}
	}

	/// Options with `replace` set.
	pub fn replace() -> Self {
		Self {
			trigger: false,
			replace: true,
		}
	}

	/// Set `trigger`.
	pub fn with_trigger(mut self, trigger: bool) -> Self {
		self.trigger = trigger;
		self
	}

	/// Set `replace`.
	pub fn with_replace(mut self, replace: bool) -> Self {
		self.replace = replace;
		self
	}
}

/// Options for starting the history mechanism.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartOptions {
	/// Path prefix the application is served under.
	pub root: String,
	/// Use the path-based history API.
	pub push_state: bool,
	/// Fall back to fragment-based URLs.
	pub hash_change: bool,
	/// Do not load the initial URL on start.
	pub silent: bool,
}

impl Default for StartOptions {
	fn default() -> Self {
		Self {
			root: "/".to_string(),
			push_state: true,
			hash_change: true,
			silent: false,
		}
	}
}

/// Strip one leading `#` or `/` and any trailing whitespace.
///
/// ```
/// use shasta_urls::history::normalize_fragment;
///
/// assert_eq!(normalize_fragment("#page/1"), "page/1");
/// assert_eq!(normalize_fragment("/page/1  "), "page/1");
/// ```
pub fn normalize_fragment(url: &str) -> String {
	let trimmed = url.trim_end();
	trimmed
		.strip_prefix(['#', '/'])
		.unwrap_or(trimmed)
		.to_string()
}

/// Normalise a root to the `/prefix/` form.
fn normalize_root(root: &str) -> String {
	let inner = root.trim_matches('/');
	if inner.is_empty() {
		"/".to_string()
	} else {
		format!("/{}/", inner)
	}
}

/// Contract for a URL history mechanism.
pub trait History {
	/// Start listening. Returns the fragment to load, or `None` when silent.
	///
	/// # Errors
	///
	/// Returns [`RouterError::HistoryAlreadyStarted`] when already started.
	fn start(&mut self, options: &StartOptions) -> Result<Option<String>, RouterError>;

	/// Stop listening. Has no effect when not started.
	fn stop(&mut self);

	/// Whether [`History::start`] has been called without a matching stop.
	fn is_started(&self) -> bool;

	/// The current normalised fragment.
	fn fragment(&self) -> String;

	/// Change the current URL.
	///
	/// Returns `Ok(false)` when nothing changed, either because the fragment
	/// is the current one or because the history is not started.
	fn navigate(&mut self, url: &str, options: &NavigateOptions) -> Result<bool, RouterError>;

	/// Step back one entry, returning the fragment now current.
	fn back(&mut self) -> Option<String>;

	/// Step forward one entry, returning the fragment now current.
	fn forward(&mut self) -> Option<String>;
}

/// In-process history with a push/replace stack and a cursor.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
	entries: Vec<String>,
	cursor: usize,
	started: bool,
	root: String,
}

impl MemoryHistory {
	/// Create a history whose only entry is the empty fragment.
	pub fn new() -> Self {
		Self::with_initial("")
	}

	/// Create a history whose only entry is `url`.
	pub fn with_initial(url: &str) -> Self {
		Self {
			entries: vec![normalize_fragment(url)],
			cursor: 0,
			started: false,
			root: "/".to_string(),
		}
	}

	/// Every entry, oldest first.
	pub fn entries(&self) -> &[String] {
		&self.entries
	}

	/// Full URL of the current entry, root included.
	pub fn url(&self) -> String {
		format!("{}{}", self.root, self.entries[self.cursor])
	}

	/// Root set by the last start.
	pub fn root(&self) -> &str {
		&self.root
	}
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new()
	}
}

impl History for MemoryHistory {
	fn start(&mut self, options: &StartOptions) -> Result<Option<String>, RouterError> {
		if self.started {
			return Err(RouterError::HistoryAlreadyStarted);
		}
		self.started = true;
		self.root = normalize_root(&options.root);

		tracing::info!(
			root = %self.root,
			fragment = %self.entries[self.cursor],
			silent = options.silent,
			"history started"
		);

		if options.silent {
			Ok(None)
		} else {
			Ok(Some(self.fragment()))
		}
	}

	fn stop(&mut self) {
		if self.started {
			tracing::info!(root = %self.root, "history stopped");
		}
		self.started = false;
	}

	fn is_started(&self) -> bool {
		self.started
	}

	fn fragment(&self) -> String {
		self.entries[self.cursor].clone()
	}

	fn navigate(&mut self, url: &str, options: &NavigateOptions) -> Result<bool, RouterError> {
		if !self.started {
			tracing::debug!(url = %url, "navigation ignored, history not started");
			return Ok(false);
		}

		let fragment = normalize_fragment(url);
		if fragment == self.entries[self.cursor] {
			return Ok(false);
		}

		if options.replace {
			self.entries[self.cursor] = fragment;
		} else {
			self.entries.truncate(self.cursor + 1);
			self.entries.push(fragment);
			self.cursor += 1;
		}

		tracing::debug!(
			url = %self.url(),
			replace = options.replace,
			"history navigated"
		);
		Ok(true)
	}

	fn back(&mut self) -> Option<String> {
		if self.cursor == 0 {
			return None;
		}
		self.cursor -= 1;
		Some(self.fragment())
	}

	fn forward(&mut self) -> Option<String> {
		if self.cursor + 1 >= self.entries.len() {
			return None;
		}
		self.cursor += 1;
		Some(self.fragment())
	}
}
