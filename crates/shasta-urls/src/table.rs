//! Route table
//!
//! Binds route templates and names to callbacks and bridges the two event
//! families on the dispatcher:
//!
//! - a URL that matches a template triggers `route:<name>` with the matched
//!   values;
//! - `route-to:<name>` with a parameter map reverse-looks-up the URL, updates
//!   the history and then triggers `route:<name>` with the values ordered the
//!   way the template declares them.

use crate::error::RouterError;
use crate::history::{History, MemoryHistory, NavigateOptions, StartOptions};
use crate::params::{ParamValue, ParameterMap};
use crate::pattern::RoutePattern;
use serde::{Deserialize, Serialize};
use shasta_signals::{Dispatcher, EventName};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Payload carried by route events.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteEvent {
	/// `route:<name>`: positional values in template declaration order.
	Route(Vec<ParamValue>),
	/// `route-to:<name>`: named parameters and navigation options.
	RouteTo {
		/// Parameters for reverse lookup.
		params: ParameterMap,
		/// Passed through to the history.
		options: NavigateOptions,
	},
}

impl RouteEvent {
	/// Positional values of a `Route` payload.
	pub fn values(&self) -> Option<&[ParamValue]> {
		match self {
			Self::Route(values) => Some(values),
			Self::RouteTo { .. } => None,
		}
	}
}

/// What to do when a route name is registered twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateRoutePolicy {
	/// Fail with [`RouterError::DuplicateRoute`].
	#[default]
	Reject,
	/// Replace the earlier route and its listeners.
	Replace,
}

/// Callback invoked with the positional values of a route.
pub type RouteCallback<E> = Rc<dyn Fn(&[ParamValue]) -> Result<(), E>>;

/// Dispatcher type used by a [`RouteTable`].
pub type RouteDispatcher<E = RouterError> = Dispatcher<RouteEvent, E>;

/// Shared handle to the history a table drives.
pub type SharedHistory = Rc<RefCell<Box<dyn History>>>;

#[derive(Debug, Clone)]
struct RouteEntry {
	name: String,
	pattern: Rc<RoutePattern>,
}

fn route_uid(name: &str) -> String {
	format!("shasta.route:{}", name)
}

fn route_to_uid(name: &str) -> String {
	format!("shasta.route-to:{}", name)
}

/// Named routes over a dispatcher and a history.
///
/// `E` is the error route callbacks return. It must absorb [`RouterError`] so
/// history failures raised while handling `route-to` reach whoever triggered it.
///
/// # Examples
///
/// ```
/// use shasta_urls::{NavigateOptions, ParamValue, ParameterMap, RouteTable, RouterError, StartOptions};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let table: RouteTable = RouteTable::new();
/// let seen = Rc::new(RefCell::new(Vec::new()));
///
/// let sink = Rc::clone(&seen);
/// table
///     .add_url("animal/:name/color/:color", "animal", move |values: &[ParamValue]| {
///         sink.borrow_mut().push(values.to_vec());
///         Ok::<(), RouterError>(())
///     })
///     .unwrap();
/// table.start(&StartOptions { silent: true, ..StartOptions::default() }).unwrap();
///
/// let params = ParameterMap::new().with("color", "brown-cow").with("name", "leland");
/// table.route_to("animal", params, NavigateOptions::default()).unwrap();
///
/// assert_eq!(table.fragment(), "animal/leland/color/brown-cow");
/// assert_eq!(
///     seen.borrow()[0],
///     vec![ParamValue::from("leland"), ParamValue::from("brown-cow")]
/// );
/// ```
pub struct RouteTable<E: 'static = RouterError> {
	routes: Rc<RefCell<Vec<RouteEntry>>>,
	history: SharedHistory,
	dispatcher: RouteDispatcher<E>,
	policy: DuplicateRoutePolicy,
}

impl<E> RouteTable<E>
where
	E: From<RouterError> + 'static,
{
	/// Create a table with its own dispatcher and a [`MemoryHistory`].
	pub fn new() -> Self {
		Self::with_dispatcher(Dispatcher::named("shasta.routes"))
	}

	/// Create a table publishing on an existing dispatcher.
	pub fn with_dispatcher(dispatcher: RouteDispatcher<E>) -> Self {
		Self {
			routes: Rc::new(RefCell::new(Vec::new())),
			history: Rc::new(RefCell::new(Box::new(MemoryHistory::new()))),
			dispatcher,
			policy: DuplicateRoutePolicy::default(),
		}
	}

	/// Use `history` instead of the in-memory default.
	pub fn with_history(self, history: impl History + 'static) -> Self {
		*self.history.borrow_mut() = Box::new(history);
		self
	}

	/// Set the duplicate-name policy.
	pub fn with_duplicate_policy(mut self, policy: DuplicateRoutePolicy) -> Self {
		self.policy = policy;
		self
	}

	/// Dispatcher carrying the route events.
	pub fn dispatcher(&self) -> &RouteDispatcher<E> {
		&self.dispatcher
	}

	/// Shared handle to the history.
	pub fn history(&self) -> SharedHistory {
		Rc::clone(&self.history)
	}

	/// Register a route.
	///
	/// `callback` is subscribed to `route:<name>`, and a listener on
	/// `route-to:<name>` performs reverse lookup and navigation.
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidPattern`] for a malformed template and
	/// [`RouterError::DuplicateRoute`] when `name` is taken under the reject
	/// policy.
	pub fn add_url<F>(&self, template: &str, name: &str, callback: F) -> Result<(), RouterError>
	where
		F: Fn(&[ParamValue]) -> Result<(), E> + 'static,
	{
		let pattern = Rc::new(RoutePattern::new(template)?);

		{
			let mut routes = self.routes.borrow_mut();
			if let Some(index) = routes.iter().position(|r| r.name == name) {
				match self.policy {
					DuplicateRoutePolicy::Reject => {
						return Err(RouterError::DuplicateRoute(name.to_string()));
					}
					DuplicateRoutePolicy::Replace => {
						let previous = routes.remove(index);
						tracing::warn!(
							route = %name,
							previous = %previous.pattern,
							template = %template,
							"replacing existing route"
						);
					}
				}
			}
			routes.push(RouteEntry {
				name: name.to_string(),
				pattern: Rc::clone(&pattern),
			});
		}

		let callback: RouteCallback<E> = Rc::new(callback);
		self.dispatcher
			.on_with_uid(EventName::route(name), route_uid(name), move |event| {
				match event {
					RouteEvent::Route(values) => callback(values),
					RouteEvent::RouteTo { .. } => Ok(()),
				}
			});

		let listener = self.route_to_listener(name, pattern);
		self.dispatcher
			.on_with_uid(EventName::route_to(name), route_to_uid(name), listener);

		tracing::info!(route = %name, template = %template, "route registered");
		Ok(())
	}

	fn route_to_listener(
		&self,
		name: &str,
		pattern: Rc<RoutePattern>,
	) -> impl Fn(&RouteEvent) -> Result<(), E> + 'static {
		let name = name.to_string();
		let history = Rc::clone(&self.history);
		let bus = self.dispatcher.downgrade();

		move |event| {
			let RouteEvent::RouteTo { params, options } = event else {
				return Ok(());
			};

			let url = pattern.reverse(params);
			// Only the URL changes here; the single dispatch is the trigger below
			let changed = history
				.borrow_mut()
				.navigate(&url, &options.with_trigger(false))?;
			tracing::debug!(route = %name, url = %url, changed, "route-to");

			let values = params.values_in(pattern.param_names());
			match bus.upgrade() {
				Some(bus) => bus.trigger(&EventName::route(&name), &RouteEvent::Route(values)),
				None => Ok(()),
			}
		}
	}

	/// Names of every registered route, in registration order.
	pub fn route_names(&self) -> Vec<String> {
		self.routes.borrow().iter().map(|r| r.name.clone()).collect()
	}

	/// Whether a route is registered under `name`.
	pub fn has_route(&self, name: &str) -> bool {
		self.routes.borrow().iter().any(|r| r.name == name)
	}

	/// Compiled pattern of a route.
	pub fn pattern(&self, name: &str) -> Option<Rc<RoutePattern>> {
		self.routes
			.borrow()
			.iter()
			.find(|r| r.name == name)
			.map(|r| Rc::clone(&r.pattern))
	}

	/// Number of registered routes.
	pub fn len(&self) -> usize {
		self.routes.borrow().len()
	}

	/// Whether no route is registered.
	pub fn is_empty(&self) -> bool {
		self.routes.borrow().is_empty()
	}

	/// Find the route for a fragment. The most recently registered route wins.
	pub fn resolve(&self, fragment: &str) -> Option<(String, Vec<ParamValue>)> {
		self.routes.borrow().iter().rev().find_map(|r| {
			r.pattern
				.matches(fragment)
				.map(|m| (r.name.clone(), m.values))
		})
	}

	/// Dispatch the route matching `fragment`. Returns `false` when none matches.
	pub fn load_url(&self, fragment: &str) -> Result<bool, E> {
		let fragment = crate::history::normalize_fragment(fragment);
		let Some((name, values)) = self.resolve(&fragment) else {
			tracing::debug!(fragment = %fragment, "no route matches");
			return Ok(false);
		};

		tracing::debug!(route = %name, fragment = %fragment, "loading url");
		self.dispatcher
			.trigger(&EventName::route(&name), &RouteEvent::Route(values))?;
		Ok(true)
	}

	/// Update the URL, dispatching it when `options.trigger` is set.
	///
	/// Returns whether the URL changed.
	pub fn navigate(&self, url: &str, options: NavigateOptions) -> Result<bool, E> {
		let changed = self.history.borrow_mut().navigate(url, &options)?;
		if changed && options.trigger {
			self.load_url(url)?;
		}
		Ok(changed)
	}

	/// Build the URL of a named route.
	///
	/// # Errors
	///
	/// Returns [`RouterError::UnknownRoute`] when no route has that name.
	pub fn reverse(&self, name: &str, params: &ParameterMap) -> Result<String, RouterError> {
		self.pattern(name)
			.map(|pattern| pattern.reverse(params))
			.ok_or_else(|| RouterError::UnknownRoute(name.to_string()))
	}

	/// Build the URL of a named route, failing on missing required parameters.
	pub fn reverse_strict(&self, name: &str, params: &ParameterMap) -> Result<String, RouterError> {
		self.pattern(name)
			.ok_or_else(|| RouterError::UnknownRoute(name.to_string()))?
			.reverse_strict(params)
	}

	/// Emit `route-to:<name>`.
	///
	/// # Errors
	///
	/// Returns [`RouterError::UnknownRoute`] (converted into `E`) when no route
	/// has that name, and whatever a listener fails with.
	pub fn route_to(
		&self,
		name: &str,
		params: ParameterMap,
		options: NavigateOptions,
	) -> Result<(), E> {
		if !self.has_route(name) {
			return Err(RouterError::UnknownRoute(name.to_string()).into());
		}
		self.dispatcher.trigger(
			&EventName::route_to(name),
			&RouteEvent::RouteTo { params, options },
		)
	}

	/// Start the history and load the initial fragment unless silent.
	///
	/// Returns whether a route matched the initial fragment.
	pub fn start(&self, options: &StartOptions) -> Result<bool, E> {
		let initial = self.history.borrow_mut().start(options)?;
		match initial {
			Some(fragment) => self.load_url(&fragment),
			None => Ok(false),
		}
	}

	/// Stop the history.
	pub fn stop(&self) {
		self.history.borrow_mut().stop();
	}

	/// Whether the history is started.
	pub fn is_started(&self) -> bool {
		self.history.borrow().is_started()
	}

	/// Current fragment.
	pub fn fragment(&self) -> String {
		self.history.borrow().fragment()
	}

	/// Step back and dispatch the resulting fragment.
	///
	/// Returns `false` at the start of the history.
	pub fn back(&self) -> Result<bool, E> {
		let fragment = self.step(|history| history.back())?;
		match fragment {
			Some(fragment) => self.load_url(&fragment).map(|_| true),
			None => Ok(false),
		}
	}

	/// Step forward and dispatch the resulting fragment.
	///
	/// Returns `false` at the end of the history.
	pub fn forward(&self) -> Result<bool, E> {
		let fragment = self.step(|history| history.forward())?;
		match fragment {
			Some(fragment) => self.load_url(&fragment).map(|_| true),
			None => Ok(false),
		}
	}

	fn step(
		&self,
		mv: impl FnOnce(&mut Box<dyn History>) -> Option<String>,
	) -> Result<Option<String>, RouterError> {
		let mut history = self.history.borrow_mut();
		if !history.is_started() {
			return Err(RouterError::HistoryNotStarted);
		}
		Ok(mv(&mut history))
	}
}

impl<E> Default for RouteTable<E>
where
	E: From<RouterError> + 'static,
{
	fn default() -> Self {
		Self::new()
	}
}

impl<E: 'static> fmt::Debug for RouteTable<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouteTable")
			.field(
				"routes",
				&self
					.routes
					.borrow()
					.iter()
					.map(|r| (r.name.clone(), r.pattern.template().to_string()))
					.collect::<Vec<_>>(),
			)
			.field("policy", &self.policy)
			.finish()
	}
}
