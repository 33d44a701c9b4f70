//! Event names

use std::fmt;
use std::rc::Rc;

/// Prefix of the "show content now" event family.
pub const ROUTE_PREFIX: &str = "route:";

/// Prefix of the "navigate to" event family.
pub const ROUTE_TO_PREFIX: &str = "route-to:";

/// Internal storage for event names, supporting both static and owned strings.
#[derive(Debug, Clone)]
enum EventNameInner {
	/// Compile-time constant string (zero allocation)
	Static(&'static str),
	/// Dynamically created name
	Owned(Rc<str>),
}

/// Name of an event on a [`Dispatcher`](crate::Dispatcher).
///
/// Names are compared case-sensitively by their string form, so a static and an
/// owned name with the same text are the same event.
///
/// # Examples
///
/// ```
/// use shasta_signals::EventName;
///
/// assert_eq!(EventName::route("home").as_str(), "route:home");
/// assert_eq!(EventName::route_to("home").as_str(), "route-to:home");
/// assert_eq!(EventName::custom("teardown").as_str(), "teardown");
/// ```
#[derive(Debug, Clone)]
pub struct EventName(EventNameInner);

impl EventName {
	/// Create an event name from a static string.
	pub const fn custom(name: &'static str) -> Self {
		Self(EventNameInner::Static(name))
	}

	/// Create an event name from an owned string.
	pub fn from_string(name: impl Into<Rc<str>>) -> Self {
		Self(EventNameInner::Owned(name.into()))
	}

	/// `route:<name>`: content for the route should be shown now.
	pub fn route(route_name: &str) -> Self {
		Self::from_string(format!("{}{}", ROUTE_PREFIX, route_name))
	}

	/// `route-to:<name>`: something wants to navigate to the route.
	pub fn route_to(route_name: &str) -> Self {
		Self::from_string(format!("{}{}", ROUTE_TO_PREFIX, route_name))
	}

	/// Get the string representation of this event name.
	pub fn as_str(&self) -> &str {
		match &self.0 {
			EventNameInner::Static(s) => s,
			EventNameInner::Owned(s) => s,
		}
	}

	/// Returns the route name if this is a `route:<name>` event.
	pub fn route_name(&self) -> Option<&str> {
		self.as_str().strip_prefix(ROUTE_PREFIX)
	}

	/// Returns the route name if this is a `route-to:<name>` event.
	pub fn route_to_name(&self) -> Option<&str> {
		self.as_str().strip_prefix(ROUTE_TO_PREFIX)
	}
}

impl PartialEq for EventName {
	fn eq(&self, other: &Self) -> bool {
		self.as_str() == other.as_str()
	}
}

impl Eq for EventName {}

impl std::hash::Hash for EventName {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.as_str().hash(state);
	}
}

impl fmt::Display for EventName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl AsRef<str> for EventName {
	fn as_ref(&self) -> &str {
		self.as_str()
	}
}

impl From<&'static str> for EventName {
	fn from(name: &'static str) -> Self {
		Self::custom(name)
	}
}

impl From<String> for EventName {
	fn from(name: String) -> Self {
		Self::from_string(name)
	}
}
