//! Error types for route registration, reverse lookup and history.

use shasta_signals::SignalError;

/// Error type for router operations.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
	/// The route template could not be compiled.
	#[error("Invalid route template '{template}': {reason}")]
	InvalidPattern {
		/// Template as given at registration.
		template: String,
		/// Why compilation failed.
		reason: String,
	},

	/// A route with this name is already registered.
	#[error("Route '{0}' is already registered")]
	DuplicateRoute(String),

	/// No route is registered under this name.
	#[error("Unknown route: {0}")]
	UnknownRoute(String),

	/// No registered route matches the fragment.
	#[error("Route not found: {0}")]
	NotFound(String),

	/// A required placeholder had no value during strict reverse lookup.
	#[error("Missing parameter '{param}' for template '{template}'")]
	MissingParameter {
		/// Template being reversed.
		template: String,
		/// Placeholder name without its sigil.
		param: String,
	},

	/// The history was started twice without an intervening stop.
	#[error("History has already been started")]
	HistoryAlreadyStarted,

	/// The operation needs a started history.
	#[error("History has not been started")]
	HistoryNotStarted,

	/// The history mechanism refused the navigation.
	#[error("Navigation failed: {0}")]
	NavigationFailed(String),

	/// An event handler failed.
	#[error(transparent)]
	Signal(#[from] SignalError),
}
