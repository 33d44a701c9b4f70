//! Error types for view assembly and navigation.

use shasta_signals::SignalError;
use shasta_urls::RouterError;

/// Error reported by a view while constructing or rendering.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
	/// Rendering failed.
	#[error("Render failed: {0}")]
	Render(String),

	/// A constructor argument was not supplied.
	#[error("Missing constructor argument {0}")]
	MissingArgument(usize),

	/// A constructor argument had the wrong shape.
	#[error("Invalid constructor argument {index}: {message}")]
	InvalidArgument {
		/// Position of the argument.
		index: usize,
		/// Deserialisation failure.
		message: String,
	},
}

/// Error type for page assembly and navigation.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PagesError {
	/// The configured render method does not exist on the view.
	#[error("No method with name '{method}' was found at {view}")]
	UnknownRenderMethod {
		/// Render method that was looked up.
		method: String,
		/// Diagnostic name of the view.
		view: String,
	},

	/// A dispatch has no region to show its view in.
	#[error("Route '{route}' has no registered region{}", .region.as_ref().map(|r| format!(" (wanted '{}')", r)).unwrap_or_default())]
	UnknownRegion {
		/// Route being dispatched.
		route: String,
		/// Region name the route asked for, if any.
		region: Option<String>,
	},

	/// The region exists but its target does not resolve to an outlet.
	#[error("Region '{0}' has no resolvable target")]
	UnresolvedRegion(String),

	/// A render signal was completed twice.
	#[error("Render has already been completed")]
	RenderAlreadyCompleted,

	/// A view was re-entered while already borrowed by a dispatch.
	#[error("View '{0}' is busy")]
	ViewBusy(String),

	/// A deferred render finished without producing markup.
	#[error("Deferred render of '{0}' did not produce an element")]
	DeferredRenderIncomplete(String),

	#[error(transparent)]
	View(#[from] ViewError),

	#[error(transparent)]
	Router(#[from] RouterError),

	#[error(transparent)]
	Signal(#[from] SignalError),
}
