//! Error types for event dispatch.

/// Error raised by dispatcher handlers and one-shot signals.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignalError {
	/// A handler reported a failure while processing an event.
	#[error("Handler for '{event}' failed: {message}")]
	Handler {
		/// Event being delivered.
		event: String,
		/// Failure reported by the handler.
		message: String,
	},

	/// A single-resolution signal was fulfilled more than once.
	#[error("Signal '{0}' has already been resolved")]
	AlreadyResolved(String),
}

impl SignalError {
	/// Shorthand for [`SignalError::Handler`].
	pub fn handler(event: impl Into<String>, message: impl Into<String>) -> Self {
		Self::Handler {
			event: event.into(),
			message: message.into(),
		}
	}
}
