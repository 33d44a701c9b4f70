//! Single-resolution signals
//!
//! A [`OneShot`] holds a continuation that runs at most once. It models work
//! that finishes later than the call which started it, such as a view that
//! renders asynchronously and reports completion on its own schedule.

use super::error::SignalError;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

type Continuation<A, R> = Box<dyn FnOnce(A) -> R>;

enum State<A, R> {
	Pending(Option<Continuation<A, R>>),
	Resolved,
}

/// A continuation slot that may be fulfilled at most once.
///
/// Clones share the slot, so the side that arms the continuation and the side
/// that fulfils it can each hold their own handle.
///
/// # Examples
///
/// ```
/// use shasta_signals::{OneShot, SignalError};
///
/// let signal: OneShot<u8, u8> = OneShot::new("render");
/// signal.arm(|value| value * 2);
///
/// assert_eq!(signal.fulfill(21).unwrap(), Some(42));
/// assert_eq!(
///     signal.fulfill(1),
///     Err(SignalError::AlreadyResolved("render".to_string()))
/// );
/// ```
pub struct OneShot<A: 'static, R: 'static> {
	state: Rc<RefCell<State<A, R>>>,
	name: Rc<str>,
}

impl<A: 'static, R: 'static> OneShot<A, R> {
	/// Create an unarmed, unresolved signal.
	pub fn new(name: impl Into<Rc<str>>) -> Self {
		Self {
			state: Rc::new(RefCell::new(State::Pending(None))),
			name: name.into(),
		}
	}

	/// Name given at construction.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Install the continuation, replacing any previous one.
	///
	/// Has no effect once the signal is resolved.
	pub fn arm<F>(&self, continuation: F)
	where
		F: FnOnce(A) -> R + 'static,
	{
		let mut state = self.state.borrow_mut();
		if let State::Pending(slot) = &mut *state {
			*slot = Some(Box::new(continuation));
		}
	}

	/// Whether a continuation is installed and still waiting.
	pub fn is_armed(&self) -> bool {
		matches!(&*self.state.borrow(), State::Pending(Some(_)))
	}

	/// Whether the signal has been fulfilled.
	pub fn is_resolved(&self) -> bool {
		matches!(&*self.state.borrow(), State::Resolved)
	}

	/// Resolve the signal and run its continuation.
	///
	/// Returns `Ok(None)` when no continuation was armed. The signal counts as
	/// resolved either way, and any later call fails with
	/// [`SignalError::AlreadyResolved`].
	pub fn fulfill(&self, value: A) -> Result<Option<R>, SignalError> {
		let previous = std::mem::replace(&mut *self.state.borrow_mut(), State::Resolved);
		match previous {
			State::Resolved => Err(SignalError::AlreadyResolved(self.name.to_string())),
			// The borrow is released before the continuation runs so it may
			// inspect this signal.
			State::Pending(continuation) => Ok(continuation.map(|run| run(value))),
		}
	}
}

impl<A: 'static, R: 'static> Clone for OneShot<A, R> {
	fn clone(&self) -> Self {
		Self {
			state: Rc::clone(&self.state),
			name: Rc::clone(&self.name),
		}
	}
}

impl<A: 'static, R: 'static> fmt::Debug for OneShot<A, R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("OneShot")
			.field("name", &self.name)
			.field("armed", &self.is_armed())
			.field("resolved", &self.is_resolved())
			.finish()
	}
}
