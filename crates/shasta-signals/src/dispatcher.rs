//! Named-event dispatcher

use super::core::EventName;
use super::error::SignalError;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// Handler stored by a [`Dispatcher`].
pub type HandlerFn<T, E> = Rc<dyn Fn(&T) -> Result<(), E>>;

/// Identifier returned when a listener is subscribed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Information about a subscribed listener
struct ListenerInfo<T: 'static, E: 'static> {
	id: ListenerId,
	handler: HandlerFn<T, E>,
	dispatch_uid: Option<String>,
	once: bool,
}

impl<T: 'static, E: 'static> Clone for ListenerInfo<T, E> {
	fn clone(&self) -> Self {
		Self {
			id: self.id,
			handler: Rc::clone(&self.handler),
			dispatch_uid: self.dispatch_uid.clone(),
			once: self.once,
		}
	}
}

struct DispatcherInner<T: 'static, E: 'static> {
	listeners: HashMap<EventName, Vec<ListenerInfo<T, E>>>,
	next_id: u64,
}

/// Synchronous publish/subscribe channel keyed by [`EventName`].
///
/// `T` is the payload every event carries and `E` the error a handler may
/// return. Cloning a dispatcher yields another handle to the same listener
/// table.
pub struct Dispatcher<T: 'static, E: 'static = SignalError> {
	inner: Rc<RefCell<DispatcherInner<T, E>>>,
	name: Rc<str>,
}

impl<T: 'static, E: 'static> Dispatcher<T, E> {
	/// Create an empty dispatcher.
	pub fn new() -> Self {
		Self::named("dispatcher")
	}

	/// Create an empty dispatcher with a name used in diagnostics.
	pub fn named(name: impl Into<Rc<str>>) -> Self {
		Self {
			inner: Rc::new(RefCell::new(DispatcherInner {
				listeners: HashMap::new(),
				next_id: 0,
			})),
			name: name.into(),
		}
	}

	/// Name given at construction.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Create a non-owning handle, for listeners that need to publish on the
	/// dispatcher they are subscribed to.
	pub fn downgrade(&self) -> WeakDispatcher<T, E> {
		WeakDispatcher {
			inner: Rc::downgrade(&self.inner),
			name: Rc::clone(&self.name),
		}
	}

	fn subscribe(
		&self,
		event: EventName,
		handler: HandlerFn<T, E>,
		dispatch_uid: Option<String>,
		once: bool,
	) -> ListenerId {
		let mut inner = self.inner.borrow_mut();
		let id = ListenerId(inner.next_id);
		inner.next_id += 1;

		let listeners = inner.listeners.entry(event.clone()).or_default();

		// Remove existing listener with same dispatch_uid
		if let Some(ref uid) = dispatch_uid {
			listeners.retain(|l| l.dispatch_uid.as_ref() != Some(uid));
		}

		listeners.push(ListenerInfo {
			id,
			handler,
			dispatch_uid,
			once,
		});

		tracing::trace!(dispatcher = %self.name, event = %event, ?id, "listener subscribed");
		id
	}

	/// Subscribe a handler to `event`.
	pub fn on<F>(&self, event: impl Into<EventName>, handler: F) -> ListenerId
	where
		F: Fn(&T) -> Result<(), E> + 'static,
	{
		self.subscribe(event.into(), Rc::new(handler), None, false)
	}

	/// Subscribe a handler under a dispatch uid.
	///
	/// A listener already registered on `event` with the same uid is replaced,
	/// and the new handler moves to the end of the delivery order.
	pub fn on_with_uid<F>(
		&self,
		event: impl Into<EventName>,
		dispatch_uid: impl Into<String>,
		handler: F,
	) -> ListenerId
	where
		F: Fn(&T) -> Result<(), E> + 'static,
	{
		self.subscribe(
			event.into(),
			Rc::new(handler),
			Some(dispatch_uid.into()),
			false,
		)
	}

	/// Subscribe a handler that is removed after its first delivery.
	pub fn once<F>(&self, event: impl Into<EventName>, handler: F) -> ListenerId
	where
		F: Fn(&T) -> Result<(), E> + 'static,
	{
		self.subscribe(event.into(), Rc::new(handler), None, true)
	}

	/// Unsubscribe the listener registered on `event` under `dispatch_uid`.
	pub fn off(&self, event: &EventName, dispatch_uid: &str) -> bool {
		let mut inner = self.inner.borrow_mut();
		let Some(listeners) = inner.listeners.get_mut(event) else {
			return false;
		};
		let original_len = listeners.len();
		listeners.retain(|l| l.dispatch_uid.as_deref() != Some(dispatch_uid));
		listeners.len() < original_len
	}

	/// Unsubscribe a listener by the id returned at subscription.
	pub fn off_id(&self, id: ListenerId) -> bool {
		let mut inner = self.inner.borrow_mut();
		let mut removed = false;
		for listeners in inner.listeners.values_mut() {
			let original_len = listeners.len();
			listeners.retain(|l| l.id != id);
			removed |= listeners.len() < original_len;
		}
		removed
	}

	/// Unsubscribe every listener of `event`, returning how many were removed.
	pub fn off_all(&self, event: &EventName) -> usize {
		self.inner
			.borrow_mut()
			.listeners
			.remove(event)
			.map_or(0, |listeners| listeners.len())
	}

	/// Remove every listener of every event.
	pub fn clear(&self) {
		self.inner.borrow_mut().listeners.clear();
	}

	/// Number of listeners currently subscribed to `event`.
	pub fn listener_count(&self, event: &EventName) -> usize {
		self.inner
			.borrow()
			.listeners
			.get(event)
			.map_or(0, |listeners| listeners.len())
	}

	/// Whether `event` has at least one listener.
	pub fn has_listeners(&self, event: &EventName) -> bool {
		self.listener_count(event) > 0
	}

	/// Copy the listener list for delivery and drop `once` listeners from the table.
	fn snapshot(&self, event: &EventName) -> Vec<ListenerInfo<T, E>> {
		let mut inner = self.inner.borrow_mut();
		let Some(listeners) = inner.listeners.get_mut(event) else {
			return Vec::new();
		};
		let snapshot = listeners.clone();
		listeners.retain(|l| !l.once);
		snapshot
	}

	/// Deliver `payload` to every listener of `event` in subscription order.
	///
	/// Delivery stops at the first handler error, which is returned. Listeners
	/// added while delivering do not receive the current event.
	pub fn trigger(&self, event: &EventName, payload: &T) -> Result<(), E> {
		let listeners = self.snapshot(event);
		tracing::debug!(
			dispatcher = %self.name,
			event = %event,
			listeners = listeners.len(),
			"trigger"
		);

		for listener in listeners {
			(listener.handler)(payload)?;
		}
		Ok(())
	}

	/// Deliver `payload` to every listener of `event`, collecting each result.
	pub fn trigger_robust(&self, event: &EventName, payload: &T) -> Vec<Result<(), E>> {
		let listeners = self.snapshot(event);
		tracing::debug!(
			dispatcher = %self.name,
			event = %event,
			listeners = listeners.len(),
			"trigger_robust"
		);

		listeners
			.into_iter()
			.map(|listener| (listener.handler)(payload))
			.collect()
	}
}

impl<T: 'static, E: 'static> Default for Dispatcher<T, E> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: 'static, E: 'static> Clone for Dispatcher<T, E> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
			name: Rc::clone(&self.name),
		}
	}
}

impl<T: 'static, E: 'static> fmt::Debug for Dispatcher<T, E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let events = self.inner.borrow().listeners.len();
		f.debug_struct("Dispatcher")
			.field("name", &self.name)
			.field("event_count", &events)
			.finish()
	}
}

/// Non-owning handle to a [`Dispatcher`].
pub struct WeakDispatcher<T: 'static, E: 'static = SignalError> {
	inner: Weak<RefCell<DispatcherInner<T, E>>>,
	name: Rc<str>,
}

impl<T: 'static, E: 'static> WeakDispatcher<T, E> {
	/// Recover the dispatcher if any strong handle is still alive.
	pub fn upgrade(&self) -> Option<Dispatcher<T, E>> {
		self.inner.upgrade().map(|inner| Dispatcher {
			inner,
			name: Rc::clone(&self.name),
		})
	}
}

impl<T: 'static, E: 'static> Clone for WeakDispatcher<T, E> {
	fn clone(&self) -> Self {
		Self {
			inner: Weak::clone(&self.inner),
			name: Rc::clone(&self.name),
		}
	}
}
