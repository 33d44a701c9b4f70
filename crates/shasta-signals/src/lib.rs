//! # Shasta Signals
//!
//! Synchronous, ordered publish/subscribe dispatch for Shasta.
//!
//! Routing in Shasta is split into two event families that travel over a single
//! [`Dispatcher`]:
//!
//! - `route-to:<name>` announces an *intent* to navigate to a named route. It carries
//!   the parameter map and navigation options.
//! - `route:<name>` announces that the content for a route should be shown *now*. It
//!   carries the parameter values in the order the route template declares them.
//!
//! ## Lifecycle
//!
//! A dispatcher is an explicit value. Create one when the application starts, hand
//! clones of it to whoever needs to publish or subscribe, and drop it with the
//! application. Clones share the same listener table; there is no process-wide
//! instance.
//!
//! ## Delivery
//!
//! - Handlers fire in subscription order.
//! - [`Dispatcher::trigger`] runs every handler to completion before returning and
//!   stops at the first error.
//! - The listener list is snapshotted before delivery, so a handler may subscribe,
//!   unsubscribe, or trigger further events without deadlocking the dispatcher.
//!
//! ## Example
//!
//! ```
//! use shasta_signals::{Dispatcher, EventName};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let dispatcher: Dispatcher<Vec<String>> = Dispatcher::new();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//!
//! let sink = Rc::clone(&seen);
//! dispatcher.on(EventName::route("home"), move |values: &Vec<String>| {
//!     sink.borrow_mut().extend(values.iter().cloned());
//!     Ok(())
//! });
//!
//! dispatcher
//!     .trigger(&EventName::route("home"), &vec!["42".to_string()])
//!     .unwrap();
//! assert_eq!(*seen.borrow(), vec!["42".to_string()]);
//! ```

pub mod core;
pub mod dispatcher;
pub mod error;
pub mod oneshot;

pub use core::{EventName, ROUTE_PREFIX, ROUTE_TO_PREFIX};
pub use dispatcher::{Dispatcher, HandlerFn, ListenerId, WeakDispatcher};
pub use error::SignalError;
pub use oneshot::OneShot;
