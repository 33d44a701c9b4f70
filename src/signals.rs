//! Route event dispatch.
//!
//! This module provides the synchronous publish/subscribe bus that carries
//! `route:<name>` and `route-to:<name>` events.
//!
//! # Examples
//!
//! ```rust
//! use shasta::signals::{Dispatcher, EventName};
//!
//! let bus: Dispatcher<u32> = Dispatcher::new();
//! bus.on(EventName::route("home"), |_| Ok(()));
//! assert_eq!(bus.listener_count(&EventName::route("home")), 1);
//! ```

pub use shasta_signals::*;
