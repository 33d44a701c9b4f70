//! Dispatcher Integration Tests
//!
//! ## Integration Points
//!
//! - **signals**: the dispatcher as the bus shared by table and manager
//! - **urls**: route listeners installed by the table
//!
//! ## Purpose
//!
//! Verify delivery order and the listener bookkeeping the route table relies
//! on when routes are registered and replaced.

use rstest::*;
use shasta_signals::{Dispatcher, EventName, SignalError};
use shasta_urls::{DuplicateRoutePolicy, ParamValue, RouteEvent, RouteTable, RouterError};
use std::cell::RefCell;
use std::rc::Rc;

/// Test: subscribers on one bus see events in subscription order
#[rstest]
fn test_delivery_order_across_subscribers() {
	// Arrange
	let bus: Dispatcher<&'static str> = Dispatcher::named("order");
	let seen = Rc::new(RefCell::new(Vec::new()));
	for label in ["first", "second", "third"] {
		let sink = Rc::clone(&seen);
		bus.on(EventName::route("home"), move |payload: &&'static str| {
			sink.borrow_mut().push(format!("{}:{}", label, payload));
			Ok(())
		});
	}

	// Act
	bus.trigger(&EventName::route("home"), &"go").unwrap();

	// Assert
	assert_eq!(*seen.borrow(), vec!["first:go", "second:go", "third:go"]);
}

/// Test: event names are case sensitive
#[rstest]
fn test_event_names_are_case_sensitive() {
	// Arrange
	let bus: Dispatcher<()> = Dispatcher::new();
	bus.on(EventName::route("Home"), |_| Err(SignalError::handler("route:Home", "boom")));

	// Act
	let result = bus.trigger(&EventName::route("home"), &());

	// Assert
	assert!(result.is_ok());
}

/// Test: the table installs one `route:` and one `route-to:` listener per route
#[rstest]
fn test_table_registers_listener_pair() {
	// Arrange
	let table: RouteTable = RouteTable::new();

	// Act
	table.add_url("a/:id", "a", |_: &[ParamValue]| Ok(())).unwrap();

	// Assert
	let bus = table.dispatcher();
	assert_eq!(bus.listener_count(&EventName::route("a")), 1);
	assert_eq!(bus.listener_count(&EventName::route_to("a")), 1);
}

/// Test: replacing a route swaps its listeners instead of adding more
#[rstest]
fn test_replaced_route_keeps_one_listener_pair() {
	// Arrange
	let table: RouteTable =
		RouteTable::new().with_duplicate_policy(DuplicateRoutePolicy::Replace);
	let hits = Rc::new(RefCell::new(Vec::new()));
	for label in ["old", "new"] {
		let sink = Rc::clone(&hits);
		table
			.add_url("a", "a", move |_: &[ParamValue]| {
				sink.borrow_mut().push(label);
				Ok::<(), RouterError>(())
			})
			.unwrap();
	}

	// Act
	table
		.dispatcher()
		.trigger(&EventName::route("a"), &RouteEvent::Route(Vec::new()))
		.unwrap();

	// Assert
	assert_eq!(table.dispatcher().listener_count(&EventName::route("a")), 1);
	assert_eq!(table.dispatcher().listener_count(&EventName::route_to("a")), 1);
	assert_eq!(*hits.borrow(), vec!["new"]);
}

/// Test: a failing subscriber surfaces to the triggering caller
#[rstest]
fn test_handler_error_reaches_caller() {
	// Arrange
	let table: RouteTable = RouteTable::new();
	table
		.add_url("a", "a", |_: &[ParamValue]| Err(RouterError::NotFound("a".to_string())))
		.unwrap();

	// Act
	let result = table.load_url("a");

	// Assert
	assert_eq!(result, Err(RouterError::NotFound("a".to_string())));
}
