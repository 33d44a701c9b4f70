//! Route Table Integration Tests
//!
//! ## Integration Points
//!
//! - **signals**: `route:` and `route-to:` events on one dispatcher
//! - **urls**: template compilation, reverse lookup and history
//!
//! ## Purpose
//!
//! Verify that a `route-to` intent turns into exactly one `route` dispatch
//! carrying the values in template order, and that reverse lookup builds the
//! URLs route templates describe.

use rstest::*;
use shasta_signals::EventName;
use shasta_urls::{
	MemoryHistory, NavigateOptions, ParamValue, ParameterMap, RouteEvent, RouteTable,
	RouterError, StartOptions, reverse_lookup, reverse_lookup_strict,
};
use std::cell::RefCell;
use std::rc::Rc;

type Calls = Rc<RefCell<Vec<Vec<ParamValue>>>>;

/// Fixture: a started table with no routes and a silent start
#[fixture]
fn table() -> RouteTable {
	let table = RouteTable::new();
	table
		.start(&StartOptions {
			silent: true,
			..StartOptions::default()
		})
		.unwrap();
	table
}

fn recorder(calls: &Calls) -> impl Fn(&[ParamValue]) -> Result<(), RouterError> + 'static {
	let calls = Rc::clone(calls);
	move |values: &[ParamValue]| {
		calls.borrow_mut().push(values.to_vec());
		Ok(())
	}
}

#[rstest]
fn test_route_with_no_parameters(table: RouteTable) {
	// Arrange
	let calls: Calls = Rc::default();
	table.add_url("some-path", "foo", recorder(&calls)).unwrap();

	// Act
	table
		.dispatcher()
		.trigger(&EventName::route("foo"), &RouteEvent::Route(Vec::new()))
		.unwrap();

	// Assert
	assert_eq!(*calls.borrow(), vec![Vec::<ParamValue>::new()]);
}

#[rstest]
fn test_route_to_with_one_parameter(table: RouteTable) {
	// Arrange
	let calls: Calls = Rc::default();
	let subscriber: Calls = Rc::default();
	let sink = Rc::clone(&subscriber);
	table.dispatcher().on(EventName::route("foo"), move |event: &RouteEvent| {
		sink.borrow_mut().push(event.values().unwrap_or_default().to_vec());
		Ok(())
	});
	table.add_url("some-path/:name", "foo", recorder(&calls)).unwrap();

	// Act
	table
		.route_to(
			"foo",
			ParameterMap::new().with("name", "leland"),
			NavigateOptions::default(),
		)
		.unwrap();

	// Assert
	assert_eq!(*subscriber.borrow(), vec![vec![ParamValue::from("leland")]]);
	assert_eq!(*calls.borrow(), vec![vec![ParamValue::from("leland")]]);
	assert_eq!(table.fragment(), "some-path/leland");
}

#[rstest]
fn test_route_to_with_two_parameters_uses_template_order(table: RouteTable) {
	// Arrange
	let calls: Calls = Rc::default();
	table
		.add_url("animal/:name/color/:color", "elliott", recorder(&calls))
		.unwrap();

	// Act
	table
		.route_to(
			"elliott",
			ParameterMap::new().with("color", "brown-cow").with("name", "leland"),
			NavigateOptions::default(),
		)
		.unwrap();

	// Assert
	assert_eq!(
		*calls.borrow(),
		vec![vec![ParamValue::from("leland"), ParamValue::from("brown-cow")]]
	);
}

#[rstest]
#[case(NavigateOptions::default())]
#[case(NavigateOptions::trigger())]
#[case(NavigateOptions::trigger().with_replace(true))]
fn test_route_to_dispatches_exactly_once(table: RouteTable, #[case] options: NavigateOptions) {
	// Arrange
	let calls: Calls = Rc::default();
	table.add_url("item/:id", "item", recorder(&calls)).unwrap();

	// Act
	table
		.route_to("item", ParameterMap::new().with("id", 7), options)
		.unwrap();

	// Assert
	assert_eq!(calls.borrow().len(), 1);
	assert_eq!(table.fragment(), "item/7");
}

#[rstest]
fn test_url_match_dispatches_decoded_values(table: RouteTable) {
	// Arrange
	let calls: Calls = Rc::default();
	table.add_url("search/:term(/p:page)", "search", recorder(&calls)).unwrap();

	// Act
	let matched = table
		.navigate("search/big%20cats/p2", NavigateOptions::trigger())
		.unwrap();

	// Assert
	assert!(matched);
	assert_eq!(
		*calls.borrow(),
		vec![vec![ParamValue::from("big cats"), ParamValue::from("2")]]
	);
}

#[rstest]
fn test_initial_fragment_is_loaded_on_start() {
	// Arrange
	let calls: Calls = Rc::default();
	let table: RouteTable = RouteTable::new().with_history(MemoryHistory::with_initial("#about"));
	table.add_url("about", "about", recorder(&calls)).unwrap();

	// Act
	let matched = table.start(&StartOptions::default()).unwrap();

	// Assert
	assert!(matched);
	assert_eq!(calls.borrow().len(), 1);
}

#[rstest]
fn test_back_and_forward_reload_routes(table: RouteTable) {
	// Arrange
	let calls: Calls = Rc::default();
	table.add_url("page/:n", "page", recorder(&calls)).unwrap();
	for n in 1..=2 {
		table
			.route_to("page", ParameterMap::new().with("n", n), NavigateOptions::default())
			.unwrap();
	}

	// Act
	let went_back = table.back().unwrap();

	// Assert
	assert!(went_back);
	assert_eq!(table.fragment(), "page/1");
	assert_eq!(calls.borrow().last().unwrap(), &vec![ParamValue::from("1")]);
	assert!(table.forward().unwrap());
	assert_eq!(table.fragment(), "page/2");
}

#[rstest]
fn test_newest_route_matches_first(table: RouteTable) {
	// Arrange
	let calls: Calls = Rc::default();
	table.add_url("docs/*path", "docs", recorder(&calls)).unwrap();
	table.add_url("docs/index", "index", recorder(&calls)).unwrap();

	// Act
	let resolved = table.resolve("docs/index");

	// Assert
	assert_eq!(resolved.map(|(name, _)| name).as_deref(), Some("index"));
}

#[rstest]
fn test_route_to_unknown_route_is_an_error(table: RouteTable) {
	let result = table.route_to("missing", ParameterMap::new(), NavigateOptions::default());
	assert_eq!(result, Err(RouterError::UnknownRoute("missing".to_string())));
}

#[rstest]
#[case("some-path", ParameterMap::new(), "some-path")]
#[case("some-path/:id", ParameterMap::new().with("id", 12345), "some-path/12345")]
#[case(
	"some-path/:id/name/:name",
	ParameterMap::new().with("id", 12345).with("name", "leland"),
	"some-path/12345/name/leland"
)]
#[case(
	"some-path/:id(/:name)",
	ParameterMap::new().with("id", 12345).with("name", "leland"),
	"some-path/12345/leland"
)]
#[case("some-path/:id(/:name)", ParameterMap::new().with("id", 12345), "some-path/12345")]
#[case("some-path/:id(/:name)", ParameterMap::new().with("id", ParamValue::Null), "some-path/")]
fn test_reverse_lookup(#[case] template: &str, #[case] params: ParameterMap, #[case] expected: &str) {
	assert_eq!(reverse_lookup(template, &params), expected);
}

#[rstest]
fn test_strict_reverse_lookup_reports_missing_parameter() {
	// Arrange
	let params = ParameterMap::new().with("id", ParamValue::Null);

	// Act
	let result = reverse_lookup_strict("some-path/:id(/:name)", &params);

	// Assert
	assert_eq!(
		result,
		Err(RouterError::MissingParameter {
			template: "some-path/:id(/:name)".to_string(),
			param: "id".to_string(),
		})
	);
}

#[rstest]
fn test_reverse_by_name_round_trips_through_matching(table: RouteTable) {
	// Arrange
	let calls: Calls = Rc::default();
	table.add_url("some-path/:id(/:name)", "item", recorder(&calls)).unwrap();
	let params = ParameterMap::new().with("id", 1).with("name", "leland");

	// Act
	let url = table.reverse("item", &params).unwrap();
	let resolved = table.resolve(&url);

	// Assert
	assert_eq!(url, "some-path/1/leland");
	assert_eq!(
		resolved,
		Some((
			"item".to_string(),
			vec![ParamValue::from("1"), ParamValue::from("leland")]
		))
	);
}

/// Test: the facade re-exports the same table and lookup helpers
#[rstest]
fn test_facade_reexports_route_table() {
	// Arrange
	let table: shasta::RouteTable = shasta::RouteTable::new();
	table
		.add_url("animal/:name", "animal", |_: &[shasta::ParamValue]| Ok(()))
		.unwrap();
	let params = shasta::ParameterMap::new().with("name", "leland");

	// Act
	let url = table.reverse("animal", &params).unwrap();

	// Assert
	assert_eq!(url, shasta::urls::reverse_lookup("animal/:name", &params));
	assert_eq!(url, "animal/leland");
}
