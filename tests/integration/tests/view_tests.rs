//! View Contract Integration Tests
//!
//! ## Integration Points
//!
//! - **pages**: `ViewContext::redirect` from inside a rendered view
//! - **signals**: `route-to:` delivery on the manager's bus
//!
//! ## Purpose
//!
//! Verify that a view can ask for navigation through its context, and that
//! a redirect issued while rendering lands on the target route.

use rstest::*;
use shasta_integration_tests::{Journal, TemplateView};
use shasta_pages::{
	Element, MemoryDocument, NavigationManager, PagesError, ParamValue, ParameterMap,
	Rendered, RenderSignal, StartOptions, View, ViewContext, ViewError, ViewFactory,
	ViewOptions,
};
use shasta_signals::{Dispatcher, EventName};
use shasta_urls::{NavigateOptions, RouteDispatcher, RouteEvent};
use std::cell::RefCell;
use std::rc::Rc;

/// A view that redirects to `target` as soon as it renders.
struct Redirecting {
	target: String,
	journal: Journal,
}

impl View for Redirecting {
	fn name(&self) -> &str {
		"Redirecting"
	}

	fn responds_to(&self, method: &str) -> bool {
		method == "render"
	}

	fn render(
		&mut self,
		_: &str,
		_: &[ParamValue],
		ctx: &ViewContext,
	) -> Result<Rendered, ViewError> {
		ctx.redirect(&self.target, ParameterMap::new().with("name", "fiona"))
			.map_err(|err| ViewError::Render(err.to_string()))?;
		Ok(Rendered::Ready)
	}

	fn element(&self) -> Element {
		Element::new("p").with_inner_html("redirecting")
	}

	fn delegate_events(&mut self) {
		self.journal.record("gate.delegate_events");
	}

	fn teardown(&mut self) {
		self.journal.record("gate.teardown");
	}

	fn remove(&mut self) {
		self.journal.record("gate.remove");
	}
}

#[fixture]
fn bus() -> RouteDispatcher<PagesError> {
	Dispatcher::named("views")
}

/// Test: redirect notifies `route-to:` subscribers exactly once
#[rstest]
fn test_redirect_notifies_subscribers(bus: RouteDispatcher<PagesError>) {
	// Arrange
	let received = Rc::new(RefCell::new(Vec::new()));
	let sink = Rc::clone(&received);
	bus.on(EventName::route_to("foo"), move |event: &RouteEvent| {
		sink.borrow_mut().push(event.clone());
		Ok(())
	});
	let ctx = ViewContext::new("bar", "content", bus.downgrade(), RenderSignal::new("bar"));

	// Act
	ctx.redirect("foo", ParameterMap::new().with("name", "fiona"))
		.unwrap();

	// Assert
	assert_eq!(
		*received.borrow(),
		vec![RouteEvent::RouteTo {
			params: ParameterMap::new().with("name", "fiona"),
			options: NavigateOptions::default(),
		}]
	);
}

/// Test: redirect options pass through untouched
#[rstest]
fn test_redirect_with_options(bus: RouteDispatcher<PagesError>) {
	// Arrange
	let received = Rc::new(RefCell::new(None));
	let sink = Rc::clone(&received);
	bus.on(EventName::route_to("foo"), move |event: &RouteEvent| {
		if let RouteEvent::RouteTo { options, .. } = event {
			*sink.borrow_mut() = Some(*options);
		}
		Ok(())
	});
	let ctx = ViewContext::new("bar", "content", bus.downgrade(), RenderSignal::new("bar"));

	// Act
	ctx.redirect_with("foo", ParameterMap::new(), NavigateOptions::replace())
		.unwrap();

	// Assert
	assert_eq!(*received.borrow(), Some(NavigateOptions::replace()));
}

/// Test: a view redirecting during render is replaced by the target view
///
/// Verification:
/// - The redirect is sent after the redirecting view is shown
/// - The redirecting view is torn down before the target renders
/// - The target view is what the region finally shows
#[rstest]
fn test_redirect_during_render_shows_target_view() {
	// Arrange
	let document = Rc::new(MemoryDocument::new().with_outlet("#content"));
	let journal = Journal::new();
	let manager = NavigationManager::new(Rc::clone(&document));
	manager.add_region("content", "#content");
	let gate_journal = journal.clone();
	manager
		.add_url(
			"gate",
			"gate",
			ViewFactory::factory(move |_, _| {
				Ok(Redirecting {
					target: "profile".to_string(),
					journal: gate_journal.clone(),
				})
			}),
			ViewOptions::new().region("content"),
		)
		.unwrap();
	manager
		.add_url(
			"profile",
			"profile/:name",
			TemplateView::factory("profile", Element::new("div").with_id("profile"), &journal),
			ViewOptions::new().region("content"),
		)
		.unwrap();
	manager
		.run_with(&StartOptions {
			silent: true,
			..StartOptions::default()
		})
		.unwrap();

	// Act
	manager.navigate("gate", ParameterMap::new()).unwrap();

	// Assert
	assert_eq!(
		journal.entries(),
		vec![
			"gate.delegate_events",
			"gate.teardown",
			"gate.remove",
			"profile.render",
			"profile.delegate_events",
		]
	);
	assert_eq!(journal.params(), vec![vec![ParamValue::from("fiona")]]);
	assert_eq!(manager.current_view("content").unwrap().name(), "profile");
	assert_eq!(
		document.html("#content").as_deref(),
		Some(r#"<div id="profile"></div>"#)
	);
	assert_eq!(manager.routes().fragment(), "profile/fiona");
}
