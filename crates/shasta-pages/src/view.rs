//! View contract
//!
//! A [`View`] is anything that can render itself for a route and hand back a
//! root [`Element`]. The assembler drives it through a fixed lifecycle:
//!
//! 1. `responds_to(method)` is checked before anything else happens.
//! 2. `render(method, params, ctx)` runs with the route values.
//! 3. On [`Rendered::Ready`] the element is injected and `delegate_events` is
//!    called. On [`Rendered::Deferred`] injection waits for
//!    [`RenderSignal::complete`].
//! 4. When another view replaces it, `teardown` then `remove` are called.

use crate::dom::Element;
use crate::error::{PagesError, ViewError};
use shasta_signals::{EventName, OneShot, SignalError, WeakDispatcher};
use shasta_urls::{NavigateOptions, ParamValue, ParameterMap, RouteDispatcher, RouteEvent};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Outcome of a render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendered {
	/// The element is ready to inject.
	Ready,
	/// The view will call [`RenderSignal::complete`] when it is ready.
	Deferred,
}

/// A renderable view.
pub trait View: 'static {
	/// Diagnostic name used in errors and logs.
	fn name(&self) -> &str {
		"view"
	}

	/// Whether `method` is a render method of this view.
	fn responds_to(&self, method: &str) -> bool;

	/// Render with the route's positional values.
	fn render(
		&mut self,
		method: &str,
		params: &[ParamValue],
		ctx: &ViewContext,
	) -> Result<Rendered, ViewError>;

	/// The root element to inject.
	fn element(&self) -> Element;

	/// Rebind interactive handlers after the element was injected.
	fn delegate_events(&mut self) {}

	/// Called before the view is removed from its region.
	fn teardown(&mut self) {}

	/// Release whatever the view holds.
	fn remove(&mut self) {}
}

/// Completion handle for a deferred render.
///
/// The assembler arms it before calling `render`; the view completes it once,
/// after `render` has returned. Completing inside `render` fails with
/// [`PagesError::ViewBusy`] because the view is still borrowed.
#[derive(Clone)]
pub struct RenderSignal {
	inner: OneShot<String, Result<(), PagesError>>,
}

impl RenderSignal {
	pub fn new(route: &str) -> Self {
		Self {
			inner: OneShot::new(format!("render:{}", route)),
		}
	}

	pub(crate) fn arm<F>(&self, continuation: F)
	where
		F: FnOnce(String) -> Result<(), PagesError> + 'static,
	{
		self.inner.arm(continuation);
	}

	/// Report that the view is ready, naming the method to render with.
	///
	/// An empty method falls back to the one the route was assembled with.
	pub fn complete(&self, method: &str) -> Result<(), PagesError> {
		match self.inner.fulfill(method.to_string()) {
			Ok(Some(result)) => result,
			Ok(None) => Ok(()),
			Err(SignalError::AlreadyResolved(_)) => Err(PagesError::RenderAlreadyCompleted),
			Err(err) => Err(err.into()),
		}
	}

	pub fn is_completed(&self) -> bool {
		self.inner.is_resolved()
	}
}

impl fmt::Debug for RenderSignal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RenderSignal")
			.field("name", &self.inner.name())
			.field("completed", &self.is_completed())
			.finish()
	}
}

struct PendingRedirect {
	route: String,
	params: ParameterMap,
	options: NavigateOptions,
}

/// What a view sees while it renders.
///
/// Redirects requested while the view is rendering are queued and sent once
/// the view has been shown, so the redirect target always replaces it.
#[derive(Clone)]
pub struct ViewContext {
	route: Rc<str>,
	region: Rc<str>,
	bus: WeakDispatcher<RouteEvent, PagesError>,
	render_signal: RenderSignal,
	held: Rc<RefCell<Option<Vec<PendingRedirect>>>>,
}

impl ViewContext {
	pub fn new(
		route: &str,
		region: &str,
		bus: WeakDispatcher<RouteEvent, PagesError>,
		render_signal: RenderSignal,
	) -> Self {
		Self {
			route: route.into(),
			region: region.into(),
			bus,
			render_signal,
			held: Rc::default(),
		}
	}

	/// Name of the route being shown.
	pub fn route(&self) -> &str {
		&self.route
	}

	/// Name of the region the view is shown in.
	pub fn region(&self) -> &str {
		&self.region
	}

	/// The route bus, while the manager that owns it is alive.
	pub fn dispatcher(&self) -> Option<RouteDispatcher<PagesError>> {
		self.bus.upgrade()
	}

	pub fn render_signal(&self) -> &RenderSignal {
		&self.render_signal
	}

	/// Same route, region and bus with a different render signal.
	pub(crate) fn with_render_signal(&self, render_signal: RenderSignal) -> Self {
		Self {
			render_signal,
			..self.clone()
		}
	}

	/// Ask for navigation to another named route.
	pub fn redirect(&self, name: &str, params: ParameterMap) -> Result<(), PagesError> {
		self.redirect_with(name, params, NavigateOptions::default())
	}

	/// [`ViewContext::redirect`] with explicit navigation options.
	pub fn redirect_with(
		&self,
		name: &str,
		params: ParameterMap,
		options: NavigateOptions,
	) -> Result<(), PagesError> {
		if let Some(queue) = self.held.borrow_mut().as_mut() {
			tracing::debug!(from = %self.route, route = %name, "redirect queued until the view is shown");
			queue.push(PendingRedirect {
				route: name.to_string(),
				params,
				options,
			});
			return Ok(());
		}
		self.send_redirect(name, params, options)
	}

	fn send_redirect(
		&self,
		name: &str,
		params: ParameterMap,
		options: NavigateOptions,
	) -> Result<(), PagesError> {
		let Some(bus) = self.bus.upgrade() else {
			tracing::warn!(route = %name, "redirect after the route bus was dropped");
			return Ok(());
		};
		tracing::debug!(from = %self.route, route = %name, "redirect");
		bus.trigger(
			&EventName::route_to(name),
			&RouteEvent::RouteTo { params, options },
		)
	}

	/// Queue redirects instead of sending them.
	pub(crate) fn hold_redirects(&self) {
		self.held.borrow_mut().get_or_insert_with(Vec::new);
	}

	/// Stop queueing and send whatever was queued, in order.
	pub(crate) fn release_redirects(&self) -> Result<(), PagesError> {
		let queued = self.held.borrow_mut().take().unwrap_or_default();
		for redirect in queued {
			self.send_redirect(&redirect.route, redirect.params, redirect.options)?;
		}
		Ok(())
	}

	/// Stop queueing and drop whatever was queued.
	pub(crate) fn discard_redirects(&self) {
		let dropped = self.held.borrow_mut().take().map_or(0, |queued| queued.len());
		if dropped > 0 {
			tracing::debug!(route = %self.route, dropped, "queued redirects dropped");
		}
	}
}

impl fmt::Debug for ViewContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ViewContext")
			.field("route", &self.route)
			.field("region", &self.region)
			.field("render_signal", &self.render_signal)
			.finish_non_exhaustive()
	}
}
