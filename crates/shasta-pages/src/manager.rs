//! Navigation manager
//!
//! The top-level object an application talks to. It owns the route table,
//! the region registry and one [`ViewAssembler`] per view route, and keeps
//! track of which view is showing in which region.

use crate::assembler::{AssembledView, ViewAssembler, ViewFactory, ViewOptions};
use crate::dom::Document;
use crate::error::PagesError;
use crate::region::{Region, RegionRegistry, RegionTarget};
use crate::view::{RenderSignal, ViewContext};
use shasta_conf::{DuplicateRoutes, HistorySettings, Settings};
use shasta_signals::WeakDispatcher;
use shasta_urls::{
	DuplicateRoutePolicy, NavigateOptions, ParamValue, ParameterMap, RouteDispatcher,
	RouteEvent, RouteTable, RouterError, StartOptions,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

#[derive(Default)]
struct ManagerState {
	regions: RegionRegistry,
	assemblers: HashMap<String, Rc<ViewAssembler>>,
	current_views: HashMap<String, AssembledView>,
}

/// Routes URLs to views shown in named regions.
///
/// # Examples
///
/// ```
/// use shasta_pages::{
///     Element, MemoryDocument, NavigationManager, ParamValue, Rendered, View, ViewContext,
///     ViewError, ViewFactory, ViewOptions,
/// };
/// use std::rc::Rc;
///
/// struct Hello;
///
/// impl View for Hello {
///     fn responds_to(&self, method: &str) -> bool {
///         method == "render"
///     }
///
///     fn render(&mut self, _: &str, _: &[ParamValue], _: &ViewContext) -> Result<Rendered, ViewError> {
///         Ok(Rendered::Ready)
///     }
///
///     fn element(&self) -> Element {
///         Element::new("h1").with_inner_html("Hello")
///     }
/// }
///
/// let document = Rc::new(MemoryDocument::new().with_outlet("#content"));
/// let manager = NavigationManager::new(Rc::clone(&document));
///
/// manager
///     .add_url("home", "", ViewFactory::factory(|_, _| Ok(Hello)), ViewOptions::new().region("content"))
///     .unwrap();
/// manager.add_region("content", "#content");
/// manager.run().unwrap();
///
/// assert_eq!(document.html("#content").as_deref(), Some("<h1>Hello</h1>"));
/// ```
pub struct NavigationManager {
	table: RouteTable<PagesError>,
	state: Rc<RefCell<ManagerState>>,
	document: Rc<dyn Document>,
	settings: Rc<Settings>,
}

impl NavigationManager {
	/// Create a manager with default settings.
	pub fn new(document: impl Document + 'static) -> Self {
		Self::with_settings(document, Settings::default())
	}

	/// Create a manager configured by `settings`.
	pub fn with_settings(document: impl Document + 'static, settings: Settings) -> Self {
		let policy = match settings.pages.duplicate_routes {
			DuplicateRoutes::Reject => DuplicateRoutePolicy::Reject,
			DuplicateRoutes::Replace => DuplicateRoutePolicy::Replace,
		};
		let table = RouteTable::new().with_duplicate_policy(policy);
		Self::with_router(document, settings, table)
	}

	/// Create a manager over an existing route table.
	///
	/// The table keeps its own duplicate policy and history.
	pub fn with_router(
		document: impl Document + 'static,
		settings: Settings,
		table: RouteTable<PagesError>,
	) -> Self {
		Self {
			table,
			state: Rc::new(RefCell::new(ManagerState::default())),
			document: Rc::new(document),
			settings: Rc::new(settings),
		}
	}

	/// Register a region, replacing any earlier target for the same name.
	pub fn add_region(&self, name: &str, target: impl Into<RegionTarget>) -> &Self {
		self.state.borrow_mut().regions.add_region(name, target);
		self
	}

	/// Look up a region, creating a placeholder when it does not exist yet.
	pub fn region(&self, name: &str) -> Region {
		self.state.borrow_mut().regions.get_region(name).clone()
	}

	/// Bind a route to a view.
	///
	/// The region named in `options`, or the configured default region, need
	/// not exist yet. It is resolved when the route is first dispatched.
	pub fn add_url(
		&self,
		name: &str,
		template: &str,
		factory: ViewFactory,
		options: ViewOptions,
	) -> Result<(), PagesError> {
		let assembler = Rc::new(ViewAssembler::new(
			name,
			factory,
			options,
			&self.settings.pages.render_method,
		));

		let callback = {
			let state = Rc::clone(&self.state);
			let document = Rc::clone(&self.document);
			let settings = Rc::clone(&self.settings);
			let bus = self.table.dispatcher().downgrade();
			let route = name.to_string();
			move |values: &[ParamValue]| dispatch(&state, &document, &settings, &bus, &route, values)
		};
		self.table.add_url(template, name, callback)?;

		let mut state = self.state.borrow_mut();
		if let Some(region) = assembler
			.region_name()
			.or(self.settings.pages.default_region.as_deref())
		{
			state.regions.get_region(region);
		}
		state.assemblers.insert(name.to_string(), assembler);
		Ok(())
	}

	/// Bind a route to a plain callback with no view.
	pub fn add_route<F>(&self, name: &str, template: &str, callback: F) -> Result<(), PagesError>
	where
		F: Fn(&[ParamValue]) -> Result<(), PagesError> + 'static,
	{
		self.table.add_url(template, name, callback)?;
		self.state.borrow_mut().assemblers.remove(name);
		Ok(())
	}

	/// Start the history with the configured options.
	///
	/// Returns whether the initial URL matched a route.
	pub fn run(&self) -> Result<bool, PagesError> {
		self.run_with(&start_options(&self.settings.history))
	}

	/// Start the history with explicit options.
	///
	/// # Errors
	///
	/// Starting twice fails with [`RouterError::HistoryAlreadyStarted`].
	pub fn run_with(&self, options: &StartOptions) -> Result<bool, PagesError> {
		self.table.start(options)
	}

	/// Stop the history. Routes and views stay registered.
	pub fn stop(&self) {
		self.table.stop();
	}

	/// Navigate to a named route.
	pub fn navigate(&self, name: &str, params: ParameterMap) -> Result<(), PagesError> {
		self.navigate_with(name, params, NavigateOptions::default())
	}

	/// [`NavigationManager::navigate`] with explicit navigation options.
	pub fn navigate_with(
		&self,
		name: &str,
		params: ParameterMap,
		options: NavigateOptions,
	) -> Result<(), PagesError> {
		self.table.route_to(name, params, options)
	}

	/// Dispatch whatever route matches `fragment`.
	pub fn load_url(&self, fragment: &str) -> Result<bool, PagesError> {
		self.table.load_url(fragment)
	}

	/// The view showing in `region`.
	pub fn current_view(&self, region: &str) -> Option<AssembledView> {
		self.state.borrow().current_views.get(region).cloned()
	}

	/// Bus carrying `route:` and `route-to:` events.
	pub fn dispatcher(&self) -> &RouteDispatcher<PagesError> {
		self.table.dispatcher()
	}

	/// The underlying route table.
	pub fn routes(&self) -> &RouteTable<PagesError> {
		&self.table
	}

	/// Settings this manager was built with.
	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	/// Document regions resolve against.
	pub fn document(&self) -> Rc<dyn Document> {
		Rc::clone(&self.document)
	}
}

impl fmt::Debug for NavigationManager {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.state.borrow();
		f.debug_struct("NavigationManager")
			.field("routes", &self.table.route_names())
			.field("regions", &state.regions.names().collect::<Vec<_>>())
			.field("current_views", &state.current_views.len())
			.finish_non_exhaustive()
	}
}

fn start_options(history: &HistorySettings) -> StartOptions {
	StartOptions {
		root: history.root.clone(),
		push_state: history.push_state,
		hash_change: history.hash_change,
		silent: history.silent,
	}
}

/// Show the view of `route` in its region.
///
/// No borrow of the manager state is held while views run. Redirects a view
/// asks for while rendering are sent after it is bound to the region, so the
/// redirect target replaces it through the usual teardown.
fn dispatch(
	state: &RefCell<ManagerState>,
	document: &Rc<dyn Document>,
	settings: &Settings,
	bus: &WeakDispatcher<RouteEvent, PagesError>,
	route: &str,
	values: &[ParamValue],
) -> Result<(), PagesError> {
	let (assembler, region) = {
		let state = state.borrow();
		let assembler = state
			.assemblers
			.get(route)
			.cloned()
			.ok_or_else(|| RouterError::UnknownRoute(route.to_string()))?;
		let region_name = assembler
			.region_name()
			.map(str::to_string)
			.or_else(|| settings.pages.default_region.clone())
			.ok_or_else(|| PagesError::UnknownRegion {
				route: route.to_string(),
				region: None,
			})?;
		let region = state
			.regions
			.get(&region_name)
			.cloned()
			.ok_or(PagesError::UnknownRegion {
				route: route.to_string(),
				region: Some(region_name),
			})?;
		(assembler, region)
	};

	let Some(outlet) = region.resolve(&**document) else {
		tracing::warn!(route = %route, region = %region.name(), "region target does not resolve");
		return Err(PagesError::UnresolvedRegion(region.name().to_string()));
	};

	let previous = state.borrow().current_views.get(region.name()).cloned();
	if let Some(previous) = previous {
		// Stays bound to the region until its teardown went through
		previous.teardown()?;
		state.borrow_mut().current_views.remove(region.name());
		outlet.borrow_mut().clear();
	}

	tracing::debug!(route = %route, region = %region.name(), values = values.len(), "dispatch");
	let ctx = ViewContext::new(route, region.name(), bus.clone(), RenderSignal::new(route));
	ctx.hold_redirects();
	let view = match assembler.create_view(values, &region, document, ctx.clone()) {
		Ok(view) => view,
		Err(err) => {
			ctx.discard_redirects();
			return Err(err);
		}
	};

	let displaced = state
		.borrow_mut()
		.current_views
		.insert(region.name().to_string(), view);
	if let Some(displaced) = displaced {
		tracing::debug!(route = %route, region = %region.name(), view = %displaced.name(), "displacing view");
		displaced.teardown()?;
	}
	ctx.release_redirects()
}
