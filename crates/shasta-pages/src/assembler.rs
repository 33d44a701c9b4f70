//! View assembly
//!
//! A [`ViewAssembler`] is bound to one route. On every dispatch it builds a
//! fresh view from its [`ViewFactory`], renders it with the route values and
//! injects the element into the route's region.

use crate::dom::{Document, Element};
use crate::error::{PagesError, ViewError};
use crate::region::Region;
use crate::view::{RenderSignal, Rendered, View, ViewContext};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shasta_urls::ParamValue;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Positional arguments handed to a view when it is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstructorArgs(Vec<Value>);

impl ConstructorArgs {
	pub fn new(args: Vec<Value>) -> Self {
		Self(args)
	}

	/// Deserialise argument `index`.
	///
	/// ```
	/// use serde_json::json;
	/// use shasta_pages::ConstructorArgs;
	///
	/// let args = ConstructorArgs::new(vec![json!("Bobby"), json!(3)]);
	/// assert_eq!(args.get::<String>(0).unwrap(), "Bobby");
	/// assert_eq!(args.get::<u32>(1).unwrap(), 3);
	/// assert!(args.get::<u32>(2).is_err());
	/// ```
	pub fn get<T: DeserializeOwned>(&self, index: usize) -> Result<T, ViewError> {
		let value = self.0.get(index).ok_or(ViewError::MissingArgument(index))?;
		serde_json::from_value(value.clone()).map_err(|err| ViewError::InvalidArgument {
			index,
			message: err.to_string(),
		})
	}

	pub fn raw(&self) -> &[Value] {
		&self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<Vec<Value>> for ConstructorArgs {
	fn from(args: Vec<Value>) -> Self {
		Self(args)
	}
}

/// A view type built from constructor arguments alone.
pub trait ConstructibleView: View + Sized {
	fn construct(args: &ConstructorArgs) -> Result<Self, ViewError>;
}

type FactoryFn = Rc<dyn Fn(&ConstructorArgs, &ViewContext) -> Result<Box<dyn View>, ViewError>>;
type ConstructFn = Rc<dyn Fn(&ConstructorArgs) -> Result<Box<dyn View>, ViewError>>;

/// How a route's view is instantiated.
#[derive(Clone)]
pub enum ViewFactory {
	/// A closure that builds the view. It also sees the render context.
	FactoryFunction(FactoryFn),
	/// A [`ConstructibleView`] type.
	Constructible {
		/// Type name, for diagnostics.
		name: &'static str,
		construct: ConstructFn,
	},
}

impl ViewFactory {
	/// Wrap a factory closure.
	pub fn factory<V, F>(factory: F) -> Self
	where
		V: View,
		F: Fn(&ConstructorArgs, &ViewContext) -> Result<V, ViewError> + 'static,
	{
		Self::FactoryFunction(Rc::new(move |args, ctx| {
			Ok(Box::new(factory(args, ctx)?) as Box<dyn View>)
		}))
	}

	/// Build views of type `V` with [`ConstructibleView::construct`].
	pub fn constructible<V: ConstructibleView>() -> Self {
		Self::Constructible {
			name: std::any::type_name::<V>(),
			construct: Rc::new(|args| Ok(Box::new(V::construct(args)?) as Box<dyn View>)),
		}
	}

	pub fn instantiate(
		&self,
		args: &ConstructorArgs,
		ctx: &ViewContext,
	) -> Result<Box<dyn View>, ViewError> {
		match self {
			Self::FactoryFunction(factory) => factory(args, ctx),
			Self::Constructible { construct, .. } => construct(args),
		}
	}

	pub fn describe(&self) -> &str {
		match self {
			Self::FactoryFunction(_) => "factory function",
			Self::Constructible { name, .. } => name,
		}
	}
}

impl fmt::Debug for ViewFactory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::FactoryFunction(_) => f.write_str("FactoryFunction(..)"),
			Self::Constructible { name, .. } => {
				f.debug_struct("Constructible").field("name", name).finish_non_exhaustive()
			}
		}
	}
}

/// Per-route view options.
///
/// ```
/// use serde_json::json;
/// use shasta_pages::ViewOptions;
///
/// let options = ViewOptions::new()
///     .region("content")
///     .method("show")
///     .arg(json!("Bobby"));
/// assert_eq!(options.region_name(), Some("content"));
/// assert_eq!(options.method_name(), Some("show"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewOptions {
	region: Option<String>,
	method: Option<String>,
	constructor_args: Vec<Value>,
}

impl ViewOptions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Region the view is shown in.
	pub fn region(mut self, region: impl Into<String>) -> Self {
		self.region = Some(region.into());
		self
	}

	/// Render method to call instead of the configured default.
	pub fn method(mut self, method: impl Into<String>) -> Self {
		self.method = Some(method.into());
		self
	}

	/// Append one constructor argument.
	pub fn arg(mut self, value: impl Into<Value>) -> Self {
		self.constructor_args.push(value.into());
		self
	}

	/// Replace every constructor argument.
	pub fn constructor_args(mut self, args: Vec<Value>) -> Self {
		self.constructor_args = args;
		self
	}

	pub fn region_name(&self) -> Option<&str> {
		self.region.as_deref()
	}

	pub fn method_name(&self) -> Option<&str> {
		self.method.as_deref()
	}
}

/// Builds, renders and injects the view of one route.
#[derive(Debug)]
pub struct ViewAssembler {
	route: String,
	factory: ViewFactory,
	method: String,
	region: Option<String>,
	args: ConstructorArgs,
}

impl ViewAssembler {
	/// `default_method` applies when `options` names no render method.
	pub fn new(
		route: impl Into<String>,
		factory: ViewFactory,
		options: ViewOptions,
		default_method: &str,
	) -> Self {
		Self {
			route: route.into(),
			factory,
			method: options.method.unwrap_or_else(|| default_method.to_string()),
			region: options.region,
			args: ConstructorArgs::new(options.constructor_args),
		}
	}

	pub fn route(&self) -> &str {
		&self.route
	}

	/// Render method this assembler calls.
	pub fn method(&self) -> &str {
		&self.method
	}

	/// Region named in the options, if any.
	pub fn region_name(&self) -> Option<&str> {
		self.region.as_deref()
	}

	pub fn factory(&self) -> &ViewFactory {
		&self.factory
	}

	/// Instantiate, render and inject a view for `params`.
	///
	/// # Errors
	///
	/// - [`PagesError::UnknownRenderMethod`] when the view does not respond to
	///   the render method. Nothing is injected.
	/// - [`PagesError::View`] when construction or rendering fails.
	/// - [`PagesError::UnresolvedRegion`] when the region has no outlet.
	pub fn create_view(
		self: &Rc<Self>,
		params: &[ParamValue],
		region: &Region,
		document: &Rc<dyn Document>,
		ctx: ViewContext,
	) -> Result<AssembledView, PagesError> {
		let instance = self.factory.instantiate(&self.args, &ctx)?;
		if !instance.responds_to(&self.method) {
			return Err(PagesError::UnknownRenderMethod {
				method: self.method.clone(),
				view: instance.name().to_string(),
			});
		}

		let name = instance.name().to_string();
		let view = Rc::new(RefCell::new(instance));
		let torn_down = Rc::new(Cell::new(false));
		self.arm_deferred(&view, &torn_down, &name, params, region, document, &ctx);

		let rendered = {
			let mut instance = view
				.try_borrow_mut()
				.map_err(|_| PagesError::ViewBusy(name.clone()))?;
			instance.render(&self.method, params, &ctx)?
		};

		match rendered {
			Rendered::Ready => inject(&view, &name, region, &**document)?,
			Rendered::Deferred => {
				tracing::debug!(route = %self.route, view = %name, "render deferred");
			}
		}

		Ok(AssembledView {
			view,
			assembler: Rc::downgrade(self),
			torn_down,
			name,
			route: self.route.clone(),
			region: region.name().to_string(),
		})
	}

	#[allow(clippy::too_many_arguments)]
	fn arm_deferred(
		&self,
		view: &Rc<RefCell<Box<dyn View>>>,
		torn_down: &Rc<Cell<bool>>,
		name: &str,
		params: &[ParamValue],
		region: &Region,
		document: &Rc<dyn Document>,
		ctx: &ViewContext,
	) {
		let view = Rc::downgrade(view);
		let torn_down = Rc::clone(torn_down);
		let name = name.to_string();
		let params = params.to_vec();
		let region = region.clone();
		let document = Rc::clone(document);
		let default_method = self.method.clone();
		let route = self.route.clone();
		// A fresh signal keeps the continuation from owning its own slot
		let rerender_ctx = ctx.with_render_signal(RenderSignal::new(&self.route));

		ctx.render_signal().arm(move |method| {
			let Some(view) = view.upgrade().filter(|_| !torn_down.get()) else {
				tracing::warn!(route = %route, view = %name, "render completed after teardown, skipping");
				return Ok(());
			};
			let method = if method.is_empty() { default_method } else { method };

			rerender_ctx.hold_redirects();
			match rerender(&view, &name, &method, &params, &region, &*document, &rerender_ctx) {
				Ok(()) => {
					tracing::debug!(route = %route, view = %name, method = %method, "deferred render completed");
					rerender_ctx.release_redirects()
				}
				Err(err) => {
					rerender_ctx.discard_redirects();
					Err(err)
				}
			}
		});
	}
}

/// Render `method` once more and inject the result.
fn rerender(
	view: &RefCell<Box<dyn View>>,
	name: &str,
	method: &str,
	params: &[ParamValue],
	region: &Region,
	document: &dyn Document,
	ctx: &ViewContext,
) -> Result<(), PagesError> {
	let rendered = {
		let mut instance = view
			.try_borrow_mut()
			.map_err(|_| PagesError::ViewBusy(name.to_string()))?;
		if !instance.responds_to(method) {
			return Err(PagesError::UnknownRenderMethod {
				method: method.to_string(),
				view: name.to_string(),
			});
		}
		instance.render(method, params, ctx)?
	};
	if rendered == Rendered::Deferred {
		return Err(PagesError::DeferredRenderIncomplete(name.to_string()));
	}
	inject(view, name, region, document)
}

fn inject(
	view: &RefCell<Box<dyn View>>,
	name: &str,
	region: &Region,
	document: &dyn Document,
) -> Result<(), PagesError> {
	let mut instance = view
		.try_borrow_mut()
		.map_err(|_| PagesError::ViewBusy(name.to_string()))?;
	if !region.inject(document, &instance.element()) {
		return Err(PagesError::UnresolvedRegion(region.name().to_string()));
	}
	instance.delegate_events();
	Ok(())
}

/// A live view together with the assembler that built it.
#[derive(Clone)]
pub struct AssembledView {
	view: Rc<RefCell<Box<dyn View>>>,
	assembler: Weak<ViewAssembler>,
	torn_down: Rc<Cell<bool>>,
	name: String,
	route: String,
	region: String,
}

impl AssembledView {
	/// The owning assembler, while it is still registered.
	pub fn assembler(&self) -> Option<Rc<ViewAssembler>> {
		self.assembler.upgrade()
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn route(&self) -> &str {
		&self.route
	}

	pub fn region(&self) -> &str {
		&self.region
	}

	pub fn is_torn_down(&self) -> bool {
		self.torn_down.get()
	}

	/// Borrow the view.
	pub fn with_view<R>(&self, f: impl FnOnce(&dyn View) -> R) -> Result<R, PagesError> {
		let view = self
			.view
			.try_borrow()
			.map_err(|_| PagesError::ViewBusy(self.name.clone()))?;
		Ok(f(view.as_ref()))
	}

	/// Mutably borrow the view.
	pub fn with_view_mut<R>(&self, f: impl FnOnce(&mut dyn View) -> R) -> Result<R, PagesError> {
		let mut view = self
			.view
			.try_borrow_mut()
			.map_err(|_| PagesError::ViewBusy(self.name.clone()))?;
		Ok(f(view.as_mut()))
	}

	pub fn element(&self) -> Result<Element, PagesError> {
		self.with_view(|view| view.element())
	}

	/// Send the teardown signal, then release the view.
	///
	/// A pending deferred render is skipped from here on.
	///
	/// # Errors
	///
	/// [`PagesError::ViewBusy`] while the view is rendering. The view is left
	/// untouched and still counts as live.
	pub fn teardown(&self) -> Result<(), PagesError> {
		let mut view = self
			.view
			.try_borrow_mut()
			.map_err(|_| PagesError::ViewBusy(self.name.clone()))?;
		self.torn_down.set(true);
		view.teardown();
		view.remove();
		drop(view);
		tracing::debug!(route = %self.route, region = %self.region, view = %self.name, "view torn down");
		Ok(())
	}
}

impl fmt::Debug for AssembledView {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AssembledView")
			.field("name", &self.name)
			.field("route", &self.route)
			.field("region", &self.region)
			.field("torn_down", &self.torn_down.get())
			.finish_non_exhaustive()
	}
}
