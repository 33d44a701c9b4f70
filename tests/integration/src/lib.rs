//! Integration test utilities for Shasta
//!
//! Views and helpers shared by the cross-crate tests under
//! `integration/tests/`.

use shasta_pages::{
	ConstructibleView, ConstructorArgs, Element, ParamValue, Rendered, RenderSignal, View,
	ViewContext, ViewError, ViewFactory,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Ordered record of lifecycle calls, shared between views and assertions.
#[derive(Debug, Clone, Default)]
pub struct Journal {
	entries: Rc<RefCell<Vec<String>>>,
	params: Rc<RefCell<Vec<Vec<ParamValue>>>>,
}

impl Journal {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn record(&self, entry: impl Into<String>) {
		self.entries.borrow_mut().push(entry.into());
	}

	pub fn entries(&self) -> Vec<String> {
		self.entries.borrow().clone()
	}

	/// Index of the first entry equal to `entry`.
	pub fn position(&self, entry: &str) -> Option<usize> {
		self.entries.borrow().iter().position(|e| e == entry)
	}

	pub fn count(&self, entry: &str) -> usize {
		self.entries.borrow().iter().filter(|e| *e == entry).count()
	}

	/// Values passed to every render, in call order.
	pub fn params(&self) -> Vec<Vec<ParamValue>> {
		self.params.borrow().clone()
	}
}

/// A view that always renders the same element.
///
/// Lifecycle calls are journaled as `"<label>.<call>"`.
pub struct TemplateView {
	label: String,
	element: Element,
	journal: Journal,
}

impl TemplateView {
	pub fn new(label: &str, element: Element, journal: &Journal) -> Self {
		Self {
			label: label.to_string(),
			element,
			journal: journal.clone(),
		}
	}

	/// Factory producing a fresh `TemplateView` per dispatch.
	pub fn factory(label: &str, element: Element, journal: &Journal) -> ViewFactory {
		let label = label.to_string();
		let journal = journal.clone();
		ViewFactory::factory(move |_, _| Ok(TemplateView::new(&label, element.clone(), &journal)))
	}
}

impl View for TemplateView {
	fn name(&self) -> &str {
		&self.label
	}

	fn responds_to(&self, method: &str) -> bool {
		method == "render"
	}

	fn render(
		&mut self,
		method: &str,
		params: &[ParamValue],
		_ctx: &ViewContext,
	) -> Result<Rendered, ViewError> {
		self.journal.record(format!("{}.{}", self.label, method));
		self.journal.params.borrow_mut().push(params.to_vec());
		Ok(Rendered::Ready)
	}

	fn element(&self) -> Element {
		self.element.clone()
	}

	fn delegate_events(&mut self) {
		self.journal.record(format!("{}.delegate_events", self.label));
	}

	fn teardown(&mut self) {
		self.journal.record(format!("{}.teardown", self.label));
	}

	fn remove(&mut self) {
		self.journal.record(format!("{}.remove", self.label));
	}
}

/// A view whose render finishes later through its [`RenderSignal`].
pub struct DeferredView {
	signals: Rc<RefCell<Vec<RenderSignal>>>,
	text: String,
}

impl DeferredView {
	/// Factory whose views hand their render signal to `signals`.
	pub fn factory(signals: &Rc<RefCell<Vec<RenderSignal>>>) -> ViewFactory {
		let signals = Rc::clone(signals);
		ViewFactory::factory(move |_, _| {
			Ok(DeferredView {
				signals: Rc::clone(&signals),
				text: String::new(),
			})
		})
	}
}

impl View for DeferredView {
	fn name(&self) -> &str {
		"DeferredView"
	}

	fn responds_to(&self, method: &str) -> bool {
		matches!(method, "render" | "loaded")
	}

	fn render(
		&mut self,
		method: &str,
		params: &[ParamValue],
		ctx: &ViewContext,
	) -> Result<Rendered, ViewError> {
		if method == "render" {
			self.signals.borrow_mut().push(ctx.render_signal().clone());
			return Ok(Rendered::Deferred);
		}
		let who = params.first().map(ToString::to_string).unwrap_or_default();
		self.text = format!("loaded {}", who);
		Ok(Rendered::Ready)
	}

	fn element(&self) -> Element {
		Element::new("article").with_inner_html(self.text.clone())
	}
}

/// A constructible view whose heading comes from its first constructor argument.
pub struct HeadingView {
	heading: String,
}

impl ConstructibleView for HeadingView {
	fn construct(args: &ConstructorArgs) -> Result<Self, ViewError> {
		Ok(Self {
			heading: args.get(0)?,
		})
	}
}

impl View for HeadingView {
	fn name(&self) -> &str {
		"HeadingView"
	}

	fn responds_to(&self, method: &str) -> bool {
		method == "render"
	}

	fn render(&mut self, _: &str, _: &[ParamValue], _: &ViewContext) -> Result<Rendered, ViewError> {
		Ok(Rendered::Ready)
	}

	fn element(&self) -> Element {
		Element::new("header").with_inner_html(format!("<h1>{}</h1>", self.heading))
	}
}
