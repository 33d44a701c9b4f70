//! Minimal DOM contract.
//!
//! Views produce an [`Element`]; regions write its markup into an [`Outlet`]
//! found through a [`Document`]. The in-memory implementations back tests and
//! server-side use; a browser binding implements the same traits over real
//! nodes.

use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A view's root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
	tag: String,
	attrs: IndexMap<String, String>,
	inner_html: String,
}

impl Element {
	/// Create an empty element.
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			tag: tag.into(),
			attrs: IndexMap::new(),
			inner_html: String::new(),
		}
	}

	/// Set an attribute.
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attrs.insert(name.into(), value.into());
		self
	}

	/// Set the `id` attribute.
	pub fn with_id(self, id: impl Into<String>) -> Self {
		self.attr("id", id)
	}

	/// Set the `class` attribute.
	pub fn with_class(self, class: impl Into<String>) -> Self {
		self.attr("class", class)
	}

	/// Replace the inner markup.
	pub fn with_inner_html(mut self, html: impl Into<String>) -> Self {
		self.inner_html = html.into();
		self
	}

	pub fn set_inner_html(&mut self, html: impl Into<String>) {
		self.inner_html = html.into();
	}

	pub fn tag(&self) -> &str {
		&self.tag
	}

	pub fn id(&self) -> Option<&str> {
		self.get_attr("id")
	}

	pub fn class_name(&self) -> Option<&str> {
		self.get_attr("class")
	}

	pub fn get_attr(&self, name: &str) -> Option<&str> {
		self.attrs.get(name).map(String::as_str)
	}

	pub fn inner_html(&self) -> &str {
		&self.inner_html
	}

	/// Serialise to markup. Attribute values are escaped, inner markup is not.
	///
	/// ```
	/// use shasta_pages::Element;
	///
	/// let el = Element::new("section")
	///     .with_class("about")
	///     .with_inner_html("<h2>About Bobby</h2>");
	/// assert_eq!(el.to_html(), r#"<section class="about"><h2>About Bobby</h2></section>"#);
	/// ```
	pub fn to_html(&self) -> String {
		let mut html = format!("<{}", self.tag);
		for (name, value) in &self.attrs {
			html.push_str(&format!(" {}=\"{}\"", name, escape_attr(value)));
		}
		html.push('>');
		html.push_str(&self.inner_html);
		html.push_str(&format!("</{}>", self.tag));
		html
	}
}

impl fmt::Display for Element {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_html())
	}
}

fn escape_attr(value: &str) -> String {
	value
		.replace('&', "&amp;")
		.replace('"', "&quot;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
}

/// An insertion point whose markup can be replaced.
pub trait Outlet {
	/// Replace the markup.
	fn set_html(&mut self, html: String);

	/// Current markup.
	fn html(&self) -> String;

	/// Remove all markup.
	fn clear(&mut self) {
		self.set_html(String::new());
	}
}

/// Shared handle to an outlet.
pub type SharedOutlet = Rc<RefCell<dyn Outlet>>;

/// Looks up outlets by selector.
pub trait Document {
	/// Find the outlet a selector refers to.
	fn select(&self, selector: &str) -> Option<SharedOutlet>;
}

/// In-memory outlet that counts writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryOutlet {
	html: String,
	writes: usize,
}

impl MemoryOutlet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of `set_html` calls so far.
	pub fn writes(&self) -> usize {
		self.writes
	}
}

impl Outlet for MemoryOutlet {
	fn set_html(&mut self, html: String) {
		self.html = html;
		self.writes += 1;
	}

	fn html(&self) -> String {
		self.html.clone()
	}
}

/// In-memory document: a set of outlets keyed by their exact selector.
///
/// ```
/// use shasta_pages::{Document, MemoryDocument};
///
/// let document = MemoryDocument::new().with_outlet("#content");
/// assert!(document.select("#content").is_some());
/// assert!(document.select("#sidebar").is_none());
/// ```
#[derive(Debug, Default)]
pub struct MemoryDocument {
	outlets: RefCell<IndexMap<String, Rc<RefCell<MemoryOutlet>>>>,
}

impl MemoryDocument {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style [`MemoryDocument::add_outlet`].
	pub fn with_outlet(self, selector: impl Into<String>) -> Self {
		self.add_outlet(selector);
		self
	}

	/// Add an outlet, or return the existing one for `selector`.
	pub fn add_outlet(&self, selector: impl Into<String>) -> Rc<RefCell<MemoryOutlet>> {
		Rc::clone(
			self.outlets
				.borrow_mut()
				.entry(selector.into())
				.or_insert_with(|| Rc::new(RefCell::new(MemoryOutlet::new()))),
		)
	}

	/// Markup of the outlet for `selector`.
	pub fn html(&self, selector: &str) -> Option<String> {
		self.outlets
			.borrow()
			.get(selector)
			.map(|outlet| outlet.borrow().html())
	}

	/// The concrete outlet for `selector`.
	pub fn outlet(&self, selector: &str) -> Option<Rc<RefCell<MemoryOutlet>>> {
		self.outlets.borrow().get(selector).cloned()
	}
}

impl Document for MemoryDocument {
	fn select(&self, selector: &str) -> Option<SharedOutlet> {
		self.outlet(selector).map(|outlet| outlet as SharedOutlet)
	}
}

impl<D: Document + ?Sized> Document for Rc<D> {
	fn select(&self, selector: &str) -> Option<SharedOutlet> {
		(**self).select(selector)
	}
}
