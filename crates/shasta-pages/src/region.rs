//! Regions: named places in the page where one view is shown at a time.

use crate::dom::{Document, Element, SharedOutlet};
use indexmap::IndexMap;
use std::fmt;

/// Where a region writes its markup.
#[derive(Clone)]
pub enum RegionTarget {
	/// Resolved through the [`Document`] at injection time.
	Selector(String),
	/// A concrete outlet.
	Outlet(SharedOutlet),
}

impl fmt::Debug for RegionTarget {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Selector(selector) => f.debug_tuple("Selector").field(selector).finish(),
			Self::Outlet(_) => f.debug_tuple("Outlet").finish_non_exhaustive(),
		}
	}
}

impl From<&str> for RegionTarget {
	fn from(selector: &str) -> Self {
		Self::Selector(selector.to_string())
	}
}

impl From<String> for RegionTarget {
	fn from(selector: String) -> Self {
		Self::Selector(selector)
	}
}

impl From<SharedOutlet> for RegionTarget {
	fn from(outlet: SharedOutlet) -> Self {
		Self::Outlet(outlet)
	}
}

/// A named region. A placeholder region has no target yet.
#[derive(Debug, Clone)]
pub struct Region {
	name: String,
	target: Option<RegionTarget>,
}

impl Region {
	pub fn new(name: impl Into<String>, target: impl Into<RegionTarget>) -> Self {
		Self {
			name: name.into(),
			target: Some(target.into()),
		}
	}

	/// A region referenced before its target is known.
	pub fn placeholder(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			target: None,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn target(&self) -> Option<&RegionTarget> {
		self.target.as_ref()
	}

	/// Whether the region has a target.
	pub fn has_target(&self) -> bool {
		self.target.is_some()
	}

	/// Find the outlet this region writes to.
	pub fn resolve(&self, document: &dyn Document) -> Option<SharedOutlet> {
		match self.target.as_ref()? {
			RegionTarget::Selector(selector) => document.select(selector),
			RegionTarget::Outlet(outlet) => Some(outlet.clone()),
		}
	}

	/// Write `element` into the region. Does nothing for an unresolvable region.
	///
	/// Returns whether markup was written.
	pub fn inject(&self, document: &dyn Document, element: &Element) -> bool {
		match self.resolve(document) {
			Some(outlet) => {
				outlet.borrow_mut().set_html(element.to_html());
				tracing::debug!(region = %self.name, tag = %element.tag(), "injected element");
				true
			}
			None => false,
		}
	}
}

/// Regions by name, in registration order.
#[derive(Debug, Clone, Default)]
pub struct RegionRegistry {
	regions: IndexMap<String, Region>,
}

impl RegionRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register or re-register a region. The last registration wins.
	///
	/// ```
	/// use shasta_pages::RegionRegistry;
	///
	/// let mut regions = RegionRegistry::new();
	/// regions.add_region("content", "#content").add_region("sidebar", "#sidebar");
	/// assert_eq!(regions.len(), 2);
	/// ```
	pub fn add_region(&mut self, name: &str, target: impl Into<RegionTarget>) -> &mut Self {
		tracing::debug!(region = %name, "region registered");
		self.regions
			.insert(name.to_string(), Region::new(name, target));
		self
	}

	/// Look up a region, creating a placeholder when it does not exist yet.
	pub fn get_region(&mut self, name: &str) -> &Region {
		self.regions
			.entry(name.to_string())
			.or_insert_with(|| Region::placeholder(name))
	}

	/// Look up a region without creating it.
	pub fn get(&self, name: &str) -> Option<&Region> {
		self.regions.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.regions.contains_key(name)
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.regions.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.regions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.regions.is_empty()
	}
}
