//! # Shasta Pages
//!
//! Regions, view assembly and the navigation manager.
//!
//! ## Architecture
//!
//! - [`dom`]: the minimal DOM contract views and regions write through
//! - [`region`]: named insertion points, registrable in any order
//! - [`view`]: the [`View`] trait and what a view sees while rendering
//! - [`assembler`]: builds, renders and injects the view of one route
//! - [`manager`]: [`NavigationManager`], the object applications talk to
//!
//! ## Dispatch
//!
//! When `route:<name>` fires for a view route the manager:
//!
//! 1. resolves the route's region to an outlet, failing before anything else
//!    changes when it cannot;
//! 2. tears down the view currently showing there and clears the outlet;
//! 3. builds and renders the new view, then injects its element.
//!
//! Only one view shows in a region at any time.

pub mod assembler;
pub mod dom;
pub mod error;
pub mod manager;
pub mod region;
pub mod view;

pub use assembler::{
	AssembledView, ConstructibleView, ConstructorArgs, ViewAssembler, ViewFactory, ViewOptions,
};
pub use dom::{Document, Element, MemoryDocument, MemoryOutlet, Outlet, SharedOutlet};
pub use error::{PagesError, ViewError};
pub use manager::NavigationManager;
pub use region::{Region, RegionRegistry, RegionTarget};
pub use view::{RenderSignal, Rendered, View, ViewContext};

pub use shasta_urls::{NavigateOptions, ParamValue, ParameterMap, StartOptions};

/// Everything needed to declare views and wire a manager.
pub mod prelude {
	pub use crate::{
		ConstructibleView, ConstructorArgs, Document, Element, MemoryDocument,
		NavigationManager, NavigateOptions, PagesError, ParamValue, ParameterMap, Rendered,
		View, ViewContext, ViewError, ViewFactory, ViewOptions,
	};
}
