//! Regions, views and the navigation manager.
//!
//! ## Architecture
//!
//! - **Regions**: named insertion points, resolved lazily at dispatch
//! - **Views**: anything implementing [`View`](shasta_pages::View)
//! - **Assemblers**: build, render and inject one route's view
//! - **Manager**: tears down the old view before showing the new one
//!
//! See [`NavigationManager`](shasta_pages::NavigationManager) for a complete
//! example.

pub use shasta_pages::*;
