//! Settings Integration Tests
//!
//! ## Integration Points
//!
//! - **conf**: layered settings from file and environment
//! - **pages**: the manager consuming those settings
//!
//! ## Purpose
//!
//! Verify that settings loaded through the builder change how a manager
//! registers routes and starts its history.

use rstest::*;
use serial_test::serial;
use shasta_conf::{DuplicateRoutes, SettingsBuilder};
use shasta_integration_tests::{Journal, TemplateView};
use shasta_pages::{Element, MemoryDocument, NavigationManager, ParameterMap, ViewOptions};
use std::env;
use std::fs;
use std::rc::Rc;
use tempfile::TempDir;

/// Test: a TOML file drives the manager's defaults
#[rstest]
fn test_file_settings_configure_manager() {
	// Arrange
	let dir = TempDir::new().unwrap();
	let path = dir.path().join("shasta.toml");
	fs::write(
		&path,
		"[history]\nsilent = true\n\n[pages]\ndefault_region = \"main\"\nduplicate_routes = \"replace\"\n",
	)
	.unwrap();
	let settings = SettingsBuilder::new().file(&path).build().unwrap();
	let document = Rc::new(MemoryDocument::new().with_outlet("#main"));
	let journal = Journal::new();
	let manager = NavigationManager::with_settings(Rc::clone(&document), settings);
	manager.add_region("main", "#main");

	// Act
	manager
		.add_url("home", "", TemplateView::factory("old", Element::new("div"), &journal), ViewOptions::new())
		.unwrap();
	manager
		.add_url("home", "", TemplateView::factory("new", Element::new("main"), &journal), ViewOptions::new())
		.unwrap();
	manager.run().unwrap();
	manager.navigate("home", ParameterMap::new()).unwrap();

	// Assert
	assert_eq!(manager.settings().pages.duplicate_routes, DuplicateRoutes::Replace);
	assert_eq!(journal.entries(), vec!["new.render", "new.delegate_events"]);
	assert_eq!(document.html("#main").as_deref(), Some("<main></main>"));
}

/// Test: environment variables override the render method
#[rstest]
#[serial(shasta_env)]
fn test_env_settings_override_render_method() {
	// Arrange
	// SAFETY: Setting environment variables is unsafe in multi-threaded programs.
	// This test uses #[serial] to ensure exclusive access to environment variables.
	unsafe {
		env::set_var("SHASTA_IT_PAGES_RENDER_METHOD", "show");
		env::set_var("SHASTA_IT_HISTORY_SILENT", "true");
	}
	let result = SettingsBuilder::new().env_prefix("SHASTA_IT_").build();
	// SAFETY: Removing environment variables is unsafe in multi-threaded programs.
	// This test uses #[serial] to ensure exclusive access to environment variables.
	unsafe {
		env::remove_var("SHASTA_IT_PAGES_RENDER_METHOD");
		env::remove_var("SHASTA_IT_HISTORY_SILENT");
	}
	let settings = result.unwrap();
	let document = Rc::new(MemoryDocument::new().with_outlet("#content"));
	let journal = Journal::new();
	let manager = NavigationManager::with_settings(Rc::clone(&document), settings);
	manager.add_region("content", "#content");
	manager
		.add_url(
			"home",
			"",
			TemplateView::factory("home", Element::new("div"), &journal),
			ViewOptions::new().region("content"),
		)
		.unwrap();
	manager.run().unwrap();

	// Act
	let result = manager.navigate("home", ParameterMap::new());

	// Assert
	assert!(matches!(
		result,
		Err(shasta_pages::PagesError::UnknownRenderMethod { ref method, .. }) if method == "show"
	));
	assert!(journal.entries().is_empty());
}
