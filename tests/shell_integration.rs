//! Shell integration tests
//!
//! Builds the main window through the public API, with plugin modules
//! declared from outside the crate.

mod common;

use common::{config_file, portable_config};
use guikit::app::shell::MainApp;
use guikit::core::config::AppConfig;
use guikit::plugin::api::{
    CommandId, InventoryLoader, MenuTool, Panel, ParentHandle, Plugin, PluginRegistry, Tab,
    Widget, WindowBody,
};

#[derive(Debug, Default)]
struct ReportsPlugin;

impl Plugin for ReportsPlugin {
    fn menu_entries(&self) -> Vec<MenuTool> {
        vec![MenuTool::new("Reports", "Summary").with_description("Show the summary report")]
    }

    fn tabs(&self, parent: &ParentHandle) -> Vec<Tab> {
        vec![Tab::new(Box::new(Panel::new(parent, "Grid")), "Reports").with_order(-1)]
    }
}

#[derive(Debug, Default)]
struct SecondCentral;

impl Plugin for SecondCentral {
    fn central(&self, parent: &ParentHandle) -> Option<Box<dyn Widget>> {
        Some(Box::new(Panel::new(parent, "Canvas")))
    }
}

fn init_reports(registry: &mut PluginRegistry) -> Result<(), String> {
    registry.register::<ReportsPlugin>();
    Ok(())
}

fn init_second_central(registry: &mut PluginRegistry) -> Result<(), String> {
    registry.register::<SecondCentral>();
    Ok(())
}

guikit::plugin_module!("reports", init_reports);
guikit::plugin_module!("second_central", init_second_central);

#[test]
fn test_external_module_contributes_to_window() {
    let frame = MainApp::new(AppConfig {
        plugins: vec!["reports".to_string()],
        ..portable_config("Integration")
    })
    .init(&InventoryLoader::new())
    .unwrap();

    assert_eq!(frame.menus().names(), vec!["File", "About", "Reports"]);

    let summary = &frame.menus().get("Reports").unwrap()[0];
    assert!(!summary.id.is_any());
    // No callback: the entry is inert
    assert!(!frame.trigger(summary.id));

    match &frame.contents().body {
        WindowBody::Notebook { tabs, .. } => {
            // Negative order sorts ahead of the bundled tabs
            assert_eq!(tabs[0].text, "Reports");
            assert!(tabs[0].select);
            assert!(tabs[1..].iter().all(|tab| !tab.select));
        }
        WindowBody::Central(_) => panic!("Expected a notebook body"),
    }
}

#[test]
fn test_config_file_drives_layout() {
    let file = config_file(
        r#"
title = "From file"
notebook_layout = false
auto_plugins = false
plugins = ["guikit::extensions::example_plugin"]
native_app_menu = false
"#,
    );

    let config = AppConfig::load_or_default(Some(file.path())).unwrap();
    let frame = MainApp::new(config).init(&InventoryLoader::new()).unwrap();

    assert_eq!(frame.title(), "From file");
    match &frame.contents().body {
        WindowBody::Central(widget) => assert_eq!(widget.class_name(), "TextCtrl"),
        WindowBody::Notebook { .. } => panic!("Expected a central body"),
    }
    assert!(frame.menus().get("About").is_none());
}

#[test]
fn test_two_central_widgets_fail_startup() {
    let err = MainApp::new(AppConfig {
        notebook_layout: false,
        plugins: vec!["second_central".to_string()],
        ..portable_config("Broken")
    })
    .init(&InventoryLoader::new())
    .err()
    .unwrap();

    assert_eq!(
        err.to_string(),
        "Exactly 1 central widget needs to be provided. 2 given."
    );
}

#[test]
fn test_exit_is_always_first() {
    let frame = MainApp::new(portable_config("Exit"))
        .init(&InventoryLoader::new())
        .unwrap();

    let file = frame.menus().get("File").unwrap();
    assert_eq!(file[0].id, CommandId::EXIT);
    assert_eq!(file[0].description, "Terminate application");
}
