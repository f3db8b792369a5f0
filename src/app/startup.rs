use super::cli::Args;
use super::shell::{MainApp, MainFrame};
use crate::core::config::AppConfig;
use crate::core::logging::init_logging;
use crate::plugin::api::{InventoryLoader, WindowBody};
use clap::Parser;

/// Initialize the application, build the main window and run it
pub fn startup() {
    let args = Args::parse();

    // Configuration comes first: it may carry the logging settings
    let config = match AppConfig::load_or_default(args.config_file.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let logging = &config.logging;
    let log_level = args.log_level.as_deref().or(logging.level.as_deref());
    let log_format = args.log_format.as_deref().or(logging.format.as_deref());
    let log_file = args.log_file.as_deref().or(logging.file.as_deref());
    if let Err(e) = init_logging(log_level, log_format, log_file, args.use_color(logging.color)) {
        eprintln!("Error: failed to initialise logging: {}", e);
        std::process::exit(1);
    }

    log::info!("{}: starting", config.title);

    let frame = match MainApp::new(config).init(&InventoryLoader::new()) {
        Ok(frame) => frame,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    run(frame);
}

/// Headless main loop: report the window, drain pending events, close
fn run(mut frame: MainFrame) {
    describe(&frame);
    frame.process_events();

    let report = frame.shutdown();
    if !report.is_clean() {
        std::process::exit(2);
    }
}

fn describe(frame: &MainFrame) {
    for (name, items) in frame.menus().iter() {
        let texts: Vec<&str> = items.iter().map(|item| item.text.as_str()).collect();
        log::info!("Menu '{}': {}", name, texts.join(", "));
    }
    for (name, tools) in frame.toolbars().iter() {
        log::info!("Toolbar '{}': {} tool(s)", name, tools.len());
    }
    match &frame.contents().body {
        WindowBody::Notebook { position, tabs } => {
            let texts: Vec<&str> = tabs.iter().map(|tab| tab.text.as_str()).collect();
            log::info!("Notebook ({} tabs): {}", position, texts.join(", "));
        }
        WindowBody::Central(widget) => {
            log::info!("Central widget: {}", widget.class_name());
        }
    }
}
