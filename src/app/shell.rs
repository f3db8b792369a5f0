//! Application shell
//!
//! [`MainApp`] turns a configuration into a populated [`MainFrame`]: it seeds
//! the registry with the built-in actions, loads the plugin modules, and
//! aggregates their contributions for the configured layout. The frame owns
//! the UI side of the task bridge (event loop and thread pool).

use crate::core::config::{AppConfig, ConfigError};
use crate::plugin::api::{
    builtin_extensions, load_plugins_from, populate_window, CommandEvent, CommandId, MenuGroups,
    ModuleLoader, PluginDiscovery, PluginError, PluginRegistry, WindowContents,
};
use crate::threads::api::{EventLoop, MainWindow, ShutdownReport, ThreadPool};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Plugin(#[from] PluginError),
}

pub struct MainApp {
    config: AppConfig,
    registry: PluginRegistry,
    discovery: PluginDiscovery,
}

impl MainApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            registry: PluginRegistry::with_builtins(),
            discovery: PluginDiscovery::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    pub fn discovery(&self) -> &PluginDiscovery {
        &self.discovery
    }

    /// Module names to load: bundled extensions, configured plugins, then
    /// whatever the plugin directories contain
    pub fn plugin_list(&mut self) -> Result<Vec<String>, AppError> {
        let mut names = Vec::new();
        if self.config.auto_plugins {
            names.extend(builtin_extensions());
        }
        names.extend(self.config.plugins.iter().cloned());

        for dir in &self.config.plugin_dirs {
            let found = self
                .discovery
                .collect(&dir.path, dir.package.as_deref(), dir.add_to_path)?;
            names.extend(found);
        }

        Ok(names)
    }

    /// Load plugins and build the main window
    pub fn init(mut self, loader: &dyn ModuleLoader) -> Result<MainFrame, AppError> {
        let (window, event_loop) = MainWindow::new(self.config.title.clone());

        let names = self.plugin_list()?;
        let search_paths = self.discovery.search_paths().to_vec();
        load_plugins_from(&mut self.registry, loader, &names, &search_paths)?;

        let contents = populate_window(
            &self.registry,
            &self.config.title,
            self.config.layout(),
            self.config.menu_policy(),
        )?;

        log::info!(
            "{} started with {} plugins",
            self.config.title,
            self.registry.len()
        );

        Ok(MainFrame {
            title: self.config.title,
            contents,
            pool: ThreadPool::new(window),
            event_loop,
            shutdown_timeout: self.config.threads.shutdown_timeout_ms,
            exit_requested: Arc::new(AtomicBool::new(false)),
        })
    }
}

/// The populated main window
pub struct MainFrame {
    title: String,
    contents: WindowContents,
    pool: ThreadPool,
    event_loop: EventLoop,
    shutdown_timeout: u64,
    exit_requested: Arc<AtomicBool>,
}

impl MainFrame {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn contents(&self) -> &WindowContents {
        &self.contents
    }

    pub fn menus(&self) -> &MenuGroups {
        &self.contents.menus
    }

    pub fn toolbars(&self) -> &MenuGroups {
        &self.contents.toolbars
    }

    pub fn pool(&self) -> &ThreadPool {
        &self.pool
    }

    pub fn window(&self) -> &MainWindow {
        self.pool.window()
    }

    /// Activate the menu entry or tool with `id`
    ///
    /// The stock Exit command requests shutdown. Returns whether a callback
    /// ran or exit was requested.
    pub fn trigger(&self, id: CommandId) -> bool {
        if id == CommandId::EXIT {
            log::info!("Exit requested");
            self.exit_requested.store(true, Ordering::Release);
            return true;
        }

        let event = CommandEvent::new(id);
        let entry = self.menus().find(id).or_else(|| self.toolbars().find(id));
        match entry {
            Some(entry) => entry.invoke(&event),
            None => {
                log::debug!("No menu entry or tool with id {}", id);
                false
            }
        }
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested.load(Ordering::Acquire)
    }

    /// Deliver queued worker outcomes on this thread
    pub fn process_events(&mut self) -> usize {
        self.event_loop.process_pending()
    }

    /// Deliver outcomes until `done` holds or `timeout` passes
    pub fn process_until<F>(&mut self, timeout: Duration, done: F) -> bool
    where
        F: FnMut() -> bool,
    {
        self.event_loop.process_until(timeout, done)
    }

    /// Stop every worker, deliver what already arrived, and close the window
    pub fn shutdown(mut self) -> ShutdownReport {
        let report = self
            .pool
            .stop_all(Duration::from_millis(self.shutdown_timeout));
        self.event_loop.process_pending();

        if report.is_clean() {
            log::info!("{} closed", self.title);
        } else {
            log::warn!(
                "{} closed with {} worker(s) still running",
                self.title,
                report.timed_out.len()
            );
        }
        report
    }
}
