//! Common test utilities and helpers

use guikit::core::config::AppConfig;
use guikit::threads::api::{EventLoop, MainWindow, ThreadPool};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

#[allow(dead_code)]
pub const WAIT: Duration = Duration::from_secs(5);

#[allow(dead_code)]
pub fn pool_with_loop(title: &str) -> (ThreadPool, EventLoop) {
    let (window, event_loop) = MainWindow::new(title);
    (ThreadPool::new(window), event_loop)
}

/// Config with a fixed menu policy, independent of the host platform
#[allow(dead_code)]
pub fn portable_config(title: &str) -> AppConfig {
    AppConfig {
        title: title.to_string(),
        native_app_menu: Some(false),
        ..AppConfig::default()
    }
}

#[allow(dead_code)]
pub fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}
