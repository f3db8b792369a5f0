pub mod app;
pub mod core;
pub mod extensions;
pub mod plugin;
pub mod progress;
pub mod threads;

#[doc(hidden)]
pub use inventory;
