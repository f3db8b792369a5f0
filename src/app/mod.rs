//! Application module

pub mod cli;
pub mod shell;
pub mod startup;
