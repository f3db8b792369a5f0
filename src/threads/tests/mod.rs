//! Task bridge tests

mod utils;
