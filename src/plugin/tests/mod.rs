//! Test modules for the plugin system
//!
//! Registry and contract tests live next to their code; these suites cover
//! discovery, module loading and contribution aggregation.

mod utils;
