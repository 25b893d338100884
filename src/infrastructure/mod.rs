//! Infrastructure layer: adapters for the judge endpoint, the runner
//! report format, configuration, and logging.

pub mod config;
pub mod judge;
pub mod logging;
pub mod runner;
