//! Library side of the `wpr` binary: configuration, logging, the report run
//! and terminal summaries.

pub mod config;
pub mod demand;
pub mod logging;
pub mod report;
pub mod summary;
