//! Library components of the `unvcf` command.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod progress;
