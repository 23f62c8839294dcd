//! Library side of the `qmap` command-line tool.

pub mod logging;
pub mod pipeline;
pub mod types;
