//! Output side of the splitter.
//!
//! [`OutputRouter`] writes one tab-delimited file per output key and
//! [`MemorySink`] collects the same rows in memory.

pub mod error;
pub mod memory;
pub mod naming;
pub mod router;

pub use error::{OutputError, Result};
pub use memory::{MemorySink, MemoryTable};
pub use naming::{base_name, output_file_name};
pub use router::{OutputRouter, remove_empty_outputs};
