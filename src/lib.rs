//! Simulator for paged virtual-memory allocation.
//!
//! A fixed physical memory is split into equal-size frames. Process images
//! arrive as serialized descriptors; each one is decoded, given a page
//! table mapping its logical pages onto free frames, and has its code and
//! data bytes copied into frame storage. Internal fragmentation (the
//! unused tail of each process's last page) is accounted across the batch.
//!
//! Batches load all-or-nothing: the first descriptor that fails to read,
//! parse, or fit rolls back every process committed earlier in the same
//! call.

pub mod descriptor;
pub mod error;
pub mod logging;
pub mod mem;
pub mod process;
pub mod registry;
pub mod report;

pub use error::{Error, Result};
