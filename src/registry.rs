//! Batch loading of process descriptors.
//!
//! A batch either loads completely or not at all: the first descriptor
//! that fails to read, parse, or fit rolls back every process committed
//! earlier in the same call, so callers never observe a half-loaded
//! registry.

use crate::descriptor::Descriptor;
use crate::error::{Error, Result};
use crate::mem::frame_allocator::FrameAllocator;
use crate::mem::page_table;
use crate::process::Process;
use log::{debug, warn};
use std::fs;
use std::path::Path;

/// Owns the loaded processes and the batch-wide fragmentation total.
#[derive(Default)]
pub struct ProcessRegistry {
    processes: Vec<Process>,
    fragmentation: usize,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Internal fragmentation in bytes across all loaded processes.
    pub fn fragmentation(&self) -> usize {
        self.fragmentation
    }

    /// Loads every descriptor in `paths`, or none.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error::Io`], [`Error::Format`], or
    /// [`Error::OutOfFrames`] encountered. On failure the registry,
    /// allocator, and fragmentation counter are restored to their state
    /// before the call.
    pub fn load_batch<P: AsRef<Path>>(
        &mut self,
        paths: &[P],
        allocator: &mut FrameAllocator,
    ) -> Result<()> {
        let committed_before = self.processes.len();
        let fragmentation_before = self.fragmentation;

        for path in paths {
            if let Err(err) = self.load_one(path.as_ref(), allocator) {
                warn!("batch aborted at {}: {err}", path.as_ref().display());
                self.release_from(committed_before, allocator);
                self.fragmentation = fragmentation_before;
                return Err(err);
            }
        }
        Ok(())
    }

    fn load_one(&mut self, path: &Path, allocator: &mut FrameAllocator) -> Result<()> {
        let bytes = fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let descriptor = Descriptor::parse_bytes(&bytes).map_err(|_| Error::Format {
            path: path.to_path_buf(),
        })?;

        let mut process = Process::from_descriptor(descriptor, path.to_path_buf());
        page_table::build(&mut process, allocator, &mut self.fragmentation)?;

        debug!(
            "loaded pid {} from {} ({} bytes, {} pages)",
            process.pid,
            path.display(),
            process.size(),
            process.num_pages()
        );
        self.processes.push(process);
        Ok(())
    }

    /// Releases all frames and drops every process. Safe to call twice.
    pub fn teardown(&mut self, allocator: &mut FrameAllocator) {
        self.release_from(0, allocator);
        self.fragmentation = 0;
    }

    /// Drops processes from index `start` on, returning their frames.
    /// A process that failed mid-build holds no frames, so only committed
    /// page tables are walked here.
    fn release_from(&mut self, start: usize, allocator: &mut FrameAllocator) {
        for process in self.processes.drain(start..) {
            for entry in &process.page_table {
                allocator.release(entry.frame);
            }
        }
    }
}
