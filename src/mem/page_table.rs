//! Page-table construction and content placement.
//!
//! The build step is the only path that moves a process's bytes into
//! physical frames. Code and data are treated as one contiguous logical
//! stream: page `i` holds stream bytes `i * page_size ..` up to a full
//! page or the end of the process, whichever comes first. The tail of the
//! last page stays zero.

use crate::error::Result;
use crate::mem::frame_allocator::FrameAllocator;
use crate::process::Process;
use log::debug;

/// One page-to-frame mapping. `valid` is always true once built; there is
/// no invalidation path yet, the flag exists for eviction-style extensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageTableEntry {
    pub page: usize,
    pub frame: usize,
    pub valid: bool,
}

/// Builds `process`'s page table, copies its bytes into the acquired
/// frames, and adds its last-page waste to `fragmentation`.
///
/// # Errors
///
/// Propagates [`crate::Error::OutOfFrames`] from the allocator. Every
/// frame already acquired for this process is released first, so the
/// allocator is left exactly as it was and the process keeps an empty
/// page table. The fragmentation counter is only touched on success.
pub fn build(
    process: &mut Process,
    allocator: &mut FrameAllocator,
    fragmentation: &mut usize,
) -> Result<()> {
    let page_size = allocator.frame_size();
    let num_pages = process.size().div_ceil(page_size);

    let mut entries: Vec<PageTableEntry> = Vec::with_capacity(num_pages);
    for page in 0..num_pages {
        let frame = match allocator.acquire() {
            Ok(frame) => frame,
            Err(err) => {
                debug!(
                    "pid {}: out of frames at page {page} of {num_pages}, unwinding",
                    process.pid
                );
                for entry in &entries {
                    allocator.release(entry.frame);
                }
                return Err(err);
            }
        };
        entries.push(PageTableEntry {
            page,
            frame,
            valid: true,
        });
    }

    // Contiguous code-then-data stream, split into page-size chunks. The
    // final chunk may be short; fill_frame leaves its tail zeroed.
    let stream: Vec<u8> = process
        .code
        .iter()
        .chain(process.data.iter())
        .copied()
        .collect();
    for (entry, chunk) in entries.iter().zip(stream.chunks(page_size)) {
        allocator.fill_frame(entry.frame, chunk);
    }

    let used_in_last_page = process.size() % page_size;
    if used_in_last_page != 0 {
        *fragmentation += page_size - used_in_last_page;
    }

    process.page_table = entries;
    Ok(())
}
