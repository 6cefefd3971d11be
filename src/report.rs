//! Human-readable dump of registry and allocator state. Read-only.

use crate::mem::frame_allocator::FrameAllocator;
use crate::registry::ProcessRegistry;
use std::io::{self, Write};

/// Writes the page-to-frame mapping and per-frame contents of every
/// loaded process, preceded by the aggregate fragmentation total.
pub fn write_dump<W: Write>(
    out: &mut W,
    registry: &ProcessRegistry,
    allocator: &FrameAllocator,
) -> io::Result<()> {
    writeln!(out, "Memory Dump (Page -> Frame Mapping):")?;
    writeln!(out)?;
    writeln!(
        out,
        "Total Internal Fragmentation: {} bytes",
        registry.fragmentation()
    )?;

    for process in registry.processes() {
        writeln!(out)?;
        writeln!(out, "Process {} ({}):", process.pid, process.source.display())?;

        writeln!(out, "  Page Table:")?;
        for entry in &process.page_table {
            if entry.valid {
                writeln!(out, "    Page {} -> Frame {}", entry.page, entry.frame)?;
            } else {
                writeln!(out, "    Page {} -> Invalid", entry.page)?;
            }
        }

        writeln!(out, "  Page/Frame-wise Data:")?;
        for entry in &process.page_table {
            write!(out, "    Page {} (Frame {}):", entry.page, entry.frame)?;
            if let Some(frame) = allocator.frame(entry.frame) {
                for byte in frame {
                    write!(out, " {byte:02X}")?;
                }
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Writes the ascending list of free frame indices.
pub fn write_free_frames<W: Write>(out: &mut W, allocator: &FrameAllocator) -> io::Result<()> {
    write!(out, "Free Frames:")?;
    for frame in allocator.free_frames() {
        write!(out, " {frame}")?;
    }
    writeln!(out)
}
