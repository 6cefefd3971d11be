//! Fixed pool of physical frames.
//!
//! Occupancy lives in a core map, one entry per frame; frame contents live
//! in a single flat buffer with frame `n` at byte offset `n * frame_size`.
//! All content access goes through the allocator so the one-owner-per-frame
//! invariant cannot be bypassed.

mod placement_algorithms;

use crate::error::{Error, Result};
use bitbybit::bitfield;
use placement_algorithms::{FirstFit, PlacementAlgorithm};

#[bitfield(u8, default = 0)]
pub struct CoreMapEntry {
    #[bit(0, rw)]
    allocated: bool,
}

pub struct FrameAllocator {
    frame_size: usize,
    core_map: Box<[CoreMapEntry]>,
    contents: Box<[u8]>,
    placement_algorithm: FirstFit,
    frames_allocated: usize,
}

impl FrameAllocator {
    pub fn new(num_frames: usize, frame_size: usize) -> Result<Self> {
        if num_frames == 0 {
            return Err(Error::Configuration("frame pool is empty".into()));
        }
        if frame_size == 0 {
            return Err(Error::Configuration("frame size must be non-zero".into()));
        }
        Ok(FrameAllocator {
            frame_size,
            core_map: vec![CoreMapEntry::default(); num_frames].into_boxed_slice(),
            contents: vec![0; num_frames * frame_size].into_boxed_slice(),
            placement_algorithm: FirstFit,
            frames_allocated: 0,
        })
    }

    pub fn num_frames(&self) -> usize {
        self.core_map.len()
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    pub fn frames_allocated(&self) -> usize {
        self.frames_allocated
    }

    /// Acquires the lowest-numbered free frame and marks it occupied.
    ///
    /// The frame's bytes are zeroed, so stale content from a previous
    /// owner never leaks into a new mapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfFrames`] when every frame is occupied. This
    /// is recoverable; the caller decides what to unwind.
    pub fn acquire(&mut self) -> Result<usize> {
        let frame = self.placement_algorithm.place(&self.core_map)?;

        debug_assert!(!self.core_map[frame].allocated());
        self.core_map[frame] = self.core_map[frame].with_allocated(true);
        self.frames_allocated += 1;

        let start = frame * self.frame_size;
        self.contents[start..start + self.frame_size].fill(0);

        Ok(frame)
    }

    /// Marks `frame` free again. Out-of-range or already-free indices are
    /// tolerated: rollback and teardown paths release unconditionally.
    pub fn release(&mut self, frame: usize) {
        if frame >= self.core_map.len() || !self.core_map[frame].allocated() {
            return;
        }
        self.core_map[frame] = self.core_map[frame].with_allocated(false);
        self.frames_allocated -= 1;
    }

    /// Copies `bytes` to the start of `frame`. The tail keeps the zeros
    /// put there by [`Self::acquire`].
    ///
    /// # Panics
    ///
    /// Panics if `frame` is out of range or `bytes` exceeds a frame.
    pub fn fill_frame(&mut self, frame: usize, bytes: &[u8]) {
        assert!(frame < self.core_map.len());
        assert!(bytes.len() <= self.frame_size);
        let start = frame * self.frame_size;
        self.contents[start..start + bytes.len()].copy_from_slice(bytes);
    }

    /// Bounds-checked single-byte read.
    pub fn read(&self, frame: usize, offset: usize) -> Option<u8> {
        if frame >= self.core_map.len() || offset >= self.frame_size {
            return None;
        }
        Some(self.contents[frame * self.frame_size + offset])
    }

    /// Bounds-checked single-byte write. Returns `None` without writing
    /// when the location is out of range.
    pub fn write(&mut self, frame: usize, offset: usize, byte: u8) -> Option<()> {
        if frame >= self.core_map.len() || offset >= self.frame_size {
            return None;
        }
        self.contents[frame * self.frame_size + offset] = byte;
        Some(())
    }

    /// Full view of a frame's bytes, for the reporter.
    pub fn frame(&self, frame: usize) -> Option<&[u8]> {
        if frame >= self.core_map.len() {
            return None;
        }
        let start = frame * self.frame_size;
        Some(&self.contents[start..start + self.frame_size])
    }

    /// Indices of currently free frames, ascending.
    pub fn free_frames(&self) -> Vec<usize> {
        self.core_map
            .iter()
            .enumerate()
            .filter(|(_, entry)| !entry.allocated())
            .map(|(frame, _)| frame)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_pool() {
        assert!(FrameAllocator::new(0, 16).is_err());
        assert!(FrameAllocator::new(4, 0).is_err());
    }

    #[test]
    fn acquires_in_ascending_order() {
        let mut allocator = FrameAllocator::new(4, 16).unwrap();
        assert_eq!(allocator.acquire().unwrap(), 0);
        assert_eq!(allocator.acquire().unwrap(), 1);
        assert_eq!(allocator.acquire().unwrap(), 2);
        assert_eq!(allocator.frames_allocated(), 3);
    }

    #[test]
    fn reuses_lowest_released_frame() {
        let mut allocator = FrameAllocator::new(4, 16).unwrap();
        for _ in 0..4 {
            allocator.acquire().unwrap();
        }
        allocator.release(2);
        allocator.release(1);
        assert_eq!(allocator.acquire().unwrap(), 1);
        assert_eq!(allocator.acquire().unwrap(), 2);
    }

    #[test]
    fn exhaustion_is_recoverable() {
        let mut allocator = FrameAllocator::new(2, 16).unwrap();
        allocator.acquire().unwrap();
        allocator.acquire().unwrap();
        assert!(matches!(allocator.acquire(), Err(Error::OutOfFrames)));
        allocator.release(0);
        assert_eq!(allocator.acquire().unwrap(), 0);
    }

    #[test]
    fn release_tolerates_bad_indices() {
        let mut allocator = FrameAllocator::new(2, 16).unwrap();
        allocator.acquire().unwrap();
        allocator.release(99);
        allocator.release(1); // never acquired
        allocator.release(0);
        allocator.release(0); // double release
        assert_eq!(allocator.frames_allocated(), 0);
        assert_eq!(allocator.free_frames(), [0, 1]);
    }

    #[test]
    fn acquire_zeroes_stale_content() {
        let mut allocator = FrameAllocator::new(1, 4).unwrap();
        let frame = allocator.acquire().unwrap();
        allocator.fill_frame(frame, &[1, 2, 3, 4]);
        allocator.release(frame);
        let frame = allocator.acquire().unwrap();
        assert_eq!(allocator.frame(frame).unwrap(), [0, 0, 0, 0]);
    }

    #[test]
    fn byte_access_is_bounds_checked() {
        let mut allocator = FrameAllocator::new(2, 8).unwrap();
        assert_eq!(allocator.write(0, 3, 0xAB), Some(()));
        assert_eq!(allocator.read(0, 3), Some(0xAB));
        assert_eq!(allocator.read(0, 8), None);
        assert_eq!(allocator.read(2, 0), None);
        assert_eq!(allocator.write(1, 8, 0), None);
    }

    #[test]
    fn free_frames_lists_ascending() {
        let mut allocator = FrameAllocator::new(4, 16).unwrap();
        allocator.acquire().unwrap();
        allocator.acquire().unwrap();
        allocator.release(0);
        assert_eq!(allocator.free_frames(), [0, 2, 3]);
    }
}
