pub mod frame_allocator;
pub mod page_table;

use crate::error::{Error, Result};

/// Physical-memory geometry taken from the command line.
#[derive(Clone, Copy, Debug)]
pub struct MemoryParams {
    pub physical_size: usize,
    pub logical_addr_bits: usize,
    pub page_size: usize,
}

impl MemoryParams {
    pub fn new(physical_size: usize, logical_addr_bits: usize, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::Configuration("page size must be non-zero".into()));
        }
        if physical_size < page_size {
            return Err(Error::Configuration(format!(
                "physical memory ({physical_size} bytes) holds no complete {page_size}-byte frame"
            )));
        }
        Ok(MemoryParams {
            physical_size,
            logical_addr_bits,
            page_size,
        })
    }

    /// Number of frames the physical memory holds. A trailing partial
    /// frame is unusable and not counted.
    pub fn num_frames(&self) -> usize {
        self.physical_size / self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_count_truncates() {
        assert_eq!(MemoryParams::new(64, 8, 16).unwrap().num_frames(), 4);
        assert_eq!(MemoryParams::new(65, 8, 16).unwrap().num_frames(), 4);
    }

    #[test]
    fn rejects_zero_page_size() {
        assert!(MemoryParams::new(64, 8, 0).is_err());
    }

    #[test]
    fn rejects_memory_smaller_than_one_frame() {
        assert!(MemoryParams::new(8, 8, 16).is_err());
    }
}
