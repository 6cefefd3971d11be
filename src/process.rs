use crate::descriptor::Descriptor;
use crate::mem::page_table::PageTableEntry;
use std::path::PathBuf;

pub type Pid = u8;

/// A process image plus, once built, its page table.
///
/// Owns its byte buffers and page table exclusively; dropping the process
/// frees them, but the frames it holds must be released through the
/// allocator first (the registry does this).
pub struct Process {
    pub pid: Pid,
    pub source: PathBuf,
    pub code: Vec<u8>,
    pub data: Vec<u8>,
    pub page_table: Vec<PageTableEntry>,
}

impl Process {
    /// Wraps a parsed descriptor. The page table starts empty and is
    /// populated by [`crate::mem::page_table::build`].
    pub fn from_descriptor(descriptor: Descriptor, source: PathBuf) -> Self {
        Process {
            pid: descriptor.pid,
            source,
            code: descriptor.code,
            data: descriptor.data,
            page_table: Vec::new(),
        }
    }

    /// Combined code + data size in bytes.
    pub fn size(&self) -> usize {
        self.code.len() + self.data.len()
    }

    pub fn num_pages(&self) -> usize {
        self.page_table.len()
    }

    /// Byte `index` of the logical code-then-data stream, `None` past the
    /// end of the process image.
    pub fn stream_byte(&self, index: usize) -> Option<u8> {
        if index < self.code.len() {
            Some(self.code[index])
        } else {
            self.data.get(index - self.code.len()).copied()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn process(code: &[u8], data: &[u8]) -> Process {
        Process::from_descriptor(
            Descriptor {
                pid: 1,
                code: code.to_vec(),
                data: data.to_vec(),
            },
            PathBuf::from("p1.bin"),
        )
    }

    #[test]
    fn size_spans_both_segments() {
        assert_eq!(process(&[0; 10], &[0; 22]).size(), 32);
        assert_eq!(process(&[], &[]).size(), 0);
    }

    #[test]
    fn stream_crosses_segment_boundary() {
        let p = process(&[1, 2], &[3, 4]);
        assert_eq!(p.stream_byte(0), Some(1));
        assert_eq!(p.stream_byte(1), Some(2));
        assert_eq!(p.stream_byte(2), Some(3));
        assert_eq!(p.stream_byte(3), Some(4));
        assert_eq!(p.stream_byte(4), None);
    }
}
