//! Frame placement policies.

use super::CoreMapEntry;
use crate::error::Error;

/// A placement policy choosing which free frame satisfies an acquire.
pub trait PlacementAlgorithm: Default {
    /// Returns the frame number to allocate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfFrames`] if no free frame exists.
    fn place(&mut self, core_map: &[CoreMapEntry]) -> Result<usize, Error>;
}

/// First-fit: the lowest-numbered free frame wins. Deterministic, so a
/// batch's page-to-frame assignment is reproducible run to run.
#[derive(Default)]
pub struct FirstFit;

impl PlacementAlgorithm for FirstFit {
    fn place(&mut self, core_map: &[CoreMapEntry]) -> Result<usize, Error> {
        core_map
            .iter()
            .position(|entry| !entry.allocated())
            .ok_or(Error::OutOfFrames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fills the coremap entries in `range` to indicate they are allocated.
    fn fill_coremap_range(core_map: &mut [CoreMapEntry], range: core::ops::Range<usize>) {
        for i in range {
            assert!(!core_map[i].allocated());
            core_map[i] = core_map[i].with_allocated(true);
        }
    }

    #[test]
    fn first_fit_picks_lowest_free_frame() {
        let mut core_map = [CoreMapEntry::default(); 8];
        fill_coremap_range(&mut core_map, 0..3);
        fill_coremap_range(&mut core_map, 5..6);

        let mut algorithm = FirstFit;
        assert!(matches!(algorithm.place(&core_map), Ok(3)));

        fill_coremap_range(&mut core_map, 3..5);
        assert!(matches!(algorithm.place(&core_map), Ok(6)));
    }

    #[test]
    fn first_fit_fails_on_full_map() {
        let mut core_map = [CoreMapEntry::default(); 4];
        fill_coremap_range(&mut core_map, 0..4);

        let mut algorithm = FirstFit;
        assert!(matches!(algorithm.place(&core_map), Err(Error::OutOfFrames)));
    }
}
