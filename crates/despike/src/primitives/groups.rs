//! Grouping of far-from-background indices into spike candidates.
//!
//! ## Purpose
//!
//! This module walks the ascending list of "far" indices and yields maximal
//! runs of consecutive indices. Each run is one candidate spike.
//!
//! ## Design notes
//!
//! * **Explicit states**: The walk is a small finite-state machine
//!   (`Scanning` → `Advancing` → `Finished`) instead of ad hoc cursor arithmetic.
//! * **Lazy**: Groups are produced one at a time through `Iterator`.
//! * **Borrowing**: The detector borrows the far set; it never copies it.
//!
//! ## Invariants
//!
//! * Every yielded group is index-contiguous and a subset of the far set.
//! * Groups are maximal and yielded in ascending order.
//! * Every far index belongs to exactly one group.
//!
//! ## Non-goals
//!
//! * This module does not decide whether a group is narrow enough to patch.

// External dependencies
use core::iter::FusedIterator;
use core::ops::RangeInclusive;

// ============================================================================
// Spike Group
// ============================================================================

/// A maximal run of consecutive far indices `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpikeGroup {
    /// First index of the run (`I1`).
    pub start: usize,

    /// Last index of the run (`I2`), inclusive.
    pub end: usize,
}

impl SpikeGroup {
    /// Create a group spanning `[start, end]`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "SpikeGroup::new: start must not exceed end");
        Self { start, end }
    }

    /// Distance between the last and first index (`I2 - I1`).
    #[inline]
    pub fn span(&self) -> usize {
        self.end - self.start
    }

    /// Number of samples in the group.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.span() + 1
    }

    /// Whether the group is narrow enough to be a spike rather than a real feature.
    #[inline]
    pub fn is_spike(&self, length: usize) -> bool {
        self.span() < length
    }

    /// Indices covered by the group.
    #[inline]
    pub fn indices(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

// ============================================================================
// Detector
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    // Extending the group that starts at `far[cursor]`.
    Scanning { cursor: usize },

    // A group was emitted; `cursor` is the first index past it.
    Advancing { cursor: usize },

    Finished,
}

/// Iterator over the spike groups of an ascending far-index list.
#[derive(Debug, Clone)]
pub struct SpikeGroups<'a> {
    far: &'a [usize],
    state: ScanState,
}

impl<'a> SpikeGroups<'a> {
    /// Start scanning `far`, which must be sorted in strictly ascending order.
    pub fn new(far: &'a [usize]) -> Self {
        debug_assert!(
            far.windows(2).all(|w| w[0] < w[1]),
            "SpikeGroups::new: far indices must be strictly ascending"
        );

        let state = if far.is_empty() {
            ScanState::Finished
        } else {
            ScanState::Scanning { cursor: 0 }
        };

        Self { far, state }
    }
}

impl Iterator for SpikeGroups<'_> {
    type Item = SpikeGroup;

    fn next(&mut self) -> Option<SpikeGroup> {
        loop {
            match self.state {
                ScanState::Scanning { cursor } => {
                    let start = self.far[cursor];
                    let mut i = cursor + 1;
                    while i < self.far.len() && self.far[i] <= self.far[i - 1] + 1 {
                        i += 1;
                    }

                    self.state = ScanState::Advancing { cursor: i };
                    return Some(SpikeGroup::new(start, self.far[i - 1]));
                }
                ScanState::Advancing { cursor } => {
                    self.state = if cursor < self.far.len() {
                        ScanState::Scanning { cursor }
                    } else {
                        ScanState::Finished
                    };
                }
                ScanState::Finished => return None,
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            ScanState::Scanning { cursor } | ScanState::Advancing { cursor } => {
                let remaining = self.far.len() - cursor;
                (usize::from(remaining > 0), Some(remaining))
            }
            ScanState::Finished => (0, Some(0)),
        }
    }
}

impl FusedIterator for SpikeGroups<'_> {}
