//! Run read structure and the cycle-to-read map
//!
//! A run declares an ordered list of read segments (read 1, index reads,
//! read 2, ...), each covering a span of absolute cycles. Per-cycle metrics
//! carry absolute cycle numbers; the table reports read number and
//! cycle-within-read, so every populate pass needs the translation in O(1).

use crate::{AssemblyError, Result};

/// One read segment of the run structure, externally parsed from run metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadSegment {
    /// Read number as reported by the instrument (1-based)
    pub number: u16,
    /// Number of cycles this read spans
    pub cycle_count: u16,
}

impl ReadSegment {
    #[must_use]
    pub fn new(number: u16, cycle_count: u16) -> Self {
        Self {
            number,
            cycle_count,
        }
    }
}

/// Position of one absolute cycle within the read structure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadCycle {
    /// Read number the cycle belongs to
    pub number: u16,
    /// 1-based cycle index within that read
    pub cycle_within_read: u16,
}

/// Lookup from absolute cycle number to (read, cycle-within-read).
///
/// Built once per run; one entry per declared cycle, with 1-based cycle `c`
/// at index `c - 1`.
#[derive(Clone, Debug, Default)]
pub struct CycleToReadMap {
    entries: Vec<ReadCycle>,
}

impl CycleToReadMap {
    /// Expand ordered read segments into the per-cycle map.
    ///
    /// The total map length is the sum of the segment cycle counts; that sum
    /// is the run's declared cycle count.
    #[must_use]
    pub fn build(reads: &[ReadSegment]) -> Self {
        let total = reads.iter().map(|r| usize::from(r.cycle_count)).sum();
        let mut entries = Vec::with_capacity(total);
        for read in reads {
            for within in 1..=read.cycle_count {
                entries.push(ReadCycle {
                    number: read.number,
                    cycle_within_read: within,
                });
            }
        }
        Self { entries }
    }

    /// Translate an absolute (1-based) cycle number.
    ///
    /// A cycle outside the declared range is a structural mismatch between
    /// the metric data and the run metadata, and fails the whole table build.
    pub fn lookup(&self, cycle: u16) -> Result<ReadCycle> {
        if cycle == 0 || usize::from(cycle) > self.entries.len() {
            return Err(AssemblyError::CycleOutOfRange {
                cycle,
                total_cycles: self.entries.len(),
            }
            .into());
        }
        Ok(self.entries[usize::from(cycle) - 1])
    }

    /// Total number of cycles declared by the run reads
    #[must_use]
    pub fn total_cycles(&self) -> usize {
        self.entries.len()
    }
}
