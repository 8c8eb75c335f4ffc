use crate::TileCycleId;

/// Per-cycle quality-score histogram for one tile.
///
/// The histogram is either one bin per Q-score (unbinned runs) or one bin per
/// instrument-defined score range; bin definitions travel with the owning
/// [`QualityMetricSet`] because they are uniform across the stream.
#[derive(Clone, Debug)]
pub struct QualityMetric {
    id: TileCycleId,
    histogram: Vec<u32>,
}

impl QualityMetric {
    #[must_use]
    pub fn new(id: TileCycleId, histogram: Vec<u32>) -> Self {
        Self { id, histogram }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> TileCycleId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn cycle(&self) -> u16 {
        self.id.cycle()
    }

    #[inline]
    #[must_use]
    pub fn histogram(&self) -> &[u32] {
        &self.histogram
    }

    /// Percent of clusters whose score lands in bin `bin` or above.
    ///
    /// An all-zero histogram reports 0.0: no signal is a legitimate zero,
    /// distinct from "stream absent" which stays NaN in the table.
    #[must_use]
    pub fn percent_over(&self, bin: usize) -> f32 {
        let total: u64 = self.histogram.iter().map(|&c| u64::from(c)).sum();
        if total == 0 {
            return 0.0;
        }
        let over: u64 = self
            .histogram
            .iter()
            .skip(bin)
            .map(|&c| u64::from(c))
            .sum();
        (100.0 * over as f64 / total as f64) as f32
    }
}

/// One quality-score bin definition: the score range it covers and the
/// representative value reported for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QscoreBin {
    pub lower: u8,
    pub upper: u8,
    pub value: u8,
}

impl QscoreBin {
    #[must_use]
    pub fn new(lower: u8, upper: u8, value: u8) -> Self {
        Self {
            lower,
            upper,
            value,
        }
    }
}

/// The quality stream: bin definitions plus the per-(tile, cycle) records.
///
/// An empty `bins` list means the run is unbinned, with one histogram slot
/// per Q-score.
#[derive(Clone, Debug, Default)]
pub struct QualityMetricSet {
    pub bins: Vec<QscoreBin>,
    pub records: Vec<QualityMetric>,
}

impl QualityMetricSet {
    #[must_use]
    pub fn unbinned(records: Vec<QualityMetric>) -> Self {
        Self {
            bins: Vec::new(),
            records,
        }
    }

    #[must_use]
    pub fn binned(bins: Vec<QscoreBin>, records: Vec<QualityMetric>) -> Self {
        Self { bins, records }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
