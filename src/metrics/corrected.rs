use crate::TileCycleId;

/// Per-cycle corrected-intensity/base-call data for one tile.
#[derive(Clone, Copy, Debug)]
pub struct CorrectedIntensityMetric {
    id: TileCycleId,
    percent_base: [f32; 4],
    signal_to_noise: f32,
}

impl CorrectedIntensityMetric {
    #[must_use]
    pub fn new(id: TileCycleId, percent_base: [f32; 4], signal_to_noise: f32) -> Self {
        Self {
            id,
            percent_base,
            signal_to_noise,
        }
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

    /// Percent of calls per base, in A, C, G, T order
    #[inline]
    #[must_use]
    pub fn percent_base(&self) -> &[f32; 4] {
        &self.percent_base
    }

    #[inline]
    #[must_use]
    pub fn signal_to_noise(&self) -> f32 {
        self.signal_to_noise
    }
}
