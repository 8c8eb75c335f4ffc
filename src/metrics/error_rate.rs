use crate::TileCycleId;

/// Per-cycle PhiX alignment error rate for one tile.
#[derive(Clone, Copy, Debug)]
pub struct ErrorMetric {
    id: TileCycleId,
    error_rate: f32,
}

impl ErrorMetric {
    #[must_use]
    pub fn new(id: TileCycleId, error_rate: f32) -> Self {
        Self { id, error_rate }
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

    /// Error rate in percent
    #[inline]
    #[must_use]
    pub fn error_rate(&self) -> f32 {
        self.error_rate
    }
}
