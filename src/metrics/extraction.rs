use crate::TileCycleId;

/// Per-cycle extraction signal for one tile: focus score and maximum
/// intensity per imaging channel.
///
/// The channel count is a property of the instrument (two- or four-channel
/// chemistry) and is uniform within a run.
#[derive(Clone, Debug)]
pub struct ExtractionMetric {
    id: TileCycleId,
    focus: Vec<f32>,
    max_intensity: Vec<u16>,
}

impl ExtractionMetric {
    #[must_use]
    pub fn new(id: TileCycleId, focus: Vec<f32>, max_intensity: Vec<u16>) -> Self {
        Self {
            id,
            focus,
            max_intensity,
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

    /// Focus score (full width half max) per channel
    #[inline]
    #[must_use]
    pub fn focus(&self) -> &[f32] {
        &self.focus
    }

    /// Maximum raw intensity per channel
    #[inline]
    #[must_use]
    pub fn max_intensity(&self) -> &[u16] {
        &self.max_intensity
    }
}
