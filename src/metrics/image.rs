use crate::TileCycleId;

/// Per-cycle image contrast bounds for one tile, per imaging channel.
#[derive(Clone, Debug)]
pub struct ImageMetric {
    id: TileCycleId,
    min_contrast: Vec<u16>,
    max_contrast: Vec<u16>,
}

impl ImageMetric {
    #[must_use]
    pub fn new(id: TileCycleId, min_contrast: Vec<u16>, max_contrast: Vec<u16>) -> Self {
        Self {
            id,
            min_contrast,
            max_contrast,
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

    #[inline]
    #[must_use]
    pub fn min_contrast(&self) -> &[u16] {
        &self.min_contrast
    }

    #[inline]
    #[must_use]
    pub fn max_contrast(&self) -> &[u16] {
        &self.max_contrast
    }
}
