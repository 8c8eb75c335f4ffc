use std::collections::HashMap;

use crate::TileId;

/// Per-read slice of a tile-level metric.
///
/// Alignment statistics are reported per read; the overlay pass selects the
/// slice matching the row's resolved read number.
#[derive(Clone, Copy, Debug)]
pub struct TileReadMetric {
    pub read: u16,
    pub percent_aligned: f32,
}

impl TileReadMetric {
    #[must_use]
    pub fn new(read: u16, percent_aligned: f32) -> Self {
        Self {
            read,
            percent_aligned,
        }
    }
}

/// Tile-level summary metrics: densities and cluster counts for the whole
/// tile, plus the per-read alignment slices.
#[derive(Clone, Debug)]
pub struct TileMetric {
    id: TileId,
    cluster_density: f32,
    cluster_density_pf: f32,
    cluster_count: f32,
    cluster_count_pf: f32,
    reads: Vec<TileReadMetric>,
}

impl TileMetric {
    #[must_use]
    pub fn new(
        id: TileId,
        cluster_density: f32,
        cluster_density_pf: f32,
        cluster_count: f32,
        cluster_count_pf: f32,
        reads: Vec<TileReadMetric>,
    ) -> Self {
        Self {
            id,
            cluster_density,
            cluster_density_pf,
            cluster_count,
            cluster_count_pf,
            reads,
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> TileId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn cluster_density(&self) -> f32 {
        self.cluster_density
    }

    #[inline]
    #[must_use]
    pub fn cluster_density_pf(&self) -> f32 {
        self.cluster_density_pf
    }

    #[inline]
    #[must_use]
    pub fn cluster_count(&self) -> f32 {
        self.cluster_count
    }

    #[inline]
    #[must_use]
    pub fn cluster_count_pf(&self) -> f32 {
        self.cluster_count_pf
    }

    /// Alignment slice for the given read number, if reported
    #[must_use]
    pub fn read_metric(&self, read: u16) -> Option<&TileReadMetric> {
        self.reads.iter().find(|r| r.read == read)
    }
}

/// The tile-level metric stream, queryable by tile id.
///
/// Coverage need not match the per-cycle streams; a tile missing here is
/// expected and simply leaves the tile-specific columns unpopulated.
#[derive(Clone, Debug, Default)]
pub struct TileMetricSet {
    metrics: Vec<TileMetric>,
    index: HashMap<TileId, usize>,
}

impl TileMetricSet {
    pub fn push(&mut self, metric: TileMetric) {
        self.index.insert(metric.id(), self.metrics.len());
        self.metrics.push(metric);
    }

    #[must_use]
    pub fn get(&self, id: TileId) -> Option<&TileMetric> {
        self.index.get(&id).map(|&i| &self.metrics[i])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_lookup_by_tile_id() {
        let mut set = TileMetricSet::default();
        set.push(TileMetric::new(
            TileId::new(1, 1101),
            250.0,
            230.0,
            4000.0,
            3800.0,
            vec![TileReadMetric::new(1, 98.5)],
        ));

        let found = set.get(TileId::new(1, 1101)).unwrap();
        assert!((found.cluster_density() - 250.0).abs() < 1e-6);
        assert!(set.get(TileId::new(1, 1102)).is_none());
    }

    #[test]
    fn test_read_metric_selection() {
        let metric = TileMetric::new(
            TileId::new(1, 1101),
            0.0,
            0.0,
            0.0,
            0.0,
            vec![
                TileReadMetric::new(1, 98.5),
                TileReadMetric::new(2, 97.0),
            ],
        );
        assert!((metric.read_metric(2).unwrap().percent_aligned - 97.0).abs() < 1e-6);
        assert!(metric.read_metric(3).is_none());
    }
}
