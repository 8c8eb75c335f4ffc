//! Per-kind projections of metric records into a row's cells
//!
//! Each function here writes only the columns its metric kind owns and
//! leaves every other cell untouched, so earlier passes' writes (and the NaN
//! sentinel) survive later passes. All addressing funnels through
//! [`RowWriter`], the single bounds authority: a column absent from the
//! layout is silently skipped, while an offset that would escape the row's
//! slice is a structural defect and fails the whole build.

use crate::metrics::{
    CorrectedIntensityMetric, ErrorMetric, ExtractionMetric, ImageMetric, QualityMetric,
    TileMetric,
};
use crate::run::ReadCycle;
use crate::{AssemblyError, ColumnId, ColumnLayout, Result, TileCycleId};

/// Write access to exactly one row of the table buffer.
pub(crate) struct RowWriter<'a> {
    cells: &'a mut [f32],
    layout: &'a ColumnLayout,
}

impl<'a> RowWriter<'a> {
    /// The slice must be exactly one stride long.
    pub(crate) fn new(cells: &'a mut [f32], layout: &'a ColumnLayout) -> Self {
        debug_assert_eq!(cells.len(), layout.stride());
        Self { cells, layout }
    }

    /// Write a scalar column
    pub(crate) fn set(&mut self, id: ColumnId, value: f32) -> Result<()> {
        self.set_sub(id, 0, value)
    }

    /// Write sub-column `sub` of a multi-valued column.
    ///
    /// A column missing from the layout is a no-op. A `sub` outside the
    /// column's span, or a resolved offset outside the row, is refused.
    pub(crate) fn set_sub(&mut self, id: ColumnId, sub: usize, value: f32) -> Result<()> {
        let Some(span) = self.layout.span(id) else {
            return Ok(());
        };
        let offset = span.offset() + sub;
        if sub >= span.width() || offset >= self.cells.len() {
            return Err(AssemblyError::CellOutOfBounds {
                id,
                sub,
                offset,
                stride: self.cells.len(),
            }
            .into());
        }
        self.cells[offset] = value;
        Ok(())
    }
}

/// Identity write: the columns describing which observation a row is.
///
/// Runs exactly once per row; every per-cycle kind defines the same five
/// identity columns, so the write is derived from the id itself rather than
/// from any one kind's record.
pub(crate) fn populate_identity(
    id: TileCycleId,
    read: ReadCycle,
    writer: &mut RowWriter<'_>,
) -> Result<()> {
    writer.set(ColumnId::Lane, f32::from(id.lane()))?;
    writer.set(ColumnId::Tile, id.tile() as f32)?;
    writer.set(ColumnId::Cycle, f32::from(id.cycle()))?;
    writer.set(ColumnId::Read, f32::from(read.number))?;
    writer.set(ColumnId::CycleWithinRead, f32::from(read.cycle_within_read))
}

pub(crate) fn populate_extraction(
    metric: &ExtractionMetric,
    writer: &mut RowWriter<'_>,
) -> Result<()> {
    for (channel, &focus) in metric.focus().iter().enumerate() {
        writer.set_sub(ColumnId::Focus, channel, focus)?;
    }
    for (channel, &intensity) in metric.max_intensity().iter().enumerate() {
        writer.set_sub(ColumnId::MaxIntensity, channel, f32::from(intensity))?;
    }
    Ok(())
}

pub(crate) fn populate_error(metric: &ErrorMetric, writer: &mut RowWriter<'_>) -> Result<()> {
    writer.set(ColumnId::ErrorRate, metric.error_rate())
}

pub(crate) fn populate_image(metric: &ImageMetric, writer: &mut RowWriter<'_>) -> Result<()> {
    for (channel, &contrast) in metric.min_contrast().iter().enumerate() {
        writer.set_sub(ColumnId::MinContrast, channel, f32::from(contrast))?;
    }
    for (channel, &contrast) in metric.max_contrast().iter().enumerate() {
        writer.set_sub(ColumnId::MaxContrast, channel, f32::from(contrast))?;
    }
    Ok(())
}

pub(crate) fn populate_corrected(
    metric: &CorrectedIntensityMetric,
    writer: &mut RowWriter<'_>,
) -> Result<()> {
    for (base, &percent) in metric.percent_base().iter().enumerate() {
        writer.set_sub(ColumnId::PercentBase, base, percent)?;
    }
    writer.set(ColumnId::SignalToNoise, metric.signal_to_noise())
}

/// Quality value-write: the two derived columns come from the Q20/Q30 bin
/// positions resolved once per assembly, not per record.
pub(crate) fn populate_quality(
    metric: &QualityMetric,
    q20_idx: Option<usize>,
    q30_idx: Option<usize>,
    writer: &mut RowWriter<'_>,
) -> Result<()> {
    if let Some(idx) = q20_idx {
        writer.set(ColumnId::PercentQ20, metric.percent_over(idx))?;
    }
    if let Some(idx) = q30_idx {
        writer.set(ColumnId::PercentQ30, metric.percent_over(idx))?;
    }
    Ok(())
}

/// Tile-level overlay write, using the row's already-resolved read number to
/// pick the per-read alignment slice.
pub(crate) fn populate_tile(
    metric: &TileMetric,
    read_number: u16,
    writer: &mut RowWriter<'_>,
) -> Result<()> {
    writer.set(ColumnId::ClusterDensity, metric.cluster_density())?;
    writer.set(ColumnId::ClusterDensityPf, metric.cluster_density_pf())?;
    writer.set(ColumnId::ClusterCount, metric.cluster_count())?;
    writer.set(ColumnId::ClusterCountPf, metric.cluster_count_pf())?;
    if let Some(read) = metric.read_metric(read_number) {
        writer.set(ColumnId::PercentAligned, read.percent_aligned)?;
    }
    Ok(())
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::table::columns::schema;

    fn layout(columns: &[(ColumnId, usize)]) -> ColumnLayout {
        ColumnLayout::compile(&schema(columns)).unwrap()
    }

    #[test]
    fn test_absent_column_is_never_written() {
        let layout = layout(&[(ColumnId::Lane, 1)]);
        let mut cells = vec![f32::NAN; layout.stride()];
        let mut writer = RowWriter::new(&mut cells, &layout);

        let metric = ErrorMetric::new(TileCycleId::new(1, 1101, 1), 0.35);
        populate_error(&metric, &mut writer).unwrap();
        assert!(cells[0].is_nan());
    }

    #[test]
    fn test_scalar_write_lands_at_span_offset() {
        let layout = layout(&[(ColumnId::Lane, 1), (ColumnId::ErrorRate, 1)]);
        let mut cells = vec![f32::NAN; layout.stride()];
        let mut writer = RowWriter::new(&mut cells, &layout);

        let metric = ErrorMetric::new(TileCycleId::new(1, 1101, 1), 0.35);
        populate_error(&metric, &mut writer).unwrap();
        assert!(cells[0].is_nan());
        assert!((cells[1] - 0.35).abs() < 1e-6);
    }

    #[test]
    fn test_sub_column_writes() {
        let layout = layout(&[(ColumnId::PercentBase, 4), (ColumnId::SignalToNoise, 1)]);
        let mut cells = vec![f32::NAN; layout.stride()];
        let mut writer = RowWriter::new(&mut cells, &layout);

        let metric = CorrectedIntensityMetric::new(
            TileCycleId::new(1, 1101, 1),
            [25.0, 25.5, 24.5, 25.0],
            9.4,
        );
        populate_corrected(&metric, &mut writer).unwrap();
        assert!((cells[0] - 25.0).abs() < 1e-6);
        assert!((cells[3] - 25.0).abs() < 1e-6);
        assert!((cells[4] - 9.4).abs() < 1e-6);
    }

    #[test]
    fn test_sub_past_declared_width_fails() {
        // Two focus channels declared, four supplied: structural mismatch
        let layout = layout(&[(ColumnId::Focus, 2), (ColumnId::ErrorRate, 1)]);
        let mut cells = vec![f32::NAN; layout.stride()];
        let mut writer = RowWriter::new(&mut cells, &layout);

        let metric = ExtractionMetric::new(
            TileCycleId::new(1, 1101, 1),
            vec![2.1, 2.2, 2.3, 2.4],
            vec![],
        );
        let err = populate_extraction(&metric, &mut writer).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::AssemblyError(AssemblyError::CellOutOfBounds { .. })
        ));
        // the in-range channels landed before the refusal
        assert!((cells[0] - 2.1).abs() < 1e-6);
        assert!((cells[1] - 2.2).abs() < 1e-6);
        assert!(cells[2].is_nan());
    }

    #[test]
    fn test_identity_write() {
        let layout = layout(&[
            (ColumnId::Lane, 1),
            (ColumnId::Tile, 1),
            (ColumnId::Cycle, 1),
            (ColumnId::Read, 1),
            (ColumnId::CycleWithinRead, 1),
        ]);
        let mut cells = vec![f32::NAN; layout.stride()];
        let mut writer = RowWriter::new(&mut cells, &layout);

        let id = TileCycleId::new(2, 1203, 7);
        let read = ReadCycle {
            number: 2,
            cycle_within_read: 2,
        };
        populate_identity(id, read, &mut writer).unwrap();
        assert_eq!(cells, vec![2.0, 1203.0, 7.0, 2.0, 2.0]);
    }

    #[test]
    fn test_quality_skips_unresolved_thresholds() {
        let layout = layout(&[(ColumnId::PercentQ20, 1), (ColumnId::PercentQ30, 1)]);
        let mut cells = vec![f32::NAN; layout.stride()];
        let mut writer = RowWriter::new(&mut cells, &layout);

        let metric = QualityMetric::new(TileCycleId::new(1, 1101, 1), vec![10, 90]);
        populate_quality(&metric, Some(1), None, &mut writer).unwrap();
        assert!((cells[0] - 90.0).abs() < 1e-6);
        assert!(cells[1].is_nan());
    }

    #[test]
    fn test_tile_write_uses_row_read_number() {
        let layout = layout(&[
            (ColumnId::ClusterDensity, 1),
            (ColumnId::PercentAligned, 1),
        ]);
        let mut cells = vec![f32::NAN; layout.stride()];
        let mut writer = RowWriter::new(&mut cells, &layout);

        let metric = TileMetric::new(
            crate::TileId::new(1, 1101),
            250.0,
            230.0,
            4000.0,
            3800.0,
            vec![crate::metrics::TileReadMetric::new(2, 97.0)],
        );
        populate_tile(&metric, 2, &mut writer).unwrap();
        assert!((cells[0] - 250.0).abs() < 1e-6);
        assert!((cells[1] - 97.0).abs() < 1e-6);

        // a read the tile never reported leaves the column alone
        cells = vec![f32::NAN; layout.stride()];
        let mut writer = RowWriter::new(&mut cells, &layout);
        populate_tile(&metric, 1, &mut writer).unwrap();
        assert!(cells[1].is_nan());
    }
}
