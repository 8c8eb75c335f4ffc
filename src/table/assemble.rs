//! Table assembly: row indexing and the ordered population passes
//!
//! Assembly is a two-phase batch computation over fully decoded metric
//! collections. Phase one walks the five per-cycle streams in a fixed kind
//! precedence and assigns every distinct composite identity a dense,
//! zero-based row number in first-encounter order; it also validates every
//! record's cycle against the run's read structure, so population can rely
//! on the plan completely. Phase two allocates the NaN-filled buffer and
//! overlays one projection pass per kind, in the same precedence, using only
//! the phase-one row numbers. Tile-level metrics are overlaid last and never
//! create rows.
//!
//! Row cardinality and row order both come from the single phase-one map, so
//! they cannot diverge.

use std::collections::HashMap;

use crate::metrics::{RunMetrics, TileMetricSet};
use crate::qscore::index_for_q_value;
use crate::run::{CycleToReadMap, ReadSegment};
use crate::table::ImagingTable;
use crate::table::columns::{ColumnDescriptor, ColumnLayout};
use crate::table::populate::{
    RowWriter, populate_corrected, populate_error, populate_extraction, populate_identity,
    populate_image, populate_quality, populate_tile,
};
use crate::{Result, TileCycleId};

/// Thresholds whose histogram bin positions are resolved once per assembly
const Q20: u8 = 20;
const Q30: u8 = 30;

/// Phase-one output: the dense row numbering and, per kind, the row of each
/// record in stream order.
///
/// The id → row map is owned here exclusively; population never resolves ids
/// itself, it replays the precomputed per-kind row vectors.
pub(crate) struct RowPlan {
    pub(crate) extraction: Vec<usize>,
    pub(crate) error: Vec<usize>,
    pub(crate) image: Vec<usize>,
    pub(crate) corrected: Vec<usize>,
    pub(crate) quality: Vec<usize>,
    pub(crate) index: HashMap<TileCycleId, usize>,
    pub(crate) row_count: usize,
}

fn resolve_or_create(
    index: &mut HashMap<TileCycleId, usize>,
    cycle_map: &CycleToReadMap,
    id: TileCycleId,
) -> Result<usize> {
    // Validate the cycle even for already-known ids: an undeclared cycle is
    // fatal wherever it appears.
    cycle_map.lookup(id.cycle())?;
    let next = index.len();
    Ok(*index.entry(id).or_insert(next))
}

/// Assign row numbers across all per-cycle streams in kind precedence.
pub(crate) fn plan_rows(metrics: &RunMetrics, cycle_map: &CycleToReadMap) -> Result<RowPlan> {
    let mut index = HashMap::new();

    let extraction = metrics
        .extraction
        .iter()
        .map(|m| resolve_or_create(&mut index, cycle_map, m.id()))
        .collect::<Result<Vec<_>>>()?;
    let error = metrics
        .error
        .iter()
        .map(|m| resolve_or_create(&mut index, cycle_map, m.id()))
        .collect::<Result<Vec<_>>>()?;
    let image = metrics
        .image
        .iter()
        .map(|m| resolve_or_create(&mut index, cycle_map, m.id()))
        .collect::<Result<Vec<_>>>()?;
    let corrected = metrics
        .corrected
        .iter()
        .map(|m| resolve_or_create(&mut index, cycle_map, m.id()))
        .collect::<Result<Vec<_>>>()?;
    let quality = metrics
        .quality
        .records
        .iter()
        .map(|m| resolve_or_create(&mut index, cycle_map, m.id()))
        .collect::<Result<Vec<_>>>()?;

    let row_count = index.len();
    Ok(RowPlan {
        extraction,
        error,
        image,
        corrected,
        quality,
        index,
        row_count,
    })
}

/// Allocate the row-major buffer: every cell NaN, then the first column of
/// every row zeroed as the identity default.
pub(crate) fn new_buffer(row_count: usize, layout: &ColumnLayout) -> Vec<f32> {
    let stride = layout.stride();
    let mut data = vec![f32::NAN; row_count * stride];
    if stride > 0 {
        for row in 0..row_count {
            data[row * stride] = 0.0;
        }
    }
    data
}

/// One identity write per row, from the id itself.
pub(crate) fn identity_pass(
    plan: &RowPlan,
    cycle_map: &CycleToReadMap,
    layout: &ColumnLayout,
    data: &mut [f32],
) -> Result<()> {
    let stride = layout.stride();
    if stride == 0 {
        return Ok(());
    }
    for (&id, &row) in &plan.index {
        let read = cycle_map.lookup(id.cycle())?;
        let mut writer = RowWriter::new(&mut data[row * stride..(row + 1) * stride], layout);
        populate_identity(id, read, &mut writer)?;
    }
    Ok(())
}

/// Apply one kind's records to the rows owned by a buffer chunk.
///
/// `data` holds the rows `row_base..row_base + data.len() / stride`; records
/// planned outside that range are left for the chunk that owns them. The
/// serial passes call this with the whole buffer and `row_base == 0`.
pub(crate) fn apply_records<M>(
    records: &[M],
    rows: &[usize],
    layout: &ColumnLayout,
    data: &mut [f32],
    row_base: usize,
    mut write: impl FnMut(&M, &mut RowWriter<'_>) -> Result<()>,
) -> Result<()> {
    let stride = layout.stride();
    if stride == 0 {
        return Ok(());
    }
    let chunk_rows = data.len() / stride;
    for (record, &row) in records.iter().zip(rows) {
        if row < row_base || row >= row_base + chunk_rows {
            continue;
        }
        let local = row - row_base;
        let mut writer = RowWriter::new(&mut data[local * stride..(local + 1) * stride], layout);
        write(record, &mut writer)?;
    }
    Ok(())
}

/// Tile-level overlay: update rows that already exist, for tiles the
/// tile-level stream actually covers. A missing tile is expected (stream
/// cadences differ) and leaves the tile columns NaN.
pub(crate) fn overlay_tiles(
    plan: &RowPlan,
    tiles: &TileMetricSet,
    cycle_map: &CycleToReadMap,
    layout: &ColumnLayout,
    data: &mut [f32],
) -> Result<()> {
    let stride = layout.stride();
    if stride == 0 || tiles.is_empty() {
        return Ok(());
    }
    for (&id, &row) in &plan.index {
        let Some(metric) = tiles.get(id.tile_id()) else {
            continue;
        };
        let read = cycle_map.lookup(id.cycle())?;
        let mut writer = RowWriter::new(&mut data[row * stride..(row + 1) * stride], layout);
        populate_tile(metric, read.number, &mut writer)?;
    }
    Ok(())
}

/// Assemble the imaging table from a run's metric streams.
///
/// Inputs are consumed read-only: the decoded metric collections, the
/// ordered column descriptor list selected upstream, and the run's ordered
/// read segments. Any out-of-range cycle, unknown column id, or internal
/// bounds violation aborts the whole build; no partial table is produced.
pub fn assemble(
    metrics: &RunMetrics,
    columns: &[ColumnDescriptor],
    reads: &[ReadSegment],
) -> Result<ImagingTable> {
    let layout = ColumnLayout::compile(columns)?;
    let cycle_map = CycleToReadMap::build(reads);
    let q20_idx = index_for_q_value(&metrics.quality, Q20);
    let q30_idx = index_for_q_value(&metrics.quality, Q30);

    let plan = plan_rows(metrics, &cycle_map)?;
    let mut data = new_buffer(plan.row_count, &layout);

    identity_pass(&plan, &cycle_map, &layout, &mut data)?;

    apply_records(
        &metrics.extraction,
        &plan.extraction,
        &layout,
        &mut data,
        0,
        |m, w| populate_extraction(m, w),
    )?;
    apply_records(&metrics.error, &plan.error, &layout, &mut data, 0, |m, w| {
        populate_error(m, w)
    })?;
    apply_records(&metrics.image, &plan.image, &layout, &mut data, 0, |m, w| {
        populate_image(m, w)
    })?;
    apply_records(
        &metrics.corrected,
        &plan.corrected,
        &layout,
        &mut data,
        0,
        |m, w| populate_corrected(m, w),
    )?;
    apply_records(
        &metrics.quality.records,
        &plan.quality,
        &layout,
        &mut data,
        0,
        |m, w| populate_quality(m, q20_idx, q30_idx, w),
    )?;

    overlay_tiles(&plan, &metrics.tile, &cycle_map, &layout, &mut data)?;

    Ok(ImagingTable::new(
        plan.row_count,
        columns.to_vec(),
        layout,
        data,
    ))
}
