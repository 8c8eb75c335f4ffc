//! Parallel table assembly
//!
//! Row-number assignment is a function of cross-pass first-encounter order,
//! so the five kind passes themselves cannot be reordered or interleaved.
//! What can run concurrently is the population within them: once phase one
//! has fixed every record's row, the buffer partitions into disjoint
//! contiguous row ranges and each thread applies all five kinds to the rows
//! it owns. No cell is ever shared between threads, and the result is
//! bit-identical to the serial path.

use std::thread;

use crate::Result;
use crate::metrics::RunMetrics;
use crate::qscore::index_for_q_value;
use crate::run::{CycleToReadMap, ReadSegment};
use crate::table::assemble::{
    apply_records, identity_pass, new_buffer, overlay_tiles, plan_rows,
};
use crate::table::columns::{ColumnDescriptor, ColumnLayout};
use crate::table::populate::{
    populate_corrected, populate_error, populate_extraction, populate_image, populate_quality,
};
use crate::table::ImagingTable;

/// Assemble the imaging table with the value passes spread over threads.
///
/// `num_threads == 0` selects the machine's CPU count; any other value is
/// capped at the CPU count, as elsewhere in this stack. Planning, the
/// identity pass and the tile overlay stay serial; they are small next to
/// the per-record value writes.
pub fn assemble_parallel(
    metrics: &RunMetrics,
    columns: &[ColumnDescriptor],
    reads: &[ReadSegment],
    num_threads: usize,
) -> Result<ImagingTable> {
    let layout = ColumnLayout::compile(columns)?;
    let cycle_map = CycleToReadMap::build(reads);
    let q20_idx = index_for_q_value(&metrics.quality, 20);
    let q30_idx = index_for_q_value(&metrics.quality, 30);

    let plan = plan_rows(metrics, &cycle_map)?;
    let mut data = new_buffer(plan.row_count, &layout);

    identity_pass(&plan, &cycle_map, &layout, &mut data)?;

    let stride = layout.stride();
    if stride > 0 && plan.row_count > 0 {
        let num_threads = if num_threads == 0 {
            num_cpus::get()
        } else {
            num_threads.min(num_cpus::get())
        };
        let rows_per_thread = plan.row_count.div_ceil(num_threads);

        let layout_ref = &layout;
        let plan_ref = &plan;
        thread::scope(|s| -> Result<()> {
            let mut handles = Vec::new();
            for (thread_id, chunk) in data.chunks_mut(rows_per_thread * stride).enumerate() {
                let row_base = thread_id * rows_per_thread;
                let handle = s.spawn(move || -> Result<()> {
                    apply_records(
                        &metrics.extraction,
                        &plan_ref.extraction,
                        layout_ref,
                        chunk,
                        row_base,
                        |m, w| populate_extraction(m, w),
                    )?;
                    apply_records(
                        &metrics.error,
                        &plan_ref.error,
                        layout_ref,
                        chunk,
                        row_base,
                        |m, w| populate_error(m, w),
                    )?;
                    apply_records(
                        &metrics.image,
                        &plan_ref.image,
                        layout_ref,
                        chunk,
                        row_base,
                        |m, w| populate_image(m, w),
                    )?;
                    apply_records(
                        &metrics.corrected,
                        &plan_ref.corrected,
                        layout_ref,
                        chunk,
                        row_base,
                        |m, w| populate_corrected(m, w),
                    )?;
                    apply_records(
                        &metrics.quality.records,
                        &plan_ref.quality,
                        layout_ref,
                        chunk,
                        row_base,
                        |m, w| populate_quality(m, q20_idx, q30_idx, w),
                    )?;
                    Ok(())
                });
                handles.push(handle);
            }
            for handle in handles {
                handle.join().unwrap()?;
            }
            Ok(())
        })?;
    }

    overlay_tiles(&plan, &metrics.tile, &cycle_map, &layout, &mut data)?;

    Ok(ImagingTable::new(
        plan.row_count,
        columns.to_vec(),
        layout,
        data,
    ))
}
