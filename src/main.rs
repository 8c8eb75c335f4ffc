use std::io::{self, Write};

use anyhow::Result;
use seqtable::metrics::{
    ErrorMetric, ExtractionMetric, QualityMetric, QualityMetricSet, TileMetric, TileMetricSet,
    TileReadMetric,
};
use seqtable::{ColumnId, ReadSegment, RunMetrics, TileCycleId, TileId, assemble, schema};

/// Build a small synthetic run: two lanes, two tiles each, a 5-cycle read
/// followed by a 3-cycle read. The error stream stops after read 1 to show
/// missing values surviving as NaN.
fn synthetic_run() -> RunMetrics {
    let mut metrics = RunMetrics::default();
    let mut tiles = TileMetricSet::default();
    for lane in 1..=2u16 {
        for tile in [1101u32, 1102] {
            for cycle in 1..=8u16 {
                let id = TileCycleId::new(lane, tile, cycle);
                metrics.extraction.push(ExtractionMetric::new(
                    id,
                    vec![2.4 + 0.01 * f32::from(cycle); 4],
                    vec![1000 + 10 * cycle; 4],
                ));
                if cycle <= 5 {
                    metrics
                        .error
                        .push(ErrorMetric::new(id, 0.1 * f32::from(cycle)));
                }
                metrics
                    .quality
                    .records
                    .push(QualityMetric::new(id, vec![50, 150, 800]));
            }
            tiles.push(TileMetric::new(
                TileId::new(lane, tile),
                245.0,
                232.0,
                4096.0,
                3900.0,
                vec![
                    TileReadMetric::new(1, 98.2),
                    TileReadMetric::new(2, 96.7),
                ],
            ));
        }
    }
    metrics.quality = QualityMetricSet::binned(
        vec![
            seqtable::metrics::QscoreBin::new(2, 19, 12),
            seqtable::metrics::QscoreBin::new(20, 29, 23),
            seqtable::metrics::QscoreBin::new(30, 41, 34),
        ],
        std::mem::take(&mut metrics.quality.records),
    );
    metrics.tile = tiles;
    metrics
}

fn main() -> Result<()> {
    let columns = schema(&[
        (ColumnId::Lane, 1),
        (ColumnId::Tile, 1),
        (ColumnId::Cycle, 1),
        (ColumnId::Read, 1),
        (ColumnId::CycleWithinRead, 1),
        (ColumnId::ClusterDensity, 1),
        (ColumnId::PercentAligned, 1),
        (ColumnId::ErrorRate, 1),
        (ColumnId::Focus, 4),
        (ColumnId::PercentQ20, 1),
        (ColumnId::PercentQ30, 1),
    ]);
    let reads = [ReadSegment::new(1, 5), ReadSegment::new(2, 3)];

    let metrics = synthetic_run();
    let table = assemble(&metrics, &columns, &reads)?;

    let mut out = io::BufWriter::new(io::stdout());

    // header row, expanding multi-valued columns
    let mut names = Vec::new();
    for descriptor in table.columns() {
        if descriptor.width == 1 {
            names.push(format!("{:?}", descriptor.id));
        } else {
            for sub in 0..descriptor.width {
                names.push(format!("{:?}_{sub}", descriptor.id));
            }
        }
    }
    writeln!(out, "{}", names.join(","))?;

    for row in 0..table.row_count() {
        let cells: Vec<String> = table
            .row(row)
            .iter()
            .map(|cell| {
                if cell.is_nan() {
                    String::from("NA")
                } else {
                    format!("{cell}")
                }
            })
            .collect();
        writeln!(out, "{}", cells.join(","))?;
    }
    out.flush()?;

    Ok(())
}
