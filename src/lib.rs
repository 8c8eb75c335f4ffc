mod error;
mod id;
mod parallel;
mod qscore;
mod run;
mod table;

pub mod metrics;

pub use error::{AssemblyError, Error, LayoutError, Result};
pub use id::{TileCycleId, TileId};
pub use metrics::RunMetrics;
pub use parallel::assemble_parallel;
pub use qscore::{MAX_QSCORE, index_for_q_value};
pub use run::{CycleToReadMap, ReadCycle, ReadSegment};
pub use table::{
    ColumnDescriptor, ColumnId, ColumnLayout, ImagingTable, Span, assemble, schema,
};
