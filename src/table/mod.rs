//! The imaging table and its assembly pipeline

pub(crate) mod assemble;
pub(crate) mod columns;
pub(crate) mod populate;

pub use assemble::assemble;
pub use columns::{ColumnDescriptor, ColumnId, ColumnLayout, Span, schema};

/// The assembled denormalized table: one row per distinct (lane, tile, cycle)
/// observation, one cell per requested column (and sub-column), missing
/// values marked with NaN.
///
/// Constructed once by [`assemble`] or
/// [`assemble_parallel`](crate::assemble_parallel); never mutated afterwards.
#[derive(Clone, Debug)]
pub struct ImagingTable {
    row_count: usize,
    columns: Vec<ColumnDescriptor>,
    layout: ColumnLayout,
    data: Vec<f32>,
}

impl ImagingTable {
    pub(crate) fn new(
        row_count: usize,
        columns: Vec<ColumnDescriptor>,
        layout: ColumnLayout,
        data: Vec<f32>,
    ) -> Self {
        debug_assert_eq!(data.len(), row_count * layout.stride());
        Self {
            row_count,
            columns,
            layout,
            data,
        }
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of cells per row, including sub-columns
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.layout.stride()
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// All cells of one row
    ///
    /// # Panics
    /// Panics if `row >= row_count`.
    #[must_use]
    pub fn row(&self, row: usize) -> &[f32] {
        let stride = self.layout.stride();
        &self.data[row * stride..(row + 1) * stride]
    }

    /// First cell of a column in one row, or `None` if the column was not
    /// requested for this run. A NaN cell reads back as NaN, not `None`.
    #[must_use]
    pub fn value(&self, row: usize, id: ColumnId) -> Option<f32> {
        self.value_at(row, id, 0)
    }

    /// Sub-column cell of a multi-valued column
    #[must_use]
    pub fn value_at(&self, row: usize, id: ColumnId, sub: usize) -> Option<f32> {
        if row >= self.row_count {
            return None;
        }
        let span = self.layout.span(id)?;
        if sub >= span.width() {
            return None;
        }
        Some(self.data[row * self.layout.stride() + span.offset() + sub])
    }

    /// The flat row-major cell buffer
    #[must_use]
    pub fn data(&self) -> &[f32] {
        &self.data
    }
}
