/// Custom Result type for seqtable operations, wrapping the custom [`Error`] type
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the seqtable library.
///
/// Every variant is fatal to the table build that raised it: each one implies
/// the assembled table would be structurally wrong (misaligned columns or
/// missing rows), not merely incomplete. Nothing here is retried or
/// downgraded to a warning.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Errors in the column layout supplied by the column-selection collaborator
    #[error("Error in column layout: {0}")]
    LayoutError(#[from] LayoutError),

    /// Errors raised while assembling the imaging table
    #[error("Error assembling imaging table: {0}")]
    AssemblyError(#[from] AssemblyError),
}

/// Errors in the externally supplied column descriptor list
///
/// These indicate a defect in the upstream column-selection collaborator,
/// never a normal runtime condition.
#[derive(thiserror::Error, Debug)]
pub enum LayoutError {
    /// A raw column id does not name any column in the fixed universe
    ///
    /// # Arguments
    /// * `u16` - The unknown raw id
    #[error("Column id {0} is outside the imaging column universe")]
    InvalidColumnId(u16),

    /// A descriptor's offset does not continue the packed increasing sequence
    #[error("Column {id:?} declares offset {offset}, expected {expected}")]
    NonContiguousOffset {
        id: crate::ColumnId,
        offset: usize,
        expected: usize,
    },
}

/// Errors raised during row indexing and population
#[derive(thiserror::Error, Debug)]
pub enum AssemblyError {
    /// A metric record references a cycle beyond the declared read structure
    ///
    /// The run's read segments declare the total cycle count; a metric citing
    /// a cycle past it means the metric data and the run metadata disagree.
    #[error("Cycle {cycle} exceeds the {total_cycles} cycles declared by the run reads")]
    CycleOutOfRange { cycle: u16, total_cycles: usize },

    /// A computed write offset would leave the row's slice
    ///
    /// Indicates a defect in column layout or stride computation; the write is
    /// refused rather than allowed to corrupt an adjacent row.
    #[error("Cell offset {offset} (column {id:?}, sub-column {sub}) exceeds row stride {stride}")]
    CellOutOfBounds {
        id: crate::ColumnId,
        sub: usize,
        offset: usize,
        stride: usize,
    },
}

mod testing {
    #[allow(unused)]
    use super::*;

    #[test]
    fn test_error_from_layout_error() {
        let layout_error = LayoutError::InvalidColumnId(999);
        let error: Error = layout_error.into();
        assert!(matches!(error, Error::LayoutError(_)));
    }

    #[test]
    fn test_error_from_assembly_error() {
        let assembly_error = AssemblyError::CycleOutOfRange {
            cycle: 9,
            total_cycles: 8,
        };
        let error: Error = assembly_error.into();
        assert!(matches!(error, Error::AssemblyError(_)));
    }

    #[test]
    fn test_cycle_out_of_range_display() {
        let error = AssemblyError::CycleOutOfRange {
            cycle: 151,
            total_cycles: 150,
        };
        let error_str = format!("{}", error);
        assert!(error_str.contains("151"));
        assert!(error_str.contains("150"));
    }

    #[test]
    fn test_invalid_column_id_display() {
        let error = LayoutError::InvalidColumnId(42);
        let error_str = format!("{}", error);
        assert!(error_str.contains("42"));
    }

    #[test]
    fn test_cell_out_of_bounds_display() {
        let error = AssemblyError::CellOutOfBounds {
            id: crate::ColumnId::ErrorRate,
            sub: 0,
            offset: 12,
            stride: 10,
        };
        let error_str = format!("{}", error);
        assert!(error_str.contains("12"));
        assert!(error_str.contains("10"));
    }
}
