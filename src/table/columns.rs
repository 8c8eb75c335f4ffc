//! Column universe and the compiled row layout
//!
//! Which columns a run's table carries is decided upstream, based on which
//! metric streams exist; this module only compiles the supplied descriptor
//! list into a fixed-size id → span lookup so every populate pass resolves a
//! column in O(1).

use crate::{LayoutError, Result};

/// The fixed universe of well-known imaging table columns.
///
/// Discriminants are the wire ids used by external collaborators; the set is
/// closed and append-only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ColumnId {
    // Identity columns, shared by every per-cycle kind
    Lane = 0,
    Tile = 1,
    Cycle = 2,
    Read = 3,
    CycleWithinRead = 4,

    // Tile-level overlay columns
    ClusterDensity = 5,
    ClusterDensityPf = 6,
    ClusterCount = 7,
    ClusterCountPf = 8,
    PercentAligned = 9,

    // Error metric
    ErrorRate = 10,

    // Extraction metric, one sub-column per imaging channel
    Focus = 11,
    MaxIntensity = 12,

    // Image metric, one sub-column per imaging channel
    MinContrast = 13,
    MaxContrast = 14,

    // Corrected-intensity metric
    PercentBase = 15,
    SignalToNoise = 16,

    // Quality metric, derived via the Q20/Q30 bin positions
    PercentQ20 = 17,
    PercentQ30 = 18,
}

impl ColumnId {
    /// Number of columns in the universe
    pub const COUNT: usize = 19;

    const ALL: [ColumnId; Self::COUNT] = [
        ColumnId::Lane,
        ColumnId::Tile,
        ColumnId::Cycle,
        ColumnId::Read,
        ColumnId::CycleWithinRead,
        ColumnId::ClusterDensity,
        ColumnId::ClusterDensityPf,
        ColumnId::ClusterCount,
        ColumnId::ClusterCountPf,
        ColumnId::PercentAligned,
        ColumnId::ErrorRate,
        ColumnId::Focus,
        ColumnId::MaxIntensity,
        ColumnId::MinContrast,
        ColumnId::MaxContrast,
        ColumnId::PercentBase,
        ColumnId::SignalToNoise,
        ColumnId::PercentQ20,
        ColumnId::PercentQ30,
    ];

    /// Resolve a raw wire id into the universe.
    ///
    /// External collaborators (bindings, serialized layouts) speak raw ids;
    /// anything outside the universe is a defect on their side.
    pub fn from_index(raw: u16) -> Result<Self> {
        Self::ALL
            .get(usize::from(raw))
            .copied()
            .ok_or_else(|| LayoutError::InvalidColumnId(raw).into())
    }

    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Location of a column within a row: base offset and sub-column count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    offset: usize,
    width: usize,
}

impl Span {
    #[must_use]
    pub fn new(offset: usize, width: usize) -> Self {
        Self { offset, width }
    }

    #[inline]
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }
}

/// One requested column: its id, base offset within a row, and width
/// (1 for scalars, N for per-channel or per-base columns).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub id: ColumnId,
    pub offset: usize,
    pub width: usize,
}

impl ColumnDescriptor {
    #[must_use]
    pub fn new(id: ColumnId, offset: usize, width: usize) -> Self {
        Self { id, offset, width }
    }
}

/// Assign packed increasing offsets to an ordered (id, width) list.
///
/// Convenience for collaborators that select columns but leave offset
/// assignment to this crate.
#[must_use]
pub fn schema(columns: &[(ColumnId, usize)]) -> Vec<ColumnDescriptor> {
    let mut offset = 0;
    columns
        .iter()
        .map(|&(id, width)| {
            let descriptor = ColumnDescriptor::new(id, offset, width);
            offset += width;
            descriptor
        })
        .collect()
}

/// The compiled column lookup: one slot per universe id, `None` for columns
/// not requested for this run.
///
/// A `None` slot must never be written; any `Some` span lies entirely below
/// the row stride.
#[derive(Clone, Debug)]
pub struct ColumnLayout {
    spans: [Option<Span>; ColumnId::COUNT],
    stride: usize,
}

impl ColumnLayout {
    /// Compile an ordered descriptor list.
    ///
    /// Descriptors must arrive with packed increasing offsets; the stride is
    /// the last descriptor's offset plus its width. An empty list compiles to
    /// a zero-stride layout.
    pub fn compile(columns: &[ColumnDescriptor]) -> Result<Self> {
        let mut spans = [None; ColumnId::COUNT];
        let mut expected = 0;
        for descriptor in columns {
            if descriptor.offset != expected {
                return Err(LayoutError::NonContiguousOffset {
                    id: descriptor.id,
                    offset: descriptor.offset,
                    expected,
                }
                .into());
            }
            spans[descriptor.id.index()] = Some(Span::new(descriptor.offset, descriptor.width));
            expected = descriptor.offset + descriptor.width;
        }
        Ok(Self {
            spans,
            stride: expected,
        })
    }

    /// Span of a column, or `None` if it was not requested for this run
    #[inline]
    #[must_use]
    pub fn span(&self, id: ColumnId) -> Option<Span> {
        self.spans[id.index()]
    }

    /// Number of cells occupied by one row
    #[inline]
    #[must_use]
    pub fn stride(&self) -> usize {
        self.stride
    }
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_schema_assigns_packed_offsets() {
        let columns = schema(&[
            (ColumnId::Lane, 1),
            (ColumnId::Focus, 4),
            (ColumnId::ErrorRate, 1),
        ]);
        assert_eq!(columns[0].offset, 0);
        assert_eq!(columns[1].offset, 1);
        assert_eq!(columns[2].offset, 5);
    }

    #[test]
    fn test_compile_stride_is_last_offset_plus_width() {
        let columns = schema(&[(ColumnId::Lane, 1), (ColumnId::PercentBase, 4)]);
        let layout = ColumnLayout::compile(&columns).unwrap();
        assert_eq!(layout.stride(), 5);

        let span = layout.span(ColumnId::PercentBase).unwrap();
        assert_eq!(span.offset(), 1);
        assert_eq!(span.width(), 4);
    }

    #[test]
    fn test_unrequested_column_is_absent() {
        let columns = schema(&[(ColumnId::Lane, 1)]);
        let layout = ColumnLayout::compile(&columns).unwrap();
        assert!(layout.span(ColumnId::ErrorRate).is_none());
        assert!(layout.span(ColumnId::PercentQ30).is_none());
    }

    #[test]
    fn test_empty_descriptor_list() {
        let layout = ColumnLayout::compile(&[]).unwrap();
        assert_eq!(layout.stride(), 0);
        assert!(layout.span(ColumnId::Lane).is_none());
    }

    #[test]
    fn test_gap_in_offsets_rejected() {
        let columns = [
            ColumnDescriptor::new(ColumnId::Lane, 0, 1),
            ColumnDescriptor::new(ColumnId::ErrorRate, 3, 1),
        ];
        let err = ColumnLayout::compile(&columns).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::LayoutError(LayoutError::NonContiguousOffset { .. })
        ));
    }

    #[test]
    fn test_from_index_roundtrip() {
        for raw in 0..ColumnId::COUNT as u16 {
            let id = ColumnId::from_index(raw).unwrap();
            assert_eq!(id.index(), usize::from(raw));
        }
    }

    #[test]
    fn test_from_index_outside_universe() {
        let err = ColumnId::from_index(ColumnId::COUNT as u16).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::LayoutError(LayoutError::InvalidColumnId(_))
        ));
    }
}
