//! Composite row identities
//!
//! Every per-cycle metric record is keyed by a reversible packing of its
//! (lane, tile, cycle) coordinates into a single integer. The packed key is
//! the join key across all per-cycle metric streams: two records describing
//! the same lane, tile and cycle always produce the same key, whichever
//! subsystem emitted them.

/// Bit position of the lane component
pub const LANE_SHIFT: u64 = 48;

/// Bit position of the tile component
pub const TILE_SHIFT: u64 = 16;

/// Mask covering the cycle component
pub const CYCLE_MASK: u64 = (1 << TILE_SHIFT) - 1;

/// Composite identity of one (lane, tile, cycle) observation.
///
/// Layout: lane in bits 48..64, tile in bits 16..48, cycle in bits 0..16.
/// Ordering on the packed value therefore sorts by lane, then tile, then
/// cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileCycleId(u64);

impl TileCycleId {
    #[inline]
    #[must_use]
    pub fn new(lane: u16, tile: u32, cycle: u16) -> Self {
        Self((u64::from(lane) << LANE_SHIFT) | (u64::from(tile) << TILE_SHIFT) | u64::from(cycle))
    }

    /// Returns the lane component
    #[inline]
    #[must_use]
    pub fn lane(&self) -> u16 {
        (self.0 >> LANE_SHIFT) as u16
    }

    /// Returns the tile component
    #[inline]
    #[must_use]
    pub fn tile(&self) -> u32 {
        ((self.0 >> TILE_SHIFT) & 0xFFFF_FFFF) as u32
    }

    /// Returns the absolute (1-based) cycle component
    #[inline]
    #[must_use]
    pub fn cycle(&self) -> u16 {
        (self.0 & CYCLE_MASK) as u16
    }

    /// Strips the cycle component, leaving the key of the owning tile.
    ///
    /// This is the key the tile-level metric stream is queried by during the
    /// overlay pass.
    #[inline]
    #[must_use]
    pub fn tile_id(&self) -> TileId {
        TileId(self.0 & !CYCLE_MASK)
    }
}

/// Identity of a (lane, tile) pair with no cycle component.
///
/// Tile-level metrics are keyed by this; it never appears as a table row key
/// on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(u64);

impl TileId {
    #[inline]
    #[must_use]
    pub fn new(lane: u16, tile: u32) -> Self {
        TileCycleId::new(lane, tile, 0).tile_id()
    }

    #[inline]
    #[must_use]
    pub fn lane(&self) -> u16 {
        (self.0 >> LANE_SHIFT) as u16
    }

    #[inline]
    #[must_use]
    pub fn tile(&self) -> u32 {
        ((self.0 >> TILE_SHIFT) & 0xFFFF_FFFF) as u32
    }
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let id = TileCycleId::new(8, 2317, 318);
        assert_eq!(id.lane(), 8);
        assert_eq!(id.tile(), 2317);
        assert_eq!(id.cycle(), 318);
    }

    #[test]
    fn test_same_coordinates_same_key() {
        let a = TileCycleId::new(1, 1101, 25);
        let b = TileCycleId::new(1, 1101, 25);
        assert_eq!(a, b);
    }

    #[test]
    fn test_tile_id_strips_cycle() {
        let a = TileCycleId::new(2, 1203, 1);
        let b = TileCycleId::new(2, 1203, 150);
        assert_eq!(a.tile_id(), b.tile_id());
        assert_eq!(a.tile_id(), TileId::new(2, 1203));
        assert_eq!(a.tile_id().lane(), 2);
        assert_eq!(a.tile_id().tile(), 1203);
    }

    #[test]
    fn test_ordering_lane_tile_cycle() {
        let mut ids = vec![
            TileCycleId::new(2, 1101, 1),
            TileCycleId::new(1, 1102, 1),
            TileCycleId::new(1, 1101, 2),
            TileCycleId::new(1, 1101, 1),
        ];
        ids.sort();
        assert_eq!(
            ids,
            vec![
                TileCycleId::new(1, 1101, 1),
                TileCycleId::new(1, 1101, 2),
                TileCycleId::new(1, 1102, 1),
                TileCycleId::new(2, 1101, 1),
            ]
        );
    }

    #[test]
    fn test_max_components() {
        let id = TileCycleId::new(u16::MAX, u32::MAX, u16::MAX);
        assert_eq!(id.lane(), u16::MAX);
        assert_eq!(id.tile(), u32::MAX);
        assert_eq!(id.cycle(), u16::MAX);
    }
}
