//! Conflict layout resolver.
//!
//! A grid cell has a fixed visual budget. Instead of growing the cell when
//! several sessions overlap, the resolver packs them into a small sub-grid
//! and shrinks the label size to fit:
//!
//! | sessions | columns × rows | size tier |
//! |----------|----------------|-----------|
//! | 0–1      | 1 × 1          | large     |
//! | 2        | 2 × 1          | large     |
//! | 3–4      | 2 × 2          | medium    |
//! | 5–6      | 3 × 2          | small     |
//! | ≥ 7      | 3 × 3          | tiny      |
//!
//! More than nine sessions still get a cell each in the slot's list; the
//! extra ones share the last sub-grid cell and overlap visually.

use serde::Serialize;

/// Label size class for sessions in a crowded slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeTier {
    Large,
    Medium,
    Small,
    Tiny,
}

impl SizeTier {
    /// Label font size in pixels as `(compact, regular)` for narrow and wide screens.
    pub fn font_px(&self) -> (u8, u8) {
        match self {
            SizeTier::Large => (8, 12),
            SizeTier::Medium => (7, 10),
            SizeTier::Small => (6, 8),
            SizeTier::Tiny => (5, 6),
        }
    }
}

/// Sub-grid shape of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SlotLayout {
    pub columns: u8,
    pub rows: u8,
    pub size_tier: SizeTier,
}

impl SlotLayout {
    /// Number of sub-grid cells.
    pub fn capacity(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Sessions beyond capacity when `count` sessions are placed.
    pub fn overflow(&self, count: usize) -> usize {
        count.saturating_sub(self.capacity())
    }

    /// `(column, row)` of the `index`-th session, filled row by row.
    ///
    /// Indexes past capacity land on the last cell.
    pub fn cell_for(&self, index: usize) -> (u8, u8) {
        let index = index.min(self.capacity() - 1);
        let columns = self.columns as usize;
        ((index % columns) as u8, (index / columns) as u8)
    }
}

/// Sub-grid shape for `count` simultaneous sessions.
pub fn layout_for(count: usize) -> SlotLayout {
    let (columns, rows, size_tier) = match count {
        0 | 1 => (1, 1, SizeTier::Large),
        2 => (2, 1, SizeTier::Large),
        3 | 4 => (2, 2, SizeTier::Medium),
        5 | 6 => (3, 2, SizeTier::Small),
        _ => (3, 3, SizeTier::Tiny),
    };
    SlotLayout {
        columns,
        rows,
        size_tier,
    }
}
