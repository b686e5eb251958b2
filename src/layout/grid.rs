//! The sparse voxel grid builders write into.

use std::{collections::BTreeMap, fmt::Display};

use super::{CellKind, Direction};
use crate::{Result, SynthError};

/// A `(layer, row, column)` coordinate. Layers grow upwards, layer 0 is the ground.
///
/// Positions are ordered layer first, then row, then column, which is also the order
/// the grid is exported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub layer: usize,
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(layer: usize, row: usize, column: usize) -> Self {
        Position { layer, row, column }
    }

    /// Signed `(layer, row, column)` offset going from `self` to `other`.
    pub fn delta(&self, other: &Position) -> (i64, i64, i64) {
        (
            other.layer as i64 - self.layer as i64,
            other.row as i64 - self.row as i64,
            other.column as i64 - self.column as i64,
        )
    }

    /// Touching positions, diagonals included (Chebyshev distance of 1).
    pub fn is_adjacent(&self, other: &Position) -> bool {
        let (l, r, c) = self.delta(other);
        self != other && l.abs() <= 1 && r.abs() <= 1 && c.abs() <= 1
    }

    /// The neighbour in the given direction, if it still has non-negative coordinates.
    pub fn step(&self, direction: Direction) -> Option<Position> {
        let (l, r, c) = direction.offset();
        Some(Position {
            layer: self.layer.checked_add_signed(l as isize)?,
            row: self.row.checked_add_signed(r as isize)?,
            column: self.column.checked_add_signed(c as isize)?,
        })
    }

    /// The up to 6 face-sharing neighbours.
    pub fn neighbours(&self) -> impl Iterator<Item = Position> + '_ {
        [
            Direction::Up,
            Direction::Down,
            Direction::North,
            Direction::South,
            Direction::West,
            Direction::East,
        ]
        .into_iter()
        .filter_map(|d| self.step(d))
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.layer, self.row, self.column)
    }
}

/// Size of the bounding box of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub layers: usize,
    pub rows: usize,
    pub columns: usize,
}

/// Sparse mapping from [`Position`] to [`CellKind`].
///
/// Reading a position that was never written returns [`CellKind::Empty`].
/// The grid is append-only: [`VoxelGrid::place`] refuses to replace a cell with a different kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoxelGrid {
    cells: BTreeMap<Position, CellKind>,
}

impl VoxelGrid {
    pub fn new() -> Self {
        VoxelGrid {
            cells: BTreeMap::new(),
        }
    }

    /// The cell at `position`, [`CellKind::Empty`] if never written.
    pub fn get(&self, position: Position) -> CellKind {
        self.cells.get(&position).copied().unwrap_or_default()
    }

    /// Writes a cell.
    ///
    /// Writing the same kind twice is a no-op, writing [`CellKind::Empty`] does nothing,
    /// and writing a different kind over an occupied cell fails with [`SynthError::Overlap`].
    pub fn place(&mut self, position: Position, kind: CellKind) -> Result<()> {
        if kind.is_empty() {
            return Ok(());
        }
        match self.cells.get(&position) {
            Some(&existing) if existing != kind => Err(SynthError::Overlap {
                position,
                existing,
                incoming: kind,
            }),
            Some(_) => Ok(()),
            None => {
                self.cells.insert(position, kind);
                Ok(())
            }
        }
    }

    /// Number of non-empty cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Non-empty cells in (layer, row, column) order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, CellKind)> + '_ {
        self.cells.iter().map(|(&p, &k)| (p, k))
    }

    /// Number of cells satisfying the predicate.
    pub fn count(&self, predicate: impl Fn(CellKind) -> bool) -> usize {
        self.cells.values().filter(|&&k| predicate(k)).count()
    }

    /// Smallest box anchored at the origin holding every non-empty cell.
    pub fn dimensions(&self) -> Dimensions {
        self.cells
            .keys()
            .fold(Dimensions::default(), |d, p| Dimensions {
                layers: d.layers.max(p.layer + 1),
                rows: d.rows.max(p.row + 1),
                columns: d.columns.max(p.column + 1),
            })
    }

    /// Dense export: layers, then rows, then cells, over the whole bounding box.
    /// Unset coordinates are [`CellKind::Empty`].
    pub fn layers(&self) -> Vec<Vec<Vec<CellKind>>> {
        let d = self.dimensions();
        let mut layers = vec![vec![vec![CellKind::Empty; d.columns]; d.rows]; d.layers];
        for (p, k) in self.iter() {
            layers[p.layer][p.row][p.column] = k;
        }
        layers
    }
}
