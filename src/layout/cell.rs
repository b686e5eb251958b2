//! The closed set of cell kinds a layout is made of.

use std::fmt::Display;

/// Orientation of a directional cell, ie the direction its signal flows out to.
///
/// Axes follow [`Position`]: `Up`/`Down` move along layers, `North`/`South` along rows
/// and `West`/`East` along columns.
///
/// [`Position`]: super::Position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Up,
    Down,
    North,
    South,
    West,
    East,
}

impl Direction {
    /// Unit `(layer, row, column)` offset of the direction.
    pub fn offset(self) -> (i64, i64, i64) {
        match self {
            Direction::Up => (1, 0, 0),
            Direction::Down => (-1, 0, 0),
            Direction::North => (0, -1, 0),
            Direction::South => (0, 1, 0),
            Direction::West => (0, 0, -1),
            Direction::East => (0, 0, 1),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::North => "north",
            Direction::South => "south",
            Direction::West => "west",
            Direction::East => "east",
        };
        write!(f, "{}", s)
    }
}

/// A cell of the voxel grid.
///
/// [`CellKind::Empty`] is the default, any coordinate never written reads as empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Air.
    #[default]
    Empty,
    /// Structural support, does not carry any signal.
    Solid,
    /// Carries signal, which decays with distance until refreshed.
    Conductor,
    /// Outputs the negation of its sole input.
    Inverter(Direction),
    /// Passes its sole input through at full strength, in one direction only.
    Refresher(Direction),
    /// The observable output of the circuit.
    LightActuator,
}

impl CellKind {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellKind::Empty)
    }

    pub fn is_conductor(&self) -> bool {
        matches!(self, CellKind::Conductor)
    }

    /// Returns true for cells that can take part in a signal path.
    pub fn carries_signal(&self) -> bool {
        matches!(
            self,
            CellKind::Conductor
                | CellKind::Inverter(_)
                | CellKind::Refresher(_)
                | CellKind::LightActuator
        )
    }

    /// Orientation of directional cells, else [`None`].
    pub fn facing(&self) -> Option<Direction> {
        match *self {
            CellKind::Inverter(d) | CellKind::Refresher(d) => Some(d),
            _ => None,
        }
    }

    /// Short lowercase name, also used as graph labels.
    pub fn name(&self) -> &'static str {
        match self {
            CellKind::Empty => "empty",
            CellKind::Solid => "solid",
            CellKind::Conductor => "conductor",
            CellKind::Inverter(_) => "inverter",
            CellKind::Refresher(_) => "refresher",
            CellKind::LightActuator => "actuator",
        }
    }
}
