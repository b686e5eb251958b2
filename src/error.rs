use thiserror::Error;

use crate::layout::{CellKind, Position};
use crate::sim::SimulationError;

/// The result of a synthesis operation.
pub type Result<T> = std::result::Result<T, SynthError>;

/// Error returned when building, checking or simulating a layout failed.
#[derive(Debug, Error)]
pub enum SynthError {
    /// The truth table did not pass validation.
    #[error("{0}")]
    Table(#[from] TableError),

    /// Just forwarding a [`ParserError`].
    #[error("{0}")]
    Parser(#[from] ParserError),

    /// Two builders tried to write different cells at the same position.
    /// Placement regions are disjoint by construction, so this should never happen.
    #[error("cell {position} already holds {existing:?}, refusing to write {incoming:?}")]
    Overlap {
        position: Position,
        existing: CellKind,
        incoming: CellKind,
    },

    /// Just forwarding a [`SimulationError`].
    #[error("{0}")]
    Simulation(#[from] SimulationError),

    /// The layout has reached an invalid state. This should never happen.
    #[error("the layout has reached an invalid state - this should not happen - error: {0}")]
    InvalidState(String),

    /// Reading a table or writing a render failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error returned when a truth table is not a valid single-output table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The table has no rows at all.
    #[error("truth table is empty")]
    Empty,

    /// Rows only hold the output column.
    #[error("truth table needs at least one input column")]
    NoInputs,

    /// A row does not have the same width as the first one.
    #[error("row {row} has {found} columns, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A cell is neither 0 nor 1.
    #[error("row {row}, column {column}: {value} is not a bit")]
    NonBinary { row: usize, column: usize, value: u8 },

    /// An input assignment does not match the number of inputs of the table.
    #[error("expected {expected} input bits, got {found}")]
    InputWidth { expected: usize, found: usize },
}

/// Error returned when parsing a truth table from text failed.
#[derive(Debug, Error)]
pub enum ParserError {
    /// Invalid token, a bit was expected.
    #[error("line {line}: invalid token: {token}")]
    InvalidToken { line: usize, token: String },

    /// An IO error occured (file doesn't exist, can't be read, ...).
    #[error("io error: {0}")]
    IoError(String),
}
