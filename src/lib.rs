//! Synthesizes single-output truth tables into layered voxel circuits.
//!
//! The pipeline goes from a [`TruthTable`] to its canonical [`SumOfProducts`], then to a
//! [`Layout`]: one AND floor per minterm stacked bottom-up, staircases bringing every floor
//! output back to the ground, and a bus OR-ing them into a single light actuator.
//!
//! ```rust
//! use redstone_sop::{SynthesisConfig, TruthTable, synthesize};
//!
//! let table = TruthTable::from_file("assets/tables/majority.tt").unwrap();
//! let layout = synthesize(&table).unwrap();
//! layout.verify(&table, &SynthesisConfig::default()).unwrap();
//! println!("{}", layout.grid());
//! ```

pub mod dot;
pub mod error;
pub mod layout;
pub mod render;
pub mod sim;
pub mod sop;
pub mod table;

// Re-exporting symbols and modules.
pub use dot::GraphvizStyle;
pub use error::{ParserError, Result, SynthError, TableError};
pub use layout::{
    CellKind, ConstantFalsePolicy, Dimensions, Direction, Floor, Layout, Netlist, Position, Step,
    SynthesisConfig, VoxelGrid, synthesize,
};
pub use render::{Exporter, RenderStyle, TextRenderer};
pub use sim::SimulationError;
pub use sop::{Lane, Product, SumOfProducts, synthesize_lanes};
pub use table::{Minterm, TruthTable, extract_minterms};
