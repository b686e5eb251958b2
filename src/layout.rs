//! Placement of a sum-of-products network into a voxel grid.
//!
//! [`Layout::from_table`] runs the whole synthesis:
//! - one AND floor per minterm, stacked bottom-up in table order ([`floor`])
//! - for every floor, the riser lifting inputs to the floor above and the staircase bringing
//!   the floor output back to the ground ([`bus`])
//! - a final pass OR-ing every returned output into the light actuator ([`combiner`]).
//!
//! ```rust
//! use redstone_sop::{Layout, SynthesisConfig, TruthTable};
//!
//! let table: TruthTable = "0 0 0\n1 0 1\n0 1 1\n1 1 1\n".parse().unwrap();
//! let layout = Layout::from_table(&table, &SynthesisConfig::default()).unwrap();
//! assert_eq!(layout.floors().len(), 3);
//! layout.verify(&table, &SynthesisConfig::default()).unwrap();
//! ```

mod bus;
pub mod cell;
mod combiner;
pub mod coords;
mod floor;
pub mod grid;
pub mod netlist;

pub use cell::{CellKind, Direction};
pub use coords::Step;
pub use grid::{Dimensions, Position, VoxelGrid};
pub use netlist::Netlist;

use tracing::{debug, info, warn};

use crate::{Result, SumOfProducts, TruthTable};

/// Default maximum number of consecutive conductors a signal can travel through.
pub const DEFAULT_MAX_CONDUCTOR_RUN: usize = 15;

/// What to build for a function that is never true.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConstantFalsePolicy {
    /// A lone light actuator (on its support) that nothing drives.
    #[default]
    UnpoweredActuator,
    /// No cell at all.
    OmitCircuit,
}

/// Parameters of a synthesis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisConfig {
    /// Longest run of conductors allowed before a refresher or an inverter.
    pub max_conductor_run: usize,
    pub constant_false: ConstantFalsePolicy,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        SynthesisConfig {
            max_conductor_run: DEFAULT_MAX_CONDUCTOR_RUN,
            constant_false: ConstantFalsePolicy::default(),
        }
    }
}

impl SynthesisConfig {
    pub fn with_max_conductor_run(mut self, max_conductor_run: usize) -> Self {
        self.max_conductor_run = max_conductor_run;
        self
    }

    pub fn with_constant_false(mut self, policy: ConstantFalsePolicy) -> Self {
        self.constant_false = policy;
        self
    }
}

/// Where one minterm ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Floor {
    pub index: usize,
    pub base_layer: usize,
    pub height: usize,
    /// The AND confirmation point of the floor.
    pub junction: Position,
    /// Staircase steps, lowest first. Empty for floor 0.
    pub steps: Vec<Step>,
    pub reserved_columns: [usize; coords::RESERVED_COLUMNS],
}

/// Grid and wiring under construction, shared by the builders one after the other.
#[derive(Debug, Default)]
pub(crate) struct Canvas {
    grid: VoxelGrid,
    netlist: Netlist,
}

impl Canvas {
    fn place(&mut self, position: Position, kind: CellKind) -> Result<()> {
        self.grid.place(position, kind)
    }

    fn wire(&mut self, from: Position, to: Position) {
        self.netlist.connect(from, to);
    }
}

/// A finished layout: the voxel grid, the wiring the builders intended, and where every
/// floor was placed.
///
/// Built once by [`Layout::from_table`], read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    num_inputs: usize,
    sop: SumOfProducts,
    grid: VoxelGrid,
    netlist: Netlist,
    floors: Vec<Floor>,
}

impl Layout {
    /// Synthesizes the layout of the given table.
    ///
    /// Only fails if an internal placement invariant is broken, table validation already
    /// happened when building the [`TruthTable`].
    pub fn from_table(table: &TruthTable, config: &SynthesisConfig) -> Result<Self> {
        let sop = SumOfProducts::from_table(table);
        let num_inputs = sop.num_inputs();
        let count = sop.products().len();
        info!(
            inputs = num_inputs,
            rows = table.num_rows(),
            minterms = count,
            "synthesizing layout"
        );

        let mut canvas = Canvas::default();
        let mut floors = Vec::with_capacity(count);

        if sop.is_constant_false() {
            warn!(policy = ?config.constant_false, "function is never true");
            combiner::build_constant_false(&mut canvas, num_inputs, config.constant_false)?;
        } else {
            for (k, product) in sop.products().iter().enumerate() {
                let mut floor = floor::build(&mut canvas, k, count, product)?;
                if k + 1 < count {
                    bus::raise(&mut canvas, k, num_inputs)?;
                }
                floor.steps = bus::descend(&mut canvas, k, num_inputs)?;
                debug!(
                    floor = k,
                    minterm = %product.minterm(),
                    base_layer = floor.base_layer,
                    height = floor.height,
                    steps = floor.steps.len(),
                    "placed floor"
                );
                floors.push(floor);
            }
            combiner::build(&mut canvas, count, num_inputs)?;
        }

        canvas.netlist.check_integrity()?;
        let dimensions = canvas.grid.dimensions();
        info!(
            layers = dimensions.layers,
            rows = dimensions.rows,
            columns = dimensions.columns,
            cells = canvas.grid.len(),
            "layout done"
        );

        Ok(Layout {
            num_inputs,
            sop,
            grid: canvas.grid,
            netlist: canvas.netlist,
            floors,
        })
    }

    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// The network the layout realizes.
    pub fn sop(&self) -> &SumOfProducts {
        &self.sop
    }

    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// Hands the grid over to an external consumer.
    pub fn into_grid(self) -> VoxelGrid {
        self.grid
    }

    pub fn netlist(&self) -> &Netlist {
        &self.netlist
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    /// Layers used by the floors, ie the height of the AND stack.
    pub fn floor_layers(&self) -> usize {
        self.floors.iter().map(|f| f.height).sum()
    }

    #[cfg(test)]
    pub(crate) fn wiring_mut(&mut self) -> (&mut VoxelGrid, &mut Netlist) {
        (&mut self.grid, &mut self.netlist)
    }
}

/// Synthesizes a layout with the default configuration.
pub fn synthesize(table: &TruthTable) -> Result<Layout> {
    Layout::from_table(table, &SynthesisConfig::default())
}

#[cfg(test)]
mod test {
    use super::*;

    fn or2() -> TruthTable {
        TruthTable::new([[0u8, 0, 0], [1, 0, 1], [0, 1, 1], [1, 1, 1]]).unwrap()
    }

    #[test]
    fn floor_layers_test() {
        let layout = synthesize(&or2()).unwrap();
        assert_eq!(layout.floors().len(), 3);
        assert_eq!(layout.floor_layers(), 4 + 4 + 3);
        assert_eq!(layout.grid().dimensions().layers, 11);

        let single = TruthTable::new([[1u8, 1, 1]]).unwrap();
        let layout = synthesize(&single).unwrap();
        assert_eq!(layout.floor_layers(), 3);
        assert_eq!(layout.grid().dimensions().layers, 3);
    }

    #[test]
    fn floor_placement_test() {
        let layout = synthesize(&or2()).unwrap();
        for (k, floor) in layout.floors().iter().enumerate() {
            assert_eq!(floor.index, k);
            assert_eq!(floor.base_layer, 4 * k);
            assert_eq!(floor.steps.len(), 2 * k);
            assert_eq!(floor.reserved_columns, [5 + 2 * k, 6 + 2 * k]);
            assert_eq!(
                layout.grid().get(floor.junction),
                CellKind::Inverter(Direction::East)
            );
        }
    }

    #[test]
    fn deterministic_test() {
        let table = TruthTable::new([
            [0u8, 0, 0, 1],
            [0, 1, 1, 1],
            [1, 0, 1, 0],
            [1, 1, 0, 1],
        ])
        .unwrap();
        let a = synthesize(&table).unwrap();
        let b = synthesize(&table).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.grid().layers(), b.grid().layers());
        assert_eq!(a, b);
    }

    #[test]
    fn constant_false_policies_test() {
        let never = TruthTable::new([[0u8, 0, 0], [1, 1, 0]]).unwrap();

        let layout = synthesize(&never).unwrap();
        assert!(layout.floors().is_empty());
        assert_eq!(layout.grid().count(|k| k == CellKind::LightActuator), 1);
        assert_eq!(layout.grid().count(|k| k.carries_signal()), 1);

        let config = SynthesisConfig::default().with_constant_false(ConstantFalsePolicy::OmitCircuit);
        let layout = Layout::from_table(&never, &config).unwrap();
        assert!(layout.grid().is_empty());
        assert!(layout.netlist().output().is_none());
    }

    #[test]
    fn single_actuator_test() {
        let layout = synthesize(&or2()).unwrap();
        assert_eq!(layout.grid().count(|k| k == CellKind::LightActuator), 1);
        let output = layout.netlist().output().unwrap();
        assert_eq!(layout.grid().get(output), CellKind::LightActuator);
    }

    #[test]
    fn inputs_test() {
        let layout = synthesize(&or2()).unwrap();
        assert_eq!(
            layout.netlist().inputs(),
            &[coords::input_port(0), coords::input_port(1)]
        );
    }
}
