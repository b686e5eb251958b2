//! Functional simulation and physical checks of a layout.
//!
//! The netlist says where every signal comes from, the grid says what each cell does with it.
//! [`Layout::simulate`] only reads those two, so it checks the placed cells themselves rather
//! than the sum-of-products they were built from.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{debug, info, trace};

use crate::{
    Layout, Result, SynthesisConfig, TableError, TruthTable,
    layout::{CellKind, Position},
};

/// Error returned when a layout does not behave as a circuit should.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// A wired position holds a cell that cannot carry signal.
    #[error("cell {position} is wired but holds {kind:?}")]
    BrokenWire { position: Position, kind: CellKind },

    /// A directional cell does not have exactly one fanin.
    #[error("cell {position} expects {expected} fanin(s), has {found}")]
    FaninCount {
        position: Position,
        expected: usize,
        found: usize,
    },

    /// The wiring loops back through this position.
    #[error("combinational loop through {0}")]
    Cycle(Position),

    /// An edge joins two cells which do not touch.
    #[error("{from} cannot drive {to}, cells are not adjacent")]
    NotAdjacent { from: Position, to: Position },

    /// A directional cell is fed from the side it outputs to.
    #[error("cell {position} is fed from {fanin}, against its facing")]
    Orientation { position: Position, fanin: Position },

    /// A conductor run is too long for the signal to make it through.
    #[error("conductor run of {run} ending at {position} exceeds {max}")]
    SignalDecay {
        position: Position,
        run: usize,
        max: usize,
    },

    /// Two touching conductors which are not meant to exchange signal.
    #[error("conductors {a} and {b} touch without being wired")]
    Short { a: Position, b: Position },

    /// A wired cell does not reach the output.
    #[error("cell {0} does not reach the output")]
    Unreachable(Position),

    /// The layout disagrees with the table.
    #[error("input {assignment}: expected {expected}, layout gives {found}")]
    Mismatch {
        assignment: String,
        expected: bool,
        found: bool,
    },
}

fn single_fanin(
    position: Position,
    fanins: &[Position],
) -> std::result::Result<Position, SimulationError> {
    match fanins {
        [fanin] => Ok(*fanin),
        _ => Err(SimulationError::FaninCount {
            position,
            expected: 1,
            found: fanins.len(),
        }),
    }
}

fn bits(assignment: &[bool]) -> String {
    assignment.iter().map(|&b| if b { '1' } else { '0' }).collect()
}

impl Layout {
    /// Value of every cell the output depends on, for the given input assignment.
    pub fn signals(&self, assignment: &[bool]) -> Result<BTreeMap<Position, bool>> {
        if assignment.len() != self.num_inputs() {
            return Err(TableError::InputWidth {
                expected: self.num_inputs(),
                found: assignment.len(),
            }
            .into());
        }

        let netlist = self.netlist();
        let mut values: BTreeMap<Position, bool> = BTreeMap::new();
        for position in netlist.topological_sort()? {
            let fanins = netlist.fanins(position);
            let value = |p: &Position| values.get(p).copied().unwrap_or(false);

            let signal = match self.grid().get(position) {
                CellKind::Conductor | CellKind::LightActuator => {
                    let external = netlist
                        .input_index(position)
                        .map(|i| assignment[i])
                        .unwrap_or(false);
                    external || fanins.iter().any(value)
                }
                CellKind::Refresher(_) => value(&single_fanin(position, fanins)?),
                CellKind::Inverter(_) => !value(&single_fanin(position, fanins)?),
                kind @ (CellKind::Empty | CellKind::Solid) => {
                    return Err(SimulationError::BrokenWire { position, kind }.into());
                }
            };
            values.insert(position, signal);
        }
        Ok(values)
    }

    /// Returns whether the light actuator is lit for the given input assignment.
    ///
    /// A layout without any circuit is never lit.
    pub fn simulate(&self, assignment: &[bool]) -> Result<bool> {
        let values = self.signals(assignment)?;
        Ok(self
            .netlist()
            .output()
            .and_then(|output| values.get(&output).copied())
            .unwrap_or(false))
    }

    /// Checks that the wiring is physically sound.
    ///
    /// Every edge must join touching cells, directional cells must be fed from behind, every
    /// wired cell must carry signal and reach the output, no conductor run may exceed
    /// [`SynthesisConfig::max_conductor_run`], touching conductors must be wired together and
    /// the wiring must be free of loops.
    pub fn check_wiring(&self, config: &SynthesisConfig) -> Result<()> {
        let netlist = self.netlist();
        let grid = self.grid();
        let order = netlist.topological_sort_all()?;

        for (from, to) in netlist.edges() {
            if !from.is_adjacent(&to) {
                return Err(SimulationError::NotAdjacent { from, to }.into());
            }
            if let Some(facing) = grid.get(to).facing() {
                let (l, r, c) = from.delta(&to);
                let (fl, fr, fc) = facing.offset();
                if l * fl + r * fr + c * fc <= 0 {
                    return Err(SimulationError::Orientation {
                        position: to,
                        fanin: from,
                    }
                    .into());
                }
            }
        }

        // Conductor runs, fanins first
        let mut runs: BTreeMap<Position, usize> = BTreeMap::new();
        for &position in &order {
            let kind = grid.get(position);
            if !kind.carries_signal() {
                return Err(SimulationError::BrokenWire { position, kind }.into());
            }
            let run = if kind.is_conductor() {
                1 + netlist
                    .fanins(position)
                    .iter()
                    .map(|f| runs.get(f).copied().unwrap_or(0))
                    .max()
                    .unwrap_or(0)
            } else {
                0
            };
            if run > config.max_conductor_run {
                return Err(SimulationError::SignalDecay {
                    position,
                    run,
                    max: config.max_conductor_run,
                }
                .into());
            }
            runs.insert(position, run);
        }
        trace!(
            longest = runs.values().max().copied().unwrap_or(0),
            "conductor runs"
        );

        for (a, kind) in grid.iter() {
            if !kind.is_conductor() {
                continue;
            }
            for b in a.neighbours() {
                if b > a && grid.get(b).is_conductor() && !netlist.is_connected(a, b) {
                    return Err(SimulationError::Short { a, b }.into());
                }
            }
        }

        if let Some(position) = netlist.dangling()?.into_iter().next() {
            return Err(SimulationError::Unreachable(position).into());
        }

        debug!(
            nodes = order.len(),
            edges = netlist.edges().count(),
            "wiring checked"
        );
        Ok(())
    }

    /// Checks the wiring, then simulates every row of the table against the layout.
    ///
    /// Stops at the first row the layout gets wrong.
    pub fn verify(&self, table: &TruthTable, config: &SynthesisConfig) -> Result<()> {
        self.check_wiring(config)?;
        for (inputs, expected) in table.rows() {
            let found = self.simulate(inputs)?;
            if found != expected {
                return Err(SimulationError::Mismatch {
                    assignment: bits(inputs),
                    expected,
                    found,
                }
                .into());
            }
        }
        info!(rows = table.num_rows(), "layout verified");
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{SynthError, layout::Direction, synthesize};

    fn table(rows: &[&str]) -> TruthTable {
        TruthTable::new(
            rows.iter()
                .map(|r| r.bytes().map(|b| b - b'0').collect::<Vec<u8>>()),
        )
        .unwrap()
    }

    fn all_assignments(n: usize) -> impl Iterator<Item = Vec<bool>> {
        (0..1usize << n).map(move |x| (0..n).map(|i| (x >> i) & 1 == 1).collect())
    }

    #[test]
    fn simulate_and_test() {
        let table = table(&["000", "010", "100", "111"]);
        let layout = synthesize(&table).unwrap();
        assert!(layout.simulate(&[true, true]).unwrap());
        assert!(!layout.simulate(&[true, false]).unwrap());
        assert!(!layout.simulate(&[false, true]).unwrap());
        assert!(!layout.simulate(&[false, false]).unwrap());
        layout.verify(&table, &SynthesisConfig::default()).unwrap();
    }

    #[test]
    fn junctions_match_products_test() {
        let table = table(&["0001", "0110", "1010", "1101", "0011"]);
        let layout = synthesize(&table).unwrap();
        for assignment in all_assignments(3) {
            let signals = layout.signals(&assignment).unwrap();
            for (floor, product) in layout.floors().iter().zip(layout.sop().products()) {
                assert_eq!(signals[&floor.junction], product.evaluate(&assignment));
            }
            assert_eq!(
                layout.simulate(&assignment).unwrap(),
                layout.sop().evaluate(&assignment)
            );
        }
    }

    #[test]
    fn risers_keep_polarity_test() {
        // Every floor stub must see the primary input again
        let table = table(&["001", "011", "101", "111"]);
        let layout = synthesize(&table).unwrap();
        for assignment in all_assignments(2) {
            let signals = layout.signals(&assignment).unwrap();
            for floor in &layout.floors()[1..] {
                for (i, &bit) in assignment.iter().enumerate() {
                    let riser = Position::new(floor.base_layer + 1, 2 * i, 0);
                    assert_eq!(signals[&riser], bit);
                }
            }
        }
    }

    #[test]
    fn input_width_test() {
        let layout = synthesize(&table(&["01", "11"])).unwrap();
        assert!(matches!(
            layout.simulate(&[true, true]),
            Err(SynthError::Table(TableError::InputWidth {
                expected: 1,
                found: 2
            }))
        ));
    }

    #[test]
    fn constant_false_never_lit_test() {
        let never = table(&["000", "110"]);
        let layout = synthesize(&never).unwrap();
        for assignment in all_assignments(2) {
            assert!(!layout.simulate(&assignment).unwrap());
        }
        layout.verify(&never, &SynthesisConfig::default()).unwrap();
    }

    #[test]
    fn check_wiring_test() {
        let layout = synthesize(&table(&["0001", "0111", "1001", "1111"])).unwrap();
        layout.check_wiring(&SynthesisConfig::default()).unwrap();

        // The bus next to the actuator is the longest run
        let tight = SynthesisConfig::default().with_max_conductor_run(5);
        assert!(matches!(
            layout.check_wiring(&tight),
            Err(SynthError::Simulation(SimulationError::SignalDecay { .. }))
        ));
        let enough = SynthesisConfig::default().with_max_conductor_run(6);
        layout.check_wiring(&enough).unwrap();
    }

    /// AND layout with extra cells far above the circuit, for the wiring checks.
    fn tampered(cells: &[(Position, CellKind)], edges: &[(Position, Position)]) -> Layout {
        let mut layout = synthesize(&table(&["000", "010", "100", "111"])).unwrap();
        let (grid, netlist) = layout.wiring_mut();
        for &(position, kind) in cells {
            grid.place(position, kind).unwrap();
        }
        for &(from, to) in edges {
            netlist.connect(from, to);
        }
        layout
    }

    fn wiring_error(layout: &Layout) -> SimulationError {
        match layout.check_wiring(&SynthesisConfig::default()) {
            Err(SynthError::Simulation(e)) => e,
            other => panic!("expected a wiring error, got {:?}", other),
        }
    }

    #[test]
    fn not_adjacent_test() {
        let a = Position::new(50, 0, 0);
        let b = Position::new(50, 0, 2);
        let layout = tampered(
            &[(a, CellKind::Conductor), (b, CellKind::Conductor)],
            &[(a, b)],
        );
        assert_eq!(
            wiring_error(&layout),
            SimulationError::NotAdjacent { from: a, to: b }
        );
    }

    #[test]
    fn orientation_test() {
        // Inverter facing east, fed from its east side
        let inverter = Position::new(50, 0, 1);
        let source = Position::new(50, 0, 2);
        let layout = tampered(
            &[
                (inverter, CellKind::Inverter(Direction::East)),
                (source, CellKind::Conductor),
            ],
            &[(source, inverter)],
        );
        assert_eq!(
            wiring_error(&layout),
            SimulationError::Orientation {
                position: inverter,
                fanin: source
            }
        );
    }

    #[test]
    fn broken_wire_test() {
        let solid = Position::new(50, 0, 0);
        let wire = Position::new(50, 0, 1);
        let layout = tampered(
            &[(solid, CellKind::Solid), (wire, CellKind::Conductor)],
            &[(solid, wire)],
        );
        assert_eq!(
            wiring_error(&layout),
            SimulationError::BrokenWire {
                position: solid,
                kind: CellKind::Solid
            }
        );
    }

    #[test]
    fn short_test() {
        let a = Position::new(50, 0, 0);
        let b = Position::new(50, 0, 1);
        let layout = tampered(&[(a, CellKind::Conductor), (b, CellKind::Conductor)], &[]);
        assert_eq!(wiring_error(&layout), SimulationError::Short { a, b });
    }

    #[test]
    fn unreachable_test() {
        let a = Position::new(50, 0, 0);
        let b = Position::new(50, 0, 1);
        let layout = tampered(
            &[(a, CellKind::Conductor), (b, CellKind::Conductor)],
            &[(a, b)],
        );
        assert_eq!(wiring_error(&layout), SimulationError::Unreachable(a));
        // Simulation only follows the output cone
        assert!(layout.simulate(&[true, true]).unwrap());
    }

    #[test]
    fn contradictory_rows_test() {
        let table = table(&["011", "010", "000"]);
        let layout = synthesize(&table).unwrap();
        assert!(matches!(
            layout.verify(&table, &SynthesisConfig::default()),
            Err(SynthError::Simulation(SimulationError::Mismatch { .. }))
        ));
    }

    #[test]
    fn fanin_count_test() {
        assert_eq!(
            single_fanin(Position::new(0, 0, 0), &[]),
            Err(SimulationError::FaninCount {
                position: Position::new(0, 0, 0),
                expected: 1,
                found: 0
            })
        );
        let p = Position::new(1, 1, 1);
        assert_eq!(single_fanin(p, &[p]), Ok(p));
        assert_eq!(CellKind::Inverter(Direction::Up).facing(), Some(Direction::Up));
    }
}
