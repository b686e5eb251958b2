//! The ground level OR.
//!
//! Every floor output arrives on the bus layer at its reserved tap. The taps feed a single bus
//! row running west towards the light actuator, with a refresher in the second reserved column
//! of every minterm so that no conductor run grows with the number of minterms. The bus stops
//! at the tap of the last minterm, whose second reserved column is left empty.

use tracing::trace;

use super::{
    Canvas, CellKind, ConstantFalsePolicy, Direction, Position,
    coords::{
        ACTUATOR_COLUMN, BUS_LAYER, BUS_ORIGIN_COLUMN, SUPPORT_LAYER, bus_row, landing_position,
        reserved_columns_for, tap_column, tap_row,
    },
};
use crate::{Result, SynthError};

fn bus_cell(column: usize, num_inputs: usize) -> Position {
    Position::new(BUS_LAYER, bus_row(num_inputs), column)
}

fn actuator(canvas: &mut Canvas, num_inputs: usize) -> Result<Position> {
    let position = bus_cell(ACTUATOR_COLUMN, num_inputs);
    canvas.place(
        Position::new(SUPPORT_LAYER, position.row, position.column),
        CellKind::Solid,
    )?;
    canvas.place(position, CellKind::LightActuator)?;
    canvas.netlist.set_output(position);
    Ok(position)
}

/// Merges the outputs of `count` floors into the light actuator.
pub(super) fn build(canvas: &mut Canvas, count: usize, num_inputs: usize) -> Result<()> {
    if count == 0 {
        return Err(SynthError::InvalidState(
            "cannot combine zero minterms".to_string(),
        ));
    }

    let row = bus_row(num_inputs);
    let last_column = tap_column(count - 1);

    // Bus cells, from the actuator side up to the last tap
    for column in (ACTUATOR_COLUMN + 1)..=last_column {
        let kind = if column > BUS_ORIGIN_COLUMN && (column - BUS_ORIGIN_COLUMN) % 2 == 1 {
            CellKind::Refresher(Direction::West)
        } else {
            CellKind::Conductor
        };
        canvas.place(Position::new(SUPPORT_LAYER, row, column), CellKind::Solid)?;
        canvas.place(bus_cell(column, num_inputs), kind)?;
    }
    for column in (ACTUATOR_COLUMN + 1)..last_column {
        canvas.wire(
            bus_cell(column + 1, num_inputs),
            bus_cell(column, num_inputs),
        );
    }

    for k in 0..count {
        // The bus ends at the last tap, past it the column stays reserved but bare
        for column in reserved_columns_for(k)
            .into_iter()
            .filter(|&c| c <= last_column)
        {
            canvas.place(Position::new(SUPPORT_LAYER, row, column), CellKind::Solid)?;
        }

        let tap = Position::new(BUS_LAYER, tap_row(num_inputs), tap_column(k));
        canvas.place(
            Position::new(SUPPORT_LAYER, tap.row, tap.column),
            CellKind::Solid,
        )?;
        canvas.place(tap, CellKind::Conductor)?;
        canvas.wire(landing_position(k, num_inputs), tap);
        canvas.wire(tap, bus_cell(tap.column, num_inputs));
    }

    let output = actuator(canvas, num_inputs)?;
    canvas.wire(bus_cell(ACTUATOR_COLUMN + 1, num_inputs), output);
    trace!(minterms = count, columns = last_column + 1, "combined floors");
    Ok(())
}

/// Layout of a function that is never true.
pub(super) fn build_constant_false(
    canvas: &mut Canvas,
    num_inputs: usize,
    policy: ConstantFalsePolicy,
) -> Result<()> {
    match policy {
        ConstantFalsePolicy::UnpoweredActuator => {
            actuator(canvas, num_inputs)?;
        }
        ConstantFalsePolicy::OmitCircuit => {}
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bus_test() {
        let n = 2;
        let mut canvas = Canvas::default();
        build(&mut canvas, 3, n).unwrap();
        let grid = &canvas.grid;
        let row = bus_row(n);

        let kinds: Vec<CellKind> = (0..=9)
            .map(|c| grid.get(Position::new(BUS_LAYER, row, c)))
            .collect();
        let w = CellKind::Conductor;
        let r = CellKind::Refresher(Direction::West);
        assert_eq!(
            kinds,
            [CellKind::LightActuator, w, w, w, w, w, r, w, r, w]
        );
        // Nothing past the last tap, not even a support
        assert_eq!(
            grid.get(Position::new(BUS_LAYER, row, 10)),
            CellKind::Empty
        );
        assert_eq!(
            grid.get(Position::new(SUPPORT_LAYER, row, 10)),
            CellKind::Empty
        );
        // Every bus cell stands on a support
        for c in 0..=9 {
            assert_eq!(grid.get(Position::new(SUPPORT_LAYER, row, c)), CellKind::Solid);
        }
    }

    #[test]
    fn taps_test() {
        let n = 3;
        let mut canvas = Canvas::default();
        build(&mut canvas, 2, n).unwrap();
        for k in 0..2 {
            let tap = Position::new(BUS_LAYER, tap_row(n), tap_column(k));
            assert_eq!(canvas.grid.get(tap), CellKind::Conductor);
            assert_eq!(canvas.netlist.fanins(tap), &[landing_position(k, n)]);
            assert!(canvas.netlist.fanins(bus_cell(tap.column, n)).contains(&tap));
        }
        let output = canvas.netlist.output().unwrap();
        assert_eq!(canvas.netlist.fanins(output), &[bus_cell(1, n)]);
    }

    #[test]
    fn zero_minterms_test() {
        let mut canvas = Canvas::default();
        assert!(build(&mut canvas, 0, 2).is_err());

        build_constant_false(&mut canvas, 2, ConstantFalsePolicy::UnpoweredActuator).unwrap();
        assert_eq!(canvas.grid.len(), 2);
        let output = canvas.netlist.output().unwrap();
        assert!(canvas.netlist.fanins(output).is_empty());

        let mut canvas = Canvas::default();
        build_constant_false(&mut canvas, 2, ConstantFalsePolicy::OmitCircuit).unwrap();
        assert!(canvas.grid.is_empty());
        assert_eq!(canvas.netlist.output(), None);
    }
}
