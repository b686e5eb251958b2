//! Vertical transport between floors.
//!
//! Inputs go up the riser column: every boundary between two floors holds an inverter and a
//! refresher, and the stub at the bottom of the next floor inverts once more, so each floor
//! reads the primary inputs with their original polarity.
//!
//! Floor outputs go down a staircase on the junction row. Each step is an inverter on a support
//! followed by a one cell tread, and staircases always have an even number of steps.

use tracing::trace;

use super::{
    Canvas, CellKind, Direction, Position,
    coords::{
        RISER_COLUMN, Step, body_layer, collector_layer, floor_base_layer, junction_position,
        lane_row, staircase_steps, step_position_for,
    },
};
use crate::{Result, SynthError};

/// Carries every input from floor `index` to the stub of floor `index + 1`.
pub(super) fn raise(canvas: &mut Canvas, index: usize, num_inputs: usize) -> Result<()> {
    let next_base = floor_base_layer(index + 1);
    for lane in 0..num_inputs {
        let row = lane_row(lane);
        let riser = Position::new(body_layer(index), row, RISER_COLUMN);
        let inverter = Position::new(collector_layer(index), row, RISER_COLUMN);
        let refresher = Position::new(collector_layer(index) + 1, row, RISER_COLUMN);
        let stub = Position::new(next_base, row, RISER_COLUMN);
        if refresher.layer + 1 != stub.layer {
            return Err(SynthError::InvalidState(format!(
                "riser of floor {} does not reach floor {}",
                index,
                index + 1
            )));
        }

        canvas.place(inverter, CellKind::Inverter(Direction::Up))?;
        canvas.place(refresher, CellKind::Refresher(Direction::Up))?;
        canvas.wire(riser, inverter);
        canvas.wire(inverter, refresher);
        canvas.wire(refresher, stub);
    }
    trace!(floor = index, lanes = num_inputs, "raised inputs");
    Ok(())
}

/// Builds the staircase taking the junction of floor `index` down to the ground bus.
///
/// Returns the steps lowest first, none for floor 0 whose junction already sits on the bus
/// layer.
pub(super) fn descend(canvas: &mut Canvas, index: usize, num_inputs: usize) -> Result<Vec<Step>> {
    let count = staircase_steps(index);
    let steps = (0..count)
        .map(|s| {
            step_position_for(index, s, num_inputs).ok_or_else(|| {
                SynthError::InvalidState(format!("floor {} has no staircase step {}", index, s))
            })
        })
        .collect::<Result<Vec<Step>>>()?;

    for step in &steps {
        canvas.place(step.support, CellKind::Solid)?;
        canvas.place(step.tread, CellKind::Conductor)?;
        canvas.place(step.inverter, CellKind::Inverter(Direction::East))?;
        canvas.wire(step.tread, step.inverter);
    }

    if let Some(top) = steps.last() {
        canvas.wire(junction_position(index, num_inputs), top.tread);
    }
    for pair in steps.windows(2) {
        // Each inverter drops onto the tread of the step below
        canvas.wire(pair[1].inverter, pair[0].tread);
    }

    trace!(floor = index, steps = count, "built staircase");
    Ok(steps)
}
