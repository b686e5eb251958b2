//! One AND gate per minterm.
//!
//! Inside floor `k` (base layer `b`), lane `i` on row `2i` reads, column by column:
//!
//! | layer | riser (0)                  | polarity (1)         | lane (2)  | negator (3) | collector (4)     | junction (5)   |
//! |-------|----------------------------|----------------------|-----------|-------------|-------------------|----------------|
//! | b + 2 | (riser, see `bus`)         |                      |           | inverter    | conductor         |                |
//! | b + 1 | conductor                  | conductor / inverter | conductor | solid       | solid             | inverter (last lane) |
//! | b     | inverter stub (solid if k = 0) | solid            | solid     |             |                   |                |
//!
//! The collector cells of consecutive lanes are joined by refreshers on the odd rows, so the
//! collector is the OR of every lane negator. The junction inverts the collector, which makes
//! it the AND of the polarity-corrected inputs.

use super::{
    Canvas, CellKind, Direction, Floor, Position,
    coords::{
        COLLECTOR_COLUMN, JUNCTION_COLUMN, LANE_COLUMN, NEGATOR_COLUMN, POLARITY_COLUMN,
        RISER_COLUMN, body_layer, collector_layer, floor_base_layer, floor_height, junction_position,
        lane_row, reserved_columns_for,
    },
};
use crate::{Result, SynthError, sop::Lane, sop::Product};

/// Polarity cell realizing the lane.
fn polarity_cell(lane: Lane) -> CellKind {
    match lane {
        Lane::Conductor => CellKind::Conductor,
        Lane::Inverter => CellKind::Inverter(Direction::East),
    }
}

/// Base of the riser: floor 0 gets the primary input, upper floors get the stub
/// fed by the transmission layer of the floor below.
fn build_riser_base(canvas: &mut Canvas, index: usize, lane: usize) -> Result<Position> {
    let base = floor_base_layer(index);
    let row = lane_row(lane);
    let riser = Position::new(body_layer(index), row, RISER_COLUMN);
    let below = Position::new(base, row, RISER_COLUMN);

    canvas.place(riser, CellKind::Conductor)?;
    if index == 0 {
        canvas.place(below, CellKind::Solid)?;
        let input = canvas.netlist.add_input(riser);
        if input != lane {
            return Err(SynthError::InvalidState(format!(
                "lane {} registered as input {}",
                lane, input
            )));
        }
    } else {
        canvas.place(below, CellKind::Inverter(Direction::Up))?;
        canvas.wire(below, riser);
    }
    Ok(riser)
}

/// Lane body, from the riser to the collector cell of the lane.
fn build_lane(canvas: &mut Canvas, index: usize, lane: usize, kind: Lane) -> Result<Position> {
    let base = floor_base_layer(index);
    let body = body_layer(index);
    let top = collector_layer(index);
    let row = lane_row(lane);

    let riser = build_riser_base(canvas, index, lane)?;

    let polarity = Position::new(body, row, POLARITY_COLUMN);
    canvas.place(Position::new(base, row, POLARITY_COLUMN), CellKind::Solid)?;
    canvas.place(polarity, polarity_cell(kind))?;
    canvas.wire(riser, polarity);

    let wire = Position::new(body, row, LANE_COLUMN);
    canvas.place(Position::new(base, row, LANE_COLUMN), CellKind::Solid)?;
    canvas.place(wire, CellKind::Conductor)?;
    canvas.wire(polarity, wire);

    let negator = Position::new(top, row, NEGATOR_COLUMN);
    canvas.place(Position::new(body, row, NEGATOR_COLUMN), CellKind::Solid)?;
    canvas.place(negator, CellKind::Inverter(Direction::Up))?;
    canvas.wire(wire, negator);

    let collector = Position::new(top, row, COLLECTOR_COLUMN);
    canvas.place(Position::new(body, row, COLLECTOR_COLUMN), CellKind::Solid)?;
    canvas.place(collector, CellKind::Conductor)?;
    canvas.wire(negator, collector);

    Ok(collector)
}

/// Places the AND gate of minterm `index` out of `count`, and returns where it went.
///
/// Only the lane bodies, the collector and the junction are placed here. The riser above the
/// body layer and the staircase belong to [`super::bus`].
pub(super) fn build(
    canvas: &mut Canvas,
    index: usize,
    count: usize,
    product: &Product,
) -> Result<Floor> {
    let lanes = product.lanes();
    let num_inputs = lanes.len();
    if num_inputs == 0 {
        return Err(SynthError::InvalidState(
            "cannot build an AND gate without inputs".to_string(),
        ));
    }

    let top = collector_layer(index);
    let mut previous: Option<Position> = None;
    for (lane, &kind) in lanes.iter().enumerate() {
        let collector = build_lane(canvas, index, lane, kind)?;

        // Refresher between this lane and the previous one
        if let Some(previous) = previous {
            let link = Position::new(top, collector.row - 1, COLLECTOR_COLUMN);
            canvas.place(
                Position::new(body_layer(index), link.row, COLLECTOR_COLUMN),
                CellKind::Solid,
            )?;
            canvas.place(link, CellKind::Refresher(Direction::South))?;
            canvas.wire(previous, link);
            canvas.wire(link, collector);
        }
        previous = Some(collector);
    }

    let junction = junction_position(index, num_inputs);
    let collector_end = previous.ok_or_else(|| {
        SynthError::InvalidState("AND gate without any collector".to_string())
    })?;
    canvas.place(junction, CellKind::Inverter(Direction::East))?;
    canvas.wire(collector_end, junction);

    debug_assert_eq!(junction.column, JUNCTION_COLUMN);
    Ok(Floor {
        index,
        base_layer: floor_base_layer(index),
        height: floor_height(index, count),
        junction,
        steps: Vec::new(),
        reserved_columns: reserved_columns_for(index),
    })
}
