//! Pure coordinate assignment.
//!
//! Every position the builders write to is derived from the functions below, from the number
//! of inputs `n`, the number of minterms and the index `k` of the minterm being built.
//!
//! Floors are stacked bottom-up, minterm `k` starting at layer `4k`. Inside a floor, lane `i`
//! lives on row `2i` and spans the columns [`RISER_COLUMN`] to [`COLLECTOR_COLUMN`]. The last lane
//! row also holds the junction, and the staircases returning the floor outputs to the ground.
//! The two rows right after the lanes are the ground bus: a tap row and the bus row itself.
//!
//! Functions taking `num_inputs` expect at least one input, see [`junction_row`].

use super::Position;

/// Layers of the AND gate itself: supports, lane bodies with the junction, collector.
pub const GATE_LAYERS: usize = 3;
/// Pure transmission layer added on top of every floor but the last.
pub const TRANSMISSION_LAYERS: usize = 1;

/// Rows between two consecutive lanes.
pub const LANE_PITCH: usize = 2;

/// Vertical riser carrying input signals from floor to floor.
pub const RISER_COLUMN: usize = 0;
/// The polarity cell, conductor or inverter depending on the literal.
pub const POLARITY_COLUMN: usize = 1;
pub const LANE_COLUMN: usize = 2;
/// Each lane ends with a negator on top of this column.
pub const NEGATOR_COLUMN: usize = 3;
/// The collector run merging every lane negator.
pub const COLLECTOR_COLUMN: usize = 4;
pub const JUNCTION_COLUMN: usize = 5;

/// First column of the ground bus reservations, directly under the junction of floor 0.
pub const BUS_ORIGIN_COLUMN: usize = JUNCTION_COLUMN;
/// Columns reserved on the ground bus per minterm.
pub const RESERVED_COLUMNS: usize = 2;
/// Column of the light actuator on the bus row.
pub const ACTUATOR_COLUMN: usize = 0;

/// Layer of the AND gate body (lanes, supports and junction are right above/below).
const BODY_OFFSET: usize = 1;
/// Layer where the bus conductors lie, one above the support layer 0.
pub const BUS_LAYER: usize = 1;
pub const SUPPORT_LAYER: usize = 0;

/// Number of layers used by floor `index` out of `count` floors.
pub fn floor_height(index: usize, count: usize) -> usize {
    if index + 1 < count {
        GATE_LAYERS + TRANSMISSION_LAYERS
    } else {
        GATE_LAYERS
    }
}

/// First layer of floor `index`. Every floor below it is a non-last floor.
pub fn floor_base_layer(index: usize) -> usize {
    index * (GATE_LAYERS + TRANSMISSION_LAYERS)
}

/// Total number of layers used by `count` floors.
pub fn total_floor_layers(count: usize) -> usize {
    (0..count).map(|k| floor_height(k, count)).sum()
}

pub fn lane_row(lane: usize) -> usize {
    lane * LANE_PITCH
}

/// Row of the last lane, which the junction and the staircases share.
///
/// # Panics
///
/// Panics if `num_inputs` is 0. Tables always have at least one input, and so does every
/// function below taking `num_inputs`.
pub fn junction_row(num_inputs: usize) -> usize {
    lane_row(num_inputs - 1)
}

/// Row of the short conductors tapping each reserved column.
pub fn tap_row(num_inputs: usize) -> usize {
    junction_row(num_inputs) + 1
}

/// Row of the ground bus feeding the actuator.
pub fn bus_row(num_inputs: usize) -> usize {
    junction_row(num_inputs) + 2
}

/// Layer of the lane bodies and of the junction of floor `index`.
pub fn body_layer(index: usize) -> usize {
    floor_base_layer(index) + BODY_OFFSET
}

/// Layer of the lane negators and of the collector of floor `index`.
pub fn collector_layer(index: usize) -> usize {
    body_layer(index) + 1
}

/// The confirmation junction (AND output) of floor `index`.
pub fn junction_position(index: usize, num_inputs: usize) -> Position {
    Position::new(body_layer(index), junction_row(num_inputs), JUNCTION_COLUMN)
}

/// Where input `lane` enters the layout: the riser cell of floor 0.
pub fn input_port(lane: usize) -> Position {
    Position::new(body_layer(0), lane_row(lane), RISER_COLUMN)
}

/// The two ground columns reserved for minterm `index`, pairwise disjoint across minterms.
/// The first one is the tap the staircase lands on.
pub fn reserved_columns_for(index: usize) -> [usize; RESERVED_COLUMNS] {
    let first = BUS_ORIGIN_COLUMN + RESERVED_COLUMNS * index;
    [first, first + 1]
}

pub fn tap_column(index: usize) -> usize {
    reserved_columns_for(index)[0]
}

/// Staircase steps for minterm `index`. Floor 0 sits on the ground and needs none.
pub fn staircase_steps(index: usize) -> usize {
    2 * index
}

/// One step of a staircase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub support: Position,
    /// Right beside the support, one column further from the floors.
    pub inverter: Position,
    /// Right above the support.
    pub tread: Position,
}

/// Position of step `step` of the staircase of minterm `index`, [`None`] if that staircase has
/// no such step (always the case for minterm 0).
///
/// Step 0 is the lowest one. Going down one step moves one column away from the floors, so the
/// highest step (`2k - 1`) sits right under the junction of floor `k`, and the inverter of step 0
/// ends up next to the tap of [`reserved_columns_for`]`(k)`.
pub fn step_position_for(index: usize, step: usize, num_inputs: usize) -> Option<Step> {
    if step >= staircase_steps(index) {
        return None;
    }
    let row = junction_row(num_inputs);
    let column = JUNCTION_COLUMN + staircase_steps(index) - 1 - step;
    let layer = 2 * step + 1;
    Some(Step {
        support: Position::new(layer, row, column),
        inverter: Position::new(layer, row, column + 1),
        tread: Position::new(layer + 1, row, column),
    })
}

/// Cell driving the reserved tap of minterm `index`: the junction itself on the ground floor,
/// else the inverter of the lowest staircase step.
pub fn landing_position(index: usize, num_inputs: usize) -> Position {
    match step_position_for(index, 0, num_inputs) {
        Some(step) => step.inverter,
        None => junction_position(index, num_inputs),
    }
}
