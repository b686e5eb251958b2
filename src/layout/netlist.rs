//! The wiring recorded alongside the grid.
//!
//! Builders record every intended signal hop as a directed edge between two grid positions.
//! The grid says *what* each cell does, the netlist says *where* its signal comes from.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::Position;
use crate::{Result, SynthError, sim::SimulationError};

/// Directed signal edges between grid positions, plus the circuit ports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Netlist {
    /// Fanins of each position, in insertion order.
    fanins: BTreeMap<Position, Vec<Position>>,
    /// `inputs[i]` is where input `i` enters the layout.
    inputs: Vec<Position>,
    output: Option<Position>,
}

impl Netlist {
    pub fn new() -> Self {
        Netlist::default()
    }

    /// Records that the signal of `from` drives `to`.
    pub fn connect(&mut self, from: Position, to: Position) {
        self.fanins.entry(from).or_default();
        let fanins = self.fanins.entry(to).or_default();
        if !fanins.contains(&from) {
            fanins.push(from);
        }
    }

    /// Registers the next primary input and returns its index.
    pub fn add_input(&mut self, position: Position) -> usize {
        self.fanins.entry(position).or_default();
        self.inputs.push(position);
        self.inputs.len() - 1
    }

    pub fn set_output(&mut self, position: Position) {
        self.fanins.entry(position).or_default();
        self.output = Some(position);
    }

    pub fn inputs(&self) -> &[Position] {
        &self.inputs
    }

    /// Index of the primary input entering at `position`, if any.
    pub fn input_index(&self, position: Position) -> Option<usize> {
        self.inputs.iter().position(|&p| p == position)
    }

    pub fn output(&self) -> Option<Position> {
        self.output
    }

    pub fn fanins(&self, position: Position) -> &[Position] {
        self.fanins
            .get(&position)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every position taking part in the wiring.
    pub fn nodes(&self) -> impl Iterator<Item = Position> + '_ {
        self.fanins.keys().copied()
    }

    /// Every `(from, to)` edge.
    pub fn edges(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        self.fanins
            .iter()
            .flat_map(|(&to, fanins)| fanins.iter().map(move |&from| (from, to)))
    }

    pub fn is_connected(&self, a: Position, b: Position) -> bool {
        self.fanins(a).contains(&b) || self.fanins(b).contains(&a)
    }

    fn topological_visit(
        &self,
        node: Position,
        sort: &mut Vec<Position>,
        seen: &mut HashSet<Position>,
        done: &mut HashSet<Position>,
    ) -> Result<()> {
        let mut stack: Vec<(Position, bool)> = vec![(node, false)];

        while let Some((node, last_time)) = stack.pop() {
            // Post order
            if last_time {
                done.insert(node);
                sort.push(node);
                continue;
            }

            if done.contains(&node) {
                continue;
            } else if seen.contains(&node) {
                return Err(SimulationError::Cycle(node).into());
            }

            seen.insert(node);
            stack.push((node, true));

            for &fanin in self.fanins(node) {
                if !done.contains(&fanin) {
                    stack.push((fanin, false));
                }
            }
        }

        Ok(())
    }

    /// Returns the positions the output depends on, every fanin before the node it drives.
    /// Fails if the wiring loops.
    pub fn topological_sort(&self) -> Result<Vec<Position>> {
        let mut sort = Vec::new();
        let mut seen = HashSet::new();
        let mut done = HashSet::new();
        if let Some(output) = self.output {
            self.topological_visit(output, &mut sort, &mut seen, &mut done)?;
        }
        Ok(sort)
    }

    /// Like [`Netlist::topological_sort`], but over every wired position, including the
    /// ones that do not reach the output.
    pub fn topological_sort_all(&self) -> Result<Vec<Position>> {
        let mut sort = Vec::new();
        let mut seen = HashSet::new();
        let mut done = HashSet::new();
        for node in self.nodes() {
            if !done.contains(&node) {
                self.topological_visit(node, &mut sort, &mut seen, &mut done)?;
            }
        }
        Ok(sort)
    }

    /// Positions which are wired but do not reach the output.
    pub fn dangling(&self) -> Result<BTreeSet<Position>> {
        let reached: HashSet<Position> = self.topological_sort()?.into_iter().collect();
        Ok(self.nodes().filter(|p| !reached.contains(p)).collect())
    }

    /// Checks that ports are wired nodes and that inputs are sources.
    pub fn check_integrity(&self) -> Result<()> {
        for (i, &input) in self.inputs.iter().enumerate() {
            if !self.fanins(input).is_empty() {
                return Err(SynthError::InvalidState(format!(
                    "input {} at {} is driven by another cell",
                    i, input
                )));
            }
        }
        if let Some(output) = self.output {
            if !self.fanins.contains_key(&output) {
                return Err(SynthError::InvalidState(format!(
                    "output {} is not part of the wiring",
                    output
                )));
            }
        }
        Ok(())
    }
}
