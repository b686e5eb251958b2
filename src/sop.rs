//! The canonical (unminimized) sum-of-products network of a truth table.
//!
//! Every minterm becomes one full-width AND gate over its literals, and all gates are OR-ed.
//! No attempt is made to merge or reduce product terms. The per-input [`Lane`] of each AND gate
//! is chosen by [`synthesize_lanes`]: a `0` bit needs its input inverted before it can
//! contribute a true signal to the gate.

use std::fmt::Display;

use crate::{Minterm, TruthTable};

/// The physical realization of one literal inside an AND floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    /// The input is passed through as is (positive literal).
    Conductor,
    /// The input is negated (negative literal).
    Inverter,
}

impl Lane {
    /// Value carried by the lane for the given input value.
    pub fn apply(self, input: bool) -> bool {
        match self {
            Lane::Conductor => input,
            Lane::Inverter => !input,
        }
    }
}

/// One lane per input position: `Conductor` for a 1 bit, `Inverter` for a 0 bit.
pub fn synthesize_lanes(minterm: &Minterm) -> Vec<Lane> {
    minterm
        .bits()
        .iter()
        .map(|&bit| if bit { Lane::Conductor } else { Lane::Inverter })
        .collect()
}

/// A single AND term, with one lane per input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    minterm: Minterm,
    lanes: Vec<Lane>,
}

impl Product {
    pub fn new(minterm: Minterm) -> Self {
        let lanes = synthesize_lanes(&minterm);
        Product { minterm, lanes }
    }

    pub fn minterm(&self) -> &Minterm {
        &self.minterm
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    /// AND over the polarity-corrected inputs.
    pub fn evaluate(&self, assignment: &[bool]) -> bool {
        self.lanes.len() == assignment.len()
            && self
                .lanes
                .iter()
                .zip(assignment)
                .all(|(lane, &input)| lane.apply(input))
    }
}

impl Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, lane) in self.lanes.iter().enumerate() {
            if i > 0 {
                write!(f, "*")?;
            }
            match lane {
                Lane::Conductor => write!(f, "x{}", i)?,
                Lane::Inverter => write!(f, "~x{}", i)?,
            }
        }
        Ok(())
    }
}

/// OR of products, in minterm order (product 0 is realized by the lowest floor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SumOfProducts {
    num_inputs: usize,
    products: Vec<Product>,
}

impl SumOfProducts {
    /// Builds one product per minterm of the table.
    pub fn from_table(table: &TruthTable) -> Self {
        SumOfProducts {
            num_inputs: table.num_inputs(),
            products: table.minterms().into_iter().map(Product::new).collect(),
        }
    }

    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// True when the function has no true row at all.
    pub fn is_constant_false(&self) -> bool {
        self.products.is_empty()
    }

    /// The logical reference model, used to cross-check simulated layouts.
    pub fn evaluate(&self, assignment: &[bool]) -> bool {
        self.products.iter().any(|p| p.evaluate(assignment))
    }
}

impl Display for SumOfProducts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.products.is_empty() {
            return write!(f, "0");
        }
        for (i, product) in self.products.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}", product)?;
        }
        Ok(())
    }
}
