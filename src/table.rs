//! Single-output truth tables and minterm extraction.
//!
//! A [`TruthTable`] is an ordered list of rows, each made of `n` input bits followed by one
//! output bit. The rows whose output is 1 are the [`Minterm`]s of the function, and their
//! order in the table fixes the order in which AND floors get stacked by the layout.
//!
//! ```rust
//! use redstone_sop::TruthTable;
//!
//! // 2-input OR
//! let table = TruthTable::new([[0u8, 0, 0], [1, 0, 1], [0, 1, 1], [1, 1, 1]]).unwrap();
//! let minterms: Vec<String> = table.minterms().iter().map(|m| m.to_string()).collect();
//! assert_eq!(minterms, vec!["10", "01", "11"]);
//! ```

mod parser;

use std::fmt::Display;

use crate::error::TableError;

/// The input bits of a row whose output is true.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Minterm(Vec<bool>);

impl Minterm {
    pub fn new(bits: Vec<bool>) -> Self {
        Minterm(bits)
    }

    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    /// Value of input `i`, `None` past the last input.
    pub fn bit(&self, i: usize) -> Option<bool> {
        self.0.get(i).copied()
    }

    /// Number of inputs, ie number of lanes of the AND gate realizing it.
    pub fn width(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the assignment is exactly this minterm.
    pub fn matches(&self, assignment: &[bool]) -> bool {
        self.0 == assignment
    }
}

impl Display for Minterm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &b in &self.0 {
            write!(f, "{}", if b { '1' } else { '0' })?;
        }
        Ok(())
    }
}

/// A validated single-output truth table.
///
/// Invariants (checked by [`TruthTable::new`]):
/// - at least one row
/// - at least one input column
/// - every row has the same width
/// - every cell is 0 or 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    inputs: Vec<Vec<bool>>,
    outputs: Vec<bool>,
}

impl TruthTable {
    /// Validates the rows and builds the table. The last column of each row is the output.
    pub fn new<R, I>(rows: I) -> Result<Self, TableError>
    where
        R: AsRef<[u8]>,
        I: IntoIterator<Item = R>,
    {
        let mut inputs = Vec::new();
        let mut outputs = Vec::new();
        let mut width = None;

        for (r, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();
            let expected = *width.get_or_insert(row.len());
            if row.len() != expected {
                return Err(TableError::RowWidth {
                    row: r,
                    expected,
                    found: row.len(),
                });
            }
            if row.len() < 2 {
                return Err(TableError::NoInputs);
            }

            let bits = row
                .iter()
                .enumerate()
                .map(|(column, &value)| match value {
                    0 => Ok(false),
                    1 => Ok(true),
                    _ => Err(TableError::NonBinary {
                        row: r,
                        column,
                        value,
                    }),
                })
                .collect::<Result<Vec<bool>, TableError>>()?;

            let (output, row_inputs) = bits.split_last().ok_or(TableError::NoInputs)?;
            inputs.push(row_inputs.to_vec());
            outputs.push(*output);
        }

        if outputs.is_empty() {
            return Err(TableError::Empty);
        }

        Ok(TruthTable { inputs, outputs })
    }

    /// Number of input columns `n`.
    pub fn num_inputs(&self) -> usize {
        self.inputs[0].len()
    }

    pub fn num_rows(&self) -> usize {
        self.outputs.len()
    }

    /// Iterates over `(inputs, output)` in table order.
    pub fn rows(&self) -> impl Iterator<Item = (&[bool], bool)> {
        self.inputs
            .iter()
            .map(Vec::as_slice)
            .zip(self.outputs.iter().copied())
    }

    /// The rows whose output is true, in table order and without deduplication.
    pub fn minterms(&self) -> Vec<Minterm> {
        self.rows()
            .filter(|(_, output)| *output)
            .map(|(inputs, _)| Minterm::new(inputs.to_vec()))
            .collect()
    }

    /// Evaluates the function as the OR of its minterms.
    /// Assignments absent from the table evaluate to false.
    pub fn evaluate(&self, assignment: &[bool]) -> Result<bool, TableError> {
        if assignment.len() != self.num_inputs() {
            return Err(TableError::InputWidth {
                expected: self.num_inputs(),
                found: assignment.len(),
            });
        }
        Ok(self
            .rows()
            .any(|(inputs, output)| output && inputs == assignment))
    }
}

/// Validates raw rows and returns their minterms in one go.
pub fn extract_minterms<R, I>(rows: I) -> Result<Vec<Minterm>, TableError>
where
    R: AsRef<[u8]>,
    I: IntoIterator<Item = R>,
{
    Ok(TruthTable::new(rows)?.minterms())
}

#[cfg(test)]
mod test {
    use super::*;

    fn bits(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn or_minterms_test() {
        let minterms = extract_minterms([[0u8, 0, 0], [1, 0, 1], [0, 1, 1], [1, 1, 1]]).unwrap();
        assert_eq!(
            minterms,
            vec![
                Minterm::new(bits("10")),
                Minterm::new(bits("01")),
                Minterm::new(bits("11"))
            ]
        );
    }

    #[test]
    fn minterms_keep_duplicates_and_order_test() {
        let table = TruthTable::new([[1u8, 1, 1], [0, 0, 1], [1, 1, 1]]).unwrap();
        let minterms = table.minterms();
        assert_eq!(minterms.len(), 3);
        assert_eq!(minterms[0].to_string(), "11");
        assert_eq!(minterms[1].to_string(), "00");
        assert_eq!(minterms[2], minterms[0]);
    }

    #[test]
    fn minterm_bit_test() {
        let minterm = Minterm::new(bits("10"));
        assert_eq!(minterm.bit(0), Some(true));
        assert_eq!(minterm.bit(1), Some(false));
        assert_eq!(minterm.bit(2), None);
    }

    #[test]
    fn constant_false_has_no_minterms_test() {
        let table = TruthTable::new([[0u8, 0], [1, 0]]).unwrap();
        assert!(table.minterms().is_empty());
    }

    #[test]
    fn invalid_tables_test() {
        let empty: [[u8; 2]; 0] = [];
        assert_eq!(TruthTable::new(empty), Err(TableError::Empty));
        assert_eq!(TruthTable::new([[1u8], [0]]), Err(TableError::NoInputs));
        assert_eq!(
            TruthTable::new(vec![vec![0u8, 1], vec![0, 1, 1]]),
            Err(TableError::RowWidth {
                row: 1,
                expected: 2,
                found: 3
            })
        );
        assert_eq!(
            TruthTable::new([[0u8, 2, 1]]),
            Err(TableError::NonBinary {
                row: 0,
                column: 1,
                value: 2
            })
        );
    }

    #[test]
    fn evaluate_test() {
        let xor = TruthTable::new([[0u8, 0, 0], [0, 1, 1], [1, 0, 1], [1, 1, 0]]).unwrap();
        assert!(!xor.evaluate(&bits("00")).unwrap());
        assert!(xor.evaluate(&bits("01")).unwrap());
        assert!(xor.evaluate(&bits("10")).unwrap());
        assert!(!xor.evaluate(&bits("11")).unwrap());
        assert!(xor.evaluate(&bits("1")).is_err());

        // Partial table, missing rows are false
        let partial = TruthTable::new([[1u8, 1, 1]]).unwrap();
        assert!(!partial.evaluate(&bits("00")).unwrap());
    }
}
