//! Per-position amino-acid conservation scores from a multiple-sequence
//! alignment. The table is produced by the out-of-scope alignment loader;
//! this module only validates and indexes it.

use ndarray::Array2;

use crate::error::{EncodeError, Result};
use crate::residues::{AminoAcid, RESIDUE_COUNT};

/// An n x 20 table: row = sequence position, column = residue
/// (see [`AminoAcid::conservation_column`]).
#[derive(Debug, Clone)]
pub struct ConservationTable {
    scores: Array2<f32>,
}

impl ConservationTable {
    pub fn new(scores: Array2<f32>) -> Result<Self> {
        if scores.ncols() != RESIDUE_COUNT {
            return Err(EncodeError::ShapeMismatch {
                expected: (scores.nrows(), RESIDUE_COUNT),
                found: scores.dim(),
            });
        }
        Ok(Self { scores })
    }

    /// Number of sequence positions the table covers.
    pub fn positions(&self) -> usize {
        self.scores.nrows()
    }

    /// Conservation of `residue` at 0-based sequence `position`.
    pub fn score(&self, position: usize, residue: AminoAcid) -> f32 {
        self.scores[[position, residue.conservation_column()]]
    }
}
