//! Structural context shared read-only by every encoding call.
//!
//! The matrices come from the out-of-scope structure parser: true pairwise
//! side-chain distances, a closeness factor (1 - normalized distance) and a
//! boolean contact mask thresholded at `distance_threshold`.

use ndarray::Array2;

use crate::error::{EncodeError, Result};

/// Distance matrix, factor matrix and contact mask for one wild-type
/// structure. Immutable for the duration of a run.
#[derive(Debug, Clone)]
pub struct StructuralContext {
    distances: Array2<f32>,
    factor: Array2<f32>,
    contacts: Array2<bool>,
    distance_threshold: f32,
}

impl StructuralContext {
    /// Validates that all three matrices are square and agree in shape.
    /// Raised here, at construction, never deferred to the first batch.
    pub fn new(
        distances: Array2<f32>,
        factor: Array2<f32>,
        contacts: Array2<bool>,
        distance_threshold: f32,
    ) -> Result<Self> {
        let dim = distances.dim();
        if dim.0 != dim.1 {
            return Err(EncodeError::ShapeMismatch {
                expected: (dim.0, dim.0),
                found: dim,
            });
        }
        for shape in [factor.dim(), contacts.dim()] {
            if shape != dim {
                return Err(EncodeError::ShapeMismatch {
                    expected: dim,
                    found: shape,
                });
            }
        }
        Ok(Self {
            distances,
            factor,
            contacts,
            distance_threshold,
        })
    }

    /// Number of residues covered by the structure.
    pub fn len(&self) -> usize {
        self.contacts.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fails when the wild-type sequence length disagrees with the
    /// structure-derived matrices. Residue-identity checking against the
    /// structure file is the structure parser's responsibility.
    pub fn check_sequence_len(&self, sequence_len: usize) -> Result<()> {
        if sequence_len != self.len() {
            return Err(EncodeError::SequenceMismatch {
                sequence_len,
                structure_len: self.len(),
            });
        }
        Ok(())
    }

    pub fn distances(&self) -> &Array2<f32> {
        &self.distances
    }

    pub fn factor(&self) -> &Array2<f32> {
        &self.factor
    }

    pub fn contacts(&self) -> &Array2<bool> {
        &self.contacts
    }

    /// Cutoff the structure parser applied when deriving the contact
    /// mask. The mask already encodes it, so tensor assembly never reads
    /// this value; it is kept so consumers can report or re-derive the
    /// contact criterion alongside the matrices.
    pub fn distance_threshold(&self) -> f32 {
        self.distance_threshold
    }
}
