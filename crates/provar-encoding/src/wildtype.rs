//! Wild-type context: everything derived from the reference sequence once
//! per run and shared read-only by every variant encoding.

use ndarray::{Array1, Array2};

use crate::conservation::ConservationTable;
use crate::error::{EncodeError, Result};
use crate::residues::{self, AminoAcid};

/// Number of tensor channels without/with the conservation channel.
pub const BASE_CHANNELS: usize = 6;
pub const CHANNELS_WITH_CONSERVATION: usize = 7;

/// Precomputed wild-type constants and per-position property vectors.
///
/// Whether the conservation channel exists is decided here, once, by
/// supplying (or not supplying) a [`ConservationTable`]; tensor assembly
/// never branches on anything else.
#[derive(Debug, Clone)]
pub struct WildTypeContext {
    sequence: Vec<AminoAcid>,
    hbond: Array1<f32>,
    hydrophobicity: Array1<f32>,
    charge: Array1<f32>,
    sasa: Array1<f32>,
    side_chain: Array1<f32>,
    index_matrix: Array2<f32>,
    conservation: Option<ConservationTable>,
    hydrophobicity_range: f32,
    sasa_norm: f32,
    side_chain_norm: f32,
}

impl WildTypeContext {
    /// Encodes the wild-type sequence through the property tables.
    ///
    /// # Errors
    /// Fails on an unrecognized residue letter, or when a supplied
    /// conservation table does not cover exactly the sequence length.
    pub fn new(wt_seq: &str, conservation: Option<ConservationTable>) -> Result<Self> {
        let sequence = residues::parse_sequence(wt_seq)?;
        let n = sequence.len();

        if let Some(table) = &conservation {
            if table.positions() != n {
                return Err(EncodeError::ShapeMismatch {
                    expected: (n, residues::RESIDUE_COUNT),
                    found: (table.positions(), residues::RESIDUE_COUNT),
                });
            }
        }

        let collect = |f: fn(AminoAcid) -> f32| -> Array1<f32> {
            sequence.iter().map(|&aa| f(aa)).collect()
        };

        Ok(Self {
            hbond: collect(AminoAcid::hbond_class),
            hydrophobicity: collect(AminoAcid::hydrophobicity),
            charge: collect(AminoAcid::charge),
            sasa: collect(AminoAcid::max_sasa),
            side_chain: collect(AminoAcid::side_chain_length),
            index_matrix: build_index_matrix(n),
            conservation,
            hydrophobicity_range: residues::hydrophobicity_range(),
            sasa_norm: residues::sasa_norm(),
            side_chain_norm: residues::side_chain_norm(),
            sequence,
        })
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// 6 channels, or 7 when a conservation table was supplied.
    pub fn channels(&self) -> usize {
        if self.conservation.is_some() {
            CHANNELS_WITH_CONSERVATION
        } else {
            BASE_CHANNELS
        }
    }

    pub fn sequence(&self) -> &[AminoAcid] {
        &self.sequence
    }

    pub fn hbond(&self) -> &Array1<f32> {
        &self.hbond
    }

    pub fn hydrophobicity(&self) -> &Array1<f32> {
        &self.hydrophobicity
    }

    pub fn charge(&self) -> &Array1<f32> {
        &self.charge
    }

    pub fn sasa(&self) -> &Array1<f32> {
        &self.sasa
    }

    pub fn side_chain(&self) -> &Array1<f32> {
        &self.side_chain
    }

    /// Symmetric positional key matrix: zero diagonal, unique value per
    /// unordered pair, normalized to [0, 1]. Consumers use it as an
    /// adjacency-style positional encoding or as a deterministic
    /// tie-breaker between mirrored entries.
    pub fn index_matrix(&self) -> &Array2<f32> {
        &self.index_matrix
    }

    pub fn conservation(&self) -> Option<&ConservationTable> {
        self.conservation.as_ref()
    }

    pub fn hydrophobicity_range(&self) -> f32 {
        self.hydrophobicity_range
    }

    pub fn sasa_norm(&self) -> f32 {
        self.sasa_norm
    }

    pub fn side_chain_norm(&self) -> f32 {
        self.side_chain_norm
    }
}

/// Builds the symmetric index matrix: flatten 0..n^2-1 into an n x n grid,
/// normalize by n^2-1, mirror the upper triangle onto the lower one and
/// force the diagonal to exactly zero.
fn build_index_matrix(n: usize) -> Array2<f32> {
    let mat_size = n * n;
    let denom = if mat_size > 1 { (mat_size - 1) as f32 } else { 1.0 };
    Array2::from_shape_fn((n, n), |(i, j)| {
        if i == j {
            0.0
        } else {
            let (a, b) = if i < j { (i, j) } else { (j, i) };
            (a * n + b) as f32 / denom
        }
    })
}
