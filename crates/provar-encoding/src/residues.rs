//! Residue alphabet and per-residue chemical property tables.
//!
//! Properties are fixed lookup tables over the 20 canonical amino acids:
//! hydrophobicity (Kyte-Doolittle), side-chain hydrogen-bonding class,
//! formal charge at pH 7, maximum solvent-accessible surface area
//! (Tien et al. 2013, theoretical) and side-chain length in Angstrom.
//! The enum indexes these tables directly, so per-sample encoding does no
//! hashing and no allocation.

use crate::error::{EncodeError, Result};

/// One of the 20 canonical amino acids, ordered by single-letter code.
///
/// The discriminant doubles as the column index into the n x 20
/// conservation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AminoAcid {
    Ala,
    Cys,
    Asp,
    Glu,
    Phe,
    Gly,
    His,
    Ile,
    Lys,
    Leu,
    Met,
    Asn,
    Pro,
    Gln,
    Arg,
    Ser,
    Thr,
    Val,
    Trp,
    Tyr,
}

/// Number of canonical residues (width of the conservation table).
pub const RESIDUE_COUNT: usize = 20;

/// All residues in single-letter-code order.
pub const ALL_RESIDUES: [AminoAcid; RESIDUE_COUNT] = [
    AminoAcid::Ala,
    AminoAcid::Cys,
    AminoAcid::Asp,
    AminoAcid::Glu,
    AminoAcid::Phe,
    AminoAcid::Gly,
    AminoAcid::His,
    AminoAcid::Ile,
    AminoAcid::Lys,
    AminoAcid::Leu,
    AminoAcid::Met,
    AminoAcid::Asn,
    AminoAcid::Pro,
    AminoAcid::Gln,
    AminoAcid::Arg,
    AminoAcid::Ser,
    AminoAcid::Thr,
    AminoAcid::Val,
    AminoAcid::Trp,
    AminoAcid::Tyr,
];

/// Hydrogen-bond class products that mark a compatible donor/acceptor
/// pairing: donor x acceptor (2), donor x both (3), acceptor x both (6)
/// and both x both (9). Like pairings (1, 4) are excluded.
pub const HBOND_COMPATIBLE_PRODUCTS: [f32; 4] = [2.0, 3.0, 6.0, 9.0];

impl AminoAcid {
    /// Parses a single-letter residue code.
    pub fn from_char(c: char) -> Result<Self> {
        match c.to_ascii_uppercase() {
            'A' => Ok(AminoAcid::Ala),
            'C' => Ok(AminoAcid::Cys),
            'D' => Ok(AminoAcid::Asp),
            'E' => Ok(AminoAcid::Glu),
            'F' => Ok(AminoAcid::Phe),
            'G' => Ok(AminoAcid::Gly),
            'H' => Ok(AminoAcid::His),
            'I' => Ok(AminoAcid::Ile),
            'K' => Ok(AminoAcid::Lys),
            'L' => Ok(AminoAcid::Leu),
            'M' => Ok(AminoAcid::Met),
            'N' => Ok(AminoAcid::Asn),
            'P' => Ok(AminoAcid::Pro),
            'Q' => Ok(AminoAcid::Gln),
            'R' => Ok(AminoAcid::Arg),
            'S' => Ok(AminoAcid::Ser),
            'T' => Ok(AminoAcid::Thr),
            'V' => Ok(AminoAcid::Val),
            'W' => Ok(AminoAcid::Trp),
            'Y' => Ok(AminoAcid::Tyr),
            other => Err(EncodeError::UnknownResidue(other)),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            AminoAcid::Ala => 'A',
            AminoAcid::Cys => 'C',
            AminoAcid::Asp => 'D',
            AminoAcid::Glu => 'E',
            AminoAcid::Phe => 'F',
            AminoAcid::Gly => 'G',
            AminoAcid::His => 'H',
            AminoAcid::Ile => 'I',
            AminoAcid::Lys => 'K',
            AminoAcid::Leu => 'L',
            AminoAcid::Met => 'M',
            AminoAcid::Asn => 'N',
            AminoAcid::Pro => 'P',
            AminoAcid::Gln => 'Q',
            AminoAcid::Arg => 'R',
            AminoAcid::Ser => 'S',
            AminoAcid::Thr => 'T',
            AminoAcid::Val => 'V',
            AminoAcid::Trp => 'W',
            AminoAcid::Tyr => 'Y',
        }
    }

    /// Column of this residue in the n x 20 conservation table.
    pub fn conservation_column(self) -> usize {
        self as usize
    }

    /// Kyte-Doolittle hydropathy index.
    pub fn hydrophobicity(self) -> f32 {
        match self {
            AminoAcid::Ala => 1.8,
            AminoAcid::Cys => 2.5,
            AminoAcid::Asp => -3.5,
            AminoAcid::Glu => -3.5,
            AminoAcid::Phe => 2.8,
            AminoAcid::Gly => -0.4,
            AminoAcid::His => -3.2,
            AminoAcid::Ile => 4.5,
            AminoAcid::Lys => -3.9,
            AminoAcid::Leu => 3.8,
            AminoAcid::Met => 1.9,
            AminoAcid::Asn => -3.5,
            AminoAcid::Pro => -1.6,
            AminoAcid::Gln => -3.5,
            AminoAcid::Arg => -4.5,
            AminoAcid::Ser => -0.8,
            AminoAcid::Thr => -0.7,
            AminoAcid::Val => 4.2,
            AminoAcid::Trp => -0.9,
            AminoAcid::Tyr => -1.3,
        }
    }

    /// Side-chain hydrogen-bonding class: 0 none, 1 donor, 2 acceptor,
    /// 3 donor and acceptor.
    pub fn hbond_class(self) -> f32 {
        match self {
            AminoAcid::Ala
            | AminoAcid::Phe
            | AminoAcid::Gly
            | AminoAcid::Ile
            | AminoAcid::Leu
            | AminoAcid::Met
            | AminoAcid::Pro
            | AminoAcid::Val => 0.0,
            AminoAcid::Lys | AminoAcid::Arg | AminoAcid::Trp => 1.0,
            AminoAcid::Asp | AminoAcid::Glu => 2.0,
            AminoAcid::Cys
            | AminoAcid::His
            | AminoAcid::Asn
            | AminoAcid::Gln
            | AminoAcid::Ser
            | AminoAcid::Thr
            | AminoAcid::Tyr => 3.0,
        }
    }

    /// Formal side-chain charge at pH 7.
    pub fn charge(self) -> f32 {
        match self {
            AminoAcid::Asp | AminoAcid::Glu => -1.0,
            AminoAcid::His | AminoAcid::Lys | AminoAcid::Arg => 1.0,
            _ => 0.0,
        }
    }

    /// Theoretical maximum solvent-accessible surface area in A^2.
    pub fn max_sasa(self) -> f32 {
        match self {
            AminoAcid::Ala => 129.0,
            AminoAcid::Cys => 167.0,
            AminoAcid::Asp => 193.0,
            AminoAcid::Glu => 223.0,
            AminoAcid::Phe => 240.0,
            AminoAcid::Gly => 104.0,
            AminoAcid::His => 224.0,
            AminoAcid::Ile => 197.0,
            AminoAcid::Lys => 236.0,
            AminoAcid::Leu => 201.0,
            AminoAcid::Met => 224.0,
            AminoAcid::Asn => 195.0,
            AminoAcid::Pro => 159.0,
            AminoAcid::Gln => 225.0,
            AminoAcid::Arg => 274.0,
            AminoAcid::Ser => 155.0,
            AminoAcid::Thr => 172.0,
            AminoAcid::Val => 174.0,
            AminoAcid::Trp => 285.0,
            AminoAcid::Tyr => 263.0,
        }
    }

    /// Side-chain length in Angstrom (C-alpha to the most distal heavy atom).
    pub fn side_chain_length(self) -> f32 {
        match self {
            AminoAcid::Ala => 1.5,
            AminoAcid::Cys => 2.8,
            AminoAcid::Asp => 3.7,
            AminoAcid::Glu => 4.9,
            AminoAcid::Phe => 5.1,
            AminoAcid::Gly => 0.0,
            AminoAcid::His => 4.7,
            AminoAcid::Ile => 3.9,
            AminoAcid::Lys => 6.3,
            AminoAcid::Leu => 3.9,
            AminoAcid::Met => 5.3,
            AminoAcid::Asn => 3.7,
            AminoAcid::Pro => 2.4,
            AminoAcid::Gln => 4.8,
            AminoAcid::Arg => 7.3,
            AminoAcid::Ser => 2.4,
            AminoAcid::Thr => 2.6,
            AminoAcid::Val => 2.5,
            AminoAcid::Trp => 6.1,
            AminoAcid::Tyr => 6.5,
        }
    }
}

/// Spread of the hydrophobicity table (max - min), fixed for the whole run.
pub fn hydrophobicity_range() -> f32 {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for aa in ALL_RESIDUES {
        let h = aa.hydrophobicity();
        min = min.min(h);
        max = max.max(h);
    }
    max - min
}

/// Normalization for combined solvent accessibility: twice the table maximum.
pub fn sasa_norm() -> f32 {
    2.0 * ALL_RESIDUES
        .iter()
        .map(|aa| aa.max_sasa())
        .fold(f32::NEG_INFINITY, f32::max)
}

/// Normalization for combined side-chain length: twice the table maximum.
pub fn side_chain_norm() -> f32 {
    2.0 * ALL_RESIDUES
        .iter()
        .map(|aa| aa.side_chain_length())
        .fold(f32::NEG_INFINITY, f32::max)
}

/// Converts a wild-type sequence string into residues, failing on the first
/// unrecognized letter.
pub fn parse_sequence(seq: &str) -> Result<Vec<AminoAcid>> {
    seq.chars().map(AminoAcid::from_char).collect()
}
