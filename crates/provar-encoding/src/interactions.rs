//! Variant tensor builder: one variant string in, one n x n x C tensor out.
//!
//! Every channel is restricted to contacting residue pairs and is
//! numerically symmetric because each entry is computed from the unordered
//! pair of (possibly mutated) per-residue values.

use ndarray::{Array1, Array3};

use crate::error::Result;
use crate::residues::{AminoAcid, HBOND_COMPATIBLE_PRODUCTS};
use crate::structure::StructuralContext;
use crate::variant;
use crate::wildtype::WildTypeContext;

/// Channel layout of the encoded tensor.
pub const CH_CONTACT: usize = 0;
pub const CH_HYDROPHOBICITY: usize = 1;
pub const CH_CHARGE: usize = 2;
pub const CH_HBOND: usize = 3;
pub const CH_SASA: usize = 4;
pub const CH_CLASH: usize = 5;
pub const CH_CONSERVATION: usize = 6;

/// Encodes one variant into an `n x n x C` tensor.
///
/// Starts from the wild-type per-residue property vectors, overlays the
/// substituted residues' values at the mutated positions (on local copies;
/// the shared contexts are never touched) and combines the vectors
/// pairwise under the contact mask.
///
/// # Arguments
/// * `variant_str` - comma-joined mutation tokens, `""` for wild type
/// * `wild_type` - precomputed wild-type context
/// * `structure` - distance/factor/contact matrices
/// * `first_ind` - numbering offset of the first residue
///
/// # Errors
/// Propagates unknown residue letters, malformed tokens and positions
/// outside the sequence; a failed sample must abort the whole batch.
pub fn encode_variant(
    variant_str: &str,
    wild_type: &WildTypeContext,
    structure: &StructuralContext,
    first_ind: i64,
) -> Result<Array3<f32>> {
    let n = wild_type.len();
    structure.check_sequence_len(n)?;

    let mutations = variant::parse_variant(variant_str, first_ind, n)?;

    // local overlays; wild-type vectors stay untouched
    let mut sequence: Vec<AminoAcid> = wild_type.sequence().to_vec();
    let mut hbond = wild_type.hbond().clone();
    let mut hydro = wild_type.hydrophobicity().clone();
    let mut charge = wild_type.charge().clone();
    let mut sasa = wild_type.sasa().clone();
    let mut side_chain = wild_type.side_chain().clone();

    for m in &mutations {
        sequence[m.position] = m.new_residue;
        hbond[m.position] = m.new_residue.hbond_class();
        hydro[m.position] = m.new_residue.hydrophobicity();
        charge[m.position] = m.new_residue.charge();
        sasa[m.position] = m.new_residue.max_sasa();
        side_chain[m.position] = m.new_residue.side_chain_length();
    }

    let channels = wild_type.channels();
    let mut tensor = Array3::zeros((n, n, channels));

    let contacts = structure.contacts();
    let factor = structure.factor();
    let distances = structure.distances();
    let conservation = wild_type.conservation().map(|table| {
        // conservation of the current (possibly substituted) residue at
        // each position
        sequence
            .iter()
            .enumerate()
            .map(|(pos, &aa)| table.score(pos, aa))
            .collect::<Array1<f32>>()
    });

    for i in 0..n {
        for j in 0..n {
            if !contacts[[i, j]] {
                continue;
            }
            tensor[[i, j, CH_CONTACT]] = 1.0;
            tensor[[i, j, CH_HYDROPHOBICITY]] = (hydro[i] - hydro[j]).abs()
                / wild_type.hydrophobicity_range()
                * factor[[i, j]];
            tensor[[i, j, CH_CHARGE]] = charge[i] * charge[j];
            if HBOND_COMPATIBLE_PRODUCTS.contains(&(hbond[i] * hbond[j])) {
                tensor[[i, j, CH_HBOND]] = factor[[i, j]];
            }
            tensor[[i, j, CH_SASA]] = (sasa[i] + sasa[j]) / wild_type.sasa_norm();
            let overlap = side_chain[i] + side_chain[j] - distances[[i, j]];
            tensor[[i, j, CH_CLASH]] = overlap.max(0.0) / wild_type.side_chain_norm();
            if let Some(cons) = &conservation {
                tensor[[i, j, CH_CONSERVATION]] = cons[i] * cons[j];
            }
        }
    }

    Ok(tensor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conservation::ConservationTable;
    use crate::error::EncodeError;
    use crate::residues::RESIDUE_COUNT;
    use ndarray::Array2;

    /// All-true off-diagonal contact mask, unit factor, fixed distances.
    fn synthetic_structure(n: usize, distance: f32) -> StructuralContext {
        let contacts = Array2::from_shape_fn((n, n), |(i, j)| i != j);
        StructuralContext::new(
            Array2::from_elem((n, n), distance),
            Array2::from_elem((n, n), 1.0),
            contacts,
            20.0,
        )
        .expect("synthetic structure")
    }

    #[test]
    fn wild_type_encoding_is_idempotent() {
        let wt = WildTypeContext::new("AVLI", None).unwrap();
        let structure = synthetic_structure(4, 10.0);
        let a = encode_variant("", &wt, &structure, 1).unwrap();
        let b = encode_variant("", &wt, &structure, 1).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.dim(), (4, 4, 6));
    }

    #[test]
    fn channels_are_pairwise_symmetric() {
        let wt = WildTypeContext::new("ARNDKE", None).unwrap();
        let structure = synthetic_structure(6, 5.0);
        let t = encode_variant("A1G,K5W", &wt, &structure, 1).unwrap();
        let (n, _, c) = t.dim();
        for ch in 0..c {
            for i in 0..n {
                for j in 0..n {
                    assert_eq!(t[[i, j, ch]], t[[j, i, ch]], "channel {}", ch);
                }
            }
        }
    }

    #[test]
    fn non_contacts_are_zero_in_every_channel() {
        let wt = WildTypeContext::new("ARNDKE", None).unwrap();
        // only the (0,1)/(1,0) pair interacts
        let mut contacts = Array2::from_elem((6, 6), false);
        contacts[[0, 1]] = true;
        contacts[[1, 0]] = true;
        let structure = StructuralContext::new(
            Array2::from_elem((6, 6), 3.0),
            Array2::from_elem((6, 6), 0.8),
            contacts,
            20.0,
        )
        .unwrap();

        let t = encode_variant("R2D", &wt, &structure, 1).unwrap();
        for i in 0..6 {
            for j in 0..6 {
                if (i, j) == (0, 1) || (i, j) == (1, 0) {
                    continue;
                }
                for ch in 0..6 {
                    assert_eq!(t[[i, j, ch]], 0.0);
                }
            }
        }
        assert_eq!(t[[0, 1, CH_CONTACT]], 1.0);
    }

    #[test]
    fn mutation_overlays_change_only_their_position() {
        let wt = WildTypeContext::new("AVLI", None).unwrap();
        let structure = synthetic_structure(4, 10.0);
        let base = encode_variant("", &wt, &structure, 1).unwrap();
        // A1G: glycine is less hydrophobic than alanine
        let mutated = encode_variant("A1G", &wt, &structure, 1).unwrap();

        let expected = (AminoAcid::Gly.hydrophobicity() - AminoAcid::Val.hydrophobicity()).abs()
            / wt.hydrophobicity_range();
        assert!((mutated[[0, 1, CH_HYDROPHOBICITY]] - expected).abs() < 1e-6);
        // pairs not touching position 0 keep their wild-type values
        assert_eq!(mutated[[2, 3, CH_HYDROPHOBICITY]], base[[2, 3, CH_HYDROPHOBICITY]]);
        assert_eq!(mutated[[2, 3, CH_SASA]], base[[2, 3, CH_SASA]]);
    }

    #[test]
    fn charge_channel_follows_sign_products() {
        // K (+1) and E (-1) in contact
        let wt = WildTypeContext::new("KE", None).unwrap();
        let structure = synthetic_structure(2, 8.0);
        let t = encode_variant("", &wt, &structure, 1).unwrap();
        assert_eq!(t[[0, 1, CH_CHARGE]], -1.0);
        // mutate E to R: repulsion
        let t = encode_variant("E2R", &wt, &structure, 1).unwrap();
        assert_eq!(t[[0, 1, CH_CHARGE]], 1.0);
    }

    #[test]
    fn hbond_channel_requires_a_compatible_pairing() {
        // K donor (1) vs D acceptor (2): product 2, compatible
        let wt = WildTypeContext::new("KD", None).unwrap();
        let structure = synthetic_structure(2, 8.0);
        let t = encode_variant("", &wt, &structure, 1).unwrap();
        assert_eq!(t[[0, 1, CH_HBOND]], 1.0);
        // two acceptors facing each other: product 4, not compatible
        let wt = WildTypeContext::new("DD", None).unwrap();
        let t = encode_variant("", &wt, &structure, 1).unwrap();
        assert_eq!(t[[0, 1, CH_HBOND]], 0.0);
    }

    #[test]
    fn clash_channel_penalizes_overlapping_side_chains() {
        // two arginines 4 A apart: combined reach 14.6 A, clearly clashing
        let wt = WildTypeContext::new("RR", None).unwrap();
        let structure = synthetic_structure(2, 4.0);
        let t = encode_variant("", &wt, &structure, 1).unwrap();
        let expected = (2.0 * AminoAcid::Arg.side_chain_length() - 4.0) / wt.side_chain_norm();
        assert!((t[[0, 1, CH_CLASH]] - expected).abs() < 1e-6);

        // far apart: no clash
        let structure = synthetic_structure(2, 19.0);
        let t = encode_variant("", &wt, &structure, 1).unwrap();
        assert_eq!(t[[0, 1, CH_CLASH]], 0.0);
    }

    #[test]
    fn conservation_channel_uses_the_substituted_residue() {
        let mut scores = Array2::zeros((2, RESIDUE_COUNT));
        scores[[0, AminoAcid::Ala.conservation_column()]] = 1.0;
        scores[[0, AminoAcid::Gly.conservation_column()]] = 0.5;
        scores[[1, AminoAcid::Val.conservation_column()]] = 0.8;
        let table = ConservationTable::new(scores).unwrap();

        let wt = WildTypeContext::new("AV", Some(table)).unwrap();
        let structure = synthetic_structure(2, 10.0);

        let t = encode_variant("", &wt, &structure, 1).unwrap();
        assert_eq!(t.dim(), (2, 2, 7));
        assert!((t[[0, 1, CH_CONSERVATION]] - 0.8).abs() < 1e-6);

        let t = encode_variant("A1G", &wt, &structure, 1).unwrap();
        assert!((t[[0, 1, CH_CONSERVATION]] - 0.4).abs() < 1e-6);
    }

    #[test]
    fn bad_variants_abort_encoding() {
        let wt = WildTypeContext::new("AVLI", None).unwrap();
        let structure = synthetic_structure(4, 10.0);
        assert!(matches!(
            encode_variant("A9G", &wt, &structure, 1),
            Err(EncodeError::PositionOutOfRange { .. })
        ));
        assert!(matches!(
            encode_variant("A1X", &wt, &structure, 1),
            Err(EncodeError::UnknownResidue('X'))
        ));
    }
}
