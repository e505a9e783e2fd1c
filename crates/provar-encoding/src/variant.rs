//! Parsing of variant strings into point mutations.
//!
//! A variant is a comma-joined list of tokens like `"S1A"`: wild-type
//! letter, 1-based position (offset by `first_ind`), substituted letter.
//! The empty string denotes the wild type itself.

use crate::error::{EncodeError, Result};
use crate::residues::AminoAcid;

/// One point mutation, with the position already mapped to a 0-based
/// sequence index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mutation {
    pub position: usize,
    pub wild_type: AminoAcid,
    pub new_residue: AminoAcid,
}

/// Parses a full variant string against a sequence of length `len`.
///
/// # Arguments
/// * `variant` - e.g. `"S1A,D35T"`; empty or whitespace-only means wild type
/// * `first_ind` - offset of the first residue in the numbering scheme
/// * `len` - wild-type sequence length, for bounds checking
///
/// # Errors
/// Fails on malformed tokens, unknown residue letters, positions outside
/// `[0, len)` after offset correction, and duplicate positions within one
/// variant.
pub fn parse_variant(variant: &str, first_ind: i64, len: usize) -> Result<Vec<Mutation>> {
    let trimmed = variant.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let mut mutations = Vec::new();
    for token in trimmed.split(',') {
        let mutation = parse_token(token.trim(), first_ind, len)?;
        if mutations.iter().any(|m: &Mutation| m.position == mutation.position) {
            return Err(EncodeError::InvalidVariant(format!(
                "{} (duplicate position)",
                token.trim()
            )));
        }
        mutations.push(mutation);
    }
    Ok(mutations)
}

/// Number of point mutations a variant string denotes.
pub fn mutation_count(variant: &str) -> usize {
    let trimmed = variant.trim();
    if trimmed.is_empty() {
        0
    } else {
        trimmed.split(',').count()
    }
}

/// Position field of a raw token (`"S1A"` -> 1), if the token is well formed.
/// Used by augmentation to detect positional collisions without a full parse.
pub fn token_position(token: &str) -> Option<i64> {
    let token = token.trim();
    let digits: String = token
        .chars()
        .skip(1)
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if token.len() < 3 || digits.is_empty() {
        return None;
    }
    // wt letter + digits + new letter, nothing else
    if token.len() != 1 + digits.len() + 1 {
        return None;
    }
    digits.parse().ok()
}

fn parse_token(token: &str, first_ind: i64, len: usize) -> Result<Mutation> {
    let mut chars = token.chars();
    let wt_char = chars
        .next()
        .ok_or_else(|| EncodeError::InvalidVariant(token.to_string()))?;
    let rest: Vec<char> = chars.collect();
    if rest.len() < 2 {
        return Err(EncodeError::InvalidVariant(token.to_string()));
    }

    let new_char = rest[rest.len() - 1];
    let digits: String = rest[..rest.len() - 1].iter().collect();
    let numbered: i64 = digits
        .parse()
        .map_err(|_| EncodeError::InvalidVariant(token.to_string()))?;

    let wild_type = AminoAcid::from_char(wt_char)?;
    let new_residue = AminoAcid::from_char(new_char)?;

    let position = numbered - first_ind;
    if position < 0 || position as usize >= len {
        return Err(EncodeError::PositionOutOfRange { position, len });
    }

    Ok(Mutation {
        position: position as usize,
        wild_type,
        new_residue,
    })
}
