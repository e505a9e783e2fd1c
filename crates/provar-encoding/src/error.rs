use std::error::Error;
use std::fmt;

/// Errors raised by the encoding pipeline.
///
/// Lookup failures (`UnknownResidue`) and malformed variants always
/// propagate: silently defaulting a property value would corrupt every
/// tensor built from that variant. Shape and sequence mismatches are
/// raised at construction time, never deferred to the first batch.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodeError {
    /// A residue letter is not part of the canonical 20-letter alphabet.
    UnknownResidue(char),
    /// A mutation token could not be parsed, or a variant names the same
    /// position twice.
    InvalidVariant(String),
    /// A mutation position falls outside the wild-type sequence after
    /// offset correction.
    PositionOutOfRange { position: i64, len: usize },
    /// Two matrices that must agree in shape do not.
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// The wild-type sequence does not match the structural context.
    SequenceMismatch {
        sequence_len: usize,
        structure_len: usize,
    },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EncodeError::UnknownResidue(c) => {
                write!(f, "unknown residue letter '{}'", c)
            }
            EncodeError::InvalidVariant(token) => {
                write!(f, "invalid mutation token '{}'", token)
            }
            EncodeError::PositionOutOfRange { position, len } => write!(
                f,
                "mutation position {} outside sequence of length {}",
                position, len
            ),
            EncodeError::ShapeMismatch { expected, found } => write!(
                f,
                "shape mismatch: expected {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            EncodeError::SequenceMismatch {
                sequence_len,
                structure_len,
            } => write!(
                f,
                "wild-type sequence length {} does not match structure length {}",
                sequence_len, structure_len
            ),
        }
    }
}

impl Error for EncodeError {}

pub type Result<T> = std::result::Result<T, EncodeError>;
