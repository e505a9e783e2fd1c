//! provar-encoding: variant-to-tensor encoding for structure-based
//! protein variant effect prediction.
//!
//! This crate turns a textual mutation list (e.g. `"S1A,D35T"`) plus a fixed
//! wild-type structure into a dense multi-channel `n x n` interaction tensor
//! (n = sequence length), and streams batches of such tensors for training.
//! It also provides the combinatorial data augmentation used to synthesize
//! higher-order mutants from existing low-order ones.
//!
//! Structure parsing (PDB -> distance/contact matrices), dataset splitting
//! and the training loop itself live outside this crate; the library only
//! consumes their in-memory outputs.
pub mod augment;
pub mod conservation;
pub mod error;
pub mod generator;
pub mod interactions;
pub mod residues;
pub mod structure;
pub mod variant;
pub mod wildtype;

pub use error::EncodeError;
