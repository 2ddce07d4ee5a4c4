//! Error kinds surfaced at the boundaries of the algebra (see `SPEC_FULL.md` §3).
//!
//! The empty result is never an error; these variants only cover the cases
//! §7 names: invalid atoms, kind/ambient mismatches, unknown variable
//! lookups and deserialization failures.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("invalid atom: {0}")]
    InvalidAtom(String),

    #[error("kind mismatch: {0}")]
    KindMismatch(String),

    #[error("ambient mismatch: elements belong to different ambient sets")]
    AmbientMismatch,

    #[error("unknown variable: {0}")]
    UnknownVariable(String),

    #[error("deserialization failure: {0}")]
    DeserializationFailure(String),
}
