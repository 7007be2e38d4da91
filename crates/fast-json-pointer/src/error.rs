//! Error taxonomy: a single [`JsonPointerError`] root split into parse and
//! resolution failures.

use thiserror::Error;

use crate::resolve::DocRef;

/// Any failure raised by this crate.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum JsonPointerError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    /// A patch operation was asked to mutate something that has no mutable
    /// target, e.g. the document root or an index-of relative pointer.
    #[error("invalid operation target: {0}")]
    InvalidTarget(String),
}

/// Malformed pointer text, absolute or relative grammar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("json pointer must be empty or start with '/'")]
    NotAbsolute,
    #[error("invalid escape `{0}`, only ~0 and ~1 are allowed")]
    InvalidEscape(String),
    #[error("relative json pointer must begin with a non-negative integer")]
    MissingOffset,
    #[error("relative json pointer offset is out of range")]
    OffsetOutOfRange,
    #[error("relative json pointer has symbols after '#'")]
    SymbolsAfterHash,
}

/// Navigation failure, carrying the reference chain resolved so far and the
/// segments that were never consumed.
///
/// `chain` always starts at the document root (or the relative pointer's
/// base), so `remaining.len() == 1` means only the final segment was
/// missing, which [`crate::ops::add`] treats as a creatable position.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind} at `{}` ({} segment(s) unresolved)", resolved_location(.chain), remaining_count(.remaining))]
pub struct ResolutionError {
    pub kind: ResolutionErrorKind,
    pub chain: Vec<DocRef>,
    pub remaining: Vec<String>,
}

impl ResolutionError {
    /// The deepest reference that did resolve, if any.
    pub fn last_resolved(&self) -> Option<&DocRef> {
        self.chain.last()
    }

    /// Whether this failure is the distinguished `-` end-of-array case.
    pub fn is_end_of_array(&self) -> bool {
        matches!(self.kind, ResolutionErrorKind::EndOfArray)
    }
}

fn resolved_location(chain: &[DocRef]) -> String {
    chain
        .last()
        .map(|r| r.location.to_string())
        .unwrap_or_default()
}

fn remaining_count(remaining: &[String]) -> usize {
    remaining.len()
}

/// The specific way a resolution step failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolutionErrorKind {
    #[error("key `{0}` not in object")]
    MissingKey(String),
    #[error("index {0} not in array")]
    OutOfBounds(usize),
    #[error("`{0}` is not a valid array index")]
    InvalidIndex(String),
    /// Hit the `-` end-of-array token: a structurally valid position that
    /// holds no value yet.
    #[error("hit `-` (end of array) token")]
    EndOfArray,
    #[error("cannot navigate into a scalar value")]
    NotNavigable,
    #[error("relative pointer ascends past the document root")]
    AscendsPastRoot,
    #[error("the document root has no name or index")]
    RootHasNoName,
}
