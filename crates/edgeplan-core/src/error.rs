//! Error types for catalogue construction, input parsing, and scoring.

use thiserror::Error;

/// Errors raised while building a [`crate::Catalogue`] from raw records.
///
/// All of these are fatal input-corruption conditions: the catalogue is
/// never partially constructed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("cache id {cache} out of range (have {caches} caches)")]
    CacheOutOfRange { cache: usize, caches: usize },

    #[error("video id {video} out of range (have {videos} videos)")]
    VideoOutOfRange { video: usize, videos: usize },

    #[error("endpoint id {endpoint} out of range (have {endpoints} endpoints)")]
    EndpointOutOfRange { endpoint: usize, endpoints: usize },
}

/// Errors raised while reading the whitespace-token input format.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected end of input while reading {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("invalid token {found:?} while reading {expected}")]
    InvalidToken { expected: &'static str, found: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Errors raised while reading or validating an assignment file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssignmentError {
    #[error("assignment declares {declared} cache lines but the catalogue has {caches} caches")]
    TooManyCaches { declared: usize, caches: usize },

    #[error("cache {0} listed more than once")]
    DuplicateCache(usize),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("invalid token {found:?} while reading {expected}")]
    InvalidToken { expected: &'static str, found: String },

    #[error("unexpected end of input while reading {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("cache {cache} holds {used} size units but capacity is {capacity}")]
    CapacityExceeded { cache: usize, used: u64, capacity: u64 },
}

pub type ModelResult<T> = Result<T, ModelError>;
pub type ParseResult<T> = Result<T, ParseError>;
pub type AssignmentResult<T> = Result<T, AssignmentError>;
