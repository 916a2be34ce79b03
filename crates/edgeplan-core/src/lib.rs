//! edgeplan-core — shared model and I/O adapters for the placement optimizer.
//!
//! This crate holds everything around the solver that carries no algorithmic
//! content:
//!
//! - **`model`** — immutable catalogue of videos, endpoints, caches, requests
//! - **`parse`** — whitespace-token input reader producing a [`Catalogue`]
//! - **`assignment`** — per-cache placement lists, emitted/read in the wire shape
//! - **`score`** — assignment validation and latency-savings scoring
//!
//! The greedy engine itself lives in `edgeplan-solver`.

pub mod assignment;
pub mod error;
pub mod model;
pub mod parse;
pub mod score;

pub use assignment::{Assignment, parse_assignment};
pub use error::{AssignmentError, ModelError, ParseError};
pub use model::{Catalogue, Endpoint, EndpointRecord, Request, Video};
pub use parse::parse_catalogue;
pub use score::{CacheUtilization, ScoreReport, score_assignment};
