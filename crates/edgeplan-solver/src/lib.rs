//! edgeplan-solver — greedy video-to-cache placement.
//!
//! Repeatedly commits the (cache, video) pair with the highest remaining
//! marginal latency saving until no placement can improve the total,
//! recomputing marginal values incrementally after each commit. It does
//! NOT read or write the wire formats (that's `edgeplan-core`); it
//! consumes a [`Catalogue`](edgeplan_core::Catalogue) and produces an
//! [`Assignment`](edgeplan_core::Assignment).
//!
//! # Components
//!
//! - **`savings`** — dense marginal-savings matrix with tagged sentinel
//!   entries and the deterministic best-pair scan
//! - **`placer`** — the select / check / commit / update loop

pub mod placer;
pub mod savings;

pub use placer::{PlacementState, SolveOptions, Step, solve};
pub use savings::{SavingsEntry, SavingsMatrix};
