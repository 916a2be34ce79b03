//! The greedy selection/placement loop.
//!
//! All mutable run state (the savings matrix, per-cache remaining space,
//! per-cache commit-ordered video lists) is bundled in [`PlacementState`]
//! and threaded explicitly through the select / feasibility / commit /
//! update steps. The catalogue is read-only throughout.

use edgeplan_core::{Assignment, Catalogue};
use tracing::{debug, info, warn};

use crate::savings::{SavingsEntry, SavingsMatrix};

/// Tuning knobs for a solve run.
#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Emit a progress event every this many commits; 0 disables.
    pub progress_interval: u64,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self { progress_interval: 100 }
    }
}

/// Outcome of one loop iteration. Exactly one entry of the matrix is
/// permanently disabled per non-`Done` step, which bounds the whole run
/// at `caches × videos` iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The pair was placed: capacity decremented, entry marked committed,
    /// marginals for the video refreshed.
    Committed { cache: usize, video: usize, gain: i64 },
    /// The pair did not fit right now; only its entry changed. The video
    /// stays placeable elsewhere and the cache stays open to other videos.
    MarkedInfeasible { cache: usize, video: usize },
    /// No remaining placement can improve total savings.
    Done,
}

/// All mutable state of one greedy run.
pub struct PlacementState<'a> {
    catalogue: &'a Catalogue,
    matrix: SavingsMatrix,
    space_left: Vec<u64>,
    assigned: Vec<Vec<usize>>,
}

impl<'a> PlacementState<'a> {
    pub fn new(catalogue: &'a Catalogue) -> Self {
        Self {
            catalogue,
            matrix: SavingsMatrix::build(catalogue),
            space_left: vec![catalogue.cache_capacity; catalogue.cache_count],
            assigned: vec![Vec::new(); catalogue.cache_count],
        }
    }

    pub fn matrix(&self) -> &SavingsMatrix {
        &self.matrix
    }

    pub fn space_left(&self, cache: usize) -> u64 {
        self.space_left[cache]
    }

    pub fn assigned(&self, cache: usize) -> &[usize] {
        &self.assigned[cache]
    }

    /// Run one iteration of the loop.
    pub fn step(&mut self) -> Step {
        let Some((cache, video, gain)) = self.matrix.select_best() else {
            return Step::Done;
        };
        if gain <= 0 {
            return Step::Done;
        }

        let size = self.catalogue.videos[video].size;
        if self.space_left[cache] < size {
            self.matrix.set(cache, video, SavingsEntry::Infeasible);
            return Step::MarkedInfeasible { cache, video };
        }

        self.space_left[cache] -= size;
        self.assigned[cache].push(video);
        self.matrix.set(cache, video, SavingsEntry::Committed);
        self.refresh_video_savings(video);
        Step::Committed { cache, video, gain }
    }

    /// Recompute the marginal value of placing `video` anywhere else,
    /// given the caches that now hold it.
    ///
    /// Every ordinary entry in the video's column is rebuilt from zero:
    /// for each request, the benefit a cache can still add is capped by
    /// the best latency some already-committed, connected cache achieves
    /// for that request. Sentinel entries are left untouched.
    fn refresh_video_savings(&mut self, video: usize) {
        for cache in 0..self.catalogue.cache_count {
            if let SavingsEntry::Savings(_) = self.matrix.get(cache, video) {
                self.matrix.set(cache, video, SavingsEntry::Savings(0));
            }
        }

        for &request_id in &self.catalogue.videos[video].request_ids {
            let request = &self.catalogue.requests[request_id];
            let endpoint = &self.catalogue.endpoints[request.endpoint];

            let mut effective: Option<u64> = None;
            for &(cache, latency) in &endpoint.connections {
                if self.assigned[cache].contains(&video) {
                    effective = Some(effective.map_or(latency, |best| best.min(latency)));
                }
            }
            let effective = effective.unwrap_or(endpoint.datacenter_latency);

            for &(cache, latency) in &endpoint.connections {
                if let SavingsEntry::Savings(current) = self.matrix.get(cache, video) {
                    let residual = effective.saturating_sub(latency) * request.weight;
                    self.matrix
                        .set(cache, video, SavingsEntry::Savings(current + residual as i64));
                }
            }
        }
    }

    pub fn into_assignment(self) -> Assignment {
        Assignment { videos_per_cache: self.assigned }
    }
}

/// Run the greedy loop to termination and return the final assignment.
pub fn solve(catalogue: &Catalogue, options: &SolveOptions) -> Assignment {
    if catalogue.cache_count == 0 || catalogue.videos.is_empty() || catalogue.cache_capacity == 0 {
        warn!(
            caches = catalogue.cache_count,
            videos = catalogue.videos.len(),
            capacity = catalogue.cache_capacity,
            "degenerate input, nothing to place"
        );
    }

    let mut state = PlacementState::new(catalogue);
    let mut committed = 0u64;
    let mut total_saved = 0i64;

    loop {
        match state.step() {
            Step::Committed { cache, video, gain } => {
                committed += 1;
                total_saved += gain;
                debug!(cache, video, gain, "committed placement");
                if options.progress_interval > 0 && committed % options.progress_interval == 0 {
                    info!(committed, total_saved, "placement progress");
                }
            }
            Step::MarkedInfeasible { cache, video } => {
                debug!(cache, video, "capacity-infeasible pair");
            }
            Step::Done => break,
        }
    }

    info!(committed, total_saved, "placement complete");
    state.into_assignment()
}
