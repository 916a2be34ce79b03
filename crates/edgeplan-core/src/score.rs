//! Assignment validation and latency-savings scoring.
//!
//! Scores an assignment against a catalogue the way a grading harness
//! would: per request, the saving is `(datacenter latency − best cached
//! latency) × weight`, and the final score is the total saving scaled by
//! `1000 / total request weight`, truncated to an integer.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::assignment::Assignment;
use crate::error::{AssignmentError, AssignmentResult, ModelError};
use crate::model::Catalogue;

/// Space used in a single cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheUtilization {
    pub cache: usize,
    pub used: u64,
    pub capacity: u64,
}

/// Scoring result for one assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Sum over requests of `(datacenter − best) × weight`, in ms·requests.
    pub total_latency_saved: u64,
    /// `total_latency_saved × 1000 / total_request_weight`, truncated.
    pub score: u64,
    pub total_request_weight: u64,
    /// Weight of requests that are served by some cache faster than the
    /// datacenter.
    pub cached_request_weight: u64,
    pub utilization: Vec<CacheUtilization>,
}

/// Validate `assignment` against `catalogue` and score it.
///
/// Fails on an out-of-range video id or a cache whose contents exceed the
/// shared capacity bound.
pub fn score_assignment(
    catalogue: &Catalogue,
    assignment: &Assignment,
) -> AssignmentResult<ScoreReport> {
    let mut holding: Vec<HashSet<usize>> = vec![HashSet::new(); assignment.cache_count()];
    let mut utilization = Vec::with_capacity(assignment.cache_count());

    for (cache, videos) in assignment.videos_per_cache.iter().enumerate() {
        let mut used = 0u64;
        for &video in videos {
            if video >= catalogue.videos.len() {
                return Err(ModelError::VideoOutOfRange {
                    video,
                    videos: catalogue.videos.len(),
                }
                .into());
            }
            used += catalogue.videos[video].size;
            holding[cache].insert(video);
        }
        if used > catalogue.cache_capacity {
            return Err(AssignmentError::CapacityExceeded {
                cache,
                used,
                capacity: catalogue.cache_capacity,
            });
        }
        utilization.push(CacheUtilization {
            cache,
            used,
            capacity: catalogue.cache_capacity,
        });
    }

    let mut total_latency_saved = 0u64;
    let mut cached_request_weight = 0u64;
    for request in &catalogue.requests {
        let endpoint = &catalogue.endpoints[request.endpoint];
        let worst = endpoint.datacenter_latency;
        let mut best = worst;
        for &(cache, latency) in &endpoint.connections {
            if cache < holding.len() && holding[cache].contains(&request.video) {
                best = best.min(latency);
            }
        }
        if best < worst {
            cached_request_weight += request.weight;
            total_latency_saved += (worst - best) * request.weight;
        }
    }

    let total_request_weight = catalogue.total_request_weight();
    let score = if total_request_weight == 0 {
        0
    } else {
        (total_latency_saved as u128 * 1000 / total_request_weight as u128) as u64
    };

    Ok(ScoreReport {
        total_latency_saved,
        score,
        total_request_weight,
        cached_request_weight,
        utilization,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_catalogue;

    const EXAMPLE: &str = "\
5 2 4 3 100
50 50 80 30 110
1000 3
0 100
2 200
1 300
500 0
3 0 1500
0 1 1000
4 0 500
1 0 1000
";

    #[test]
    fn scores_the_worked_example() {
        let catalogue = parse_catalogue(EXAMPLE).unwrap();
        let assignment = Assignment {
            videos_per_cache: vec![vec![3, 1], vec![], vec![]],
        };

        let report = score_assignment(&catalogue, &assignment).unwrap();

        // Requests for videos 3 and 1 are served from cache 0 at latency
        // 100 instead of 1000: (900 × 1500) + (900 × 1000).
        assert_eq!(report.total_latency_saved, 2_250_000);
        assert_eq!(report.total_request_weight, 4000);
        assert_eq!(report.cached_request_weight, 2500);
        assert_eq!(report.score, 562_500);
        assert_eq!(report.utilization[0].used, 80);
        assert_eq!(report.utilization[1].used, 0);
    }

    #[test]
    fn picks_the_best_connected_cache_per_request() {
        let catalogue = parse_catalogue(
            "1 1 1 2 100\n10\n100 2\n0 30\n1 20\n0 0 4\n",
        )
        .unwrap();
        let assignment = Assignment {
            videos_per_cache: vec![vec![0], vec![0]],
        };

        let report = score_assignment(&catalogue, &assignment).unwrap();

        // Cache 1 wins at latency 20: saved (100 − 20) × 4.
        assert_eq!(report.total_latency_saved, 320);
        assert_eq!(report.score, 80_000);
    }

    #[test]
    fn uncached_requests_save_nothing() {
        let catalogue = parse_catalogue("1 1 1 1 100\n10\n100 0\n0 0 4\n").unwrap();
        let assignment = Assignment::empty(1);

        let report = score_assignment(&catalogue, &assignment).unwrap();

        assert_eq!(report.total_latency_saved, 0);
        assert_eq!(report.score, 0);
        assert_eq!(report.cached_request_weight, 0);
    }

    #[test]
    fn rejects_capacity_overflow() {
        let catalogue = parse_catalogue("2 1 0 1 100\n60 60\n100 0\n").unwrap();
        let assignment = Assignment {
            videos_per_cache: vec![vec![0, 1]],
        };

        let err = score_assignment(&catalogue, &assignment).unwrap_err();
        assert_eq!(
            err,
            AssignmentError::CapacityExceeded { cache: 0, used: 120, capacity: 100 }
        );
    }

    #[test]
    fn zero_weight_catalogue_scores_zero() {
        let catalogue = parse_catalogue("1 1 0 1 100\n10\n100 1\n0 20\n").unwrap();
        let report = score_assignment(&catalogue, &Assignment::empty(1)).unwrap();
        assert_eq!(report.score, 0);
    }
}
