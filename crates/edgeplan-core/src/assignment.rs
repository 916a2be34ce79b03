//! The per-cache placement lists and their wire shape.
//!
//! Output format (the full compatibility surface for any consumer):
//!
//! ```text
//! C
//! 0 v1 v2 ...
//! 1 v3 v4 ...
//! ...
//! ```
//!
//! One line per cache in increasing index order, videos in commit order,
//! a bare index when the cache is empty.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AssignmentError, AssignmentResult, ModelError};
use crate::model::Catalogue;

/// A complete video-to-cache assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// One list per cache, videos in the order they were committed.
    pub videos_per_cache: Vec<Vec<usize>>,
}

impl Assignment {
    /// An assignment with `cache_count` empty caches.
    pub fn empty(cache_count: usize) -> Self {
        Self { videos_per_cache: vec![Vec::new(); cache_count] }
    }

    pub fn cache_count(&self) -> usize {
        self.videos_per_cache.len()
    }

    /// Total number of committed placements.
    pub fn placements(&self) -> usize {
        self.videos_per_cache.iter().map(Vec::len).sum()
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.cache_count())?;
        for (cache, videos) in self.videos_per_cache.iter().enumerate() {
            write!(f, "{cache}")?;
            for video in videos {
                write!(f, " {video}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Read an assignment in the wire shape back in, for scoring.
///
/// Accepts fewer cache lines than the catalogue has caches (the missing
/// ones are empty), but rejects a declared count above the cache count,
/// a repeated cache line, and any out-of-range id.
pub fn parse_assignment(input: &str, catalogue: &Catalogue) -> AssignmentResult<Assignment> {
    let mut lines = input.lines().filter(|line| !line.trim().is_empty());

    let first = lines
        .next()
        .ok_or(AssignmentError::UnexpectedEof { expected: "cache line count" })?;
    let declared: usize = first.trim().parse().map_err(|_| AssignmentError::InvalidToken {
        expected: "cache line count",
        found: first.trim().to_string(),
    })?;
    if declared > catalogue.cache_count {
        return Err(AssignmentError::TooManyCaches {
            declared,
            caches: catalogue.cache_count,
        });
    }

    let mut assignment = Assignment::empty(catalogue.cache_count);
    let mut seen = vec![false; catalogue.cache_count];

    for _ in 0..declared {
        let line = lines
            .next()
            .ok_or(AssignmentError::UnexpectedEof { expected: "cache line" })?;
        let mut tokens = line.split_whitespace();

        let cache_token = tokens
            .next()
            .ok_or(AssignmentError::UnexpectedEof { expected: "cache id" })?;
        let cache: usize = cache_token.parse().map_err(|_| AssignmentError::InvalidToken {
            expected: "cache id",
            found: cache_token.to_string(),
        })?;
        if cache >= catalogue.cache_count {
            return Err(ModelError::CacheOutOfRange {
                cache,
                caches: catalogue.cache_count,
            }
            .into());
        }
        if seen[cache] {
            return Err(AssignmentError::DuplicateCache(cache));
        }
        seen[cache] = true;

        for token in tokens {
            let video: usize = token.parse().map_err(|_| AssignmentError::InvalidToken {
                expected: "video id",
                found: token.to_string(),
            })?;
            if video >= catalogue.videos.len() {
                return Err(ModelError::VideoOutOfRange {
                    video,
                    videos: catalogue.videos.len(),
                }
                .into());
            }
            assignment.videos_per_cache[cache].push(video);
        }
    }

    Ok(assignment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EndpointRecord, Request};

    fn catalogue(videos: usize, caches: usize) -> Catalogue {
        Catalogue::build(
            vec![10; videos],
            vec![EndpointRecord { datacenter_latency: 100, connections: vec![] }],
            vec![Request { video: 0, endpoint: 0, weight: 1 }],
            caches,
            100,
        )
        .unwrap()
    }

    #[test]
    fn display_emits_bare_index_for_empty_cache() {
        let assignment = Assignment {
            videos_per_cache: vec![vec![3, 1], vec![], vec![0]],
        };
        assert_eq!(assignment.to_string(), "3\n0 3 1\n1\n2 0\n");
    }

    #[test]
    fn display_round_trips_through_parse() {
        let catalogue = catalogue(5, 3);
        let assignment = Assignment {
            videos_per_cache: vec![vec![4], vec![], vec![2, 0]],
        };
        let parsed = parse_assignment(&assignment.to_string(), &catalogue).unwrap();
        assert_eq!(parsed, assignment);
    }

    #[test]
    fn accepts_fewer_lines_than_caches() {
        let catalogue = catalogue(2, 4);
        let parsed = parse_assignment("2\n3 1\n0\n", &catalogue).unwrap();
        assert_eq!(parsed.videos_per_cache[3], vec![1]);
        assert!(parsed.videos_per_cache[0].is_empty());
        assert!(parsed.videos_per_cache[1].is_empty());
        assert_eq!(parsed.cache_count(), 4);
    }

    #[test]
    fn rejects_more_lines_than_caches() {
        let catalogue = catalogue(2, 1);
        let err = parse_assignment("2\n0\n1\n", &catalogue).unwrap_err();
        assert_eq!(err, AssignmentError::TooManyCaches { declared: 2, caches: 1 });
    }

    #[test]
    fn rejects_duplicate_cache_line() {
        let catalogue = catalogue(2, 2);
        let err = parse_assignment("2\n0 1\n0 0\n", &catalogue).unwrap_err();
        assert_eq!(err, AssignmentError::DuplicateCache(0));
    }

    #[test]
    fn rejects_out_of_range_ids() {
        let catalogue = catalogue(2, 2);

        let err = parse_assignment("1\n5\n", &catalogue).unwrap_err();
        assert_eq!(
            err,
            AssignmentError::Model(ModelError::CacheOutOfRange { cache: 5, caches: 2 })
        );

        let err = parse_assignment("1\n0 9\n", &catalogue).unwrap_err();
        assert_eq!(
            err,
            AssignmentError::Model(ModelError::VideoOutOfRange { video: 9, videos: 2 })
        );
    }
}
