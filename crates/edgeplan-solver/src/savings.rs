//! Dense marginal-savings matrix.
//!
//! One entry per (cache, video) pair: either the current marginal benefit
//! of placing that video into that cache, or a sentinel permanently
//! excluding the pair from selection. The matrix is built once from the
//! catalogue; after that it only changes through the placement loop's
//! commits and updates.

use edgeplan_core::Catalogue;

/// State of one (cache, video) pair.
///
/// An explicit tag rather than reserved negative numbers, so a sentinel
/// can never be mistaken for a real savings value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavingsEntry {
    /// Marginal benefit of committing the pair now. Never negative under
    /// the latency model; zero means "no further benefit".
    Savings(i64),
    /// The pair did not fit when selected; permanently excluded.
    Infeasible,
    /// The pair was committed; permanently excluded.
    Committed,
}

impl SavingsEntry {
    /// The ordinary value, or `None` for a sentinel.
    pub fn value(self) -> Option<i64> {
        match self {
            SavingsEntry::Savings(value) => Some(value),
            SavingsEntry::Infeasible | SavingsEntry::Committed => None,
        }
    }
}

/// Row-major `caches × videos` table of [`SavingsEntry`].
#[derive(Debug, Clone)]
pub struct SavingsMatrix {
    caches: usize,
    videos: usize,
    entries: Vec<SavingsEntry>,
}

impl SavingsMatrix {
    /// Compute the initial matrix: the benefit of each placement as if no
    /// cache served anything yet (baseline = datacenter latency for every
    /// request).
    ///
    /// Oversized videos and unconnected (endpoint, cache) pairs contribute
    /// nothing. This is the dominant cost of the whole run and is computed
    /// exactly once.
    pub fn build(catalogue: &Catalogue) -> Self {
        let caches = catalogue.cache_count;
        let videos = catalogue.videos.len();
        let mut entries = vec![SavingsEntry::Savings(0); caches * videos];

        for cache in 0..caches {
            for (video_id, video) in catalogue.videos.iter().enumerate() {
                if video.size > catalogue.cache_capacity {
                    continue;
                }
                let mut total = 0i64;
                for &request_id in &video.request_ids {
                    let request = &catalogue.requests[request_id];
                    let endpoint = &catalogue.endpoints[request.endpoint];
                    if let Some(latency) = endpoint.latency_to(cache) {
                        total += request.weight as i64
                            * (endpoint.datacenter_latency as i64 - latency as i64);
                    }
                }
                entries[cache * videos + video_id] = SavingsEntry::Savings(total);
            }
        }

        Self { caches, videos, entries }
    }

    pub fn caches(&self) -> usize {
        self.caches
    }

    pub fn videos(&self) -> usize {
        self.videos
    }

    pub fn get(&self, cache: usize, video: usize) -> SavingsEntry {
        self.entries[cache * self.videos + video]
    }

    pub fn set(&mut self, cache: usize, video: usize, entry: SavingsEntry) {
        self.entries[cache * self.videos + video] = entry;
    }

    /// Scan the whole matrix for the best remaining pair.
    ///
    /// Caches are scanned in increasing order and videos in increasing
    /// order within a cache; a candidate replaces the current best when
    /// its value is greater than *or equal to* it. Among equal maxima the
    /// highest cache index wins, then the highest video index. Consumers
    /// depend on this order for byte-identical output, so it must not
    /// change. Sentinels are never candidates.
    ///
    /// Pure with respect to the matrix: re-scanning without an intervening
    /// write returns the same pair.
    pub fn select_best(&self) -> Option<(usize, usize, i64)> {
        let mut best: Option<(usize, usize, i64)> = None;
        for cache in 0..self.caches {
            for video in 0..self.videos {
                if let Some(value) = self.get(cache, video).value() {
                    match best {
                        Some((_, _, best_value)) if value < best_value => {}
                        _ => best = Some((cache, video, value)),
                    }
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgeplan_core::parse_catalogue;

    #[test]
    fn initial_savings_weights_latency_delta() {
        // 1 video (size 10), 1 endpoint (dc 100, cache 0 at 10),
        // 1 cache (capacity 10), 1 request (weight 5).
        let catalogue = parse_catalogue("1 1 1 1 10\n10\n100 1\n0 10\n0 0 5\n").unwrap();
        let matrix = SavingsMatrix::build(&catalogue);

        assert_eq!(matrix.get(0, 0), SavingsEntry::Savings(450));
    }

    #[test]
    fn oversized_video_keeps_zero_entries() {
        // Video 1 (size 110) exceeds the capacity bound of 100.
        let catalogue =
            parse_catalogue("2 1 2 2 100\n50 110\n100 2\n0 10\n1 20\n0 0 1\n1 0 1\n").unwrap();
        let matrix = SavingsMatrix::build(&catalogue);

        assert_eq!(matrix.get(0, 1), SavingsEntry::Savings(0));
        assert_eq!(matrix.get(1, 1), SavingsEntry::Savings(0));
        // The eligible video still accrues savings.
        assert_eq!(matrix.get(0, 0), SavingsEntry::Savings(90));
        assert_eq!(matrix.get(1, 0), SavingsEntry::Savings(80));
    }

    #[test]
    fn unconnected_endpoint_contributes_nothing() {
        // Endpoint 1 (weight 7 request) reaches no cache.
        let catalogue =
            parse_catalogue("1 2 2 1 100\n10\n100 1\n0 10\n200 0\n0 0 5\n0 1 7\n").unwrap();
        let matrix = SavingsMatrix::build(&catalogue);

        assert_eq!(matrix.get(0, 0), SavingsEntry::Savings(450));
    }

    #[test]
    fn savings_accumulate_across_requests() {
        // Two endpoints connected to cache 0; weights 5 and 2.
        let catalogue =
            parse_catalogue("1 2 2 1 100\n10\n100 1\n0 10\n50 1\n0 30\n0 0 5\n0 1 2\n").unwrap();
        let matrix = SavingsMatrix::build(&catalogue);

        // 5 × (100 − 10) + 2 × (50 − 30).
        assert_eq!(matrix.get(0, 0), SavingsEntry::Savings(490));
    }

    #[test]
    fn select_best_prefers_highest_indices_on_ties() {
        // One endpoint, both caches at latency 10, two videos with
        // weight-1 requests: all four entries are 90.
        let catalogue = parse_catalogue(
            "2 1 2 2 100\n10 10\n100 2\n0 10\n1 10\n0 0 1\n1 0 1\n",
        )
        .unwrap();
        let matrix = SavingsMatrix::build(&catalogue);

        assert_eq!(matrix.select_best(), Some((1, 1, 90)));
    }

    #[test]
    fn select_best_skips_sentinels() {
        let catalogue = parse_catalogue(
            "2 1 2 2 100\n10 10\n100 2\n0 10\n1 10\n0 0 1\n1 0 1\n",
        )
        .unwrap();
        let mut matrix = SavingsMatrix::build(&catalogue);

        matrix.set(1, 1, SavingsEntry::Committed);
        matrix.set(1, 0, SavingsEntry::Infeasible);
        assert_eq!(matrix.select_best(), Some((0, 1, 90)));

        matrix.set(0, 1, SavingsEntry::Infeasible);
        matrix.set(0, 0, SavingsEntry::Committed);
        assert_eq!(matrix.select_best(), None);
    }

    #[test]
    fn select_best_is_idempotent() {
        let catalogue = parse_catalogue(
            "3 1 3 2 100\n10 10 10\n100 2\n0 10\n1 40\n0 0 3\n1 0 2\n2 0 1\n",
        )
        .unwrap();
        let matrix = SavingsMatrix::build(&catalogue);

        let first = matrix.select_best();
        let second = matrix.select_best();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_matrix_selects_nothing() {
        let catalogue = parse_catalogue("0 0 0 0 0").unwrap();
        let matrix = SavingsMatrix::build(&catalogue);
        assert_eq!(matrix.select_best(), None);
    }
}
