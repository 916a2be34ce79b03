//! Immutable catalogue of videos, endpoints, caches, and requests.
//!
//! Everything here is built once from input and never mutated afterwards.
//! The solver reads the catalogue by reference and keeps its own mutable
//! state (savings matrix, per-cache free space, commit lists) elsewhere.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// A video in the fixed catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    /// Size in the same units as cache capacity.
    pub size: u64,
    /// Indices into [`Catalogue::requests`] of every request for this video.
    pub request_ids: Vec<usize>,
}

/// A regional endpoint requests are routed through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoint {
    /// Latency of serving from the origin datacenter, in ms.
    pub datacenter_latency: u64,
    /// `(cache id, latency)` pairs, in input order.
    pub connections: Vec<(usize, u64)>,
    /// Dense per-cache lookup; `None` means not connected.
    cache_latency: Vec<Option<u64>>,
}

impl Endpoint {
    /// Latency from this endpoint through `cache`, or `None` if the
    /// endpoint is not connected to that cache.
    pub fn latency_to(&self, cache: usize) -> Option<u64> {
        self.cache_latency.get(cache).copied().flatten()
    }
}

/// Raw endpoint record as it appears in the input, before indexing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointRecord {
    pub datacenter_latency: u64,
    pub connections: Vec<(usize, u64)>,
}

/// An aggregated request: `weight` individual requests for one video
/// arriving through one endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Request {
    pub video: usize,
    pub endpoint: usize,
    pub weight: u64,
}

/// The complete, immutable problem description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalogue {
    pub videos: Vec<Video>,
    pub endpoints: Vec<Endpoint>,
    pub requests: Vec<Request>,
    /// Number of edge caches.
    pub cache_count: usize,
    /// Capacity bound shared by every cache.
    pub cache_capacity: u64,
}

impl Catalogue {
    /// Build the catalogue tables from raw records.
    ///
    /// Fails if any referenced id (cache in a connection list, video or
    /// endpoint in a request) is outside its declared range. No partial
    /// catalogue is ever observable.
    pub fn build(
        video_sizes: Vec<u64>,
        endpoint_records: Vec<EndpointRecord>,
        requests: Vec<Request>,
        cache_count: usize,
        cache_capacity: u64,
    ) -> ModelResult<Self> {
        let mut endpoints = Vec::with_capacity(endpoint_records.len());
        for record in endpoint_records {
            let mut cache_latency = vec![None; cache_count];
            for &(cache, latency) in &record.connections {
                if cache >= cache_count {
                    return Err(ModelError::CacheOutOfRange { cache, caches: cache_count });
                }
                cache_latency[cache] = Some(latency);
            }
            endpoints.push(Endpoint {
                datacenter_latency: record.datacenter_latency,
                connections: record.connections,
                cache_latency,
            });
        }

        let mut videos: Vec<Video> = video_sizes
            .into_iter()
            .map(|size| Video { size, request_ids: Vec::new() })
            .collect();

        for (id, request) in requests.iter().enumerate() {
            if request.video >= videos.len() {
                return Err(ModelError::VideoOutOfRange {
                    video: request.video,
                    videos: videos.len(),
                });
            }
            if request.endpoint >= endpoints.len() {
                return Err(ModelError::EndpointOutOfRange {
                    endpoint: request.endpoint,
                    endpoints: endpoints.len(),
                });
            }
            videos[request.video].request_ids.push(id);
        }

        Ok(Catalogue {
            videos,
            endpoints,
            requests,
            cache_count,
            cache_capacity,
        })
    }

    /// Whether `video` can fit into an empty cache at all.
    pub fn is_eligible(&self, video: usize) -> bool {
        self.videos[video].size <= self.cache_capacity
    }

    /// Sum of all request weights.
    pub fn total_request_weight(&self) -> u64 {
        self.requests.iter().map(|r| r.weight).sum()
    }
}
