//! Input reader for the whitespace-token problem format.
//!
//! ```text
//! V E R C X
//! size_1 … size_V
//! E × ( datacenter_latency K, then K × (cache_id latency) )
//! R × ( video_id endpoint_id weight )
//! ```
//!
//! Any truncation, junk token, or out-of-range id aborts the parse before
//! any solver state exists.

use crate::error::{ParseError, ParseResult};
use crate::model::{Catalogue, EndpointRecord, Request};

struct Tokens<'a> {
    iter: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self { iter: input.split_whitespace() }
    }

    fn next_u64(&mut self, expected: &'static str) -> ParseResult<u64> {
        let token = self
            .iter
            .next()
            .ok_or(ParseError::UnexpectedEof { expected })?;
        token.parse().map_err(|_| ParseError::InvalidToken {
            expected,
            found: token.to_string(),
        })
    }

    fn next_usize(&mut self, expected: &'static str) -> ParseResult<usize> {
        Ok(self.next_u64(expected)? as usize)
    }
}

/// Parse a complete problem description.
pub fn parse_catalogue(input: &str) -> ParseResult<Catalogue> {
    let mut tokens = Tokens::new(input);

    let video_count = tokens.next_usize("video count")?;
    let endpoint_count = tokens.next_usize("endpoint count")?;
    let request_count = tokens.next_usize("request count")?;
    let cache_count = tokens.next_usize("cache count")?;
    let cache_capacity = tokens.next_u64("cache capacity")?;

    let mut video_sizes = Vec::with_capacity(video_count);
    for _ in 0..video_count {
        video_sizes.push(tokens.next_u64("video size")?);
    }

    let mut endpoint_records = Vec::with_capacity(endpoint_count);
    for _ in 0..endpoint_count {
        let datacenter_latency = tokens.next_u64("datacenter latency")?;
        let connection_count = tokens.next_usize("connection count")?;
        let mut connections = Vec::with_capacity(connection_count);
        for _ in 0..connection_count {
            let cache = tokens.next_usize("connected cache id")?;
            let latency = tokens.next_u64("cache latency")?;
            connections.push((cache, latency));
        }
        endpoint_records.push(EndpointRecord { datacenter_latency, connections });
    }

    let mut requests = Vec::with_capacity(request_count);
    for _ in 0..request_count {
        let video = tokens.next_usize("request video id")?;
        let endpoint = tokens.next_usize("request endpoint id")?;
        let weight = tokens.next_u64("request weight")?;
        requests.push(Request { video, endpoint, weight });
    }

    let catalogue = Catalogue::build(
        video_sizes,
        endpoint_records,
        requests,
        cache_count,
        cache_capacity,
    )?;
    Ok(catalogue)
}
