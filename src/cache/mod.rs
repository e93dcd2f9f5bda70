//! Response caching for GET requests.
//!
//! Cached bodies live in process memory only, keyed by `GET:<url>`, with a
//! lifetime chosen per endpoint prefix. Writes never touch the cache; callers
//! invalidate by substring after mutating.

mod response;

pub use response::{ttl_for, ResponseCache, CACHE_TTLS, DEFAULT_MAX_ENTRIES};
