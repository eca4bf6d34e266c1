//! Semantic cache domain types: hit policy, record codecs, lookup
//! outcomes and the cost estimation table.

pub mod cost;

mod policy;
mod record;

pub use policy::CachePolicy;
pub use record::{
    CacheHit, CacheSkip, CachedResponse, CacheLookup, PendingWrite, SavingsEvent,
    RECORD_TYPE_RESPONSE, RECORD_TYPE_SAVINGS,
};
