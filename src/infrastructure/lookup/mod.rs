//! Lookup infrastructure - find one property by address

mod service;

pub use service::{PropertyLookupService, PropertyMatch, DEFAULT_LOOKUP_MAX_AGE};
