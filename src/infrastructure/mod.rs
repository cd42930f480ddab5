//! Infrastructure layer - External service implementations

pub mod listings;
pub mod logging;
pub mod lookup;
pub mod region;
pub mod search;
