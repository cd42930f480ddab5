//! Region resolver trait - maps a city to the region codes covering it

use async_trait::async_trait;

use crate::domain::listing::RegionCode;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Resolves a city and state into region codes.
///
/// Fails with [`DomainError::NotFound`] when the pair is unknown.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RegionResolver: Send + Sync {
    async fn resolve(&self, city: &str, state: &str) -> Result<Vec<RegionCode>, DomainError>;
}
