//! Region resolver backed by a configured city table

use std::collections::HashMap;

use async_trait::async_trait;

use crate::config::CityRegions;
use crate::domain::listing::RegionCode;
use crate::domain::region::RegionResolver;
use crate::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CityKey {
    city: String,
    state: String,
}

impl CityKey {
    fn new(city: &str, state: &str) -> Self {
        Self {
            city: city.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase(),
            state: state.trim().to_ascii_uppercase(),
        }
    }
}

/// Resolves cities from an in-memory table; city and state match case-insensitively
#[derive(Debug, Clone, Default)]
pub struct StaticRegionResolver {
    cities: HashMap<CityKey, Vec<RegionCode>>,
}

impl StaticRegionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a city; every ZIP code is validated. Adding a city twice replaces it.
    pub fn with_city<I, S>(mut self, city: &str, state: &str, zip_codes: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let codes = zip_codes
            .into_iter()
            .map(RegionCode::new)
            .collect::<Result<Vec<_>, _>>()?;

        self.cities.insert(CityKey::new(city, state), codes);
        Ok(self)
    }

    pub fn from_config(cities: &[CityRegions]) -> Result<Self, DomainError> {
        cities.iter().try_fold(Self::new(), |resolver, entry| {
            resolver.with_city(&entry.city, &entry.state, entry.zip_codes.iter().cloned())
        })
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

#[async_trait]
impl RegionResolver for StaticRegionResolver {
    async fn resolve(&self, city: &str, state: &str) -> Result<Vec<RegionCode>, DomainError> {
        self.cities
            .get(&CityKey::new(city, state))
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("City '{}, {}' not found", city, state)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> StaticRegionResolver {
        StaticRegionResolver::new()
            .with_city("Saint Paul", "MN", ["55101", "55102"])
            .unwrap()
    }

    #[tokio::test]
    async fn test_resolve_is_case_insensitive() {
        let codes = resolver().resolve("  saint   PAUL", "mn").await.unwrap();

        assert_eq!(codes.len(), 2);
        assert_eq!(codes[0].as_str(), "55101");
    }

    #[tokio::test]
    async fn test_unknown_city_is_not_found() {
        let err = resolver().resolve("Duluth", "MN").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[test]
    fn test_invalid_zip_is_rejected() {
        let result = StaticRegionResolver::new().with_city("Austin", "TX", ["7870"]);
        assert!(result.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn test_from_config() {
        let cities = vec![
            CityRegions {
                city: "Austin".to_string(),
                state: "TX".to_string(),
                zip_codes: vec!["78701".to_string()],
            },
            CityRegions {
                city: "Boise".to_string(),
                state: "ID".to_string(),
                zip_codes: Vec::new(),
            },
        ];

        let resolver = StaticRegionResolver::from_config(&cities).unwrap();

        assert_eq!(resolver.len(), 2);
        assert!(resolver.resolve("boise", "id").await.unwrap().is_empty());
    }
}
