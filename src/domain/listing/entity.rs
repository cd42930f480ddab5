//! Property listing and region code types

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::address::normalize_address;
use crate::domain::DomainError;

/// US ZIP or ZIP+4
static REGION_CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").unwrap());

/// Region code (ZIP-style postal code) identifying one listings query
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegionCode(String);

impl RegionCode {
    /// Create a new region code after validation
    pub fn new(code: impl Into<String>) -> Result<Self, DomainError> {
        let code = code.into();
        let trimmed = code.trim();

        if trimmed.is_empty() {
            return Err(DomainError::validation("Region code cannot be empty"));
        }

        if !REGION_CODE_PATTERN.is_match(trimmed) {
            return Err(DomainError::validation(format!(
                "Invalid region code '{}': expected a 5-digit ZIP or ZIP+4",
                trimmed
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RegionCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RegionCode> for String {
    fn from(code: RegionCode) -> Self {
        code.0
    }
}

impl AsRef<str> for RegionCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RegionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Point-in-time snapshot of a property offered by the listings provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyListing {
    pub address: String,
    /// Asking price in whole currency units
    pub price: u64,
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub square_feet: u32,
    pub lot_acres: f64,
    pub garage_capacity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub property_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_built: Option<u16>,
}

impl PropertyListing {
    pub const UNKNOWN_TYPE: &'static str = "Unknown";

    /// Create a listing with only an address and a price
    pub fn new(address: impl Into<String>, price: u64) -> Self {
        Self {
            address: address.into(),
            price,
            bedrooms: 0,
            bathrooms: 0.0,
            square_feet: 0,
            lot_acres: 0.0,
            garage_capacity: 0,
            photo_url: None,
            property_type: Self::UNKNOWN_TYPE.to_string(),
            year_built: None,
        }
    }

    pub fn with_rooms(mut self, bedrooms: u32, bathrooms: f64) -> Self {
        self.bedrooms = bedrooms;
        self.bathrooms = bathrooms;
        self
    }

    pub fn with_square_feet(mut self, square_feet: u32) -> Self {
        self.square_feet = square_feet;
        self
    }

    pub fn with_lot_acres(mut self, lot_acres: f64) -> Self {
        self.lot_acres = lot_acres;
        self
    }

    pub fn with_garage_capacity(mut self, garage_capacity: u32) -> Self {
        self.garage_capacity = garage_capacity;
        self
    }

    pub fn with_photo_url(mut self, photo_url: impl Into<String>) -> Self {
        self.photo_url = Some(photo_url.into());
        self
    }

    pub fn with_property_type(mut self, property_type: impl Into<String>) -> Self {
        self.property_type = property_type.into();
        self
    }

    pub fn with_year_built(mut self, year_built: u16) -> Self {
        self.year_built = Some(year_built);
        self
    }

    /// Key used to collapse the same property reported by several regions
    pub fn dedup_key(&self) -> String {
        normalize_address(&self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_code_valid() {
        assert_eq!(RegionCode::new("55401").unwrap().as_str(), "55401");
        assert_eq!(RegionCode::new(" 55401-1234 ").unwrap().as_str(), "55401-1234");
    }

    #[test]
    fn test_region_code_invalid() {
        assert!(RegionCode::new("").is_err());
        assert!(RegionCode::new("5540").is_err());
        assert!(RegionCode::new("ABCDE").is_err());
        assert!(RegionCode::new("55401-12").is_err());
    }

    #[test]
    fn test_region_code_serde() {
        let code: RegionCode = serde_json::from_str("\"60614\"").unwrap();
        assert_eq!(code.to_string(), "60614");

        let bad: Result<RegionCode, _> = serde_json::from_str("\"nope\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_listing_builder() {
        let listing = PropertyListing::new("742 Evergreen Terrace", 250_000)
            .with_rooms(4, 2.5)
            .with_square_feet(1800)
            .with_lot_acres(0.25)
            .with_garage_capacity(2)
            .with_property_type("single_family")
            .with_year_built(1989);

        assert_eq!(listing.price, 250_000);
        assert_eq!(listing.bedrooms, 4);
        assert_eq!(listing.property_type, "single_family");
        assert_eq!(listing.year_built, Some(1989));
        assert!(listing.photo_url.is_none());
    }

    #[test]
    fn test_dedup_key_normalizes_case_and_whitespace() {
        let a = PropertyListing::new("  12  Elm   Street ", 1);
        let b = PropertyListing::new("12 ELM STREET", 2);
        assert_eq!(a.dedup_key(), b.dedup_key());
    }
}
