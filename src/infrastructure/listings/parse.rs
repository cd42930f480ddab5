//! Normalization of raw provider records into listings

use serde_json::Value;

use crate::domain::listing::PropertyListing;

const SQFT_PER_ACRE: f64 = 43_560.0;

/// A value counts as present unless it is null, false, zero or empty
fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|value| match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    })
}

/// First present value among JSON pointers into `record`
fn first_present<'a>(record: &'a Value, pointers: &[&str]) -> Option<&'a Value> {
    pointers
        .iter()
        .find_map(|pointer| present(record.pointer(pointer)))
}

fn as_number(value: &Value) -> Option<f64> {
    let number: Option<f64> = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite() && *n >= 0.0)
}

fn number(record: &Value, pointers: &[&str]) -> Option<f64> {
    first_present(record, pointers).and_then(as_number)
}

fn count(record: &Value, pointers: &[&str]) -> u32 {
    number(record, pointers).map_or(0, |n| n.min(u32::MAX as f64) as u32)
}

fn address(record: &Value) -> Option<String> {
    let raw = match present(record.pointer("/location/address")) {
        Some(address) => address.get("line").and_then(Value::as_str).map(str::to_string),
        None => match present(record.get("address")) {
            Some(Value::Object(address)) => {
                address.get("line").and_then(Value::as_str).map(str::to_string)
            }
            Some(Value::String(address)) => Some(address.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        },
    }?;

    let address = raw.trim().to_lowercase();
    (!address.is_empty()).then_some(address)
}

fn photo(record: &Value) -> Option<String> {
    fn href(value: &Value) -> Option<String> {
        match value {
            Value::Object(photo) => photo.get("href").and_then(Value::as_str).map(str::to_string),
            Value::String(url) => Some(url.clone()),
            _ => None,
        }
    }

    if let Some(primary) = present(record.get("primary_photo")) {
        return href(primary);
    }
    if let Some(first) = present(record.get("photos")).and_then(|photos| photos.get(0)) {
        return href(first);
    }
    present(record.get("thumbnail"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Maps one provider record to a listing.
///
/// Records without an address or a price are skipped.
pub fn parse_listing(record: &Value) -> Option<PropertyListing> {
    let address = address(record)?;
    let price = number(
        record,
        &["/list_price", "/price", "/description/sold_price"],
    )?;

    let bedrooms = count(record, &["/description/beds", "/beds", "/description/beds_min"]);

    let full_baths = number(
        record,
        &["/description/baths_full", "/baths_full", "/description/baths"],
    )
    .unwrap_or(0.0);
    let half_baths = number(record, &["/description/baths_half", "/baths_half"]).unwrap_or(0.0);

    let square_feet = count(
        record,
        &["/description/sqft", "/sqft", "/building_size/size"],
    );

    let lot_sqft = number(record, &["/description/lot_sqft", "/lot_sqft"]).unwrap_or(0.0);
    let lot_acres = (lot_sqft / SQFT_PER_ACRE * 100.0).round() / 100.0;

    let garage = count(
        record,
        &[
            "/description/garage",
            "/garage",
            "/description/garage_spaces",
            "/garage_spaces",
        ],
    );

    let property_type = first_present(record, &["/description/type", "/prop_type", "/type"])
        .and_then(Value::as_str)
        .unwrap_or(PropertyListing::UNKNOWN_TYPE);

    let mut listing = PropertyListing::new(address, price.round() as u64)
        .with_rooms(bedrooms, full_baths + half_baths * 0.5)
        .with_square_feet(square_feet)
        .with_lot_acres(lot_acres)
        .with_garage_capacity(garage)
        .with_property_type(property_type);

    if let Some(year) = number(record, &["/description/year_built", "/year_built"])
        .filter(|year| *year <= f64::from(u16::MAX))
    {
        listing = listing.with_year_built(year as u16);
    }

    if let Some(url) = photo(record) {
        listing = listing.with_photo_url(url);
    }

    Some(listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_nested_record() {
        let record = json!({
            "location": {"address": {"line": "  1234 Grand Ave ", "city": "Saint Paul"}},
            "list_price": 349900,
            "description": {
                "beds": 3,
                "baths_full": 2,
                "baths_half": 1,
                "sqft": 1850,
                "lot_sqft": 10890,
                "garage": 2,
                "year_built": 1925,
                "type": "single_family"
            },
            "primary_photo": {"href": "https://img.example/1.jpg"}
        });

        let listing = parse_listing(&record).unwrap();

        assert_eq!(listing.address, "1234 grand ave");
        assert_eq!(listing.price, 349_900);
        assert_eq!(listing.bedrooms, 3);
        assert_eq!(listing.bathrooms, 2.5);
        assert_eq!(listing.square_feet, 1850);
        assert_eq!(listing.lot_acres, 0.25);
        assert_eq!(listing.garage_capacity, 2);
        assert_eq!(listing.year_built, Some(1925));
        assert_eq!(listing.property_type, "single_family");
        assert_eq!(listing.photo_url.as_deref(), Some("https://img.example/1.jpg"));
    }

    #[test]
    fn test_parse_flat_record_with_fallbacks() {
        let record = json!({
            "address": "88 Selby Ave",
            "price": "210000",
            "description": {"beds": 0, "beds_min": 2, "baths": 1},
            "garage_spaces": 1,
            "prop_type": "condo",
            "photos": ["https://img.example/a.jpg"]
        });

        let listing = parse_listing(&record).unwrap();

        assert_eq!(listing.address, "88 selby ave");
        assert_eq!(listing.price, 210_000);
        assert_eq!(listing.bedrooms, 2);
        assert_eq!(listing.bathrooms, 1.0);
        assert_eq!(listing.garage_capacity, 1);
        assert_eq!(listing.property_type, "condo");
        assert_eq!(listing.square_feet, 0);
        assert_eq!(listing.lot_acres, 0.0);
        assert_eq!(listing.year_built, None);
        assert_eq!(listing.photo_url.as_deref(), Some("https://img.example/a.jpg"));
    }

    #[test]
    fn test_parse_defaults() {
        let record = json!({
            "address": {"line": "5 Main St"},
            "description": {"sold_price": 99000},
            "thumbnail": "https://img.example/t.jpg"
        });

        let listing = parse_listing(&record).unwrap();

        assert_eq!(listing.price, 99_000);
        assert_eq!(listing.property_type, PropertyListing::UNKNOWN_TYPE);
        assert_eq!(listing.photo_url.as_deref(), Some("https://img.example/t.jpg"));
    }

    #[test]
    fn test_records_without_address_or_price_are_skipped() {
        assert!(parse_listing(&json!({"price": 100})).is_none());
        assert!(parse_listing(&json!({"address": {"line": ""}, "price": 100})).is_none());
        assert!(parse_listing(&json!({"address": "1 a st"})).is_none());
        assert!(parse_listing(&json!({"address": "1 a st", "list_price": 0})).is_none());
    }
}
