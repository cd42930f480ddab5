//! Address normalization and matching

use once_cell::sync::Lazy;
use regex::Regex;

static TRAILING_ZIP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\d{5}(?:-\d{4})?\s*$").unwrap());

const STATE_CODES: &str = "AL|AK|AZ|AR|CA|CO|CT|DE|FL|GA|HI|ID|IL|IN|IA|KS|KY|LA|ME|MD|MA|MI|MN|MS|MO|MT|NE|NV|NH|NJ|NM|NY|NC|ND|OH|OK|OR|PA|RI|SC|SD|TN|TX|UT|VT|VA|WA|WV|WI|WY|DC";

/// Trailing state code; any case after a comma, upper case only after a space
/// so street suffixes such as "Ct" survive
static TRAILING_STATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?:,\s*(?i:{codes})|\s+(?:{codes}))\s*$",
        codes = STATE_CODES
    ))
    .unwrap()
});

static UNIT_DESIGNATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*[#,]?\s*\b(?:unit|apt|apartment|suite|ste)\b\.?\s*[\w-]+|\s*#\s*[\w-]+")
        .unwrap()
});

/// Lowercases and collapses whitespace; the canonical form used for dedup
pub fn normalize_address(address: &str) -> String {
    address
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Reduces a full postal address to its street part.
///
/// `"123 Main St Apt 4, Springfield, IL 62704"` becomes `"123 main st"`.
pub fn street_key(address: &str) -> String {
    let without_zip = TRAILING_ZIP.replace(address, "");
    let without_zip = without_zip.trim();

    let base = match TRAILING_STATE.find(without_zip) {
        Some(found) => without_zip[..found.start()].trim(),
        None => without_zip,
    };

    let street = if let Some((street, _city)) = base.split_once(',') {
        street.trim().to_string()
    } else {
        let words: Vec<&str> = base.split_whitespace().collect();
        // A trailing city name is only assumed when the street itself is long enough
        if words.len() > 3 {
            words[..words.len() - 1].join(" ")
        } else {
            base.to_string()
        }
    };

    normalize_address(&UNIT_DESIGNATOR.replace_all(&street, ""))
}

/// Fuzzy match between a street key and a stored listing address
pub fn street_matches(key: &str, listing_address: &str) -> bool {
    let candidate = normalize_address(listing_address);

    if key.is_empty() || candidate.is_empty() {
        return false;
    }

    candidate.contains(key) || key.contains(candidate.as_str())
}
