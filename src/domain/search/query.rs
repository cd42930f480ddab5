//! City search query

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Validated city search parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    city: String,
    state: String,
    max_price: u64,
}

impl SearchQuery {
    /// Validates and normalizes the query.
    ///
    /// The state must be a two-letter code; it is stored upper case.
    pub fn new(
        city: impl Into<String>,
        state: impl Into<String>,
        max_price: u64,
    ) -> Result<Self, DomainError> {
        let city = city.into();
        let city = city.split_whitespace().collect::<Vec<_>>().join(" ");

        if city.is_empty() {
            return Err(DomainError::validation("City cannot be empty"));
        }

        let state = state.into();
        let state = state.trim();

        if state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::validation(format!(
                "Invalid state '{}': expected a 2-letter code",
                state
            )));
        }

        Ok(Self {
            city,
            state: state.to_ascii_uppercase(),
            max_price,
        })
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn max_price(&self) -> u64 {
        self.max_price
    }
}
