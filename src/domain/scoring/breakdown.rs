//! Score breakdown types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Scoring categories, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    Garage,
    Bathrooms,
    Bedrooms,
    SquareFeet,
    LotSize,
    Backyard,
    CurbAppeal,
    Basement,
    Privacy,
    Deck,
    PatioPotential,
    Pool,
    NearRecreation,
    WalkingShopping,
    Appliances,
    Hoa,
}

impl ScoreCategory {
    pub const ALL: [ScoreCategory; 16] = [
        Self::Garage,
        Self::Bathrooms,
        Self::Bedrooms,
        Self::SquareFeet,
        Self::LotSize,
        Self::Backyard,
        Self::CurbAppeal,
        Self::Basement,
        Self::Privacy,
        Self::Deck,
        Self::PatioPotential,
        Self::Pool,
        Self::NearRecreation,
        Self::WalkingShopping,
        Self::Appliances,
        Self::Hoa,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Garage => "garage",
            Self::Bathrooms => "bathrooms",
            Self::Bedrooms => "bedrooms",
            Self::SquareFeet => "square_feet",
            Self::LotSize => "lot_size",
            Self::Backyard => "backyard",
            Self::CurbAppeal => "curb_appeal",
            Self::Basement => "basement",
            Self::Privacy => "privacy",
            Self::Deck => "deck",
            Self::PatioPotential => "patio_potential",
            Self::Pool => "pool",
            Self::NearRecreation => "near_recreation",
            Self::WalkingShopping => "walking_shopping",
            Self::Appliances => "appliances",
            Self::Hoa => "hoa",
        }
    }
}

impl fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single itemized contribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub category: ScoreCategory,
    pub points: i64,
    /// Human readable explanation, e.g. `+2 (Nice backyard)`
    pub detail: String,
}

/// Itemized score for one feature record.
///
/// `total` always equals the sum of the entry points.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    entries: Vec<ScoreEntry>,
    total: i64,
}

impl ScoreBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, category: ScoreCategory, points: i64, detail: impl Into<String>) {
        self.total += points;
        self.entries.push(ScoreEntry {
            category,
            points,
            detail: detail.into(),
        });
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Points contributed by a category, if it was scored
    pub fn points(&self, category: ScoreCategory) -> Option<i64> {
        self.entries
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.points)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Formats points with an explicit sign, `+0` for zero
pub(crate) fn signed(points: i64) -> String {
    if points < 0 {
        points.to_string()
    } else {
        format!("+{}", points)
    }
}
