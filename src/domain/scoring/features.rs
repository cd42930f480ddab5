//! Feature record - the input to the score engine

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validation::{validate_bathrooms, validate_non_negative, FeatureValidationError};
use crate::domain::listing::PropertyListing;

/// Basement state of a house
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasementKind {
    #[default]
    None,
    Unfinished,
    Finished,
}

impl BasementKind {
    const EXPECTED: &'static str = "none, unfinished, finished";

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Unfinished => "unfinished",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for BasementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BasementKind {
    type Err = FeatureValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "unfinished" => Ok(Self::Unfinished),
            "finished" => Ok(Self::Finished),
            _ => Err(FeatureValidationError::UnknownVariant {
                field: "basement",
                value: s.to_string(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

/// How private the lot feels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivacyLevel {
    VeryPrivate,
    Private,
    #[default]
    Normal,
    NotPrivate,
}

impl PrivacyLevel {
    const EXPECTED: &'static str = "very_private, private, normal, not_private";

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryPrivate => "very_private",
            Self::Private => "private",
            Self::Normal => "normal",
            Self::NotPrivate => "not_private",
        }
    }
}

impl fmt::Display for PrivacyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PrivacyLevel {
    type Err = FeatureValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "very_private" => Ok(Self::VeryPrivate),
            "private" => Ok(Self::Private),
            "normal" => Ok(Self::Normal),
            "not_private" => Ok(Self::NotPrivate),
            _ => Err(FeatureValidationError::UnknownVariant {
                field: "privacy",
                value: s.to_string(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

/// Fixed set of appliance kinds that count toward the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplianceKind {
    Dishwasher,
    Range,
    Oven,
    Fridge,
    Washer,
    Dryer,
    Microwave,
}

impl ApplianceKind {
    pub const ALL: [ApplianceKind; 7] = [
        Self::Dishwasher,
        Self::Range,
        Self::Oven,
        Self::Fridge,
        Self::Washer,
        Self::Dryer,
        Self::Microwave,
    ];

    const EXPECTED: &'static str = "dishwasher, range, oven, fridge, washer, dryer, microwave";

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dishwasher => "dishwasher",
            Self::Range => "range",
            Self::Oven => "oven",
            Self::Fridge => "fridge",
            Self::Washer => "washer",
            Self::Dryer => "dryer",
            Self::Microwave => "microwave",
        }
    }
}

impl fmt::Display for ApplianceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ApplianceKind {
    type Err = FeatureValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();

        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| FeatureValidationError::UnknownVariant {
                field: "appliance",
                value: s.to_string(),
                expected: Self::EXPECTED,
            })
    }
}

/// Condition of a present appliance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplianceCondition {
    Old,
    Modern,
}

impl ApplianceCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Old => "old",
            Self::Modern => "modern",
        }
    }
}

impl FromStr for ApplianceCondition {
    type Err = FeatureValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "old" => Ok(Self::Old),
            "modern" => Ok(Self::Modern),
            _ => Err(FeatureValidationError::UnknownVariant {
                field: "appliance condition",
                value: s.to_string(),
                expected: "old, modern",
            }),
        }
    }
}

/// Appliances present in a house, one optional condition per kind.
///
/// `None` means the house does not have that appliance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Appliances {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dishwasher: Option<ApplianceCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<ApplianceCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oven: Option<ApplianceCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fridge: Option<ApplianceCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub washer: Option<ApplianceCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dryer: Option<ApplianceCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub microwave: Option<ApplianceCondition>,
}

impl Appliances {
    /// Returns the condition of an appliance, if present
    pub fn get(&self, kind: ApplianceKind) -> Option<ApplianceCondition> {
        match kind {
            ApplianceKind::Dishwasher => self.dishwasher,
            ApplianceKind::Range => self.range,
            ApplianceKind::Oven => self.oven,
            ApplianceKind::Fridge => self.fridge,
            ApplianceKind::Washer => self.washer,
            ApplianceKind::Dryer => self.dryer,
            ApplianceKind::Microwave => self.microwave,
        }
    }

    /// Sets or removes an appliance
    pub fn set(&mut self, kind: ApplianceKind, condition: Option<ApplianceCondition>) {
        let slot = match kind {
            ApplianceKind::Dishwasher => &mut self.dishwasher,
            ApplianceKind::Range => &mut self.range,
            ApplianceKind::Oven => &mut self.oven,
            ApplianceKind::Fridge => &mut self.fridge,
            ApplianceKind::Washer => &mut self.washer,
            ApplianceKind::Dryer => &mut self.dryer,
            ApplianceKind::Microwave => &mut self.microwave,
        };
        *slot = condition;
    }

    /// Builder-style variant of [`Appliances::set`]
    pub fn with(mut self, kind: ApplianceKind, condition: ApplianceCondition) -> Self {
        self.set(kind, Some(condition));
        self
    }

    /// Iterates present appliances in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (ApplianceKind, ApplianceCondition)> + '_ {
        ApplianceKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|condition| (kind, condition)))
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }
}

/// Structured property attributes used for scoring
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureRecord {
    pub garage_capacity: u32,
    pub bathrooms: f64,
    pub bedrooms: u32,
    pub square_feet: u32,
    pub lot_acres: f64,

    #[serde(default)]
    pub nice_backyard: bool,
    #[serde(default)]
    pub curb_appeal: bool,
    #[serde(default)]
    pub has_deck: bool,
    #[serde(default)]
    pub patio_potential: bool,
    #[serde(default)]
    pub has_pool: bool,
    #[serde(default)]
    pub near_recreation: bool,
    #[serde(default)]
    pub walking_shopping: bool,

    #[serde(default)]
    pub basement: BasementKind,
    #[serde(default)]
    pub privacy: PrivacyLevel,
    #[serde(default)]
    pub appliances: Appliances,

    #[serde(default)]
    pub has_hoa: bool,
    /// Monthly HOA fee in whole dollars; required when `has_hoa` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hoa_monthly_fee: Option<u32>,
}

impl FeatureRecord {
    /// Promotes a discovered listing into an evaluable record.
    ///
    /// Only the measurable fields carry over; subjective features start neutral.
    pub fn from_listing(listing: &PropertyListing) -> Self {
        Self {
            garage_capacity: listing.garage_capacity,
            bathrooms: listing.bathrooms,
            bedrooms: listing.bedrooms,
            square_feet: listing.square_feet,
            lot_acres: listing.lot_acres,
            ..Self::default()
        }
    }

    /// Decodes and validates a record from JSON
    pub fn from_json(input: &str) -> Result<Self, FeatureValidationError> {
        let record: Self = serde_json::from_str(input)
            .map_err(|e| FeatureValidationError::Malformed(e.to_string()))?;
        record.validate()?;
        Ok(record)
    }

    /// Checks every field against its declared domain
    pub fn validate(&self) -> Result<(), FeatureValidationError> {
        validate_bathrooms(self.bathrooms)?;
        validate_non_negative("lot_acres", self.lot_acres)?;

        if self.has_hoa && self.hoa_monthly_fee.is_none() {
            return Err(FeatureValidationError::MissingValue {
                field: "hoa_monthly_fee",
                required_by: "has_hoa",
            });
        }

        Ok(())
    }
}
