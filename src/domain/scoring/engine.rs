//! Score engine - maps a feature record to an itemized score

use serde::Serialize;

use super::breakdown::{signed, ScoreBreakdown, ScoreCategory};
use super::features::{ApplianceCondition, BasementKind, FeatureRecord, PrivacyLevel};
use crate::domain::DomainError;

const SQUARE_FEET_PER_POINT: u32 = 500;
const LOT_POINTS_PER_ACRE: f64 = 4.0;
const HOA_FEE_PER_POINT: u32 = 100;

/// A scored record together with its position in the input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedRecord {
    pub index: usize,
    pub breakdown: ScoreBreakdown,
}

/// Stateless scorer. Identical records always produce identical breakdowns.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEngine;

impl ScoreEngine {
    pub fn new() -> Self {
        Self
    }

    /// Scores a record, emitting one entry per category even when it is zero
    pub fn score(&self, record: &FeatureRecord) -> Result<ScoreBreakdown, DomainError> {
        record.validate()?;

        let mut breakdown = ScoreBreakdown::new();

        let garage = i64::from(record.garage_capacity);
        breakdown.push(
            ScoreCategory::Garage,
            garage,
            if garage > 0 {
                format!("{} ({}-car garage)", signed(garage), garage)
            } else {
                "+0 (No garage)".to_string()
            },
        );

        // Half baths do not count until they add up to a whole one
        let bathrooms = record.bathrooms.floor() as i64;
        breakdown.push(
            ScoreCategory::Bathrooms,
            bathrooms,
            format!("{} ({} bathrooms)", signed(bathrooms), record.bathrooms),
        );

        let bedrooms = i64::from(record.bedrooms);
        breakdown.push(
            ScoreCategory::Bedrooms,
            bedrooms,
            format!("{} ({} bedrooms)", signed(bedrooms), record.bedrooms),
        );

        let square_feet = i64::from(record.square_feet / SQUARE_FEET_PER_POINT);
        breakdown.push(
            ScoreCategory::SquareFeet,
            square_feet,
            format!("{} ({} sq ft)", signed(square_feet), record.square_feet),
        );

        // One point per complete quarter acre
        let lot = (record.lot_acres * LOT_POINTS_PER_ACRE).floor() as i64;
        breakdown.push(
            ScoreCategory::LotSize,
            lot,
            format!("{} ({} acres)", signed(lot), record.lot_acres),
        );

        push_flag(
            &mut breakdown,
            ScoreCategory::Backyard,
            record.nice_backyard,
            2,
            "Nice backyard",
            "No backyard or not nice",
        );
        push_flag(
            &mut breakdown,
            ScoreCategory::CurbAppeal,
            record.curb_appeal,
            1,
            "Has curb appeal",
            "No curb appeal",
        );

        let (basement, basement_detail) = match record.basement {
            BasementKind::None => (0, "No basement"),
            BasementKind::Unfinished => (1, "Unfinished basement"),
            BasementKind::Finished => (2, "Finished basement"),
        };
        breakdown.push(
            ScoreCategory::Basement,
            basement,
            format!("{} ({})", signed(basement), basement_detail),
        );

        let (privacy, privacy_detail) = match record.privacy {
            PrivacyLevel::VeryPrivate => (3, "Very private"),
            PrivacyLevel::Private => (2, "Private"),
            PrivacyLevel::Normal => (1, "Normal privacy"),
            PrivacyLevel::NotPrivate => (-1, "Not private"),
        };
        breakdown.push(
            ScoreCategory::Privacy,
            privacy,
            format!("{} ({})", signed(privacy), privacy_detail),
        );

        push_flag(&mut breakdown, ScoreCategory::Deck, record.has_deck, 1, "Has deck", "No deck");
        push_flag(
            &mut breakdown,
            ScoreCategory::PatioPotential,
            record.patio_potential,
            2,
            "Patio potential",
            "No patio potential",
        );
        push_flag(&mut breakdown, ScoreCategory::Pool, record.has_pool, 3, "Has pool", "No pool");
        push_flag(
            &mut breakdown,
            ScoreCategory::NearRecreation,
            record.near_recreation,
            2,
            "Near recreation",
            "Not near recreation",
        );
        push_flag(
            &mut breakdown,
            ScoreCategory::WalkingShopping,
            record.walking_shopping,
            2,
            "Walking distance to shopping",
            "Not walking distance to shopping",
        );

        let (mut modern, mut old) = (0, 0);
        for (_, condition) in record.appliances.iter() {
            match condition {
                ApplianceCondition::Modern => modern += 1,
                ApplianceCondition::Old => old += 1,
            }
        }
        let appliances = modern * 2 + old;
        breakdown.push(
            ScoreCategory::Appliances,
            appliances,
            if modern + old == 0 {
                "+0 (No appliances)".to_string()
            } else {
                format!("{} ({} modern, {} old)", signed(appliances), modern, old)
            },
        );

        if record.has_hoa {
            // validate() guarantees the fee is present
            let fee = record.hoa_monthly_fee.unwrap_or_default();
            let hoa = -1 - i64::from(fee / HOA_FEE_PER_POINT);
            breakdown.push(
                ScoreCategory::Hoa,
                hoa,
                format!("{} (HOA: ${}/month)", signed(hoa), fee),
            );
        } else {
            breakdown.push(ScoreCategory::Hoa, 0, "+0 (No HOA)");
        }

        Ok(breakdown)
    }

    /// Scores several records and orders them highest total first.
    ///
    /// Records with equal totals keep their input order.
    pub fn rank(&self, records: &[FeatureRecord]) -> Result<Vec<RankedRecord>, DomainError> {
        let mut ranked = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                self.score(record)
                    .map(|breakdown| RankedRecord { index, breakdown })
            })
            .collect::<Result<Vec<_>, _>>()?;

        ranked.sort_by(|a, b| b.breakdown.total().cmp(&a.breakdown.total()));
        Ok(ranked)
    }
}

/// Convenience wrapper around [`ScoreEngine::score`]
pub fn score(record: &FeatureRecord) -> Result<ScoreBreakdown, DomainError> {
    ScoreEngine.score(record)
}

fn push_flag(
    breakdown: &mut ScoreBreakdown,
    category: ScoreCategory,
    enabled: bool,
    points: i64,
    present: &str,
    absent: &str,
) {
    if enabled {
        breakdown.push(category, points, format!("{} ({})", signed(points), present));
    } else {
        breakdown.push(category, 0, format!("+0 ({})", absent));
    }
}
