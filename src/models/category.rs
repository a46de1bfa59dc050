//! Entity categories
//!
//! The fixed, enumerable set of collections that together make up "all user
//! data" for a snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::VaultError;

/// One tracked entity collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityCategory {
    Meals,
    Exercises,
    Weights,
    Recipes,
    FoodItems,
    WeeklyPlans,
    Goals,
    Periods,
    StrengthSessions,
    SleepSessions,
    BodyMeasurements,
    Vitals,
}

impl EntityCategory {
    /// Every category, in canonical order
    pub const ALL: [EntityCategory; 12] = [
        Self::Meals,
        Self::Exercises,
        Self::Weights,
        Self::Recipes,
        Self::FoodItems,
        Self::WeeklyPlans,
        Self::Goals,
        Self::Periods,
        Self::StrengthSessions,
        Self::SleepSessions,
        Self::BodyMeasurements,
        Self::Vitals,
    ];

    pub fn all() -> &'static [EntityCategory] {
        &Self::ALL
    }

    /// Wire name, as used in snapshot payloads and entity counts
    pub fn key(&self) -> &'static str {
        match self {
            Self::Meals => "meals",
            Self::Exercises => "exercises",
            Self::Weights => "weights",
            Self::Recipes => "recipes",
            Self::FoodItems => "foodItems",
            Self::WeeklyPlans => "weeklyPlans",
            Self::Goals => "goals",
            Self::Periods => "periods",
            Self::StrengthSessions => "strengthSessions",
            Self::SleepSessions => "sleepSessions",
            Self::BodyMeasurements => "bodyMeasurements",
            Self::Vitals => "vitals",
        }
    }

    /// Parse a category from user input
    ///
    /// Case-insensitive; `-`, `_` and spaces are ignored so `food-items`,
    /// `food_items` and `foodItems` all resolve.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        Self::ALL
            .iter()
            .copied()
            .find(|c| c.key().to_lowercase() == normalized)
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for EntityCategory {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            VaultError::Validation(format!("Unknown entity category: '{}'", s))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variants() {
        assert_eq!(EntityCategory::parse("meals"), Some(EntityCategory::Meals));
        assert_eq!(
            EntityCategory::parse("foodItems"),
            Some(EntityCategory::FoodItems)
        );
        assert_eq!(
            EntityCategory::parse("food-items"),
            Some(EntityCategory::FoodItems)
        );
        assert_eq!(
            EntityCategory::parse("SLEEP_SESSIONS"),
            Some(EntityCategory::SleepSessions)
        );
        assert_eq!(EntityCategory::parse("steps"), None);
    }

    #[test]
    fn test_from_str_error_is_validation() {
        let err = "steps".parse::<EntityCategory>().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&EntityCategory::BodyMeasurements).unwrap();
        assert_eq!(json, "\"bodyMeasurements\"");

        for category in EntityCategory::all() {
            let json = serde_json::to_string(category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.key()));
        }
    }
}
