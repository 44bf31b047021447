use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

/// Calendar season bucketed by month: Dec-Feb winter, Mar-May spring,
/// Jun-Aug summer, Sep-Nov fall.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            _ => Season::Fall,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "winter" => Ok(Season::Winter),
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "fall" => Ok(Season::Fall),
            _ => Err(CoreError::InternalServerError),
        }
    }
}

/// Model input features for one (menu item, hour slot) pair.
///
/// `day_of_week` is numbered Monday = 0 through Sunday = 6. The persisted
/// prediction row stores this exact value, so feature derivation here is the
/// single source of truth for the numbering convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    pub menu_item_id: i64,
    pub order_hour: u32,
    pub day_of_week: u8,
    pub season: Season,
}

impl Features {
    pub fn derive(menu_item_id: i64, slot: NaiveDateTime) -> Self {
        Self {
            menu_item_id,
            order_hour: slot.hour(),
            day_of_week: slot.weekday().num_days_from_monday() as u8,
            season: Season::from_month(slot.month()),
        }
    }
}

/// Parse an ISO-8601 naive timestamp such as `2024-01-15T13:00:00`.
pub fn parse_slot(datetime_str: &str) -> Result<NaiveDateTime, CoreError> {
    datetime_str
        .parse::<NaiveDateTime>()
        .map_err(|_| CoreError::InvalidTimestamp(datetime_str.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictDemandInput {
    pub menu_item_id: i64,
    pub datetime_str: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ForecastResult {
    pub menu_item_id: i64,
    pub prediction_id: i64,
    pub predicted_quantity: i32,
    pub confidence_score: f64,
}

#[derive(Debug, Clone)]
pub struct BatchRunParams {
    pub hours_ahead: u32,
    pub commit_every: u32,
    pub statement_timeout_ms: i64,
}

impl Default for BatchRunParams {
    fn default() -> Self {
        Self {
            hours_ahead: 24,
            commit_every: 200,
            statement_timeout_ms: 60_000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BatchRunReport {
    pub menu_items: usize,
    pub upserts: u64,
    pub commits: u64,
    pub elapsed: Duration,
}
