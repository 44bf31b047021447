use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::domain::forecast::value_objects::{Features, Season};
use crate::ml::Inference;

/// A prediction row bound for the `demand_predictions` table, keyed by
/// (menu_item_id, prediction_date, prediction_hour).
///
/// `day_of_week` (Monday = 0) and `season` are carried over verbatim from the
/// [`Features`] the model saw, so the stored row always matches the features
/// that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPrediction {
    pub menu_item_id: i64,
    pub prediction_date: NaiveDate,
    pub prediction_hour: i16,
    pub day_of_week: i16,
    pub season: Season,
    pub predicted_quantity: i32,
    pub confidence_score: f64,
    pub model_version: String,
}

impl NewPrediction {
    /// Quantity rounding to a non-negative integer happens here, once, at the
    /// persistence boundary.
    pub fn from_inference(
        features: &Features,
        slot: NaiveDateTime,
        inference: &Inference,
        model_version: &str,
    ) -> Self {
        Self {
            menu_item_id: features.menu_item_id,
            prediction_date: slot.date(),
            prediction_hour: slot.hour() as i16,
            day_of_week: features.day_of_week as i16,
            season: features.season,
            predicted_quantity: inference.quantity.round().max(0.0) as i32,
            confidence_score: inference.confidence,
            model_version: model_version.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn slot() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(13, 0, 0)
            .unwrap()
    }

    #[test]
    fn the_row_mirrors_the_features_and_slot() {
        let features = Features::derive(7, slot());
        let inference = Inference {
            quantity: 3.4,
            confidence: 87.5,
        };

        let row = NewPrediction::from_inference(&features, slot(), &inference, "v1");

        assert_eq!(row.menu_item_id, 7);
        assert_eq!(row.prediction_date, slot().date());
        assert_eq!(row.prediction_hour, 13);
        assert_eq!(row.day_of_week, 0);
        assert_eq!(row.season, Season::Winter);
        assert_eq!(row.predicted_quantity, 3);
        assert_eq!(row.confidence_score, 87.5);
        assert_eq!(row.model_version, "v1");
    }

    #[test]
    fn quantities_round_half_up_and_never_go_negative() {
        let features = Features::derive(7, slot());

        for (quantity, expected) in [(3.5, 4), (2.49, 2), (0.4, 0), (-1.7, 0)] {
            let inference = Inference {
                quantity,
                confidence: 50.0,
            };
            let row = NewPrediction::from_inference(&features, slot(), &inference, "v1");
            assert_eq!(row.predicted_quantity, expected, "quantity {quantity}");
        }
    }
}
