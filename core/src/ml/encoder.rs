use std::collections::BTreeSet;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::domain::forecast::value_objects::{Features, Season};
use crate::domain::training::value_objects::TrainingRow;

/// One-hot encoding of the categorical demand features (menu_item_id, season,
/// day_of_week), with order_hour passed through numerically as the last
/// column.
///
/// Categories are the ones observed at fit time, sorted. Anything unseen at
/// inference time encodes to all zeros, so a menu item added after training
/// degrades to the ensemble's base rate instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureEncoder {
    menu_item_ids: Vec<i64>,
    seasons: Vec<Season>,
    days_of_week: Vec<u8>,
}

impl FeatureEncoder {
    pub fn fit(rows: &[TrainingRow]) -> Self {
        let menu_item_ids: BTreeSet<i64> = rows.iter().map(|r| r.menu_item_id).collect();
        let seasons: BTreeSet<Season> = rows.iter().map(|r| r.season).collect();
        let days_of_week: BTreeSet<u8> = rows.iter().map(|r| r.day_of_week).collect();

        Self {
            menu_item_ids: menu_item_ids.into_iter().collect(),
            seasons: seasons.into_iter().collect(),
            days_of_week: days_of_week.into_iter().collect(),
        }
    }

    /// Number of encoded columns: one per known category plus order_hour.
    pub fn width(&self) -> usize {
        self.menu_item_ids.len() + self.seasons.len() + self.days_of_week.len() + 1
    }

    pub fn encode(&self, features: &Features) -> Array1<f64> {
        self.encode_parts(
            features.menu_item_id,
            features.order_hour,
            features.day_of_week,
            features.season,
        )
    }

    pub fn encode_row(&self, row: &TrainingRow) -> Array1<f64> {
        self.encode_parts(row.menu_item_id, row.order_hour, row.day_of_week, row.season)
    }

    pub fn encode_matrix(&self, rows: &[TrainingRow]) -> Array2<f64> {
        let mut out = Array2::zeros((rows.len(), self.width()));
        for (i, row) in rows.iter().enumerate() {
            out.row_mut(i).assign(&self.encode_row(row));
        }
        out
    }

    fn encode_parts(
        &self,
        menu_item_id: i64,
        order_hour: u32,
        day_of_week: u8,
        season: Season,
    ) -> Array1<f64> {
        let mut out = Array1::zeros(self.width());

        if let Ok(i) = self.menu_item_ids.binary_search(&menu_item_id) {
            out[i] = 1.0;
        }
        let offset = self.menu_item_ids.len();
        if let Ok(i) = self.seasons.binary_search(&season) {
            out[offset + i] = 1.0;
        }
        let offset = offset + self.seasons.len();
        if let Ok(i) = self.days_of_week.binary_search(&day_of_week) {
            out[offset + i] = 1.0;
        }
        out[self.width() - 1] = f64::from(order_hour);

        out
    }
}
