use serde::{Deserialize, Serialize};

/// Regression evaluation metrics for a fitted model on a hold-out set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionMetrics {
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Error
    pub mae: f64,
    /// R² coefficient of determination
    pub r2: f64,
    /// Number of samples evaluated
    pub n_samples: usize,
}

pub fn regression_metrics(predictions: &[f64], actuals: &[f64]) -> RegressionMetrics {
    let n = predictions.len().min(actuals.len());
    if n == 0 {
        return RegressionMetrics {
            mse: 0.0,
            rmse: 0.0,
            mae: 0.0,
            r2: 0.0,
            n_samples: 0,
        };
    }

    let n_f = n as f64;

    let mse = predictions
        .iter()
        .zip(actuals.iter())
        .map(|(p, a)| (p - a).powi(2))
        .sum::<f64>()
        / n_f;
    let rmse = mse.sqrt();
    let mae = predictions
        .iter()
        .zip(actuals.iter())
        .map(|(p, a)| (p - a).abs())
        .sum::<f64>()
        / n_f;

    let mean_actual = actuals.iter().take(n).sum::<f64>() / n_f;
    let ss_tot: f64 = actuals
        .iter()
        .take(n)
        .map(|a| (a - mean_actual).powi(2))
        .sum();
    let ss_res: f64 = predictions
        .iter()
        .zip(actuals.iter())
        .map(|(p, a)| (a - p).powi(2))
        .sum();
    let r2 = if ss_tot > 0.0 {
        1.0 - (ss_res / ss_tot)
    } else {
        0.0
    };

    RegressionMetrics {
        mse,
        rmse,
        mae,
        r2,
        n_samples: n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_predictions_score_zero_error_and_full_r2() {
        let values = [1.0, 2.0, 3.0, 4.0];
        let metrics = regression_metrics(&values, &values);

        assert_eq!(metrics.mse, 0.0);
        assert_eq!(metrics.rmse, 0.0);
        assert_eq!(metrics.mae, 0.0);
        assert_eq!(metrics.r2, 1.0);
        assert_eq!(metrics.n_samples, 4);
    }

    #[test]
    fn constant_offset_is_reflected_in_mae_and_mse() {
        let actuals = [1.0, 2.0, 3.0];
        let predictions = [2.0, 3.0, 4.0];
        let metrics = regression_metrics(&predictions, &actuals);

        assert_eq!(metrics.mae, 1.0);
        assert_eq!(metrics.mse, 1.0);
        assert_eq!(metrics.rmse, 1.0);
        assert!(metrics.r2 < 1.0);
    }

    #[test]
    fn empty_input_yields_empty_metrics() {
        let metrics = regression_metrics(&[], &[]);
        assert_eq!(metrics.n_samples, 0);
    }
}
