//! Statistical helpers for numeric columns.
//!
//! All statistics are population statistics: variance divides by the
//! number of values, not by `n - 1`.

use crate::types::NumericStats;

impl NumericStats {
    /// Compute mean, population standard deviation, min and max.
    ///
    /// Returns `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
            count: values.len(),
        })
    }

    /// z-score of a value, or `None` when the spread is zero.
    pub fn z_score(&self, value: f64) -> Option<f64> {
        (self.std_dev > 0.0).then(|| (value - self.mean) / self.std_dev)
    }

    /// Whether `value` is further than `threshold` standard deviations from
    /// the mean. A value exactly at the boundary is not an outlier.
    pub fn is_outlier(&self, value: f64, threshold: f64) -> bool {
        (value - self.mean).abs() > threshold * self.std_dev
    }

    /// Count values outside `threshold` standard deviations.
    pub fn count_outliers(&self, values: &[f64], threshold: f64) -> usize {
        values
            .iter()
            .filter(|v| self.is_outlier(**v, threshold))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_std() {
        // Values 1..=5: mean 3, population variance 2, std sqrt(2)
        let stats = NumericStats::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(stats.mean, 3.0);
        assert!((stats.std_dev - 2.0f64.sqrt()).abs() < 1e-12);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
        assert_eq!(stats.count, 5);
    }

    #[test]
    fn test_reference_column() {
        let stats = NumericStats::from_values(&[1.0, 2.0, 3.0, 100.0]).unwrap();
        assert_eq!(stats.mean, 26.5);
        // Population std is sqrt(7205 / 4)
        assert!((stats.std_dev - 42.44).abs() < 0.01);
        let z = stats.z_score(100.0).unwrap();
        assert!((z - 1.73).abs() < 0.01);
        assert!(!stats.is_outlier(100.0, 3.0));
    }

    #[test]
    fn test_empty_and_constant() {
        assert!(NumericStats::from_values(&[]).is_none());
        let stats = NumericStats::from_values(&[5.0, 5.0, 5.0]).unwrap();
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.z_score(5.0), None);
        assert_eq!(stats.count_outliers(&[5.0, 5.0, 5.0], 3.0), 0);
    }

    #[test]
    fn test_boundary_is_not_outlier() {
        // mean 0, std 1 exactly for [-1, 1]
        let stats = NumericStats::from_values(&[-1.0, 1.0]).unwrap();
        assert_eq!(stats.std_dev, 1.0);
        assert!(!stats.is_outlier(3.0, 3.0));
        assert!(stats.is_outlier(3.0001, 3.0));
    }
}
