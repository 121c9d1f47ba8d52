#![forbid(unsafe_code)]

//! Derived summaries computed once from a catalog.

use crate::records::{AiModel, ModelStatus};

/// Count, mean of one field, and number of records matching a predicate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    /// Arithmetic mean of the field. Zero for an empty input.
    pub mean: f64,
    pub matching: usize,
}

/// Summarize `records` over `field`, counting those that satisfy `matches`.
pub fn summarize<'a, T, I, F, P>(records: I, field: F, matches: P) -> Summary
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> f64,
    P: Fn(&T) -> bool,
{
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut matching = 0usize;
    for record in records {
        count += 1;
        sum += field(record);
        if matches(record) {
            matching += 1;
        }
    }
    let mean = if count == 0 { 0.0 } else { sum / count as f64 };
    Summary {
        count,
        mean,
        matching,
    }
}

/// Header metrics of the AI model observatory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelMetrics {
    pub total_predictions: u64,
    pub average_accuracy: f64,
    pub active_models: usize,
    pub model_count: usize,
}

impl ModelMetrics {
    pub fn from_models<'a, I>(models: I) -> Self
    where
        I: IntoIterator<Item = &'a AiModel> + Clone,
    {
        let summary = summarize(
            models.clone(),
            |m: &AiModel| m.accuracy,
            |m: &AiModel| m.status == ModelStatus::Deployed,
        );
        let total_predictions = models.into_iter().map(|m| m.predictions).sum();
        Self {
            total_predictions,
            average_accuracy: summary.mean,
            active_models: summary.matching,
            model_count: summary.count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;

    #[test]
    fn empty_mean_is_zero() {
        let empty: Vec<f64> = Vec::new();
        let summary = summarize(&empty, |v: &f64| *v, |_: &f64| true);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.mean, 0.0);
        assert_eq!(summary.matching, 0);
    }

    #[test]
    fn mean_and_matching() {
        let values = [1.0, 2.0, 3.0, 6.0];
        let summary = summarize(&values, |v: &f64| *v, |v: &f64| *v > 2.0);
        assert_eq!(summary.count, 4);
        assert_eq!(summary.mean, 3.0);
        assert_eq!(summary.matching, 2);
    }

    #[test]
    fn builtin_model_metrics() {
        let models = mock::ai_models();
        let metrics = ModelMetrics::from_models(&models);
        assert_eq!(metrics.total_predictions, 66_378);
        assert!((metrics.average_accuracy - 90.98).abs() < 1e-9);
        assert_eq!(metrics.active_models, 3);
        assert_eq!(metrics.model_count, 5);
    }
}
