use crate::config::{DF, ForecastSettings};
use crate::models::{DataStatus, FallbackReason};
use crate::utils::format_duration;

/// Everything the classifier looks at. Assembled from the matcher and divergence outputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityInputs {
    pub match_count: usize,
    pub required_matches: usize,
    pub insufficient_history: bool,
    pub mean_divergence: Option<f64>,
    pub last_timestamp_ms: i64,
    /// Reference "now". Staleness is only judged when the caller supplies one.
    pub as_of_ms: Option<i64>,
}

pub struct DataQualityClassifier;

impl DataQualityClassifier {
    /// REAL or FALLBACK, with exactly one reason when FALLBACK.
    ///
    /// Checks run in a fixed priority order and the first hit wins:
    /// insufficient history, insufficient matches, high divergence, stale data.
    pub fn classify(inputs: &QualityInputs, settings: &ForecastSettings) -> DataStatus {
        let reason = Self::first_failure(inputs, settings);

        match reason {
            Some(reason) => {
                if DF.log_classifier {
                    log::info!(
                        "FALLBACK ({}): {} of {} matches, mean divergence {}",
                        reason,
                        inputs.match_count,
                        inputs.required_matches,
                        inputs
                            .mean_divergence
                            .map_or("n/a".to_string(), |d| format!("{:.3}", d)),
                    );
                }
                DataStatus::fallback(reason)
            }
            None => DataStatus::real(),
        }
    }

    fn first_failure(inputs: &QualityInputs, settings: &ForecastSettings) -> Option<FallbackReason> {
        if inputs.insufficient_history {
            return Some(FallbackReason::InsufficientHistory);
        }
        if inputs.match_count < inputs.required_matches {
            return Some(FallbackReason::InsufficientMatches);
        }
        if inputs
            .mean_divergence
            .is_some_and(|d| d > settings.high_divergence_threshold)
        {
            return Some(FallbackReason::HighDivergence);
        }
        if let Some(as_of) = inputs.as_of_ms {
            let age_ms = as_of.saturating_sub(inputs.last_timestamp_ms);
            if age_ms > settings.staleness_window_ms {
                if DF.log_classifier {
                    log::warn!(
                        "Last candle is {} old (allowed {})",
                        format_duration(age_ms),
                        format_duration(settings.staleness_window_ms)
                    );
                }
                return Some(FallbackReason::StaleData);
            }
        }
        None
    }
}
